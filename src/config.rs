//! Configuration for Gatehouse
//!
//! CLI arguments and environment variable handling using clap. The variable
//! names match the ones the site's hosting environment already defines.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

/// Gatehouse - editor gateway for the club website
#[derive(Parser, Debug, Clone)]
#[command(name = "gatehouse")]
#[command(about = "GitHub content gateway and AI edit translator for the club website")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Shared secret the editor sends in the X-Admin-Token header
    #[arg(long, env = "ADMIN_SECRET", hide_env_values = true)]
    pub admin_secret: Option<String>,

    /// GitHub configuration
    #[command(flatten)]
    pub github: GitHubArgs,

    /// Completion service configuration
    #[command(flatten)]
    pub openai: OpenAiArgs,

    /// Timeout for outbound requests in milliseconds (unset: network defaults)
    #[arg(long, env = "UPSTREAM_TIMEOUT_MS")]
    pub upstream_timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// GitHub content store configuration
#[derive(Parser, Debug, Clone)]
pub struct GitHubArgs {
    /// GitHub access token with contents read/write on the site repository
    #[arg(long = "github-token", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository holding the site, as owner/name
    #[arg(long = "github-repo", env = "GITHUB_REPO", default_value = "QED411/bysc-website")]
    pub repo: String,

    /// Branch commits are made against
    #[arg(long = "github-branch", env = "GITHUB_BRANCH", default_value = "master")]
    pub branch: String,

    /// GitHub REST API base URL
    #[arg(long = "github-api-url", env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,
}

/// OpenAI-compatible completion service configuration
#[derive(Parser, Debug, Clone)]
pub struct OpenAiArgs {
    /// API key for the completion service
    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the chat completions API
    #[arg(long = "openai-base-url", env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub base_url: String,

    /// Model used for page edits
    #[arg(long = "openai-model", env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Sampling temperature; kept near zero so edits stay literal
    #[arg(long = "openai-temperature", env = "OPENAI_TEMPERATURE", default_value = "0.1")]
    pub temperature: f32,

    /// Output token ceiling; a whole page has to fit
    #[arg(long = "openai-max-tokens", env = "OPENAI_MAX_TOKENS", default_value = "16000")]
    pub max_tokens: u32,
}

/// Log output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Args {
    /// Repository endpoint, e.g. `https://api.github.com/repos/owner/name`
    pub fn repo_api_url(&self) -> String {
        format!(
            "{}/repos/{}",
            self.github.api_url.trim_end_matches('/'),
            self.github.repo
        )
    }

    /// Outbound request timeout, if one was configured
    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_ms.map(Duration::from_millis)
    }

    /// Validate configuration
    ///
    /// Missing credentials are not startup errors: each endpoint answers 500
    /// for as long as its credential is absent.
    pub fn validate(&self) -> Result<(), String> {
        let repo = self.github.repo.as_str();
        match repo.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
            _ => return Err(format!("GITHUB_REPO must be owner/name, got '{}'", repo)),
        }

        if self.github.branch.trim().is_empty() {
            return Err("GITHUB_BRANCH must not be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.openai.temperature) {
            return Err("OPENAI_TEMPERATURE must be between 0.0 and 2.0".to_string());
        }

        if self.openai.max_tokens == 0 {
            return Err("OPENAI_MAX_TOKENS must be greater than zero".to_string());
        }

        Ok(())
    }
}
