//! Gatehouse - editor gateway for the club website

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use gatehouse::{config::Args, logging, server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(&args.log_level, args.log_format);

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Gatehouse - club site editor gateway");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Repository: {} (branch {})", args.github.repo, args.github.branch);
    info!("GitHub API: {}", args.github.api_url);
    info!("Completion service: {} ({})", args.openai.base_url, args.openai.model);
    match args.upstream_timeout() {
        Some(timeout) => info!("Upstream timeout: {:?}", timeout),
        None => info!("Upstream timeout: network default"),
    }
    info!("======================================");

    let state = Arc::new(AppState::new(args)?);

    if let Err(e) = server::run(state).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
