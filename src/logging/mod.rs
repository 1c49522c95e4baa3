//! Logging infrastructure for Gatehouse
//!
//! Installs the tracing subscriber and provides the structured edit audit
//! trail (`gatehouse::audit` target).

pub mod audit;

pub use audit::{EditEvent, EventType, AUDIT_TARGET};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence; otherwise `gatehouse=<log_level>,info`.
pub fn init(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("gatehouse={},info", log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
