//! Logging setup for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application.

use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Environment variable holding a full filter directive
pub const LOG_ENV: &str = "TREENAV_LOG";

/// Pick the filter: `TREENAV_LOG`, else the config level raised once per `-v`
pub fn filter_directive(env: Option<String>, verbose: u8, level: LogLevel) -> String {
    match env {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => level.raised(verbose).to_string(),
    }
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn init(verbose: u8, level: LogLevel) {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), verbose, level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directive_wins() {
        let directive = filter_directive(Some("treenav=trace".into()), 2, LogLevel::Error);
        assert_eq!(directive, "treenav=trace");
    }

    #[test]
    fn verbosity_raises_config_level() {
        assert_eq!(filter_directive(None, 0, LogLevel::Warn), "warn");
        assert_eq!(filter_directive(None, 1, LogLevel::Warn), "info");
        assert_eq!(filter_directive(Some("  ".into()), 1, LogLevel::Info), "debug");
    }
}
