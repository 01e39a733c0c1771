//! Logging setup for the layout engine
//!
//! The engine itself only emits `tracing` spans and events; it never
//! installs a subscriber on its own. Hosts call [`init_logging`] once at
//! startup (the wasm binding does so from its `init` hook).
//!
//! # Levels and filtering
//!
//! Each pipeline stage runs inside its own span, so stages can be filtered
//! by target:
//!
//! ```bash
//! # Only the sibling sorter at trace level
//! RUST_LOG="slice_layout::engine::ordering=trace" my-host
//!
//! # Everything at info, positioning at debug
//! RUST_LOG="info,slice_layout::strategies=debug" my-host
//! ```
//!
//! # Environment
//!
//! - `SLICE_LAYOUT_LOG_LEVEL`: trace|debug|info|warn|error|off
//! - `SLICE_LAYOUT_LOG_FORMAT`: compact|pretty|json
//! - `RUST_LOG`: standard `EnvFilter` directives, used when no explicit
//!   level is given
//!
//! On `wasm32` the events go to the browser console through `tracing-wasm`
//! and the format argument is ignored.

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable consulted for the log level
pub const LEVEL_ENV: &str = "SLICE_LAYOUT_LOG_LEVEL";

/// Environment variable consulted for the log format
pub const FORMAT_ENV: &str = "SLICE_LAYOUT_LOG_FORMAT";

/// Output format of the native subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event, no span noise
    #[default]
    Compact,
    /// Multi-line with source locations and span enter/exit
    Pretty,
    /// Newline-delimited JSON for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Names accepted by [`LogFormat::from_str`]
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Level directive and format after applying arguments, environment and
/// defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub directive: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// Resolve settings: explicit arguments win, then `SLICE_LAYOUT_LOG_*`,
    /// then `RUST_LOG`, then `info`/compact.
    pub fn resolve(level: Option<&str>, format: Option<&str>) -> Result<Self, String> {
        let directive = level
            .map(str::to_string)
            .or_else(|| std::env::var(LEVEL_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string());

        let format = match format
            .map(str::to_string)
            .or_else(|| std::env::var(FORMAT_ENV).ok())
        {
            Some(name) => LogFormat::from_str(&name)?,
            None => LogFormat::default(),
        };

        Ok(Self { directive, format })
    }
}

/// Install a global subscriber
///
/// # Arguments
///
/// * `level` - level or `EnvFilter` directive; see [`LogSettings::resolve`]
/// * `format` - compact|pretty|json
///
/// Fails when the format is unknown or a global subscriber is already set.
///
/// # Example
///
/// ```rust,no_run
/// use slice_layout::core::logging::init_logging;
///
/// init_logging(Some("debug"), Some("pretty")).unwrap();
/// ```
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfig::default(),
        );
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let settings = LogSettings::resolve(level, format)
            .map_err(|e| format!("Invalid log format: {}", e))?;

        // A bad directive degrades to `info` rather than silencing the engine
        let filter =
            EnvFilter::try_new(&settings.directive).unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = Registry::default().with(filter);

        match settings.format {
            LogFormat::Compact => registry
                .with(fmt::layer().compact().with_target(false))
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE),
                )
                .try_init()?,
            // one object per event, stage timings on span close
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(false)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .try_init()?,
        }

        Ok(())
    }
}

/// Initialize logging with environment/default settings
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str(" Pretty ").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_explicit_arguments_win() {
        let settings = LogSettings::resolve(Some("debug"), Some("json")).unwrap();
        assert_eq!(settings.directive, "debug");
        assert_eq!(settings.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(LogSettings::resolve(Some("info"), Some("yaml")).is_err());
    }
}
