//! Logging initialization and configuration

use crate::{TelemetryError, TelemetryResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Base log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, text, compact)
    pub format: LogFormat,

    /// Extra per-target directives, e.g. `ibft_messages=trace`
    pub directives: Vec<String>,

    /// Enable ANSI colors
    pub color: bool,

    /// Include target in log output
    pub include_target: bool,

    /// Include file location in log output
    pub include_location: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// Compact single-line format
    Compact,
    /// JSON format for machine parsing
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            directives: Vec::new(),
            color: true,
            include_target: true,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Builds the filter from `level` and `directives`, ignoring `RUST_LOG`.
    pub fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter =
            EnvFilter::try_new(&self.level).map_err(|e| TelemetryError::InvalidFilter {
                directive: self.level.clone(),
                message: e.to_string(),
            })?;

        for raw in &self.directives {
            let directive =
                raw.parse::<Directive>()
                    .map_err(|e| TelemetryError::InvalidFilter {
                        directive: raw.clone(),
                        message: e.to_string(),
                    })?;
            filter = filter.add_directive(directive);
        }
        Ok(filter)
    }

    /// `RUST_LOG` when set, otherwise [`LogConfig::build_filter`].
    pub fn filter(&self) -> TelemetryResult<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => self.build_filter(),
        }
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        match self.format {
            LogFormat::Text => fmt::layer()
                .with_ansi(self.color)
                .with_target(self.include_target)
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_ansi(self.color)
                .with_target(self.include_target)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_target(self.include_target)
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .boxed(),
        }
    }
}

/// Initialize the logging system
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.filter()?;

    tracing_subscriber::registry()
        .with(config.layer())
        .with(filter)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::info!(level = %config.level, format = ?config.format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Text);
        assert!(config.color);
        assert!(config.directives.is_empty());
    }

    #[test]
    fn test_build_filter_with_directives() {
        let config = LogConfig {
            directives: vec!["ibft_messages=trace".to_string()],
            ..Default::default()
        };
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn test_build_filter_rejects_bad_directive() {
        let config = LogConfig {
            directives: vec!["ibft_messages=notalevel".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.build_filter(),
            Err(TelemetryError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_parse_from_toml() {
        let config: LogConfig = toml::from_str(
            r#"
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.include_target);
    }

    #[test]
    fn test_init_twice_fails_cleanly() {
        let config = LogConfig {
            color: false,
            ..Default::default()
        };
        // Another test binary may have installed a subscriber already; either
        // way a second call must report an error instead of panicking.
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::LoggingInit(_))
        ));
    }
}
