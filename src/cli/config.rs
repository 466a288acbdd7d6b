//! Runner configuration

use std::path::PathBuf;

use clap::{Args, Parser};
use volume_discount::function::Protocol;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Volume discount function runner configuration
#[derive(Debug, Parser)]
#[command(
    name = "volume-discount",
    version,
    about = "Evaluate the volume discount function for one input document",
    long_about = None
)]
pub struct CliConfig {
    /// Read the input document from this file instead of stdin
    #[arg(short, long, env = "VOLUME_DISCOUNT_INPUT")]
    pub input: Option<PathBuf>,

    /// Output protocol version
    #[arg(
        short,
        long,
        env = "VOLUME_DISCOUNT_PROTOCOL",
        value_enum,
        default_value_t = Protocol::CartLinesDiscountsGenerate
    )]
    pub protocol: Protocol,

    /// Write the per-line evaluation report to stderr
    #[arg(long, env = "VOLUME_DISCOUNT_EXPLAIN")]
    pub explain: bool,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_current_protocol_and_stdin() -> TestResult {
        let config = CliConfig::try_parse_from(["volume-discount"])?;

        assert_eq!(config.input, None);
        assert_eq!(config.protocol, Protocol::CartLinesDiscountsGenerate);

        Ok(())
    }

    #[test]
    fn parses_legacy_protocol_and_input_path() -> TestResult {
        let config = CliConfig::try_parse_from([
            "volume-discount",
            "--protocol",
            "legacy-run",
            "--input",
            "input.json",
            "--explain",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.protocol, Protocol::LegacyRun);
        assert_eq!(config.input, Some(PathBuf::from("input.json")));
        assert!(config.explain);
        assert!(matches!(config.logging.log_format, LogFormat::Json));

        Ok(())
    }

    #[test]
    fn rejects_unknown_protocol() {
        assert!(CliConfig::try_parse_from(["volume-discount", "--protocol", "v3"]).is_err());
    }
}
