//! Configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::conversions::DEFAULT_MAX_HOPS;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
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
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Larder configuration
#[derive(Debug, Parser)]
#[command(name = "larder", about = "Cheapest recipe costs for a fixture set", long_about = None)]
pub struct Config {
    /// Fixture set to load (units, products and recipes share the name)
    #[arg(short, long, env = "LARDER_FIXTURE", default_value = "creme-brulee")]
    pub fixture: String,

    /// Directory containing `units/`, `products/` and `recipes/`
    #[arg(long, env = "LARDER_FIXTURES_PATH", default_value = "./fixtures")]
    pub fixtures_path: PathBuf,

    /// Maximum number of conversion edges followed per unit conversion
    #[arg(long, env = "LARDER_MAX_HOPS", default_value_t = DEFAULT_MAX_HOPS)]
    pub max_hops: usize,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
