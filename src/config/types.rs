//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_GEO_ENDPOINT, DEFAULT_INPUT_FILE, DEFAULT_MAX_CLUSTERS, DEFAULT_N_INIT,
    DEFAULT_OUTPUT_FILE, DEFAULT_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Pipeline configuration.
///
/// Parsed from the command line by `clap`, or built programmatically from
/// `Config::default()`. Every default matches the fixed behavior of the tool:
/// read `ips.txt`, query ip-api.com with a 5 second timeout, cluster into at
/// most 5 groups, and write `clustered_ips_map.html`.
///
/// # Examples
///
/// ```no_run
/// use ip_cluster_map::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("addresses.txt"),
///     seed: Some(7),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ip_cluster_map",
    version,
    about = "Geolocates IP addresses, clusters them, and plots them on a map."
)]
pub struct Config {
    /// File to read IP addresses from (one per line)
    #[arg(value_parser, default_value = DEFAULT_INPUT_FILE)]
    pub file: PathBuf,

    /// Output path for the rendered HTML map
    #[arg(long, value_parser, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Geolocation endpoint; the IP address is appended as a path segment
    #[arg(long, default_value = DEFAULT_GEO_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Upper bound on the number of clusters
    #[arg(long, default_value_t = DEFAULT_MAX_CLUSTERS)]
    pub max_clusters: usize,

    /// Number of k-means initializations (best inertia is kept)
    #[arg(long, default_value_t = DEFAULT_N_INIT)]
    pub n_init: usize,

    /// Seed for k-means initialization; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_INPUT_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_clusters: DEFAULT_MAX_CLUSTERS,
            n_init: DEFAULT_N_INIT,
            seed: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is expected
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns the first field that is out of range or malformed.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.max_clusters == 0 {
            return Err(ConfigValidationError {
                field: "max_clusters",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.n_init == 0 {
            return Err(ConfigValidationError {
                field: "n_init",
                message: "must be greater than 0".to_string(),
            });
        }
        match url::Url::parse(&self.endpoint) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) if parsed.cannot_be_a_base() => {
                return Err(ConfigValidationError {
                    field: "endpoint",
                    message: format!("'{}' cannot take a path segment", self.endpoint),
                });
            }
            Ok(parsed) => {
                return Err(ConfigValidationError {
                    field: "endpoint",
                    message: format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigValidationError {
                    field: "endpoint",
                    message: format!("'{}' is not a valid URL: {e}", self.endpoint),
                });
            }
        }
        Ok(())
    }
}
