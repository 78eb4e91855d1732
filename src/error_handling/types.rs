//! Error type definitions.
//!
//! This module defines the error enums for each pipeline stage and the
//! `FailureType` taxonomy used for end-of-run statistics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Transport-level failure of a single geolocation lookup.
///
/// Never aborts the run: the client turns it into `LookupResult::Failed` and the
/// aggregator skips the IP.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The endpoint could not be combined with the IP into a request URL.
    #[error("cannot build lookup URL from endpoint '{endpoint}'")]
    InvalidUrl {
        /// Configured endpoint
        endpoint: String,
    },

    /// Timeout, connection failure, non-2xx status, or undecodable body.
    #[error("{0}")]
    Request(#[from] ReqwestError),
}

/// Failure of the clustering stage. Halts the run.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// There were no coordinates to cluster.
    #[error("no coordinates to cluster")]
    Empty,

    /// A coordinate was NaN or infinite.
    #[error("coordinate at row {row} is not finite")]
    NonFinite {
        /// Row of the offending coordinate
        row: usize,
    },

    /// The k-means routine itself failed.
    #[error("k-means error: {0}")]
    KMeans(#[from] linfa_clustering::KMeansError),

    /// The routine returned a label sequence that does not line up with the input.
    #[error("expected {expected} labels, got {actual}")]
    LabelMismatch {
        /// Number of input coordinates
        expected: usize,
        /// Number of labels produced
        actual: usize,
    },
}

/// A marker that could not be placed on the map. Rendering continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkerError {
    /// Latitude is NaN, infinite, or outside [-90, 90].
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude is NaN, infinite, or outside [-180, 180].
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Failure to serialize or write the map document. Ends the run.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Marker payload could not be serialized.
    #[error("failed to serialize markers: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("failed to write map: {0}")]
    Io(#[from] std::io::Error),
}

/// Categories of per-item failures counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureType {
    // Transport errors from the geolocation request
    LookupTimeout,
    LookupConnectError,
    LookupHttpStatus,
    LookupDecodeError,
    LookupInvalidUrl,
    LookupOtherError,
    // Service answered but the answer is unusable
    StatusNotSuccess,
    MissingCoordinates,
    // Rendering
    MarkerRejected,
}

impl std::fmt::Display for FailureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureType::LookupTimeout => "Lookup timeout",
            FailureType::LookupConnectError => "Lookup connect error",
            FailureType::LookupHttpStatus => "Lookup HTTP status error",
            FailureType::LookupDecodeError => "Lookup response decode error",
            FailureType::LookupInvalidUrl => "Lookup URL build error",
            FailureType::LookupOtherError => "Lookup other error",
            FailureType::StatusNotSuccess => "Service status not success",
            FailureType::MissingCoordinates => "Missing coordinates",
            FailureType::MarkerRejected => "Marker rejected",
        }
    }
}
