//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, timeouts, k-means parameters)
//! - CLI option types and parsing
//! - Configuration validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel};
