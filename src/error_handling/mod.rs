//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for each pipeline stage
//! - Failure categorization for reqwest errors
//! - Per-run failure statistics
//!
//! Only initialization errors abort a run. Lookup and marker errors are
//! per-item and skipped; clustering and render errors end the run with a
//! reported outcome.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ProcessingStats;
pub use types::{
    ClusterError, FailureType, InitializationError, LookupError, MarkerError, RenderError,
};
