//! IP geolocation via an external JSON lookup service.
//!
//! This module provides the HTTP client that resolves one IP per request and
//! the aggregator that turns successful answers into `GeoRecord`s with an
//! index-aligned coordinate list.

mod aggregate;
mod client;
mod types;

// Re-export public API
pub use aggregate::{LocationSet, RecordRejection};
pub use client::GeoClient;
pub use types::{GeoRecord, IpApiResponse, LookupResult};
