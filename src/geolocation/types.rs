//! Geolocation data structures.

use serde::{Deserialize, Serialize};

use crate::error_handling::LookupError;

/// Raw ip-api.com response body.
///
/// Every field is optional: the service omits fields on failure, and even a
/// nominal success is not trusted to carry all of them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct IpApiResponse {
    /// `"success"` or `"fail"`
    pub status: Option<String>,
    /// Failure reason when `status` is `"fail"` (e.g. `"private range"`)
    pub message: Option<String>,
    /// The address the service resolved
    pub query: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Outcome of one geolocation request.
#[derive(Debug)]
pub enum LookupResult {
    /// The service answered with a decodable body.
    Response(IpApiResponse),
    /// The request never produced a usable body.
    Failed(LookupError),
}

/// A successfully resolved IP-to-location association.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRecord {
    pub ip: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
}
