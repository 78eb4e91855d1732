//! Accumulates successful lookups into index-aligned records and coordinates.

use log::{info, warn};
use ndarray::Array2;
use thiserror::Error;

use super::types::{GeoRecord, IpApiResponse, LookupResult};
use crate::config::{GEO_STATUS_SUCCESS, UNKNOWN_FIELD};
use crate::error_handling::{FailureType, LookupError};

/// Why a lookup result did not become a `GeoRecord`.
#[derive(Error, Debug)]
pub enum RecordRejection {
    /// The request itself failed.
    #[error("lookup failed: {0}")]
    LookupFailed(#[from] LookupError),

    /// The service answered with a status other than success.
    #[error("service returned status {}{}", status_text(.status), message_suffix(.message))]
    StatusNotSuccess {
        status: Option<String>,
        message: Option<String>,
    },

    /// Status was success but a coordinate was missing.
    #[error("missing {0}")]
    MissingCoordinates(&'static str),
}

fn status_text(status: &Option<String>) -> &str {
    status.as_deref().unwrap_or("<none>")
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

impl RecordRejection {
    pub fn failure_type(&self) -> FailureType {
        match self {
            RecordRejection::LookupFailed(e) => e.failure_type(),
            RecordRejection::StatusNotSuccess { .. } => FailureType::StatusNotSuccess,
            RecordRejection::MissingCoordinates(_) => FailureType::MissingCoordinates,
        }
    }
}

/// Successful geolocations in input order.
///
/// Records and coordinates are only appended together, so `records()[i]` and
/// `coordinates()[i]` always describe the same IP.
#[derive(Debug, Default)]
pub struct LocationSet {
    records: Vec<GeoRecord>,
    coordinates: Vec<[f64; 2]>,
}

impl LocationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one lookup result into the set.
    ///
    /// On success one record and one `[lat, lon]` pair are appended. Anything
    /// else is logged with the IP and rejected; no partial record is created.
    pub fn record(&mut self, ip: &str, result: LookupResult) -> Result<&GeoRecord, RecordRejection> {
        let response = match result {
            LookupResult::Response(response) => response,
            LookupResult::Failed(e) => {
                warn!("Failed to get data for IP: {ip}");
                return Err(e.into());
            }
        };

        match to_record(ip, response) {
            Ok(record) => {
                info!(
                    "Fetched data for {}: {}, {}",
                    record.ip, record.city, record.country
                );
                self.coordinates.push([record.latitude, record.longitude]);
                self.records.push(record);
                Ok(&self.records[self.records.len() - 1])
            }
            Err(rejection) => {
                match &rejection {
                    RecordRejection::MissingCoordinates(_) => {
                        warn!("Missing data for IP {ip}: {rejection}")
                    }
                    _ => warn!("Failed to get data for IP: {ip} ({rejection})"),
                }
                Err(rejection)
            }
        }
    }

    pub fn records(&self) -> &[GeoRecord] {
        &self.records
    }

    pub fn coordinates(&self) -> &[[f64; 2]] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Coordinates as an `(L, 2)` matrix of `[latitude, longitude]` rows.
    pub fn coordinate_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.coordinates.len(), 2), |(row, col)| {
            self.coordinates[row][col]
        })
    }
}

fn to_record(ip: &str, response: IpApiResponse) -> Result<GeoRecord, RecordRejection> {
    if response.status.as_deref() != Some(GEO_STATUS_SUCCESS) {
        return Err(RecordRejection::StatusNotSuccess {
            status: response.status,
            message: response.message,
        });
    }
    let latitude = response
        .lat
        .ok_or(RecordRejection::MissingCoordinates("lat"))?;
    let longitude = response
        .lon
        .ok_or(RecordRejection::MissingCoordinates("lon"))?;

    Ok(GeoRecord {
        ip: ip.to_string(),
        latitude,
        longitude,
        city: response.city.unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
        country: response.country.unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
    })
}
