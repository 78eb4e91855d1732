// Shared test helpers for input files, mock geolocation answers, and configs.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::io::Write;
use std::path::Path;

use ip_cluster_map::{Config, LogFormat, LogLevel};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes one IP per line to a temporary file (sync I/O).
#[allow(dead_code)] // Used by other test files
pub fn write_ips_to_file(ips: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for ip in ips {
        writeln!(file, "{}", ip).expect("Failed to write IP");
    }
    file.flush().expect("Failed to flush file");
    file
}

/// A successful lookup body in the shape the geolocation service returns.
#[allow(dead_code)]
pub fn success_body(ip: &str, lat: f64, lon: f64, city: &str, country: &str) -> Value {
    json!({
        "status": "success",
        "query": ip,
        "lat": lat,
        "lon": lon,
        "city": city,
        "country": country,
    })
}

/// Mounts a single-IP responder on the mock server.
#[allow(dead_code)]
pub async fn mount_lookup(server: &MockServer, ip: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/json/{ip}")))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Config pointing at the mock server with a fixed seed and a short timeout.
#[allow(dead_code)]
pub fn test_config(server: &MockServer, input: &Path, output: &Path) -> Config {
    Config {
        file: input.to_path_buf(),
        output: output.to_path_buf(),
        endpoint: format!("{}/json", server.uri()),
        timeout_seconds: 1,
        seed: Some(42),
        log_level: LogLevel::Error, // Reduce noise in tests
        log_format: LogFormat::Plain,
        ..Default::default()
    }
}
