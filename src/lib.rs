//! ip_cluster_map library: geolocate, cluster, and map a list of IP addresses
//!
//! The pipeline is strictly linear: read IPs from a file, look each one up
//! against a JSON geolocation service, cluster the resulting coordinates with
//! k-means, and render one colored marker per location onto a Leaflet map.
//!
//! # Example
//!
//! ```no_run
//! use ip_cluster_map::{run_pipeline, Config, RunOutcome};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: PathBuf::from("ips.txt"),
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let report = run_pipeline(config).await?;
//! if let RunOutcome::MapSaved(path) = &report.outcome {
//!     println!("{} markers written to {}", report.markers_placed, path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Lookups are awaited one at a time;
//! nothing is spawned.

mod app;
pub mod cluster;
pub mod config;
pub mod error_handling;
pub mod geolocation;
pub mod initialization;
pub mod input;
pub mod map;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use run::{run_pipeline, RunOutcome, RunReport};

// Internal run module (contains the pipeline orchestration)
mod run {
    use std::path::PathBuf;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{error, info};

    use crate::app::{log_progress, print_failure_statistics};
    use crate::cluster::{assign_clusters, ClusterSettings};
    use crate::config::{Config, MAP_CENTER, MAP_ZOOM_START};
    use crate::error_handling::{FailureType, ProcessingStats};
    use crate::geolocation::{GeoClient, LocationSet};
    use crate::initialization::init_client;
    use crate::input::read_ip_list;
    use crate::map::{MapDocument, Marker};

    /// Where the pipeline stopped.
    #[derive(Debug, Clone, PartialEq)]
    pub enum RunOutcome {
        /// The input file was missing, unreadable, or had no IPs.
        NoInput,
        /// Every lookup failed or was rejected.
        NoValidLocations,
        /// Clustering raised an error; no map was written.
        ClusteringFailed(String),
        /// The map could not be written.
        SaveFailed(String),
        /// The map was written to this path.
        MapSaved(PathBuf),
    }

    /// Summary of a completed run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// IPs read from the input file
        pub total_ips: usize,
        /// IPs that produced a `GeoRecord`
        pub located: usize,
        /// IPs that were skipped
        pub failed: usize,
        /// Number of clusters fitted, if clustering ran
        pub n_clusters: Option<usize>,
        /// Markers placed on the map, in input order
        pub markers: Vec<Marker>,
        pub markers_placed: usize,
        pub markers_skipped: usize,
        /// Per-category failure counts
        pub failures: ProcessingStats,
        pub outcome: RunOutcome,
        pub elapsed_seconds: f64,
    }

    impl RunReport {
        fn new() -> Self {
            Self {
                total_ips: 0,
                located: 0,
                failed: 0,
                n_clusters: None,
                markers: Vec::new(),
                markers_placed: 0,
                markers_skipped: 0,
                failures: ProcessingStats::new(),
                outcome: RunOutcome::NoInput,
                elapsed_seconds: 0.0,
            }
        }

        fn finish(mut self, outcome: RunOutcome, start_time: Instant) -> Self {
            self.outcome = outcome;
            self.elapsed_seconds = start_time.elapsed().as_secs_f64();
            print_failure_statistics(&self.failures);
            self
        }
    }

    /// Runs the full pipeline with the provided configuration.
    ///
    /// Each stage may end the run early. Empty input, zero located IPs,
    /// a clustering failure, and a save failure are all reported through
    /// `RunReport::outcome` rather than as errors. Per-IP and per-marker
    /// failures are logged, counted, and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub async fn run_pipeline(config: Config) -> Result<RunReport> {
        config.validate().context("Invalid configuration")?;

        let start_time = Instant::now();
        let mut report = RunReport::new();

        let ips = read_ip_list(&config.file).await;
        report.total_ips = ips.len();
        if ips.is_empty() {
            info!("No IPs to process.");
            return Ok(report.finish(RunOutcome::NoInput, start_time));
        }

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let geo = GeoClient::new(client, config.endpoint.clone());

        let mut locations = LocationSet::new();
        for (i, ip) in ips.iter().enumerate() {
            let result = geo.lookup(ip).await;
            if let Err(rejection) = locations.record(ip, result) {
                report.failures.increment(rejection.failure_type());
                report.failed += 1;
            }
            log_progress(start_time, i + 1, ips.len());
        }
        report.located = locations.len();

        if locations.is_empty() {
            info!("No valid IP locations found.");
            return Ok(report.finish(RunOutcome::NoValidLocations, start_time));
        }

        let settings = ClusterSettings::from(&config);
        let assignment = match assign_clusters(&locations.coordinate_matrix(), &settings) {
            Ok(assignment) => assignment,
            Err(e) => {
                error!("Clustering failed: {e}");
                return Ok(report.finish(RunOutcome::ClusteringFailed(e.to_string()), start_time));
            }
        };
        report.n_clusters = Some(assignment.n_clusters);
        for (cluster, size) in assignment.cluster_sizes().iter().enumerate() {
            info!("Cluster {cluster}: {size} locations");
        }

        let mut document = MapDocument::new(MAP_CENTER, MAP_ZOOM_START);
        for (record, &label) in locations.records().iter().zip(&assignment.labels) {
            if let Err(e) = document.add_marker(record, label) {
                error!("Error adding marker for IP {}: {e}", record.ip);
                report.failures.increment(FailureType::MarkerRejected);
                report.markers_skipped += 1;
            }
        }
        report.markers = document.markers().to_vec();
        report.markers_placed = report.markers.len();

        let outcome = match document.save(&config.output).await {
            Ok(()) => {
                info!("Map saved as {}", config.output.display());
                RunOutcome::MapSaved(config.output.clone())
            }
            Err(e) => {
                error!("Failed to save map: {e}");
                RunOutcome::SaveFailed(e.to_string())
            }
        };
        Ok(report.finish(outcome, start_time))
    }
}
