//! Configuration constants.
//!
//! Defaults for every tunable in the pipeline. The CLI exposes each of these as
//! an option, so running without arguments uses exactly these values.

/// Default input file, one IP address per line
pub const DEFAULT_INPUT_FILE: &str = "ips.txt";

/// Default output file for the rendered map
pub const DEFAULT_OUTPUT_FILE: &str = "clustered_ips_map.html";

/// Geolocation endpoint; the IP address is appended as the last path segment.
///
/// ip-api.com's free tier only serves plain HTTP.
pub const DEFAULT_GEO_ENDPOINT: &str = "http://ip-api.com/json";

/// Per-request timeout in seconds for geolocation lookups
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Upper bound on the number of k-means clusters
pub const DEFAULT_MAX_CLUSTERS: usize = 5;

/// Number of k-means initializations; the run with the lowest inertia wins
pub const DEFAULT_N_INIT: usize = 10;

/// Maximum Lloyd iterations per k-means initialization
pub const KMEANS_MAX_ITERATIONS: u64 = 300;

/// Convergence tolerance for k-means
pub const KMEANS_TOLERANCE: f64 = 1e-4;

/// Map view center (latitude, longitude)
pub const MAP_CENTER: (f64, f64) = (0.0, 0.0);

/// Initial map zoom; wide enough to show the whole world
pub const MAP_ZOOM_START: u8 = 2;

/// Value substituted for a missing city or country
pub const UNKNOWN_FIELD: &str = "Unknown";

/// `status` value the geolocation service returns for a resolved address
pub const GEO_STATUS_SUCCESS: &str = "success";

/// How often (in processed IPs) a progress line is logged
pub const LOGGING_INTERVAL: usize = 25;

/// User-Agent sent with geolocation requests
pub const DEFAULT_USER_AGENT: &str = concat!("ip_cluster_map/", env!("CARGO_PKG_VERSION"));
