//! Progress logging utilities.

use std::time::Instant;

use log::info;

use crate::config::LOGGING_INTERVAL;

/// Logs lookup progress every `LOGGING_INTERVAL` IPs and on the last one.
///
/// # Arguments
///
/// * `start_time` - When the lookups started
/// * `processed` - Number of IPs looked up so far
/// * `total` - Number of IPs in the input
pub fn log_progress(start_time: Instant, processed: usize, total: usize) {
    if !should_log(processed, total) {
        return;
    }
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        processed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Looked up {}/{} IPs in {:.2} seconds (~{:.2} IPs/sec)",
        processed, total, elapsed_secs, rate
    );
}

fn should_log(processed: usize, total: usize) -> bool {
    processed > 0 && (processed % LOGGING_INTERVAL == 0 || processed == total)
}
