//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureType, ProcessingStats};

/// Logs the per-category failure counts, skipping categories that never
/// occurred. Logs nothing when the run had no failures.
pub fn print_failure_statistics(stats: &ProcessingStats) {
    let total = stats.total_failures();
    if total == 0 {
        return;
    }

    info!("Failure Counts ({} total):", total);
    for line in failure_lines(stats) {
        info!("   {line}");
    }
}

fn failure_lines(stats: &ProcessingStats) -> Vec<String> {
    FailureType::iter()
        .filter_map(|failure| {
            let count = stats.get_count(failure);
            (count > 0).then(|| format!("{}: {}", failure.as_str(), count))
        })
        .collect()
}
