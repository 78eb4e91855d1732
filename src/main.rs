//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ip_cluster_map` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ip_cluster_map::initialization::init_logger_with;
use ip_cluster_map::{run_pipeline, Config, RunOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), e.g. RUST_LOG
    // Try the current directory first, then the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_pipeline(config).await {
        Ok(report) => {
            println!(
                "Located {} of {} IP{} ({} failed) in {:.1}s",
                report.located,
                report.total_ips,
                if report.total_ips == 1 { "" } else { "s" },
                report.failed,
                report.elapsed_seconds
            );
            match &report.outcome {
                RunOutcome::MapSaved(path) => println!(
                    "{} marker{} in {} cluster{} written to {}",
                    report.markers_placed,
                    if report.markers_placed == 1 { "" } else { "s" },
                    report.n_clusters.unwrap_or(0),
                    if report.n_clusters == Some(1) { "" } else { "s" },
                    path.display()
                ),
                RunOutcome::NoInput | RunOutcome::NoValidLocations => {
                    println!("No map written")
                }
                RunOutcome::ClusteringFailed(reason) | RunOutcome::SaveFailed(reason) => {
                    println!("No map written: {reason}")
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ip_cluster_map error: {:#}", e);
            process::exit(1);
        }
    }
}
