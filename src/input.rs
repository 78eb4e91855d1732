//! IP list loading.

use std::io::ErrorKind;
use std::path::Path;

use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads IP addresses from `path`, one per line.
///
/// Lines are trimmed; blank lines and `#` comments are dropped. No other
/// validation happens here: malformed addresses are left for the geolocation
/// service to reject.
///
/// Never fails. A missing or unreadable file is logged and yields an empty
/// list, which the caller treats as nothing to do.
pub async fn read_ip_list(path: &Path) -> Vec<String> {
    match read_lines(path).await {
        Ok(ips) => {
            info!("Total IPs in file: {}", ips.len());
            ips
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!("Error: File '{}' not found.", path.display());
            Vec::new()
        }
        Err(e) => {
            error!("Error reading file '{}': {e}", path.display());
            Vec::new()
        }
    }
}

async fn read_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let file = tokio::fs::File::open(path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut ips = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if let Some(ip) = parse_line(&line) {
            ips.push(ip.to_string());
        }
    }
    Ok(ips)
}

/// Returns the trimmed IP token on `line`, or `None` for blanks and comments.
fn parse_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}
