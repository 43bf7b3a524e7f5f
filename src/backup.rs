use crate::error::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Save a timestamped copy of the running-config.
///
/// Files are named `<host>-<YYYYmmdd-HHMMSS>.running-config.txt`.
pub fn save_running_config(dir: &Path, host: &str, running: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(backup_file_name(host, &Local::now().format("%Y%m%d-%H%M%S").to_string()));
    fs::write(&path, running)?;

    tracing::info!(path = %path.display(), bytes = running.len(), "saved running-config backup");
    Ok(path)
}

fn backup_file_name(host: &str, timestamp: &str) -> String {
    // hosts may be given as IPv6 literals; keep the name filesystem-safe
    let host: String = host
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}-{}.running-config.txt", host, timestamp)
}
