// LogManager Service
// Log retention cleanup and tail reading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Delete `.log` files older than the retention window; 0 keeps everything
pub fn prune_logs(log_dir: &Path, retention_days: u32) -> Result<usize, String> {
    if retention_days == 0 || !log_dir.exists() {
        return Ok(0);
    }

    let cutoff = SystemTime::now()
        .checked_sub(Duration::from_secs(retention_days as u64 * 24 * 60 * 60))
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let entries = fs::read_dir(log_dir).map_err(|e| format!("Failed to read log dir: {e}"))?;
    let mut removed = 0;

    for (path, modified) in log_files(entries) {
        if modified < cutoff && fs::remove_file(&path).is_ok() {
            removed += 1;
        }
    }

    Ok(removed)
}

/// Last `max_lines` non-empty lines of the newest log file
pub fn read_recent_logs(log_dir: &Path, max_lines: usize) -> Result<Vec<String>, String> {
    let latest = match fs::read_dir(log_dir) {
        Ok(entries) => log_files(entries).max_by_key(|(_, modified)| *modified),
        Err(_) => None,
    };

    match latest {
        Some((path, _)) => read_log_lines(&path, max_lines),
        None => Ok(Vec::new()),
    }
}

fn log_files(entries: fs::ReadDir) -> impl Iterator<Item = (PathBuf, SystemTime)> {
    entries.flatten().filter_map(|entry| {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("log") {
            return None;
        }
        let modified = entry
            .metadata()
            .and_then(|metadata| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        Some((path, modified))
    })
}

fn read_log_lines(path: &Path, max_lines: usize) -> Result<Vec<String>, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read log file: {e}"))?;
    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect();

    let start = lines.len().saturating_sub(max_lines);
    Ok(lines[start..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_recent_logs_tail() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("shieldy-server.log"), "one\n\ntwo\nthree\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored\n").unwrap();

        let lines = read_recent_logs(dir.path(), 2).unwrap();
        assert_eq!(lines, vec!["two".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(read_recent_logs(&missing, 10).unwrap().is_empty());
        assert_eq!(prune_logs(&missing, 7).unwrap(), 0);
    }

    #[test]
    fn test_prune_keeps_fresh_logs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fresh.log"), "x\n").unwrap();
        assert_eq!(prune_logs(dir.path(), 1).unwrap(), 0);
        assert!(dir.path().join("fresh.log").exists());
    }
}
