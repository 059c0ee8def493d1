//! Filesystem helpers

use std::path::Path;
use std::time::SystemTime;

/// Read the current modification time of `path` in whole seconds since the
/// unix epoch.
///
/// Returns `None` when the file is missing or unreadable, and also when the
/// filesystem reports a non-positive timestamp. `None` must never compare as
/// newer than a recorded value.
pub fn current_mtime(path: &Path) -> Option<i64> {
    let metadata = std::fs::metadata(path).ok()?;
    let modified = metadata.modified().ok()?;
    let secs = modified
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()?
        .as_secs() as i64;
    if secs > 0 {
        Some(secs)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_current_mtime_existing_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("a.txt");
        std::fs::write(&file, "a").unwrap();

        let mtime = current_mtime(&file);
        assert!(mtime.is_some());
        assert!(mtime.unwrap() > 0);
    }

    #[test]
    fn test_current_mtime_missing_file() {
        let temp = tempdir().unwrap();
        assert_eq!(current_mtime(&temp.path().join("missing.txt")), None);
    }

    #[test]
    fn test_current_mtime_directory() {
        // Directories stat fine; the tracker treats them like any other path.
        let temp = tempdir().unwrap();
        assert!(current_mtime(temp.path()).is_some());
    }
}
