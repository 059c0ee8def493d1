//! Process-wide default tracker
//!
//! A replaceable ambient default for callers that do not want to thread a
//! tracker through their call chain. It is a convenience only: the core
//! [`FreshnessTracker`] type knows nothing about it, and passing instances
//! explicitly always works without touching this module.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::tracker::FreshnessTracker;

/// Shared handle to a tracker installed as the process default.
pub type SharedTracker = Arc<Mutex<FreshnessTracker>>;

/// Cache file name used when no tracker has been designated explicitly,
/// created under the system temp directory.
pub const DEFAULT_CACHE_FILE: &str = ".fresh-file";

static DEFAULT: Lazy<Mutex<Option<SharedTracker>>> = Lazy::new(|| Mutex::new(None));

/// Return the process-wide default tracker, creating one pointed at
/// `<temp dir>/.fresh-file` on first use.
///
/// Statics are never dropped, so the default tracker's implicit teardown
/// persist does not run at process exit; callers relying on the default must
/// [`close`](FreshnessTracker::close) it through the shared handle.
pub fn default_tracker() -> Result<SharedTracker> {
    let mut slot = DEFAULT.lock().expect("default tracker registry poisoned");

    if let Some(tracker) = slot.as_ref() {
        return Ok(Arc::clone(tracker));
    }

    let path = std::env::temp_dir().join(DEFAULT_CACHE_FILE);
    let tracker = Arc::new(Mutex::new(FreshnessTracker::new(path)?));
    *slot = Some(Arc::clone(&tracker));
    Ok(tracker)
}

/// Install `tracker` as the new process-wide default, replacing any previous
/// designation, and return the shared handle.
pub fn designate_default(tracker: FreshnessTracker) -> SharedTracker {
    let shared = Arc::new(Mutex::new(tracker));
    let mut slot = DEFAULT.lock().expect("default tracker registry poisoned");
    *slot = Some(Arc::clone(&shared));
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // Single test for the whole module: the registry is a process-wide
    // static, and separate tests would race under the parallel test runner.
    #[test]
    fn test_designation_replaces_default() {
        let temp = tempdir().unwrap();

        let first = FreshnessTracker::create(temp.path().join("first"), false).unwrap();
        let shared = designate_default(first);
        assert!(Arc::ptr_eq(&shared, &default_tracker().unwrap()));

        let second = FreshnessTracker::create(temp.path().join("second"), false).unwrap();
        let replaced = designate_default(second);

        let current = default_tracker().unwrap();
        assert!(Arc::ptr_eq(&replaced, &current));
        assert_eq!(
            current.lock().unwrap().cache_path(),
            temp.path().join("second")
        );
    }
}
