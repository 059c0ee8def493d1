//! Freshness tracker - compares current file mtimes against recorded ones
//!
//! The tracker owns an in-memory [`MetadataStore`] that is lazily loaded from
//! the cache file on first metadata access and written back on [`close`] or,
//! when enabled, on drop. Once loaded, the in-memory store is the single
//! source of truth for the rest of the tracker's lifetime, even if the
//! backing file changes externally.
//!
//! [`close`]: FreshnessTracker::close

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Error, Result};
use crate::store::MetadataStore;
use crate::util;

/// Tracks file modification times across process runs.
#[derive(Debug)]
pub struct FreshnessTracker {
    cache_path: PathBuf,
    persist_on_teardown: bool,
    /// `None` until the first metadata access; loaded at most once.
    store: Option<MetadataStore>,
}

impl FreshnessTracker {
    /// Create a tracker with persist-on-teardown enabled.
    pub fn new(cache_path: impl Into<PathBuf>) -> Result<Self> {
        Self::create(cache_path, true)
    }

    /// Create a tracker persisting to `cache_path`.
    ///
    /// The parent directory is created recursively if missing; the cache file
    /// itself is only read on first metadata access, so constructing a
    /// tracker never touches an existing cache.
    pub fn create(cache_path: impl Into<PathBuf>, persist_on_teardown: bool) -> Result<Self> {
        let cache_path = cache_path.into();

        if let Some(dir) = cache_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                fs::create_dir_all(dir).map_err(|source| Error::CacheDir {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        Ok(Self {
            cache_path,
            persist_on_teardown,
            store: None,
        })
    }

    /// Path of the on-disk cache file.
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Whether dropping this tracker writes the store back to disk.
    pub fn persist_on_teardown(&self) -> bool {
        self.persist_on_teardown
    }

    /// Check whether any of `paths`, or any of their declared related files,
    /// changed since the last check.
    ///
    /// Related files are pulled in one level deep only: relations declared on
    /// a related file are not expanded transitively. Every examined path's
    /// recorded mtime is updated to the current reading (unknown readings are
    /// recorded as zero), so two consecutive calls with no filesystem change
    /// in between return `true` then `false`.
    ///
    /// `clear_stat_cache` is accepted for callers that want to be explicit
    /// about defeating stat caching; `std::fs::metadata` stats the file on
    /// every call, so there is nothing to invalidate here.
    pub fn is_fresh<I, S>(&mut self, paths: I, clear_stat_cache: bool) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let _ = clear_stat_cache;

        // BTreeSet dedupes and fixes the iteration order within this call.
        let inputs: BTreeSet<String> = paths.into_iter().map(Into::into).collect();

        let mut files = inputs.clone();
        for file in &inputs {
            files.extend(self.related_files(file));
        }

        let mut any_fresh = false;

        for file in &files {
            let current = util::current_mtime(Path::new(file));
            let recorded = self.recorded_mtime(file, 0);

            if matches!(current, Some(ct) if ct > recorded) {
                // No short-circuit: every remaining path still gets
                // re-recorded below.
                any_fresh = true;
            }

            self.set_mtime(file, current.unwrap_or(0));
        }

        any_fresh
    }

    /// Single-path convenience wrapper around [`is_fresh`].
    ///
    /// [`is_fresh`]: FreshnessTracker::is_fresh
    pub fn is_fresh_path(&mut self, path: &str) -> bool {
        self.is_fresh([path], false)
    }

    /// Current filesystem mtime for `path`; `None` if unreadable.
    pub fn current_mtime(&self, path: &str) -> Option<i64> {
        util::current_mtime(Path::new(path))
    }

    /// Recorded mtime for `path`, or `default` if never recorded.
    pub fn recorded_mtime(&mut self, path: &str, default: i64) -> i64 {
        self.store_mut().get(path).map_or(default, |meta| meta.mtime)
    }

    /// Record `mtime` for `path`, overwriting any previous value.
    pub fn set_mtime(&mut self, path: &str, mtime: i64) -> &mut Self {
        self.store_mut().entry(path).mtime = mtime;
        self
    }

    /// Declare the full related-file list for `path`, replacing any previous
    /// list. The store is loaded first so a write-only tracker does not
    /// clobber an existing cache file at persist time.
    pub fn set_related_files<I, S>(&mut self, path: &str, related: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.store_mut().entry(path).related = related.into_iter().map(Into::into).collect();
        self
    }

    /// Related files declared for `path`; empty if none.
    pub fn related_files(&mut self, path: &str) -> Vec<String> {
        self.store_mut()
            .get(path)
            .map(|meta| meta.related.clone())
            .unwrap_or_default()
    }

    /// Persist the in-memory store immediately, regardless of the teardown
    /// setting. A tracker that never loaded its store writes nothing.
    pub fn close(&mut self) -> Result<()> {
        self.write_store()
    }

    fn store_mut(&mut self) -> &mut MetadataStore {
        let cache_path = &self.cache_path;
        self.store
            .get_or_insert_with(|| MetadataStore::load(cache_path))
    }

    fn write_store(&self) -> Result<()> {
        match &self.store {
            Some(store) => store.save(&self.cache_path),
            // Never loaded: nothing was observed, keep any existing file
            // byte-identical.
            None => Ok(()),
        }
    }
}

impl Drop for FreshnessTracker {
    fn drop(&mut self) {
        if !self.persist_on_teardown {
            return;
        }
        if let Err(err) = self.write_store() {
            warn!(path = ?self.cache_path, error = %err, "failed to persist metadata cache on teardown");
        }
    }
}
