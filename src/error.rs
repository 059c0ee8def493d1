//! Error types for cache construction and persistence
//!
//! Per-file stat failures during freshness checks are never errors (they map
//! to the "unknown mtime" sentinel); only setting up the cache directory and
//! persisting the store can fail.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The directory that should hold the cache file could not be created.
    #[error("failed to create cache directory {path:?}: {source}")]
    CacheDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache file could not be written at persist time.
    #[error("failed to write cache file {path:?}: {source}")]
    WriteCache {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The in-memory store could not be serialized.
    #[error("failed to serialize metadata store: {0}")]
    Serialize(#[from] serde_json::Error),
}
