//! freshtrack - mtime-based file freshness tracking
//!
//! freshtrack answers "did any of these files, or their declared related
//! files, change since the last check?" by comparing current filesystem
//! modification times against values recorded in a small on-disk metadata
//! cache. Build and asset pipelines use it to skip recomputation when inputs
//! are unchanged.
//!
//! No content hashing, no filesystem watching, no dependency-graph
//! resolution: related files are expanded exactly one level deep, and
//! comparisons are best-effort timestamp checks within a single process.
//!
//! ```no_run
//! use freshtrack::FreshnessTracker;
//!
//! # fn main() -> freshtrack::Result<()> {
//! let mut tracker = FreshnessTracker::new("/var/cache/assets/.fresh-file")?;
//! tracker.set_related_files("site.css", ["reset.css", "grid.css"]);
//!
//! if tracker.is_fresh(["site.css"], false) {
//!     // site.css or one of its related files changed: rebuild.
//! }
//!
//! tracker.close()?;
//! # Ok(())
//! # }
//! ```

mod error;
mod global;
mod store;
mod tracker;
mod util;

pub use error::{Error, Result};
pub use global::{default_tracker, designate_default, SharedTracker, DEFAULT_CACHE_FILE};
pub use store::{FileMetadata, MetadataStore};
pub use tracker::FreshnessTracker;
pub use util::current_mtime;
