//! Local cache for API responses
//!
//! Responses live in a single JSON snapshot between runs. Entries younger
//! than the freshness window are served directly; older ones are revalidated
//! with the stored ETag.

pub mod client;
pub mod storage;

use std::fmt;
use std::time::Duration;

/// Cache timing configuration
pub struct CacheTtl;

impl CacheTtl {
    /// Entries younger than this are served without a request
    pub const FRESHNESS: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr

    /// Pause after every request that stored or refreshed an entry
    pub const REQUEST_DELAY: Duration = Duration::from_millis(100);
}

/// Independent key spaces of the cache, one per request type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// `/teams/{page}`, keyed by page index
    TeamPages,
    /// `/team/{key}/awards`, keyed by team key
    TeamAwards,
}

impl Partition {
    pub const ALL: [Partition; 2] = [Partition::TeamPages, Partition::TeamAwards];
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::TeamPages => write!(f, "team pages"),
            Partition::TeamAwards => write!(f, "team awards"),
        }
    }
}

// Re-export main types
pub use client::FetchCoordinator;
pub use storage::{CacheEntry, CacheStore};
