//! Award aggregation
//!
//! Pure functions turning award lists into per-team summaries and a global
//! hexfecta ranking. No I/O.

pub mod award_type;
pub mod ranking;
pub mod summary;

pub use award_type::{AwardType, TRACKED_CATEGORIES};
pub use ranking::{GlobalRanking, RankedTeam, rank};
pub use summary::{EntitySummary, default_rookie_year, summarize};
