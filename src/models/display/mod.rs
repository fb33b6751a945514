//! Display model implementations for table and JSON output

mod award;
mod common;
mod ranking;

pub use award::{AwardDisplay, CategoryDisplay};
pub use ranking::RankingDisplay;
