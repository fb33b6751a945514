//! Display models for CLI output
//!
//! Rows shaped for tables and JSON, built from the results artifact.

pub mod display;

pub use display::{AwardDisplay, CategoryDisplay, RankingDisplay};
