//! Reusable formatting helpers for timestamps, ages, sizes and rates

use chrono::{DateTime, Local, Utc};
use std::time::Duration;

/// Format a UTC timestamp in local time, e.g. `2025-01-15 14:30 EST`
pub fn format_local(dt: DateTime<Utc>) -> String {
    let local = dt.with_timezone(&Local);
    format!(
        "{} {}",
        local.format("%Y-%m-%d %H:%M"),
        offset_to_tz_abbrev(local.offset().local_minus_utc())
    )
}

/// Map a UTC offset in seconds to a timezone abbreviation.
///
/// Uncommon offsets fall back to `UTC+N`.
pub fn offset_to_tz_abbrev(offset_secs: i32) -> String {
    let abbrev = match offset_secs / 3600 {
        -10 => "HST",
        -9 => "AKST",
        -8 => "PST",
        -7 => "MST",
        -6 => "CST",
        -5 => "EST",
        -4 => "AST",
        0 => "UTC",
        1 => "CET",
        2 => "EET",
        9 => "JST",
        10 => "AEST",
        12 => "NZST",
        hours => return format!("UTC{:+}", hours),
    };
    abbrev.to_string()
}

/// Coarse age, e.g. `3d 4h`, `2h 15m`, `40s`
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Per-year rate with two decimals
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}", rate)
}
