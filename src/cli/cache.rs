//! Cache management commands

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use crate::cache::storage::PartitionStats;
use crate::cache::{CacheStore, CacheTtl};
use crate::cli::{CacheArgs, CacheCommands, CommandContext, GlobalOptions, OutputFormat};
use crate::config::Overrides;
use crate::error::Result;
use crate::output::{DisplayRow, Formattable};
use crate::output::formatters::{format_age, format_local, format_size};

/// Cache partition for table display
#[derive(Tabled, Serialize)]
struct PartitionDisplay {
    #[tabled(rename = "PARTITION")]
    partition: String,
    #[tabled(rename = "ENTRIES")]
    entries: usize,
    #[tabled(rename = "FRESH")]
    fresh: usize,
    #[tabled(rename = "STALE")]
    stale: usize,
    #[tabled(rename = "WITH ETAG")]
    with_validator: usize,
    #[tabled(rename = "OLDEST")]
    oldest: String,
}

impl From<&PartitionStats> for PartitionDisplay {
    fn from(stats: &PartitionStats) -> Self {
        let now = Utc::now();
        Self {
            partition: stats.partition.to_string(),
            entries: stats.total_entries,
            fresh: stats.fresh_entries,
            stale: stats.stale_entries,
            with_validator: stats.with_validator,
            oldest: stats.oldest_entry.map_or_else(
                || "-".to_string(),
                |t| format!("{} ago", format_age((now - t).to_std().unwrap_or_default())),
            ),
        }
    }
}

impl DisplayRow for PartitionDisplay {
    const NUMERIC_COLUMNS: &'static [usize] = &[1, 2, 3, 4];
}

/// Dispatch a `cache` subcommand
pub fn run(opts: &GlobalOptions, args: CacheArgs) -> Result<()> {
    let ctx = CommandContext::new(
        opts,
        Overrides {
            cache_file: args.cache_file,
            ..Default::default()
        },
    )?;
    let path = ctx.config.cache_file();

    match args.command {
        CacheCommands::Status => status(&path, ctx.format),
        CacheCommands::Clear => clear(&path, ctx.format),
        CacheCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Show snapshot statistics
fn status(path: &Path, format: OutputFormat) -> Result<()> {
    let store = CacheStore::open(path);
    let size = std::fs::metadata(path).map(|m| m.len()).ok();
    let stats = store.stats(Utc::now(), CacheTtl::FRESHNESS);
    let rows: Vec<PartitionDisplay> = stats.iter().map(PartitionDisplay::from).collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "path": path.display().to_string(),
                "size_bytes": size,
                "total_entries": store.len(),
                "freshness_hours": CacheTtl::FRESHNESS.as_secs() / 3600,
                "partitions": rows,
                "newest_entry": stats.iter().filter_map(|s| s.newest_entry).max(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("{}", "Cache Status".bold());
            println!("────────────────────────────────────────");
            println!("Location:       {}", path.display());
            match size {
                Some(size) => println!("Size:           {}", format_size(size)),
                None => println!("Size:           (no snapshot yet)"),
            }
            println!("Entries:        {}", store.len());
            if let Some(newest) = stats.iter().filter_map(|s| s.newest_entry).max() {
                println!("Newest entry:   {}", format_local(newest));
            }
            if !store.is_empty() {
                println!();
                rows.print(format, None)?;
            }
        }
    }

    Ok(())
}

/// Remove every entry and rewrite the snapshot
fn clear(path: &Path, format: OutputFormat) -> Result<()> {
    let mut store = CacheStore::open(path);
    let stats = store.clear_all();
    if path.exists() {
        store.save(path)?;
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if stats.entries_removed > 0 {
                println!(
                    "{} Cleared {} cache entries",
                    "✓".green(),
                    stats.entries_removed
                );
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}
