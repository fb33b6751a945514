//! `scrape` command

use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, ScrapeArgs};
use crate::client::TbaClient;
use crate::config::Overrides;
use crate::error::Result;
use crate::output::json;
use crate::pipeline::{self, ScrapeSettings};
use crate::report::AwardsReport;

/// What a scrape produced
#[derive(Debug, Serialize)]
struct ScrapeSummary {
    teams: usize,
    teams_with_hexfecta: usize,
    top_n: usize,
    sentinel_team: u32,
    output: PathBuf,
}

impl ScrapeSummary {
    fn new(report: &AwardsReport, sentinel_team: u32, output: PathBuf) -> Self {
        Self {
            teams: report.teams.len(),
            teams_with_hexfecta: report.summaries.all_by_completions.len(),
            top_n: report.summaries.top_n.len(),
            sentinel_team,
            output,
        }
    }
}

/// Run the scrape pipeline and report where the results went
pub async fn run(opts: &GlobalOptions, args: ScrapeArgs) -> Result<()> {
    let ctx = CommandContext::new(
        opts,
        Overrides {
            api_key: args.api_key,
            api_host: args.api_host,
            cache_file: args.cache_file,
            output: args.output,
        },
    )?;

    // fail before any network activity
    let api_key = ctx.config.require_api_key()?.to_string();
    let client = TbaClient::new(api_key, Some(ctx.config.api_host()))?;
    log::info!("Scraping {}", client.base_url());

    let sentinel_team = ctx.config.preferences.sentinel_team;
    let settings = ScrapeSettings {
        cache_file: ctx.config.cache_file(),
        output: ctx.config.output(),
        sentinel_team,
        request_delay: ctx.config.request_delay(),
        show_progress: !args.no_progress && ctx.format != OutputFormat::Json,
    };

    let report = pipeline::run(client, &settings).await?;
    let summary = ScrapeSummary::new(&report, sentinel_team, settings.output);

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", json::format_json(&summary, report.last_updated)?);
        }
        OutputFormat::Pretty => {
            println!(
                "{} Collected awards for {} teams",
                "✓".green(),
                summary.teams.to_string().bold()
            );
            println!(
                "  {} teams have at least one hexfecta, {} down to team {}",
                summary.teams_with_hexfecta, summary.top_n, summary.sentinel_team
            );
            println!("  Results written to {}", summary.output.display());
        }
        OutputFormat::Table => {
            println!(
                "{} teams, {} with a hexfecta, results in {}",
                summary.teams,
                summary.teams_with_hexfecta,
                summary.output.display()
            );
        }
    }

    Ok(())
}
