//! `top` command

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, TopArgs};
use crate::config::Overrides;
use crate::error::Result;
use crate::models::RankingDisplay;
use crate::output::Formattable;
use crate::output::formatters::format_local;
use crate::report::AwardsReport;

/// Print the ranking from the results file
pub fn run(opts: &GlobalOptions, args: TopArgs) -> Result<()> {
    let ctx = CommandContext::new(
        opts,
        Overrides {
            output: args.input,
            ..Default::default()
        },
    )?;
    let report = AwardsReport::load(&ctx.config.output())?;

    let teams = if args.all {
        &report.summaries.all_by_completions
    } else {
        &report.summaries.top_n
    };
    let rows = RankingDisplay::rows(teams);

    if ctx.format == OutputFormat::Pretty {
        let title = if args.all {
            "All teams with a hexfecta".to_string()
        } else {
            format!(
                "Hexfecta ranking down to team {}",
                ctx.config.preferences.sentinel_team
            )
        };
        println!("{}", title.bold());
        if let Some(updated) = report.last_updated {
            println!("{}", format!("Data as of {}", format_local(updated)).dimmed());
        }
        println!();
    }

    rows.print(ctx.format, report.last_updated)
}
