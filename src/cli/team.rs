//! `team` command

use colored::Colorize;
use serde::Serialize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, TeamArgs};
use crate::config::Overrides;
use crate::error::Result;
use crate::models::{AwardDisplay, CategoryDisplay};
use crate::output::formatters::{format_local, format_rate};
use crate::output::{Formattable, json};
use crate::report::{AwardsReport, TeamAwards};

/// Rank of `team_number` in the ranking, from 1
fn rank_of(report: &AwardsReport, team_number: u32) -> Option<usize> {
    report
        .summaries
        .all_by_completions
        .iter()
        .position(|t| t.team_number == team_number)
        .map(|i| i + 1)
}

#[derive(Serialize)]
struct TeamOutput<'a> {
    rank: Option<usize>,
    #[serde(flatten)]
    team: &'a TeamAwards,
}

/// Print one team's summary and award list
pub fn run(opts: &GlobalOptions, args: TeamArgs) -> Result<()> {
    let ctx = CommandContext::new(
        opts,
        Overrides {
            output: args.input,
            ..Default::default()
        },
    )?;
    let report = AwardsReport::load(&ctx.config.output())?;
    let team = report.team(args.team_number)?;
    let rank = rank_of(&report, args.team_number);

    match ctx.format {
        OutputFormat::Json => {
            let output = TeamOutput { rank, team };
            println!("{}", json::format_json(&output, Some(team.last_updated))?);
        }
        OutputFormat::Pretty => {
            print_header(team, rank);
            println!();
            CategoryDisplay::rows(&team.summaries).print(ctx.format, None)?;
            println!();
            println!("{}", "Awards".bold());
            AwardDisplay::rows(&team.awards).print(ctx.format, None)?;
        }
        OutputFormat::Table => {
            CategoryDisplay::rows(&team.summaries).print(ctx.format, None)?;
            AwardDisplay::rows(&team.awards).print(ctx.format, None)?;
        }
    }

    Ok(())
}

fn print_header(team: &TeamAwards, rank: Option<usize>) {
    let name = team.team_name.as_deref().unwrap_or("(no name)");
    println!(
        "{} {}",
        format!("Team {}", team.team_number).bold(),
        name.cyan()
    );

    let s = &team.summaries;
    let rookie = team
        .rookie_year
        .map_or_else(|| "unknown".to_string(), |y| y.to_string());
    println!("Rookie year:      {} ({} seasons)", rookie, s.years_active);
    println!(
        "Awards:           {} ({} per year)",
        s.total_awards,
        format_rate(s.awards_per_year)
    );
    println!(
        "Hexfecta awards:  {} ({} per year)",
        s.tracked_category_count,
        format_rate(s.tracked_category_awards_per_year)
    );

    let completions = format!(
        "{} ({} per year)",
        s.tracked_set_completions,
        format_rate(s.tracked_set_completions_per_year)
    );
    if s.tracked_set_completions > 0 {
        println!("Hexfectas:        {}", completions.green());
    } else {
        println!("Hexfectas:        {}", completions);
    }

    if let Some(rank) = rank {
        println!("Rank:             #{}", rank);
    }
    println!(
        "{}",
        format!("Data as of {}", format_local(team.last_updated)).dimmed()
    );
}
