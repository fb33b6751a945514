//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;
use std::path::PathBuf;

pub mod args;
pub mod cache;
pub mod context;
pub mod scrape;
pub mod team;
pub mod top;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// hexfecta - rank FIRST Robotics teams by complete sets of technical awards
#[derive(Parser, Debug)]
#[command(name = "hexfecta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "HEXFECTA_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "HEXFECTA_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "HEXFECTA_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every team's awards and write the ranked results
    Scrape(ScrapeArgs),

    /// Show the hexfecta ranking
    Top(TopArgs),

    /// Show one team's award summary
    Team(TeamArgs),

    /// Manage the local response cache
    Cache(CacheArgs),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   hexfecta completion bash > /etc/bash_completion.d/hexfecta
  zsh:    hexfecta completion zsh > \"${fpath[1]}/_hexfecta\"
  fish:   hexfecta completion fish > ~/.config/fish/completions/hexfecta.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options for `scrape`
#[derive(Debug, Clone, Args, Default)]
pub struct ScrapeArgs {
    /// The Blue Alliance read API key
    #[arg(long, env = "TBA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API host (for testing against a local server)
    #[arg(long, env = "HEXFECTA_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Cache snapshot path
    #[arg(long, env = "HEXFECTA_CACHE_FILE", hide_env = true)]
    pub cache_file: Option<PathBuf>,

    /// Results file to write
    #[arg(long, short, env = "HEXFECTA_OUTPUT", hide_env = true)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Options for `top`
#[derive(Debug, Clone, Args, Default)]
pub struct TopArgs {
    /// Show every team with a hexfecta, not just those down to the sentinel team
    #[arg(long)]
    pub all: bool,

    /// Results file to read
    #[arg(long, short, env = "HEXFECTA_OUTPUT", hide_env = true)]
    pub input: Option<PathBuf>,
}

/// Options for `team`
#[derive(Debug, Clone, Args)]
pub struct TeamArgs {
    /// Team number, e.g. 2200
    pub team_number: u32,

    /// Results file to read
    #[arg(long, short, env = "HEXFECTA_OUTPUT", hide_env = true)]
    pub input: Option<PathBuf>,
}

/// Options for `cache`
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,

    /// Cache snapshot path
    #[arg(long, global = true, env = "HEXFECTA_CACHE_FILE", hide_env = true)]
    pub cache_file: Option<PathBuf>,
}

/// Cache management subcommands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Remove every cached response
    Clear,
    /// Print the cache snapshot path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_team() {
        let cli = Cli::parse_from(["hexfecta", "team", "2200", "--input", "results.json"]);

        let Commands::Team(args) = cli.command else {
            panic!("expected team command");
        };
        assert_eq!(args.team_number, 2200);
        assert_eq!(args.input, Some(PathBuf::from("results.json")));
    }

    #[test]
    fn test_parse_cache_file_after_subcommand() {
        let cli = Cli::parse_from(["hexfecta", "cache", "status", "--cache-file", "c.json"]);

        let Commands::Cache(args) = cli.command else {
            panic!("expected cache command");
        };
        assert!(matches!(args.command, CacheCommands::Status));
        assert_eq!(args.cache_file, Some(PathBuf::from("c.json")));
    }

    #[test]
    fn test_team_number_must_be_numeric() {
        assert!(Cli::try_parse_from(["hexfecta", "team", "frc2200"]).is_err());
    }
}
