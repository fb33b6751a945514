//! hexfecta - rank FIRST Robotics teams by complete sets of technical awards

use clap::{CommandFactory, Parser};

mod aggregate;
mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod pipeline;
mod report;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // .env values must be visible to clap's env fallbacks
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.debug);
    if let Err(e) = dotenv {
        log::debug!("No .env file loaded: {}", e);
    }

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Scrape(args) => cli::scrape::run(&opts, args).await,
        Commands::Top(args) => cli::top::run(&opts, args),
        Commands::Team(args) => cli::team::run(&opts, args),
        Commands::Cache(args) => cli::cache::run(&opts, args),
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "hexfecta",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// `warn` by default, `debug` with `--debug`; `RUST_LOG` wins over both
fn init_logging(debug: bool) {
    let default = if debug { "warn,hexfecta=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
