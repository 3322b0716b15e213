//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod cache;
pub mod config;
pub mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Query and filter RepeaterBook repeater listings
#[derive(Parser, Debug)]
#[command(name = "repeaterbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search repeaters
    Search(search::SearchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Inspect or clear cached API responses
    Cache(cache::CacheArgs),
}

/// Log to stderr so stdout carries only command output
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Cache(args) => cache::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["repeaterbook", "cache", "--clear"]).unwrap();
        assert!(matches!(cli.command, Commands::Cache(ref args) if args.clear));

        let cli = Cli::try_parse_from(["repeaterbook", "config", "defaults.unit", "mi"]).unwrap();
        match cli.command {
            Commands::Config(args) => {
                assert_eq!(args.key.as_deref(), Some("defaults.unit"));
                assert_eq!(args.value.as_deref(), Some("mi"));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["repeaterbook", "serve"]).is_err());
    }
}
