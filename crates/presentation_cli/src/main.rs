//! flight-agent CLI
//!
//! Free-text flight search and date phrase normalization from the terminal.

#![allow(clippy::print_stdout)]

mod wiring;

use std::path::PathBuf;

use application::{InferencePort, SearchOutcome, normalize_date};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, OpenAiInferenceAdapter, init_logging};
use tracing::info;

/// flight-agent CLI
#[derive(Parser)]
#[command(name = "flight-agent")]
#[command(author, version, about = "Chatbot-style flight search", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search flights for a free-text travel request
    ///
    /// Example: flight-agent search "2 adults London to Delhi on 5th May, direct"
    Search {
        /// The travel request in plain language
        request: String,

        /// Reference date for relative phrases (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Convert a date phrase to YYYY-MM-DD
    ///
    /// Example: flight-agent date "next Friday" --today 2025-03-10
    Date {
        /// Phrase such as "tomorrow", "in 5 days", "5th May"
        phrase: String,

        /// Reference date for relative phrases (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Print the effective configuration as TOML (secrets omitted)
    Config,

    /// Check that the language model endpoint is reachable
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))?;
    config.validate().map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Search { request, today } => {
            let service = wiring::build_search_service(&config)?;
            let outcome = service.search(&request, today_or_local(today)).await?;

            if let SearchOutcome::Results { table, .. } = &outcome {
                info!(offers = table.len(), "Showing results");
            }
            println!("{}", outcome.message());
        },

        Commands::Date { phrase, today } => {
            match normalize_date(Some(&phrase), today_or_local(today)) {
                Some(date) => println!("{date}"),
                None => {
                    println!("Unparseable");
                    std::process::exit(1);
                },
            }
        },

        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        },

        Commands::Health => {
            let inference = OpenAiInferenceAdapter::new(config.inference.clone())?;
            if inference.is_healthy().await {
                println!("Healthy ({})", config.inference.base_url);
            } else {
                println!("Unhealthy: {} is not reachable", config.inference.base_url);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
