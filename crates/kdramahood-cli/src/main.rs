//! `kdramahood` command line frontend
//!
//! Prints extracted records as indented JSON on stdout. Failures are printed
//! as their message and make the process exit with status 1. Logs go to
//! stderr.

mod cli;
mod commands;

use std::process;

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt};

use cli::{Cli, Commands, DEFAULT_SERIES_URL};
use kdramahood_core::{ClientConfig, KdramaScraper};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let config = ClientConfig {
        timeout_secs: cli.timeout,
        ..ClientConfig::default()
    };
    let scraper = match KdramaScraper::with_config(config) {
        Ok(scraper) => scraper,
        Err(err) => {
            println!("{err}");
            process::exit(1);
        }
    };

    let outcome = match cli.command {
        Some(Commands::Series(args)) => commands::series(&scraper, &args.url).await,
        Some(Commands::Episode(args)) => commands::episode(&scraper, &args.url).await,
        Some(Commands::Episodes(args)) => {
            commands::episodes(&scraper, &args.url, args.from, args.to).await
        }
        None => {
            run_showcase(&scraper).await;
            return;
        }
    };

    match outcome {
        Ok(json) => println!("{json}"),
        Err(err) => {
            println!("{err}");
            process::exit(1);
        }
    }
}

/// Series info followed by every episode of the default show.
async fn run_showcase(scraper: &KdramaScraper) {
    match commands::series(scraper, DEFAULT_SERIES_URL).await {
        Ok(json) => {
            println!("Extracted Series Info:");
            println!("{json}");
        }
        Err(err) => println!("Failed to extract series info: {err}"),
    }

    match commands::episodes(scraper, DEFAULT_SERIES_URL, 1, 0).await {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Failed to extract ep info: {err}"),
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}
