//! Command line arguments for the `kdramahood` binary.

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

/// Show extracted when no subcommand is given
pub const DEFAULT_SERIES_URL: &str = "https://kdramahood.com/dh/itaewon";

/// Top-level CLI entry point.
#[derive(Debug, Parser)]
#[command(
    name = "kdramahood",
    version,
    about = "Extract KdramaHood series metadata and episode links as JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Request timeout in seconds.
    #[arg(global = true, long, default_value_t = 30, value_name = "SECS")]
    pub timeout: u64,
    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
    /// Disable logging entirely.
    #[arg(global = true, short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print series metadata.
    Series(UrlArgs),
    /// Print the streaming links of one episode.
    Episode(UrlArgs),
    /// Print the streaming links of a range of episodes.
    Episodes(RangeArgs),
}

#[derive(Debug, Args)]
pub struct UrlArgs {
    /// Page URL.
    pub url: String,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Series page URL.
    pub url: String,
    /// First episode to extract.
    #[arg(long, default_value_t = 1)]
    pub from: u32,
    /// Last episode to extract; 0 means the last uploaded one.
    #[arg(long, default_value_t = 0)]
    pub to: u32,
}

impl Cli {
    /// Log level selected by `-v`/`-q`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::OFF;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
