//! Command-line arguments.

use std::path::PathBuf;

use cactus_domain::scale::TimeScale;
use clap::{Parser, Subcommand};

use crate::config::DEFAULT_PATH;

#[derive(Debug, Parser)]
#[command(name = "cactusctl")]
#[command(about = "Fetch light and soil-moisture readings from a cactus-of-things backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = DEFAULT_PATH)]
    pub config: PathBuf,

    /// Override the per-request timeout, in milliseconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the readings of a time scale ending now
    Range {
        /// Time scale (1-hour, 5-hour, 12-hour, day, week, 2-week, month)
        #[arg(long)]
        scale: Option<TimeScale>,

        /// Maximum number of points (0 = no limit)
        #[arg(long)]
        resolution: Option<u32>,
    },

    /// Fetch the latest reading
    Current,

    /// List the available time scales
    Scales,

    /// Re-fetch a time scale periodically until interrupted
    Watch {
        /// Time scale (1-hour, 5-hour, 12-hour, day, week, 2-week, month)
        #[arg(long)]
        scale: Option<TimeScale>,

        /// Seconds between refreshes
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
        every: u64,
    },
}
