//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::domain::TravelMode;

/// Travemle - trip planner client
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan a trip: pick a destination, dates, budget and interests; get an itinerary",
    version = env!("GIT_DESCRIBE"),
    after_help = after_help(),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute; none launches the interactive planner
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit one trip request and print the plan
    Plan {
        /// Destination city (defaults to the configured city)
        #[arg(long)]
        city: Option<String>,

        /// Start date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_name = "DATE")]
        start: Option<String>,

        /// End date, YYYY-MM-DD (defaults to start + configured duration)
        #[arg(long, value_name = "DATE")]
        end: Option<String>,

        /// Budget in the configured currency
        #[arg(short, long)]
        budget: Option<String>,

        /// Interest tag; repeat to select several (replaces the configured set)
        #[arg(short, long = "interest", value_name = "TAG")]
        interests: Vec<String>,

        /// Travel mode (Car, Bus, Train)
        #[arg(short, long)]
        mode: Option<TravelMode>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration as YAML
    Config,
}

/// Path of the log file
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("travemle")
        .join("logs")
        .join("travemle.log")
}

fn after_help() -> String {
    format!("Logs are written to: {}", get_log_path().display())
}

/// Output format for `plan`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
