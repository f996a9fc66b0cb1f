//! Travemle - trip planner client
//!
//! CLI entry point: the interactive planner by default, or one-shot commands.

use std::fs;

use chrono::Duration;
use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use travemle::cli::{Cli, Command, OutputFormat, get_log_path};
use travemle::client::create_client;
use travemle::config::Config;
use travemle::domain::{Handoff, TravelMode};
use travemle::form::{self, PlanningForm, SubmitOutcome, parse_date};
use travemle::present::{ResultSummary, activity_label};
use travemle::tui;

/// Map a level name to a tracing level
fn parse_level(name: &str) -> Option<tracing::Level> {
    match name.to_uppercase().as_str() {
        "TRACE" => Some(tracing::Level::TRACE),
        "DEBUG" => Some(tracing::Level::DEBUG),
        "INFO" => Some(tracing::Level::INFO),
        "WARN" | "WARNING" => Some(tracing::Level::WARN),
        "ERROR" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(name) => parse_level(name).unwrap_or_else(|| {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", name);
            tracing::Level::INFO
        }),
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(backend = %config.backend.plan_url(), "Travemle loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan {
            city,
            start,
            end,
            budget,
            interests,
            mode,
            format,
        }) => {
            debug!(?city, ?start, ?end, ?budget, ?interests, ?mode, %format, "main: matched Plan command");
            let overrides = PlanOverrides {
                city,
                start,
                end,
                budget,
                interests,
                mode,
            };
            cmd_plan(&config, overrides, format).await
        }
        Some(Command::Config) => {
            debug!("main: matched Config command");
            cmd_config(&config)
        }
        None => {
            debug!("main: no command specified, launching TUI");
            cmd_tui(&config).await
        }
    }
}

/// Launch the interactive planner
async fn cmd_tui(config: &Config) -> Result<()> {
    debug!("cmd_tui: called");
    let client = create_client(&config.backend).context("Failed to create planner client")?;
    tui::run(&config.trip, client).await
}

/// Form fields given on the command line
struct PlanOverrides {
    city: Option<String>,
    start: Option<String>,
    end: Option<String>,
    budget: Option<String>,
    interests: Vec<String>,
    mode: Option<TravelMode>,
}

impl PlanOverrides {
    /// Apply to a form seeded from config defaults
    ///
    /// A start date without an end date keeps the configured trip length.
    fn apply(self, form: &mut PlanningForm, duration_days: u32) -> Result<()> {
        if let Some(city) = self.city {
            form.city = city;
        }
        if let Some(start) = self.start {
            let date = parse_date(&start).ok_or_else(|| eyre::eyre!("Invalid --start date '{}'", start))?;
            form.confirm_start(date);
            form.confirm_end(date + Duration::days(i64::from(duration_days)));
        }
        if let Some(end) = self.end {
            let date = parse_date(&end).ok_or_else(|| eyre::eyre!("Invalid --end date '{}'", end))?;
            form.confirm_end(date);
        }
        if let Some(budget) = self.budget {
            form.budget = budget;
        }
        if !self.interests.is_empty() {
            form.set_interests(self.interests);
        }
        if let Some(mode) = self.mode {
            form.travel_mode = mode;
        }
        Ok(())
    }
}

/// Submit one trip request and print the result
async fn cmd_plan(config: &Config, overrides: PlanOverrides, format: OutputFormat) -> Result<()> {
    debug!(%format, "cmd_plan: called");
    let mut form = PlanningForm::new(&config.trip);
    overrides.apply(&mut form, config.trip.duration_days)?;

    let client = create_client(&config.backend).context("Failed to create planner client")?;

    match form::submit(&mut form, client.as_ref()).await {
        SubmitOutcome::Navigate(handoff) => {
            debug!("cmd_plan: submission succeeded");
            match format {
                OutputFormat::Json => print_json(&handoff),
                OutputFormat::Text => {
                    let result = handoff.decode().context("Trip plan could not be read")?;
                    print_summary(&ResultSummary::from_result(&result, &config.trip.currency));
                    Ok(())
                }
            }
        }
        SubmitOutcome::Alert(message) => {
            debug!(%message, "cmd_plan: submission failed");
            Err(eyre::eyre!(message))
        }
    }
}

/// Print the server response as pretty JSON
fn print_json(handoff: &Handoff) -> Result<()> {
    let plan: serde_json::Value = match handoff.data.as_deref() {
        Some(data) => serde_json::from_str(data).context("Trip plan is not valid JSON")?,
        None => serde_json::Value::Null,
    };
    let json = serde_json::json!({
        "plan": plan,
        "weather": handoff.weather,
        "map_url": handoff.map_url,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Print a result summary for the terminal
fn print_summary(summary: &ResultSummary) {
    println!("{} {}", summary.title.bold().cyan(), format!("({})", summary.duration).dimmed());
    println!("Weather: {}", summary.weather.blue());
    match &summary.map_url {
        Some(url) => println!("Map: {}", url.underline()),
        None => println!("{}", "No map link available".dimmed()),
    }

    println!();
    println!("{}", "Itinerary".bold().underline());
    if summary.activities.is_empty() {
        println!("  {}", "No activities".dimmed());
    }
    for activity in &summary.activities {
        let label = activity_label(activity);
        if label.is_empty() {
            println!("  {}", activity.location_name.bold());
        } else {
            println!("  {}  {}", label.yellow(), activity.location_name.bold());
        }
        if !activity.description.is_empty() {
            println!("      {}", activity.description);
        }
    }

    println!();
    println!("{}", "Budget".bold().underline());
    for row in &summary.budget_rows {
        println!("  {}", row);
    }
    println!("  {} {}", "Total:".bold(), summary.total.green().bold());
}

/// Print the effective configuration as YAML
fn cmd_config(config: &Config) -> Result<()> {
    debug!("cmd_config: called");
    print!("{}", serde_yaml::to_string(config).context("Failed to serialize configuration")?);
    Ok(())
}
