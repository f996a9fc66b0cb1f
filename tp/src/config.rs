//! Travemle configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::TravelMode;

/// Project-local config file name
const LOCAL_CONFIG: &str = ".travemle.yml";

/// Main Travemle configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Planner backend connection
    pub backend: BackendConfig,

    /// Fixed trip fields and form defaults
    pub trip: TripDefaults,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        let base_url = self.backend.base_url.trim();
        if base_url.is_empty() {
            return Err(eyre::eyre!("backend.base-url is empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(eyre::eyre!(
                "backend.base-url must start with http:// or https:// (got '{}')",
                base_url
            ));
        }
        if self.backend.timeout_ms == Some(0) {
            return Err(eyre::eyre!("backend.timeout-ms must be greater than zero"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::default_locations() {
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialised
    ///
    /// Errors are swallowed; the full load reports them once logging is up.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::default_locations(),
        };

        candidates
            .into_iter()
            .filter(|p| p.exists())
            .find_map(|p| fs::read_to_string(p).ok())
            .and_then(|content| serde_yaml::from_str::<Config>(&content).ok())
            .and_then(|config| config.log_level)
    }

    /// Candidate config files, most specific first
    fn default_locations() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        // ~/.config/travemle/travemle.yml
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("travemle").join("travemle.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Planner backend connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Scheme, host and port of the planner service
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the plan-trip endpoint
    #[serde(rename = "plan-path")]
    pub plan_path: String,

    /// Request timeout in milliseconds; unset leaves the transport default
    #[serde(rename = "timeout-ms", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.52.16:8000".to_string(),
            plan_path: "/api/plan-trip/".to_string(),
            timeout_ms: None,
        }
    }
}

impl BackendConfig {
    /// Full URL of the plan-trip endpoint
    pub fn plan_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.plan_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Fixed trip fields and form defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TripDefaults {
    /// Where every trip starts
    pub origin: String,

    /// Destination country sent with every request
    pub country: String,

    /// Initial destination city
    pub city: String,

    /// Initial budget
    pub budget: i64,

    /// Initially selected interest tags
    pub interests: Vec<String>,

    /// Initial travel mode
    #[serde(rename = "travel-mode")]
    pub travel_mode: TravelMode,

    /// Days between the default start and end date
    #[serde(rename = "duration-days")]
    pub duration_days: u32,

    /// Currency label used when showing amounts
    pub currency: String,
}

impl Default for TripDefaults {
    fn default() -> Self {
        Self {
            origin: "Colombo".to_string(),
            country: "Sri Lanka".to_string(),
            city: "Kandy".to_string(),
            budget: 50_000,
            interests: vec!["Culture".to_string(), "Temple".to_string()],
            travel_mode: TravelMode::Bus,
            duration_days: 3,
            currency: "LKR".to_string(),
        }
    }
}
