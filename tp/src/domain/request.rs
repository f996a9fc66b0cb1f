//! TripRequest domain type
//!
//! The outbound payload describing one trip submission.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// How the traveller intends to get around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TravelMode {
    Car,
    #[default]
    Bus,
    Train,
}

impl TravelMode {
    /// All modes in display order
    pub const ALL: [TravelMode; 3] = [TravelMode::Car, TravelMode::Bus, TravelMode::Train];

    /// Next mode in display order (wraps)
    pub fn next(self) -> Self {
        match self {
            Self::Car => Self::Bus,
            Self::Bus => Self::Train,
            Self::Train => Self::Car,
        }
    }

    /// Previous mode in display order (wraps)
    pub fn prev(self) -> Self {
        match self {
            Self::Car => Self::Train,
            Self::Bus => Self::Car,
            Self::Train => Self::Bus,
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Car => write!(f, "Car"),
            Self::Bus => write!(f, "Bus"),
            Self::Train => write!(f, "Train"),
        }
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "TravelMode::from_str: called");
        match s.trim().to_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "bus" => Ok(Self::Bus),
            "train" => Ok(Self::Train),
            other => Err(format!("Unknown travel mode '{}'. Expected Car, Bus or Train", other)),
        }
    }
}

/// Trip parameters submitted to the planner backend
///
/// Built fresh for every submission and never persisted. The destination
/// travels under the `city` key, which is what the backend reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Where the trip starts
    pub origin: String,
    /// Destination city
    #[serde(rename = "city")]
    pub destination_city: String,
    /// Destination country
    pub country: String,
    /// First day, YYYY-MM-DD
    pub start_date: String,
    /// Last day, YYYY-MM-DD (not checked against start_date)
    pub end_date: String,
    /// Selected interest tags joined with ", "
    pub interests: String,
    /// Budget in the configured currency; null when the input was not a number
    pub budget: Option<i64>,
    /// Preferred travel mode
    pub travel_mode: TravelMode,
}

/// Parse budget text the way a lenient integer parser does
///
/// Leading whitespace and an optional sign are accepted, then the longest run
/// of ASCII digits is taken and anything after it ignored. Returns `None`
/// when no digits are found or the value overflows.
pub fn parse_budget(text: &str) -> Option<i64> {
    debug!(%text, "parse_budget: called");
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.chars().next() {
        Some('-') => (true, &trimmed[1..]),
        Some('+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        debug!("parse_budget: no leading digits");
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Join interest tags the way the backend expects them
pub fn join_interests<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter().map(|t| t.as_ref()).collect::<Vec<_>>().join(", ")
}
