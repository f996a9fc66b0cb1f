//! Result presentation
//!
//! Turns a decoded [`TripResult`] into display-ready text. Both the TUI result
//! screen and `tp plan` print from a [`ResultSummary`], so they always agree.

use tracing::debug;

use crate::domain::{Activity, BudgetBreakdown, TripResult, display_weather};

/// Display-ready view of a trip result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    pub title: String,
    pub duration: String,
    /// Weather badge text
    pub weather: String,
    /// Map link, None when the server sent nothing usable
    pub map_url: Option<String>,
    /// Itinerary in received order
    pub activities: Vec<Activity>,
    /// Itemized budget rows, e.g. "Lodging: 10000 LKR"
    pub budget_rows: Vec<String>,
    /// Budget total, e.g. "LKR 15000"
    pub total: String,
}

impl ResultSummary {
    pub fn from_result(result: &TripResult, currency: &str) -> Self {
        debug!(%currency, "ResultSummary::from_result: called");
        let breakdown = result.plan.budget_breakdown.as_ref();
        Self {
            title: result.plan.title.clone(),
            duration: result.plan.duration.clone(),
            weather: display_weather(result.weather.as_deref()),
            map_url: result.map_url.clone().filter(|u| !u.trim().is_empty()),
            activities: result.plan.activities.clone(),
            budget_rows: budget_rows(breakdown, currency),
            total: total_line(breakdown, currency),
        }
    }
}

/// Uppercase only the first character, leave the rest untouched
pub fn capitalize_first(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Itemized budget rows in received order, excluding the total
pub fn budget_rows(breakdown: Option<&BudgetBreakdown>, currency: &str) -> Vec<String> {
    breakdown
        .map(|b| {
            b.items()
                .map(|(category, amount)| format!("{}: {} {}", capitalize_first(category), amount, currency))
                .collect()
        })
        .unwrap_or_default()
}

/// Total line; an absent total leaves the amount empty
pub fn total_line(breakdown: Option<&BudgetBreakdown>, currency: &str) -> String {
    let amount = breakdown
        .and_then(|b| b.total())
        .map(|a| a.to_string())
        .unwrap_or_default();
    format!("{} {}", currency, amount)
}

/// Short "Day · time" label for an itinerary entry
pub fn activity_label(activity: &Activity) -> String {
    match (activity.day.is_empty(), activity.time.is_empty()) {
        (false, false) => format!("{} · {}", activity.day, activity.time),
        (false, true) => activity.day.clone(),
        (true, false) => activity.time.clone(),
        (true, true) => String::new(),
    }
}
