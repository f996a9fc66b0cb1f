//! Backend response and the form → result handoff
//!
//! The backend answers with `{ plan, weather, map_url }`. The form hands the
//! plan to the result screen as JSON text plus two plain strings; the result
//! screen decodes that text back into a [`TripPlan`] and gets an explicit
//! error when it cannot.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::plan::TripPlan;

/// Response body of the plan-trip endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Itinerary payload, kept as raw JSON until the result screen decodes it
    #[serde(default)]
    pub plan: Value,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
}

impl PlanResponse {
    /// Turn the response into the parameters passed to the result screen
    pub fn into_handoff(self) -> Handoff {
        debug!("PlanResponse::into_handoff: called");
        let data = match self.plan {
            Value::Null => None,
            plan => Some(plan.to_string()),
        };
        Handoff {
            data,
            weather: self.weather,
            map_url: self.map_url,
        }
    }
}

/// Parameters carried from the form screen to the result screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Handoff {
    /// Plan serialized as JSON text
    pub data: Option<String>,
    pub weather: Option<String>,
    pub map_url: Option<String>,
}

/// A decoded, render-ready result
#[derive(Debug, Clone, PartialEq)]
pub struct TripResult {
    pub plan: TripPlan,
    pub weather: Option<String>,
    pub map_url: Option<String>,
}

/// Why the handoff could not be decoded
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("No plan data was provided")]
    MissingPlan,

    #[error("Plan data is not valid: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl Handoff {
    /// Decode the plan text into a typed result
    pub fn decode(&self) -> Result<TripResult, HandoffError> {
        debug!(has_data = self.data.is_some(), "Handoff::decode: called");
        let text = match self.data.as_deref().map(str::trim) {
            None | Some("") => return Err(HandoffError::MissingPlan),
            Some(text) => text,
        };

        let value: Value = serde_json::from_str(text)?;
        if value.is_null() {
            debug!("Handoff::decode: plan is null");
            return Err(HandoffError::MissingPlan);
        }

        let plan: TripPlan = serde_json::from_value(value)?;
        debug!(activity_count = plan.activities.len(), "Handoff::decode: decoded plan");
        Ok(TripResult {
            plan,
            weather: self.weather.clone(),
            map_url: self.map_url.clone(),
        })
    }
}
