//! Planner client error types

use std::time::Duration;
use thiserror::Error;

/// The only message users see when a submission fails
pub const CONNECTIVITY_MESSAGE: &str = "Error connecting to server. Check if backend is running.";

/// Errors that can occur while talking to the planner backend
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    /// HTTP status reported by the backend, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            PlannerError::ApiError { status, .. } => Some(*status),
            PlannerError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the backend was never reached
    pub fn is_connectivity(&self) -> bool {
        match self {
            PlannerError::Network(e) => e.is_connect() || e.is_request(),
            PlannerError::Timeout(_) => true,
            _ => false,
        }
    }

    /// Message for the user-facing alert
    ///
    /// Every failure kind maps to the same generic text; the detail goes to the log.
    pub fn user_message(&self) -> &'static str {
        CONNECTIVITY_MESSAGE
    }
}
