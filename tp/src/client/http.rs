//! HTTP planner client
//!
//! One POST per submission against the plan-trip endpoint. No retries: a
//! failed call is returned as-is and the user decides whether to resubmit.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::{PlannerClient, PlannerError};
use crate::config::BackendConfig;
use crate::domain::{PlanResponse, TripRequest};

/// reqwest-backed planner client
pub struct HttpPlannerClient {
    plan_url: String,
    http: Client,
    timeout: Option<Duration>,
}

impl HttpPlannerClient {
    /// Create a new client from backend configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, PlannerError> {
        debug!(?config, "from_config: called");
        let timeout = config.timeout();
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(PlannerError::Network)?;

        Ok(Self {
            plan_url: config.plan_url(),
            http,
            timeout,
        })
    }

    /// Endpoint this client posts to
    pub fn plan_url(&self) -> &str {
        &self.plan_url
    }

    /// Request timeout, None when left to the transport
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn transport_error(&self, e: reqwest::Error) -> PlannerError {
        match self.timeout {
            Some(timeout) if e.is_timeout() => {
                debug!("plan_trip: request timed out");
                PlannerError::Timeout(timeout)
            }
            _ => {
                debug!(error = %e, "plan_trip: network error");
                PlannerError::Network(e)
            }
        }
    }
}

#[async_trait]
impl PlannerClient for HttpPlannerClient {
    async fn plan_trip(&self, request: &TripRequest) -> Result<PlanResponse, PlannerError> {
        debug!(url = %self.plan_url, ?request, "plan_trip: called");

        let response = self
            .http
            .post(&self.plan_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            debug!(%status, "plan_trip: API error");
            return Err(PlannerError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        if body.trim().is_empty() {
            debug!("plan_trip: empty body");
            return Err(PlannerError::InvalidResponse("Empty response body".to_string()));
        }

        let plan_response: PlanResponse = serde_json::from_str(&body)?;
        info!(
            has_plan = !plan_response.plan.is_null(),
            weather = ?plan_response.weather,
            "plan_trip: received plan"
        );
        Ok(plan_response)
    }
}
