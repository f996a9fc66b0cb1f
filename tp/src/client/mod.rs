//! Planner backend client
//!
//! The backend does all the planning work; this module only sends a
//! [`TripRequest`] and hands back the decoded [`PlanResponse`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

mod error;
mod http;

pub use error::{CONNECTIVITY_MESSAGE, PlannerError};
pub use http::HttpPlannerClient;

use crate::config::BackendConfig;
use crate::domain::{PlanResponse, TripRequest};

/// Stateless planner client - one request per submission
#[async_trait]
pub trait PlannerClient: Send + Sync {
    /// Submit trip parameters and wait for the generated plan
    async fn plan_trip(&self, request: &TripRequest) -> Result<PlanResponse, PlannerError>;
}

/// Create the HTTP planner client from configuration
pub fn create_client(config: &BackendConfig) -> Result<Arc<dyn PlannerClient>, PlannerError> {
    debug!(url = %config.plan_url(), "create_client: called");
    Ok(Arc::new(HttpPlannerClient::from_config(config)?))
}
