//! Travemle - trip planner client
//!
//! A terminal client for the Travemle planning backend. The user fills in a
//! planning form (destination, dates, budget, interests, travel mode), the
//! backend generates an itinerary, and the result screen shows it with a
//! weather badge, a budget breakdown and a link to the route map.
//!
//! # Modules
//!
//! - [`domain`] - Request/response shapes, weather display rule, screen handoff
//! - [`form`] - Planning form state and the submit cycle
//! - [`present`] - Result formatting shared by the TUI and the CLI
//! - [`client`] - Planner backend client trait and HTTP implementation
//! - [`opener`] - Open the map link in the platform browser
//! - [`tui`] - Interactive form and result screens
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod form;
pub mod opener;
pub mod present;
pub mod tui;

// Re-export commonly used types
pub use client::{HttpPlannerClient, PlannerClient, PlannerError, create_client};
pub use config::{BackendConfig, Config, TripDefaults};
pub use domain::{
    Activity, BudgetAmount, BudgetBreakdown, Handoff, HandoffError, PlanResponse, TravelMode, TripPlan, TripRequest,
    TripResult, display_weather,
};
pub use form::{PlanningForm, SubmitOutcome, submit};
pub use present::ResultSummary;
