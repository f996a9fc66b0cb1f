//! Domain types for Travemle
//!
//! What goes to the planner backend ([`TripRequest`]), what comes back
//! ([`PlanResponse`], [`TripPlan`]) and how it travels between screens
//! ([`Handoff`]).

mod handoff;
mod plan;
mod request;
mod weather;

pub use handoff::{Handoff, HandoffError, PlanResponse, TripResult};
pub use plan::{Activity, BudgetAmount, BudgetBreakdown, TOTAL_KEY, TripPlan};
pub use request::{TravelMode, TripRequest, join_interests, parse_budget};
pub use weather::{WEATHER_UNAVAILABLE, display_weather};
