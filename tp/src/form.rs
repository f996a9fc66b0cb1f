//! Planning form
//!
//! Editable trip parameters plus the submit cycle: build a [`TripRequest`],
//! send it once, and either hand the result over or raise an alert.

use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, error, info};

use crate::client::PlannerClient;
use crate::config::TripDefaults;
use crate::domain::{Handoff, TravelMode, TripRequest, join_interests, parse_budget};

/// Interest tags offered by the form
pub const INTEREST_TAGS: [&str; 6] = ["Nature", "Culture", "Temple", "Beach", "Adventure", "Food"];

/// Format a calendar date as YYYY-MM-DD
///
/// Works on the calendar date itself, so there is no timezone shift.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Editable form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningForm {
    /// Destination city
    pub city: String,
    /// Budget as typed
    pub budget: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travel_mode: TravelMode,
    /// A submission is in flight
    pub loading: bool,
    selected_interests: Vec<String>,
    origin: String,
    country: String,
}

/// What the form does after a submission settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Move on to the result screen
    Navigate(Handoff),
    /// Show a blocking alert and stay on the form
    Alert(String),
}

impl PlanningForm {
    /// Create a form from configured defaults, dated from today
    pub fn new(defaults: &TripDefaults) -> Self {
        Self::with_today(defaults, Local::now().date_naive())
    }

    /// Create a form from configured defaults with an explicit "today"
    pub fn with_today(defaults: &TripDefaults, today: NaiveDate) -> Self {
        debug!(%today, "PlanningForm::with_today: called");
        Self {
            city: defaults.city.clone(),
            budget: defaults.budget.to_string(),
            start_date: today,
            end_date: today + Duration::days(i64::from(defaults.duration_days)),
            travel_mode: defaults.travel_mode,
            loading: false,
            selected_interests: defaults.interests.clone(),
            origin: defaults.origin.clone(),
            country: defaults.country.clone(),
        }
    }

    /// Selected interest tags, in selection order
    pub fn selected_interests(&self) -> &[String] {
        &self.selected_interests
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected_interests.iter().any(|t| t == tag)
    }

    /// Add the tag if absent, remove it if present
    pub fn toggle_interest(&mut self, tag: &str) {
        debug!(%tag, "PlanningForm::toggle_interest: called");
        if self.is_selected(tag) {
            self.selected_interests.retain(|t| t != tag);
        } else {
            self.selected_interests.push(tag.to_string());
        }
    }

    /// Replace the whole selection, dropping duplicates
    pub fn set_interests<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_interests.clear();
        for tag in tags {
            let tag = tag.into();
            if !self.is_selected(&tag) {
                self.selected_interests.push(tag);
            }
        }
    }

    /// Start date picked in the date picker
    pub fn confirm_start(&mut self, date: NaiveDate) {
        debug!(%date, "PlanningForm::confirm_start: called");
        self.start_date = date;
    }

    /// End date picked in the date picker
    pub fn confirm_end(&mut self, date: NaiveDate) {
        debug!(%date, "PlanningForm::confirm_end: called");
        self.end_date = date;
    }

    /// Earliest date the end-date picker offers
    ///
    /// Only the picker honours this; moving the start date later does not
    /// pull the end date along, and submit does not check it.
    pub fn end_date_min(&self) -> NaiveDate {
        self.start_date
    }

    /// Build the outbound request from the current state
    pub fn build_request(&self) -> TripRequest {
        TripRequest {
            origin: self.origin.clone(),
            destination_city: self.city.clone(),
            country: self.country.clone(),
            start_date: format_date(self.start_date),
            end_date: format_date(self.end_date),
            interests: join_interests(&self.selected_interests),
            budget: parse_budget(&self.budget),
            travel_mode: self.travel_mode,
        }
    }

    /// Mark a submission as started and return its request
    ///
    /// Returns None while another submission is still in flight.
    pub fn begin_submit(&mut self) -> Option<TripRequest> {
        if self.loading {
            debug!("PlanningForm::begin_submit: already loading");
            return None;
        }
        self.loading = true;
        Some(self.build_request())
    }

    /// Mark the in-flight submission as settled
    pub fn finish_submit(&mut self) {
        self.loading = false;
    }
}

/// Run one full submit cycle against the planner
///
/// Loading is cleared whatever the outcome. Failures are logged with full
/// detail and reported to the user only through the generic alert.
pub async fn submit(form: &mut PlanningForm, client: &dyn PlannerClient) -> SubmitOutcome {
    let Some(request) = form.begin_submit() else {
        return SubmitOutcome::Alert("A trip is already being planned".to_string());
    };

    info!(city = %request.destination_city, start = %request.start_date, end = %request.end_date, "Submitting trip");
    let outcome = match client.plan_trip(&request).await {
        Ok(response) => SubmitOutcome::Navigate(response.into_handoff()),
        Err(e) => {
            error!(error = %e, "Trip planning request failed");
            SubmitOutcome::Alert(e.user_message().to_string())
        }
    };

    form.finish_submit();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CONNECTIVITY_MESSAGE;
    use crate::client::mock::{MockPlannerClient, MockReply};
    use crate::domain::PlanResponse;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn form() -> PlanningForm {
        PlanningForm::with_today(&TripDefaults::default(), date(2025, 12, 20))
    }

    #[test]
    fn test_defaults() {
        let form = form();
        assert_eq!(form.city, "Kandy");
        assert_eq!(form.budget, "50000");
        assert_eq!(form.start_date, date(2025, 12, 20));
        assert_eq!(form.end_date, date(2025, 12, 23));
        assert_eq!(form.selected_interests(), ["Culture", "Temple"]);
        assert_eq!(form.travel_mode, TravelMode::Bus);
        assert!(!form.loading);
    }

    #[test]
    fn test_set_interests_replaces_selection() {
        let mut form = form();
        form.set_interests(["Beach", "Food", "Beach"]);
        assert_eq!(form.selected_interests(), ["Beach", "Food"]);
        assert_eq!(form.build_request().interests, "Beach, Food");
    }

    #[test]
    fn test_toggle_interest() {
        let mut form = form();
        form.toggle_interest("Beach");
        assert!(form.is_selected("Beach"));
        form.toggle_interest("Culture");
        assert!(!form.is_selected("Culture"));
        assert_eq!(form.selected_interests(), ["Temple", "Beach"]);
    }

    #[test]
    fn test_toggle_allows_empty_selection() {
        let mut form = form();
        form.toggle_interest("Culture");
        form.toggle_interest("Temple");
        assert!(form.selected_interests().is_empty());
        assert_eq!(form.build_request().interests, "");
    }

    #[test]
    fn test_build_request() {
        let mut form = form();
        form.city = "Galle".to_string();
        form.budget = "20000".to_string();
        form.travel_mode = TravelMode::Train;

        let request = form.build_request();
        assert_eq!(request.origin, "Colombo");
        assert_eq!(request.destination_city, "Galle");
        assert_eq!(request.country, "Sri Lanka");
        assert_eq!(request.start_date, "2025-12-20");
        assert_eq!(request.end_date, "2025-12-23");
        assert_eq!(request.interests, "Culture, Temple");
        assert_eq!(request.budget, Some(20000));
        assert_eq!(request.travel_mode, TravelMode::Train);
    }

    #[test]
    fn test_end_before_start_is_forwarded() {
        let mut form = form();
        form.confirm_start(date(2025, 12, 28));
        form.confirm_end(date(2025, 12, 21));
        assert_eq!(form.end_date_min(), date(2025, 12, 28));

        let request = form.build_request();
        assert_eq!(request.start_date, "2025-12-28");
        assert_eq!(request.end_date, "2025-12-21");
    }

    #[test]
    fn test_format_and_parse_date() {
        assert_eq!(format_date(date(2025, 1, 5)), "2025-01-05");
        assert_eq!(format_date(date(987, 3, 9)), "0987-03-09");
        assert_eq!(parse_date("2025-12-20"), Some(date(2025, 12, 20)));
        assert_eq!(parse_date("20/12/2025"), None);
    }

    #[test]
    fn test_begin_submit_refuses_while_loading() {
        let mut form = form();
        assert!(form.begin_submit().is_some());
        assert!(form.loading);
        assert!(form.begin_submit().is_none());
        form.finish_submit();
        assert!(!form.loading);
    }

    #[tokio::test]
    async fn test_submit_success_navigates() {
        let client = MockPlannerClient::new(vec![MockReply::Plan(PlanResponse {
            plan: serde_json::json!({"title": "Kandy Escape", "activities": []}),
            weather: Some("Clouds, 28°C".to_string()),
            map_url: Some("https://www.google.com/maps/dir/Colombo".to_string()),
        })]);
        let mut form = form();

        let outcome = submit(&mut form, &client).await;

        assert!(!form.loading);
        let SubmitOutcome::Navigate(handoff) = outcome else {
            panic!("expected navigation, got {:?}", outcome);
        };
        assert_eq!(handoff.decode().unwrap().plan.title, "Kandy Escape");
        assert_eq!(client.requests()[0].destination_city, "Kandy");
    }

    #[tokio::test]
    async fn test_submit_failure_alerts_and_clears_loading() {
        let client = MockPlannerClient::new(vec![MockReply::Status(500)]);
        let mut form = form();

        let outcome = submit(&mut form, &client).await;

        assert!(!form.loading);
        assert_eq!(outcome, SubmitOutcome::Alert(CONNECTIVITY_MESSAGE.to_string()));
        assert_eq!(client.call_count(), 1);
    }

    proptest! {
        #[test]
        fn prop_toggle_twice_restores_membership(
            initial in proptest::sample::subsequence(INTEREST_TAGS.to_vec(), 0..=INTEREST_TAGS.len()),
            tag in proptest::sample::select(INTEREST_TAGS.to_vec()),
        ) {
            let defaults = TripDefaults {
                interests: initial.iter().map(|t| t.to_string()).collect(),
                ..TripDefaults::default()
            };
            let mut form = PlanningForm::with_today(&defaults, date(2025, 12, 20));

            form.toggle_interest(tag);
            form.toggle_interest(tag);

            let mut before: Vec<&str> = initial.clone();
            let mut after: Vec<&str> = form.selected_interests().iter().map(String::as_str).collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_format_date_is_ten_chars(days in 0i32..3_652_058) {
            // 0001-01-01 through 9999-12-31
            let date = NaiveDate::from_num_days_from_ce_opt(days + 1).unwrap();
            let text = format_date(date);
            prop_assert_eq!(text.len(), 10);
            prop_assert_eq!(parse_date(&text), Some(date));
        }
    }
}
