//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.

use std::time::Instant;

use chrono::{Months, NaiveDate};
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::config::TripDefaults;
use crate::domain::{Handoff, HandoffError, TripRequest};
use crate::form::{INTEREST_TAGS, PlanningForm};
use crate::present::ResultSummary;

/// Words for the submit button while a plan is being generated
pub const LOADING_WORDS: &[&str] = &[
    "Planning",
    "Packing",
    "Mapping",
    "Routing",
    "Scouting",
    "Charting",
    "Wandering",
    "Exploring",
    "Sightseeing",
];

/// Which screen is displayed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Trip parameters (default)
    #[default]
    Form,
    /// Generated plan
    Result(ResultScreen),
}

impl Screen {
    /// Get the display name for the header
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Form => "Plan",
            Self::Result(_) => "Itinerary",
        }
    }
}

/// What the result screen can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultScreen {
    /// No plan data arrived
    Loading,
    /// Plan decoded and ready to render
    Ready(ResultSummary),
    /// Plan data arrived but could not be decoded
    Invalid(String),
}

impl ResultScreen {
    /// Decode the handoff from the form screen
    pub fn from_handoff(handoff: &Handoff, currency: &str) -> Self {
        debug!("ResultScreen::from_handoff: called");
        match handoff.decode() {
            Ok(result) => Self::Ready(ResultSummary::from_result(&result, currency)),
            Err(HandoffError::MissingPlan) => {
                debug!("ResultScreen::from_handoff: no plan data");
                Self::Loading
            }
            Err(e) => {
                debug!(error = %e, "ResultScreen::from_handoff: invalid plan data");
                Self::Invalid(e.to_string())
            }
        }
    }
}

/// Focusable form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    City,
    StartDate,
    EndDate,
    Budget,
    Interests,
    TravelMode,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::City,
        FormField::StartDate,
        FormField::EndDate,
        FormField::Budget,
        FormField::Interests,
        FormField::TravelMode,
        FormField::Submit,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field in tab order (wraps)
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous field in tab order (wraps)
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::City => "Destination City",
            Self::StartDate => "Start Date",
            Self::EndDate => "End Date",
            Self::Budget => "Budget",
            Self::Interests => "Interests",
            Self::TravelMode => "Travel Mode",
            Self::Submit => "Plan my trip",
        }
    }
}

/// Which date a picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTarget {
    Start,
    End,
}

/// Date picker overlay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    pub target: DateTarget,
    /// Date currently highlighted
    pub date: NaiveDate,
    /// Earliest selectable date
    pub min: Option<NaiveDate>,
}

impl DatePicker {
    /// Picker for the start date (unbounded)
    pub fn for_start(form: &PlanningForm) -> Self {
        Self {
            target: DateTarget::Start,
            date: form.start_date,
            min: None,
        }
    }

    /// Picker for the end date, bounded below by the start date
    pub fn for_end(form: &PlanningForm) -> Self {
        let min = form.end_date_min();
        Self {
            target: DateTarget::End,
            date: form.end_date.max(min),
            min: Some(min),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            DateTarget::Start => " Start Date ",
            DateTarget::End => " End Date ",
        }
    }

    /// Move by whole days, never below the minimum
    pub fn shift_days(&mut self, days: i64) {
        if let Some(date) = self.date.checked_add_signed(chrono::Duration::days(days)) {
            self.date = date;
        }
        self.clamp();
    }

    /// Move by whole months, never below the minimum
    pub fn shift_months(&mut self, months: i32) {
        let shifted = if months >= 0 {
            self.date.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.date.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(date) = shifted {
            self.date = date;
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        self.date = self.min.map_or(self.date, |min| self.date.max(min));
    }

    /// Write the highlighted date back into the form
    pub fn confirm(&self, form: &mut PlanningForm) {
        debug!(target = ?self.target, date = %self.date, "DatePicker::confirm: called");
        match self.target {
            DateTarget::Start => form.confirm_start(self.date),
            DateTarget::End => form.confirm_end(self.date),
        }
    }
}

/// Blocking alert dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDialog {
    pub title: String,
    pub message: String,
}

impl AlertDialog {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Normal navigation and editing
    #[default]
    Normal,
    /// Date picker overlay is open
    DatePicker(DatePicker),
    /// Alert overlay is open; only dismissal keys work
    Alert(AlertDialog),
    /// Help overlay
    Help,
}

/// Action pending execution by the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Send the request to the planner
    Submit(TripRequest),
    /// Abort the in-flight request
    CancelSubmit,
    /// Hand the map URL to the platform opener
    OpenMap(Option<String>),
}

/// Complete TUI state
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub interaction_mode: InteractionMode,
    pub should_quit: bool,

    // === Form ===
    pub form: PlanningForm,
    pub focus: FormField,
    /// Highlighted chip in the interest row
    pub interest_cursor: usize,
    /// Currency label for amounts
    pub currency: String,

    // === Loading indicator ===
    pub loading_word: &'static str,
    pub loading_started: Option<Instant>,

    // === Result ===
    pub result_scroll: u16,

    // === Transient ===
    /// One-line status shown in the footer until the next key press
    pub status_message: Option<String>,
    pub pending_action: Option<PendingAction>,
}

impl AppState {
    /// Create state from configured trip defaults
    pub fn new(defaults: &TripDefaults) -> Self {
        Self::with_form(PlanningForm::new(defaults), &defaults.currency)
    }

    /// Create state around an existing form
    pub fn with_form(form: PlanningForm, currency: &str) -> Self {
        debug!("AppState::with_form: called");
        Self {
            screen: Screen::Form,
            interaction_mode: InteractionMode::Normal,
            should_quit: false,
            form,
            focus: FormField::City,
            interest_cursor: 0,
            currency: currency.to_string(),
            loading_word: LOADING_WORDS[0],
            loading_started: None,
            result_scroll: 0,
            status_message: None,
            pending_action: None,
        }
    }

    /// Interest tag under the cursor
    pub fn interest_under_cursor(&self) -> &'static str {
        INTEREST_TAGS[self.interest_cursor.min(INTEREST_TAGS.len() - 1)]
    }

    /// Pick a loading word and start the loading clock
    pub fn start_loading(&mut self) {
        let mut rng = rand::rng();
        self.loading_word = LOADING_WORDS.choose(&mut rng).copied().unwrap_or("Planning");
        self.loading_started = Some(Instant::now());
        debug!(word = self.loading_word, "AppState::start_loading: called");
    }

    /// Clear the loading flag and clock
    pub fn stop_loading(&mut self) {
        debug!("AppState::stop_loading: called");
        self.form.finish_submit();
        self.loading_started = None;
    }

    /// Show the result screen for a handoff
    pub fn navigate_to_result(&mut self, handoff: &Handoff) {
        debug!("AppState::navigate_to_result: called");
        self.screen = Screen::Result(ResultScreen::from_handoff(handoff, &self.currency));
        self.result_scroll = 0;
        self.interaction_mode = InteractionMode::Normal;
    }

    /// Return to the form, keeping what was entered
    pub fn back_to_form(&mut self) {
        debug!("AppState::back_to_form: called");
        self.screen = Screen::Form;
        self.result_scroll = 0;
    }

    /// Raise the blocking alert
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.interaction_mode = InteractionMode::Alert(AlertDialog::error(message));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_status: called");
        self.status_message = Some(msg);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
