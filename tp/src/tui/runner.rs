//! TUI Runner - main loop that owns the terminal and the planner client
//!
//! The TuiRunner is responsible for:
//! - Dispatching terminal events to App for handling
//! - Running the submit request in a background task
//! - Applying the planner reply (navigate or alert) when it arrives
//! - Aborting the in-flight request on cancel or exit

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::{AppState, PendingAction};
use super::views;
use crate::client::{PlannerClient, PlannerError};
use crate::domain::{PlanResponse, TripRequest};
use crate::opener;

/// Input poll interval; also bounds how stale the loading timer can get
const TICK_RATE: Duration = Duration::from_millis(100);

/// Reply from the background submit task
#[derive(Debug)]
pub struct SubmitReply {
    /// Which submission this answers
    pub request_id: Uuid,
    pub result: Result<PlanResponse, PlannerError>,
}

/// Owns the single in-flight submission
///
/// Each submission gets a fresh id. Replies carrying any other id are stale
/// (the request was cancelled or replaced) and are dropped.
pub struct SubmitWorker {
    client: Arc<dyn PlannerClient>,
    tx: mpsc::Sender<SubmitReply>,
    rx: mpsc::Receiver<SubmitReply>,
    task: Option<JoinHandle<()>>,
    current: Option<Uuid>,
}

impl SubmitWorker {
    pub fn new(client: Arc<dyn PlannerClient>) -> Self {
        let (tx, rx) = mpsc::channel(4);
        Self {
            client,
            tx,
            rx,
            task: None,
            current: None,
        }
    }

    /// Whether a submission is waiting for its reply
    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }

    /// Spawn the request; any previous one is aborted first
    pub fn start(&mut self, request: TripRequest) -> Uuid {
        self.abort();

        let request_id = Uuid::now_v7();
        debug!(%request_id, "SubmitWorker::start: called");
        info!(%request_id, city = %request.destination_city, "Submitting trip");

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        self.current = Some(request_id);
        self.task = Some(tokio::spawn(async move {
            let result = client.plan_trip(&request).await;
            debug!(%request_id, ok = result.is_ok(), "submit task finished");
            let _ = tx.send(SubmitReply { request_id, result }).await;
        }));
        request_id
    }

    /// Abort the in-flight request and clear loading
    ///
    /// Returns false when nothing was in flight.
    pub fn cancel(&mut self, state: &mut AppState) -> bool {
        debug!(current = ?self.current, "SubmitWorker::cancel: called");
        let was_in_flight = self.in_flight();
        self.abort();
        state.stop_loading();
        if was_in_flight {
            info!("Trip planning cancelled");
            state.set_status("Trip planning cancelled");
        }
        was_in_flight
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.current = None;
    }

    /// Wait for the next reply
    pub async fn recv(&mut self) -> Option<SubmitReply> {
        self.rx.recv().await
    }

    /// Apply a reply to the UI state
    ///
    /// Success navigates to the result screen; failure raises the alert and
    /// stays on the form. Either way loading is cleared. Returns false for
    /// stale replies, which leave the state untouched.
    pub fn apply(&mut self, reply: SubmitReply, state: &mut AppState) -> bool {
        debug!(request_id = %reply.request_id, "SubmitWorker::apply: called");
        if self.current != Some(reply.request_id) {
            debug!(request_id = %reply.request_id, "SubmitWorker::apply: stale reply discarded");
            return false;
        }
        self.current = None;
        self.task = None;
        state.stop_loading();

        match reply.result {
            Ok(response) => {
                info!("Trip plan received, showing result");
                state.navigate_to_result(&response.into_handoff());
            }
            Err(e) => {
                error!(error = %e, status = ?e.status(), "Trip planning request failed");
                state.show_alert(e.user_message());
            }
        }
        true
    }
}

impl Drop for SubmitWorker {
    fn drop(&mut self) {
        self.abort();
    }
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Background submission
    worker: SubmitWorker,
}

impl TuiRunner {
    pub fn new(terminal: Tui, app: App, client: Arc<dyn PlannerClient>) -> Self {
        debug!("TuiRunner::new: called");
        Self {
            app,
            terminal,
            event_handler: EventHandler::new(TICK_RATE),
            worker: SubmitWorker::new(client),
        }
    }

    /// Main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                break;
                            }
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize");
                            self.terminal.autoresize()?;
                        }
                        Event::Tick => {}
                    }
                }
                Some(reply) = self.worker.recv() => {
                    self.worker.apply(reply, self.app.state_mut());
                }
            }

            self.process_pending_action();

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        // Leaving the form abandons whatever is still in flight
        if self.worker.in_flight() {
            self.worker.cancel(self.app.state_mut());
        }
        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Execute the action queued by the last key, if any
    fn process_pending_action(&mut self) {
        let Some(action) = self.app.state_mut().pending_action.take() else {
            return;
        };
        debug!(?action, "TuiRunner::process_pending_action: called");

        match action {
            PendingAction::Submit(request) => {
                self.worker.start(request);
            }
            PendingAction::CancelSubmit => {
                self.worker.cancel(self.app.state_mut());
            }
            PendingAction::OpenMap(url) => {
                if let Err(e) = opener::open_url(url.as_deref()) {
                    warn!(error = %e, "Failed to open map link");
                    self.app.state_mut().set_status(format!("Could not open map: {}", e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CONNECTIVITY_MESSAGE;
    use crate::client::mock::{MockPlannerClient, MockReply};
    use crate::config::TripDefaults;
    use crate::form::PlanningForm;
    use crate::tui::state::{InteractionMode, ResultScreen, Screen};
    use chrono::NaiveDate;

    fn state() -> AppState {
        let today = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        AppState::with_form(PlanningForm::with_today(&TripDefaults::default(), today), "LKR")
    }

    fn begin(state: &mut AppState) -> TripRequest {
        let request = state.form.begin_submit().unwrap();
        state.start_loading();
        request
    }

    fn plan_response() -> PlanResponse {
        PlanResponse {
            plan: serde_json::json!({
                "title": "Kandy Heritage",
                "duration": "3 days",
                "activities": [],
                "budget_breakdown": {"lodging": 10000, "food": 5000, "total": 15000}
            }),
            weather: Some("Clouds, 28°C".to_string()),
            map_url: Some("https://www.google.com/maps/dir/Colombo/Kandy".to_string()),
        }
    }

    #[tokio::test]
    async fn test_success_navigates_to_result() {
        let client = Arc::new(MockPlannerClient::new(vec![MockReply::Plan(plan_response())]));
        let mut worker = SubmitWorker::new(client.clone());
        let mut state = state();

        let request = begin(&mut state);
        worker.start(request);
        assert!(worker.in_flight());

        let reply = worker.recv().await.unwrap();
        assert!(worker.apply(reply, &mut state));

        assert!(!state.form.loading);
        assert!(!worker.in_flight());
        let Screen::Result(ResultScreen::Ready(summary)) = &state.screen else {
            panic!("expected result screen, got {:?}", state.screen);
        };
        assert_eq!(summary.title, "Kandy Heritage");
        assert_eq!(summary.weather, "28°C");
        assert_eq!(summary.total, "LKR 15000");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_alerts_and_stays_on_form() {
        let client = Arc::new(MockPlannerClient::new(vec![MockReply::Status(503)]));
        let mut worker = SubmitWorker::new(client);
        let mut state = state();

        let request = begin(&mut state);
        worker.start(request);
        let reply = worker.recv().await.unwrap();
        worker.apply(reply, &mut state);

        assert!(!state.form.loading);
        assert_eq!(state.screen, Screen::Form);
        let InteractionMode::Alert(alert) = &state.interaction_mode else {
            panic!("expected alert");
        };
        assert_eq!(alert.message, CONNECTIVITY_MESSAGE);
    }

    #[tokio::test]
    async fn test_cancel_clears_loading_and_drops_reply() {
        let client = Arc::new(
            MockPlannerClient::new(vec![MockReply::Plan(plan_response())]).with_delay(Duration::from_millis(200)),
        );
        let mut worker = SubmitWorker::new(client);
        let mut state = state();

        let request = begin(&mut state);
        worker.start(request);
        assert!(worker.cancel(&mut state));

        assert!(!state.form.loading);
        assert!(!worker.in_flight());
        assert_eq!(state.status_message.as_deref(), Some("Trip planning cancelled"));

        // The aborted task never replies
        let waited = tokio::time::timeout(Duration::from_millis(400), worker.recv()).await;
        assert!(waited.is_err());
        assert_eq!(state.screen, Screen::Form);
    }

    #[tokio::test]
    async fn test_stale_reply_is_ignored() {
        let client = Arc::new(MockPlannerClient::new(vec![]));
        let mut worker = SubmitWorker::new(client);
        let mut state = state();

        let stale = SubmitReply {
            request_id: Uuid::now_v7(),
            result: Ok(plan_response()),
        };
        assert!(!worker.apply(stale, &mut state));
        assert_eq!(state.screen, Screen::Form);
        assert!(matches!(state.interaction_mode, InteractionMode::Normal));
    }

    #[tokio::test]
    async fn test_cancel_without_request_is_quiet() {
        let client = Arc::new(MockPlannerClient::new(vec![]));
        let mut worker = SubmitWorker::new(client);
        let mut state = state();

        assert!(!worker.cancel(&mut state));
        assert!(state.status_message.is_none());
    }
}
