//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.
//! Network work is requested through `pending_action` and carried out by the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::state::{AppState, DatePicker, FormField, InteractionMode, PendingAction, ResultScreen, Screen};
use crate::config::TripDefaults;
use crate::form::INTEREST_TAGS;

/// Lines scrolled by PageUp/PageDown on the result screen
const PAGE_SCROLL: u16 = 10;

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance from trip defaults
    pub fn new(defaults: &TripDefaults) -> Self {
        debug!("App::new: called");
        Self {
            state: AppState::new(defaults),
        }
    }

    /// Wrap an existing state
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("App::handle_key: Ctrl+C force quit");
            return true;
        }

        // Clear any transient status on key press
        self.state.clear_status();

        match &self.state.interaction_mode {
            InteractionMode::Normal => match self.state.screen {
                Screen::Form => self.handle_form_key(key),
                Screen::Result(_) => self.handle_result_key(key),
            },
            InteractionMode::DatePicker(_) => {
                self.handle_picker_key(key);
                false
            }
            InteractionMode::Alert(_) => {
                self.handle_alert_key(key);
                false
            }
            InteractionMode::Help => {
                self.handle_help_key(key);
                false
            }
        }
    }

    /// Handle key on the form screen
    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, focus = ?self.state.focus, "App::handle_form_key: called");
        let text_field = matches!(self.state.focus, FormField::City | FormField::Budget);

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.state.focus = self.state.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.focus = self.state.focus.prev();
            }
            KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Esc => {
                if self.state.form.loading {
                    debug!("App::handle_form_key: cancelling in-flight submission");
                    self.state.pending_action = Some(PendingAction::CancelSubmit);
                }
            }
            KeyCode::Char('?') if !text_field => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Char('q') if !text_field => {
                debug!("App::handle_form_key: quit requested");
                self.state.should_quit = true;
            }
            _ => self.handle_field_key(key),
        }
        self.state.should_quit
    }

    /// Handle key for the focused form field
    fn handle_field_key(&mut self, key: KeyEvent) {
        match self.state.focus {
            FormField::City => match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.state.form.city.push(c),
                KeyCode::Backspace => {
                    self.state.form.city.pop();
                }
                KeyCode::Enter => self.state.focus = self.state.focus.next(),
                _ => {}
            },
            FormField::Budget => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => self.state.form.budget.push(c),
                KeyCode::Backspace => {
                    self.state.form.budget.pop();
                }
                KeyCode::Enter => self.state.focus = self.state.focus.next(),
                _ => {}
            },
            FormField::StartDate => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.state.interaction_mode = InteractionMode::DatePicker(DatePicker::for_start(&self.state.form));
                }
            }
            FormField::EndDate => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.state.interaction_mode = InteractionMode::DatePicker(DatePicker::for_end(&self.state.form));
                }
            }
            FormField::Interests => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.state.interest_cursor = self.state.interest_cursor.saturating_sub(1);
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.state.interest_cursor = (self.state.interest_cursor + 1).min(INTEREST_TAGS.len() - 1);
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    let tag = self.state.interest_under_cursor();
                    self.state.form.toggle_interest(tag);
                }
                _ => {}
            },
            FormField::TravelMode => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.state.form.travel_mode = self.state.form.travel_mode.prev();
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    self.state.form.travel_mode = self.state.form.travel_mode.next();
                }
                _ => {}
            },
            FormField::Submit => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.submit();
                }
            }
        }
    }

    /// Queue a submission unless one is already in flight
    fn submit(&mut self) {
        debug!("App::submit: called");
        match self.state.form.begin_submit() {
            Some(request) => {
                self.state.start_loading();
                self.state.pending_action = Some(PendingAction::Submit(request));
            }
            None => {
                debug!("App::submit: submit button disabled while loading");
            }
        }
    }

    /// Handle key on the result screen
    fn handle_result_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_result_key: called");
        match key.code {
            KeyCode::Char('q') => {
                self.state.should_quit = true;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                self.state.back_to_form();
            }
            KeyCode::Char('m') | KeyCode::Enter => {
                let url = match &self.state.screen {
                    Screen::Result(ResultScreen::Ready(summary)) => summary.map_url.clone(),
                    _ => None,
                };
                self.state.pending_action = Some(PendingAction::OpenMap(url));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.result_scroll = self.state.result_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.result_scroll = self.state.result_scroll.saturating_sub(1);
            }
            KeyCode::PageDown => {
                self.state.result_scroll = self.state.result_scroll.saturating_add(PAGE_SCROLL);
            }
            KeyCode::PageUp => {
                self.state.result_scroll = self.state.result_scroll.saturating_sub(PAGE_SCROLL);
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.state.result_scroll = 0;
            }
            _ => {}
        }
        self.state.should_quit
    }

    /// Handle key while the date picker is open
    fn handle_picker_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_picker_key: called");
        let InteractionMode::DatePicker(picker) = &mut self.state.interaction_mode else {
            return;
        };

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => picker.shift_days(-1),
            KeyCode::Right | KeyCode::Char('l') => picker.shift_days(1),
            KeyCode::Up | KeyCode::Char('k') => picker.shift_days(-7),
            KeyCode::Down | KeyCode::Char('j') => picker.shift_days(7),
            KeyCode::PageUp => picker.shift_months(-1),
            KeyCode::PageDown => picker.shift_months(1),
            KeyCode::Enter => {
                let picker = picker.clone();
                picker.confirm(&mut self.state.form);
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Esc => {
                debug!("App::handle_picker_key: picker cancelled");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            _ => {}
        }
    }

    /// Handle key while the alert is shown
    fn handle_alert_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            debug!("App::handle_alert_key: alert dismissed");
            self.state.interaction_mode = InteractionMode::Normal;
        }
    }

    /// Handle key while help is shown
    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)
        ) {
            self.state.interaction_mode = InteractionMode::Normal;
        }
    }
}
