//! Application state for the TUI.

use super::events::{map_key, Command, Focus};
use super::theme;
use crate::dashboard::{ActionOutcome, Dashboard, UserAction};
use crate::panels::{InputEdit, SubmitRejection};
use crossterm::event::KeyEvent;

/// Main application state: the dashboard plus terminal-only UI state.
#[derive(Debug)]
pub struct TuiApp {
    pub(crate) dashboard: Dashboard,
    /// Where typed characters go
    pub(crate) focus: Focus,
    pub(crate) show_help: bool,
    pub(crate) should_quit: bool,
    /// Status message to display temporarily
    pub(crate) status_message: Option<String>,
    /// Animation tick counter
    pub(crate) tick: u64,
}

impl TuiApp {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            focus: Focus::default(),
            show_help: false,
            should_quit: false,
            status_message: None,
            tick: 0,
        }
    }

    /// Launch the initial fetches. Needs a tokio runtime.
    pub fn start(&mut self) {
        let started = self.dashboard.start();
        tracing::debug!(requests = started, "initial fetch launched");
    }

    #[must_use]
    pub const fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Set a temporary status message
    pub fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Periodic update: apply whatever requests have completed.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        let applied = self.dashboard.drain_events();
        if applied > 0 {
            tracing::trace!(applied, "applied completions");
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.clear_status_message();
        if let Some(command) = map_key(self.focus, key) {
            self.execute(command);
        }
    }

    /// Pasted text always goes to the complaint input.
    pub fn handle_paste(&mut self, text: String) {
        self.focus = Focus::Input;
        self.dashboard.handle(UserAction::Edit(InputEdit::Paste(text)));
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::ToggleTheme => {
                let name = theme::toggle_theme();
                self.set_status_message(format!("Theme: {name}"));
            }
            Command::Focus(focus) => self.focus = focus,
            Command::Dashboard(action) => {
                let outcome = self.dashboard.handle(action);
                self.report(outcome);
            }
        }
    }

    fn report(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Submitted(ticket) => {
                tracing::debug!(%ticket, "analysis submitted");
                self.set_status_message("Analyzing…");
            }
            ActionOutcome::Rejected(SubmitRejection::Busy) => {
                self.set_status_message(SubmitRejection::Busy.to_string());
            }
            // The requester's error view already says why.
            ActionOutcome::Rejected(SubmitRejection::EmptyInput) => {
                self.focus = Focus::Input;
            }
            ActionOutcome::Cleared => self.set_status_message("Cleared"),
            ActionOutcome::Refreshing(count) => {
                self.set_status_message(format!("Refreshing ({count} requests)"));
            }
            ActionOutcome::Inspected(None) => {
                self.set_status_message("No points to inspect");
            }
            ActionOutcome::Edited | ActionOutcome::Inspected(Some(_)) => {}
        }
    }
}
