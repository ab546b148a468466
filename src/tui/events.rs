//! Terminal input and key bindings.

use crate::dashboard::UserAction;
use crate::panels::InputEdit;
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Granularity of input polling while waiting for the next tick.
const POLL_SLICE: Duration = Duration::from_millis(16);

/// Terminal events
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Bracketed paste
    Paste(String),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for periodic updates
    Tick,
}

/// Event handler for terminal events.
///
/// Waits between polls with `tokio::time::sleep` rather than blocking in
/// `crossterm::event::poll`, so request tasks on the same runtime keep
/// running while the UI is idle.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub const fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Next terminal event, or [`Event::Tick`] once the tick rate elapses.
    pub async fn next(&self) -> std::io::Result<Event> {
        let deadline = Instant::now() + self.tick_rate;
        loop {
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                        return Ok(Event::Key(key));
                    }
                    event::Event::Paste(text) => return Ok(Event::Paste(text)),
                    event::Event::Resize(w, h) => return Ok(Event::Resize(w, h)),
                    _ => {}
                }
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(Event::Tick);
            }
            tokio::time::sleep(POLL_SLICE.min(deadline - now)).await;
        }
    }
}

/// Where typed characters go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Single-key shortcuts are active
    #[default]
    Dashboard,
    /// Keys edit the complaint text
    Input,
}

/// What a key press asks the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dashboard(UserAction),
    Focus(Focus),
    ToggleHelp,
    ToggleTheme,
    Quit,
}

/// Map a key press to a command for the given focus.
#[must_use]
pub fn map_key(focus: Focus, key: KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('r') => Some(Command::Dashboard(UserAction::Refresh)),
            KeyCode::Char('l') => Some(Command::Dashboard(UserAction::Clear)),
            KeyCode::Char('w') | KeyCode::Backspace if focus == Focus::Input => {
                Some(Command::Dashboard(UserAction::Edit(InputEdit::DeleteWord)))
            }
            _ => None,
        };
    }

    match focus {
        Focus::Input => match key.code {
            KeyCode::Enter => Some(Command::Dashboard(UserAction::Submit)),
            KeyCode::Esc | KeyCode::Tab => Some(Command::Focus(Focus::Dashboard)),
            KeyCode::Backspace => Some(Command::Dashboard(UserAction::Edit(InputEdit::Backspace))),
            KeyCode::Char(c) => Some(Command::Dashboard(UserAction::Edit(InputEdit::Insert(c)))),
            _ => None,
        },
        Focus::Dashboard => match key.code {
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Command::ToggleHelp),
            KeyCode::Char('t') => Some(Command::ToggleTheme),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Command::Dashboard(UserAction::Refresh)),
            KeyCode::Char('c') => Some(Command::Dashboard(UserAction::Clear)),
            KeyCode::Char('i') | KeyCode::Tab => Some(Command::Focus(Focus::Input)),
            KeyCode::Enter => Some(Command::Dashboard(UserAction::Submit)),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
                Some(Command::Dashboard(UserAction::InspectNext))
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
                Some(Command::Dashboard(UserAction::InspectPrevious))
            }
            _ => None,
        },
    }
}
