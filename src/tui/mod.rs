//! Terminal UI using ratatui.
//!
//! [`TuiApp`] wraps a [`Dashboard`](crate::dashboard::Dashboard) with the
//! state that only matters on a terminal: key focus, help overlay, status
//! line. [`run_tui`] owns the terminal and the event loop; between frames it
//! drains completed requests into the dashboard.

mod app;
mod events;
pub mod theme;
mod ui;
pub(crate) mod widgets;

// Theme exports
pub use theme::{
    colors, current_theme, set_theme, toggle_theme, ColorScheme, FooterHints, Styles, Theme,
};

pub use app::TuiApp;
pub use events::{map_key, Command, Event, EventHandler, Focus};
pub use ui::{render, run_tui};
