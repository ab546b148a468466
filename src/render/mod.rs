//! Render models and the slot lifecycle.
//!
//! Everything in here is independent of the terminal: components build
//! chart models, mount them in [`Slot`]s, and the TUI draws whatever is
//! currently mounted.

pub mod chart;
pub mod palette;
mod slot;

pub use chart::{
    BarChartModel, BarModel, DonutChartModel, LegendPosition, ScatterChartModel, ScatterSeries,
    SliceModel, ValueAxis,
};
pub use palette::{palette_color, severity_color, Rgb, Rgba, CHART_PALETTE, SCATTER_FILL_ALPHA};
pub use slot::{RenderId, Rendering, Slot};

/// What a chart slot shows after its fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep the previous rendering untouched.
    Retain,
    /// Dispose the previous rendering and show a placeholder message.
    Placeholder,
}
