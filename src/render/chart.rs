//! Chart-ready render models.
//!
//! These are surface-independent descriptions of what a chart shows. The
//! terminal layer draws them; tests inspect them directly.

use super::palette::{Rgb, Rgba};
use super::slot::Rendering;

/// Where a chart's legend goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Hidden,
    Bottom,
}

/// Value axis options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueAxis {
    pub begin_at_zero: bool,
    /// Tick step; `1` for count axes
    pub step: u64,
}

impl ValueAxis {
    /// Zero-based axis with integer ticks.
    pub const COUNTS: Self = Self {
        begin_at_zero: true,
        step: 1,
    };

    /// Tick values from the axis origin up to and including `max`.
    ///
    /// Thins the ticks to at most `max_ticks` values so a terminal axis stays
    /// readable; every tick remains a multiple of `step`. When rounding `max`
    /// up to a step would overflow, the axis tops out at the last step below.
    #[must_use]
    pub fn ticks(&self, max: u64, max_ticks: usize) -> Vec<u64> {
        let step = self.step.max(1);
        let top = max
            .div_ceil(step)
            .checked_mul(step)
            .unwrap_or(max / step * step);
        let steps = top / step;
        let intervals = u64::try_from(max_ticks.max(2) - 1).unwrap_or(u64::MAX);
        let stride = steps.saturating_add(1).div_ceil(intervals).max(1);
        let mut ticks: Vec<u64> = (0..=steps)
            .step_by(usize::try_from(stride).unwrap_or(usize::MAX))
            .map(|i| i * step)
            .collect();
        if ticks.last() != Some(&top) {
            ticks.push(top);
        }
        ticks
    }
}

// ============================================================================
// Bar chart
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarModel {
    pub label: String,
    pub value: u64,
    pub color: Rgb,
}

/// A single-series bar chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChartModel {
    pub series_label: String,
    pub bars: Vec<BarModel>,
    pub y_axis: ValueAxis,
    pub legend: LegendPosition,
}

impl BarChartModel {
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }

    #[must_use]
    pub fn values(&self) -> Vec<u64> {
        self.bars.iter().map(|b| b.value).collect()
    }

    #[must_use]
    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

impl Rendering for BarChartModel {
    fn dispose(&mut self) {
        self.bars.clear();
    }
}

// ============================================================================
// Donut chart
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceModel {
    pub label: String,
    pub value: u64,
    pub color: Rgb,
}

/// A proportion chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonutChartModel {
    pub slices: Vec<SliceModel>,
    pub legend: LegendPosition,
}

impl DonutChartModel {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of each slice in `[0, 1]`; all zero when the total is zero.
    #[must_use]
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| {
                if total == 0 {
                    0.0
                } else {
                    s.value as f64 / total as f64
                }
            })
            .collect()
    }
}

impl Rendering for DonutChartModel {
    fn dispose(&mut self) {
        self.slices.clear();
    }
}

// ============================================================================
// Scatter chart
// ============================================================================

/// One series of a scatter chart.
///
/// `coords` is kept as plain tuples because that is what the drawing layer
/// consumes; `ids` runs parallel to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    pub coords: Vec<(f64, f64)>,
    pub ids: Vec<Option<crate::api::PointId>>,
    pub fill: Rgba,
    pub stroke: Rgb,
    pub stroke_width: u16,
    pub point_radius: u16,
}

impl ScatterSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChartModel {
    pub series: Vec<ScatterSeries>,
    pub x_title: String,
    pub y_title: String,
    pub legend: LegendPosition,
}

impl ScatterChartModel {
    /// `[min, max]` of x and y over all series, padded so single points and
    /// degenerate ranges still get a visible extent.
    #[must_use]
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut x = [f64::INFINITY, f64::NEG_INFINITY];
        let mut y = [f64::INFINITY, f64::NEG_INFINITY];
        for &(px, py) in self.series.iter().flat_map(|s| s.coords.iter()) {
            x = [x[0].min(px), x[1].max(px)];
            y = [y[0].min(py), y[1].max(py)];
        }
        (pad_range(x), pad_range(y))
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(ScatterSeries::len).sum()
    }
}

fn pad_range(range: [f64; 2]) -> [f64; 2] {
    if !range[0].is_finite() || !range[1].is_finite() {
        return [-1.0, 1.0];
    }
    let span = range[1] - range[0];
    let pad = if span > 0.0 { span * 0.05 } else { 0.5 };
    [range[0] - pad, range[1] + pad]
}

impl Rendering for ScatterChartModel {
    fn dispose(&mut self) {
        self.series.clear();
    }
}
