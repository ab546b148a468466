//! Category and severity distribution charts.
//!
//! Both charts are fed from a single trends response: the orchestrator
//! fetches once per refresh and hands the same outcome to both instances.

use crate::api::{DashboardApi, TrendsResponse};
use crate::error::ApiError;
use crate::model::{humanize, AggregateSample, TrendsSnapshot};
use crate::render::{
    palette_color, severity_color, BarChartModel, BarModel, DonutChartModel, FailurePolicy,
    LegendPosition, RenderId, Rendering, SliceModel, Slot, ValueAxis,
};

/// Which distribution a chart instance shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Category,
    Severity,
}

impl AggregateKind {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Category => "Complaints by category",
            Self::Severity => "Complaints by severity",
        }
    }

    const fn slot_name(self) -> &'static str {
        match self {
            Self::Category => "category-chart",
            Self::Severity => "severity-chart",
        }
    }
}

/// A mounted distribution chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateRendering {
    Bar(BarChartModel),
    Donut(DonutChartModel),
}

impl Rendering for AggregateRendering {
    fn dispose(&mut self) {
        match self {
            Self::Bar(chart) => chart.dispose(),
            Self::Donut(chart) => chart.dispose(),
        }
    }
}

/// Bar chart of counts per category, palette colors cycled by position.
#[must_use]
pub fn build_category_chart(samples: &[AggregateSample]) -> BarChartModel {
    BarChartModel {
        series_label: "Count".to_string(),
        bars: samples
            .iter()
            .enumerate()
            .map(|(i, sample)| BarModel {
                label: humanize(&sample.label),
                value: sample.count,
                color: palette_color(i),
            })
            .collect(),
        y_axis: ValueAxis::COUNTS,
        legend: LegendPosition::Hidden,
    }
}

/// Donut chart of counts per severity, colored by severity name.
#[must_use]
pub fn build_severity_chart(samples: &[AggregateSample]) -> DonutChartModel {
    DonutChartModel {
        slices: samples
            .iter()
            .map(|sample| SliceModel {
                label: sample.label.clone(),
                value: sample.count,
                color: severity_color(&sample.label),
            })
            .collect(),
        legend: LegendPosition::Bottom,
    }
}

/// One distribution chart in its own slot.
#[derive(Debug)]
pub struct AggregateChart {
    kind: AggregateKind,
    slot: Slot<AggregateRendering>,
    last_error: Option<String>,
}

impl AggregateChart {
    /// A failed refresh leaves the previous chart in place.
    pub const FAILURE_POLICY: FailurePolicy = FailurePolicy::Retain;

    #[must_use]
    pub const fn new(kind: AggregateKind) -> Self {
        Self {
            kind,
            slot: Slot::new(kind.slot_name()),
            last_error: None,
        }
    }

    #[must_use]
    pub const fn category() -> Self {
        Self::new(AggregateKind::Category)
    }

    #[must_use]
    pub const fn severity() -> Self {
        Self::new(AggregateKind::Severity)
    }

    /// Fetch the trends shared by both chart instances.
    pub async fn fetch(api: &dyn DashboardApi) -> Result<TrendsResponse, ApiError> {
        api.trends().await
    }

    /// Redraw from a shared trends outcome.
    ///
    /// Returns the id of the new rendering, or `None` when the fetch failed
    /// and the previous chart was kept.
    pub fn apply(&mut self, outcome: &Result<TrendsSnapshot, ApiError>) -> Option<RenderId> {
        match outcome {
            Ok(snapshot) => {
                let samples = match self.kind {
                    AggregateKind::Category => &snapshot.by_category,
                    AggregateKind::Severity => &snapshot.by_severity,
                };
                self.last_error = None;
                Some(self.render(samples))
            }
            Err(err) => {
                tracing::warn!(
                    chart = self.kind.slot_name(),
                    error = %err,
                    policy = ?Self::FAILURE_POLICY,
                    "trends fetch failed, keeping previous chart"
                );
                self.last_error = Some(err.to_string());
                None
            }
        }
    }

    /// Dispose the current chart and mount one built from `samples`.
    pub fn render(&mut self, samples: &[AggregateSample]) -> RenderId {
        let kind = self.kind;
        self.slot.replace_with(|| match kind {
            AggregateKind::Category => AggregateRendering::Bar(build_category_chart(samples)),
            AggregateKind::Severity => AggregateRendering::Donut(build_severity_chart(samples)),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> AggregateKind {
        self.kind
    }

    #[must_use]
    pub fn current(&self) -> Option<&AggregateRendering> {
        self.slot.current()
    }

    #[must_use]
    pub const fn slot(&self) -> &Slot<AggregateRendering> {
        &self.slot
    }

    /// Error of the last refresh, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
