//! Scatter view of the clustered projection.
//!
//! Inspection goes through rendered coordinates: the cursor addresses a
//! point by (series, index) in the chart, reads the coordinate the chart
//! holds for it and looks the source record up from there, the same way a
//! pointer hover would.

use crate::api::{ClusteringResponse, DashboardApi};
use crate::error::ApiError;
use crate::model::{excerpt_label, ClusterPoint, ClusterSet};
use crate::render::{
    palette_color, FailurePolicy, LegendPosition, RenderId, Rendering, ScatterChartModel,
    ScatterSeries, Slot, SCATTER_FILL_ALPHA,
};

pub const EMPTY_MESSAGE: &str = "No clustering data. Run training first.";
pub const FAILURE_MESSAGE: &str = "Clustering visualization failed. Is the API running?";

const STROKE_WIDTH: u16 = 1;
const POINT_RADIUS: u16 = 6;

/// Build one series per declared cluster, empty clusters included.
#[must_use]
pub fn build_scatter(set: &ClusterSet) -> ScatterChartModel {
    let series = set
        .groups()
        .into_iter()
        .enumerate()
        .map(|(index, members)| {
            let color = palette_color(index);
            ScatterSeries {
                label: format!("Cluster {}", index + 1),
                coords: members.iter().map(|p| (p.x, p.y)).collect(),
                ids: members.iter().map(|p| p.id.clone()).collect(),
                fill: color.with_alpha(SCATTER_FILL_ALPHA),
                stroke: color,
                stroke_width: STROKE_WIDTH,
                point_radius: POINT_RADIUS,
            }
        })
        .collect();

    ScatterChartModel {
        series,
        x_title: "PC1".to_string(),
        y_title: "PC2".to_string(),
        legend: LegendPosition::Bottom,
    }
}

/// A mounted scatter chart together with the point set it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRendering {
    pub chart: ScatterChartModel,
    pub set: ClusterSet,
}

impl Rendering for ClusterRendering {
    fn dispose(&mut self) {
        self.chart.dispose();
    }
}

/// Position of the inspection cursor in the rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCursor {
    pub series: usize,
    pub index: usize,
}

#[derive(Debug)]
pub struct ClusterVisualization {
    slot: Slot<ClusterRendering>,
    placeholder: Option<&'static str>,
    cursor: Option<PointCursor>,
}

impl Default for ClusterVisualization {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterVisualization {
    /// A failed refresh replaces the chart with a message.
    pub const FAILURE_POLICY: FailurePolicy = FailurePolicy::Placeholder;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Slot::new("cluster-chart"),
            placeholder: None,
            cursor: None,
        }
    }

    pub async fn fetch(api: &dyn DashboardApi) -> Result<ClusteringResponse, ApiError> {
        api.clustering().await
    }

    /// Redraw from a clustering outcome.
    ///
    /// Returns the id of the new chart; `None` when a placeholder is shown
    /// instead. Either way the previous chart is gone afterwards.
    pub fn apply(&mut self, outcome: Result<ClusteringResponse, ApiError>) -> Option<RenderId> {
        self.cursor = None;
        match outcome {
            Ok(response) => {
                let set = ClusterSet::from(response);
                if set.is_empty() {
                    tracing::info!("clustering returned no points");
                    self.show_placeholder(EMPTY_MESSAGE);
                    return None;
                }
                tracing::debug!(
                    points = set.points().len(),
                    clusters = set.n_clusters(),
                    "rendering cluster chart"
                );
                self.placeholder = None;
                Some(self.slot.replace_with(|| ClusterRendering {
                    chart: build_scatter(&set),
                    set,
                }))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    policy = ?Self::FAILURE_POLICY,
                    "clustering fetch failed"
                );
                self.show_placeholder(FAILURE_MESSAGE);
                None
            }
        }
    }

    fn show_placeholder(&mut self, message: &'static str) {
        self.slot.clear();
        self.placeholder = Some(message);
    }

    #[must_use]
    pub fn chart(&self) -> Option<&ScatterChartModel> {
        self.slot.current().map(|r| &r.chart)
    }

    #[must_use]
    pub fn set(&self) -> Option<&ClusterSet> {
        self.slot.current().map(|r| &r.set)
    }

    #[must_use]
    pub const fn placeholder(&self) -> Option<&'static str> {
        self.placeholder
    }

    #[must_use]
    pub const fn slot(&self) -> &Slot<ClusterRendering> {
        &self.slot
    }

    /// Source record for a rendered coordinate, if any point is within
    /// tolerance.
    #[must_use]
    pub fn lookup(&self, x: f64, y: f64) -> Option<&ClusterPoint> {
        self.set()?.lookup(x, y)
    }

    /// Tooltip excerpt for a rendered coordinate.
    #[must_use]
    pub fn tooltip(&self, x: f64, y: f64) -> Option<String> {
        self.lookup(x, y).map(|p| excerpt_label(&p.text))
    }

    /// Tooltip excerpt for the point at `(series, index)` of the chart.
    #[must_use]
    pub fn tooltip_at(&self, cursor: PointCursor) -> Option<String> {
        let rendering = self.slot.current()?;
        let series = rendering.chart.series.get(cursor.series)?;
        let &(x, y) = series.coords.get(cursor.index)?;
        let id = series.ids.get(cursor.index).and_then(Option::as_ref);
        rendering
            .set
            .locate(id, x, y)
            .map(|p| excerpt_label(&p.text))
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<PointCursor> {
        self.cursor
    }

    /// Coordinate under the cursor.
    #[must_use]
    pub fn cursor_coords(&self) -> Option<(f64, f64)> {
        let cursor = self.cursor?;
        self.chart()?
            .series
            .get(cursor.series)?
            .coords
            .get(cursor.index)
            .copied()
    }

    /// Excerpt of the point under the cursor.
    #[must_use]
    pub fn inspected(&self) -> Option<String> {
        self.tooltip_at(self.cursor?)
    }

    /// Move the cursor to the next rendered point, wrapping at the end.
    pub fn cursor_next(&mut self) -> Option<PointCursor> {
        let positions = self.positions();
        let next = match self.cursor.and_then(|c| positions.iter().position(|p| *p == c)) {
            Some(i) => positions.get((i + 1) % positions.len()).copied(),
            None => positions.first().copied(),
        };
        self.cursor = next;
        next
    }

    /// Move the cursor to the previous rendered point, wrapping at the start.
    pub fn cursor_prev(&mut self) -> Option<PointCursor> {
        let positions = self.positions();
        let prev = match self.cursor.and_then(|c| positions.iter().position(|p| *p == c)) {
            Some(0) | None => positions.last().copied(),
            Some(i) => positions.get(i - 1).copied(),
        };
        self.cursor = prev;
        prev
    }

    /// Every rendered point in series order.
    fn positions(&self) -> Vec<PointCursor> {
        self.chart()
            .map(|chart| {
                chart
                    .series
                    .iter()
                    .enumerate()
                    .flat_map(|(series, s)| {
                        (0..s.len()).map(move |index| PointCursor { series, index })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClusterPointPayload;
    use crate::render::CHART_PALETTE;

    fn response() -> ClusteringResponse {
        let point = |x: f64, y: f64, cluster: i64, text: &str| ClusterPointPayload {
            x: Some(x),
            y: Some(y),
            cluster,
            text: text.to_string(),
            id: None,
        };
        ClusteringResponse {
            points: vec![
                point(0.1, 0.2, 0, "AC not working"),
                point(0.5, -0.3, 2, "Train late"),
                point(0.7, 0.7, 0, "Food was cold"),
            ],
            n_clusters: Some(4),
        }
    }

    #[test]
    fn test_series_per_declared_cluster() {
        let chart = build_scatter(&ClusterSet::from(response()));
        assert_eq!(chart.series.len(), 4);
        assert_eq!(chart.series[0].label, "Cluster 1");
        assert_eq!(chart.series[0].len(), 2);
        assert!(chart.series[1].is_empty());
        assert!(chart.series[3].is_empty());
        assert_eq!(chart.series[2].stroke, CHART_PALETTE[2]);
        assert_eq!(chart.series[2].fill.alpha, 0x99);
        assert_eq!(chart.series[2].point_radius, 6);
        assert_eq!(chart.series[2].stroke_width, 1);
        assert_eq!((chart.x_title.as_str(), chart.y_title.as_str()), ("PC1", "PC2"));
    }

    #[test]
    fn test_empty_points_show_placeholder_and_no_chart() {
        let mut view = ClusterVisualization::new();
        view.apply(Ok(response()));
        assert!(view.chart().is_some());

        let id = view.apply(Ok(ClusteringResponse::default()));
        assert!(id.is_none());
        assert!(view.chart().is_none());
        assert_eq!(view.slot().live_count(), 0);
        assert_eq!(view.placeholder(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn test_failure_disposes_chart() {
        let mut view = ClusterVisualization::new();
        view.apply(Ok(response()));
        view.apply(Err(ApiError::transport("refused")));
        assert!(view.chart().is_none());
        assert_eq!(view.placeholder(), Some(FAILURE_MESSAGE));

        view.apply(Ok(response()));
        assert_eq!(view.placeholder(), None);
        assert_eq!(view.slot().live_count(), 1);
    }

    #[test]
    fn test_tooltip_from_rendered_coordinate() {
        let mut view = ClusterVisualization::new();
        view.apply(Ok(response()));
        assert_eq!(view.tooltip(0.5 + 5e-6, -0.3).as_deref(), Some("Train late…"));
        assert_eq!(view.tooltip(0.5 + 5e-5, -0.3), None);
    }

    #[test]
    fn test_cursor_walks_series_in_order() {
        let mut view = ClusterVisualization::new();
        view.apply(Ok(response()));

        assert_eq!(view.inspected(), None);
        view.cursor_next();
        assert_eq!(view.inspected().as_deref(), Some("AC not working…"));
        view.cursor_next();
        assert_eq!(view.inspected().as_deref(), Some("Food was cold…"));
        view.cursor_next();
        assert_eq!(view.inspected().as_deref(), Some("Train late…"));
        assert_eq!(view.cursor_coords(), Some((0.5, -0.3)));
        view.cursor_next();
        assert_eq!(view.inspected().as_deref(), Some("AC not working…"));
        view.cursor_prev();
        assert_eq!(view.inspected().as_deref(), Some("Train late…"));
    }

    #[test]
    fn test_cursor_without_chart() {
        let mut view = ClusterVisualization::new();
        assert_eq!(view.cursor_next(), None);
        assert_eq!(view.cursor_prev(), None);
    }

    #[test]
    fn test_refresh_resets_cursor() {
        let mut view = ClusterVisualization::new();
        view.apply(Ok(response()));
        view.cursor_next();
        view.apply(Ok(response()));
        assert_eq!(view.cursor(), None);
    }
}
