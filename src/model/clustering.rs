//! Projected cluster points and point-to-record correlation.
//!
//! Coordinates come back from the chart layer as rendered values, which are
//! not guaranteed to be bit-identical to the decoded source values. Lookup
//! therefore matches within [`LOOKUP_TOLERANCE`] on both axes. Points may
//! carry a stable id; when they do, id lookup is tried before proximity.

use crate::api::{ClusteringResponse, PointId};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Maximum per-axis distance for a coordinate to identify a point.
pub const LOOKUP_TOLERANCE: f64 = 1e-5;

/// Cluster count used when the service does not report one.
pub const DEFAULT_CLUSTER_COUNT: usize = 3;

/// Display width of an excerpt before the ellipsis.
pub const EXCERPT_WIDTH: usize = 80;

/// One projected record.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPoint {
    pub x: f64,
    pub y: f64,
    pub cluster: i64,
    pub text: String,
    pub id: Option<PointId>,
}

impl ClusterPoint {
    pub fn new(x: f64, y: f64, cluster: i64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            cluster,
            text: text.into(),
            id: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: PointId) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether `(x, y)` is within tolerance of this point on both axes.
    #[must_use]
    pub fn is_near(&self, x: f64, y: f64) -> bool {
        (self.x - x).abs() < LOOKUP_TOLERANCE && (self.y - y).abs() < LOOKUP_TOLERANCE
    }
}

/// The point set of one clustering fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSet {
    points: Vec<ClusterPoint>,
    n_clusters: usize,
}

impl ClusterSet {
    /// Build a set; a missing or zero cluster count falls back to
    /// [`DEFAULT_CLUSTER_COUNT`].
    pub fn new(points: Vec<ClusterPoint>, n_clusters: Option<usize>) -> Self {
        let n_clusters = n_clusters
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CLUSTER_COUNT);
        Self { points, n_clusters }
    }

    #[must_use]
    pub fn points(&self) -> &[ClusterPoint] {
        &self.points
    }

    #[must_use]
    pub const fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Partition the points into exactly `n_clusters` groups, in source
    /// order within each group. Points with an out-of-range index belong to
    /// no group.
    #[must_use]
    pub fn groups(&self) -> Vec<Vec<&ClusterPoint>> {
        let mut groups: Vec<Vec<&ClusterPoint>> = vec![Vec::new(); self.n_clusters];
        for point in &self.points {
            if let Some(group) = usize::try_from(point.cluster)
                .ok()
                .and_then(|c| groups.get_mut(c))
            {
                group.push(point);
            }
        }
        groups
    }

    /// First point (source order) within tolerance of `(x, y)`.
    ///
    /// This is a first-match scan, not a nearest-match search: if two points
    /// lie within tolerance of each other the earlier one wins.
    #[must_use]
    pub fn lookup(&self, x: f64, y: f64) -> Option<&ClusterPoint> {
        self.points.iter().find(|p| p.is_near(x, y))
    }

    /// Id lookup when an id is given and known, proximity lookup otherwise.
    #[must_use]
    pub fn locate(&self, id: Option<&PointId>, x: f64, y: f64) -> Option<&ClusterPoint> {
        id.and_then(|id| self.points.iter().find(|p| p.id.as_ref() == Some(id)))
            .or_else(|| self.lookup(x, y))
    }
}

impl From<ClusteringResponse> for ClusterSet {
    fn from(response: ClusteringResponse) -> Self {
        let received = response.points.len();
        let points: Vec<ClusterPoint> = response
            .points
            .into_iter()
            .filter_map(|p| {
                Some(ClusterPoint {
                    x: p.x?,
                    y: p.y?,
                    cluster: p.cluster,
                    text: p.text,
                    id: p.id,
                })
            })
            .collect();
        if points.len() < received {
            tracing::debug!(
                dropped = received - points.len(),
                "skipped cluster points without coordinates"
            );
        }
        Self::new(points, response.n_clusters)
    }
}

/// Excerpt shown for an inspected point: the text cut to
/// [`EXCERPT_WIDTH`] columns, followed by an ellipsis.
#[must_use]
pub fn excerpt_label(text: &str) -> String {
    let text = text.trim_end();
    if UnicodeWidthStr::width(text) <= EXCERPT_WIDTH {
        return format!("{text}…");
    }

    let mut width = 0;
    let truncated: String = text
        .chars()
        .take_while(|ch| {
            width += UnicodeWidthChar::width(*ch).unwrap_or(0);
            width <= EXCERPT_WIDTH
        })
        .collect();
    format!("{}…", truncated.trim_end())
}
