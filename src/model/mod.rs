//! Display-side data model.
//!
//! The wire types in [`crate::api::types`] are decoded leniently. This module
//! turns them into the shapes the components render from, applying the
//! display rules that are independent of any rendering surface: placeholders
//! for absent numbers, human-readable labels, cluster grouping and
//! coordinate lookup.

mod classification;
mod clustering;
mod labels;
mod metrics;
mod trends;

pub use classification::{ClassificationResult, Severity};
pub use clustering::{
    excerpt_label, ClusterPoint, ClusterSet, DEFAULT_CLUSTER_COUNT, EXCERPT_WIDTH,
    LOOKUP_TOLERANCE,
};
pub use labels::humanize;
pub use metrics::{format_percent, AxisMetrics, MetricsSnapshot, PLACEHOLDER};
pub use trends::{AggregateSample, TrendsSnapshot};
