//! Messages between fetch tasks, the operator and the dashboard.

use crate::api::{
    AnalyzeResponse, CategoriesResponse, ClusteringResponse, MetricsResponse,
    SeverityLevelsResponse, TrendsResponse,
};
use crate::error::ApiError;
use crate::panels::{InputEdit, SubmitRejection, Ticket, TicketCounter};

/// A fetch-driven data feed. Each has its own ticket sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Connectivity,
    Metrics,
    Trends,
    Clustering,
    Categories,
    SeverityLevels,
}

impl Feed {
    pub const ALL: [Self; 6] = [
        Self::Connectivity,
        Self::Metrics,
        Self::Trends,
        Self::Clustering,
        Self::Categories,
        Self::SeverityLevels,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::Metrics => "metrics",
            Self::Trends => "trends",
            Self::Clustering => "clustering",
            Self::Categories => "categories",
            Self::SeverityLevels => "severity-levels",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Keeps one [`TicketCounter`] per feed so a slow response from an earlier
/// refresh is dropped once a later one has landed.
#[derive(Debug, Default)]
pub struct FeedSequencer {
    counters: [TicketCounter; 6],
}

impl FeedSequencer {
    pub fn issue(&mut self, feed: Feed) -> Ticket {
        self.counters[feed.index()].issue()
    }

    pub fn accept(&mut self, feed: Feed, ticket: Ticket) -> bool {
        self.counters[feed.index()].accept(ticket)
    }
}

/// Completion of one spawned request.
#[derive(Debug)]
pub enum DashboardEvent {
    Connectivity(Ticket, Result<(), ApiError>),
    Metrics(Ticket, Result<MetricsResponse, ApiError>),
    Trends(Ticket, Result<TrendsResponse, ApiError>),
    Clustering(Ticket, Result<ClusteringResponse, ApiError>),
    Categories(Ticket, Result<CategoriesResponse, ApiError>),
    SeverityLevels(Ticket, Result<SeverityLevelsResponse, ApiError>),
    Analyzed(Ticket, Result<AnalyzeResponse, ApiError>),
}

impl DashboardEvent {
    /// The feed this completes; `None` for analysis results.
    #[must_use]
    pub const fn feed(&self) -> Option<Feed> {
        match self {
            Self::Connectivity(..) => Some(Feed::Connectivity),
            Self::Metrics(..) => Some(Feed::Metrics),
            Self::Trends(..) => Some(Feed::Trends),
            Self::Clustering(..) => Some(Feed::Clustering),
            Self::Categories(..) => Some(Feed::Categories),
            Self::SeverityLevels(..) => Some(Feed::SeverityLevels),
            Self::Analyzed(..) => None,
        }
    }

    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::Connectivity(t, _)
            | Self::Metrics(t, _)
            | Self::Trends(t, _)
            | Self::Clustering(t, _)
            | Self::Categories(t, _)
            | Self::SeverityLevels(t, _)
            | Self::Analyzed(t, _) => *t,
        }
    }
}

/// Something the operator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Submit,
    Clear,
    Refresh,
    Edit(InputEdit),
    InspectNext,
    InspectPrevious,
}

/// Immediate result of handling a [`UserAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Analysis request sent
    Submitted(Ticket),
    /// Submission not sent
    Rejected(SubmitRejection),
    Cleared,
    /// Number of requests started
    Refreshing(usize),
    Edited,
    /// Excerpt of the newly inspected point
    Inspected(Option<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_indices_are_distinct() {
        let mut seen = [false; 6];
        for feed in Feed::ALL {
            assert!(!seen[feed.index()], "{} reuses an index", feed.name());
            seen[feed.index()] = true;
        }
    }

    #[test]
    fn test_sequencer_is_per_feed() {
        let mut sequencer = FeedSequencer::default();
        let metrics = sequencer.issue(Feed::Metrics);
        let old_trends = sequencer.issue(Feed::Trends);
        let new_trends = sequencer.issue(Feed::Trends);

        assert!(sequencer.accept(Feed::Trends, new_trends));
        assert!(!sequencer.accept(Feed::Trends, old_trends));
        assert!(sequencer.accept(Feed::Metrics, metrics));
    }
}
