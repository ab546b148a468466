//! Dashboard components.
//!
//! Each component owns one feed and its visual region. The fetch half is an
//! associated `async fn` that only talks to the [`DashboardApi`]; the apply
//! half is a synchronous method that turns the outcome into display state.
//! Splitting them lets the orchestrator run every fetch concurrently while
//! all display state stays on the UI task, and lets tests drive `apply`
//! without a runtime.
//!
//! [`DashboardApi`]: crate::api::DashboardApi

pub mod aggregate;
pub mod classify;
pub mod cluster;
pub mod connectivity;
pub mod directory;
pub mod metrics;

pub use aggregate::{
    build_category_chart, build_severity_chart, AggregateChart, AggregateKind, AggregateRendering,
};
pub use classify::{
    ClassificationRequester, InputEdit, PendingSubmission, RequesterView, SubmitRejection,
};
pub use cluster::{build_scatter, ClusterRendering, ClusterVisualization, PointCursor};
pub use connectivity::{ConnectionState, ConnectivityProbe, StatusIndicator};
pub use directory::{CategoryDirectory, DirectoryList};
pub use metrics::{MetricsDisplay, MetricsPanel};

/// Identifies one request so its completion can be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tickets for one feed and decides which completions still count.
///
/// A completion is accepted only if it is newer than every completion
/// accepted before it, so a slow response from an earlier refresh can never
/// overwrite a faster response from a later one.
#[derive(Debug, Default, Clone)]
pub struct TicketCounter {
    issued: u64,
    floor: u64,
}

impl TicketCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: 0,
            floor: 0,
        }
    }

    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Accept a completion. Returns `false` for stale or unknown tickets.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if ticket.0 > self.floor && ticket.0 <= self.issued {
            self.floor = ticket.0;
            true
        } else {
            false
        }
    }

    /// Reject every ticket issued so far.
    pub fn invalidate(&mut self) {
        self.floor = self.issued;
    }

    /// Most recently issued ticket.
    #[must_use]
    pub const fn latest(&self) -> Option<Ticket> {
        if self.issued == 0 {
            None
        } else {
            Some(Ticket(self.issued))
        }
    }

    /// Whether some issued ticket can still be accepted.
    #[must_use]
    pub const fn has_outstanding(&self) -> bool {
        self.issued > self.floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_completions() {
        let mut counter = TicketCounter::new();
        let first = counter.issue();
        assert!(counter.accept(first));
        let second = counter.issue();
        assert!(counter.accept(second));
        assert!(!counter.has_outstanding());
    }

    #[test]
    fn test_stale_completion_rejected() {
        let mut counter = TicketCounter::new();
        let first = counter.issue();
        let second = counter.issue();
        assert!(counter.accept(second));
        assert!(!counter.accept(first));
        assert!(!counter.accept(second), "a ticket is accepted once");
    }

    #[test]
    fn test_invalidate_rejects_outstanding() {
        let mut counter = TicketCounter::new();
        let ticket = counter.issue();
        assert!(counter.has_outstanding());
        counter.invalidate();
        assert!(!counter.accept(ticket));

        let fresh = counter.issue();
        assert!(counter.accept(fresh));
        assert_eq!(counter.latest(), Some(fresh));
    }

    #[test]
    fn test_unknown_ticket_rejected() {
        let mut counter = TicketCounter::new();
        assert_eq!(counter.latest(), None);
        assert!(!counter.accept(Ticket(5)));
    }
}
