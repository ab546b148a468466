//! Orchestration of the dashboard components.
//!
//! [`Dashboard`] owns every component. A refresh spawns one task per feed on
//! the current tokio runtime; each task sends a [`DashboardEvent`] back over
//! an unbounded channel when its request completes. The owner drains the
//! channel between frames with [`Dashboard::drain_events`], which routes
//! each completion to exactly the component that issued it.
//!
//! ```ignore
//! let mut dashboard = Dashboard::new(api);
//! dashboard.start();
//! dashboard.run_until_idle().await;
//! assert!(dashboard.connectivity().state().is_connected());
//! ```

mod events;

pub use events::{ActionOutcome, DashboardEvent, Feed, FeedSequencer, UserAction};

use crate::api::DashboardApi;
use crate::model::TrendsSnapshot;
use crate::panels::{
    AggregateChart, CategoryDirectory, ClassificationRequester, ClusterVisualization,
    ConnectivityProbe, MetricsPanel, PendingSubmission,
};
use chrono::{DateTime, Local};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// All dashboard components and the wiring between them and the service.
pub struct Dashboard {
    api: Arc<dyn DashboardApi>,
    tx: UnboundedSender<DashboardEvent>,
    rx: UnboundedReceiver<DashboardEvent>,
    sequencer: FeedSequencer,
    in_flight: usize,
    last_refresh: Option<DateTime<Local>>,

    connectivity: ConnectivityProbe,
    metrics: MetricsPanel,
    category_chart: AggregateChart,
    severity_chart: AggregateChart,
    clusters: ClusterVisualization,
    directory: CategoryDirectory,
    requester: ClassificationRequester,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("base_url", &self.api.base_url())
            .field("in_flight", &self.in_flight)
            .field("last_refresh", &self.last_refresh)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            tx,
            rx,
            sequencer: FeedSequencer::default(),
            in_flight: 0,
            last_refresh: None,
            connectivity: ConnectivityProbe::new(),
            metrics: MetricsPanel::new(),
            category_chart: AggregateChart::category(),
            severity_chart: AggregateChart::severity(),
            clusters: ClusterVisualization::new(),
            directory: CategoryDirectory::new(),
            requester: ClassificationRequester::new(),
        }
    }

    /// Launch every fetch-driven component.
    ///
    /// Must be called from within a tokio runtime. Nothing awaits here; the
    /// results arrive as events.
    pub fn start(&mut self) -> usize {
        tracing::info!(base_url = self.api.base_url(), "starting dashboard");
        self.refresh()
    }

    /// Re-run every feed. Returns the number of requests started.
    ///
    /// The trends feed is fetched once and drives both distribution charts.
    pub fn refresh(&mut self) -> usize {
        let before = self.in_flight;

        let ticket = self.sequencer.issue(Feed::Connectivity);
        self.spawn_with(move |api| async move {
            DashboardEvent::Connectivity(ticket, ConnectivityProbe::fetch(&*api).await)
        });

        let ticket = self.sequencer.issue(Feed::Metrics);
        self.spawn_with(move |api| async move {
            DashboardEvent::Metrics(ticket, MetricsPanel::fetch(&*api).await)
        });

        let ticket = self.sequencer.issue(Feed::Trends);
        self.spawn_with(move |api| async move {
            DashboardEvent::Trends(ticket, AggregateChart::fetch(&*api).await)
        });

        let ticket = self.sequencer.issue(Feed::Clustering);
        self.spawn_with(move |api| async move {
            DashboardEvent::Clustering(ticket, ClusterVisualization::fetch(&*api).await)
        });

        let ticket = self.sequencer.issue(Feed::Categories);
        self.spawn_with(move |api| async move {
            DashboardEvent::Categories(
                ticket,
                CategoryDirectory::fetch_categories(&*api).await,
            )
        });

        let ticket = self.sequencer.issue(Feed::SeverityLevels);
        self.spawn_with(move |api| async move {
            DashboardEvent::SeverityLevels(
                ticket,
                CategoryDirectory::fetch_severity_levels(&*api).await,
            )
        });

        self.last_refresh = Some(Local::now());
        self.in_flight - before
    }

    /// Spawn a request task that reports back through the event channel.
    fn spawn_with<F, Fut>(&mut self, task: F)
    where
        F: FnOnce(Arc<dyn DashboardApi>) -> Fut,
        Fut: Future<Output = DashboardEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        let fut = task(Arc::clone(&self.api));
        self.in_flight += 1;
        tokio::spawn(async move {
            let event = fut.await;
            if tx.send(event).is_err() {
                tracing::debug!("dashboard dropped before request completed");
            }
        });
    }

    /// Handle an operator action.
    pub fn handle(&mut self, action: UserAction) -> ActionOutcome {
        match action {
            UserAction::Submit => match self.requester.begin_submit() {
                Ok(PendingSubmission { ticket, request }) => {
                    self.spawn_with(move |api| async move {
                        DashboardEvent::Analyzed(
                            ticket,
                            ClassificationRequester::send(&*api, &request).await,
                        )
                    });
                    ActionOutcome::Submitted(ticket)
                }
                Err(rejection) => ActionOutcome::Rejected(rejection),
            },
            UserAction::Clear => {
                self.requester.clear();
                ActionOutcome::Cleared
            }
            UserAction::Refresh => ActionOutcome::Refreshing(self.refresh()),
            UserAction::Edit(edit) => {
                self.requester.edit(edit);
                ActionOutcome::Edited
            }
            UserAction::InspectNext => {
                self.clusters.cursor_next();
                ActionOutcome::Inspected(self.clusters.inspected())
            }
            UserAction::InspectPrevious => {
                self.clusters.cursor_prev();
                ActionOutcome::Inspected(self.clusters.inspected())
            }
        }
    }

    /// Route one completion to its component.
    ///
    /// Returns `false` when the completion was stale and ignored.
    pub fn apply(&mut self, event: DashboardEvent) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if let Some(feed) = event.feed() {
            if !self.sequencer.accept(feed, event.ticket()) {
                tracing::debug!(
                    feed = feed.name(),
                    ticket = %event.ticket(),
                    "dropping stale response"
                );
                return false;
            }
        }

        match event {
            DashboardEvent::Connectivity(_, outcome) => {
                self.connectivity.apply(outcome);
            }
            DashboardEvent::Metrics(_, outcome) => {
                self.metrics.apply(outcome);
            }
            DashboardEvent::Trends(_, outcome) => {
                let snapshot = outcome.map(TrendsSnapshot::from);
                self.category_chart.apply(&snapshot);
                self.severity_chart.apply(&snapshot);
            }
            DashboardEvent::Clustering(_, outcome) => {
                self.clusters.apply(outcome);
            }
            DashboardEvent::Categories(_, outcome) => self.directory.apply_categories(outcome),
            DashboardEvent::SeverityLevels(_, outcome) => {
                self.directory.apply_severity_levels(outcome);
            }
            DashboardEvent::Analyzed(ticket, outcome) => {
                return self.requester.complete(ticket, outcome);
            }
        }
        true
    }

    /// Apply every completion that has already arrived, without waiting.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for and apply completions until no request is in flight.
    pub async fn run_until_idle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(event) => {
                    self.apply(event);
                }
                None => break,
            }
        }
    }

    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    #[must_use]
    pub const fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    #[must_use]
    pub const fn connectivity(&self) -> &ConnectivityProbe {
        &self.connectivity
    }

    #[must_use]
    pub const fn metrics(&self) -> &MetricsPanel {
        &self.metrics
    }

    #[must_use]
    pub const fn category_chart(&self) -> &AggregateChart {
        &self.category_chart
    }

    #[must_use]
    pub const fn severity_chart(&self) -> &AggregateChart {
        &self.severity_chart
    }

    #[must_use]
    pub const fn clusters(&self) -> &ClusterVisualization {
        &self.clusters
    }

    #[must_use]
    pub const fn directory(&self) -> &CategoryDirectory {
        &self.directory
    }

    #[must_use]
    pub const fn requester(&self) -> &ClassificationRequester {
        &self.requester
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        AnalyzeResponse, CategoryCount, ClusterPointPayload, ClusteringResponse, MetricsResponse,
        SeverityCount, StubApi, StubResponses, TrendsResponse,
    };
    use crate::error::ApiError;
    use crate::panels::{cluster, ConnectionState, InputEdit, SubmitRejection};

    fn trends() -> TrendsResponse {
        TrendsResponse {
            by_category: vec![CategoryCount {
                category: "billing_issue".to_string(),
                count: 5,
            }],
            by_severity: vec![SeverityCount {
                severity: "high".to_string(),
                count: 2,
            }],
        }
    }

    fn clustering() -> ClusteringResponse {
        ClusteringResponse {
            points: vec![
                ClusterPointPayload {
                    x: Some(0.5),
                    y: Some(-1.0),
                    cluster: 0,
                    text: "Coach was dirty".to_string(),
                    id: None,
                },
                ClusterPointPayload {
                    x: Some(2.0),
                    y: Some(1.5),
                    cluster: 1,
                    text: "Refund not processed".to_string(),
                    id: None,
                },
            ],
            n_clusters: Some(2),
        }
    }

    fn dashboard_with(responses: StubResponses) -> (Dashboard, Arc<StubApi>) {
        let api = Arc::new(StubApi::new(responses));
        (Dashboard::new(api.clone()), api)
    }

    #[tokio::test]
    async fn test_start_fetches_every_feed_once() {
        let (mut dashboard, api) = dashboard_with(StubResponses::default());
        assert_eq!(dashboard.start(), 6);
        assert_eq!(dashboard.in_flight(), 6);
        dashboard.run_until_idle().await;

        let calls = api.calls();
        assert_eq!(calls.ping, 1);
        assert_eq!(calls.metrics, 1);
        assert_eq!(calls.trends, 1, "both charts share one trends request");
        assert_eq!(calls.clustering, 1);
        assert_eq!(calls.categories, 1);
        assert_eq!(calls.severity_levels, 1);
        assert_eq!(calls.analyze, 0);
        assert_eq!(dashboard.in_flight(), 0);
        assert!(dashboard.last_refresh().is_some());
    }

    #[tokio::test]
    async fn test_one_failing_feed_leaves_the_others_alone() {
        let (mut dashboard, _api) = dashboard_with(StubResponses {
            trends: Ok(trends()),
            metrics: Err(ApiError::status(500, None)),
            ..StubResponses::default()
        });
        dashboard.start();
        dashboard.run_until_idle().await;

        assert_eq!(dashboard.connectivity().state(), ConnectionState::Connected);
        assert_eq!(dashboard.metrics().display().category_accuracy, "—");
        assert!(dashboard.category_chart().current().is_some());
        assert!(dashboard.severity_chart().current().is_some());
    }

    #[tokio::test]
    async fn test_failed_trends_refresh_keeps_previous_charts() {
        let (mut dashboard, api) = dashboard_with(StubResponses {
            trends: Ok(trends()),
            ..StubResponses::default()
        });
        dashboard.start();
        dashboard.run_until_idle().await;
        let before = dashboard.category_chart().current().cloned();

        api.update(|r| r.trends = Err(ApiError::transport("connection reset")));
        dashboard.refresh();
        dashboard.run_until_idle().await;

        assert_eq!(dashboard.category_chart().current().cloned(), before);
        assert_eq!(dashboard.category_chart().slot().generation(), 1);
        assert!(dashboard.category_chart().last_error().is_some());
    }

    #[tokio::test]
    async fn test_failed_clustering_refresh_shows_placeholder() {
        let (mut dashboard, api) = dashboard_with(StubResponses {
            clustering: Ok(clustering()),
            ..StubResponses::default()
        });
        dashboard.start();
        dashboard.run_until_idle().await;
        assert!(dashboard.clusters().chart().is_some());

        api.update(|r| r.clustering = Err(ApiError::status(500, None)));
        dashboard.refresh();
        dashboard.run_until_idle().await;

        assert!(dashboard.clusters().chart().is_none());
        assert_eq!(
            dashboard.clusters().placeholder(),
            Some(cluster::FAILURE_MESSAGE)
        );
        assert_eq!(dashboard.clusters().slot().live_count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_refresh_keeps_one_live_rendering_per_slot() {
        let (mut dashboard, _api) = dashboard_with(StubResponses {
            trends: Ok(trends()),
            clustering: Ok(clustering()),
            ..StubResponses::default()
        });
        dashboard.start();
        for _ in 0..4 {
            dashboard.refresh();
        }
        dashboard.run_until_idle().await;

        assert_eq!(dashboard.category_chart().slot().live_count(), 1);
        assert_eq!(dashboard.severity_chart().slot().live_count(), 1);
        assert_eq!(dashboard.clusters().slot().live_count(), 1);
        assert_eq!(dashboard.connectivity().slot().live_count(), 1);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let (mut dashboard, _api) = dashboard_with(StubResponses::default());
        let older = dashboard.sequencer.issue(Feed::Connectivity);
        let newer = dashboard.sequencer.issue(Feed::Connectivity);

        assert!(dashboard.apply(DashboardEvent::Connectivity(newer, Ok(()))));
        assert!(!dashboard.apply(DashboardEvent::Connectivity(
            older,
            Err(ApiError::transport("connection refused")),
        )));
        assert_eq!(dashboard.connectivity().state(), ConnectionState::Connected);
    }

    #[test]
    fn test_feeds_are_sequenced_independently() {
        let (mut dashboard, _api) = dashboard_with(StubResponses::default());
        let metrics = dashboard.sequencer.issue(Feed::Metrics);
        let _later_ping = dashboard.sequencer.issue(Feed::Connectivity);

        assert!(dashboard.apply(DashboardEvent::Metrics(
            metrics,
            Ok(MetricsResponse::default())
        )));
    }

    #[tokio::test]
    async fn test_empty_submission_sends_nothing() {
        let (mut dashboard, api) = dashboard_with(StubResponses::default());
        dashboard.handle(UserAction::Edit(InputEdit::Replace("   ".to_string())));

        assert_eq!(
            dashboard.handle(UserAction::Submit),
            ActionOutcome::Rejected(SubmitRejection::EmptyInput)
        );
        dashboard.run_until_idle().await;
        assert_eq!(api.calls().analyze, 0);
        assert_eq!(
            dashboard.requester().view().error(),
            Some("Please enter complaint text.")
        );
    }

    #[tokio::test]
    async fn test_submission_sends_trimmed_text() {
        let (mut dashboard, api) = dashboard_with(StubResponses {
            analyze: Ok(AnalyzeResponse {
                category: "service_delay".to_string(),
                severity: "critical".to_string(),
                cluster_id: Some(2),
            }),
            ..StubResponses::default()
        });
        dashboard.handle(UserAction::Edit(InputEdit::Replace(
            "  Train delayed by 3 hours \n".to_string(),
        )));
        assert!(matches!(
            dashboard.handle(UserAction::Submit),
            ActionOutcome::Submitted(_)
        ));
        assert!(dashboard.requester().is_busy());
        assert_eq!(
            dashboard.handle(UserAction::Submit),
            ActionOutcome::Rejected(SubmitRejection::Busy)
        );

        dashboard.run_until_idle().await;
        assert!(!dashboard.requester().is_busy());
        assert_eq!(api.analyzed_texts(), ["Train delayed by 3 hours"]);
        let result = dashboard.requester().view().result().unwrap();
        assert_eq!(result.cluster_label(), "Cluster #3");
    }

    #[tokio::test]
    async fn test_clear_while_analyzing_hides_late_result() {
        let (mut dashboard, _api) = dashboard_with(StubResponses::default());
        dashboard.handle(UserAction::Edit(InputEdit::Replace("AC not working".to_string())));
        dashboard.handle(UserAction::Submit);
        assert_eq!(dashboard.handle(UserAction::Clear), ActionOutcome::Cleared);

        dashboard.run_until_idle().await;
        assert_eq!(dashboard.requester().input(), "");
        assert!(dashboard.requester().view().result().is_none());
        assert!(dashboard.requester().view().error().is_none());
        assert!(!dashboard.requester().is_busy());
    }

    #[tokio::test]
    async fn test_inspect_cycles_through_points() {
        let (mut dashboard, _api) = dashboard_with(StubResponses {
            clustering: Ok(clustering()),
            ..StubResponses::default()
        });
        dashboard.start();
        dashboard.run_until_idle().await;

        assert_eq!(
            dashboard.handle(UserAction::InspectNext),
            ActionOutcome::Inspected(Some("Coach was dirty…".to_string()))
        );
        assert_eq!(
            dashboard.handle(UserAction::InspectNext),
            ActionOutcome::Inspected(Some("Refund not processed…".to_string()))
        );
    }
}
