use crate::{
    backend::Backend,
    channel::Connector,
    config::Config,
    page::Page,
    poller::{self, Job, Refresher},
    reconnect::Reconnector,
    view::View,
};
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

/// The client: owns the page, the pollers and the live-update channel.
pub struct Dashboard<B, C> {
    view: View,
    schedule: Vec<(Job, Duration)>,
    reconnect_delay: Duration,
    refresher: Refresher<B>,
    connector: C,
    cancel: CancellationToken,
}

/// Which job runs at which cadence for a view.
pub fn schedule(view: View, config: &Config) -> Vec<(Job, Duration)> {
    match view {
        View::Dashboard => vec![
            (Job::Statistics, config.stats_interval),
            (Job::Vehicles, config.table_interval),
            (Job::UnauthorizedExits, config.table_interval),
        ],
        View::Main => vec![
            (Job::Statistics, config.stats_interval),
            (Job::ActivityFeed, config.table_interval),
        ],
    }
}

impl<B: Backend, C: Connector> Dashboard<B, C> {
    pub fn new(config: &Config, backend: B, connector: C) -> Self {
        let page = Page::new(config.view.containers().iter().copied());
        Self {
            view: config.view,
            schedule: schedule(config.view, config),
            reconnect_delay: config.reconnect_delay,
            refresher: Refresher::new(backend, page, config.render_options()),
            connector,
            cancel: CancellationToken::new(),
        }
    }

    pub fn page(&self) -> Page {
        self.refresher.page().clone()
    }

    /// Cancelling this token shuts the client down.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Starts one run of every scheduled job without waiting for any of them.
    pub fn bootstrap(&self) -> Vec<JoinHandle<()>> {
        tracing::info!("Loading {:?} view", self.view);
        self.schedule
            .iter()
            .map(|(job, _)| self.refresher.spawn(*job, &self.cancel))
            .collect()
    }

    /// Bootstraps, then polls and listens until cancelled. The live-update
    /// channel opens right away, even while the first fetches are in flight.
    pub async fn run(self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.bootstrap();

        let Self {
            schedule,
            reconnect_delay,
            refresher,
            connector,
            cancel,
            ..
        } = self;

        let mut tasks = JoinSet::new();
        for (job, period) in schedule {
            tracing::debug!("Polling {job:?} every {period:?}");
            tasks.spawn(poller::poll(refresher.clone(), job, period, cancel.clone()));
        }

        Reconnector::new(connector, reconnect_delay)
            .run(refresher, cancel)
            .await;

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Poller task failed: {e}");
            }
        }
        tracing::info!("Dashboard stopped");
    }
}
