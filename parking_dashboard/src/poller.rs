use crate::{
    backend::Backend,
    error::SyncError,
    page::{Container, Page},
    render::{self, RenderOptions},
};
use parking_codecs::{
    envelope::{decode, Envelope, ExitsEnvelope, StatisticsEnvelope, VehiclesEnvelope},
    STATISTICS_PATH, UNAUTHORIZED_EXITS_PATH, VEHICLES_PATH,
};
use std::{sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::Instant};
use tokio_util::sync::CancellationToken;

/// One fetch-and-render unit, shared by the timers and the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    Statistics,
    Vehicles,
    UnauthorizedExits,
    ActivityFeed,
}

impl Job {
    pub fn endpoint(self) -> &'static str {
        match self {
            Job::Statistics => STATISTICS_PATH,
            Job::Vehicles | Job::ActivityFeed => VEHICLES_PATH,
            Job::UnauthorizedExits => UNAUTHORIZED_EXITS_PATH,
        }
    }

    pub fn targets(self) -> &'static [Container] {
        match self {
            Job::Statistics => &[
                Container::TotalVehicles,
                Container::CurrentVehicles,
                Container::TotalRevenue,
                Container::UnauthorizedExits,
            ],
            Job::Vehicles => &[Container::VehiclesTable],
            Job::UnauthorizedExits => &[Container::UnauthorizedExitsTable],
            Job::ActivityFeed => &[Container::ActivityFeed],
        }
    }
}

/// Runs jobs against a backend and commits the results to a page.
pub struct Refresher<B> {
    backend: Arc<B>,
    page: Page,
    options: Arc<RenderOptions>,
}

impl<B> Clone for Refresher<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            page: self.page.clone(),
            options: Arc::clone(&self.options),
        }
    }
}

impl<B: Backend> Refresher<B> {
    pub fn new(backend: B, page: Page, options: RenderOptions) -> Self {
        Self {
            backend: Arc::new(backend),
            page,
            options: Arc::new(options),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn mounts(&self, job: Job) -> bool {
        job.targets().iter().any(|c| self.page.is_mounted(*c))
    }

    /// Fetches, renders and commits. Returns the number of containers written.
    pub async fn refresh(&self, job: Job) -> Result<usize, SyncError> {
        let ticket = self.page.begin(job.targets());
        if ticket.is_empty() {
            return Ok(0);
        }
        let endpoint = job.endpoint();
        let body = self.backend.get(endpoint).await?;
        let options = &*self.options;
        let writes = match job {
            Job::Statistics => {
                render::statistics(&payload::<StatisticsEnvelope>(endpoint, &body)?, options)
            }
            Job::Vehicles => vec![(
                Container::VehiclesTable,
                render::vehicles_table(&payload::<VehiclesEnvelope>(endpoint, &body)?, options),
            )],
            Job::UnauthorizedExits => vec![(
                Container::UnauthorizedExitsTable,
                render::exits_table(&payload::<ExitsEnvelope>(endpoint, &body)?, options),
            )],
            Job::ActivityFeed => vec![(
                Container::ActivityFeed,
                render::activity_feed(&payload::<VehiclesEnvelope>(endpoint, &body)?, options),
            )],
        };
        Ok(self.page.commit(&ticket, writes))
    }

    /// Like [`Refresher::refresh`], but failures only get logged.
    pub async fn run(&self, job: Job) {
        match self.refresh(job).await {
            Ok(written) => tracing::debug!("{job:?} refreshed {written} container(s)"),
            Err(e) => tracing::warn!("{job:?} refresh failed: {e}"),
        }
    }

    pub fn spawn(&self, job: Job, cancel: &CancellationToken) -> JoinHandle<()> {
        let refresher = self.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => tracing::trace!("{job:?} refresh cancelled"),
                _ = refresher.run(job) => {}
            }
        })
    }

    pub fn show_detected_plate(&self, plate_number: &str) -> bool {
        let ticket = self.page.begin(&[Container::DetectedPlate]);
        let written = self.page.commit(
            &ticket,
            [(Container::DetectedPlate, render::detected_plate(plate_number))],
        );
        written > 0
    }
}

fn payload<E: Envelope>(endpoint: &str, body: &str) -> Result<E::Payload, SyncError> {
    decode::<E>(body).map_err(|e| SyncError::payload(endpoint, e))
}

/// Re-runs `job` every `period` until cancelled. The first tick fires one
/// period from now, since startup runs every job once on its own.
///
/// Each tick runs as its own task, so a slow response never delays the
/// next tick.
pub async fn poll<B: Backend>(
    refresher: Refresher<B>,
    job: Job,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                tracing::trace!("{job:?} tick");
                refresher.spawn(job, &cancel);
            }
        }
    }
    tracing::debug!("Stopped polling {job:?}");
}
