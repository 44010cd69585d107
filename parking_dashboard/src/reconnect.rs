use crate::{
    backend::Backend,
    channel::{self, Connector},
    poller::Refresher,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Keeps the live-update channel open: after every close, failed connect or
/// socket error it waits `delay` and connects again, until cancelled.
pub struct Reconnector<C> {
    connector: C,
    delay: Duration,
}

impl<C: Connector> Reconnector<C> {
    pub fn new(connector: C, delay: Duration) -> Self {
        Self { connector, delay }
    }

    pub async fn run<B: Backend>(self, refresher: Refresher<B>, cancel: CancellationToken) {
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            let connected = tokio::select! {
                _ = cancel.cancelled() => break,
                connected = self.connector.connect() => connected,
            };
            match connected {
                Ok(frames) => {
                    tracing::info!("Live updates connected (attempt {attempt})");
                    if channel::run_connection(frames, &refresher, &cancel)
                        .await
                        .is_break()
                    {
                        break;
                    }
                }
                Err(e) => tracing::warn!("Live updates unavailable: {e}"),
            }

            tracing::info!("Reconnecting live updates in {:?}", self.delay);
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.delay) => {}
            }
        }
        tracing::debug!("Reconnector stopped after {attempt} attempt(s)");
    }
}
