use crate::{
    backend::Backend,
    error::SyncError,
    poller::{Job, Refresher},
};
use futures::{
    future::{BoxFuture, FutureExt},
    stream::{BoxStream, StreamExt},
    Stream,
};
use parking_codecs::push::PushMessage;
use reqwest::Url;
use std::{ops::ControlFlow, time::Duration};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_util::sync::CancellationToken;

pub type Frames = BoxStream<'static, Result<Message, tungstenite::Error>>;

/// Opens the live-update connection.
pub trait Connector: Send + Sync + 'static {
    fn connect(&self) -> BoxFuture<'_, Result<Frames, SyncError>>;
}

#[derive(Debug, Clone)]
pub struct WsConnector {
    url: Url,
    timeout: Duration,
}

impl WsConnector {
    /// `timeout` bounds the TCP connect and the upgrade handshake together.
    pub fn new(url: Url, timeout: Duration) -> Self {
        Self { url, timeout }
    }
}

impl Connector for WsConnector {
    fn connect(&self) -> BoxFuture<'_, Result<Frames, SyncError>> {
        async move {
            let handshake = tokio_tungstenite::connect_async(self.url.as_str());
            let (stream, _response) = tokio::time::timeout(self.timeout, handshake)
                .await
                .map_err(|e| SyncError::transport(self.url.as_str(), e))?
                .map_err(|e| SyncError::transport(self.url.as_str(), e))?;
            // Pings are answered by tungstenite while the stream is being read.
            Ok(stream.boxed())
        }
        .boxed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh(&'static [Job]),
    ShowPlate(String),
}

pub fn push_action(msg: PushMessage) -> Action {
    match msg {
        PushMessage::VehicleUpdate => Action::Refresh(&[Job::Vehicles, Job::Statistics]),
        PushMessage::UnauthorizedExit => {
            Action::Refresh(&[Job::UnauthorizedExits, Job::Statistics])
        }
        PushMessage::PlateDetected { plate_number } => Action::ShowPlate(plate_number),
    }
}

/// Handles one text frame. Refreshes run as their own tasks; the returned
/// jobs are the ones that were started.
pub fn handle_frame<B: Backend>(
    text: &str,
    refresher: &Refresher<B>,
    cancel: &CancellationToken,
) -> Vec<Job> {
    let msg = match PushMessage::parse(text) {
        Ok(Some(msg)) => msg,
        Ok(None) => {
            tracing::trace!("Ignoring push message {text}");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("Dropping push frame: {e}");
            return Vec::new();
        }
    };
    tracing::debug!("Received {msg:?}");

    let jobs: &[Job] = match push_action(msg) {
        Action::Refresh(jobs) => jobs,
        Action::ShowPlate(plate_number) => {
            if refresher.show_detected_plate(&plate_number) {
                tracing::info!("Detected plate {plate_number}");
            }
            &[Job::ActivityFeed]
        }
    };
    let mut started = Vec::with_capacity(jobs.len());
    for job in jobs.iter().copied().filter(|job| refresher.mounts(*job)) {
        refresher.spawn(job, cancel);
        started.push(job);
    }
    started
}

/// Reads frames until the connection closes (`Continue`) or `cancel` fires
/// (`Break`).
pub async fn run_connection<S, B>(
    mut frames: S,
    refresher: &Refresher<B>,
    cancel: &CancellationToken,
) -> ControlFlow<()>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    B: Backend,
{
    loop {
        let frame = tokio::select! {
            _ = cancel.cancelled() => return ControlFlow::Break(()),
            frame = frames.next() => frame,
        };
        match frame {
            Some(Ok(Message::Text(text))) => {
                handle_frame(&text, refresher, cancel);
            }
            Some(Ok(Message::Close(frame))) => {
                tracing::info!("Live updates closed by server: {frame:?}");
                return ControlFlow::Continue(());
            }
            Some(Ok(Message::Binary(data))) => {
                tracing::debug!("Ignoring {} byte binary frame", data.len());
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                tracing::warn!("Live updates failed: {e}");
                return ControlFlow::Continue(());
            }
            None => {
                tracing::info!("Live updates stream ended");
                return ControlFlow::Continue(());
            }
        }
    }
}
