use anyhow::Context;
use arguments::Arguments;
use clap::Parser;
use parking_dashboard::{
    backend::HttpBackend, channel::WsConnector, render, Dashboard, Page,
};
use std::path::PathBuf;

mod arguments;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args = Arguments::parse();
    let config = args.config()?;

    let backend = HttpBackend::new(config.base_url()?, config.request_timeout)
        .context("Failed to build HTTP client")?;
    let connector = WsConnector::new(config.push_url()?, config.request_timeout);
    tracing::info!(
        "Syncing {:?} view from {} (live updates on {})",
        config.view,
        config.base_url,
        config.push_url()?
    );

    let dashboard = Dashboard::new(&config, backend, connector);
    let cancel = dashboard.cancellation();
    let page = dashboard.page();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down");
        }
        cancel.cancel();
    });

    let writer = args.snapshot.map(|path| tokio::spawn(write_snapshots(page, path)));

    dashboard.run().await;

    if let Some(writer) = writer {
        writer.abort();
    }
    Ok(())
}

/// Rewrites `path` with the whole page after every change.
async fn write_snapshots(page: Page, path: PathBuf) -> anyhow::Result<()> {
    let mut revisions = page.subscribe();
    while revisions.changed().await.is_ok() {
        let revision = *revisions.borrow_and_update();
        let html = render::document(&page.snapshot());
        if let Err(e) = tokio::fs::write(&path, html)
            .await
            .with_context(|| format!("Failed to write snapshot {}", path.display()))
        {
            tracing::warn!("{e:#}");
            continue;
        }
        tracing::debug!("Wrote revision {revision} to {}", path.display());
    }
    Ok(())
}
