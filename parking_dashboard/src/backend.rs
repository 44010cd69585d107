use crate::error::SyncError;
use futures::future::{BoxFuture, FutureExt};
use reqwest::Url;
use std::time::Duration;

/// Read-only access to the parking API.
pub trait Backend: Send + Sync + 'static {
    /// Fetches the raw body served at `path`.
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String, SyncError>>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }
}

impl Backend for HttpBackend {
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String, SyncError>> {
        async move {
            let url = self
                .base_url
                .join(path)
                .map_err(|e| SyncError::transport(path, e))?;
            tracing::trace!("GET {url}");
            let response = self
                .client
                .get(url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| SyncError::transport(path, e))?;
            response
                .text()
                .await
                .map_err(|e| SyncError::transport(path, e))
        }
        .boxed()
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn joins_api_paths_onto_base() {
        let backend = HttpBackend::new(
            Url::parse("http://127.0.0.1:5000/").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            backend.base_url.join("/api/vehicles").unwrap().as_str(),
            "http://127.0.0.1:5000/api/vehicles"
        );
    }
}
