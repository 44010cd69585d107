use parking_codecs::PayloadError;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a refresh or an inbound frame did not reach the page.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("transport failure on {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    #[error("{endpoint} reported failure: {reason}")]
    Rejected { endpoint: String, reason: String },

    #[error("malformed payload from {endpoint}: {detail}")]
    Malformed { endpoint: String, detail: String },
}

impl SyncError {
    pub fn transport(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        SyncError::Transport {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn payload(endpoint: impl Into<String>, error: PayloadError) -> Self {
        let endpoint = endpoint.into();
        match error {
            PayloadError::Rejected(reason) => SyncError::Rejected { endpoint, reason },
            other => SyncError::Malformed {
                endpoint,
                detail: other.to_string(),
            },
        }
    }
}
