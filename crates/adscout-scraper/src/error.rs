use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by ads API at {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid value for header {header}")]
    InvalidHeader { header: &'static str },
}

impl ScraperError {
    /// `true` for errors that would fail every request of a run, not just the
    /// one that surfaced them. These abort a collection run instead of being
    /// recorded against a single page or ad.
    #[must_use]
    pub fn is_run_fatal(&self) -> bool {
        matches!(
            self,
            ScraperError::InvalidBaseUrl { .. } | ScraperError::InvalidHeader { .. }
        )
    }
}
