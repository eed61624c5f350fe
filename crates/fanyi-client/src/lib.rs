mod http;
mod sign;

pub use http::ReqwestFetcher;
pub use sign::GtkSigner;

/// Plain GET transport
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return the body as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Computes the per-query request signature
pub trait Signer: Send + Sync {
    /// Signature for `query`, or `None` when `signing_key` is unusable
    fn sign(&self, query: &str, signing_key: &str) -> Option<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
