use fanyi_client::FetchError;

/// Why a single candidate lookup produced nothing
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Transport error: {0}")]
    Transport(#[from] FetchError),

    #[error("Session unavailable: {0}")]
    Session(&'static str),

    #[error("Could not sign query '{0}'")]
    Signature(String),

    #[error("Response is not JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Service rejected request (code {0})")]
    Rejected(i64),
}
