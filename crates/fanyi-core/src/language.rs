/// Maps an inflected surface form to candidate dictionary forms
#[async_trait::async_trait]
pub trait Deinflector: Send + Sync {
    /// Base forms for `word`, most likely first. May be empty.
    async fn deinflect(&self, word: &str) -> Result<Vec<String>, DeinflectError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeinflectError {
    #[error("Deinflection service unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid word form data: {0}")]
    InvalidData(String),
}
