use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Authorization pair scraped from the service homepage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub signing_key: String,
}

/// Lazily acquired session shared by all lookups of one adapter.
///
/// The lock is held while acquiring, so lookups racing on first use wait for
/// a single acquisition instead of each scraping the homepage.
#[derive(Default)]
pub struct SessionState {
    current: Mutex<Option<Arc<Session>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached session, acquiring one with `acquire` if empty.
    ///
    /// A failed acquisition leaves the state empty; the next caller retries.
    pub async fn ensure<F, Fut, E>(&self, acquire: F) -> Result<Arc<Session>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Session, E>>,
    {
        let mut current = self.current.lock().await;
        if let Some(session) = current.as_ref() {
            return Ok(Arc::clone(session));
        }

        let session = Arc::new(acquire().await?);
        *current = Some(Arc::clone(&session));
        Ok(session)
    }

    /// Drop `stale` if it is still the cached session.
    ///
    /// A session already replaced by another lookup is left alone.
    pub async fn invalidate(&self, stale: &Session) -> bool {
        let mut current = self.current.lock().await;
        if current.as_deref() == Some(stale) {
            *current = None;
            return true;
        }
        false
    }

    #[cfg(test)]
    async fn current(&self) -> Option<Arc<Session>> {
        self.current.lock().await.clone()
    }
}
