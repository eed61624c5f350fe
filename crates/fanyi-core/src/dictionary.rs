use fanyi_types::{DictionaryOptions, NormalizedRecord};

/// Surface a dictionary host talks to
#[async_trait::async_trait]
pub trait DictionaryAdapter: Send + Sync {
    /// Human readable adapter name
    fn display_name(&self) -> &str;

    /// Apply host options. Takes effect for lookups started afterwards.
    fn set_options(&self, options: DictionaryOptions);

    /// Look up `word` and every deinflected form of it.
    ///
    /// Never fails: lookup errors degrade to fewer (or zero) records.
    async fn find_term(&self, word: &str) -> Vec<NormalizedRecord>;
}
