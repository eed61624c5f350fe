use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use fanyi_client::{Fetcher, Signer};
use fanyi_config::Config;
use fanyi_core::dictionary::DictionaryAdapter;
use fanyi_core::language::Deinflector;
use fanyi_core::preprocess::{DefaultPreprocessor, Preprocessor};
use fanyi_core::state::{Session, SessionState};
use fanyi_types::{DictionaryOptions, NormalizedRecord};
use futures_util::future::join_all;
use regex::Regex;
use serde_json::Value;

use crate::error::LookupError;
use crate::normalizer::normalize;
use crate::renderers::RenderContext;
use crate::response::rejection_code;

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)token: '(.+?)'").expect("Invalid token pattern")
});

static GTK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)window\.gtk = '(.+?)'").expect("Invalid gtk pattern")
});

/// Oxford EN dictionary backed by the Baidu Fanyi lookup api
pub struct OxfordDictionary {
    fetcher: Arc<dyn Fetcher>,
    signer: Arc<dyn Signer>,
    deinflector: Arc<dyn Deinflector>,
    session: SessionState,
    max_example: AtomicUsize,
    session_refreshes: u32,
    base_url: String,
    from_lang: String,
    to_lang: String,
}

impl OxfordDictionary {
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn Fetcher>,
        signer: Arc<dyn Signer>,
        deinflector: Arc<dyn Deinflector>,
    ) -> Self {
        let options = DictionaryOptions {
            maxexample: Some(config.dictionary.max_example as i64),
        };

        Self {
            fetcher,
            signer,
            deinflector,
            session: SessionState::new(),
            max_example: AtomicUsize::new(options.max_example()),
            session_refreshes: config.dictionary.session_refreshes,
            base_url: config.network.base(),
            from_lang: config.dictionary.from_lang.clone(),
            to_lang: config.dictionary.to_lang.clone(),
        }
    }

    pub fn max_example(&self) -> usize {
        self.max_example.load(Ordering::Relaxed)
    }

    /// `[word, ...base forms]`; just `[word]` when deinflection fails
    async fn candidates(&self, word: &str) -> Vec<String> {
        let bases = match self.deinflector.deinflect(word).await {
            Ok(bases) => bases,
            Err(e) => {
                tracing::warn!("Deinflection failed for '{}': {}", word, e);
                Vec::new()
            }
        };

        let mut candidates = Vec::with_capacity(bases.len() + 1);
        candidates.push(word.to_string());
        candidates.extend(bases);
        candidates
    }

    /// Look up one candidate; every failure ends up as `None`
    async fn lookup(&self, candidate: &str) -> Option<NormalizedRecord> {
        if candidate.is_empty() {
            return None;
        }

        match self.try_lookup(candidate).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Lookup failed for '{}': {}", candidate, e);
                None
            }
        }
    }

    async fn try_lookup(&self, candidate: &str) -> Result<Option<NormalizedRecord>, LookupError> {
        let mut refreshes = 0;

        loop {
            let session = self.session.ensure(|| self.acquire_session()).await?;
            let response = self.query(candidate, &session).await?;

            if let Some(code) = rejection_code(&response) {
                if refreshes >= self.session_refreshes {
                    return Err(LookupError::Rejected(code));
                }
                tracing::warn!(
                    "Service rejected '{}' (code {}), refreshing session",
                    candidate,
                    code
                );
                self.session.invalidate(&session).await;
                refreshes += 1;
                continue;
            }

            let ctx = RenderContext {
                word: candidate,
                max_example: self.max_example(),
                base_url: &self.base_url,
            };
            return Ok(normalize(&response, &ctx));
        }
    }

    async fn query(&self, candidate: &str, session: &Session) -> Result<Value, LookupError> {
        let sign = self
            .signer
            .sign(candidate, &session.signing_key)
            .ok_or_else(|| LookupError::Signature(candidate.to_string()))?;

        let url = format!(
            "{}v2transapi?from={}&to={}&simple_means_flag=3&query={}&sign={}&token={}",
            self.base_url,
            self.from_lang,
            self.to_lang,
            urlencoding::encode(candidate),
            sign,
            urlencoding::encode(&session.token),
        );

        let body = self.fetcher.fetch(&url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Scrape token and signing key off the homepage
    async fn acquire_session(&self) -> Result<Session, LookupError> {
        let homepage = self.fetcher.fetch(&self.base_url).await?;

        let token = capture(&TOKEN_REGEX, &homepage).ok_or(LookupError::Session("token not found"))?;
        let signing_key =
            capture(&GTK_REGEX, &homepage).ok_or(LookupError::Session("gtk not found"))?;

        tracing::info!("Acquired service session");
        Ok(Session { token, signing_key })
    }
}

fn capture(regex: &Regex, haystack: &str) -> Option<String> {
    regex
        .captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[async_trait]
impl DictionaryAdapter for OxfordDictionary {
    fn display_name(&self) -> &str {
        "Oxford EN->EN Dictionary"
    }

    fn set_options(&self, options: DictionaryOptions) {
        self.max_example
            .store(options.max_example(), Ordering::Relaxed);
    }

    async fn find_term(&self, word: &str) -> Vec<NormalizedRecord> {
        let word = DefaultPreprocessor.process(word);
        if word.is_empty() {
            return Vec::new();
        }

        let candidates = self.candidates(&word).await;
        tracing::debug!("Looking up '{}' as {:?}", word, candidates);

        // join_all hands results back in candidate order
        let results = join_all(candidates.iter().map(|c| self.lookup(c))).await;
        let records: Vec<NormalizedRecord> = results.into_iter().flatten().collect();

        tracing::debug!("'{}': {} records", word, records.len());
        records
    }
}
