use std::sync::Arc;

use anyhow::Context;
use fanyi_client::{GtkSigner, ReqwestFetcher};
use fanyi_config::Config;
use fanyi_lang_english::{OxfordDictionary, WordFormDeinflector};

pub struct AppState {
    pub config: Config,
    pub dictionary: OxfordDictionary,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let fetcher =
            ReqwestFetcher::new(&config.network).context("Failed to create HTTP client")?;
        let deinflector =
            WordFormDeinflector::with_additional_tables(&config.dictionary.wordforms_paths);

        let dictionary = OxfordDictionary::new(
            &config,
            Arc::new(fetcher),
            Arc::new(GtkSigner::new()),
            Arc::new(deinflector),
        );

        Ok(Self { config, dictionary })
    }
}
