use std::env;

use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_max_example() -> usize {
    2
}

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "zh".to_string()
}

fn default_session_refreshes() -> u32 {
    1
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Example sentences kept per Oxford sense group
    #[serde(default = "default_max_example")]
    pub max_example: usize,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    /// How many times a rejected lookup may refresh the session and retry.
    /// Zero keeps the first session for the adapter's lifetime.
    #[serde(default = "default_session_refreshes")]
    pub session_refreshes: u32,
    /// Extra word-form tables merged over the embedded one
    #[serde(default)]
    pub wordforms_paths: Vec<String>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            max_example: default_max_example(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            session_refreshes: default_session_refreshes(),
            wordforms_paths: vec![],
        }
    }
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let max_example = match env_or("MAX_EXAMPLE", default_max_example()) {
            0 => default_max_example(),
            n => n,
        };

        // Comma separated list of json files
        let wordforms_paths = env::var("WORDFORMS_PATH")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            max_example,
            from_lang: env::var("FROM_LANG").unwrap_or_else(|_| default_from_lang()),
            to_lang: env::var("TO_LANG").unwrap_or_else(|_| default_to_lang()),
            session_refreshes: env_or("SESSION_REFRESHES", default_session_refreshes()),
            wordforms_paths,
        }
    }
}
