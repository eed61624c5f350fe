use std::env;

use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_base_url() -> String {
    "https://fanyi.baidu.com/".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36"
        .to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    /// Service root; homepage, lookup and TTS urls hang off it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        let base_url = env::var("FANYI_BASE_URL").unwrap_or_else(|_| default_base_url());
        let user_agent = env::var("USER_AGENT").unwrap_or_else(|_| default_user_agent());

        Self {
            base_url,
            timeout_seconds: env_or("TIMEOUT_SECONDS", default_timeout_seconds()),
            user_agent,
        }
    }

    /// Base url with exactly one trailing slash
    pub fn base(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}
