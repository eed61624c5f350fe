use serde::{Deserialize, Serialize};

/// Example sentences kept per sense group when the host sets no limit
pub const DEFAULT_MAX_EXAMPLE: usize = 2;

/// One dictionary record handed to the host for display.
///
/// Field names on the wire follow the host's note format, so the Rust names
/// are renamed on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// `<style>` block scoped to the classes used in `definition_blocks`
    #[serde(rename = "css")]
    pub styling: String,
    /// Headword as reported by the service
    #[serde(rename = "expression")]
    pub headword: String,
    /// `uk[..] us[..]`, or empty when either transcription is missing
    #[serde(rename = "reading", default)]
    pub pronunciation: String,
    #[serde(rename = "definitions")]
    pub definition_blocks: Vec<String>,
    #[serde(rename = "audios", default, skip_serializing_if = "Vec::is_empty")]
    pub audio_links: Vec<String>,
}

impl NormalizedRecord {
    /// Format a pronunciation pair. Both halves or nothing.
    pub fn pronunciation(uk: &str, us: &str) -> String {
        if uk.is_empty() || us.is_empty() {
            return String::new();
        }
        format!("uk[{uk}] us[{us}]")
    }
}

/// Options pushed by the host through `set_options`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DictionaryOptions {
    /// Per sense-group example cap. Zero, negative or missing means default.
    #[serde(default)]
    pub maxexample: Option<i64>,
}

impl DictionaryOptions {
    pub fn max_example(&self) -> usize {
        match self.maxexample {
            Some(n) if n > 0 => n as usize,
            _ => DEFAULT_MAX_EXAMPLE,
        }
    }
}
