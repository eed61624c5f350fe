//! Service JSON shapes, one per response section.
//!
//! Every section is parsed on its own so a surprise in one of them only
//! disables the renderer that reads it.

use serde::Deserialize;
use serde_json::Value;

pub const SIMPLE_MEANS: &str = "/dict_result/simple_means";
pub const OXFORD: &str = "/dict_result/oxford";
pub const TRANS_RESULT: &str = "/trans_result";

/// `dict_result.simple_means`
#[derive(Debug, Deserialize)]
pub struct SimpleMeans {
    #[serde(default)]
    pub word_name: Option<String>,
    #[serde(default)]
    symbols: Option<Vec<Symbol>>,
}

impl SimpleMeans {
    /// Headword, if the service reported a non-empty one
    pub fn headword(&self) -> Option<&str> {
        self.word_name.as_deref().filter(|w| !w.is_empty())
    }

    pub fn first_symbol(&self) -> Option<&Symbol> {
        self.symbols.as_ref().and_then(|s| s.first())
    }
}

#[derive(Debug, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    pub ph_en: Option<String>,
    #[serde(default)]
    pub ph_am: Option<String>,
    #[serde(default)]
    parts: Option<Vec<Part>>,
}

impl Symbol {
    pub fn parts(&self) -> &[Part] {
        self.parts.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub part: Option<String>,
    #[serde(default)]
    means: Option<Vec<Value>>,
}

impl Part {
    /// Non-empty string glosses, in service order
    pub fn glosses(&self) -> Vec<&str> {
        self.means
            .iter()
            .flatten()
            .filter_map(Value::as_str)
            .filter(|g| !g.is_empty())
            .collect()
    }
}

/// `dict_result.oxford`
#[derive(Debug, Deserialize)]
pub struct OxfordSection {
    #[serde(default)]
    pub entry: Vec<OxfordEntry>,
}

impl OxfordSection {
    /// Entry blocks of the first entry, empty when there are none
    pub fn blocks(&self) -> &[EntryBlock] {
        self.entry
            .first()
            .and_then(|e| e.data.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct OxfordEntry {
    #[serde(default)]
    pub data: Option<Vec<EntryBlock>>,
}

#[derive(Debug, Deserialize)]
pub struct EntryBlock {
    #[serde(default)]
    pub data: Vec<Group>,
}

/// Tagged group inside an entry block
#[derive(Debug, Deserialize)]
#[serde(tag = "tag")]
pub enum Group {
    #[serde(rename = "p")]
    PartOfSpeech {
        #[serde(default)]
        p_text: String,
    },
    #[serde(rename = "d")]
    Translation {
        #[serde(rename = "enText", default)]
        en_text: String,
    },
    #[serde(rename = "n-g")]
    SenseGroup {
        #[serde(default)]
        data: Vec<SenseItem>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct SenseItem {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "enText", default)]
    pub en_text: Option<String>,
}

impl SenseItem {
    pub fn is_example(&self) -> bool {
        self.tag.as_deref() == Some("x")
    }
}

/// `trans_result`
#[derive(Debug, Deserialize)]
pub struct TransResult {
    #[serde(default)]
    pub data: Vec<TransPair>,
}

#[derive(Debug, Deserialize)]
pub struct TransPair {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub dst: String,
}

/// Non-zero error code the service puts on rejected requests
pub fn rejection_code(response: &Value) -> Option<i64> {
    ["errno", "error"]
        .iter()
        .filter_map(|key| response.get(*key).and_then(Value::as_i64))
        .find(|code| *code != 0)
}
