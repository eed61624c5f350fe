use fanyi_types::NormalizedRecord;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::response::SimpleMeans;

mod oxford;
mod simple;
mod translation;

/// Per-lookup inputs shared by all renderers
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Candidate word, bolded inside example sentences
    pub word: &'a str,
    pub max_example: usize,
    /// Service root the TTS endpoint hangs off
    pub base_url: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    Oxford,
    Simplified,
    Translation,
}

/// Renderers in the order they are tried; the first record wins
pub const PRECEDENCE: [Renderer; 3] = [Renderer::Oxford, Renderer::Simplified, Renderer::Translation];

impl Renderer {
    pub fn name(self) -> &'static str {
        match self {
            Renderer::Oxford => "oxford",
            Renderer::Simplified => "simplified",
            Renderer::Translation => "translation",
        }
    }

    /// `Ok(None)` means the section is absent or has nothing to show
    pub fn render(
        self,
        response: &Value,
        ctx: &RenderContext<'_>,
    ) -> Result<Option<NormalizedRecord>, RenderError> {
        match self {
            Renderer::Oxford => oxford::render(response, ctx),
            Renderer::Simplified => simple::render(response, ctx),
            Renderer::Translation => translation::render(response),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unexpected shape at {section}: {source}")]
    Shape {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// Parse the section at `pointer`; absent or null is `None`
fn section<T: DeserializeOwned>(
    response: &Value,
    pointer: &'static str,
) -> Result<Option<T>, RenderError> {
    match response.pointer(pointer) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|source| RenderError::Shape {
                section: pointer,
                source,
            }),
    }
}

/// Headword, reading and audio shared by the dictionary renderers
struct Heading {
    headword: String,
    pronunciation: String,
    audio_links: Vec<String>,
}

impl Heading {
    fn from_simple_means(simple: &SimpleMeans, ctx: &RenderContext<'_>) -> Option<Self> {
        let headword = simple.headword()?;

        let (uk, us) = simple
            .first_symbol()
            .map(|s| {
                (
                    s.ph_en.as_deref().unwrap_or_default(),
                    s.ph_am.as_deref().unwrap_or_default(),
                )
            })
            .unwrap_or_default();

        Some(Self {
            headword: headword.to_string(),
            pronunciation: NormalizedRecord::pronunciation(uk, us),
            audio_links: audio_links(ctx.base_url, headword),
        })
    }

    fn into_record(self, styling: String, definition_blocks: Vec<String>) -> NormalizedRecord {
        NormalizedRecord {
            styling,
            headword: self.headword,
            pronunciation: self.pronunciation,
            definition_blocks,
            audio_links: self.audio_links,
        }
    }
}

/// UK then US pronunciation audio
fn audio_links(base_url: &str, headword: &str) -> Vec<String> {
    let text = urlencoding::encode(headword);
    ["uk", "en"]
        .iter()
        .map(|lan| format!("{base_url}gettts?lan={lan}&text={text}&spd=3&source=web"))
        .collect()
}
