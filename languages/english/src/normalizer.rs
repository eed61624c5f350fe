use fanyi_types::NormalizedRecord;
use serde_json::Value;

use crate::renderers::{PRECEDENCE, RenderContext};

/// Turn one service response into at most one record.
///
/// Renderers run in [`PRECEDENCE`] order and the first record wins. A
/// renderer that trips over an unexpected shape is skipped, never fatal.
pub fn normalize(response: &Value, ctx: &RenderContext<'_>) -> Option<NormalizedRecord> {
    for renderer in PRECEDENCE {
        match renderer.render(response, ctx) {
            Ok(Some(record)) => {
                tracing::debug!(
                    "'{}' rendered by {} renderer as '{}'",
                    ctx.word,
                    renderer.name(),
                    record.headword
                );
                return Some(record);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!("{} renderer skipped for '{}': {}", renderer.name(), ctx.word, e);
            }
        }
    }

    tracing::debug!("No record for '{}'", ctx.word);
    None
}
