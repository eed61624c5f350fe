use fanyi_core::markup::{self, Node};
use fanyi_types::NormalizedRecord;
use serde_json::Value;

use super::{RenderError, section};
use crate::response::{TRANS_RESULT, TransResult};

const TRANS_CSS: &str = ".odh-expression {font-size: 1em!important;font-weight: normal!important;}";

/// Machine translation of the query; the last resort
pub(super) fn render(response: &Value) -> Result<Option<NormalizedRecord>, RenderError> {
    let Some(trans) = section::<TransResult>(response, TRANS_RESULT)? else {
        return Ok(None);
    };
    let Some(pair) = trans.data.into_iter().next() else {
        return Ok(None);
    };
    if pair.src.is_empty() {
        return Ok(None);
    }

    Ok(Some(NormalizedRecord {
        styling: markup::render(&[Node::Style(TRANS_CSS)]),
        headword: pair.src,
        pronunciation: String::new(),
        definition_blocks: vec![pair.dst],
        audio_links: vec![],
    }))
}
