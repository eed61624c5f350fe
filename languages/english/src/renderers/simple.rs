use fanyi_core::markup::{self, Node};
use fanyi_types::NormalizedRecord;
use serde_json::Value;

use super::{Heading, RenderContext, RenderError, section};
use crate::response::{SIMPLE_MEANS, SimpleMeans};

const SIMPLE_CSS: &str = "ul.ec, li.ec {margin:0; padding:0;}";

pub(super) fn render(
    response: &Value,
    ctx: &RenderContext<'_>,
) -> Result<Option<NormalizedRecord>, RenderError> {
    let Some(simple) = section::<SimpleMeans>(response, SIMPLE_MEANS)? else {
        return Ok(None);
    };
    let Some(heading) = Heading::from_simple_means(&simple, ctx) else {
        return Ok(None);
    };
    let symbol = simple
        .first_symbol()
        .ok_or(RenderError::MissingField("simple_means.symbols"))?;

    let items = symbol
        .parts()
        .iter()
        .filter_map(|part| {
            let glosses = part.glosses();
            if glosses.is_empty() {
                return None;
            }

            let mut item = Vec::with_capacity(2);
            if let Some(pos) = part.part.as_deref().filter(|p| !p.is_empty()) {
                item.push(Node::text_span("pos simple", pos));
            }
            item.push(Node::text_span("ec_chn", glosses.join(",")));
            Some(item)
        })
        .collect();

    let definition = markup::render(&[Node::list("ec", "ec", items)]);

    Ok(Some(heading.into_record(
        markup::render(&[Node::Style(SIMPLE_CSS)]),
        vec![definition],
    )))
}
