use fanyi_core::markup::{self, Node};
use fanyi_types::NormalizedRecord;
use serde_json::Value;

use super::{Heading, RenderContext, RenderError, section};
use crate::response::{EntryBlock, Group, OXFORD, OxfordSection, SIMPLE_MEANS, SenseItem, SimpleMeans};

const OXFORD_CSS: &str = "\
div.dis {font-weight: bold;margin-bottom:3px;padding:0;}\
span.grammar, span.informal {color: #0d47a1;}\
span.pos {font-size:0.9em;margin-right:5px;padding:2px 4px;color:white;background-color:#0d47a1;border-radius:3px;}\
span.tran {padding:0;}\
span.eng_tran {padding-right:5px;}\
ul.sents {font-size:0.9em;margin:3px 0;padding:5px;background:rgba(13,71,161,0.1);border-radius:5px;}\
li.sent {margin:0;padding:0;}\
span.eng_sent {padding-right:5px;}";

pub(super) fn render(
    response: &Value,
    ctx: &RenderContext<'_>,
) -> Result<Option<NormalizedRecord>, RenderError> {
    let Some(oxford) = section::<OxfordSection>(response, OXFORD)? else {
        return Ok(None);
    };
    let Some(simple) = section::<SimpleMeans>(response, SIMPLE_MEANS)? else {
        return Ok(None);
    };
    let Some(heading) = Heading::from_simple_means(&simple, ctx) else {
        return Ok(None);
    };

    let blocks = oxford.blocks();
    if blocks.is_empty() {
        return Ok(None);
    }

    let definitions = definition_blocks(blocks, ctx);
    if definitions.is_empty() {
        return Ok(None);
    }

    Ok(Some(heading.into_record(
        markup::render(&[Node::Style(OXFORD_CSS)]),
        definitions,
    )))
}

/// Walk entry blocks in service order.
///
/// `p` opens a block, `d` completes and emits it, `n-g` emits its own
/// sub-block. A part of speech never followed by `d` is dropped.
fn definition_blocks(blocks: &[EntryBlock], ctx: &RenderContext<'_>) -> Vec<String> {
    let mut definitions = Vec::new();

    for block in blocks {
        let mut current: Vec<Node> = Vec::new();
        for group in &block.data {
            match group {
                Group::PartOfSpeech { p_text } => {
                    current.clear();
                    if !p_text.is_empty() {
                        current.push(Node::text_span("pos", p_text.as_str()));
                    }
                }
                Group::Translation { en_text } => {
                    current.push(translation(en_text));
                    definitions.push(markup::render(&current));
                    current.clear();
                }
                Group::SenseGroup { data } => {
                    if let Some(sub_block) = sense_block(data, ctx) {
                        definitions.push(sub_block);
                    }
                }
                Group::Other => {}
            }
        }
    }

    definitions
}

/// Translations of a sense group followed by up to `max_example` examples
fn sense_block(items: &[SenseItem], ctx: &RenderContext<'_>) -> Option<String> {
    let mut nodes = Vec::new();
    let mut examples = Vec::new();

    for item in items {
        if let Some(text) = item.text.as_deref().filter(|t| !t.is_empty()) {
            nodes.push(translation(text));
        }

        if item.is_example() && examples.len() < ctx.max_example {
            if let Some(sentence) = item.en_text.as_deref().filter(|s| !s.is_empty()) {
                let highlighted = markup::highlight(sentence, ctx.word);
                examples.push(vec![Node::span("eng_sent", highlighted)]);
            }
        }
    }

    if !examples.is_empty() {
        nodes.push(Node::list("sents", "sent", examples));
    }

    if nodes.is_empty() {
        None
    } else {
        Some(markup::render(&nodes))
    }
}

fn translation(text: &str) -> Node {
    Node::span("tran", vec![Node::text_span("eng_tran", text)])
}
