//! Small typed builder for the HTML fragments handed to the host.
//!
//! Renderers assemble a list of [`Node`]s and call [`render`] once at the
//! end, so tests can inspect structure without matching exact markup.

use std::fmt::Write;

use regex::RegexBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain text, escaped on render.
    ///
    /// Service text always goes through here, so an entity it already
    /// carries (`&amp;`) shows up literally instead of being decoded.
    Text(String),
    /// `<b>` emphasis around escaped text
    Bold(String),
    Span {
        class: &'static str,
        children: Vec<Node>,
    },
    /// `<ul class>` with one `<li class>` per item
    List {
        class: &'static str,
        item_class: &'static str,
        items: Vec<Vec<Node>>,
    },
    /// `<style>` block, emitted verbatim
    Style(&'static str),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn span(class: &'static str, children: Vec<Node>) -> Self {
        Node::Span { class, children }
    }

    /// Span holding a single run of text
    pub fn text_span(class: &'static str, text: impl Into<String>) -> Self {
        Node::Span {
            class,
            children: vec![Node::text(text)],
        }
    }

    pub fn list(class: &'static str, item_class: &'static str, items: Vec<Vec<Node>>) -> Self {
        Node::List {
            class,
            item_class,
            items,
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Node::Bold(text) => {
                out.push_str("<b>");
                out.push_str(&html_escape::encode_text(text));
                out.push_str("</b>");
            }
            Node::Span { class, children } => {
                let _ = write!(out, "<span class=\"{class}\">");
                for child in children {
                    child.write_to(out);
                }
                out.push_str("</span>");
            }
            Node::List {
                class,
                item_class,
                items,
            } => {
                let _ = write!(out, "<ul class=\"{class}\">");
                for item in items {
                    let _ = write!(out, "<li class=\"{item_class}\">");
                    for child in item {
                        child.write_to(out);
                    }
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
            Node::Style(css) => {
                out.push_str("<style>");
                out.push_str(css);
                out.push_str("</style>");
            }
        }
    }
}

/// Render nodes to a single markup string
pub fn render(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_to(&mut out);
    }
    out
}

/// Split `text` so every case-insensitive occurrence of `word` is bold.
///
/// Matching is by substring, so `run` also highlights inside `runner`.
/// Matched text keeps its original casing.
pub fn highlight(text: &str, word: &str) -> Vec<Node> {
    if word.is_empty() {
        return vec![Node::text(text)];
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .build()
    else {
        return vec![Node::text(text)];
    };

    let mut nodes = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(text) {
        if found.start() > last {
            nodes.push(Node::text(&text[last..found.start()]));
        }
        nodes.push(Node::Bold(found.as_str().to_string()));
        last = found.end();
    }
    if last < text.len() {
        nodes.push(Node::text(&text[last..]));
    }
    nodes
}
