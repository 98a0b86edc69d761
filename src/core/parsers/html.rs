//! Lenient HTML template parser.
//!
//! Angular templates are not XML: attributes may be valueless (`<div translate>`),
//! void elements are never closed (`<input>`), and closing tags are sometimes
//! omitted. `quick-xml` is driven in its permissive mode and the tree is built
//! here with HTML rules layered on top.

use anyhow::{Result, anyhow};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::data::LineIndex;

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A parsed markup artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(TextNode),
}

/// An attribute as written. Valueless attributes have an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased name.
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-cased tag name.
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// 1-based position of the opening `<`.
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub text: String,
    pub line: usize,
    pub col: usize,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Concatenated direct text children, trimmed. Text inside child
    /// elements is not included.
    pub fn direct_text(&self) -> String {
        let text: String = self
            .children
            .iter()
            .filter_map(|child| match child {
                Node::Text(t) => Some(t.text.as_str()),
                Node::Element(_) => None,
            })
            .collect();
        text.trim().to_string()
    }

    #[cfg(test)]
    fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }
}

#[cfg(test)]
impl Document {
    /// Depth-first, document-order iteration over all elements.
    fn elements(&self) -> Vec<&Element> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
            for node in nodes {
                if let Node::Element(e) = node {
                    out.push(e);
                    walk(&e.children, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.children, &mut out);
        out
    }
}

/// Parse an HTML template into a `Document`.
///
/// Only tokenizer-level failures (e.g. a tag left open at end of input) are
/// errors; structural sloppiness is tolerated.
pub fn parse_html_source(code: &str, file_path: &str) -> Result<Document> {
    let index = LineIndex::new(code);
    let mut reader = Reader::from_str(code);
    {
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
    }

    // Open elements, innermost last. The document root collects top-level nodes.
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Vec<Node> = Vec::new();

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            let (line, col) = index.line_col(code, reader.error_position() as usize);
            anyhow!("Failed to parse {}:{}:{}: {}", file_path, line, col, e)
        })?;

        match event {
            Event::Start(start) => {
                let (line, col) = index.line_col(code, offset);
                let element = open_element(&start, line, col);
                if is_void_element(&element.name) {
                    append(&mut stack, &mut root, Node::Element(element));
                } else {
                    stack.push(element);
                }
            }
            Event::Empty(start) => {
                let (line, col) = index.line_col(code, offset);
                let element = open_element(&start, line, col);
                append(&mut stack, &mut root, Node::Element(element));
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                close_element(&name, &mut stack, &mut root);
            }
            Event::Text(text) => {
                let (line, col) = index.line_col(code, offset);
                let value = text
                    .unescape()
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
                if !value.is_empty() {
                    append(
                        &mut stack,
                        &mut root,
                        Node::Text(TextNode {
                            text: value,
                            line,
                            col,
                        }),
                    );
                }
            }
            Event::CData(cdata) => {
                let (line, col) = index.line_col(code, offset);
                append(
                    &mut stack,
                    &mut root,
                    Node::Text(TextNode {
                        text: String::from_utf8_lossy(&cdata).into_owned(),
                        line,
                        col,
                    }),
                );
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // Unclosed elements are closed implicitly at end of input.
    while let Some(element) = stack.pop() {
        append(&mut stack, &mut root, Node::Element(element));
    }

    Ok(Document { children: root })
}

fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

fn open_element(start: &BytesStart<'_>, line: usize, col: usize) -> Element {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let attributes = start
        .html_attributes()
        .with_checks(false)
        .flatten()
        .map(|attr| {
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            Attribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase(),
                value,
            }
        })
        .collect();

    Element {
        name,
        attributes,
        children: Vec::new(),
        line,
        col,
    }
}

fn append(stack: &mut [Element], root: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}

/// Close the nearest open element named `name`, closing everything opened
/// after it. End tags with no matching open element are ignored.
fn close_element(name: &str, stack: &mut Vec<Element>, root: &mut Vec<Node>) {
    let Some(position) = stack.iter().rposition(|e| e.name == name) else {
        return;
    };
    while stack.len() > position {
        if let Some(element) = stack.pop() {
            append(stack, root, Node::Element(element));
        }
    }
}
