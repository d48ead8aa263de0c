//! Minimal markup tree built from quick-xml events
//!
//! The section and abstract walks both need document-order access to nested
//! elements, which is awkward to do in a single event pass, so the events
//! are folded into a small node tree first. Papers are sub-megabyte, the
//! whole tree fits in memory comfortably.

use crate::error::NormalizerError;
use quick_xml::events::Event;

/// One node of the parsed markup tree
#[derive(Debug, Clone)]
pub(crate) enum Node {
    /// An element with its children in document order
    Element { name: String, children: Vec<Node> },
    /// A run of character data
    Text(String),
}

impl Node {
    /// Element name, `None` for text nodes
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            Node::Text(_) => None,
        }
    }

    /// Child nodes, empty for text nodes
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// All character data under this node in document order, joined with
    /// single spaces
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, out: &mut Vec<String>) {
        match self {
            Node::Text(t) => {
                let trimmed = t.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed.to_string());
                }
            }
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// All descendant elements with the given name, in document order.
    /// Nested matches are included as separate entries.
    pub fn find_all<'a>(&'a self, name: &str, out: &mut Vec<&'a Node>) {
        if self.name() == Some(name) {
            out.push(self);
        }
        for child in self.children() {
            child.find_all(name, out);
        }
    }

    /// First direct child element with the given name
    pub fn first_child(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.name() == Some(name))
    }

    /// True when no descendant element carries the given name
    pub fn has_no_descendant(&self, name: &str) -> bool {
        self.children().iter().all(|c| match c {
            Node::Text(_) => true,
            Node::Element { name: n, .. } => n != name && c.has_no_descendant(name),
        })
    }
}

/// Parse markup into a synthetic root node.
///
/// Namespace prefixes are dropped (`local_name`), processing instructions,
/// comments and doctype declarations are skipped. Ill-formed markup
/// (mismatched or unclosed tags, bad entities) is a [`NormalizerError::Parse`].
pub(crate) fn parse(xml: &str) -> Result<Node, NormalizerError> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // Stack of open elements; index 0 is the synthetic root.
    let mut stack: Vec<(String, Vec<Node>)> = vec![("#root".to_string(), Vec::new())];

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                stack.push((name, Vec::new()));
            }
            Ok(Event::End(_)) => {
                // The reader itself rejects mismatched end tags, so a pop
                // here always has a matching start frame above the root.
                let (name, children) = stack.pop().expect("root frame always present");
                if stack.is_empty() {
                    return Err(NormalizerError::Parse(format!(
                        "unexpected closing tag </{name}>"
                    )));
                }
                push_child(&mut stack, Node::Element { name, children });
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                push_child(
                    &mut stack,
                    Node::Element {
                        name,
                        children: Vec::new(),
                    },
                );
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| NormalizerError::Parse(e.to_string()))?;
                if !text.trim().is_empty() {
                    push_child(&mut stack, Node::Text(text.into_owned()));
                }
            }
            Ok(Event::CData(c)) => {
                let text = String::from_utf8_lossy(&c).into_owned();
                if !text.trim().is_empty() {
                    push_child(&mut stack, Node::Text(text));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(NormalizerError::Parse(e.to_string())),
            Ok(_) => {} // declarations, comments, PIs, doctype
        }
    }

    if stack.len() != 1 {
        let open = stack.last().map(|(n, _)| n.clone()).unwrap_or_default();
        return Err(NormalizerError::Parse(format!("unclosed element <{open}>")));
    }

    let (name, children) = stack.pop().expect("root frame always present");
    Ok(Node::Element { name, children })
}

fn push_child(stack: &mut [(String, Vec<Node>)], node: Node) {
    stack
        .last_mut()
        .expect("root frame always present")
        .1
        .push(node);
}
