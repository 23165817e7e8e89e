//! Generic grammar document tree.
//!
//! The grammar builder only needs elements, attributes, and child text, so
//! any reader producing an `Element` tree can feed it. `parse_xml` is the
//! reader used for SRGS XML files.

mod error;
mod xml;


use indexmap::IndexMap;

pub use error::DocumentError;
pub use xml::parse_xml;

/// An element with ordered attributes and mixed content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Local name (namespace prefix stripped).
    pub name: String,
    /// Attributes in document order, keyed by qualified name.
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Element(Element),
    /// Character data, entity-unescaped. CDATA sections are included verbatim.
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter, mostly for constructing trees in code.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Direct child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Content::Element(e) => Some(e),
            Content::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants, in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Content::Text(t) => out.push_str(t),
            Content::Element(e) => collect_text(e, out),
        }
    }
}
