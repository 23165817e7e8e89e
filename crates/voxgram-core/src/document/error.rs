//! Errors raised while reading a grammar document.

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("document has no root element")]
    Empty,

    #[error("unexpected closing tag `</{0}>`")]
    UnexpectedClose(String),

    #[error("element `<{0}>` is never closed")]
    Unclosed(String),

    #[error("content outside the root element")]
    OutsideRoot,
}
