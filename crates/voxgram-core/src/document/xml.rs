//! XML reader producing an `Element` tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Content, DocumentError, Element};

/// Read an XML document into its root element.
///
/// Declarations, comments, processing instructions and doctypes are skipped.
/// Whitespace-only text outside the root is allowed; anything else there is
/// an error.
pub fn parse_xml(src: &str) -> Result<Element, DocumentError> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(DocumentError::OutsideRoot);
                }
                stack.push(open_element(&start)?);
            }
            Event::Empty(start) => {
                let element = open_element(&start)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(end) => {
                let name = std::str::from_utf8(end.local_name().as_ref())?.to_owned();
                let Some(element) = stack.pop() else {
                    return Err(DocumentError::UnexpectedClose(name));
                };
                if element.name != name {
                    return Err(DocumentError::UnexpectedClose(name));
                }
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                let text = std::str::from_utf8(&bytes)?;
                push_text(&mut stack, text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(DocumentError::Unclosed(open.name));
    }
    root.ok_or(DocumentError::Empty)
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, DocumentError> {
    let local = start.local_name();
    let name = std::str::from_utf8(local.as_ref())?;
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), DocumentError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Content::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(DocumentError::OutsideRoot),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), DocumentError> {
    let Some(parent) = stack.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(DocumentError::OutsideRoot);
    };
    // Adjacent text and CDATA runs merge into one node.
    if let Some(Content::Text(prev)) = parent.children.last_mut() {
        prev.push_str(text);
    } else {
        parent.children.push(Content::Text(text.to_owned()));
    }
    Ok(())
}
