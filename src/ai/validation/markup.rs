//! Generic markup tree
//!
//! Second extraction stage: a strict parse of the located fragment into an
//! owned element tree. Any well-formedness problem (mismatched or unclosed
//! tags, bad entities, broken attributes, stray content outside the root)
//! is reported as `MalformedMarkup` with the parser's diagnostic.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::types::ExtractionError;

/// Node of the markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element(MarkupElement),
    /// Text or CDATA content, already unescaped
    Text(String),
}

/// Element with attributes and ordered children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

impl MarkupElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements, in document order
    pub fn elements(&self) -> impl Iterator<Item = &MarkupElement> {
        self.children.iter().filter_map(|node| match node {
            MarkupNode::Element(el) => Some(el),
            MarkupNode::Text(_) => None,
        })
    }

    /// First direct child element with the given name
    pub fn child(&self, name: &str) -> Option<&MarkupElement> {
        self.elements().find(|el| el.name == name)
    }

    /// All direct child elements with the given name, in document order
    pub fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a MarkupElement> + 'a {
        self.elements().filter(move |el| el.name == name)
    }

    /// All descendant text and CDATA in document order, trimmed
    ///
    /// Inline markup inside an item (`<b>`, `<em>`) contributes its text, so
    /// `<Item>Price <b>really</b> matters</Item>` reads "Price really matters".
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                MarkupNode::Text(t) => out.push_str(t),
                MarkupNode::Element(el) => el.collect_text(out),
            }
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<MarkupElement, ExtractionError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(ExtractionError::malformed)?
        .to_string();

    let mut element = MarkupElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(ExtractionError::malformed)?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(ExtractionError::malformed)?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(ExtractionError::malformed)?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Parse a fragment holding exactly one root element
pub fn parse_markup(fragment: &str) -> Result<MarkupElement, ExtractionError> {
    let mut reader = Reader::from_str(fragment);
    reader.check_end_names(true);

    let mut stack: Vec<MarkupElement> = Vec::new();
    let mut root: Option<MarkupElement> = None;

    // Closed elements attach to their parent, or become the root
    fn attach(
        element: MarkupElement,
        stack: &mut [MarkupElement],
        root: &mut Option<MarkupElement>,
    ) -> Result<(), ExtractionError> {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(MarkupNode::Element(element));
            Ok(())
        } else if root.is_none() {
            *root = Some(element);
            Ok(())
        } else {
            Err(ExtractionError::malformed(format!(
                "second root element <{}>",
                element.name
            )))
        }
    }

    loop {
        let position = reader.buffer_position();
        let event = reader.read_event().map_err(|e| {
            ExtractionError::malformed(format!("{} (near byte {})", e, position))
        })?;

        match event {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(ExtractionError::malformed(
                        "content after the root element",
                    ));
                }
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(end) => {
                let name = std::str::from_utf8(end.name().as_ref())
                    .map_err(ExtractionError::malformed)?
                    .to_string();
                let element = stack.pop().ok_or_else(|| {
                    ExtractionError::malformed(format!("unexpected closing tag </{}>", name))
                })?;
                if element.name != name {
                    return Err(ExtractionError::malformed(format!(
                        "expected </{}>, found </{}>",
                        element.name, name
                    )));
                }
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| {
                    ExtractionError::malformed(format!("{} (near byte {})", e, position))
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(MarkupNode::Text(text.into_owned())),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(ExtractionError::malformed(
                            "text outside the root element",
                        ));
                    }
                }
            }
            Event::CData(data) => {
                let text = std::str::from_utf8(&data)
                    .map_err(ExtractionError::malformed)?
                    .to_string();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(MarkupNode::Text(text)),
                    None => {
                        return Err(ExtractionError::malformed(
                            "CDATA outside the root element",
                        ));
                    }
                }
            }
            Event::Eof => break,
            // Comments, declarations and processing instructions carry no content
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ExtractionError::malformed(format!(
            "unclosed element <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| ExtractionError::malformed("no root element"))
}
