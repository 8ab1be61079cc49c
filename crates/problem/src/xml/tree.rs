//! A minimal element tree built from quick-xml events.
//!
//! Only element names, text, and child order are kept. Attributes, comments,
//! processing instructions and the XML declaration are skipped. Names are local
//! names, so `<p:problem>` becomes `problem`.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

use crate::error::{ProblemError, Result};

/// An XML element with its text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// The first run of character data directly inside the element, kept as
    /// written. Tags, comments, processing instructions and CDATA sections
    /// end a run; a CDATA section is a run of its own.
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Parses an XML document and returns its root element, if there is one.
///
/// # Errors
///
/// Returns [`ProblemError::Xml`] for malformed input: mismatched or unclosed
/// tags, unknown entity references, more than one root element, or text
/// outside the root element.
pub fn parse_document(xml: &str) -> Result<Option<XmlElement>> {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::default();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                builder.flush_text()?;
                builder.stack.push(XmlElement::new(element_name(&start)));
            }
            Event::Empty(start) => {
                builder.flush_text()?;
                builder.close(XmlElement::new(element_name(&start)))?;
            }
            Event::End(_) => {
                builder.flush_text()?;
                let element = builder
                    .stack
                    .pop()
                    .ok_or_else(|| ProblemError::Xml("unexpected closing tag".to_string()))?;
                builder.close(element)?;
            }
            Event::Text(text) => builder.segment.push_str(&utf8(&text)?),
            Event::CData(data) => {
                builder.flush_text()?;
                builder.segment.push_str(&utf8(&data)?);
                builder.flush_text()?;
            }
            Event::GeneralRef(reference) => {
                let resolved = reference
                    .resolve_char_ref()
                    .map_err(|e| ProblemError::Xml(e.to_string()))?;
                match resolved {
                    Some(ch) => builder.segment.push(ch),
                    None => {
                        let name = utf8(&reference)?;
                        let entity = resolve_predefined_entity(&name).ok_or_else(|| {
                            ProblemError::Xml(format!("unknown entity reference &{};", name))
                        })?;
                        builder.segment.push_str(entity);
                    }
                }
            }
            Event::PI(_) | Event::Comment(_) => builder.flush_text()?,
            Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    builder.flush_text()?;
    if let Some(open) = builder.stack.last() {
        return Err(ProblemError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    Ok(builder.root)
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<XmlElement>,
    root: Option<XmlElement>,
    /// Character data of the current run.
    segment: String,
}

impl TreeBuilder {
    fn flush_text(&mut self) -> Result<()> {
        let segment = std::mem::take(&mut self.segment);
        if segment.is_empty() {
            return Ok(());
        }
        match self.stack.last_mut() {
            Some(element) => {
                if element.text.is_none() {
                    element.text = Some(segment);
                }
                Ok(())
            }
            None if segment.trim().is_empty() => Ok(()),
            None => Err(ProblemError::Xml("text outside of the root element".to_string())),
        }
    }

    fn close(&mut self, element: XmlElement) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if self.root.is_none() => self.root = Some(element),
            None => {
                return Err(ProblemError::Xml(format!(
                    "unexpected second root element <{}>",
                    element.name
                )));
            }
        }
        Ok(())
    }
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).to_string()
}

fn utf8(bytes: &[u8]) -> Result<Cow<'_, str>> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| ProblemError::Xml(format!("Invalid UTF-8: {}", e)))
}
