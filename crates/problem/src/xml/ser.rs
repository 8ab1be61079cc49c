//! XML serialization for problem details.
//!
//! The payload is written as a flat list of child elements under
//! `<problem xmlns="urn:ietf:rfc:7807">`: the standard members first, then
//! every extension in insertion order. Arrays become a container element with
//! one `<i>` child per item. No attributes are written apart from the
//! namespace declaration.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::Value;
use std::io::Write;
use tracing::{trace, warn};

use crate::error::{ProblemError, Result};
use crate::payload::Payload;
use crate::xml::XmlOptions;
use crate::xml::utils::{self, ARRAY_ITEM, PROBLEM_NAMESPACE, ROOT_ELEMENT};

/// Serialize a payload to an XML string.
///
/// # Examples
///
/// ```
/// use helios_problem::{ProblemFields, xml::to_xml_string};
///
/// let payload = ProblemFields::new().with_status(404u16).build()?;
/// let xml = to_xml_string(&payload)?;
/// assert!(xml.contains("<title>Not Found</title>"));
/// # Ok::<(), helios_problem::ProblemError>(())
/// ```
pub fn to_xml_string(payload: &Payload) -> Result<String> {
    payload.to_xml(&XmlOptions::compact())
}

/// Serialize a payload to an XML string indented by two spaces.
pub fn to_xml_string_pretty(payload: &Payload) -> Result<String> {
    payload.to_xml(&XmlOptions::pretty())
}

/// Serialize a payload to an XML byte vector.
pub fn to_xml_vec(payload: &Payload, options: &XmlOptions) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(payload, &mut buffer, options)?;
    Ok(buffer)
}

/// Serialize a payload to an XML writer.
pub fn to_xml_writer<W>(payload: &Payload, writer: W, options: &XmlOptions) -> Result<()>
where
    W: Write,
{
    let writer = match options.indent {
        Some(indent) => Writer::new_with_indent(writer, b' ', indent),
        None => Writer::new(writer),
    };
    let mut serializer = XmlSerializer::new(writer);
    serializer.write_payload(payload)
}

impl Payload {
    /// Encodes the payload as an XML document.
    pub fn to_xml(&self, options: &XmlOptions) -> Result<String> {
        let buffer = to_xml_vec(self, options)?;
        String::from_utf8(buffer).map_err(|e| ProblemError::Io(std::io::Error::other(e)))
    }
}

/// Writes problem documents as quick-xml events.
pub struct XmlSerializer<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlSerializer<W> {
    pub fn new(writer: Writer<W>) -> Self {
        Self { writer }
    }

    /// Writes the declaration, the root element and one child per member.
    pub fn write_payload(&mut self, payload: &Payload) -> Result<()> {
        self.writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new(ROOT_ELEMENT);
        root.push_attribute(("xmlns", PROBLEM_NAMESPACE));
        self.writer.write_event(Event::Start(root))?;

        for (name, value) in payload.to_flat_map() {
            self.write_field(&name, &value)?;
        }

        self.writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
        Ok(())
    }

    /// Writes a single member; arrays get one `<i>` element per item.
    ///
    /// Members whose names are not valid element names are skipped.
    pub fn write_field(&mut self, name: &str, value: &Value) -> Result<()> {
        if !utils::is_valid_element_name(name) {
            warn!(field = %name, "Skipping member that is not a valid XML element name");
            return Ok(());
        }
        trace!(field = %name, "Writing XML field");
        match value {
            Value::Array(items) => {
                self.writer.write_event(Event::Start(BytesStart::new(name)))?;
                for item in items {
                    self.write_text_element(ARRAY_ITEM, &utils::value_to_text(item))?;
                }
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            other => self.write_text_element(name, &utils::value_to_text(other))?,
        }
        Ok(())
    }

    fn write_text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
