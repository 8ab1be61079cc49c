//! XML deserialization for problem details.
//!
//! The document is parsed into an element tree first. Each direct child of the
//! root named after a standard member is taken as that member's raw text; the
//! status stays a string until [`Payload::new`] resolves it. Every other child
//! is converted with [`element_to_map`] and merged into the extensions.
//!
//! Element text is never type-coerced, so `<balance>30</balance>` decodes to
//! the string `"30"`.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ProblemError, Result};
use crate::payload::{Payload, ProblemFields};
use crate::status::StatusInput;
use crate::xml::tree::{self, XmlElement};
use crate::xml::utils;

/// Deserialize a payload from an XML string.
///
/// # Examples
///
/// ```
/// use helios_problem::xml::from_xml_str;
///
/// let payload = from_xml_str(
///     "<problem><status>403</status><balance>30</balance></problem>",
/// )?;
/// assert_eq!(payload.status(), Some(403));
/// assert_eq!(payload.extension("balance"), Some(&serde_json::json!("30")));
/// # Ok::<(), helios_problem::ProblemError>(())
/// ```
pub fn from_xml_str(xml: &str) -> Result<Payload> {
    Payload::new(decode_fields(xml)?)
}

/// Deserialize a payload from XML bytes.
pub fn from_xml_slice(xml: &[u8]) -> Result<Payload> {
    let xml_str = std::str::from_utf8(xml)
        .map_err(|e| ProblemError::Xml(format!("Invalid UTF-8: {}", e)))?;
    from_xml_str(xml_str)
}

/// Parses an XML document into unresolved problem fields.
///
/// A document without a root element, or whose root has no children, yields
/// empty fields.
pub fn decode_fields(xml: &str) -> Result<ProblemFields> {
    let mut fields = ProblemFields::new();
    let Some(root) = tree::parse_document(xml)? else {
        debug!("XML problem document has no root element");
        return Ok(fields);
    };

    for child in root.children {
        let text = child.text.clone();
        match child.name.as_str() {
            "type" => fields.type_url = text,
            "title" => fields.title = text,
            "status" => fields.status = text.map(StatusInput::Name),
            "detail" => fields.detail = text,
            "instance" => fields.instance = text,
            _ => {
                let converted = element_to_map(&child);
                debug!(element = %child.name, members = converted.len(), "Merging XML extension");
                fields.extensions.extend(converted);
            }
        }
    }

    Ok(fields)
}

/// Converts one element into a map.
///
/// - A leaf element becomes `{name: text}`.
/// - `<i>` children append their text to an array stored under the parent's
///   name.
/// - Other leaf children become `{child: text}` entries.
/// - A child with children of its own is converted recursively, starting from
///   the entries gathered so far, and the result replaces the whole map as
///   `{child: result}`.
///
/// The last rule means that when a parent has several children that each
/// have children, only the last one survives at that level:
///
/// ```
/// use helios_problem::xml::{de::element_to_map, tree::XmlElement};
/// use serde_json::json;
///
/// let element = XmlElement::new("error")
///     .with_child(XmlElement::new("a").with_child(XmlElement::new("x").with_text("1")))
///     .with_child(XmlElement::new("b").with_child(XmlElement::new("y").with_text("2")));
///
/// assert_eq!(
///     serde_json::Value::Object(element_to_map(&element)),
///     json!({"b": {"a": {"x": "1"}, "y": "2"}}),
/// );
/// ```
pub fn element_to_map(element: &XmlElement) -> Map<String, Value> {
    convert_element(element, Map::new())
}

fn convert_element(element: &XmlElement, mut entries: Map<String, Value>) -> Map<String, Value> {
    if !element.has_children() {
        entries.insert(element.name.clone(), text_value(element));
        return entries;
    }

    for child in &element.children {
        if utils::is_array_item(&child.name) {
            push_item(&mut entries, &element.name, text_value(child));
        } else if !child.has_children() {
            entries.insert(child.name.clone(), text_value(child));
        } else {
            let nested = convert_element(child, entries);
            entries = Map::new();
            entries.insert(child.name.clone(), Value::Object(nested));
        }
    }

    entries
}

fn push_item(entries: &mut Map<String, Value>, name: &str, item: Value) {
    match entries.get_mut(name) {
        Some(Value::Array(items)) => items.push(item),
        _ => {
            entries.insert(name.to_string(), Value::Array(vec![item]));
        }
    }
}

fn text_value(element: &XmlElement) -> Value {
    utils::text_to_value(element.text.as_deref())
}
