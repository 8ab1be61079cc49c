//! Constants and helpers shared by the XML serializer and deserializer.

use serde_json::Value;

/// Namespace declared on the root `<problem>` element.
pub const PROBLEM_NAMESPACE: &str = "urn:ietf:rfc:7807";

/// Name of the root element.
pub const ROOT_ELEMENT: &str = "problem";

/// Name of the elements holding array items.
pub const ARRAY_ITEM: &str = "i";

/// Checks if an element name marks an array item.
pub fn is_array_item(name: &str) -> bool {
    name == ARRAY_ITEM
}

/// Checks if a member name can be written as an XML element name.
///
/// Accepts an ASCII letter or `_` followed by letters, digits, `-`, `.` or
/// `_`. Names with a prefix (`a:b`) are rejected since no prefix is declared.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
        }
        _ => false,
    }
}

/// Renders a JSON value as XML element text.
///
/// Strings are written verbatim, `null` as empty text, and every other value
/// as its compact JSON text.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Converts optional element text into a JSON value. Missing text is `null`.
pub fn text_to_value(text: Option<&str>) -> Value {
    text.map(|t| Value::String(t.to_string()))
        .unwrap_or(Value::Null)
}
