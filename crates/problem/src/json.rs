//! JSON encoding and decoding for problem details.
//!
//! Decoding routes the five standard members to their fields and collects
//! every other top-level member as an extension. A top-level `"extensions"`
//! object is merged into the extensions, which makes the encoded form (where
//! extensions are nested under that key) decode back to an equal payload.
//!
//! Encoding writes [`Payload::to_map`] through `serde_json`, either compact or
//! with the indentation given in [`JsonOptions`].

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::io::Write;
use tracing::debug;

use crate::error::{ProblemError, Result};
use crate::payload::{EXTENSIONS_KEY, Payload, ProblemFields};
use crate::status::StatusInput;

/// Formatting options forwarded to the JSON writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Indentation per nesting level. `None` writes compact JSON.
    pub indent: Option<String>,
}

impl JsonOptions {
    /// Compact output with no whitespace.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Pretty output indented by two spaces.
    pub fn pretty() -> Self {
        Self::with_indent("  ")
    }

    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: Some(indent.into()),
        }
    }
}

impl Payload {
    /// Decodes a payload from JSON text.
    ///
    /// # Errors
    ///
    /// - [`ProblemError::Json`] if the text is not well-formed JSON
    /// - [`ProblemError::Shape`] if the document is not an object or a standard
    ///   member has the wrong type
    /// - [`ProblemError::StatusResolution`] if the status is not recognized
    pub fn from_json(text: &str) -> Result<Self> {
        from_json_str(text)
    }

    /// Decodes a payload from an already-parsed JSON value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => Payload::new(fields_from_object(object)?),
            other => Err(ProblemError::shape("a JSON object", &other)),
        }
    }

    /// Encodes the payload as JSON text.
    pub fn to_json(&self, options: &JsonOptions) -> Result<String> {
        let mut buffer = Vec::new();
        to_json_writer(self, &mut buffer, options)?;
        String::from_utf8(buffer).map_err(|e| ProblemError::Io(std::io::Error::other(e)))
    }
}

/// Decode a payload from a JSON string.
///
/// # Examples
///
/// ```
/// use helios_problem::json::from_json_str;
///
/// let payload = from_json_str(r#"{"status": 403, "balance": 30}"#)?;
/// assert_eq!(payload.title(), Some("Forbidden"));
/// assert!(payload.has_extension("balance"));
/// # Ok::<(), helios_problem::ProblemError>(())
/// ```
pub fn from_json_str(s: &str) -> Result<Payload> {
    let value: Value = serde_json::from_str(s)?;
    Payload::from_json_value(value)
}

/// Decode a payload from a JSON byte slice.
pub fn from_json_slice(v: &[u8]) -> Result<Payload> {
    let value: Value = serde_json::from_slice(v)?;
    Payload::from_json_value(value)
}

/// Decode a payload from a `serde_json::Value`.
pub fn from_json_value(value: Value) -> Result<Payload> {
    Payload::from_json_value(value)
}

/// Encode a payload as compact JSON.
pub fn to_json_string(payload: &Payload) -> Result<String> {
    payload.to_json(&JsonOptions::compact())
}

/// Encode a payload as JSON indented by two spaces.
pub fn to_json_string_pretty(payload: &Payload) -> Result<String> {
    payload.to_json(&JsonOptions::pretty())
}

/// Encode a payload as JSON into a writer.
pub fn to_json_writer<W>(payload: &Payload, writer: W, options: &JsonOptions) -> Result<()>
where
    W: Write,
{
    let map = payload.to_map();
    match &options.indent {
        None => serde_json::to_writer(writer, &map)?,
        Some(indent) => {
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
            map.serialize(&mut serializer)?;
        }
    }
    Ok(())
}

/// Splits a top-level JSON object into standard members and extensions.
fn fields_from_object(object: Map<String, Value>) -> Result<ProblemFields> {
    let mut fields = ProblemFields::new();

    for (name, value) in object {
        match name.as_str() {
            "type" => fields.type_url = string_member(value)?,
            "title" => fields.title = string_member(value)?,
            "status" => fields.status = status_member(value)?,
            "detail" => fields.detail = string_member(value)?,
            "instance" => fields.instance = string_member(value)?,
            EXTENSIONS_KEY => match value {
                Value::Object(nested) => {
                    debug!(count = nested.len(), "Merging nested extensions");
                    fields.extensions.extend(nested);
                }
                other => {
                    fields.extensions.insert(name, other);
                }
            },
            _ => {
                fields.extensions.insert(name, value);
            }
        }
    }

    Ok(fields)
}

fn string_member(value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(ProblemError::shape("a string", &other)),
    }
}

fn status_member(value: Value) -> Result<Option<StatusInput>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(StatusInput::Name(s))),
        Value::Number(n) => integral_code(&n)
            .map(|code| Some(StatusInput::Code(code)))
            .ok_or_else(|| ProblemError::StatusResolution(n.to_string())),
        other => Err(ProblemError::shape("a status code or name", &other)),
    }
}

/// Reads a number as a status code, accepting integral floats such as `403.0`.
fn integral_code(n: &serde_json::Number) -> Option<u16> {
    if let Some(code) = n.as_u64() {
        return u16::try_from(code).ok();
    }
    n.as_f64()
        .filter(|v| v.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(v))
        .map(|v| v as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_routes_primary_members_and_collects_extensions() -> Result<()> {
        let payload = from_json_str(
            r#"{"type":"https://x/y","status":403,"detail":"d","balance":30,"accounts":["/a","/b"]}"#,
        )?;

        assert_eq!(payload.type_url(), "https://x/y");
        assert_eq!(payload.status(), Some(403));
        assert_eq!(payload.title(), Some("Forbidden"));
        assert_eq!(payload.detail(), Some("d"));
        assert_eq!(payload.instance(), None);
        assert_eq!(
            Value::Object(payload.extensions().clone()),
            json!({"balance": 30, "accounts": ["/a", "/b"]})
        );
        Ok(())
    }

    #[test]
    fn test_nested_extensions_are_merged() -> Result<()> {
        let payload = from_json_str(r#"{"status":404,"extensions":{"balance":30},"other":true}"#)?;
        assert_eq!(
            Value::Object(payload.extensions().clone()),
            json!({"balance": 30, "other": true})
        );
        Ok(())
    }

    #[test]
    fn test_non_object_extensions_member_is_kept() -> Result<()> {
        let payload = from_json_str(r#"{"extensions":[1,2]}"#)?;
        assert_eq!(payload.extension("extensions"), Some(&json!([1, 2])));
        Ok(())
    }

    #[test]
    fn test_null_members_are_absent() -> Result<()> {
        let payload = from_json_str(r#"{"type":null,"title":null,"status":null}"#)?;
        assert_eq!(payload, Payload::default());
        Ok(())
    }

    #[test]
    fn test_string_status_is_resolved() -> Result<()> {
        assert_eq!(from_json_str(r#"{"status":"403"}"#)?.status(), Some(403));
        assert_eq!(from_json_str(r#"{"status":"not_found"}"#)?.status(), Some(404));
        Ok(())
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = from_json_str("{\"type\":").unwrap_err();
        assert!(matches!(err, ProblemError::Json(_)));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_top_level_must_be_object() {
        for text in ["[1,2]", "\"text\"", "42", "null"] {
            let err = from_json_str(text).unwrap_err();
            assert!(matches!(err, ProblemError::Shape { .. }), "{}", text);
        }
    }

    #[test]
    fn test_wrong_member_types_are_shape_errors() {
        assert!(matches!(
            from_json_str(r#"{"title": 5}"#),
            Err(ProblemError::Shape { found: "number", .. })
        ));
        assert!(matches!(
            from_json_str(r#"{"status": true}"#),
            Err(ProblemError::Shape { found: "boolean", .. })
        ));
    }

    #[test]
    fn test_invalid_status_number() {
        assert!(matches!(
            from_json_str(r#"{"status": -1}"#),
            Err(ProblemError::StatusResolution(_))
        ));
        assert!(matches!(
            from_json_str(r#"{"status": 40.5}"#),
            Err(ProblemError::StatusResolution(_))
        ));
        assert!(matches!(
            from_json_str(r#"{"status": 70000.0}"#),
            Err(ProblemError::StatusResolution(_))
        ));
    }

    #[test]
    fn test_integral_float_status() -> Result<()> {
        let payload = from_json_str(r#"{"status": 403.0}"#)?;
        assert_eq!(payload.status(), Some(403));
        assert_eq!(payload.title(), Some("Forbidden"));
        Ok(())
    }

    #[test]
    fn test_to_json_compact() -> Result<()> {
        let mut payload = ProblemFields::new().with_status(403u16).build()?;
        payload.add_extension("balance", 30);
        assert_eq!(
            to_json_string(&payload)?,
            r#"{"type":"about:blank","title":"Forbidden","status":403,"extensions":{"balance":30}}"#
        );
        Ok(())
    }

    #[test]
    fn test_to_json_with_indent() -> Result<()> {
        let payload = ProblemFields::new()
            .with_status(404u16)
            .with_extension("ids", json!([1]))
            .build()?;
        let expected = "{\n\t\"type\": \"about:blank\",\n\t\"title\": \"Not Found\",\n\t\"status\": 404,\n\t\"extensions\": {\n\t\t\"ids\": [\n\t\t\t1\n\t\t]\n\t}\n}";
        assert_eq!(payload.to_json(&JsonOptions::with_indent("\t"))?, expected);
        Ok(())
    }

    #[test]
    fn test_serde_round_trip() -> Result<()> {
        let payload = ProblemFields::new()
            .with_status("conflict")
            .with_extension("version", 3)
            .build()?;
        let value = serde_json::to_value(&payload)?;
        let back: Payload = serde_json::from_value(value)?;
        assert_eq!(back, payload);
        Ok(())
    }
}
