//! Error types for problem details decoding and encoding.
//!
//! Decoding can fail because the input text is not well-formed
//! ([`ProblemError::Json`], [`ProblemError::Xml`]), because a JSON document has
//! the wrong shape ([`ProblemError::Shape`]), or because the status could not be
//! resolved ([`ProblemError::StatusResolution`]). Encoding a well-formed
//! [`Payload`](crate::Payload) only fails if the underlying writer does.

use thiserror::Error;

/// The error type for all problem details operations.
#[derive(Error, Debug)]
pub enum ProblemError {
    /// The input is not well-formed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// The JSON document parsed, but a value has the wrong type.
    #[error("expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },

    /// The status code or symbolic status name is not recognized.
    #[error("unrecognized status: {0}")]
    StatusResolution(String),

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProblemError {
    /// Returns `true` if the input text itself could not be parsed.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ProblemError::Json(_) | ProblemError::Xml(_))
    }

    pub(crate) fn shape(expected: &'static str, found: &serde_json::Value) -> Self {
        ProblemError::Shape {
            expected,
            found: json_type_name(found),
        }
    }
}

#[cfg(feature = "xml")]
impl From<quick_xml::Error> for ProblemError {
    fn from(err: quick_xml::Error) -> Self {
        ProblemError::Xml(err.to_string())
    }
}

/// Returns the JSON type name of a value, used in shape error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Result type alias for problem details operations.
pub type Result<T> = std::result::Result<T, ProblemError>;
