//! # Helios Problem Details
//!
//! This crate models [RFC 7807](https://www.rfc-editor.org/rfc/rfc7807) problem
//! details payloads and converts them to and from JSON and XML.
//!
//! ## Features
//!
//! - **Payload Model**: [`Payload`] normalizes its members once at construction
//!   (`about:blank` type, title derived from the status, symbolic statuses
//!   resolved) and keeps them fixed afterwards. Only the extension map grows.
//! - **JSON Support**: extensions are nested under `"extensions"` on encode;
//!   unknown top-level members are collected as extensions on decode.
//! - **XML Support** (`xml` feature): extensions are flattened to siblings of
//!   the standard members under `<problem xmlns="urn:ietf:rfc:7807">`, with
//!   arrays written as repeated `<i>` elements.
//!
//! ## JSON ↔ XML Mapping
//!
//! | JSON | XML |
//! |------|-----|
//! | `{"status": 403}` | `<status>403</status>` |
//! | `{"extensions": {"balance": 30}}` | `<balance>30</balance>` |
//! | `{"extensions": {"accounts": ["/a", "/b"]}}` | `<accounts><i>/a</i><i>/b</i></accounts>` |
//!
//! ## Examples
//!
//! ```
//! use helios_problem::{JsonOptions, Payload, ProblemFields};
//!
//! let mut payload = ProblemFields::new()
//!     .with_type("https://example.com/problems/out-of-credit")
//!     .with_status("forbidden")
//!     .build()?;
//! payload.add_extension("balance", 30);
//!
//! let json = payload.to_json(&JsonOptions::compact())?;
//! assert_eq!(Payload::from_json(&json)?, payload);
//! # Ok::<(), helios_problem::ProblemError>(())
//! ```

pub mod error;
pub mod format;
pub mod json;
pub mod payload;
pub mod status;

#[cfg(feature = "xml")]
pub mod xml;

// Re-export common types and functions
pub use error::{ProblemError, Result};
pub use format::{MEDIA_TYPE_JSON, MEDIA_TYPE_XML, ProblemFormat, media_type_for};
pub use payload::{DEFAULT_TYPE, Extensions, Payload, ProblemFields};
pub use status::StatusInput;

// Re-export JSON functions at top level for convenience
pub use json::{
    JsonOptions, from_json_slice, from_json_str, from_json_value, to_json_string,
    to_json_string_pretty,
};

#[cfg(feature = "xml")]
pub use xml::{XmlOptions, from_xml_slice, from_xml_str, to_xml_string, to_xml_string_pretty};

/// Decodes a payload from text in the given format.
pub fn decode(format: ProblemFormat, text: &str) -> Result<Payload> {
    match format {
        ProblemFormat::Json => from_json_str(text),
        #[cfg(feature = "xml")]
        ProblemFormat::Xml => from_xml_str(text),
        #[cfg(not(feature = "xml"))]
        ProblemFormat::Xml => Err(ProblemError::Xml(
            "XML format is not supported (xml feature not enabled)".to_string(),
        )),
    }
}

/// Encodes a payload in the given format, indenting nested levels by
/// `indent` spaces when given.
pub fn encode(payload: &Payload, format: ProblemFormat, indent: Option<usize>) -> Result<String> {
    match format {
        ProblemFormat::Json => payload.to_json(&JsonOptions {
            indent: indent.map(|n| " ".repeat(n)),
        }),
        #[cfg(feature = "xml")]
        ProblemFormat::Xml => payload.to_xml(&XmlOptions { indent }),
        #[cfg(not(feature = "xml"))]
        ProblemFormat::Xml => Err(ProblemError::Xml(
            "XML format is not supported (xml feature not enabled)".to_string(),
        )),
    }
}
