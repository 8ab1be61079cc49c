//! XML serialization and deserialization for problem details.
//!
//! ## Document Shape
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <problem xmlns="urn:ietf:rfc:7807">
//!   <type>https://example.com/problems/out-of-credit</type>
//!   <title>You do not have enough credit.</title>
//!   <status>403</status>
//!   <balance>30</balance>
//!   <accounts>
//!     <i>/accounts/1</i>
//!     <i>/accounts/10</i>
//!   </accounts>
//! </problem>
//! ```
//!
//! Unlike JSON, extensions are not nested under an `<extensions>` element:
//! each one is a sibling of the standard members.
//!
//! ## Arrays
//!
//! **JSON Pattern**:
//! ```json
//! { "accounts": ["/accounts/1", "/accounts/10"] }
//! ```
//!
//! **XML Pattern**:
//! ```xml
//! <accounts><i>/accounts/1</i><i>/accounts/10</i></accounts>
//! ```
//!
//! ## Values
//!
//! Every datum is element text. Numbers and booleans are written as their JSON
//! text and come back as strings; nested objects are written as compact JSON
//! text on encode. On decode, nested elements become nested maps (see
//! [`de::element_to_map`]).

pub mod de;
pub mod ser;
pub mod tree;
mod utils;

pub use utils::{ARRAY_ITEM, PROBLEM_NAMESPACE, ROOT_ELEMENT};

// Re-export serialization functions
pub use ser::{to_xml_string, to_xml_string_pretty, to_xml_vec, to_xml_writer};

// Re-export deserialization functions
pub use de::{decode_fields, from_xml_slice, from_xml_str};

use crate::error::Result;
use crate::payload::Payload;

/// Formatting options forwarded to the XML writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlOptions {
    /// Spaces per nesting level. `None` writes everything on one line.
    pub indent: Option<usize>,
}

impl XmlOptions {
    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self::with_indent(2)
    }

    pub fn with_indent(indent: usize) -> Self {
        Self {
            indent: Some(indent),
        }
    }
}

impl Payload {
    /// Decodes a payload from an XML document.
    ///
    /// # Errors
    ///
    /// - [`ProblemError::Xml`](crate::ProblemError::Xml) if the document is
    ///   malformed
    /// - [`ProblemError::StatusResolution`](crate::ProblemError::StatusResolution)
    ///   if the status is not recognized
    pub fn from_xml(text: &str) -> Result<Self> {
        from_xml_str(text)
    }
}
