//! HTTP status resolution.
//!
//! A problem's status may be given as an integer code or as a symbolic name
//! such as `not_found`. Symbolic names are the snake-cased canonical reason
//! phrases from the [`http`] crate, so `"Unprocessable Entity"` becomes
//! `unprocessable_entity` and `"I'm a teapot"` becomes `im_a_teapot`.
//!
//! ```
//! use helios_problem::status::{StatusInput, reason_phrase, resolve_status};
//!
//! assert_eq!(resolve_status(&StatusInput::from("accepted")).unwrap(), 202);
//! assert_eq!(reason_phrase(403), Some("Forbidden"));
//! ```

use std::fmt;

use http::StatusCode;
use tracing::trace;

use crate::error::{ProblemError, Result};

/// A status as supplied by a caller, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusInput {
    /// An integer HTTP status code.
    Code(u16),
    /// A symbolic name (`not_found`) or a string of digits (`"404"`).
    Name(String),
}

impl From<u16> for StatusInput {
    fn from(code: u16) -> Self {
        StatusInput::Code(code)
    }
}

impl From<StatusCode> for StatusInput {
    fn from(code: StatusCode) -> Self {
        StatusInput::Code(code.as_u16())
    }
}

impl From<&str> for StatusInput {
    fn from(name: &str) -> Self {
        StatusInput::Name(name.to_string())
    }
}

impl From<String> for StatusInput {
    fn from(name: String) -> Self {
        StatusInput::Name(name)
    }
}

impl fmt::Display for StatusInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusInput::Code(code) => write!(f, "{}", code),
            StatusInput::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Resolves a status input to its integer code.
///
/// Integer codes must lie in the range accepted by [`StatusCode::from_u16`].
/// Strings made only of ASCII digits are parsed as codes; anything else is
/// looked up as a symbolic name.
pub fn resolve_status(input: &StatusInput) -> Result<u16> {
    let code = match input {
        StatusInput::Code(code) => check_code(*code)?,
        StatusInput::Name(name) => {
            let trimmed = name.trim();
            if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
                let code = trimmed
                    .parse::<u16>()
                    .map_err(|_| ProblemError::StatusResolution(name.clone()))?;
                check_code(code)?
            } else {
                code_for_name(trimmed)
                    .ok_or_else(|| ProblemError::StatusResolution(name.clone()))?
            }
        }
    };
    trace!(status = %input, code, "Resolved status");
    Ok(code)
}

/// Returns the canonical reason phrase for a status code, if it has one.
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
}

/// Returns the symbolic name for a status code, e.g. `not_found` for 404.
pub fn symbolic_name(code: u16) -> Option<String> {
    reason_phrase(code).map(to_symbol)
}

/// Looks up the code whose symbolic name matches `name`.
///
/// Matching ignores case and treats `-` and spaces as `_`.
pub fn code_for_name(name: &str) -> Option<u16> {
    let wanted = to_symbol(name);
    (100..600u16).find(|code| {
        reason_phrase(*code)
            .map(|phrase| to_symbol(phrase) == wanted)
            .unwrap_or(false)
    })
}

fn check_code(code: u16) -> Result<u16> {
    StatusCode::from_u16(code)
        .map(|status| status.as_u16())
        .map_err(|_| ProblemError::StatusResolution(code.to_string()))
}

fn to_symbol(phrase: &str) -> String {
    phrase
        .chars()
        .filter_map(|c| match c {
            ' ' | '-' | '_' => Some('_'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_integer_code() {
        assert_eq!(resolve_status(&StatusInput::Code(403)).unwrap(), 403);
        assert_eq!(resolve_status(&StatusInput::from(StatusCode::ACCEPTED)).unwrap(), 202);
    }

    #[test]
    fn test_resolve_digit_string() {
        assert_eq!(resolve_status(&StatusInput::from("403")).unwrap(), 403);
        assert_eq!(resolve_status(&StatusInput::from(" 200 ")).unwrap(), 200);
    }

    #[test]
    fn test_resolve_symbolic_name() {
        assert_eq!(resolve_status(&"accepted".into()).unwrap(), 202);
        assert_eq!(resolve_status(&"not_found".into()).unwrap(), 404);
        assert_eq!(resolve_status(&"Unprocessable-Entity".into()).unwrap(), 422);
        assert_eq!(resolve_status(&"im_a_teapot".into()).unwrap(), 418);
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        assert!(matches!(
            resolve_status(&"bogus".into()),
            Err(ProblemError::StatusResolution(name)) if name == "bogus"
        ));
        assert!(resolve_status(&StatusInput::Code(42)).is_err());
        assert!(resolve_status(&StatusInput::from("1000")).is_err());
        assert!(resolve_status(&StatusInput::from("")).is_err());
    }

    #[test]
    fn test_reason_phrase() {
        assert_eq!(reason_phrase(202), Some("Accepted"));
        assert_eq!(reason_phrase(500), Some("Internal Server Error"));
        assert_eq!(reason_phrase(599), None);
        assert_eq!(reason_phrase(7), None);
    }

    #[test]
    fn test_symbolic_name() {
        assert_eq!(symbolic_name(404).as_deref(), Some("not_found"));
        assert_eq!(
            symbolic_name(203).as_deref(),
            Some("non_authoritative_information")
        );
        assert_eq!(symbolic_name(599), None);
    }
}
