//! Problem details formats and their media types.

use std::fmt;
use std::str::FromStr;

/// Media type for JSON problem details.
pub const MEDIA_TYPE_JSON: &str = "application/problem+json";

/// Media type for XML problem details.
pub const MEDIA_TYPE_XML: &str = "application/problem+xml";

/// Wire formats for problem details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemFormat {
    /// JSON format (application/problem+json)
    Json,
    /// XML format (application/problem+xml)
    Xml,
}

impl ProblemFormat {
    /// Returns the media type string for this format.
    pub fn media_type(&self) -> &'static str {
        match self {
            ProblemFormat::Json => MEDIA_TYPE_JSON,
            ProblemFormat::Xml => MEDIA_TYPE_XML,
        }
    }

    /// Returns the short key for this format (`json` or `xml`).
    pub fn key(&self) -> &'static str {
        match self {
            ProblemFormat::Json => "json",
            ProblemFormat::Xml => "xml",
        }
    }

    /// Parses a media type such as `application/problem+json; charset=utf-8`.
    ///
    /// Parameters are ignored; matching is case-insensitive.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next()?.trim();
        if essence.eq_ignore_ascii_case(MEDIA_TYPE_JSON) {
            Some(ProblemFormat::Json)
        } else if essence.eq_ignore_ascii_case(MEDIA_TYPE_XML) {
            Some(ProblemFormat::Xml)
        } else {
            None
        }
    }
}

impl fmt::Display for ProblemFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ProblemFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("json") {
            Ok(ProblemFormat::Json)
        } else if s.eq_ignore_ascii_case("xml") {
            Ok(ProblemFormat::Xml)
        } else {
            Err(format!("unknown problem format '{}', expected json or xml", s))
        }
    }
}

/// Returns the media type for a format key.
///
/// Only the exact keys `json` and `xml` are recognized; anything else,
/// including no key at all, yields an empty string.
pub fn media_type_for(key: Option<&str>) -> &'static str {
    match key {
        Some("json") => MEDIA_TYPE_JSON,
        Some("xml") => MEDIA_TYPE_XML,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for() {
        assert_eq!(media_type_for(Some("json")), "application/problem+json");
        assert_eq!(media_type_for(Some("xml")), "application/problem+xml");
        assert_eq!(media_type_for(Some("bogus")), "");
        assert_eq!(media_type_for(None), "");
    }

    #[test]
    fn test_from_media_type() {
        assert_eq!(
            ProblemFormat::from_media_type("application/problem+json"),
            Some(ProblemFormat::Json)
        );
        assert_eq!(
            ProblemFormat::from_media_type("Application/Problem+XML; charset=utf-8"),
            Some(ProblemFormat::Xml)
        );
        assert_eq!(ProblemFormat::from_media_type("application/json"), None);
    }

    #[test]
    fn test_from_str_round_trips_key() {
        for format in [ProblemFormat::Json, ProblemFormat::Xml] {
            assert_eq!(format.key().parse::<ProblemFormat>(), Ok(format));
            assert_eq!(media_type_for(Some(format.key())), format.media_type());
        }
        assert!("yaml".parse::<ProblemFormat>().is_err());
        assert_eq!("JSON".parse::<ProblemFormat>(), Ok(ProblemFormat::Json));
    }
}
