//! The problem details payload model.
//!
//! A [`Payload`] holds the five standard RFC 7807 members plus an ordered map
//! of extension members. All normalization happens once, at construction:
//!
//! - an absent or empty `type` becomes `about:blank`
//! - an absent or empty `title` is derived from the status reason phrase
//! - a symbolic status is resolved to its integer code
//!
//! After construction the standard members cannot change. The extension map
//! is the one exception and grows through [`Payload::add_extension`]; since
//! that takes `&mut self`, sharing a payload across threads while extending it
//! needs external synchronization like any other mutable value.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use crate::error::Result;
use crate::status::{self, StatusInput};

/// The `type` used when none is given.
pub const DEFAULT_TYPE: &str = "about:blank";

/// Names of the standard members, in serialization order.
pub const PRIMARY_FIELDS: [&str; 5] = ["type", "title", "status", "detail", "instance"];

/// Key under which extensions are nested in the map and JSON forms.
pub const EXTENSIONS_KEY: &str = "extensions";

/// Ordered extension members.
pub type Extensions = Map<String, Value>;

/// Returns `true` if `name` is one of the five standard member names.
pub fn is_primary_field(name: &str) -> bool {
    PRIMARY_FIELDS.contains(&name)
}

/// Unresolved input to [`Payload::new`].
///
/// Every member is optional; the status may be a code or a symbolic name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemFields {
    pub type_url: Option<String>,
    pub title: Option<String>,
    pub status: Option<StatusInput>,
    pub detail: Option<String>,
    pub instance: Option<String>,
    pub extensions: Extensions,
}

impl ProblemFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = Some(type_url.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<StatusInput>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_extension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(name.into(), value.into());
        self
    }

    /// Resolves the fields into a [`Payload`].
    pub fn build(self) -> Result<Payload> {
        Payload::new(self)
    }
}

/// An RFC 7807 problem details payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    type_url: String,
    title: Option<String>,
    status: Option<u16>,
    detail: Option<String>,
    instance: Option<String>,
    extensions: Extensions,
}

impl Payload {
    /// Builds a payload from unresolved fields.
    ///
    /// The status, if any, is resolved first. A missing or empty title is then
    /// taken from the status reason phrase and may stay absent when the status
    /// has none.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::StatusResolution`](crate::ProblemError::StatusResolution)
    /// if the status is not a known code or name.
    pub fn new(fields: ProblemFields) -> Result<Self> {
        let status = fields
            .status
            .as_ref()
            .map(status::resolve_status)
            .transpose()?;
        let title = non_empty(fields.title).or_else(|| derived_title(status));

        Ok(Self::from_parts(
            fields.type_url,
            title,
            status,
            fields.detail,
            fields.instance,
            Some(fields.extensions),
        ))
    }

    /// Builds a payload from an already-resolved status.
    ///
    /// Applies the constructor defaults: `about:blank` for a missing type, a
    /// derived title when only the status is known, and an empty extension
    /// map. Extension entries named after a standard member are dropped.
    pub fn from_parts(
        type_url: Option<String>,
        title: Option<String>,
        status: Option<u16>,
        detail: Option<String>,
        instance: Option<String>,
        extensions: Option<Extensions>,
    ) -> Self {
        let mut extensions = extensions.unwrap_or_default();
        extensions.retain(|name, _| {
            let keep = !is_primary_field(name);
            if !keep {
                debug!(extension = %name, "Dropping extension named after a standard member");
            }
            keep
        });

        Self {
            type_url: non_empty(type_url).unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            title: title.or_else(|| derived_title(status)),
            status,
            detail,
            instance,
            extensions,
        }
    }

    /// A URI reference identifying the problem type.
    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    /// Short summary of the problem type.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The HTTP status code.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// The status as an [`http::StatusCode`].
    pub fn status_code(&self) -> Option<http::StatusCode> {
        self.status.and_then(|code| http::StatusCode::from_u16(code).ok())
    }

    /// Explanation specific to this occurrence.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// A URI reference identifying this occurrence.
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extension(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Inserts or overwrites an extension member and returns the same payload.
    ///
    /// Names of the standard members are ignored, since those members are
    /// fixed at construction.
    pub fn add_extension(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        if is_primary_field(&name) {
            debug!(extension = %name, "Ignoring extension named after a standard member");
            return self;
        }
        self.extensions.insert(name, value.into());
        self
    }

    /// Returns the ordered member map.
    ///
    /// Standard members come first and are omitted when absent. Extensions are
    /// nested under `"extensions"`, which is omitted when there are none.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(self.type_url.clone()));
        if let Some(title) = &self.title {
            map.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(status) = self.status {
            map.insert("status".to_string(), Value::from(status));
        }
        if let Some(detail) = &self.detail {
            map.insert("detail".to_string(), Value::String(detail.clone()));
        }
        if let Some(instance) = &self.instance {
            map.insert("instance".to_string(), Value::String(instance.clone()));
        }
        if !self.extensions.is_empty() {
            map.insert(
                EXTENSIONS_KEY.to_string(),
                Value::Object(self.extensions.clone()),
            );
        }
        map
    }

    /// Returns the member map with extensions lifted beside the standard members.
    ///
    /// This is the field set written by the XML codec.
    pub fn to_flat_map(&self) -> Map<String, Value> {
        let mut map = self.to_map();
        if let Some(Value::Object(extensions)) = map.remove(EXTENSIONS_KEY) {
            map.extend(extensions);
        }
        map
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::from_parts(None, None, None, None, None, None)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.to_map()))
    }
}

impl Serialize for Payload {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Payload::from_json_value(value).map_err(de::Error::custom)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn derived_title(status: Option<u16>) -> Option<String> {
    status
        .and_then(status::reason_phrase)
        .map(str::to_string)
}
