//! Input value model for the tree renderer.
//!
//! [`Value`] is a closed tagged variant over the shapes the renderer
//! understands. Classification is structural: the renderer looks at
//! [`Value::kind`] once per recursion step and never at a nominal type.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::event::TagEvent;

/// Attribute set of one tag, keyed by attribute name.
///
/// A `BTreeMap` so attribute serialization lists keys lexicographically,
/// deterministic across renders.
pub type Attrs = BTreeMap<String, Value>;

/// Content-producing callback. Receives the tag event and is fully
/// responsible for writing `rst`.
pub type ContentFn = Arc<dyn Fn(&mut TagEvent<'_>) + Send + Sync>;

/// A value to render as markup.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value; renders as empty content.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar.
    Number(serde_json::Number),
    /// Text scalar.
    String(String),
    /// Date/time instant; rendered in ISO-8601 form.
    Instant(DateTime<FixedOffset>),
    /// Ordered, numerically keyed sequence.
    Seq(Vec<Value>),
    /// Keyed mapping with stable field order.
    Map(BTreeMap<String, Value>),
    /// Content-producing callback.
    Content(ContentFn),
}

/// Structural classification of a [`Value`], in renderer dispatch priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Indexed sequence.
    Sequence,
    /// Keyed mapping.
    Mapping,
    /// Date/time instant.
    Instant,
    /// Content-producing callback.
    Content,
    /// String, number, boolean or null.
    Scalar,
}

impl Value {
    /// Wrap a content-producing callback.
    pub fn content<F>(producer: F) -> Self
    where
        F: Fn(&mut TagEvent<'_>) + Send + Sync + 'static,
    {
        Self::Content(Arc::new(producer))
    }

    /// Classify this value for renderer dispatch.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Seq(_) => ValueKind::Sequence,
            Self::Map(_) => ValueKind::Mapping,
            Self::Instant(_) => ValueKind::Instant,
            Self::Content(_) => ValueKind::Content,
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => ValueKind::Scalar,
        }
    }

    /// Whether the value has inner structure worth recursing into.
    ///
    /// Sequence elements that are not composite are skipped by the renderer.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.kind() != ValueKind::Scalar
    }

    /// Read a named field from a mapping value.
    ///
    /// Resolves to `None` on non-mapping values or missing fields; field
    /// access never errors.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Map(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Borrow the inner string of a text scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// The `_tag` override carried by a mapping, if any.
    #[must_use]
    pub fn tag_override(&self) -> Option<&str> {
        self.field("_tag").and_then(Value::as_str)
    }

    /// The `_attrs` override carried by a mapping, defaulting to empty.
    #[must_use]
    pub fn attrs_override(&self) -> Attrs {
        match self.field("_attrs") {
            Some(Self::Map(fields)) => fields.clone(),
            _ => Attrs::new(),
        }
    }

    /// String form of a scalar value.
    ///
    /// `Null` is empty, instants use RFC 3339 with a numeric offset, and
    /// composite values have no text form (empty).
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null | Self::Seq(_) | Self::Map(_) | Self::Content(_) => String::new(),
            Self::Bool(flag) => flag.to_string(),
            Self::Number(number) => number.to_string(),
            Self::String(text) => text.clone(),
            Self::Instant(instant) => instant.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(flag) => f.debug_tuple("Bool").field(flag).finish(),
            Self::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Self::String(text) => f.debug_tuple("String").field(text).finish(),
            Self::Instant(instant) => f.debug_tuple("Instant").field(instant).finish(),
            Self::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Self::Map(fields) => f.debug_tuple("Map").field(fields).finish(),
            Self::Content(_) => f.write_str("Content(..)"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(text) => Self::String(text),
            serde_json::Value::Array(items) => {
                Self::Seq(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(name, field)| (name, field.into()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Number(number.into())
    }
}

impl From<u64> for Value {
    fn from(number: u64) -> Self {
        Self::Number(number.into())
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        serde_json::Number::from_f64(number).map_or(Self::Null, Self::Number)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Seq(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self::Map(fields)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self::Instant(instant)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant.fixed_offset())
    }
}
