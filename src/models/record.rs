//! Field values and row records.
//!
//! A [`Record`] is one row of vehicles/jobs/locations/routes data: a
//! mapping from field name to [`FieldValue`]. Field values form a closed
//! set of variants so that per-type dispatch in similarity scoring is an
//! explicit `match`, not runtime type inspection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names recognized as the primary key, in lookup order.
pub const ID_FIELDS: [&str; 2] = ["_id", "id"];

/// A single field value in a row record.
///
/// Values are one of: null, string, number, or an ordered list of
/// primitives. Serialized untagged, so JSON objects map onto records
/// directly (`null` → `Null`, `"x"` → `Text`, `3.5` → `Number`,
/// `[..]` → `List`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit null. Treated identically to an absent field.
    #[default]
    Null,
    /// A number. All numeric input is widened to `f64`.
    Number(f64),
    /// A string.
    Text(String),
    /// An ordered list of primitive values.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns `true` if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the list content, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<Vec<Self>> for FieldValue {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            },
        }
    }
}

/// One row of tabular import data.
///
/// Records are immutable during detection: every transformation produces
/// new values, nothing is mutated in place.
///
/// # Example
///
/// ```rust
/// use vrpdedup::models::Record;
///
/// let record = Record::new()
///     .with_field("_id", "v1")
///     .with_field("description", "Truck A")
///     .with_field("capacity", 40.0);
///
/// assert_eq!(record.id().and_then(|v| v.as_text()), Some("v1"));
/// assert!(record.get("missing").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Creates a record from field name/value pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Builder method to set a field.
    #[must_use]
    pub fn with_field<K: Into<String>, V: Into<FieldValue>>(mut self, name: K, value: V) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Sets a field value.
    pub fn insert<K: Into<String>, V: Into<FieldValue>>(&mut self, name: K, value: V) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns the value of a field, treating explicit nulls as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Returns the primary-key value: the `_id` field or, failing that,
    /// `id`. Returns `None` when neither is present and non-null.
    #[must_use]
    pub fn id(&self) -> Option<&FieldValue> {
        ID_FIELDS.iter().find_map(|name| self.get(name))
    }

    /// Returns the field names, in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over field name/value pairs, in sorted field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields, including nulls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
