//! Document metadata values.
//!
//! Front matter arrives as loosely typed data. `FieldValue` gives it a shape
//! that the pattern resolver and linkset matcher can reason about:
//!
//! | Value                    | Variant   |
//! |--------------------------|-----------|
//! | `true`                   | `Bool`    |
//! | `42`                     | `Integer` |
//! | `1.5`                    | `Float`   |
//! | `"2024-06-15"`           | `Date`    |
//! | `"Hello"`                | `Text`    |
//! | `["a", "b"]`             | `List`    |
//! | `{ "nested": 1 }`        | `Other`   |
//!
//! Strings shaped like `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SSZ` become dates,
//! the same way a YAML front matter parser would load them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::date::DateTimeUtc;

/// A single metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(DateTimeUtc),
    List(Vec<FieldValue>),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Falsy values make a pattern placeholder unresolvable.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Integer(n) => *n == 0,
            Self::Float(f) => *f == 0.0 || f.is_nan(),
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Date(_) => false,
            Self::Other(value) => value.is_null(),
        }
    }

    /// Linkset match: equal, or containing the expected value.
    ///
    /// Text contains the expected value's text (`"2024"` matches `2024`); a
    /// list contains an equal element.
    pub fn matches(&self, expected: &FieldValue) -> bool {
        if self == expected {
            return true;
        }
        match (self, expected) {
            (Self::Text(haystack), Self::Text(needle)) => haystack.contains(needle.as_str()),
            (Self::Text(haystack), _) => haystack.contains(&expected.to_string()),
            (Self::List(items), _) => items.contains(expected),
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    #[allow(clippy::cast_possible_truncation)] // Guarded by the fract/range check
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{}", *x as i64),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(dt) => f.write_str(&dt.to_rfc3339()),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<String> for FieldValue {
    /// Text that parses as a date becomes a `Date`.
    fn from(s: String) -> Self {
        match DateTimeUtc::parse(&s) {
            Some(dt) => Self::Date(dt),
            None => Self::Text(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<DateTimeUtc> for FieldValue {
    fn from(dt: DateTimeUtc) -> Self {
        Self::Date(dt)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Wire shape accepted by `FieldValue`'s deserializer.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<FieldValue>),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawField::deserialize(deserializer)? {
            RawField::Bool(b) => Self::Bool(b),
            RawField::Integer(n) => Self::Integer(n),
            RawField::Float(x) => Self::Float(x),
            RawField::Text(s) => Self::from(s),
            RawField::List(items) => Self::List(items),
            RawField::Other(value) => Self::Other(value),
        })
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Date(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Self::List(items) => items.serialize(serializer),
            Self::Other(value) => value.serialize(serializer),
        }
    }
}

/// The `permalink` front matter key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PermalinkOverride {
    /// Unset (or `true`): computed from patterns or the source path.
    #[default]
    Auto,
    /// `false`: the document keeps its source path.
    Disabled,
    /// Explicit output directory, e.g. `/archive/2024/hello/`.
    Custom(String),
}

impl PermalinkOverride {
    #[inline]
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// The explicit path, if one is set and non-empty.
    pub fn custom(&self) -> Option<&str> {
        match self {
            Self::Custom(path) if !path.trim().is_empty() => Some(path),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPermalink {
    Flag(bool),
    Path(String),
}

impl<'de> Deserialize<'de> for PermalinkOverride {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawPermalink>::deserialize(deserializer)? {
            None | Some(RawPermalink::Flag(true)) => Self::Auto,
            Some(RawPermalink::Flag(false)) => Self::Disabled,
            Some(RawPermalink::Path(path)) => Self::Custom(path),
        })
    }
}

impl Serialize for PermalinkOverride {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_none(),
            Self::Disabled => serializer.serialize_bool(false),
            Self::Custom(path) => serializer.serialize_str(path),
        }
    }
}
