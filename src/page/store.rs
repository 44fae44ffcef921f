//! Documents and the file set they live in.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{FieldValue, PermalinkOverride};

/// Path-keyed documents, iterated in key order.
///
/// Keys are posix paths without a leading slash (`posts/hello.html`).
pub type FileSet = BTreeMap<String, Document>;

/// Named metadata fields of a document.
pub type Fields = BTreeMap<String, FieldValue>;

/// Accept contents as a string in JSON and store them as bytes.
fn deserialize_contents<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(String::into_bytes).unwrap_or_default())
}

/// A generated file plus its front matter.
///
/// # Standard Fields
///
/// | Field       | Type                | Description                        |
/// |-------------|---------------------|------------------------------------|
/// | `contents`  | bytes               | Raw payload (rewritten by relinking) |
/// | `path`      | `Option<String>`    | Output directory, set by the engine |
/// | `permalink` | `PermalinkOverride` | Explicit path or `false` to opt out |
///
/// Everything else lands in `fields` and is available to patterns and
/// linkset matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "deserialize_contents", skip_serializing)]
    pub contents: Vec<u8>,
    /// Output directory of the relocated document (`""` for the root).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub permalink: PermalinkOverride,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: contents.into(),
            ..Self::default()
        }
    }

    /// Builder: set a metadata field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builder: set the `permalink` key.
    pub fn with_permalink(mut self, permalink: PermalinkOverride) -> Self {
        self.permalink = permalink;
        self
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Contents as text, if they are valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }
}
