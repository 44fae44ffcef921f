//! `relative` option: which files travel with a relocated document.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Family policy.
///
/// | TOML                  | Variant     | Family                              |
/// |-----------------------|-------------|-------------------------------------|
/// | `relative = false`    | `Off`       | none                                |
/// | `relative = true`     | `Directory` | non-HTML files under the source dir |
/// | `relative = "folder"` | `Folder`    | non-HTML files under `<dir>/<stem>/` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Relative {
    #[default]
    Off,
    Directory,
    Folder,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRelative {
    Flag(bool),
    Mode(String),
}

impl<'de> Deserialize<'de> for Relative {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawRelative::deserialize(deserializer)? {
            RawRelative::Flag(false) => Ok(Self::Off),
            RawRelative::Flag(true) => Ok(Self::Directory),
            RawRelative::Mode(mode) if mode == "folder" => Ok(Self::Folder),
            RawRelative::Mode(mode) => Err(serde::de::Error::custom(format!(
                "invalid relative mode `{mode}`, expected true, false or \"folder\""
            ))),
        }
    }
}

impl Serialize for Relative {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Off => serializer.serialize_bool(false),
            Self::Directory => serializer.serialize_bool(true),
            Self::Folder => serializer.serialize_str("folder"),
        }
    }
}
