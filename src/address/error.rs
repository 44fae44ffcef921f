//! Errors raised while relocating documents.

use thiserror::Error;

/// Permalink pass failure.
///
/// A failed pass leaves already committed renames in place and discards
/// staged family files.
#[derive(Debug, Error)]
pub enum PermalinkError {
    /// Target already taken and `duplicates_fail` is set.
    #[error("permalink clash: {target} is already taken (source {file})")]
    Collision {
        /// Final key that was requested.
        target: String,
        /// Key of the document that requested it.
        file: String,
    },

    /// Raised by a custom uniqueness function.
    #[error("permalink resolution failed for {file}: {message}")]
    Custom { file: String, message: String },
}

impl PermalinkError {
    /// Build the error a custom uniqueness function returns to abort the pass.
    pub fn custom(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom {
            file: file.into(),
            message: message.into(),
        }
    }

    /// The key that was being relocated when the error happened.
    pub fn file(&self) -> &str {
        match self {
            Self::Collision { file, .. } | Self::Custom { file, .. } => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message_names_target() {
        let err = PermalinkError::Collision {
            target: "foo/index.html".into(),
            file: "b.html".into(),
        };
        assert_eq!(
            err.to_string(),
            "permalink clash: foo/index.html is already taken (source b.html)"
        );
        assert_eq!(err.file(), "b.html");
    }

    #[test]
    fn test_custom() {
        let err = PermalinkError::custom("a.html", "no slot left");
        assert_eq!(
            err.to_string(),
            "permalink resolution failed for a.html: no slot left"
        );
    }
}
