//! Candidate directories derived from source keys and explicit overrides.

use crate::utils::path;

/// Permalink directory derived from the source key.
///
/// | Source             | Result   |
/// |--------------------|----------|
/// | `about/index.html` | `about`  |
/// | `about.html`       | `about`  |
/// | `index.html`       | ``       |
///
/// The result of a fallback fed back as `<result>/index.html` is the same
/// directory again.
pub fn fallback(source: &str) -> String {
    let source = path::normalize(source);
    let dir = path::dirname(&source);
    match path::file_stem(&source) {
        "index" => dir.to_owned(),
        stem => path::join(dir, stem),
    }
}

/// Normalize an explicit `permalink` value into a candidate directory.
pub fn explicit(permalink: &str) -> String {
    path::normalize(permalink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback() {
        assert_eq!(fallback("about/index.html"), "about");
        assert_eq!(fallback("about.html"), "about");
        assert_eq!(fallback("index.html"), "");
        assert_eq!(fallback("blog/2024/post.htm"), "blog/2024/post");
        assert_eq!(fallback("/docs//guide.html"), "docs/guide");
    }

    #[test]
    fn test_fallback_idempotent() {
        for source in ["about.html", "a/b/c.html", "x/index.html", "index.html"] {
            let dir = fallback(source);
            let key = path::join(&dir, "index.html");
            assert_eq!(fallback(&key), dir, "not idempotent for {source}");
        }
    }

    #[test]
    fn test_explicit() {
        assert_eq!(explicit("/custom/path/"), "custom/path");
        assert_eq!(explicit("a/./b/../c"), "a/c");
        assert_eq!(explicit("/"), "");
    }
}
