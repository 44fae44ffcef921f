//! Posix path helpers for file set keys.
//!
//! File set keys are plain strings (`posts/hello/index.html`): always `/`
//! separated, never a leading slash, and the site root is the empty string.
//! Everything here is pure string manipulation; nothing touches the disk.

/// Extensions that mark a key as a document rather than an asset.
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Normalize a path the way `path.normalize` would, then strip slashes.
///
/// - `//` and `.` segments collapse
/// - `..` pops the previous segment (and is dropped at the root)
/// - leading and trailing slashes are removed
///
/// # Examples
///
/// | Input              | Output        |
/// |--------------------|---------------|
/// | `/blog//2024/./a/` | `blog/2024/a` |
/// | `a/../b`           | `b`           |
/// | `.`                | ``            |
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    segments.join("/")
}

/// Directory part of a key (`""` for top-level keys).
#[inline]
pub fn dirname(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Last segment of a key.
#[inline]
pub fn basename(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Basename without its extension (`hello.html` -> `hello`).
pub fn file_stem(path: &str) -> &str {
    let name = basename(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    }
}

/// Extension without the dot, if any.
pub fn extension(path: &str) -> Option<&str> {
    let name = basename(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(&name[dot + 1..]),
    }
}

/// Join two keys, treating the empty string as the root.
pub fn join(base: &str, rest: &str) -> String {
    match (base.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_owned(),
        (_, true) => base.to_owned(),
        _ => format!("{}/{}", base.trim_end_matches('/'), rest.trim_start_matches('/')),
    }
}

/// Whether the key names an HTML document.
pub fn is_html(path: &str) -> bool {
    extension(path)
        .is_some_and(|ext| HTML_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Strip `dir` from the front of `path` on a segment boundary.
///
/// The root (`""`) is a prefix of every key. `post` is a prefix of
/// `post/a.png` but not of `posts/a.png`.
pub fn strip_dir<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    if dir.is_empty() {
        return Some(path);
    }
    path.strip_prefix(dir)?.strip_prefix('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/blog//2024/./a/"), "blog/2024/a");
        assert_eq!(normalize("a/../b"), "b");
        assert_eq!(normalize("../a"), "a");
        assert_eq!(normalize("."), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("a\\b"), "a/b");
    }

    #[test]
    fn test_dirname_and_basename() {
        assert_eq!(dirname("posts/hello.html"), "posts");
        assert_eq!(dirname("hello.html"), "");
        assert_eq!(basename("posts/hello.html"), "hello.html");
        assert_eq!(basename("hello.html"), "hello.html");
    }

    #[test]
    fn test_stem_and_extension() {
        assert_eq!(file_stem("posts/hello.html"), "hello");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem(".htaccess"), ".htaccess");
        assert_eq!(extension("posts/hello.html"), Some("html"));
        assert_eq!(extension("README"), None);
        assert_eq!(extension(".htaccess"), None);
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "a.png"), "a.png");
        assert_eq!(join("post", ""), "post");
        assert_eq!(join("post", "a.png"), "post/a.png");
        assert_eq!(join("post/", "/a.png"), "post/a.png");
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("a.html"));
        assert!(is_html("a/b.HTM"));
        assert!(!is_html("a.png"));
        assert!(!is_html("html"));
    }

    #[test]
    fn test_strip_dir_respects_segments() {
        assert_eq!(strip_dir("post/a.png", "post"), Some("a.png"));
        assert_eq!(strip_dir("post/img/a.png", "post"), Some("img/a.png"));
        assert_eq!(strip_dir("posts/a.png", "post"), None);
        assert_eq!(strip_dir("a.png", ""), Some("a.png"));
    }
}
