use std::path::{Component, Path};

use crate::errors::WikiError;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape HTML attribute values
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Normalize a request path into a store path: no leading or trailing
/// slash, no empty or `.` segments. The root normalizes to `""`.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Reject paths that would climb out of the store root or that no
/// filesystem can represent.
pub fn ensure_safe_path(req_path: &str) -> Result<(), WikiError> {
    if req_path.contains('\0') {
        return Err(WikiError::InvalidPath);
    }
    for comp in Path::new(req_path).components() {
        match comp {
            Component::ParentDir => return Err(WikiError::InvalidPath),
            Component::Prefix(_) => return Err(WikiError::InvalidPath),
            _ => {}
        }
    }
    Ok(())
}

/// Last segment of a store path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Join a store directory and a child name.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_slashes_and_dots() {
        assert_eq!(normalize_path("/"), "");
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("/WikiPage/"), "WikiPage");
        assert_eq!(normalize_path("//a/./b//c.txt"), "a/b/c.txt");
    }

    #[test]
    fn parent_segments_are_rejected() {
        assert!(ensure_safe_path("a/../../etc/passwd").is_err());
        assert!(ensure_safe_path("a/b.txt").is_ok());
    }

    #[test]
    fn nul_bytes_are_rejected() {
        assert!(matches!(ensure_safe_path("foo\0bar"), Err(WikiError::InvalidPath)));
    }

    #[test]
    fn basename_and_join() {
        assert_eq!(basename("WikiPage/SubPage.txt"), "SubPage.txt");
        assert_eq!(basename("readme.txt"), "readme.txt");
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a", "b"), "a/b");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
