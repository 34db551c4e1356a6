//! Classification of a single store path into a resource kind.

use crate::errors::WikiError;
use crate::store::{FileHandle, FileStore};
use crate::utils::{basename, ensure_safe_path, normalize_path};

/// What a store path turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Missing,
    TextFile,
    BinaryFile,
    Directory,
}

/// Result of looking a path up in the file store.
///
/// `status` is [`FileType::Missing`] exactly when `resource` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfo {
    pub status: FileType,
    pub path: String,
    pub display_name: Option<String>,
    pub mimetype: Option<&'static str>,
    pub resource: Option<FileHandle>,
}

impl ResourceInfo {
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            status: FileType::Missing,
            path: path.into(),
            display_name: None,
            mimetype: None,
            resource: None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.status, FileType::TextFile | FileType::BinaryFile)
    }
}

/// Classify `path` against `store`. Absence is a normal outcome; only store
/// failures and paths escaping the root are errors.
pub fn classify<S: FileStore + ?Sized>(store: &S, path: &str) -> Result<ResourceInfo, WikiError> {
    ensure_safe_path(path)?;
    let path = normalize_path(path);
    let Some(handle) = store.get_file(&path)? else {
        return Ok(ResourceInfo::missing(path));
    };

    let display_name = basename(&path).to_string();
    if handle.is_directory {
        return Ok(ResourceInfo {
            status: FileType::Directory,
            path,
            display_name: Some(display_name),
            mimetype: None,
            resource: Some(handle),
        });
    }

    let mimetype = guess_mimetype(&display_name);
    Ok(ResourceInfo {
        status: file_type_for(mimetype),
        path,
        display_name: Some(display_name),
        mimetype,
        resource: Some(handle),
    })
}

/// Unknown types are never treated as text.
pub fn file_type_for(mimetype: Option<&str>) -> FileType {
    match mimetype {
        Some(m) if m.starts_with("text/") => FileType::TextFile,
        _ => FileType::BinaryFile,
    }
}

/// Guess a MIME type from a file name's extension
pub fn guess_mimetype(name: &str) -> Option<&'static str> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let mimetype = match ext.to_ascii_lowercase().as_str() {
        "txt" | "text" | "log" | "conf" | "ini" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "md" | "markdown" => "text/markdown",
        "rst" => "text/x-rst",
        "c" => "text/x-csrc",
        "h" => "text/x-chdr",
        "cpp" | "cc" | "cxx" | "c++" => "text/x-c++src",
        "hpp" | "hh" | "hxx" => "text/x-c++hdr",
        "py" => "text/x-python",
        "rs" => "text/x-rust",
        "java" => "text/x-java",
        "sh" => "text/x-sh",
        "xml" => "text/xml",
        "js" => "application/javascript",
        "json" => "application/json",
        "toml" => "application/toml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "mp4" => "video/mp4",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => return None,
    };
    Some(mimetype)
}
