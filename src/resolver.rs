//! Wiki-aware resolution of request paths to backing store paths.

use crate::errors::WikiError;
use crate::resource::{classify, ResourceInfo};
use crate::store::FileStore;
use crate::utils::{ensure_safe_path, normalize_path};

/// Suffix carried by the backing file of every wiki page.
pub const WIKI_SUFFIX: &str = ".txt";

/// Logical name served for the root path.
pub const FRONT_PAGE: &str = "FrontPage";

/// Resolve a request path to its logical path and backing resource.
///
/// Precedence: an exact file, then `<path>.txt`, then a directory at
/// `<path>`, then missing. A wiki page therefore shadows a directory of the
/// same name. Names are matched case-sensitively.
pub fn resolve_page_path<S: FileStore + ?Sized>(
    store: &S,
    raw_path: &str,
) -> Result<(String, ResourceInfo), WikiError> {
    ensure_safe_path(raw_path)?;
    let mut path = normalize_path(raw_path);
    if path.is_empty() {
        path = FRONT_PAGE.to_string();
    }
    let logical_path = format!("/{}", path);

    let direct = classify(store, &path)?;
    if direct.is_file() {
        return Ok((logical_path, direct));
    }

    let suffixed = classify(store, &format!("{}{}", path, WIKI_SUFFIX))?;
    if suffixed.is_file() {
        return Ok((logical_path, suffixed));
    }

    // Directory listing, or missing at the unsuffixed path.
    Ok((logical_path, direct))
}

/// Logical path for a backing store path: wiki pages lose their suffix.
pub fn logical_path_for(store_path: &str) -> String {
    let trimmed = store_path.strip_suffix(WIKI_SUFFIX).filter(|s| !s.is_empty());
    format!("/{}", trimmed.unwrap_or(store_path))
}
