//! Renderable pages built from resolved resources.

use crate::errors::WikiError;
use crate::resolver::{FRONT_PAGE, WIKI_SUFFIX, logical_path_for};
use crate::resource::{classify, FileType, ResourceInfo};
use crate::store::{FileHandle, FileStore};
use crate::utils::{basename, join_path};

/// A page backed by a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePage {
    /// Logical path the page answers for.
    pub path: String,
    pub resource: FileHandle,
    pub display_name: String,
    pub mimetype: Option<&'static str>,
}

/// One child shown in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub display_name: String,
    /// Backing store path.
    pub path: String,
    pub file_type: FileType,
}

impl ListingEntry {
    /// Path to link to; wiki pages are linked without their suffix.
    pub fn href(&self) -> String {
        match self.file_type {
            FileType::TextFile => logical_path_for(&self.path),
            _ => format!("/{}", self.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub path: String,
    pub resource: FileHandle,
    pub display_name: String,
    /// Directories first, then files, each alphabetical ignoring case.
    pub entries: Vec<ListingEntry>,
}

/// Nothing exists at the resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPage {
    pub path: String,
    /// Where new content for this page would be saved.
    pub write_filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Wiki(FilePage),
    OtherText(FilePage),
    Binary(FilePage),
    DirectoryListing(DirectoryListing),
    Missing(MissingPage),
}

impl Page {
    pub fn path(&self) -> &str {
        match self {
            Page::Wiki(p) | Page::OtherText(p) | Page::Binary(p) => &p.path,
            Page::DirectoryListing(d) => &d.path,
            Page::Missing(m) => &m.path,
        }
    }

    pub fn resource(&self) -> Option<&FileHandle> {
        match self {
            Page::Wiki(p) | Page::OtherText(p) | Page::Binary(p) => Some(&p.resource),
            Page::DirectoryListing(d) => Some(&d.resource),
            Page::Missing(_) => None,
        }
    }

    pub fn file_type(&self) -> FileType {
        match self {
            Page::Wiki(_) | Page::OtherText(_) => FileType::TextFile,
            Page::Binary(_) => FileType::BinaryFile,
            Page::DirectoryListing(_) => FileType::Directory,
            Page::Missing(_) => FileType::Missing,
        }
    }

    /// Title shown in the browser title bar.
    pub fn title(&self) -> String {
        let title: &str = match self {
            Page::Wiki(p) => p.display_name.strip_suffix(WIKI_SUFFIX).unwrap_or(&p.display_name),
            Page::OtherText(p) | Page::Binary(p) => &p.display_name,
            Page::DirectoryListing(d) => &d.display_name,
            Page::Missing(m) => basename(&m.path),
        };
        if title.is_empty() {
            FRONT_PAGE.to_string()
        } else {
            title.to_string()
        }
    }

    /// Store path that saving this page would write to.
    pub fn write_filename(&self) -> String {
        match self {
            Page::Wiki(p) | Page::OtherText(p) | Page::Binary(p) => p.resource.path.clone(),
            Page::DirectoryListing(d) => format!("{}{}", d.resource.path, WIKI_SUFFIX),
            Page::Missing(m) => m.write_filename.clone(),
        }
    }
}

/// Map a resolved resource to the page variant that renders it.
///
/// Only directory listings touch the store, to classify their immediate
/// children.
pub fn build_page<S: FileStore + ?Sized>(
    store: &S,
    logical_path: String,
    info: ResourceInfo,
) -> Result<Page, WikiError> {
    let ResourceInfo { status, path, display_name, mimetype, resource } = info;
    let Some(resource) = resource else {
        return Ok(missing_page(logical_path, &path));
    };
    let display_name = display_name.unwrap_or_else(|| basename(&path).to_string());

    let page = match status {
        FileType::Missing => missing_page(logical_path, &path),
        FileType::Directory => {
            let entries = list_entries(store, &resource)?;
            Page::DirectoryListing(DirectoryListing {
                path: logical_path,
                resource,
                display_name,
                entries,
            })
        }
        FileType::BinaryFile => {
            Page::Binary(FilePage { path: logical_path, resource, display_name, mimetype })
        }
        FileType::TextFile => {
            let file = FilePage { path: logical_path, resource, display_name, mimetype };
            if file.resource.path.ends_with(WIKI_SUFFIX) {
                Page::Wiki(file)
            } else {
                Page::OtherText(file)
            }
        }
    };
    Ok(page)
}

fn missing_page(logical_path: String, store_path: &str) -> Page {
    let name = basename(store_path);
    let write_filename = if name.contains('.') {
        store_path.to_string()
    } else {
        format!("{}{}", store_path, WIKI_SUFFIX)
    };
    Page::Missing(MissingPage { path: logical_path, write_filename })
}

fn list_entries<S: FileStore + ?Sized>(
    store: &S,
    dir: &FileHandle,
) -> Result<Vec<ListingEntry>, WikiError> {
    let mut entries = Vec::new();
    for child in store.list_children(dir)? {
        if child.name.starts_with('.') {
            continue;
        }
        let info = classify(store, &join_path(&dir.path, &child.name))?;
        // Listed by the store but not reachable through it, e.g. a link
        // leaving the tree.
        if info.status == FileType::Missing {
            continue;
        }
        entries.push(ListingEntry {
            display_name: child.name,
            path: info.path,
            file_type: info.status,
        });
    }
    entries.sort_by(|a, b| {
        let a_dir = a.file_type == FileType::Directory;
        let b_dir = b.file_type == FileType::Directory;
        b_dir
            .cmp(&a_dir)
            .then_with(|| a.display_name.to_lowercase().cmp(&b.display_name.to_lowercase()))
    });
    Ok(entries)
}
