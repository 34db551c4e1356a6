use crate::errors::WikiError;
use crate::page::{build_page, Page};
use crate::resolver::resolve_page_path;
use crate::resource::{classify, ResourceInfo};
use crate::store::FileStore;

/// The wiki server: answers what lives at a path and which page to render
/// for it. Holds no per-request state.
#[derive(Debug)]
pub struct Server<S> {
    store: S,
}

impl<S: FileStore> Server<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Literal lookup of `path`, without wiki suffix inference.
    pub fn get_info(&self, path: &str) -> Result<ResourceInfo, WikiError> {
        classify(&self.store, path)
    }

    /// Wiki-aware lookup used for browsing. Resolution and the listing of a
    /// directory see one snapshot of the store.
    pub fn get_page(&self, path: &str) -> Result<Page, WikiError> {
        let store = self.store.snapshot()?;
        let (logical_path, info) = resolve_page_path(&*store, path)?;
        build_page(&*store, logical_path, info)
    }

    /// Content of a page's backing file, if it has one.
    pub fn read_page_bytes(&self, page: &Page) -> Result<Option<Vec<u8>>, WikiError> {
        match page {
            Page::Wiki(p) | Page::OtherText(p) | Page::Binary(p) => {
                self.store.read_bytes(&p.resource).map(Some)
            }
            Page::DirectoryListing(_) | Page::Missing(_) => Ok(None),
        }
    }
}
