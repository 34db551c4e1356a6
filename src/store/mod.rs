//! File store abstraction the resolver queries.
//!
//! Store paths are relative to the store root, use `/` as separator and
//! carry no leading slash. The empty path names the root directory.

pub mod disk;
pub mod memory;

pub use disk::DiskFileStore;
pub use memory::MemoryFileStore;

use crate::errors::WikiError;

/// Handle to an entry that exists in a [`FileStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: String,
    pub is_directory: bool,
}

/// Immediate child of a directory, as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    pub name: String,
    pub is_directory: bool,
}

/// Read-only view of the content tree backing the wiki.
pub trait FileStore {
    /// Look up `path`; `Ok(None)` when nothing exists there.
    fn get_file(&self, path: &str) -> Result<Option<FileHandle>, WikiError>;

    fn exists(&self, path: &str) -> Result<bool, WikiError> {
        Ok(self.get_file(path)?.is_some())
    }

    /// Content of a file handle.
    fn read_bytes(&self, file: &FileHandle) -> Result<Vec<u8>, WikiError>;

    /// Immediate children of a directory handle, in no particular order.
    fn list_children(&self, dir: &FileHandle) -> Result<Vec<ChildEntry>, WikiError>;

    /// A view on which every lookup sees the same state of the store.
    ///
    /// Stores that cannot freeze their content return themselves.
    fn snapshot(&self) -> Result<Box<dyn FileStore + '_>, WikiError> {
        Ok(Box::new(self))
    }
}

impl<S: FileStore + ?Sized> FileStore for &S {
    fn get_file(&self, path: &str) -> Result<Option<FileHandle>, WikiError> {
        (**self).get_file(path)
    }

    fn exists(&self, path: &str) -> Result<bool, WikiError> {
        (**self).exists(path)
    }

    fn read_bytes(&self, file: &FileHandle) -> Result<Vec<u8>, WikiError> {
        (**self).read_bytes(file)
    }

    fn list_children(&self, dir: &FileHandle) -> Result<Vec<ChildEntry>, WikiError> {
        (**self).list_children(dir)
    }

    fn snapshot(&self) -> Result<Box<dyn FileStore + '_>, WikiError> {
        (**self).snapshot()
    }
}

impl<S: FileStore + ?Sized> FileStore for std::sync::Arc<S> {
    fn get_file(&self, path: &str) -> Result<Option<FileHandle>, WikiError> {
        (**self).get_file(path)
    }

    fn exists(&self, path: &str) -> Result<bool, WikiError> {
        (**self).exists(path)
    }

    fn read_bytes(&self, file: &FileHandle) -> Result<Vec<u8>, WikiError> {
        (**self).read_bytes(file)
    }

    fn list_children(&self, dir: &FileHandle) -> Result<Vec<ChildEntry>, WikiError> {
        (**self).list_children(dir)
    }

    fn snapshot(&self) -> Result<Box<dyn FileStore + '_>, WikiError> {
        (**self).snapshot()
    }
}
