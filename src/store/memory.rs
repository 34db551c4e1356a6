use std::collections::BTreeMap;
use std::io;
use std::sync::{RwLock, RwLockReadGuard};

use crate::errors::WikiError;
use crate::store::{ChildEntry, FileHandle, FileStore};
use crate::utils::{join_path, normalize_path};

/// Volatile in-memory file store.
///
/// Seeded from `(path, content)` pairs: a path ending in `/` (or a `None`
/// content) is a directory. Parent directories of every entry are implied.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    // `None` marks a directory.
    entries: RwLock<Entries>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content<'a, I>(content: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut entries = BTreeMap::new();
        for (path, body) in content {
            match body {
                Some(body) if !path.ends_with('/') => {
                    insert(&mut entries, path, Some(body.as_bytes().to_vec()))
                }
                _ => insert(&mut entries, path, None),
            }
        }
        Self { entries: RwLock::new(entries) }
    }

    /// Add or replace a file, creating its parent directories.
    pub fn add_file(&self, path: &str, content: impl Into<Vec<u8>>) -> Result<(), WikiError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        insert(&mut entries, path, Some(content.into()));
        Ok(())
    }

    pub fn add_directory(&self, path: &str) -> Result<(), WikiError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        insert(&mut entries, path, None);
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Entries>, WikiError> {
        self.entries.read().map_err(|_| poisoned())
    }
}

type Entries = BTreeMap<String, Option<Vec<u8>>>;

fn poisoned() -> WikiError {
    WikiError::Io(io::Error::other("memory file store lock poisoned"))
}

fn insert(entries: &mut Entries, path: &str, content: Option<Vec<u8>>) {
    let path = normalize_path(path);
    let mut parent = String::new();
    let segments: Vec<&str> = path.split('/').collect();
    for seg in &segments[..segments.len().saturating_sub(1)] {
        parent = join_path(&parent, seg);
        entries.entry(parent.clone()).or_insert(None);
    }
    entries.insert(path, content);
}

fn lookup(entries: &Entries, path: &str) -> Option<FileHandle> {
    let path = normalize_path(path);
    if path.is_empty() {
        return Some(FileHandle { path, is_directory: true });
    }
    let is_directory = entries.get(&path)?.is_none();
    Some(FileHandle { path, is_directory })
}

fn read_entry(entries: &Entries, file: &FileHandle) -> Result<Vec<u8>, WikiError> {
    match entries.get(&file.path) {
        Some(Some(bytes)) => Ok(bytes.clone()),
        Some(None) => Err(WikiError::Io(io::Error::other(format!(
            "{} is a directory",
            file.path
        )))),
        None => Err(WikiError::NotFound),
    }
}

fn children(entries: &Entries, dir: &FileHandle) -> Vec<ChildEntry> {
    let prefix = if dir.path.is_empty() {
        String::new()
    } else {
        format!("{}/", dir.path)
    };
    entries
        .iter()
        .filter_map(|(path, content)| {
            let rest = path.strip_prefix(&prefix)?;
            if rest.is_empty() || rest.contains('/') {
                return None;
            }
            Some(ChildEntry { name: rest.to_string(), is_directory: content.is_none() })
        })
        .collect()
}

impl FileStore for MemoryFileStore {
    fn get_file(&self, path: &str) -> Result<Option<FileHandle>, WikiError> {
        Ok(lookup(&*self.read()?, path))
    }

    fn read_bytes(&self, file: &FileHandle) -> Result<Vec<u8>, WikiError> {
        read_entry(&*self.read()?, file)
    }

    fn list_children(&self, dir: &FileHandle) -> Result<Vec<ChildEntry>, WikiError> {
        Ok(children(&*self.read()?, dir))
    }

    fn snapshot(&self) -> Result<Box<dyn FileStore + '_>, WikiError> {
        Ok(Box::new(MemorySnapshot { entries: self.read()? }))
    }
}

/// Holds one read guard, so writers wait until every lookup made through it
/// is done.
struct MemorySnapshot<'a> {
    entries: RwLockReadGuard<'a, Entries>,
}

impl FileStore for MemorySnapshot<'_> {
    fn get_file(&self, path: &str) -> Result<Option<FileHandle>, WikiError> {
        Ok(lookup(&self.entries, path))
    }

    fn read_bytes(&self, file: &FileHandle) -> Result<Vec<u8>, WikiError> {
        read_entry(&self.entries, file)
    }

    fn list_children(&self, dir: &FileHandle) -> Result<Vec<ChildEntry>, WikiError> {
        Ok(children(&self.entries, dir))
    }
}
