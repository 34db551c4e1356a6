use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{debug, error, warn};

use crate::errors::WikiError;
use crate::store::{ChildEntry, FileHandle, FileStore};
use crate::utils::ensure_safe_path;

/// File store over a working tree checked out on local disk.
///
/// Dot-entries (`.git`, `.bzr`, editor swap files) are not part of the wiki
/// and are reported as absent.
#[derive(Debug, Clone)]
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    /// Create a new store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = fs::canonicalize(&root).unwrap_or(root);
        debug!("Creating DiskFileStore with root directory: {:?}", root);
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> Result<PathBuf, WikiError> {
        ensure_safe_path(path)?;
        if path.is_empty() {
            Ok(self.root.clone())
        } else {
            Ok(self.root.join(path))
        }
    }

    /// Real location of `path` once symlinks are followed, or `None` when
    /// nothing visible exists there inside the root.
    fn locate(&self, path: &str) -> Result<Option<PathBuf>, WikiError> {
        let full_path = self.full_path(path)?;
        let real = match fs::canonicalize(&full_path) {
            Ok(real) => real,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            // A file used as a directory component ("page.txt/child").
            Err(e) if e.kind() == io::ErrorKind::NotADirectory => return Ok(None),
            Err(e) => {
                error!("Failed to resolve {:?}: {}", full_path, e);
                return Err(WikiError::Io(e));
            }
        };
        let Ok(relative) = real.strip_prefix(&self.root) else {
            warn!("Path {:?} resolves outside the store root to {:?}", path, real);
            return Ok(None);
        };
        if is_hidden(&relative.to_string_lossy()) {
            debug!("Hidden path treated as absent: {:?}", path);
            return Ok(None);
        }
        Ok(Some(real))
    }

    fn require(&self, path: &str) -> Result<PathBuf, WikiError> {
        self.locate(path)?.ok_or(WikiError::NotFound)
    }
}

fn is_hidden(path: &str) -> bool {
    path.split('/').any(|seg| seg.starts_with('.'))
}

impl FileStore for DiskFileStore {
    fn get_file(&self, path: &str) -> Result<Option<FileHandle>, WikiError> {
        let Some(real) = self.locate(path)? else {
            return Ok(None);
        };
        match fs::metadata(&real) {
            Ok(meta) => Ok(Some(FileHandle {
                path: path.to_string(),
                is_directory: meta.is_dir(),
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to stat {:?}: {}", real, e);
                Err(WikiError::Io(e))
            }
        }
    }

    fn read_bytes(&self, file: &FileHandle) -> Result<Vec<u8>, WikiError> {
        let full_path = self.require(&file.path)?;
        let bytes = fs::read(&full_path).map_err(|e| {
            error!("Failed to read file {:?}: {}", full_path, e);
            WikiError::Io(e)
        })?;
        debug!("Read file {:?}, {} bytes", file.path, bytes.len());
        Ok(bytes)
    }

    fn list_children(&self, dir: &FileHandle) -> Result<Vec<ChildEntry>, WikiError> {
        let full_path = self.require(&dir.path)?;
        let entries = fs::read_dir(&full_path).map_err(|e| {
            error!("Failed to read directory {:?}: {}", full_path, e);
            WikiError::Io(e)
        })?;

        let mut result = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let name = entry.file_name().to_string_lossy().to_string();
                    if name.starts_with('.') {
                        continue;
                    }
                    // Follow symlinks so a linked directory lists as one.
                    let is_directory =
                        fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false);
                    result.push(ChildEntry { name, is_directory });
                }
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                }
            }
        }
        debug!("Listed directory {:?}, found {} entries", dir.path, result.len());
        Ok(result)
    }
}
