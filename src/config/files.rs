//! File access used by the config loader.
//!
//! The loader only needs three primitives, so they sit behind a trait that
//! can be swapped for an in-memory double in tests.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Whole-file text I/O, UTF-8 on both ends.
pub trait FileSystem {
    /// Read the whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate the file and write `contents`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Whether `path` names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory filesystem keyed by exact path.
///
/// Directories are implicit: any path not stored as a file is treated as
/// missing by `read_to_string` and `is_file`.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for setting up fixtures.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.insert(path.into(), contents.into());
    }

    /// Current contents of a stored file.
    pub fn contents(&self, path: &Path) -> Option<String> {
        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.get(path).cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Could not find file '{}'", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.insert(path, contents);
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.contains_key(path)
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }
}
