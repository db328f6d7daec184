//! Discovery, loading and saving of `magma.json`.
//!
//! `try_find` walks up from a start directory; `try_load` reads and parses
//! without panicking; `load` is the fail-fast wrapper; `save` overwrites the
//! file with pretty-printed JSON. None of these lock the file, so concurrent
//! load/save against one path must be serialized by the caller.

use super::files::{FileSystem, OsFileSystem};
use super::types::{CONFIG_FILE_NAME, MagmaConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::paths::{canonicalize, get_absolute_path};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Maximum number of directories checked by ascent search.
pub const MAX_ASCENTS: usize = 50;

const UTF8_BOM: char = '\u{feff}';

/// Config loader over a file I/O capability.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader<F = OsFileSystem> {
    fs: F,
}

impl ConfigLoader<OsFileSystem> {
    /// Loader over the host filesystem.
    pub fn new() -> Self {
        Self { fs: OsFileSystem }
    }
}

impl<F: FileSystem> ConfigLoader<F> {
    /// Loader over a custom filesystem (e.g. `MemoryFileSystem`).
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Find the nearest `magma.json`, starting in `start_dir` and walking up.
    ///
    /// The start directory is checked first. The walk stops after
    /// `MAX_ASCENTS` directories or at the filesystem root.
    pub fn try_find(&self, start_dir: impl AsRef<Path>) -> Option<PathBuf> {
        let start_dir = start_dir.as_ref();
        let mut dir = match canonicalize(start_dir) {
            Ok(dir) => dir,
            Err(e) => {
                debug!(start = %start_dir.display(), error = %e, "Cannot resolve start directory");
                return None;
            }
        };

        for _ in 0..MAX_ASCENTS {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if self.fs.is_file(&candidate) {
                debug!(path = %candidate.display(), "Found config file");
                return Some(candidate);
            }
            debug!(dir = %dir.display(), "No config file here, ascending");

            let parent = match dir.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => break,
            };
            if same_dir(&parent, &dir) {
                break;
            }
            dir = parent;
        }

        None
    }

    /// Resolve the config path: an explicit path (relative to `start_dir`)
    /// wins, otherwise ascent search.
    ///
    /// `Ok(None)` means ascent search found nothing. An explicit path that
    /// cannot be made absolute is an error, not a miss.
    pub fn locate(
        &self,
        start_dir: impl AsRef<Path>,
        explicit: Option<&str>,
    ) -> ConfigResult<Option<PathBuf>> {
        match explicit {
            Some(path) if !path.trim().is_empty() => get_absolute_path(start_dir, path)
                .map(Some)
                .map_err(|e| {
                    warn!(path = %path, error = %e, "Cannot resolve explicit config path");
                    ConfigError::io(path, e)
                }),
            _ => Ok(self.try_find(start_dir)),
        }
    }

    /// Read and parse a config file. Failures are returned, never raised.
    pub fn try_load(&self, path: impl AsRef<Path>) -> ConfigResult<MagmaConfig> {
        let path = path.as_ref();
        let result = self.read_config(path);
        match &result {
            Ok(_) => debug!(path = %path.display(), "Loaded config"),
            Err(e) => warn!(path = %path.display(), code = e.code().as_str(), "Failed to load config: {}", e),
        }
        result
    }

    fn read_config(&self, path: &Path) -> ConfigResult<MagmaConfig> {
        let text = self
            .fs
            .read_to_string(path)
            .map_err(|e| ConfigError::io(path, e))?;
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);

        let parsed: Option<MagmaConfig> =
            serde_json::from_str(text).map_err(|e| ConfigError::deserialize(path, e))?;
        parsed.ok_or_else(|| ConfigError::EmptyDocument {
            path: path.to_path_buf(),
        })
    }

    /// Fail-fast load: any failure becomes `ConfigError::Invalid`.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<MagmaConfig> {
        self.try_load(path)
            .map_err(|e| ConfigError::invalid(e.to_string()))
    }

    /// Serialize `config` as indented JSON and overwrite `path`.
    pub fn save(&self, config: &MagmaConfig, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::serialize(path, e))?;
        self.fs
            .write(path, &json)
            .map_err(|e| ConfigError::io(path, e))?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Ascent search followed by a fail-fast load.
    ///
    /// `Ok(None)` means no config file was found.
    pub fn find_and_load(
        &self,
        start_dir: impl AsRef<Path>,
    ) -> ConfigResult<Option<(PathBuf, MagmaConfig)>> {
        match self.try_find(start_dir) {
            Some(path) => {
                let config = self.load(&path)?;
                Ok(Some((path, config)))
            }
            None => Ok(None),
        }
    }
}

/// Directory containing a config file; paths in the config resolve against it.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Ascent search on the host filesystem.
pub fn try_find(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    ConfigLoader::new().try_find(start_dir)
}

/// Non-panicking load from the host filesystem.
pub fn try_load(path: impl AsRef<Path>) -> ConfigResult<MagmaConfig> {
    ConfigLoader::new().try_load(path)
}

/// Fail-fast load from the host filesystem.
pub fn load(path: impl AsRef<Path>) -> ConfigResult<MagmaConfig> {
    ConfigLoader::new().load(path)
}

/// Write `config` to the host filesystem.
pub fn save(config: &MagmaConfig, path: impl AsRef<Path>) -> ConfigResult<()> {
    ConfigLoader::new().save(config, path)
}

/// Root detection compares case-insensitively to tolerate host casing quirks.
fn same_dir(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}
