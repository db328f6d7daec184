//! Path resolution against a project root.
//!
//! Turns a relative-or-absolute path string from `magma.json` into an
//! absolute, `.`/`..`-free, OS-native path:
//! - Backslashes are treated as separators on every host
//! - Rooted inputs ignore the base directory
//! - Pure string manipulation, the path does not need to exist

use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `relative_or_absolute` against `base_dir`.
///
/// An empty or whitespace-only input resolves to `base_dir` itself. Failures
/// come only from the host's absolutization (for example an empty base or an
/// unavailable working directory) and are returned unchanged.
pub fn get_absolute_path(base_dir: impl AsRef<Path>, relative_or_absolute: &str) -> io::Result<PathBuf> {
    let base_dir = base_dir.as_ref();
    if relative_or_absolute.trim().is_empty() {
        return canonicalize(base_dir);
    }

    let normalized = relative_or_absolute.replace('\\', "/");
    let path = Path::new(&normalized);
    if is_rooted(path) {
        canonicalize(path)
    } else {
        canonicalize(&base_dir.join(path))
    }
}

/// Make a path absolute and resolve `.`/`..` without touching the filesystem.
pub fn canonicalize(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(normalize_path_components(&absolute))
}

/// Rooted means absolute on the host, or anchored at the current drive's root
/// on Windows (`/foo`).
fn is_rooted(path: &Path) -> bool {
    path.is_absolute() || path.has_root()
}

/// Normalize path components without requiring the file to exist.
/// Handles `.` and `..` components.
fn normalize_path_components(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => components.push(Component::Prefix(p)),
            Component::RootDir => components.push(Component::RootDir),
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` above the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(Component::ParentDir),
            },
            Component::Normal(name) => components.push(Component::Normal(name)),
        }
    }

    components.iter().collect()
}
