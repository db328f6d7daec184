//! Magma project configuration.
//!
//! `magma.json` is found by walking up from a working directory, parsed into
//! [`MagmaConfig`], and queried for the active compiler and the absolute
//! output locations handed to the build pipeline:
//!
//! ```no_run
//! use magma_config::config::{self, selection};
//!
//! let path = config::try_find(".").expect("no magma.json");
//! let cfg = config::load(&path)?;
//! let root = config::project_root(&path).unwrap();
//! let generated = cfg.generated_root(root)?;
//! let active = selection::resolve(&cfg);
//! println!("{} -> {}", active.kind, generated.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod files;
mod loader;
pub mod selection;
mod types;

pub use files::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use loader::{ConfigLoader, MAX_ASCENTS, load, project_root, save, try_find, try_load};
pub use selection::{ActiveCompiler, resolve};
pub use types::*;
