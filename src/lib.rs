//! Magma project configuration library
//!
//! Resolves which compiler backend is active, where generated artifacts go,
//! and where the nearest `magma.json` lives.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod paths;
