//! Init subcommand for magma-config
//!
//! Writes a fresh magma.json with schema defaults and the chosen compiler
//! section populated.

use crate::config::{CompilerKind, MagmaConfig};
use clap::Args;

/// Arguments for the init subcommand
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Compiler backend to select: esbuild or swc
    #[arg(long, default_value = "esbuild", value_parser = parse_compiler)]
    pub compiler: CompilerKind,

    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Project version
    #[arg(long, value_name = "VERSION")]
    pub project_version: Option<String>,

    /// Entry point to compile (repeatable)
    #[arg(short, long = "entry", value_name = "FILE")]
    pub entry_points: Vec<String>,

    /// Overwrite an existing magma.json
    #[arg(long)]
    pub force: bool,
}

fn parse_compiler(s: &str) -> Result<CompilerKind, String> {
    s.parse()
}

impl InitArgs {
    /// Build the config this invocation would write.
    pub fn to_config(&self) -> MagmaConfig {
        let mut config = MagmaConfig::with_compiler(self.compiler);
        config.name = self.name.clone();
        config.version = self.project_version.clone();
        if let Some(opts) = config.esbuild.as_mut() {
            opts.entry_points = self.entry_points.clone();
        }
        if let Some(opts) = config.swc.as_mut() {
            opts.entry_points = self.entry_points.clone();
        }
        config
    }
}
