//! Configuration types and structures.
//!
//! This module contains the `magma.json` schema. Absent keys take their
//! defaults at deserialization time; an explicit `null` on an optional value
//! is kept as `None` (and written back as `null`), with the default applied by
//! the accessor methods instead.

use crate::paths::get_absolute_path;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name recognized by ascent search.
pub const CONFIG_FILE_NAME: &str = "magma.json";

/// Default folder for generated (non-TypeScript) code.
pub const DEFAULT_OUTPUT_FOLDER: &str = ".magma/obj/generated";

/// Default folder for generated TypeScript.
pub const DEFAULT_TYPESCRIPT_OUTPUT: &str = ".magma/obj/ts";

/// Default node_modules location used by Magma.
pub const DEFAULT_NODE_MODULES_DIR: &str = ".magma/node_modules";

/// Default compiler output directory (both backends).
pub const DEFAULT_OUT_DIR: &str = "dist/scripts";

/// Default ECMAScript target (both backends).
pub const DEFAULT_TARGET: &str = "es2022";

/// Root configuration for a Magma project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagmaConfig {
    /// Optional project name used for identification.
    #[serde(default)]
    pub name: Option<String>,

    /// Optional project version (e.g., "1.0.0").
    #[serde(default)]
    pub version: Option<String>,

    /// Code generation output locations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub codegen: CodegenOptions,

    /// The active compiler backend.
    #[serde(default)]
    pub compiler: CompilerKind,

    /// Options used when `compiler` is `esbuild`.
    #[serde(default)]
    pub esbuild: Option<EsbuildOptions>,

    /// Options used when `compiler` is `swc`.
    #[serde(default)]
    pub swc: Option<SwcOptions>,

    /// Relative path to the node_modules directory used by Magma.
    #[serde(default = "default_node_modules_dir")]
    pub node_modules_dir: Option<String>,
}

impl Default for MagmaConfig {
    fn default() -> Self {
        Self {
            name: None,
            version: None,
            codegen: CodegenOptions::default(),
            compiler: CompilerKind::default(),
            esbuild: None,
            swc: None,
            node_modules_dir: default_node_modules_dir(),
        }
    }
}

impl MagmaConfig {
    /// A fresh config selecting `kind`, with that backend's options populated.
    pub fn with_compiler(kind: CompilerKind) -> Self {
        let mut config = Self {
            compiler: kind,
            ..Self::default()
        };
        match kind {
            CompilerKind::Esbuild => config.esbuild = Some(EsbuildOptions::default()),
            CompilerKind::Swc => config.swc = Some(SwcOptions::default()),
        }
        config
    }

    /// Options for the selected compiler, or `None` if that section is absent.
    ///
    /// The non-selected section is ignored even when present.
    pub fn active_compiler_options(&self) -> Option<CompilerOptions<'_>> {
        match self.compiler {
            CompilerKind::Esbuild => self.esbuild.as_ref().map(CompilerOptions::Esbuild),
            CompilerKind::Swc => self.swc.as_ref().map(CompilerOptions::Swc),
        }
    }

    pub fn node_modules_dir(&self) -> &str {
        self.node_modules_dir
            .as_deref()
            .unwrap_or(DEFAULT_NODE_MODULES_DIR)
    }

    /// Absolute path to the generated code root.
    pub fn generated_root(&self, project_root: impl AsRef<Path>) -> io::Result<PathBuf> {
        get_absolute_path(project_root, self.codegen.output_folder())
    }

    /// Absolute path to the TypeScript output root.
    pub fn typescript_output_root(&self, project_root: impl AsRef<Path>) -> io::Result<PathBuf> {
        get_absolute_path(project_root, self.codegen.typescript_output())
    }

    /// Absolute path to the node_modules directory.
    pub fn node_modules_root(&self, project_root: impl AsRef<Path>) -> io::Result<PathBuf> {
        get_absolute_path(project_root, self.node_modules_dir())
    }

    /// Absolute path of a named entry in `codegen.otherOutputs`.
    ///
    /// Returns `None` when no output with that name is configured.
    pub fn other_output_root(
        &self,
        name: &str,
        project_root: impl AsRef<Path>,
    ) -> Option<io::Result<PathBuf>> {
        self.codegen
            .other_outputs
            .as_ref()
            .and_then(|outputs| outputs.get(name))
            .map(|relative| get_absolute_path(project_root, relative))
    }
}

/// Options controlling code generation output directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenOptions {
    /// Root folder where generated code is emitted.
    #[serde(default = "default_output_folder")]
    pub output_folder: Option<String>,

    /// Root folder where generated TypeScript is emitted.
    #[serde(default = "default_typescript_output")]
    pub typescript_output: Option<String>,

    /// Additional named outputs (key: logical name, value: relative path).
    #[serde(default)]
    pub other_outputs: Option<BTreeMap<String, String>>,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            typescript_output: default_typescript_output(),
            other_outputs: None,
        }
    }
}

impl CodegenOptions {
    pub fn output_folder(&self) -> &str {
        self.output_folder.as_deref().unwrap_or(DEFAULT_OUTPUT_FOLDER)
    }

    pub fn typescript_output(&self) -> &str {
        self.typescript_output
            .as_deref()
            .unwrap_or(DEFAULT_TYPESCRIPT_OUTPUT)
    }
}

/// Compiler backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompilerKind {
    #[default]
    Esbuild,
    Swc,
}

impl CompilerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerKind::Esbuild => "esbuild",
            CompilerKind::Swc => "swc",
        }
    }
}

impl fmt::Display for CompilerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerKind {
    type Err = String;

    /// Case-insensitive: `esbuild`, `Esbuild` and `ESBUILD` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("esbuild") {
            Ok(CompilerKind::Esbuild)
        } else if s.eq_ignore_ascii_case("swc") {
            Ok(CompilerKind::Swc)
        } else {
            Err(format!(
                "unknown compiler '{}', expected 'esbuild' or 'swc'",
                s
            ))
        }
    }
}

impl Serialize for CompilerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CompilerKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Esbuild-specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsbuildOptions {
    /// Entry points (files) to bundle/compile.
    #[serde(default, deserialize_with = "null_as_default")]
    pub entry_points: Vec<String>,

    /// Output directory for compiled bundles.
    #[serde(rename = "outdir", default = "default_out_dir")]
    pub out_dir: Option<String>,

    #[serde(default = "default_true")]
    pub bundle: Option<bool>,

    #[serde(default = "default_true")]
    pub minify: Option<bool>,

    /// Target ECMAScript version (e.g., "es2022").
    #[serde(default = "default_target")]
    pub target: Option<String>,

    #[serde(rename = "sourcemap", default = "default_false")]
    pub source_map: Option<bool>,
}

impl Default for EsbuildOptions {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            out_dir: default_out_dir(),
            bundle: default_true(),
            minify: default_true(),
            target: default_target(),
            source_map: default_false(),
        }
    }
}

impl EsbuildOptions {
    pub fn bundle(&self) -> bool {
        self.bundle.unwrap_or(true)
    }

    pub fn minify(&self) -> bool {
        self.minify.unwrap_or(true)
    }

    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(DEFAULT_TARGET)
    }

    pub fn source_map(&self) -> bool {
        self.source_map.unwrap_or(false)
    }
}

/// SWC-specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwcOptions {
    /// Entry points (files) to compile/transpile.
    #[serde(default, deserialize_with = "null_as_default")]
    pub entry_points: Vec<String>,

    /// Output directory for transpiled scripts.
    #[serde(rename = "outdir", default = "default_out_dir")]
    pub out_dir: Option<String>,

    /// SWC `jsc.target` (e.g., "es2022").
    #[serde(default = "default_target")]
    pub jsc_target: Option<String>,

    #[serde(default = "default_true")]
    pub minify: Option<bool>,

    #[serde(default = "default_false")]
    pub source_maps: Option<bool>,

    /// Emit CommonJS modules instead of ESM.
    #[serde(default = "default_false")]
    pub module_common_js: Option<bool>,
}

impl Default for SwcOptions {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            out_dir: default_out_dir(),
            jsc_target: default_target(),
            minify: default_true(),
            source_maps: default_false(),
            module_common_js: default_false(),
        }
    }
}

impl SwcOptions {
    pub fn jsc_target(&self) -> &str {
        self.jsc_target.as_deref().unwrap_or(DEFAULT_TARGET)
    }

    pub fn minify(&self) -> bool {
        self.minify.unwrap_or(true)
    }

    pub fn source_maps(&self) -> bool {
        self.source_maps.unwrap_or(false)
    }

    pub fn module_common_js(&self) -> bool {
        self.module_common_js.unwrap_or(false)
    }
}

/// Borrowed view of the active compiler's options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompilerOptions<'a> {
    Esbuild(&'a EsbuildOptions),
    Swc(&'a SwcOptions),
}

impl<'a> CompilerOptions<'a> {
    pub fn kind(&self) -> CompilerKind {
        match self {
            CompilerOptions::Esbuild(_) => CompilerKind::Esbuild,
            CompilerOptions::Swc(_) => CompilerKind::Swc,
        }
    }

    pub fn entry_points(&self) -> &'a [String] {
        match self {
            CompilerOptions::Esbuild(opts) => &opts.entry_points,
            CompilerOptions::Swc(opts) => &opts.entry_points,
        }
    }

    pub fn out_dir(&self) -> Option<&'a str> {
        match self {
            CompilerOptions::Esbuild(opts) => opts.out_dir.as_deref(),
            CompilerOptions::Swc(opts) => opts.out_dir.as_deref(),
        }
    }
}

/// Treat an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_output_folder() -> Option<String> {
    Some(DEFAULT_OUTPUT_FOLDER.to_string())
}

fn default_typescript_output() -> Option<String> {
    Some(DEFAULT_TYPESCRIPT_OUTPUT.to_string())
}

fn default_node_modules_dir() -> Option<String> {
    Some(DEFAULT_NODE_MODULES_DIR.to_string())
}

fn default_out_dir() -> Option<String> {
    Some(DEFAULT_OUT_DIR.to_string())
}

fn default_target() -> Option<String> {
    Some(DEFAULT_TARGET.to_string())
}

fn default_true() -> Option<bool> {
    Some(true)
}

fn default_false() -> Option<bool> {
    Some(false)
}
