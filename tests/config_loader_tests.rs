//! Integration tests for magma.json discovery, loading and saving.
//!
//! Runs against the real filesystem through temp directories:
//! - try_find() - ascent search from a start directory
//! - try_load() / load() - parsing and failure reporting
//! - save() - full overwrite with indented camelCase JSON

use magma_config::config::{
    self, CompilerKind, ConfigLoader, EsbuildOptions, MagmaConfig, SwcOptions, project_root,
};
use magma_config::error::ErrorCode;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temp project with `magma.json` at its root and a nested source tree.
fn project_with_config(contents: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("should create temp dir");
    let config_path = temp.path().join("magma.json");
    fs::write(&config_path, contents).expect("should write config");
    fs::create_dir_all(temp.path().join("src").join("scripts")).expect("should create subdirs");
    (temp, config_path)
}

fn canonical(path: &std::path::Path) -> PathBuf {
    magma_config::paths::canonicalize(path).unwrap()
}

#[test]
fn test_find_in_start_directory() {
    let (temp, config_path) = project_with_config("{}");
    let found = config::try_find(temp.path());
    assert_eq!(found, Some(canonical(&config_path)));
}

#[test]
fn test_find_in_ancestor_directory() {
    let (temp, config_path) = project_with_config("{}");
    let start = temp.path().join("src").join("scripts");
    let found = config::try_find(&start);
    assert_eq!(found, Some(canonical(&config_path)));
}

#[test]
fn test_closest_config_wins() {
    let (temp, _root_config) = project_with_config("{}");
    let nested = temp.path().join("src");
    let nested_config = nested.join("magma.json");
    fs::write(&nested_config, r#"{"name":"nested"}"#).unwrap();

    let found = config::try_find(nested.join("scripts")).unwrap();
    assert_eq!(found, canonical(&nested_config));
    assert_eq!(
        config::load(&found).unwrap().name.as_deref(),
        Some("nested")
    );
}

#[test]
fn test_find_not_found() {
    let temp = TempDir::new().unwrap();
    let start = temp.path().join("a").join("b");
    fs::create_dir_all(&start).unwrap();
    assert_eq!(config::try_find(&start), None);
}

#[test]
fn test_directory_named_magma_json_is_ignored() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("magma.json")).unwrap();
    assert_eq!(config::try_find(temp.path()), None);
}

#[test]
fn test_default_filling_from_empty_object() {
    let (_temp, config_path) = project_with_config("{}");
    let config = config::try_load(&config_path).unwrap();
    assert_eq!(config.compiler, CompilerKind::Esbuild);
    assert_eq!(config.codegen.output_folder.as_deref(), Some(".magma/obj/generated"));
    assert_eq!(config.codegen.typescript_output.as_deref(), Some(".magma/obj/ts"));
    assert_eq!(config.node_modules_dir.as_deref(), Some(".magma/node_modules"));
}

#[test]
fn test_malformed_json_reports_message() {
    let (_temp, config_path) = project_with_config("{ \"compiler\": \"swc\", ");
    let err = config::try_load(&config_path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::DeserializationFailure);
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_missing_file_is_io_failure() {
    let temp = TempDir::new().unwrap();
    let err = config::try_load(temp.path().join("magma.json")).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IoFailure);

    let err = config::load(temp.path().join("magma.json")).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidConfiguration);
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_null_document_fails() {
    let (_temp, config_path) = project_with_config("null");
    let err = config::try_load(&config_path).unwrap_err();
    assert_eq!(err.to_string(), "Failed to deserialize magma.json");

    let err = config::load(&config_path).unwrap_err();
    assert_eq!(err.to_string(), "Failed to deserialize magma.json");
}

#[test]
fn test_round_trip_preserves_explicit_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("magma.json");

    let mut other_outputs = BTreeMap::new();
    other_outputs.insert("csharp".to_string(), "gen/cs".to_string());
    other_outputs.insert("docs".to_string(), "gen/docs".to_string());

    let mut original = MagmaConfig {
        name: Some("arena".into()),
        version: Some("0.3.1".into()),
        compiler: CompilerKind::Swc,
        esbuild: Some(EsbuildOptions {
            entry_points: vec!["web/main.ts".into()],
            bundle: Some(false),
            ..EsbuildOptions::default()
        }),
        swc: Some(SwcOptions {
            entry_points: vec!["scripts/a.ts".into(), "scripts/b.ts".into()],
            out_dir: Some("build/js".into()),
            module_common_js: Some(true),
            ..SwcOptions::default()
        }),
        node_modules_dir: None,
        ..MagmaConfig::default()
    };
    original.codegen.other_outputs = Some(other_outputs);
    original.codegen.typescript_output = None;

    config::save(&original, &path).unwrap();
    let loaded = config::load(&path).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_saved_file_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("magma.json");
    config::save(&MagmaConfig::with_compiler(CompilerKind::Esbuild), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(!bytes.starts_with(&[0xEF, 0xBB, 0xBF]));

    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("{\n  \""));

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["compiler"], "esbuild");
    assert_eq!(value["nodeModulesDir"], ".magma/node_modules");
    assert_eq!(value["codegen"]["outputFolder"], ".magma/obj/generated");
    assert_eq!(value["esbuild"]["outdir"], "dist/scripts");
    assert_eq!(value["esbuild"]["entryPoints"], json!([]));
    assert!(value["swc"].is_null());
    assert!(value["name"].is_null());
}

#[test]
fn test_save_to_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("no-such-dir").join("magma.json");
    let err = config::save(&MagmaConfig::default(), &path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IoFailure);
}

#[test]
fn test_find_and_load_resolves_roots() {
    let (temp, _) = project_with_config(
        r#"{
  "compiler": "esbuild",
  "codegen": { "outputFolder": "out/gen", "typescriptOutput": "out/ts" },
  "esbuild": { "entryPoints": ["src/scripts/main.ts"] }
}"#,
    );

    let loader = ConfigLoader::new();
    let (path, config) = loader
        .find_and_load(temp.path().join("src"))
        .unwrap()
        .expect("config should be found");
    let root = project_root(&path).unwrap();

    assert_eq!(
        config.generated_root(root).unwrap(),
        canonical(&temp.path().join("out").join("gen"))
    );
    assert_eq!(
        config.typescript_output_root(root).unwrap(),
        canonical(&temp.path().join("out").join("ts"))
    );

    let active = config::resolve(&config);
    assert_eq!(active.kind, CompilerKind::Esbuild);
    assert_eq!(active.entry_points(), ["src/scripts/main.ts".to_string()]);
}
