//! Text rendering for the command-line tool.

use crate::config::{ActiveCompiler, CompilerOptions, MagmaConfig};
use std::io;
use std::path::Path;

/// One-screen summary of a loaded config.
pub fn format_summary(config: &MagmaConfig, config_path: &Path) -> String {
    let mut out = String::new();

    out.push_str(&format!("config: {}\n", config_path.display()));
    out.push_str(&format!(
        "name: {}\n",
        config.name.as_deref().unwrap_or("(unnamed)")
    ));
    if let Some(ref version) = config.version {
        out.push_str(&format!("version: {}\n", version));
    }
    out.push_str(&format!("compiler: {}\n", config.compiler));
    out.push_str(&format!("outputFolder: {}\n", config.codegen.output_folder()));
    out.push_str(&format!(
        "typescriptOutput: {}\n",
        config.codegen.typescript_output()
    ));
    if let Some(ref outputs) = config.codegen.other_outputs {
        for (name, path) in outputs {
            out.push_str(&format!("otherOutputs.{}: {}\n", name, path));
        }
    }
    out.push_str(&format!("nodeModulesDir: {}\n", config.node_modules_dir()));

    out
}

/// Absolute output locations, resolved against `project_root`.
pub fn format_paths(config: &MagmaConfig, project_root: &Path) -> io::Result<String> {
    let mut out = String::new();

    out.push_str(&format!(
        "generated: {}\n",
        config.generated_root(project_root)?.display()
    ));
    out.push_str(&format!(
        "typescript: {}\n",
        config.typescript_output_root(project_root)?.display()
    ));
    out.push_str(&format!(
        "node_modules: {}\n",
        config.node_modules_root(project_root)?.display()
    ));
    if let Some(ref outputs) = config.codegen.other_outputs {
        for name in outputs.keys() {
            if let Some(resolved) = config.other_output_root(name, project_root) {
                out.push_str(&format!("{}: {}\n", name, resolved?.display()));
            }
        }
    }

    Ok(out)
}

/// The active compiler and its options.
pub fn format_compiler(active: &ActiveCompiler<'_>) -> String {
    let mut out = format!("compiler: {}\n", active.kind);

    let Some(options) = active.options else {
        out.push_str(&format!("options: (none, no \"{}\" section)\n", active.kind));
        return out;
    };

    if active.entry_points().is_empty() {
        out.push_str("entryPoints: (none)\n");
    } else {
        out.push_str("entryPoints:\n");
        for entry in active.entry_points() {
            out.push_str(&format!("  - {}\n", entry));
        }
    }
    if let Some(out_dir) = active.out_dir() {
        out.push_str(&format!("outdir: {}\n", out_dir));
    }

    match options {
        CompilerOptions::Esbuild(opts) => {
            out.push_str(&format!("bundle: {}\n", opts.bundle()));
            out.push_str(&format!("minify: {}\n", opts.minify()));
            out.push_str(&format!("target: {}\n", opts.target()));
            out.push_str(&format!("sourcemap: {}\n", opts.source_map()));
        }
        CompilerOptions::Swc(opts) => {
            out.push_str(&format!("jscTarget: {}\n", opts.jsc_target()));
            out.push_str(&format!("minify: {}\n", opts.minify()));
            out.push_str(&format!("sourceMaps: {}\n", opts.source_maps()));
            out.push_str(&format!("moduleCommonJs: {}\n", opts.module_common_js()));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompilerKind, resolve};
    use std::collections::BTreeMap;

    #[test]
    fn test_summary_applies_defaults() {
        let mut config = MagmaConfig::default();
        config.codegen.output_folder = None;
        let text = format_summary(&config, Path::new("/p/magma.json"));
        assert!(text.contains("name: (unnamed)"));
        assert!(text.contains("compiler: esbuild"));
        assert!(text.contains("outputFolder: .magma/obj/generated"));
        assert!(!text.contains("version:"));
    }

    #[cfg(unix)]
    #[test]
    fn test_paths_lists_other_outputs() {
        let mut config = MagmaConfig::default();
        let mut outputs = BTreeMap::new();
        outputs.insert("lua".to_string(), "gen\\lua".to_string());
        config.codegen.other_outputs = Some(outputs);

        let text = format_paths(&config, Path::new("/p")).unwrap();
        assert!(text.contains("generated: /p/.magma/obj/generated\n"));
        assert!(text.contains("typescript: /p/.magma/obj/ts\n"));
        assert!(text.contains("lua: /p/gen/lua\n"));
    }

    #[test]
    fn test_compiler_without_options() {
        let config = MagmaConfig {
            compiler: CompilerKind::Swc,
            ..MagmaConfig::default()
        };
        let text = format_compiler(&resolve(&config));
        assert!(text.starts_with("compiler: swc\n"));
        assert!(text.contains("no \"swc\" section"));
    }

    #[test]
    fn test_compiler_esbuild_options() {
        let mut config = MagmaConfig::with_compiler(CompilerKind::Esbuild);
        config.esbuild.as_mut().unwrap().entry_points = vec!["src/main.ts".into()];
        let text = format_compiler(&resolve(&config));
        assert!(text.contains("  - src/main.ts\n"));
        assert!(text.contains("outdir: dist/scripts\n"));
        assert!(text.contains("bundle: true\n"));
        assert!(text.contains("sourcemap: false\n"));
    }
}
