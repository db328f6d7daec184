//! Active compiler selection for the build pipeline.

use super::types::{CompilerKind, CompilerOptions, MagmaConfig};

/// The selected backend and its options, if the config provides them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveCompiler<'a> {
    pub kind: CompilerKind,
    /// `None` when the selected backend's section is absent from the config.
    pub options: Option<CompilerOptions<'a>>,
}

impl<'a> ActiveCompiler<'a> {
    /// Entry points of the active backend, empty when it has no options.
    pub fn entry_points(&self) -> &'a [String] {
        self.options.map(|o| o.entry_points()).unwrap_or_default()
    }

    pub fn out_dir(&self) -> Option<&'a str> {
        self.options.and_then(|o| o.out_dir())
    }
}

/// Pair the `compiler` discriminator with its options. Never fails.
pub fn resolve(config: &MagmaConfig) -> ActiveCompiler<'_> {
    ActiveCompiler {
        kind: config.compiler,
        options: config.active_compiler_options(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{EsbuildOptions, SwcOptions};

    #[test]
    fn test_resolve_swc_with_options() {
        let mut config = MagmaConfig::with_compiler(CompilerKind::Swc);
        config.swc = Some(SwcOptions {
            entry_points: vec!["index.ts".into()],
            ..SwcOptions::default()
        });

        let active = resolve(&config);
        assert_eq!(active.kind, CompilerKind::Swc);
        match active.options {
            Some(CompilerOptions::Swc(opts)) => assert!(std::ptr::eq(opts, config.swc.as_ref().unwrap())),
            other => panic!("expected swc options, got {:?}", other),
        }
        assert_eq!(active.entry_points(), ["index.ts".to_string()]);
    }

    #[test]
    fn test_resolve_swc_without_options() {
        let config = MagmaConfig {
            compiler: CompilerKind::Swc,
            esbuild: Some(EsbuildOptions::default()),
            ..MagmaConfig::default()
        };

        let active = resolve(&config);
        assert_eq!(active.kind, CompilerKind::Swc);
        assert!(active.options.is_none());
        assert!(active.entry_points().is_empty());
        assert_eq!(active.out_dir(), None);
    }

    #[test]
    fn test_resolve_default_is_esbuild() {
        let config = MagmaConfig::default();
        let active = resolve(&config);
        assert_eq!(active.kind, CompilerKind::Esbuild);
        assert!(active.options.is_none());
    }

    #[test]
    fn test_resolve_esbuild_out_dir() {
        let mut config = MagmaConfig::with_compiler(CompilerKind::Esbuild);
        config.esbuild.as_mut().unwrap().out_dir = Some("build/js".into());
        let active = resolve(&config);
        assert_eq!(active.out_dir(), Some("build/js"));
    }
}
