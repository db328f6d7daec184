//! magma-config
//!
//! Command-line front end for locating and inspecting magma.json.

use anyhow::{Result, bail};
use clap::Parser;
use magma_config::cli::{CONFIG_PATH_ENV, Cli, Command, OutputFormat};
use magma_config::config::{CONFIG_FILE_NAME, ConfigLoader, MagmaConfig, project_root, resolve};
use magma_config::error::{ConfigError, ErrorReport};
use magma_config::format::{format_compiler, format_paths, format_summary};
use magma_config::logging::{self, LogTarget};
use magma_config::paths::get_absolute_path;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(&LogTarget::from_arg(&cli.log), cli.verbose)?;

    let start_dir = match cli.dir {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    // --config beats the environment variable
    let explicit = cli
        .config
        .clone()
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok());
    debug!(start = %start_dir.display(), explicit = ?explicit, "Resolving config");

    let loader = ConfigLoader::new();

    if let Command::Init(ref args) = cli.command {
        let target = match explicit {
            Some(ref path) => get_absolute_path(&start_dir, path)?,
            None => get_absolute_path(&start_dir, CONFIG_FILE_NAME)?,
        };
        if target.exists() && !args.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                target.display()
            );
        }
        loader.save(&args.to_config(), &target)?;
        info!(path = %target.display(), compiler = %args.compiler, "Wrote config");
        println!("{}", target.display());
        return Ok(ExitCode::SUCCESS);
    }

    let json_errors = matches!(
        cli.command,
        Command::Show {
            format: OutputFormat::Json
        }
    );

    let config_path = match loader.locate(&start_dir, explicit.as_deref()) {
        Ok(Some(path)) => path,
        Ok(None) => {
            report(&ErrorReport::not_found(&start_dir), json_errors);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            report(&ErrorReport::from(&e), json_errors);
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Command::Find = cli.command {
        println!("{}", config_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = match loader.load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            report(&report_for(&e, &config_path), json_errors);
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(path = %config_path.display(), compiler = %config.compiler, "Loaded config");

    let root = project_root(&config_path)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| start_dir.clone());

    match cli.command {
        Command::Show { format } => print!("{}", render_show(&config, &config_path, format)?),
        Command::Paths => print!("{}", format_paths(&config, &root)?),
        Command::Compiler => print!("{}", format_compiler(&resolve(&config))),
        Command::Find | Command::Init(_) => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn render_show(config: &MagmaConfig, path: &Path, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => format_summary(config, path),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(config)?),
    })
}

fn report_for(err: &ConfigError, path: &Path) -> ErrorReport {
    let report = ErrorReport::from(err);
    if report.path.is_some() {
        report
    } else {
        report.with_path(path.to_string_lossy())
    }
}

fn report(report: &ErrorReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(text) => println!("{}", text),
            Err(_) => eprintln!("error: {}", report.message),
        }
    } else {
        eprintln!("error [{}]: {}", report.code.as_str(), report.message);
    }
}
