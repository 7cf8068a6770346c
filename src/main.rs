//=====================================================
// File: main.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: clashlang CLI entry point
// Objective: Validate the script argument, load configuration and the command
//            catalog, then run the script through the interpreter
//=====================================================

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use clashlang::catalog::CatalogError;
use clashlang::{CommandCatalog, Interpreter, InterpreterConfig, ScriptError};

#[derive(Parser, Debug)]
#[command(name = "clashlang", about = "Catalog-driven line interpreter")]
struct Args {
    /// Script to execute.
    script: Option<PathBuf>,

    /// Command catalog to load instead of the configured or bundled one.
    #[arg(long = "catalog")]
    catalog: Option<PathBuf>,

    /// Configuration file to use instead of the user config directory.
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_error) = match load_config(&args) {
        Ok(config) => (config, None),
        Err(err) => (InterpreterConfig::default(), Some(err)),
    };
    install_tracing(&config.log_filter);
    if let Some(err) = config_error {
        eprintln!("clashlang: {err:#}; using default settings");
    }

    let Some(script) = args.script else {
        println!("Usage: clashlang <file.{}>", config.extension);
        return Ok(());
    };
    if !config.accepts(&script) {
        println!(
            "Error: {} is not a .{} file",
            script.display(),
            config.extension
        );
        return Ok(());
    }

    let source = match fs::read_to_string(&script)
        .with_context(|| format!("reading {}", script.display()))
    {
        Ok(source) => source,
        Err(err) => {
            println!("Error: {err:#}");
            return Ok(());
        }
    };

    let catalog = load_catalog(args.catalog.or(config.catalog.clone()));
    info!(commands = catalog.len(), script = %script.display(), "starting");

    let mut interpreter = Interpreter::new(catalog).with_max_call_depth(config.max_call_depth);
    interpreter.execute_program(&source);
    Ok(())
}

fn load_config(args: &Args) -> Result<InterpreterConfig> {
    match &args.config {
        Some(path) => InterpreterConfig::load_from(path),
        None => InterpreterConfig::load(),
    }
}

/// A catalog that fails to load is reported and the bundled one is used.
fn load_catalog(path: Option<PathBuf>) -> CommandCatalog {
    let loaded = match &path {
        Some(path) => CommandCatalog::load(path),
        None => CommandCatalog::bundled(),
    };
    match loaded {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("{}", catalog_report(err));
            if path.is_none() {
                return CommandCatalog::empty();
            }
            warn!("falling back to the bundled catalog");
            CommandCatalog::bundled().unwrap_or_else(|err| {
                eprintln!("{}", catalog_report(err));
                CommandCatalog::empty()
            })
        }
    }
}

fn catalog_report(err: CatalogError) -> String {
    ScriptError::from(err).render()
}

fn install_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_catalog_falls_back_to_bundled() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = load_catalog(Some(dir.path().join("missing.json")));
        assert_eq!(catalog.len(), CommandCatalog::bundled().expect("bundled").len());
    }

    #[test]
    fn catalog_failures_render_with_e001() {
        let err = CommandCatalog::from_json_str("{ not json").expect_err("parse error");
        let report = catalog_report(err);
        assert!(report.starts_with("error[E001]: "), "report: {report}");
    }
}

//=====================================================
// End of file
//=====================================================
