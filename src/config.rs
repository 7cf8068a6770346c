//==================================================
// File: config.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Interpreter configuration
// Objective: Load optional TOML settings for the catalog location, script
//            extension, recursion limit and log filter
//==================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::interpreter::DEFAULT_MAX_CALL_DEPTH;

/// File name under `<config_dir>/clashlang/`.
const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "clashlang";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Catalog file; the bundled catalog is used when unset.
    pub catalog: Option<PathBuf>,
    /// Required script extension, without the dot.
    pub extension: String,
    /// Nested function calls allowed before a stack overflow is reported.
    pub max_call_depth: usize,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            extension: "clash".to_string(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            log_filter: "warn".to_string(),
        }
    }
}

impl InterpreterConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the user config directory, or defaults when there is none.
    pub fn load() -> anyhow::Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path.display()))?;
        let config: Self = toml::from_str(&data)
            .with_context(|| format!("parsing configuration {}", path.display()))?;
        Ok(config)
    }

    /// True when `path` carries the configured extension.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "max_call_depth = 50").expect("write");
        let config = InterpreterConfig::load_from(file.path()).expect("load");
        assert_eq!(config.max_call_depth, 50);
        assert_eq!(config.extension, "clash");
        assert_eq!(config.catalog, None);
    }

    #[test]
    fn catalog_path_and_filter_are_read() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "catalog = \"/tmp/commands.json\"\nlog_filter = \"debug\"").expect("write");
        let config = InterpreterConfig::load_from(file.path()).expect("load");
        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/commands.json")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "max_call_depth = \"deep\"").expect("write");
        assert!(InterpreterConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn extension_check() {
        let config = InterpreterConfig::default();
        assert!(config.accepts(Path::new("demo.clash")));
        assert!(!config.accepts(Path::new("demo.txt")));
        assert!(!config.accepts(Path::new("demo")));
    }
}
