//! Configuration file loading.
//!
//! Reads `<config_dir>/codecopier/config.toml` unless a path is given on the
//! command line. Every key is optional.

use crate::file_scanner::default_ignore_patterns;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub browser: BrowserConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Start with ignored names hidden
    pub hide_ignored: bool,
    /// Replaces the built-in ignore list when set
    pub ignore_patterns: Option<Vec<String>>,
    /// Added on top of the (built-in or replaced) ignore list
    pub extra_ignore_patterns: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            hide_ignored: true,
            ignore_patterns: None,
            extra_ignore_patterns: Vec::new(),
        }
    }
}

impl BrowserConfig {
    pub fn ignore_set(&self) -> HashSet<String> {
        let mut set = match &self.ignore_patterns {
            Some(patterns) => patterns.iter().cloned().collect(),
            None => default_ignore_patterns(),
        };
        set.extend(self.extra_ignore_patterns.iter().cloned());
        set
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    /// Filter directive used when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl ConfigFile {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codecopier").join("config.toml"))
    }

    /// Loads the default config file. A missing file yields defaults; a broken
    /// one is reported on stderr and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path().filter(|p| p.exists()) else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: ignoring config {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: ConfigFile =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_hide_the_builtin_ignore_set() {
        let config = ConfigFile::default();
        assert!(config.browser.hide_ignored);
        assert_eq!(config.browser.ignore_set(), default_ignore_patterns());
        assert!(config.logging.file.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[browser]\nextra_ignore_patterns = [\"target\"]").unwrap();

        let config = ConfigFile::load_from(file.path()).unwrap();
        assert!(config.browser.hide_ignored);
        let set = config.browser.ignore_set();
        assert!(set.contains("target"));
        assert!(set.contains(".git"));
    }

    #[test]
    fn explicit_patterns_replace_the_builtin_list() {
        let toml_content = r#"
            [browser]
            hide_ignored = false
            ignore_patterns = ["dist"]

            [logging]
            file = "/tmp/codecopier.log"
            level = "debug"
        "#;
        let config: ConfigFile = toml::from_str(toml_content).unwrap();
        assert!(!config.browser.hide_ignored);
        assert_eq!(config.browser.ignore_set(), HashSet::from(["dist".to_string()]));
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/codecopier.log")));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[browser]\nhide_ignored = \"sometimes\"").unwrap();
        assert!(ConfigFile::load_from(file.path()).is_err());
    }
}
