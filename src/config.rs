//! Project configuration, read from `.depgraph/config.toml`.
//!
//! Every field has a default, so a missing or partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;

/// Directory names that are never descended into.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
    ".cache",
    ".turbo",
    ".depgraph",
];

/// File extensions that become graph nodes.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "json"];

/// Number of entries in the summary's most-imported list.
pub const DEFAULT_SUMMARY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepGraphConfig {
    /// Directory names skipped during discovery.
    pub exclude_dirs: Vec<String>,
    /// Extensions (without the dot) of files that become nodes.
    pub extensions: Vec<String>,
    /// How many files `summary` ranks.
    pub summary_limit: usize,
    /// Analyze files on the rayon pool.
    pub parallel: bool,
}

impl Default for DepGraphConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            summary_limit: DEFAULT_SUMMARY_LIMIT,
            parallel: true,
        }
    }
}

impl DepGraphConfig {
    /// Load the config for a project root, falling back to defaults.
    ///
    /// A broken config file is reported and ignored; it never fails a build.
    pub fn load_for_root(root: &Path) -> Self {
        Self::load(&root.join(".depgraph").join("config.toml"))
    }

    /// Load from an explicit path, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Strict variant of [`DepGraphConfig::load`].
    pub fn try_load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }

    pub fn is_source_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DepGraphConfig::from_toml("summary_limit = 10\n").unwrap();
        assert_eq!(config.summary_limit, 10);
        assert!(config.parallel);
        assert!(config.is_excluded_dir("node_modules"));
        assert!(config.is_source_extension("tsx"));
    }

    #[test]
    fn test_overrides_lists() {
        let config = DepGraphConfig::from_toml(
            "exclude_dirs = [\"vendor\"]\nextensions = [\"ts\"]\nparallel = false\n",
        )
        .unwrap();
        assert!(config.is_excluded_dir("vendor"));
        assert!(!config.is_excluded_dir("node_modules"));
        assert!(config.is_source_extension("ts"));
        assert!(!config.is_source_extension("js"));
        assert!(!config.parallel);
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(DepGraphConfig::from_toml("summary_limit = \"many\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DepGraphConfig::load_for_root(dir.path());
        assert_eq!(config, DepGraphConfig::default());
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".depgraph")).unwrap();
        fs::write(dir.path().join(".depgraph/config.toml"), "parallel = [").unwrap();
        let config = DepGraphConfig::load_for_root(dir.path());
        assert_eq!(config, DepGraphConfig::default());
    }
}
