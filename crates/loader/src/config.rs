use crate::error::{LoaderError, Result};
use projgraph_csproj::DEFAULT_KEY_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for discovering and loading project files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Extension of project description files, without the dot
    pub project_extension: String,

    /// Package list expected next to each project file
    pub packages_config: String,

    /// Lock file expected next to each project file
    pub lock_file: String,

    /// Directory levels between a project file and the directory naming it.
    /// Every project in the tree is expected to follow the same layout.
    pub key_depth: usize,

    /// Directory names skipped during discovery (case-insensitive)
    pub exclude: Vec<String>,

    /// Honour .gitignore files while walking
    pub respect_gitignore: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            project_extension: "csproj".to_string(),
            packages_config: "packages.config".to_string(),
            lock_file: "packages.lock.json".to_string(),
            key_depth: DEFAULT_KEY_DEPTH,
            exclude: vec![
                ".git".to_string(),
                ".vs".to_string(),
                "bin".to_string(),
                "obj".to_string(),
                "packages".to_string(),
                "node_modules".to_string(),
            ],
            respect_gitignore: true,
        }
    }
}

impl LoaderConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let ext = self.project_extension.trim();
        if ext.is_empty() {
            return Err(LoaderError::invalid_config("project_extension must not be empty"));
        }
        if ext.starts_with('.') {
            return Err(LoaderError::invalid_config(format!(
                "project_extension ({ext}) must be given without a leading dot"
            )));
        }

        if self.key_depth == 0 {
            return Err(LoaderError::invalid_config(
                "key_depth must be > 0 (depth 0 names the project file itself)",
            ));
        }

        if self.packages_config.trim().is_empty() || self.lock_file.trim().is_empty() {
            return Err(LoaderError::invalid_config(
                "packages_config and lock_file must name a file",
            ));
        }

        Ok(())
    }

    /// Whether a directory or file name is excluded from discovery
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(name))
    }
}
