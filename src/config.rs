use crate::error::{BumpError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the per-repository configuration file, looked up at the repository root.
pub const REPO_CONFIG_FILE: &str = ".bump-version.toml";

/// Name of the per-user configuration file inside the user config directory.
pub const USER_CONFIG_FILE: &str = "bump-version.toml";

/// Represents the complete configuration for bump-version.
///
/// Everything the bumper needs to know about the project layout is carried here
/// and handed to [`crate::bumper::VersionBumper`] explicitly.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Manifest path relative to the repository root.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// Staged paths starting with any of these prefixes trigger a bump.
    #[serde(default = "default_source_prefixes")]
    pub source_prefixes: Vec<String>,

    /// Re-stage the manifest after rewriting it.
    #[serde(default = "default_stage")]
    pub stage: bool,
}

fn default_manifest_path() -> String {
    "pyproject.toml".to_string()
}

fn default_source_prefixes() -> Vec<String> {
    vec!["src/".to_string()]
}

fn default_stage() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest_path: default_manifest_path(),
            source_prefixes: default_source_prefixes(),
            stage: default_stage(),
        }
    }
}

impl Config {
    /// Parses a configuration document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| BumpError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides on top of a loaded configuration.
    ///
    /// Empty `source_prefixes` keeps the configured prefixes; `no_stage`
    /// can only turn staging off.
    pub fn with_overrides(
        mut self,
        manifest: Option<String>,
        source_prefixes: Vec<String>,
        no_stage: bool,
    ) -> Result<Self> {
        if let Some(manifest) = manifest {
            self.manifest_path = manifest;
        }
        if !source_prefixes.is_empty() {
            self.source_prefixes = source_prefixes;
        }
        if no_stage {
            self.stage = false;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.manifest_path.trim().is_empty() {
            return Err(BumpError::config("manifest_path must not be empty"));
        }
        if self.source_prefixes.iter().any(|p| p.is_empty()) {
            return Err(BumpError::config(
                "source_prefixes must not contain an empty prefix",
            ));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.bump-version.toml` at the repository root
/// 3. `bump-version.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, repo_root: &Path) -> Result<Config> {
    let repo_config = repo_root.join(REPO_CONFIG_FILE);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            BumpError::config(format!("Cannot read {}: {}", path.display(), e))
        })?
    } else if repo_config.exists() {
        fs::read_to_string(&repo_config)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(USER_CONFIG_FILE);
        if user_config.exists() {
            fs::read_to_string(user_config)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}
