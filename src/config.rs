//! Configuration loading and management
//!
//! Handles parsing of the optional `.pm.toml` file in the working directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;

/// Name of the configuration file
pub const CONFIG_FILE: &str = ".pm.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// State file, relative to the working directory
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Documentation locations referenced by tickets and risk checks
    #[serde(default)]
    pub docs: DocsConfig,

    /// State store tuning
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            docs: DocsConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

fn default_state_file() -> PathBuf {
    PathBuf::from("agent_status.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Feature document that ticket `feature_docs` anchors point into
    #[serde(default = "default_features_doc")]
    pub features: String,

    /// Risk assessment document checked by `pm risks`
    #[serde(default = "default_risks_doc")]
    pub risks: PathBuf,
}

fn default_features_doc() -> String {
    "docs/features.md".to_string()
}

fn default_risks_doc() -> PathBuf {
    PathBuf::from("docs/RISKS.md")
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            features: default_features_doc(),
            risks: default_risks_doc(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// How long a command waits for another invocation's lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.pm.toml` from `dir`, or return defaults
    ///
    /// A config file that cannot be read or is invalid is logged and ignored.
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }

        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring config");
                Self::default()
            }
        }
    }

    /// State file path resolved against `root`
    pub fn state_path(&self, root: &Path) -> PathBuf {
        root.join(&self.state_file)
    }

    /// Risk assessment document path resolved against `root`
    pub fn risks_path(&self, root: &Path) -> PathBuf {
        root.join(&self.docs.risks)
    }

    fn validate(&self) -> Result<()> {
        if self.state_file.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("state_file must not be empty".to_string()));
        }
        if self.docs.features.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "docs.features must not be empty".to_string(),
            ));
        }
        if self.docs.risks.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("docs.risks must not be empty".to_string()));
        }
        if self.store.lock_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "store.lock_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.state_file, PathBuf::from("agent_status.json"));
        assert_eq!(cfg.docs.features, "docs/features.md");
        assert_eq!(cfg.docs.risks, PathBuf::from("docs/RISKS.md"));
        assert_eq!(cfg.store.lock_timeout_ms, DEFAULT_LOCK_TIMEOUT_MS);
    }

    #[test]
    fn load_from_dir_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "state_file = \"pm/state.json\"")
            .expect("write config");

        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.state_path(dir.path()), dir.path().join("pm/state.json"));
        assert_eq!(cfg.docs.features, "docs/features.md");
    }

    #[test]
    fn zero_lock_timeout_is_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[store]\nlock_timeout_ms = 0\n").expect("write config");

        let result = Config::load(&path);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        assert_eq!(
            Config::load_from_dir(dir.path()).store.lock_timeout_ms,
            DEFAULT_LOCK_TIMEOUT_MS
        );
    }

    #[test]
    fn empty_features_doc_is_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[docs]\nfeatures = \"  \"\n").expect("write config");

        assert!(matches!(Config::load(&path), Err(Error::InvalidConfig(_))));
    }
}
