// Application configuration loaded from YAML

use crate::clock::{SequentialIds, SystemClock, UuidV7Ids};
use crate::store::TaskStore;
use crate::views::DEFAULT_DASHBOARD_LIMIT;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info};

/// How the store mints task ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Uuid,
    Sequential,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub id_scheme: IdScheme,
    /// Prefix for sequential ids
    pub id_prefix: String,
    pub dashboard_limit: usize,
    /// Add the sample tasks when a command starts with an empty board
    pub seed_samples: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_scheme: IdScheme::Uuid,
            id_prefix: "task".to_string(),
            dashboard_limit: DEFAULT_DASHBOARD_LIMIT,
            seed_samples: true,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// `<config dir>/taskboard/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskboard").join("config.yaml"))
    }

    /// Load from `path`, or from the default location when `None`
    ///
    /// A missing file at the default location yields defaults; an explicit
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content).context("Failed to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.dashboard_limit == 0 {
            return Err(eyre!("dashboard_limit must be greater than 0"));
        }
        if self.id_scheme == IdScheme::Sequential && self.id_prefix.trim().is_empty() {
            return Err(eyre!("id_prefix cannot be empty for sequential ids"));
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<Level> {
        self.log_level
            .trim()
            .parse()
            .map_err(|_| eyre!("Invalid log_level: {} (expected trace, debug, info, warn or error)", self.log_level))
    }

    /// A fresh, empty store wired up per this config
    pub fn build_store(&self) -> TaskStore {
        match self.id_scheme {
            IdScheme::Uuid => TaskStore::with_parts(SystemClock, UuidV7Ids),
            IdScheme::Sequential => TaskStore::with_parts(SystemClock, SequentialIds::new(self.id_prefix.clone())),
        }
    }
}
