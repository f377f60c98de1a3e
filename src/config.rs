//! YAML configuration
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup that stores its snapshots under `./academy-data`.

use crate::engine::SkillLevel;
use crate::store::{FileStore, StateStore};
use crate::{AcademyError, Result};
use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "CYBER_ACADEMY_CONFIG";

/// Where tracker snapshots live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    /// Period of the KotH heartbeat
    pub tick_interval_ms: u64,
    /// Fixed seed for mock leaderboards; random when absent
    pub seed: Option<u64>,
    pub log_level: String,
    /// Difficulty the simulation terminal starts in
    pub difficulty: SkillLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File,
            data_dir: PathBuf::from("academy-data"),
            tick_interval_ms: 1000,
            seed: None,
            log_level: "warn".to_string(),
            difficulty: SkillLevel::Beginner,
        }
    }
}

impl Config {
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text)
    }

    /// Load the file named by `CYBER_ACADEMY_CONFIG`, or defaults if unset
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(AcademyError::InvalidConfig("tick_interval_ms must be positive".to_string()).into());
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| AcademyError::InvalidConfig(format!("unknown log level '{}'", self.log_level)).into())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Build the state store this config describes
    pub fn open_store(&self) -> Result<StateStore> {
        match self.storage {
            StorageBackend::Memory => Ok(StateStore::in_memory()),
            StorageBackend::File => Ok(StateStore::new(Arc::new(FileStore::open(&self.data_dir)?))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.log_level().unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn fields_override_defaults() {
        let config = Config::parse(
            "storage: memory\ntick_interval_ms: 250\nseed: 7\nlog_level: debug\ndifficulty: advanced\n",
        )
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.difficulty, SkillLevel::Advanced);
        assert!(config.open_store().is_ok());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Config::parse("tick_interval_ms: 0").is_err());
        assert!(Config::parse("log_level: loud").is_err());
        assert!(Config::parse("colour: blue").is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("academy.yaml");
        std::fs::write(&path, format!("data_dir: {}\n", dir.path().join("state").display())).unwrap();
        let config = Config::load(&path).unwrap();
        config.open_store().unwrap();
        assert!(dir.path().join("state").is_dir());
    }
}
