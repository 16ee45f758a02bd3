//! User configuration stored in `~/.entrytally/config.json`

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::parsers::EntryQuery;
use crate::types::{EntryTallyError, Result};

const APP_DIR: &str = ".entrytally";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "entries.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export of the `data_entries` table; defaults to `~/.entrytally/entries.json`
    pub data_file: Option<PathBuf>,
    /// Only show entries owned by this user
    pub owner_id: Option<String>,
    pub include_deleted: bool,
    /// Date entries on the UTC calendar instead of local time
    pub utc: bool,
}

impl Config {
    /// `~/.entrytally`
    pub fn app_dir() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| EntryTallyError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(APP_DIR))
    }

    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::app_dir()?.join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| EntryTallyError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::app_dir()?.join(DEFAULT_DATA_FILE)),
        }
    }

    pub fn query(&self) -> EntryQuery {
        EntryQuery {
            owner_id: self.owner_id.clone(),
            include_deleted: self.include_deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(&tmp.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{ "owner_id": "user-1", "utc": true }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.owner_id.as_deref(), Some("user-1"));
        assert!(config.utc);
        assert!(!config.include_deleted);
        assert_eq!(config.query().owner_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ owner_id: ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, EntryTallyError::Config(_)));
    }

    #[test]
    fn test_explicit_data_file_wins() {
        let config = Config {
            data_file: Some(PathBuf::from("/tmp/export.json")),
            ..Config::default()
        };
        assert_eq!(config.data_file().unwrap(), PathBuf::from("/tmp/export.json"));
    }
}
