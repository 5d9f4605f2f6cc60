use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{FinanceError, Result},
    utils::paths::{app_data_dir, config_file_in, store_file_in, write_atomic},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            data_file: None,
        }
    }
}

impl Config {
    /// Store file to use: the configured one, or `<base>/store.json`.
    pub fn resolve_data_file(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => store_file_in(base),
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    /// Resolves paths only; the directory is created on the first save.
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        if config.currency.trim().is_empty() {
            return Err(FinanceError::Config(format!(
                "{}: currency must not be empty",
                self.path.display()
            )));
        }
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            currency: "EUR".into(),
            data_file: Some(PathBuf::from("household.json")),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(
            config.resolve_data_file(manager.base_dir()),
            dir.path().join("household.json")
        );
    }

    #[test]
    fn base_dir_is_created_only_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("fresh");
        let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
        assert!(!base.exists());

        manager.save(&Config::default()).unwrap();
        assert!(manager.path().exists());
    }

    #[test]
    fn blank_currency_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"currency": "  "}"#).unwrap();
        assert!(matches!(manager.load(), Err(FinanceError::Config(_))));
    }

    #[test]
    fn default_data_file_lives_in_base() {
        let base = Path::new("/srv/finance");
        assert_eq!(
            Config::default().resolve_data_file(base),
            PathBuf::from("/srv/finance/store.json")
        );
    }
}
