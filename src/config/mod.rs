//! Persistent user preferences.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::utils::paths;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Unknown setting `{0}`")]
    UnknownKey(String),
    #[error("Invalid value for `{key}`: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
    pub currency_symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    pub confirm_deletes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_file: None,
            currency_symbol: "$".into(),
            log_filter: None,
            confirm_deletes: true,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = [
        "ledger_file",
        "currency_symbol",
        "log_filter",
        "confirm_deletes",
    ];

    /// Resolves the ledger file, falling back to the default inside `base`.
    pub fn ledger_path(&self, base: &Path) -> PathBuf {
        self.ledger_file
            .clone()
            .unwrap_or_else(|| paths::ledger_file_in(base))
    }

    /// Formats an amount with the configured currency symbol.
    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "ledger_file" => self
                .ledger_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(default)".into()),
            "currency_symbol" => self.currency_symbol.clone(),
            "log_filter" => self.log_filter.clone().unwrap_or_else(|| "(default)".into()),
            "confirm_deletes" => self.confirm_deletes.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Updates one setting from its textual form. `-` clears optional values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let clear = value.trim() == "-";
        match key {
            "ledger_file" => {
                self.ledger_file = (!clear).then(|| PathBuf::from(value.trim()));
            }
            "currency_symbol" => self.currency_symbol = value.trim().to_string(),
            "log_filter" => {
                self.log_filter = (!clear).then(|| value.trim().to_string());
            }
            "confirm_deletes" => {
                self.confirm_deletes = parse_bool(value).ok_or_else(|| {
                    ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    }
                })?;
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at the application data directory.
    pub fn new() -> Self {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let path = paths::config_file_in(&base);
        Self { base, path }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.base)?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = self.path.with_extension(format!("json.{TMP_SUFFIX}"));
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.ledger_path(manager.base_dir()),
            dir.path().join("invoices.json")
        );
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().join("nested"));
        let mut config = Config::default();
        config.set("currency_symbol", "€").unwrap();
        config.set("confirm_deletes", "no").unwrap();
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn save_replaces_file_without_leaving_tmp() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        manager.save(&Config::default()).unwrap();
        let mut config = Config::default();
        config.set("currency_symbol", "£").unwrap();
        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap().currency_symbol, "£");
        assert!(!manager.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        fs::write(manager.path(), r#"{ "currency_symbol": "£" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency_symbol, "£");
        assert!(config.confirm_deletes);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("confirm_deletes", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn dash_clears_optional_values() {
        let mut config = Config::default();
        config.set("ledger_file", "/tmp/books.json").unwrap();
        config.set("ledger_file", "-").unwrap();
        assert!(config.ledger_file.is_none());
        assert_eq!(config.money(12.5), "$12.50");
    }
}
