use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::utils::{app_home_dir, config_file_in, data_dir_in, ensure_dir};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("{0}")]
    InvalidValue(String),
}

/// User preferences for the tracker shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Storage root override. Defaults to `<home>/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Directory exports are written to when none is given. Defaults to the
    /// working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub start_offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_dir: None,
            currency_symbol: Self::default_currency_symbol(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            start_offline: false,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "data_dir",
        "export_dir",
        "currency_symbol",
        "ui_color_enabled",
        "start_offline",
    ];

    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| data_dir_in(base))
    }

    pub fn resolve_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Key/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let path_or_default = |path: &Option<PathBuf>| {
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(default)".into())
        };
        vec![
            ("data_dir", path_or_default(&self.data_dir)),
            ("export_dir", path_or_default(&self.export_dir)),
            ("currency_symbol", self.currency_symbol.clone()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("start_offline", self.start_offline.to_string()),
        ]
    }

    /// Updates one key from its textual form. `default` clears path overrides.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "data_dir" => self.data_dir = parse_path(value),
            "export_dir" => self.export_dir = parse_path(value),
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(ConfigError::InvalidValue(
                        "currency_symbol cannot be empty".into(),
                    ));
                }
                self.currency_symbol = value.to_string();
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(key, value)?,
            "start_offline" => self.start_offline = parse_bool(key, value)?,
            other => {
                return Err(ConfigError::InvalidValue(format!(
                    "unknown config key `{}` (keys: {})",
                    other,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() || value.eq_ignore_ascii_case("default") {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!(
            "{} expects true or false, got `{}`",
            key, value
        ))),
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        let config_path = config_file_in(&base);
        Ok(Self {
            base_dir: base,
            config_path,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

pub fn default_manager() -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(app_home_dir())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("currency_symbol", "€").unwrap();
        config.set("start_offline", "yes").unwrap();
        config.set("export_dir", "/tmp/exports").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert!(manager.config_path().exists());
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(config.set("theme", "dark").is_err());
        assert!(config.set("ui_color_enabled", "maybe").is_err());
        assert!(config.set("currency_symbol", "  ").is_err());
    }

    #[test]
    fn default_clears_path_override() {
        let mut config = Config::default();
        config.set("data_dir", "/srv/tracker").unwrap();
        config.set("data_dir", "default").unwrap();
        let base = Path::new("/home/me/.txn_tracker");
        assert_eq!(config.resolve_data_dir(base), base.join("data"));
    }

    #[test]
    fn older_files_fill_in_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert!(config.ui_color_enabled);
    }
}
