use std::path::{Path, PathBuf};

use crate::core::models::{ConfigError, SearchConfig};
use crate::global_constants;

pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn at(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn default_location() -> Self {
        Self::at(Self::get_config_file_path())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<SearchConfig, ConfigError> {
        if !self.config_path.exists() {
            log::info!(
                "{} No config file found, creating {:?}",
                global_constants::LOG_TAG_CONFIG,
                self.config_path
            );
            let default_config = SearchConfig::default();
            self.save(&default_config)?;
            return Ok(default_config);
        }

        let contents = std::fs::read_to_string(&self.config_path).map_err(|source| {
            ConfigError::Io {
                path: self.config_path.clone(),
                source,
            }
        })?;
        let config: SearchConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Corrupt {
                path: self.config_path.clone(),
                source,
            })?;

        log::info!(
            "{} Loaded config from {:?}",
            global_constants::LOG_TAG_CONFIG,
            self.config_path
        );
        log::debug!(
            "{} Query: {:?}, days: {}",
            global_constants::LOG_TAG_CONFIG,
            config.query,
            config.day_restrict
        );

        Ok(config)
    }

    /// Writes to a sibling temp file first so a failed write never truncates
    /// the existing config.
    pub fn save(&self, config: &SearchConfig) -> Result<(), ConfigError> {
        let io_error = |source: std::io::Error| ConfigError::Io {
            path: self.config_path.clone(),
            source,
        };

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let contents = serde_json::to_string_pretty(config)?;
        let temp_path = self.config_path.with_extension("json.tmp");
        std::fs::write(&temp_path, contents).map_err(io_error)?;
        std::fs::rename(&temp_path, &self.config_path).map_err(io_error)?;

        log::info!(
            "{} Saved config to {:?}",
            global_constants::LOG_TAG_CONFIG,
            self.config_path
        );
        Ok(())
    }

    fn get_config_file_path() -> PathBuf {
        match dirs::config_dir() {
            Some(config_dir) => config_dir
                .join(global_constants::APPLICATION_DIR_NAME)
                .join(global_constants::CONFIG_FILE_NAME),
            None => {
                log::warn!(
                    "{} Could not find config directory, using working directory",
                    global_constants::LOG_TAG_CONFIG
                );
                PathBuf::from(global_constants::CONFIG_FILE_NAME)
            }
        }
    }
}
