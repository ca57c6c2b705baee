use std::{fs, path::Path};

use tracing::{debug, info, instrument};

use super::{Config, ConfigPaths};
use crate::{DevConsoleError, Result};

impl Config {
    /// Loads the main configuration file, or defaults when it does not exist.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined, or the file
    /// exists but cannot be read or parsed
    #[instrument]
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;

        if !path.exists() {
            info!("No config file found, using defaults");
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid TOML, or does
    /// not match the schema
    pub fn load_from(path: &Path) -> Result<Config> {
        debug!(path = %path.display(), "Loading config");

        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| DevConsoleError::toml_parse(e, Some(path)))?;
        config.validate()?;

        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if the string is not valid TOML or fails validation
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| DevConsoleError::toml_parse(e, None))?;
        config.validate()?;

        Ok(config)
    }

    /// Renders the JSON schema describing the configuration file.
    ///
    /// # Errors
    /// Returns error if the schema cannot be serialized
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).map_err(|e| DevConsoleError::Schema(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.console.history_size == 0 {
            return Err(DevConsoleError::ConfigValidation {
                component: "console".to_string(),
                details: "history_size must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
