//! Configuration loading and environment variable handling

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::domains::{execution::ExecutionConfig, logging, PrintqConfig};
use crate::error::{ConfigError, ConfigResult};

/// Loads configuration from YAML and applies `<PREFIX>_*` overrides
pub struct ConfigLoader {
    prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            prefix: "PRINTQ".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load a YAML file, apply environment overrides, validate
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<PrintqConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: PrintqConfig = if content.trim().is_empty() {
            PrintqConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env(&self) -> ConfigResult<PrintqConfig> {
        let mut config = PrintqConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<PrintqConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    fn apply_env_overrides(&self, config: &mut PrintqConfig) -> ConfigResult<()> {
        self.apply_execution_overrides(&mut config.execution)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    fn apply_execution_overrides(&self, config: &mut ExecutionConfig) -> ConfigResult<()> {
        if let Ok(program) = self.get_env_var("PROGRAM") {
            config.program = PathBuf::from(program);
        }

        if let Ok(timeout) = self.get_env_var("TIMEOUT_SECONDS") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid TIMEOUT_SECONDS: {}", e)))?;
            // Zero switches the timeout off
            config.timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        }

        if let Ok(serialize) = self.get_env_var("SERIALIZE_SUBMISSIONS") {
            config.serialize_submissions = serialize.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid SERIALIZE_SUBMISSIONS: {}", e))
            })?;
        }

        Ok(())
    }

    fn apply_logging_overrides(&self, config: &mut logging::LoggingConfig) -> ConfigResult<()> {
        if let Ok(level) = self.get_env_var("LOG_LEVEL") {
            config.level = logging::LogLevel::from_str(&level).map_err(ConfigError::EnvError)?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = logging::LogFormat::from_str(&format).map_err(ConfigError::EnvError)?;
        }

        Ok(())
    }

    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
