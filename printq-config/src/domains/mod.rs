//! Domain-specific configuration modules

pub mod execution;
pub mod logging;
pub mod output;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Complete printq configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PrintqConfig {
    /// How the print processor is launched and supervised
    pub execution: execution::ExecutionConfig,

    /// Where processor output lines are delivered
    pub output: output::OutputConfig,

    pub logging: logging::LoggingConfig,
}

impl PrintqConfig {
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.execution.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Render the defaults as a YAML document
    pub fn generate_sample() -> String {
        serde_yaml::to_string(&PrintqConfig::default())
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
