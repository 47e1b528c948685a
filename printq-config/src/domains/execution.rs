//! Print processor execution configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Executable that receives each batch on standard input
    #[serde(default = "default_program")]
    pub program: PathBuf,

    /// Extra command-line arguments for the executable
    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory for the child; inherits ours when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,

    /// Additional environment variables for the child
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Wall-clock limit per session; `null` disables it
    #[serde(
        with = "crate::domains::utils::serde_duration_option",
        default = "default_timeout"
    )]
    pub timeout: Option<Duration>,

    /// How long readers may keep draining after a timed-out child is killed
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_kill_grace_period"
    )]
    pub kill_grace_period: Duration,

    /// Run submissions one after another instead of overlapping them
    #[serde(default = "crate::domains::utils::default_true")]
    pub serialize_submissions: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            working_directory: None,
            env: BTreeMap::new(),
            timeout: default_timeout(),
            kill_grace_period: default_kill_grace_period(),
            serialize_submissions: true,
        }
    }
}

impl Validatable for ExecutionConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(
            &self.program.to_string_lossy(),
            "program",
            self.domain_name(),
        )?;

        if let Some(timeout) = self.timeout {
            validate_positive(timeout.as_secs(), "timeout", self.domain_name())?;
        }

        validate_positive(
            self.kill_grace_period.as_secs(),
            "kill_grace_period",
            self.domain_name(),
        )?;

        if self.env.keys().any(|k| k.is_empty() || k.contains('=')) {
            return Err(self.validation_error("env keys must be non-empty and cannot contain '='"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "execution"
    }
}

fn default_program() -> PathBuf {
    PathBuf::from("printer_queue")
}

fn default_timeout() -> Option<Duration> {
    Some(Duration::from_secs(300))
}

fn default_kill_grace_period() -> Duration {
    Duration::from_secs(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_defaults() {
        let config = ExecutionConfig::default();
        assert_eq!(config.program, PathBuf::from("printer_queue"));
        assert_eq!(config.timeout, Some(Duration::from_secs(300)));
        assert!(config.serialize_submissions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_program() {
        let config = ExecutionConfig {
            program: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_may_be_disabled_but_not_zero() {
        let mut config = ExecutionConfig {
            timeout: None,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_env_key() {
        let mut config = ExecutionConfig::default();
        config.env.insert("A=B".to_string(), "x".to_string());
        assert!(config.validate().is_err());
    }
}
