//! Output destination configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Where each output line is delivered, in order
    #[serde(default = "default_destinations")]
    pub destinations: Vec<DestinationConfig>,

    /// Lines kept in the console transcript
    #[serde(default = "default_transcript_limit")]
    pub transcript_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DestinationConfig {
    Console {
        /// Prefix each line with the stream it came from
        #[serde(default = "crate::domains::utils::default_false")]
        show_channel: bool,
    },
    File {
        path: PathBuf,
        #[serde(default = "crate::domains::utils::default_true")]
        append: bool,
    },
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            destinations: default_destinations(),
            transcript_limit: default_transcript_limit(),
        }
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.destinations.is_empty() {
            return Err(self.validation_error("At least one destination must be configured"));
        }

        for destination in &self.destinations {
            destination.validate()?;
        }

        validate_positive(self.transcript_limit, "transcript_limit", self.domain_name())
    }

    fn domain_name(&self) -> &'static str {
        "output"
    }
}

impl Validatable for DestinationConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            DestinationConfig::Console { .. } => Ok(()),
            DestinationConfig::File { path, .. } => {
                validate_required_string(&path.to_string_lossy(), "path", self.domain_name())
            }
        }
    }

    fn domain_name(&self) -> &'static str {
        "output.destinations"
    }
}

fn default_destinations() -> Vec<DestinationConfig> {
    vec![DestinationConfig::Console { show_channel: false }]
}

fn default_transcript_limit() -> usize {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_defaults() {
        let config = OutputConfig::default();
        assert_eq!(config.destinations.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_requires_a_destination() {
        let config = OutputConfig {
            destinations: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_destination_needs_path() {
        let config = OutputConfig {
            destinations: vec![DestinationConfig::File {
                path: PathBuf::new(),
                append: true,
            }],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_destination_yaml_shape() {
        let yaml = "- type: console\n  show_channel: true\n- type: file\n  path: /tmp/printq.log\n";
        let parsed: Vec<DestinationConfig> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed[0], DestinationConfig::Console { show_channel: true });
        assert_eq!(
            parsed[1],
            DestinationConfig::File {
                path: PathBuf::from("/tmp/printq.log"),
                append: true
            }
        );
    }
}
