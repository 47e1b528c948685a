//! Domain-driven configuration for printq
//!
//! Configuration is split into execution, output and logging domains. Each
//! domain has defaults for every field, can be overridden from `PRINTQ_*`
//! environment variables, and is validated before use.

pub mod error;
pub mod loader;
pub mod validation;

pub mod domains;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

pub use domains::{
    execution::ExecutionConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    output::{DestinationConfig, OutputConfig},
    PrintqConfig,
};

pub use domains::utils::{serde_duration, serde_duration_option};
