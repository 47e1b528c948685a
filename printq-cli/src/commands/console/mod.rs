//! Console command implementation
//!
//! Interactive REPL where the operator builds up the job queue and submits it
//! to the print processor.

use anyhow::Result;
use printq_config::PrintqConfig;
use std::path::PathBuf;

pub mod formatter;
pub mod parser;
pub mod repl;

use repl::PrintqConsole;

/// Console command configuration
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    pub history_file: Option<PathBuf>,
}

/// Main entry point for the console command
pub async fn run_console(settings: &PrintqConfig, config: ConsoleConfig) -> Result<()> {
    let console = PrintqConsole::new(settings, config).await?;
    console.run().await
}
