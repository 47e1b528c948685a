use anyhow::{anyhow, Result};
use clap::Parser;
use printq_config::LogLevel;
use std::str::FromStr;

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::{handle_config_generate, handle_config_show, handle_config_validate, load_config};
use commands::console::{run_console, ConsoleConfig};
use commands::submit::handle_submit;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let mut config = load_config(cli.config.as_ref())?;

    if let Some(level) = &cli.log_level {
        config.logging.level = LogLevel::from_str(level).map_err(|e| anyhow!(e))?;
    }
    printq_logging::init_logging(&config.logging)?;

    match cli.command {
        None => run_console(&config, ConsoleConfig::default()).await,
        Some(Commands::Console { history_file }) => {
            run_console(&config, ConsoleConfig { history_file }).await
        }
        Some(Commands::Submit {
            jobs,
            from_file,
            dry_run,
        }) => handle_submit(&config, &jobs, from_file.as_deref(), dry_run).await,
        Some(Commands::Config { config_cmd }) => match config_cmd {
            ConfigCommands::Validate { config_file } => handle_config_validate(&config_file),
            ConfigCommands::Generate { output, force } => handle_config_generate(&output, force),
            ConfigCommands::Show {
                config_file,
                format,
            } => handle_config_show(config_file.as_ref(), &format),
        },
    }
}
