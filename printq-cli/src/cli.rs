//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Queue print jobs and hand them to the print processor", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive job console (the default)
    Console {
        /// History file (default: ~/.printq_history)
        #[arg(long, value_name = "PATH")]
        history_file: Option<PathBuf>,
    },

    /// Submit jobs once and wait for the print processor to finish
    Submit {
        /// Job as ID,PAGES,CATEGORY,PRIORITY (repeatable)
        #[arg(long = "job", value_name = "ID,PAGES,CAT,PRI", required_unless_present = "from_file")]
        jobs: Vec<String>,

        /// Read a batch in processor input format
        #[arg(long, value_name = "PATH", conflicts_with = "jobs")]
        from_file: Option<PathBuf>,

        /// Print the encoded batch instead of running the processor
        #[arg(long)]
        dry_run: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Generate a sample configuration file
    Generate {
        /// Output file path
        #[arg(long, value_name = "PATH")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration in use
    Show {
        /// Path to configuration file (optional, uses default loading logic)
        #[arg(long, value_name = "PATH")]
        config_file: Option<PathBuf>,

        /// Output format: yaml, json
        #[arg(long, value_name = "FORMAT", default_value = "yaml")]
        format: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_submit_accepts_repeated_jobs() {
        let cli = Cli::try_parse_from([
            "printq", "submit", "--job", "1,10,1,1", "--job", "2,5,3,2", "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Submit { jobs, dry_run, from_file }) => {
                assert_eq!(jobs, vec!["1,10,1,1", "2,5,3,2"]);
                assert!(dry_run);
                assert!(from_file.is_none());
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn test_submit_needs_jobs_or_file() {
        assert!(Cli::try_parse_from(["printq", "submit"]).is_err());
        assert!(Cli::try_parse_from([
            "printq", "submit", "--job", "1,1,1,1", "--from-file", "batch.txt"
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["printq", "console", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
