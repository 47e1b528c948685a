//! `printq config` handlers

use anyhow::{anyhow, Context, Result};
use printq_config::{ConfigLoader, PrintqConfig};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

/// Load configuration from file or use defaults
pub fn load_config(config_path: Option<&PathBuf>) -> Result<PrintqConfig> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) => {
            if path.exists() {
                info!("Loading configuration from: {:?}", path);
                loader
                    .from_file(path)
                    .context(format!("Failed to load configuration from {:?}", path))
            } else {
                Err(anyhow!("Configuration file not found: {:?}", path))
            }
        }
        None => loader
            .from_env()
            .context("Failed to load configuration from environment"),
    }
}

pub fn handle_config_validate(config_file: &PathBuf) -> Result<()> {
    info!("Validating configuration file: {:?}", config_file);

    if !config_file.exists() {
        return Err(anyhow!("Configuration file not found: {:?}", config_file));
    }

    match load_config(Some(config_file)) {
        Ok(_config) => {
            println!("✅ Configuration file is valid");
            Ok(())
        }
        Err(e) => {
            println!("❌ Configuration validation failed: {:#}", e);
            error!("Configuration validation failed: {:#}", e);
            Err(e)
        }
    }
}

pub fn handle_config_generate(output: &PathBuf, force: bool) -> Result<()> {
    info!("Generating configuration at: {:?}", output);

    if output.exists() && !force {
        return Err(anyhow!(
            "Output file already exists: {:?}. Use --force to overwrite.",
            output
        ));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    fs::write(output, PrintqConfig::generate_sample())
        .context("Failed to write configuration file")?;

    println!("✅ Configuration generated at: {:?}", output);
    println!(
        "🔧 Validate with: printq config validate --config-file {:?}",
        output
    );
    Ok(())
}

pub fn handle_config_show(config_file: Option<&PathBuf>, format: &str) -> Result<()> {
    let config = load_config(config_file)?;
    println!("{}", render_config(&config, format)?);
    Ok(())
}

fn render_config(config: &PrintqConfig, format: &str) -> Result<String> {
    match format.to_lowercase().as_str() {
        "yaml" | "yml" => serde_yaml::to_string(config).context("Failed to serialize to YAML"),
        "json" => serde_json::to_string_pretty(config).context("Failed to serialize to JSON"),
        _ => Err(anyhow!(
            "Unknown output format: {}. Valid formats: yaml, json",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_validates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("printq.yaml");

        handle_config_generate(&path, false).unwrap();
        assert!(handle_config_generate(&path, false).is_err());
        handle_config_generate(&path, true).unwrap();

        let loaded = ConfigLoader::new().from_file(&path).unwrap();
        assert_eq!(loaded.execution, PrintqConfig::default().execution);
    }

    #[test]
    fn test_validate_rejects_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(handle_config_validate(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("typo.yaml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_render_formats() {
        let config = PrintqConfig::default();
        assert!(render_config(&config, "yaml").unwrap().contains("printer_queue"));
        let json: serde_json::Value =
            serde_json::from_str(&render_config(&config, "JSON").unwrap()).unwrap();
        assert_eq!(json["execution"]["program"], "printer_queue");
        assert!(render_config(&config, "toml").is_err());
    }
}
