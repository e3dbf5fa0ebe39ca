//! Configuration management for Fargate Census.
//!
//! This module handles loading application configuration from a TOML file
//! located at `~/.fargate-census/config.toml`. Configuration covers AWS
//! client settings and output formatting.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure for Fargate Census.
///
/// All configuration options are optional and will fall back to sensible
/// defaults if not specified in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// AWS-specific configuration options
    #[serde(default)]
    pub aws: AwsConfig,

    /// Output formatting configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// AWS SDK configuration options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AwsConfig {
    /// Default AWS region (e.g., "us-east-1")
    /// If not specified, will use AWS SDK's default resolution (env vars, profile, etc.)
    pub region: Option<String>,

    /// AWS profile name to use from ~/.aws/credentials
    /// If not specified, will use the default profile
    pub profile: Option<String>,
}

/// Output configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format written to stdout
    /// Options: "text", "json"
    #[serde(default = "default_format")]
    pub format: String,
}

// Default value functions for serde
fn default_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Returns the path to the configuration directory (~/.fargate-census/)
    pub fn config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home_dir.join(".fargate-census"))
    }

    /// Returns the path to the configuration file (~/.fargate-census/config.toml)
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file, creating a default if it doesn't exist.
    ///
    /// # Behavior
    /// 1. If the config file exists, parse and return it
    /// 2. If the config file doesn't exist, create default config file and return defaults
    /// 3. If parsing fails, return error with context
    ///
    /// # Errors
    /// This function will return an error if:
    /// - Home directory cannot be determined
    /// - File I/O operations fail
    /// - TOML parsing fails
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {config_path:?}"))?;

            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {config_path:?}"))?;

            Ok(config)
        } else {
            // Create default config file
            let default_config = Config::default();
            default_config.create_default_config()?;
            Ok(default_config)
        }
    }

    /// Creates a default configuration file at ~/.fargate-census/config.toml
    ///
    /// This function will create the config directory if it doesn't exist, then
    /// write a default configuration file with helpful comments.
    ///
    /// # Errors
    /// This function will return an error if:
    /// - Directory creation fails
    /// - File write operations fail
    pub fn create_default_config(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        let config_path = Self::config_file_path()?;

        // Create directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {config_dir:?}"))?;
        }

        // Generate default config with comments
        let default_toml = r#"# Fargate Census Configuration File
# This file is automatically generated with default values.
# You can edit this file to customize Fargate Census's behavior.

[aws]
# Default AWS region to use (optional)
# If not specified, uses AWS SDK's default resolution (env vars, ~/.aws/config, etc.)
# region = "us-east-1"

# AWS profile to use from ~/.aws/credentials (optional)
# If not specified, uses the default profile
# profile = "default"

[output]
# Report format written to stdout
# Options: "text", "json"
format = "text"
"#;

        fs::write(&config_path, default_toml)
            .with_context(|| format!("Failed to write config file: {config_path:?}"))?;

        Ok(())
    }
}
