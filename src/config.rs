//! Configuration management for the phonebook.
//!
//! This module handles loading and validating configuration from environment
//! variables, with a `.env` file picked up when present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Configuration for the phonebook application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON storage file (default: "phonebook.json")
    pub storage_path: PathBuf,

    /// Whether the storage file is pretty-printed (default: true)
    pub pretty_json: bool,

    /// Region used to interpret national-format phone input (default: "RO")
    pub default_region: String,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PHONEBOOK_STORAGE_PATH`: storage file path (default: "phonebook.json")
    /// - `PHONEBOOK_PRETTY_JSON`: "true" or "false" (default: true)
    /// - `PHONEBOOK_DEFAULT_REGION`: ISO 3166-1 alpha-2 region (default: "RO")
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Pick up a .env file if present, without failing when absent.
        let _ = dotenvy::dotenv();

        let storage_path = env::var("PHONEBOOK_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("phonebook.json"));

        if storage_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "PHONEBOOK_STORAGE_PATH".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let pretty_json = Self::parse_env_bool("PHONEBOOK_PRETTY_JSON", true)?;

        let default_region =
            env::var("PHONEBOOK_DEFAULT_REGION").unwrap_or_else(|_| "RO".to_string());

        if default_region.len() != 2 || !default_region.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidValue {
                var: "PHONEBOOK_DEFAULT_REGION".to_string(),
                reason: format!(
                    "Must be a two-letter region code, got: {}",
                    default_region
                ),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            storage_path,
            pretty_json,
            default_region: default_region.to_ascii_uppercase(),
            log_level,
        })
    }

    /// Parse an environment variable as bool with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_path: PathBuf::from("phonebook.json"),
            pretty_json: true,
            default_region: "RO".to_string(),
            log_level: "info".to_string(),
        }
    }
}
