//! Application settings loaded from `config.toml`.
//!
//! Every field has a default, so a missing default config file simply yields
//! [`AppConfig::default`]. The `[[categories]]` table lists categories to seed on
//! startup when they are not registered yet.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Weekly demand used by the bulk recompute for records that never had one.
pub const DEFAULT_WEEKLY_DEMAND: i64 = 1;

/// Quantity at or below which a product shows up in the low-quantity report.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Database URL; overridden by `DATABASE_URL` and `--database-url`
    pub database_url: Option<String>,
    /// Fallback weekly demand for the bulk recompute
    pub default_weekly_demand: i64,
    /// Product quantity threshold for the low-quantity report
    pub low_stock_threshold: i64,
    /// Categories to create on startup if missing
    pub categories: Vec<CategorySeed>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            default_weekly_demand: DEFAULT_WEEKLY_DEMAND,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            categories: Vec::new(),
        }
    }
}

/// A category listed in config.toml
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CategorySeed {
    /// Category name, canonicalised on insert
    pub name: String,
    /// Initial weekly demand
    pub weekly_demand: i64,
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid, or a
/// numeric setting is negative.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses and validates settings from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if config.default_weekly_demand < 0 {
        return Err(Error::Config {
            message: "default_weekly_demand cannot be negative".to_string(),
        });
    }
    if config.low_stock_threshold < 0 {
        return Err(Error::Config {
            message: "low_stock_threshold cannot be negative".to_string(),
        });
    }
    if let Some(seed) = config.categories.iter().find(|seed| seed.weekly_demand < 0) {
        return Err(Error::Config {
            message: format!("weekly_demand for category '{}' cannot be negative", seed.name),
        });
    }

    Ok(config)
}

/// Loads settings from `path`, falling back to defaults when the file is absent
/// and `required` is false.
pub fn load_app_configuration<P: AsRef<Path>>(path: P, required: bool) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if !required && !path_ref.exists() {
        tracing::debug!("No config file at {:?}, using defaults", path_ref);
        return Ok(AppConfig::default());
    }
    load_config(path_ref)
}

/// Picks the database URL: command line first, then `DATABASE_URL`, then config.toml.
#[must_use]
pub fn resolve_database_url(cli_url: Option<String>, config: &AppConfig) -> String {
    cli_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .or_else(|| config.database_url.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            database_url = "sqlite::memory:"
            default_weekly_demand = 4
            low_stock_threshold = 10

            [[categories]]
            name = "bolts"
            weekly_demand = 10

            [[categories]]
            name = "Nuts"
            weekly_demand = 25
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.default_weekly_demand, 4);
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].name, "bolts");
        assert_eq!(config.categories[1].weekly_demand, 25);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_weekly_demand, DEFAULT_WEEKLY_DEMAND);
    }

    #[test]
    fn test_negative_values_rejected() {
        let result = parse_config("default_weekly_demand = -1");
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = parse_config(
            r#"
            [[categories]]
            name = "bolts"
            weekly_demand = -3
        "#,
        );
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_optional_file_yields_defaults() {
        let config =
            load_app_configuration("definitely/not/here/config.toml", false).unwrap();
        assert_eq!(config, AppConfig::default());

        let result = load_app_configuration("definitely/not/here/config.toml", true);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_cli_url_wins() {
        let config = AppConfig {
            database_url: Some("sqlite://from-config.sqlite".to_string()),
            ..AppConfig::default()
        };
        let url = resolve_database_url(Some("sqlite::memory:".to_string()), &config);
        assert_eq!(url, "sqlite::memory:");
    }
}
