// Configuration: defaults -> config file -> DBKIT_* environment

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use dbkit_infra_sqlite::PoolSettings;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://dbkit.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Looked up in the working directory when no `--config` is given
const DEFAULT_CONFIG_FILE: &str = "dbkit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration
    ///
    /// An explicit `path` must exist; the implicit `dbkit.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .set_default("log_format", "pretty")?
            .add_source(file)
            .add_source(Environment::with_prefix("DBKIT").try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            ..PoolSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
            database_url = "sqlite::memory:"
            log_format = "json"
            "#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/missing/dbkit.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration"));
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let file = write_config(r#"log_format = "xml""#);
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_pool_settings() {
        let config = AppConfig {
            database_url: "sqlite://products.db".to_string(),
            max_connections: 2,
            log_format: LogFormat::Pretty,
        };

        let settings = config.pool_settings();
        assert_eq!(settings.database_url, "sqlite://products.db");
        assert_eq!(settings.max_connections, 2);
    }
}
