//! Start-up settings read from the process environment.

use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment whose data lives at the configured database path itself.
pub const PRODUCTION_ENVIRONMENT: &str = "production";
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_STORE_NAME: &str = "La Casera";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("invalid value `{value}` for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Settings shared by the binary and the route handlers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database path after environment namespacing.
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Cookie domain.
    pub domain: String,
    pub environment: String,
    /// Shop name used in export headings and file names.
    pub store_name: String,
    pub secret: Option<String>,
    pub auth_service_url: String,
}

impl AppConfig {
    /// Read the configuration from the environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENVIRONMENT")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "app.db".to_string());
        let database_url = namespaced_database_path(&database_url, &environment);

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => 8080,
        };

        let auth_service_url =
            lookup("AUTH_SERVICE_URL").ok_or(ConfigError::Missing("AUTH_SERVICE_URL"))?;

        Ok(Self {
            database_url,
            address: lookup("ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            domain: lookup("DOMAIN").unwrap_or_else(|| "localhost".to_string()),
            environment,
            store_name: lookup("STORE_NAME").unwrap_or_else(|| DEFAULT_STORE_NAME.to_string()),
            secret: lookup("SECRET_KEY"),
            auth_service_url,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION_ENVIRONMENT
    }
}

/// Outside production the database file moves to `environments/{env}/`
/// next to the configured path.
///
/// ```
/// use price_catalog::config::namespaced_database_path;
/// assert_eq!(namespaced_database_path("data/app.db", "production"), "data/app.db");
/// assert_eq!(
///     namespaced_database_path("data/app.db", "staging"),
///     "data/environments/staging/app.db"
/// );
/// ```
pub fn namespaced_database_path(database_url: &str, environment: &str) -> String {
    if environment == PRODUCTION_ENVIRONMENT || database_url == ":memory:" {
        return database_url.to_string();
    }

    let path = Path::new(database_url);
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "app.db".into());

    let namespaced: PathBuf = parent.join("environments").join(environment).join(file_name);
    namespaced.to_string_lossy().into_owned()
}
