//! Service configuration.
//!
//! Values come from built-in defaults, then an optional YAML/TOML file, then
//! environment variables prefixed with `NUMSORT` using `__` as the section
//! separator (for example `NUMSORT__DATABASE__URL`).

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::storage::PoolOptions;

const ENV_PREFIX: &str = "NUMSORT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Deployment stage; selects log level and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub env: Environment,
    pub http_server: HttpServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerSettings {
    pub address: String,
    /// Upper bound for a whole request, store round-trips included.
    pub timeout_secs: u64,
}

impl HttpServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Only needed by commands that touch SQLite.
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseSettings {
    /// The configured URL, or an error naming the missing key.
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        self.url
            .as_deref()
            .ok_or_else(|| ConfigError::Invalid("database.url is required".into()))
    }

    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder()
            .set_default("env", "local")?
            .set_default("http_server.address", "localhost:8081")?
            .set_default("http_server.timeout_secs", 4)?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 3)?;

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }

        let settings: Settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }
        if self.http_server.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http_server.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
