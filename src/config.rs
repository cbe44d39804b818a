//! Environment-driven service configuration.
//!
//! Values are read from the process environment after loading an optional
//! `.env` file. Every key has a development default, so an empty
//! environment yields a usable local configuration.

use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_POSTGRES_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric setting could not be parsed.
    #[error("{key} must be a valid number, got '{value}': {source}")]
    InvalidNumber {
        /// Environment key that held the value.
        key: &'static str,
        /// Raw value as found in the environment.
        value: String,
        /// Underlying parse failure.
        source: ParseIntError,
    },

    /// The pool size must be at least one connection.
    #[error("POSTGRES_MAX_CONNECTIONS must be greater than zero")]
    ZeroPoolSize,
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Port the HTTP host should listen on.
    pub http_port: u16,
    /// `PostgreSQL` connection settings.
    pub database: DatabaseConfig,
}

/// `PostgreSQL` connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database role.
    pub user: String,
    /// Role password.
    pub password: String,
    /// Database name.
    pub name: String,
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl ServiceConfig {
    /// Loads configuration from the environment, reading `.env` first when
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric setting is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!(error = %err, "no .env file loaded");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric setting is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let max_connections =
            parse_number(&lookup, "POSTGRES_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }

        Ok(Self {
            http_port: parse_number(&lookup, "HTTP_PORT", DEFAULT_HTTP_PORT)?,
            database: DatabaseConfig {
                user: text("POSTGRES_USER", "postgres"),
                password: text("POSTGRES_PASSWORD", "postgres"),
                name: text("POSTGRES_DB", "review-assigner"),
                host: text("POSTGRES_HOST", "postgres"),
                port: parse_number(&lookup, "POSTGRES_PORT", DEFAULT_POSTGRES_PORT)?,
                max_connections,
            },
        })
    }
}

impl DatabaseConfig {
    /// Returns the `postgresql://` connection URL.
    #[must_use]
    pub fn connection_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr<Err = ParseIntError>,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidNumber { key, value, source })
    })
}
