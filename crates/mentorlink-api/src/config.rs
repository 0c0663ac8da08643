//! Service configuration.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the working directory:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `DATABASE_URL` | `mentorlink.db` | local libSQL file, or `libsql://`/`https://` remote |
//! | `DATABASE_AUTH_TOKEN` | unset | auth token for remote databases |
//! | `HOST` | `0.0.0.0` | listen address: an IP literal or a resolvable hostname |
//! | `PORT` | `3000` | listen port |
//!
//! Every variable except `PORT` is taken verbatim, so values made only of
//! digits (`2024`, `000123`) stay strings.

use std::net::SocketAddr;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use mentorlink_store::StoreLocation;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

/// Environment variables figment parses into typed values.
const PARSED_ENV_KEYS: [&str; 1] = ["PORT"];

/// Environment variables copied as-is, keyed by the field they fill.
const VERBATIM_ENV_KEYS: [(&str, &str); 3] = [
    ("DATABASE_URL", "database_url"),
    ("DATABASE_AUTH_TOKEN", "database_auth_token"),
    ("HOST", "host"),
];

/// Fallback connection string: a libSQL file in the working directory.
fn default_database_url() -> String {
    "mentorlink.db".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

/// Runtime configuration for the mentorlink service.
#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
    /// Connection string for the store.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Auth token for remote databases. Ignored for local files.
    #[serde(default)]
    pub database_auth_token: Option<String>,

    /// Address the HTTP listener binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP listener binds to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            database_auth_token: None,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.store_location())
            .field(
                "database_auth_token",
                &self.database_auth_token.as_ref().map(|_| "<redacted>"),
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Loads configuration from `.env` and the process environment.
    ///
    /// A missing `.env` file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed (e.g. a non-numeric
    /// `PORT`) or if the resulting configuration fails validation.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Loads configuration from the process environment only.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn from_env() -> Result<Self> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ServiceError::config_parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the provider chain: defaults, then environment variables.
    ///
    /// String settings bypass figment's value parsing, which would
    /// otherwise turn `000123` into the integer `123`.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::raw().only(&PARSED_ENV_KEYS));

        for (var, field) in VERBATIM_ENV_KEYS {
            if let Ok(value) = std::env::var(var) {
                figment = figment.merge(Serialized::default(field, value));
            }
        }

        figment
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` naming the offending variable.
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(ServiceError::config_validation(
                "DATABASE_URL must not be empty",
                "Unset DATABASE_URL to use the local mentorlink.db file, or point it at a libSQL database",
            ));
        }

        if self.port == 0 {
            return Err(ServiceError::config_validation(
                "PORT must be greater than 0",
                "Set PORT to a free port such as 3000",
            ));
        }

        if self.host.trim().is_empty() {
            return Err(ServiceError::config_validation(
                "HOST must not be empty",
                "Set HOST to an address such as 0.0.0.0, 127.0.0.1 or localhost",
            ));
        }

        let location = self.store_location();
        if !location.is_local() && self.database_auth_token.is_none() {
            tracing::warn!(
                location = %location,
                "Remote database configured without DATABASE_AUTH_TOKEN"
            );
        }

        Ok(())
    }

    /// Where the store lives, derived from `database_url`.
    #[must_use]
    pub fn store_location(&self) -> StoreLocation {
        StoreLocation::from_url(&self.database_url, self.database_auth_token.as_deref())
    }

    /// The socket address to bind, resolving `host` if it is a hostname.
    ///
    /// The first address the resolver returns wins.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if `host` does not resolve.
    pub async fn socket_addr(&self) -> Result<SocketAddr> {
        let unresolved = |reason: String| {
            ServiceError::config_validation(
                format!("HOST '{}' does not resolve: {reason}", self.host),
                "Set HOST to an address such as 0.0.0.0, 127.0.0.1 or localhost",
            )
        };

        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| unresolved(e.to_string()))?
            .next()
            .ok_or_else(|| unresolved("no addresses returned".to_string()))
    }
}
