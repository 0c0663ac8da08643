//! Error types for the mentorlink service.
//!
//! This module defines the errors raised while configuring and starting the
//! service. Request-level failures are mapped onto HTTP responses in
//! [`crate::api`].

use std::net::SocketAddr;

use mentorlink_store::RosterError;

/// A specialized `Result` type for service setup operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while configuring or starting the service.
///
/// Variants carry actionable suggestions where possible.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The environment could not be read into a configuration.
    #[error("Invalid configuration: {message}\n\nSuggestion: Check the DATABASE_URL, DATABASE_AUTH_TOKEN, HOST and PORT environment variables")]
    ConfigParseError {
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // Store Errors
    // ========================================================================
    /// The store could not be opened or migrated.
    #[error("Store error: {0}\n\nSuggestion: Check that DATABASE_URL points to a writable libSQL database")]
    Store(#[from] RosterError),

    // ========================================================================
    // Listener Errors
    // ========================================================================
    /// The HTTP listener could not bind its address.
    #[error("Failed to bind to {addr}: {source}\n\nSuggestion: Try a different port with --port or PORT")]
    Bind {
        /// The address that was requested.
        addr: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    /// Creates a new `ConfigParseError` with the given message.
    #[must_use]
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            message: message.into(),
        }
    }

    /// Creates a new `Bind` error for the given address.
    #[must_use]
    pub const fn bind(addr: SocketAddr, source: std::io::Error) -> Self {
        Self::Bind { addr, source }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}
