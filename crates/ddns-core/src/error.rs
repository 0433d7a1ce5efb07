//! Error types for the DDNS updater
//!
//! Provider calls surface failures through [`Error`]; the engine is the only
//! place that turns them into log lines and "no value" outcomes.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure (connect, timeout, unreadable body)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider answered with a non-success status
    #[error("{provider} returned {status}: {message}")]
    Status {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Provider message, or the HTTP status text when the body had none
        message: String,
    },

    /// The provider answered successfully but the body was not usable
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// The provider answered successfully but reported no IP address
    #[error("{provider} returned {status} without an IP: {message}")]
    NoAddress {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Provider message, or the HTTP status text when the body had none
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a non-success status error
    pub fn status(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    /// Create an error for a successful answer that carries no address
    pub fn no_address(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::NoAddress {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}
