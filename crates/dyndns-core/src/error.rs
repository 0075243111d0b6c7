//! Error types for the dyndns system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for dyndns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dyndns system
///
/// Only `Config` is fatal: the daemon refuses to start on it. Every other
/// kind aborts the current reconciliation cycle, gets logged, and the loop
/// carries on with the next tick.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid startup parameters
    #[error("configuration error: {0}")]
    Config(String),

    /// External IP lookup failed for this cycle
    #[error("could not get external IP: {0}")]
    Resolution(String),

    /// Provider listing call failed
    #[error("could not retrieve existing records (domain={domain}): {message}")]
    RecordLookup {
        /// Domain whose records were being listed
        domain: String,
        /// Underlying failure
        message: String,
    },

    /// No record matched the configured name and type
    #[error("could not locate record (domain={domain}, name={name})")]
    RecordNotFound {
        /// Domain that was searched
        domain: String,
        /// Record name that was searched for
        name: String,
    },

    /// Provider edit call failed
    #[error(
        "could not update record (domain={domain}, id={id}, name={name}, from={from}, to={to}): {message}"
    )]
    RecordUpdate {
        /// Domain holding the record
        domain: String,
        /// Provider-assigned record identifier
        id: u64,
        /// Record name
        name: String,
        /// Value the record held before the edit
        from: String,
        /// Value the edit tried to store
        to: String,
        /// Underlying failure
        message: String,
    },

    /// HTTP transport failure talking to an external service
    #[error("http error: {0}")]
    Http(String),

    /// An external service rejected a request
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Service name
        provider: &'static str,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a service-specific error
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }

    /// Create a record lookup error annotated with the domain
    pub fn record_lookup(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordLookup {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a "record not found" error annotated with domain and name
    pub fn record_not_found(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self::RecordNotFound {
            domain: domain.into(),
            name: name.into(),
        }
    }

    /// Create a record update error annotated with the full edit context
    pub fn record_update(
        domain: impl Into<String>,
        id: u64,
        name: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::RecordUpdate {
            domain: domain.into(),
            id,
            name: name.into(),
            from: from.into(),
            to: to.into(),
            message: message.into(),
        }
    }
}
