//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("No wallet provider available: {0}")]
    ProviderUnavailable(String),

    #[error("Connection request rejected by user")]
    UserRejected,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this failure leaves a connected session intact
    ///
    /// Balance-query failures are surfaced but never revert `Connected`;
    /// provider and authorization failures do change the session status.
    pub fn is_balance_only(&self) -> bool {
        matches!(self, Self::Network(_) | Self::InvalidAddress(_))
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
