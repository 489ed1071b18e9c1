//! Error types for overlay-init

use std::time::Duration;
use thiserror::Error;

/// Result type for handshake operations
pub type Result<T> = std::result::Result<T, InitError>;

/// Init handshake error types
#[derive(Error, Debug, Clone)]
pub enum InitError {
    /// Transport-level failure to establish an overlay session
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failure to transmit the credential to the overlay
    #[error("Credential submission error: {0}")]
    Submission(String),

    /// Bounded acknowledgment wait expired with the overlay silent
    #[error("No acknowledgment from overlay within {0:?}")]
    AckTimeout(Duration),
}
