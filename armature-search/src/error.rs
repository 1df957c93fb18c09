//! Errors raised while building a client.
//!
//! Failures of individual actions travel through listeners as
//! [`ActionError`](armature_action::ActionError) instead.

use thiserror::Error;

/// Client construction error.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The transport could not be built.
    #[error("Connection error: {0}")]
    Connection(String),

    /// No tokio runtime was available to run requests on.
    #[error("No tokio runtime available: {0}")]
    NoRuntime(String),
}

/// Result type alias for client construction.
pub type Result<T> = std::result::Result<T, ClientError>;
