//! Error types for actions.

use crate::time::TimeValue;
use thiserror::Error;

/// Failure delivered through an action's failure channel or raised while
/// preparing an action.
///
/// Errors are `Clone` so that a single failure can be handed to every
/// continuation registered on a future.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// A required argument was absent.
    #[error("{0}")]
    NullArgument(String),

    /// The request failed its own validation.
    #[error("Validation Failed: {}", format_validation(.0))]
    Validation(Vec<String>),

    /// Blocking retrieval gave up waiting.
    #[error("Timeout waiting for [{0}]")]
    Timeout(TimeValue),

    /// A human-readable value could not be parsed.
    #[error("{0}")]
    Parse(String),

    /// The cluster rejected the action.
    #[error("Remote error [{status}]: {reason}")]
    Remote {
        /// HTTP status code returned by the cluster.
        status: u16,
        /// Reason reported by the cluster.
        reason: String,
    },

    /// The action never produced a usable response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The future was cancelled before it completed.
    #[error("Action was cancelled")]
    Cancelled,
}

impl ActionError {
    /// Create a null-argument error for the named parameter.
    pub fn null_argument(name: &str) -> Self {
        ActionError::NullArgument(format!("{} cannot be null", name))
    }

    /// Whether this failure came from blocking retrieval running out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ActionError::Timeout(_))
    }
}

fn format_validation(errors: &[String]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}: {};", i + 1, e))
        .collect()
}

/// Result type alias for action operations.
pub type Result<T> = std::result::Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ActionError::Validation(vec![
            "index is missing".to_string(),
            "id is missing".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation Failed: 1: index is missing;2: id is missing;"
        );
    }

    #[test]
    fn test_null_argument_message() {
        let err = ActionError::null_argument("successCallback");
        assert_eq!(err.to_string(), "successCallback cannot be null");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_timeout_display() {
        let err = ActionError::Timeout(TimeValue::timeout_value_millis(500));
        assert_eq!(err.to_string(), "Timeout waiting for [500ms]");
        assert!(err.is_timeout());
    }
}
