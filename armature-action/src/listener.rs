//! Listener interface through which actions report their outcome.

use crate::error::ActionError;
use std::sync::Arc;

/// Receives the outcome of an action.
///
/// Exactly one of the two methods is called once per action.
pub trait ActionListener<T>: Send + Sync {
    /// The action completed successfully.
    fn on_response(&self, response: T);

    /// The action failed.
    fn on_failure(&self, error: ActionError);
}

impl<T, L> ActionListener<T> for Arc<L>
where
    L: ActionListener<T> + ?Sized,
{
    fn on_response(&self, response: T) {
        (**self).on_response(response)
    }

    fn on_failure(&self, error: ActionError) {
        (**self).on_failure(error)
    }
}

impl<T, L> ActionListener<T> for Box<L>
where
    L: ActionListener<T> + ?Sized,
{
    fn on_response(&self, response: T) {
        (**self).on_response(response)
    }

    fn on_failure(&self, error: ActionError) {
        (**self).on_failure(error)
    }
}

/// Listener built from a pair of closures.
pub struct FnListener<R, F> {
    on_response: R,
    on_failure: F,
}

impl<T, R, F> ActionListener<T> for FnListener<R, F>
where
    R: Fn(T) + Send + Sync,
    F: Fn(ActionError) + Send + Sync,
{
    fn on_response(&self, response: T) {
        (self.on_response)(response)
    }

    fn on_failure(&self, error: ActionError) {
        (self.on_failure)(error)
    }
}

/// Build a listener from a response handler and a failure handler.
pub fn listener_fn<T, R, F>(on_response: R, on_failure: F) -> FnListener<R, F>
where
    R: Fn(T) + Send + Sync,
    F: Fn(ActionError) + Send + Sync,
{
    FnListener {
        on_response,
        on_failure,
    }
}
