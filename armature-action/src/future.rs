//! Completion futures that double as action listeners.

use crate::error::{ActionError, Result};
use crate::listener::ActionListener;
use crate::time::{TimeUnit, TimeValue};
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

/// A pending action result that can be retrieved by blocking.
pub trait ActionFuture {
    /// Value the action resolves to.
    type Response;

    /// Wait until the action completes.
    fn action_get(&self) -> Result<Self::Response>;

    /// Wait at most `timeout` for the action to complete.
    ///
    /// Returns [`ActionError::Timeout`] if it did not.
    fn action_get_timeout(&self, timeout: TimeValue) -> Result<Self::Response>;

    /// Wait at most the parsed `timeout`, e.g. `"500ms"` or `"30s"`.
    fn action_get_str(&self, timeout: &str) -> Result<Self::Response> {
        self.action_get_timeout(TimeValue::parse(timeout)?)
    }

    /// Wait at most `timeout_millis` milliseconds.
    fn action_get_millis(&self, timeout_millis: u64) -> Result<Self::Response> {
        let millis = i64::try_from(timeout_millis).unwrap_or(i64::MAX);
        self.action_get_timeout(TimeValue::timeout_value_millis(millis))
    }

    /// Wait at most `timeout` of the given `unit`.
    fn action_get_in(&self, timeout: u64, unit: TimeUnit) -> Result<Self::Response> {
        let timeout = i64::try_from(timeout).unwrap_or(i64::MAX);
        self.action_get_timeout(TimeValue::new(timeout, unit))
    }
}

enum State<T> {
    Pending(Vec<Box<dyn ActionListener<T>>>),
    Done(Result<T>),
}

struct Inner<T> {
    state: Mutex<State<T>>,
    completed: Condvar,
}

/// One-shot future for an action's response.
///
/// The future is also an [`ActionListener`]: hand a clone to the client that
/// executes the action and it completes the future. Clones share state, so
/// every clone observes the same outcome and [`ptr_eq`](Self::ptr_eq) holds
/// between them.
///
/// Listeners added with [`add_listener`](Self::add_listener) fire in
/// registration order on the thread that completes the future. A listener
/// added after completion fires immediately on the calling thread.
pub struct ListenableActionFuture<T> {
    inner: Arc<Inner<T>>,
}

impl<T> ListenableActionFuture<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a pending future.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::Pending(Vec::new())),
                completed: Condvar::new(),
            }),
        }
    }

    /// Whether `self` and `other` are the same future.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Whether the future has completed, successfully or not.
    pub fn is_done(&self) -> bool {
        matches!(*self.inner.state.lock(), State::Done(_))
    }

    /// Register a listener for the outcome.
    pub fn add_listener<L>(&self, listener: L)
    where
        L: ActionListener<T> + 'static,
    {
        let outcome = {
            let mut state = self.inner.state.lock();
            match &mut *state {
                State::Pending(listeners) => {
                    listeners.push(Box::new(listener));
                    return;
                }
                State::Done(outcome) => outcome.clone(),
            }
        };

        trace!("Future already completed, notifying listener immediately");
        notify(&listener, &outcome);
    }

    /// Cancel the future if it is still pending.
    ///
    /// Pending listeners receive [`ActionError::Cancelled`]. Returns `false`
    /// if the future had already completed.
    pub fn cancel(&self) -> bool {
        self.complete(Err(ActionError::Cancelled))
    }

    fn complete(&self, outcome: Result<T>) -> bool {
        let listeners = {
            let mut state = self.inner.state.lock();
            match &mut *state {
                State::Done(_) => {
                    debug!("Ignoring completion of an already completed future");
                    return false;
                }
                State::Pending(listeners) => {
                    let listeners = std::mem::take(listeners);
                    *state = State::Done(outcome.clone());
                    listeners
                }
            }
        };

        self.inner.completed.notify_all();

        trace!(listeners = listeners.len(), "Future completed");
        for listener in &listeners {
            notify(listener, &outcome);
        }
        true
    }

    fn wait(&self, timeout: Option<TimeValue>) -> Result<T> {
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t.to_duration()));
        let mut state = self.inner.state.lock();

        loop {
            if let State::Done(outcome) = &*state {
                return outcome.clone();
            }

            match (timeout, deadline) {
                (None, _) | (Some(_), None) => self.inner.completed.wait(&mut state),
                (Some(timeout), Some(deadline)) => {
                    if Instant::now() >= deadline {
                        return Err(ActionError::Timeout(timeout));
                    }
                    self.inner.completed.wait_until(&mut state, deadline);
                }
            }
        }
    }
}

fn notify<T: Clone>(listener: &dyn ActionListener<T>, outcome: &Result<T>) {
    match outcome {
        Ok(response) => listener.on_response(response.clone()),
        Err(error) => listener.on_failure(error.clone()),
    }
}

impl<T> ActionFuture for ListenableActionFuture<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Response = T;

    fn action_get(&self) -> Result<T> {
        self.wait(None)
    }

    fn action_get_timeout(&self, timeout: TimeValue) -> Result<T> {
        self.wait(Some(timeout))
    }
}

impl<T> ActionListener<T> for ListenableActionFuture<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn on_response(&self, response: T) {
        self.complete(Ok(response));
    }

    fn on_failure(&self, error: ActionError) {
        self.complete(Err(error));
    }
}

impl<T> Clone for ListenableActionFuture<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ListenableActionFuture<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ListenableActionFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.inner.state.lock() {
            State::Pending(listeners) => format!("pending ({} listeners)", listeners.len()),
            State::Done(Ok(_)) => "succeeded".to_string(),
            State::Done(Err(e)) => format!("failed ({})", e),
        };
        f.debug_struct("ListenableActionFuture")
            .field("state", &state)
            .finish()
    }
}
