//! Blocking retrieval and fluent callbacks on action futures.

use armature_action::{
    ActionError, ActionFuture, ActionListener, ListenableActionFuture, Result, TimeUnit,
    TimeValue,
};
use parking_lot::Mutex;
use std::time::Duration;

/// A bound on how long [`ActionFutureExt::response_within`] may wait.
///
/// Implemented for human-readable strings (`"500ms"`, `"30s"`), a plain
/// `u64` of milliseconds, [`TimeValue`] and [`Duration`].
pub trait IntoTimeout {
    /// Wait on `future` for at most this long.
    fn wait_on<F>(self, future: &F) -> Result<F::Response>
    where
        F: ActionFuture + ?Sized;
}

impl IntoTimeout for &str {
    fn wait_on<F>(self, future: &F) -> Result<F::Response>
    where
        F: ActionFuture + ?Sized,
    {
        future.action_get_str(self)
    }
}

impl IntoTimeout for String {
    fn wait_on<F>(self, future: &F) -> Result<F::Response>
    where
        F: ActionFuture + ?Sized,
    {
        future.action_get_str(&self)
    }
}

impl IntoTimeout for u64 {
    fn wait_on<F>(self, future: &F) -> Result<F::Response>
    where
        F: ActionFuture + ?Sized,
    {
        future.action_get_millis(self)
    }
}

impl IntoTimeout for TimeValue {
    fn wait_on<F>(self, future: &F) -> Result<F::Response>
    where
        F: ActionFuture + ?Sized,
    {
        future.action_get_timeout(self)
    }
}

impl IntoTimeout for Duration {
    fn wait_on<F>(self, future: &F) -> Result<F::Response>
    where
        F: ActionFuture + ?Sized,
    {
        future.action_get_timeout(TimeValue::from(self))
    }
}

/// Blocking retrieval for any [`ActionFuture`].
///
/// Failures and timeouts come back exactly as the future reports them.
pub trait ActionFutureExt: ActionFuture {
    /// Wait until the action completes.
    fn response(&self) -> Result<Self::Response> {
        self.action_get()
    }

    /// Wait at most `timeout` for the action to complete.
    fn response_within<T: IntoTimeout>(&self, timeout: T) -> Result<Self::Response> {
        timeout.wait_on(self)
    }

    /// Wait at most `timeout` of the given `unit`.
    fn response_in(&self, timeout: u64, unit: TimeUnit) -> Result<Self::Response> {
        self.action_get_in(timeout, unit)
    }
}

impl<F: ActionFuture + ?Sized> ActionFutureExt for F {}

/// Fluent success and failure callbacks for [`ListenableActionFuture`].
pub trait ListenableActionFutureExt {
    /// Value the future resolves to.
    type Response;

    /// Call `callback` with the response if the action succeeds.
    ///
    /// Returns the same future so registrations can be chained.
    fn on_response<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(Self::Response) + Send + 'static;

    /// Call `callback` with the failure if the action fails.
    ///
    /// Returns the same future so registrations can be chained.
    fn on_failure<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(ActionError) + Send + 'static;
}

impl<T> ListenableActionFutureExt for ListenableActionFuture<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Response = T;

    fn on_response<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.add_listener(OnResponse(Mutex::new(Some(callback))));
        self
    }

    fn on_failure<F>(&self, callback: F) -> &Self
    where
        F: FnOnce(ActionError) + Send + 'static,
    {
        self.add_listener(OnFailure(Mutex::new(Some(callback))));
        self
    }
}

struct OnResponse<F>(Mutex<Option<F>>);

impl<T, F> ActionListener<T> for OnResponse<F>
where
    F: FnOnce(T) + Send,
{
    fn on_response(&self, response: T) {
        if let Some(callback) = self.0.lock().take() {
            callback(response);
        }
    }

    fn on_failure(&self, _error: ActionError) {}
}

struct OnFailure<F>(Mutex<Option<F>>);

impl<T, F> ActionListener<T> for OnFailure<F>
where
    F: FnOnce(ActionError) + Send,
{
    fn on_response(&self, _response: T) {}

    fn on_failure(&self, error: ActionError) {
        if let Some(callback) = self.0.lock().take() {
            callback(error);
        }
    }
}
