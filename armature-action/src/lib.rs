//! Action plumbing for Armature search clients.
//!
//! Every client operation reports its outcome to an [`ActionListener`]. The
//! [`ListenableActionFuture`] is such a listener that can also be waited on
//! or observed by further listeners, so the same object can be handed to the
//! client and returned to the caller.
//!
//! # Example
//!
//! ```rust
//! use armature_action::{ActionFuture, ActionListener, ListenableActionFuture};
//!
//! let future = ListenableActionFuture::<String>::new();
//!
//! // Whoever executes the action completes the listener...
//! let listener = future.clone();
//! std::thread::spawn(move || listener.on_response("done".to_string()));
//!
//! // ...and the caller waits on the same future.
//! assert_eq!(future.action_get_str("5s").unwrap(), "done");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod future;
mod listener;
mod time;

pub use error::{ActionError, Result};
pub use future::{ActionFuture, ListenableActionFuture};
pub use listener::{listener_fn, ActionListener, FnListener};
pub use time::{TimeUnit, TimeValue};
