//! Closure-configured search actions for the Armature framework.
//!
//! This crate layers a shorter calling style over any
//! [`Client`](armature_search::Client):
//! - [`ClientExt`] runs every action from a configurator closure and returns
//!   the [`ListenableActionFuture`](armature_action::ListenableActionFuture)
//!   that was handed to the client as its listener
//! - [`ActionFutureExt`] waits for the response, optionally with a timeout
//! - [`ListenableActionFutureExt`] registers success-only and failure-only callbacks
//!
//! # Example
//!
//! ```rust,no_run
//! use armature_search::OpenSearchClient;
//! use armature_search_ext::prelude::*;
//!
//! # fn run(client: OpenSearchClient) -> armature_action::Result<()> {
//! // Blocking
//! let doc = client
//!     .get("posts", |r| {
//!         r.doc_type("article").id("7");
//!     })?
//!     .response_within("500ms")?;
//! println!("found: {}", doc.exists());
//!
//! // Callbacks
//! client
//!     .term_vector("posts", "article", "42", |_| {})?
//!     .on_response(|tv| println!("{:?}", tv.term_vectors()))
//!     .on_failure(|e| eprintln!("term vectors failed: {}", e));
//! # Ok(())
//! # }
//! ```
//!
//! A configurator returns `()` or `armature_action::Result<()>`. Returning an
//! error, or panicking, stops the action before the client sees it.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client_ext;
mod configure;
mod future_ext;

pub use client_ext::{dispatch, ClientExt};
pub use configure::{configure, ConfigureOutcome};
pub use future_ext::{ActionFutureExt, IntoTimeout, ListenableActionFutureExt};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{ActionFutureExt, ClientExt, ListenableActionFutureExt};
}
