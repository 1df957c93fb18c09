//! Listener-based search client for the Armature framework.
//!
//! This crate provides:
//! - Typed requests for document, search, percolate, term vector and script actions
//! - Typed views over the JSON responses
//! - The [`Client`] and [`AdminClient`] traits, where every action takes a
//!   request and an [`ActionListener`](armature_action::ActionListener)
//! - [`OpenSearchClient`], an implementation over the `opensearch` crate
//!
//! # Example
//!
//! ```rust,no_run
//! use armature_action::{ActionFuture, ListenableActionFuture};
//! use armature_search::{Client, ClientConfig, IndexResponse, OpenSearchClient, Requests};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenSearchClient::new(ClientConfig::new("http://localhost:9200"))?;
//!
//!     let mut request = Requests::index_request();
//!     request.index("posts").id("1");
//!     request.source = Some(json!({ "title": "Hello" }));
//!
//!     let future = ListenableActionFuture::<IndexResponse>::new();
//!     client.execute_index(request, Box::new(future.clone()));
//!
//!     let response = tokio::task::spawn_blocking(move || future.action_get()).await??;
//!     println!("indexed {:?}", response.id());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod config;
mod error;
mod request;
mod response;
mod settings;
mod transport;

pub use client::{AdminClient, Client, Listener};
pub use config::{ClientConfig, CLUSTER_URLS, COMPRESSION, REQUEST_TIMEOUT, USERNAME};
pub use error::{ClientError, Result};
pub use request::{
    ActionRequest, Body, BulkItem, BulkRequest, ClearScrollRequest, ClusterHealthRequest,
    CountRequest, DeleteByQueryRequest, DeleteIndexedScriptRequest, DeleteRequest, Endpoint,
    ExplainRequest, GetIndexedScriptRequest, GetRequest, IndexRequest, Method, MoreLikeThisRequest,
    MultiGetItem, MultiGetRequest, MultiPercolateRequest, MultiSearchRequest,
    MultiTermVectorsRequest, OpType, PercolateRequest, PutIndexedScriptRequest, RefreshRequest,
    Requests, SearchRequest, SearchScrollRequest, SuggestRequest, TermVectorRequest, UpdateRequest,
    DEFAULT_PERCOLATOR_FIELD,
};
pub use response::{
    BulkResponse, ClearScrollResponse, ClusterHealthResponse, CountResponse,
    DeleteByQueryResponse, DeleteIndexedScriptResponse, DeleteResponse, ExplainResponse,
    FromResponseBody, GetIndexedScriptResponse, GetResponse, IndexResponse, MultiGetResponse,
    MultiPercolateResponse, MultiSearchResponse, MultiTermVectorsResponse, PercolateResponse,
    PutIndexedScriptResponse, RefreshResponse, SearchResponse, SuggestResponse,
    TermVectorResponse, UpdateResponse,
};
pub use settings::{Settings, SettingsBuilder};
pub use transport::{OpenSearchAdminClient, OpenSearchClient};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        ActionRequest, AdminClient, Client, ClientConfig, OpenSearchClient, Requests, Settings,
    };
}
