//! Closure-configured actions on any [`Client`].
//!
//! Each action builds its request, lets the configurator fill it in, hands
//! the request to the client together with a [`ListenableActionFuture`] as
//! the listener, and returns that same future:
//!
//! ```rust,no_run
//! use armature_search::OpenSearchClient;
//! use armature_search_ext::prelude::*;
//! use serde_json::json;
//!
//! # fn run(client: OpenSearchClient) -> armature_action::Result<()> {
//! let response = client
//!     .index(|r| {
//!         r.index("posts").doc_type("article").id("1");
//!         r.source = Some(json!({ "title": "hi" }));
//!     })?
//!     .response_within("5s")?;
//! # Ok(())
//! # }
//! ```

use crate::configure::{configure, require_identifier, ConfigureOutcome};
use armature_action::{ListenableActionFuture, Result};
use armature_search::{
    ActionRequest, AdminClient, BulkRequest, BulkResponse, ClearScrollRequest,
    ClearScrollResponse, Client, CountRequest, CountResponse, DeleteByQueryRequest,
    DeleteByQueryResponse, DeleteIndexedScriptRequest, DeleteIndexedScriptResponse,
    DeleteRequest, DeleteResponse, ExplainRequest, ExplainResponse, GetIndexedScriptRequest,
    GetIndexedScriptResponse, GetRequest, GetResponse, IndexRequest, IndexResponse, Listener,
    MoreLikeThisRequest, MultiGetRequest, MultiGetResponse, MultiPercolateRequest,
    MultiPercolateResponse, MultiSearchRequest, MultiSearchResponse, MultiTermVectorsRequest,
    MultiTermVectorsResponse, PercolateRequest, PercolateResponse, PutIndexedScriptRequest,
    PutIndexedScriptResponse, Requests, SearchRequest, SearchResponse, SearchScrollRequest,
    Settings, SuggestRequest, SuggestResponse, TermVectorRequest, TermVectorResponse,
    UpdateRequest, UpdateResponse,
};
use tracing::trace;

/// Configure `request`, then pass it to `execute` with a fresh future as the
/// listener, and return the future.
///
/// Every [`ClientExt`] action is this function with a different request and
/// client method. If the configurator fails or panics, `execute` is never
/// called.
pub fn dispatch<R, F, O, E>(
    request: R,
    configurator: F,
    execute: E,
) -> Result<ListenableActionFuture<R::Response>>
where
    R: ActionRequest,
    F: FnOnce(&mut R) -> O,
    O: ConfigureOutcome,
    E: FnOnce(R, Listener<R::Response>),
{
    let future = ListenableActionFuture::new();
    let request = configure(request, configurator)?;

    trace!("Dispatching {}", std::any::type_name::<R>());
    execute(request, Box::new(future.clone()));
    Ok(future)
}

/// Closure-configured actions, available on every [`Client`].
pub trait ClientExt: Client {
    /// The client's admin client.
    fn admin(&self) -> &dyn AdminClient {
        self.admin_client()
    }

    /// The client's settings.
    fn settings(&self) -> &Settings {
        self.client_settings()
    }

    /// Index a document.
    fn index<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<IndexResponse>>
    where
        F: FnOnce(&mut IndexRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(Requests::index_request(), configurator, |request, listener| {
            self.execute_index(request, listener)
        })
    }

    /// Run several operations in one request.
    fn bulk<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<BulkResponse>>
    where
        F: FnOnce(&mut BulkRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(BulkRequest::default(), configurator, |request, listener| {
            self.execute_bulk(request, listener)
        })
    }

    /// Partially update a document.
    fn update<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<UpdateResponse>>
    where
        F: FnOnce(&mut UpdateRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(UpdateRequest::default(), configurator, |request, listener| {
            self.execute_update(request, listener)
        })
    }

    /// Delete a document.
    fn delete<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<DeleteResponse>>
    where
        F: FnOnce(&mut DeleteRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(DeleteRequest::default(), configurator, |request, listener| {
            self.execute_delete(request, listener)
        })
    }

    /// Delete every document matching a query.
    fn delete_by_query<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<DeleteByQueryResponse>>
    where
        F: FnOnce(&mut DeleteByQueryRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(Requests::delete_by_query_request(), configurator, |request, listener| {
            self.execute_delete_by_query(request, listener)
        })
    }

    /// Fetch a document from `index`.
    fn get<F, O>(
        &self,
        index: impl Into<String>,
        configurator: F,
    ) -> Result<ListenableActionFuture<GetResponse>>
    where
        F: FnOnce(&mut GetRequest) -> O,
        O: ConfigureOutcome,
    {
        let index = index.into();
        require_identifier("index", &index)?;
        dispatch(Requests::get_request(index), configurator, |request, listener| {
            self.execute_get(request, listener)
        })
    }

    /// Fetch several documents.
    fn multi_get<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<MultiGetResponse>>
    where
        F: FnOnce(&mut MultiGetRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(MultiGetRequest::default(), configurator, |request, listener| {
            self.execute_multi_get(request, listener)
        })
    }

    /// Request suggestions.
    fn suggest<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<SuggestResponse>>
    where
        F: FnOnce(&mut SuggestRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(SuggestRequest::default(), configurator, |request, listener| {
            self.execute_suggest(request, listener)
        })
    }

    /// Search.
    fn search<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<SearchResponse>>
    where
        F: FnOnce(&mut SearchRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(Requests::search_request(), configurator, |request, listener| {
            self.execute_search(request, listener)
        })
    }

    /// Run several searches.
    fn multi_search<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<MultiSearchResponse>>
    where
        F: FnOnce(&mut MultiSearchRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(MultiSearchRequest::default(), configurator, |request, listener| {
            self.execute_multi_search(request, listener)
        })
    }

    /// Find documents in `index` similar to a given one.
    fn more_like_this<F, O>(
        &self,
        index: impl Into<String>,
        configurator: F,
    ) -> Result<ListenableActionFuture<SearchResponse>>
    where
        F: FnOnce(&mut MoreLikeThisRequest) -> O,
        O: ConfigureOutcome,
    {
        let index = index.into();
        require_identifier("index", &index)?;
        dispatch(Requests::more_like_this_request(index), configurator, |request, listener| {
            self.execute_more_like_this(request, listener)
        })
    }

    /// Count matching documents.
    fn count<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<CountResponse>>
    where
        F: FnOnce(&mut CountRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(Requests::count_request(), configurator, |request, listener| {
            self.execute_count(request, listener)
        })
    }

    /// Fetch the next page of a scroll.
    fn search_scroll<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<SearchResponse>>
    where
        F: FnOnce(&mut SearchScrollRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(SearchScrollRequest::default(), configurator, |request, listener| {
            self.execute_search_scroll(request, listener)
        })
    }

    /// Release scroll contexts.
    fn clear_scroll<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<ClearScrollResponse>>
    where
        F: FnOnce(&mut ClearScrollRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(ClearScrollRequest::default(), configurator, |request, listener| {
            self.execute_clear_scroll(request, listener)
        })
    }

    /// Return the term vectors of one document.
    fn term_vector<F, O>(
        &self,
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<String>,
        configurator: F,
    ) -> Result<ListenableActionFuture<TermVectorResponse>>
    where
        F: FnOnce(&mut TermVectorRequest) -> O,
        O: ConfigureOutcome,
    {
        let index = index.into();
        require_identifier("index", &index)?;
        let doc_type = doc_type.into();
        require_identifier("type", &doc_type)?;
        let id = id.into();
        require_identifier("id", &id)?;
        dispatch(TermVectorRequest::new(index, doc_type, id), configurator, |request, listener| {
            self.execute_term_vector(request, listener)
        })
    }

    /// Return term vectors of several documents.
    fn multi_term_vectors<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<MultiTermVectorsResponse>>
    where
        F: FnOnce(&mut MultiTermVectorsRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(MultiTermVectorsRequest::default(), configurator, |request, listener| {
            self.execute_multi_term_vectors(request, listener)
        })
    }

    /// Match a document against registered queries.
    fn percolate<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<PercolateResponse>>
    where
        F: FnOnce(&mut PercolateRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(PercolateRequest::default(), configurator, |request, listener| {
            self.execute_percolate(request, listener)
        })
    }

    /// Run several percolations.
    fn multi_percolate<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<MultiPercolateResponse>>
    where
        F: FnOnce(&mut MultiPercolateRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(MultiPercolateRequest::default(), configurator, |request, listener| {
            self.execute_multi_percolate(request, listener)
        })
    }

    /// Explain the score of one document for a query.
    fn explain<F, O>(
        &self,
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<String>,
        configurator: F,
    ) -> Result<ListenableActionFuture<ExplainResponse>>
    where
        F: FnOnce(&mut ExplainRequest) -> O,
        O: ConfigureOutcome,
    {
        let index = index.into();
        require_identifier("index", &index)?;
        let doc_type = doc_type.into();
        require_identifier("type", &doc_type)?;
        let id = id.into();
        require_identifier("id", &id)?;
        dispatch(ExplainRequest::new(index, doc_type, id), configurator, |request, listener| {
            self.execute_explain(request, listener)
        })
    }

    /// Store a script.
    fn put_indexed_script<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<PutIndexedScriptResponse>>
    where
        F: FnOnce(&mut PutIndexedScriptRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(PutIndexedScriptRequest::default(), configurator, |request, listener| {
            self.execute_put_indexed_script(request, listener)
        })
    }

    /// Fetch a stored script.
    fn get_indexed_script<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<GetIndexedScriptResponse>>
    where
        F: FnOnce(&mut GetIndexedScriptRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(GetIndexedScriptRequest::default(), configurator, |request, listener| {
            self.execute_get_indexed_script(request, listener)
        })
    }

    /// Remove a stored script.
    fn delete_indexed_script<F, O>(
        &self,
        configurator: F,
    ) -> Result<ListenableActionFuture<DeleteIndexedScriptResponse>>
    where
        F: FnOnce(&mut DeleteIndexedScriptRequest) -> O,
        O: ConfigureOutcome,
    {
        dispatch(DeleteIndexedScriptRequest::default(), configurator, |request, listener| {
            self.execute_delete_indexed_script(request, listener)
        })
    }
}

impl<C: Client + ?Sized> ClientExt for C {}
