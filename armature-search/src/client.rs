//! The listener-based client surface.
//!
//! Every action takes an owned request and a listener. Implementations must
//! complete the listener exactly once, either with the typed response or
//! with the failure, and must not block the calling thread on I/O.

use crate::request::*;
use crate::response::*;
use crate::settings::Settings;
use armature_action::ActionListener;

/// Boxed listener handed to a [`Client`] action.
pub type Listener<T> = Box<dyn ActionListener<T>>;

/// Document, search and script actions.
pub trait Client: Send + Sync {
    /// Cluster and index administration.
    fn admin_client(&self) -> &dyn AdminClient;

    /// Settings the client was built from.
    fn client_settings(&self) -> &Settings;

    /// Index a document.
    fn execute_index(&self, request: IndexRequest, listener: Listener<IndexResponse>);

    /// Run several index, create, update and delete operations in one request.
    fn execute_bulk(&self, request: BulkRequest, listener: Listener<BulkResponse>);

    /// Partially update a document.
    fn execute_update(&self, request: UpdateRequest, listener: Listener<UpdateResponse>);

    /// Delete a document.
    fn execute_delete(&self, request: DeleteRequest, listener: Listener<DeleteResponse>);

    /// Delete every document matching a query.
    fn execute_delete_by_query(
        &self,
        request: DeleteByQueryRequest,
        listener: Listener<DeleteByQueryResponse>,
    );

    /// Fetch a document.
    fn execute_get(&self, request: GetRequest, listener: Listener<GetResponse>);

    /// Fetch several documents.
    fn execute_multi_get(&self, request: MultiGetRequest, listener: Listener<MultiGetResponse>);

    /// Request suggestions.
    fn execute_suggest(&self, request: SuggestRequest, listener: Listener<SuggestResponse>);

    /// Search.
    fn execute_search(&self, request: SearchRequest, listener: Listener<SearchResponse>);

    /// Run several searches.
    fn execute_multi_search(
        &self,
        request: MultiSearchRequest,
        listener: Listener<MultiSearchResponse>,
    );

    /// Find documents similar to a given one.
    fn execute_more_like_this(
        &self,
        request: MoreLikeThisRequest,
        listener: Listener<SearchResponse>,
    );

    /// Count matching documents.
    fn execute_count(&self, request: CountRequest, listener: Listener<CountResponse>);

    /// Fetch the next page of a scroll.
    fn execute_search_scroll(
        &self,
        request: SearchScrollRequest,
        listener: Listener<SearchResponse>,
    );

    /// Release scroll contexts.
    fn execute_clear_scroll(
        &self,
        request: ClearScrollRequest,
        listener: Listener<ClearScrollResponse>,
    );

    /// Return term vectors of a document.
    fn execute_term_vector(
        &self,
        request: TermVectorRequest,
        listener: Listener<TermVectorResponse>,
    );

    /// Return term vectors of several documents.
    fn execute_multi_term_vectors(
        &self,
        request: MultiTermVectorsRequest,
        listener: Listener<MultiTermVectorsResponse>,
    );

    /// Match a document against registered queries.
    fn execute_percolate(&self, request: PercolateRequest, listener: Listener<PercolateResponse>);

    /// Run several percolations.
    fn execute_multi_percolate(
        &self,
        request: MultiPercolateRequest,
        listener: Listener<MultiPercolateResponse>,
    );

    /// Explain a document's score for a query.
    fn execute_explain(&self, request: ExplainRequest, listener: Listener<ExplainResponse>);

    /// Store a script.
    fn execute_put_indexed_script(
        &self,
        request: PutIndexedScriptRequest,
        listener: Listener<PutIndexedScriptResponse>,
    );

    /// Fetch a stored script.
    fn execute_get_indexed_script(
        &self,
        request: GetIndexedScriptRequest,
        listener: Listener<GetIndexedScriptResponse>,
    );

    /// Remove a stored script.
    fn execute_delete_indexed_script(
        &self,
        request: DeleteIndexedScriptRequest,
        listener: Listener<DeleteIndexedScriptResponse>,
    );
}

/// Cluster and index administration actions.
pub trait AdminClient: Send + Sync {
    /// Refresh indices.
    fn execute_refresh(&self, request: RefreshRequest, listener: Listener<RefreshResponse>);

    /// Report cluster health.
    fn execute_cluster_health(
        &self,
        request: ClusterHealthRequest,
        listener: Listener<ClusterHealthResponse>,
    );
}
