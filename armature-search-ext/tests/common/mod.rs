// Recording client for exercising the extension traits without a cluster

#![allow(dead_code)]

use armature_action::{ActionError, ActionListener};
use armature_search::*;
use parking_lot::Mutex;
use std::any::Any;

struct Call {
    op: &'static str,
    request: Box<dyn Any + Send>,
    listener: Box<dyn Any + Send>,
}

/// Log of every action a mock client received.
#[derive(Default)]
pub struct CallLog {
    calls: Mutex<Vec<Call>>,
}

impl CallLog {
    fn record<R, T>(&self, op: &'static str, request: R, listener: Listener<T>)
    where
        R: Send + 'static,
        T: 'static,
    {
        self.calls.lock().push(Call {
            op,
            request: Box::new(request),
            listener: Box::new(listener),
        });
    }

    /// Names of the actions received, in order.
    pub fn ops(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(|c| c.op).collect()
    }

    /// Number of actions received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// The request of call `index`.
    pub fn request<R: Clone + 'static>(&self, index: usize) -> R {
        self.calls.lock()[index]
            .request
            .downcast_ref::<R>()
            .expect("request of a different type")
            .clone()
    }

    /// Complete the listener of call `index` with a response.
    pub fn complete<T: 'static>(&self, index: usize, response: T) {
        let calls = self.calls.lock();
        listener::<T>(&calls[index]).on_response(response);
    }

    /// Complete the listener of call `index` with a failure.
    pub fn fail<T: 'static>(&self, index: usize, error: ActionError) {
        let calls = self.calls.lock();
        listener::<T>(&calls[index]).on_failure(error);
    }
}

fn listener<T: 'static>(call: &Call) -> &Listener<T> {
    call.listener
        .downcast_ref::<Listener<T>>()
        .expect("listener of a different type")
}

/// Admin client that only records.
#[derive(Default)]
pub struct RecordingAdminClient {
    pub log: CallLog,
}

impl AdminClient for RecordingAdminClient {
    fn execute_refresh(&self, request: RefreshRequest, listener: Listener<RefreshResponse>) {
        self.log.record("refresh", request, listener)
    }

    fn execute_cluster_health(
        &self,
        request: ClusterHealthRequest,
        listener: Listener<ClusterHealthResponse>,
    ) {
        self.log.record("cluster_health", request, listener)
    }
}

/// Client that records every action and leaves completion to the test.
#[derive(Default)]
pub struct RecordingClient {
    pub log: CallLog,
    pub admin: RecordingAdminClient,
    pub settings: Settings,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }
}

impl Client for RecordingClient {
    fn admin_client(&self) -> &dyn AdminClient {
        &self.admin
    }

    fn client_settings(&self) -> &Settings {
        &self.settings
    }

    fn execute_index(&self, request: IndexRequest, listener: Listener<IndexResponse>) {
        self.log.record("index", request, listener)
    }

    fn execute_bulk(&self, request: BulkRequest, listener: Listener<BulkResponse>) {
        self.log.record("bulk", request, listener)
    }

    fn execute_update(&self, request: UpdateRequest, listener: Listener<UpdateResponse>) {
        self.log.record("update", request, listener)
    }

    fn execute_delete(&self, request: DeleteRequest, listener: Listener<DeleteResponse>) {
        self.log.record("delete", request, listener)
    }

    fn execute_delete_by_query(
        &self,
        request: DeleteByQueryRequest,
        listener: Listener<DeleteByQueryResponse>,
    ) {
        self.log.record("delete_by_query", request, listener)
    }

    fn execute_get(&self, request: GetRequest, listener: Listener<GetResponse>) {
        self.log.record("get", request, listener)
    }

    fn execute_multi_get(&self, request: MultiGetRequest, listener: Listener<MultiGetResponse>) {
        self.log.record("multi_get", request, listener)
    }

    fn execute_suggest(&self, request: SuggestRequest, listener: Listener<SuggestResponse>) {
        self.log.record("suggest", request, listener)
    }

    fn execute_search(&self, request: SearchRequest, listener: Listener<SearchResponse>) {
        self.log.record("search", request, listener)
    }

    fn execute_multi_search(
        &self,
        request: MultiSearchRequest,
        listener: Listener<MultiSearchResponse>,
    ) {
        self.log.record("multi_search", request, listener)
    }

    fn execute_more_like_this(
        &self,
        request: MoreLikeThisRequest,
        listener: Listener<SearchResponse>,
    ) {
        self.log.record("more_like_this", request, listener)
    }

    fn execute_count(&self, request: CountRequest, listener: Listener<CountResponse>) {
        self.log.record("count", request, listener)
    }

    fn execute_search_scroll(
        &self,
        request: SearchScrollRequest,
        listener: Listener<SearchResponse>,
    ) {
        self.log.record("search_scroll", request, listener)
    }

    fn execute_clear_scroll(
        &self,
        request: ClearScrollRequest,
        listener: Listener<ClearScrollResponse>,
    ) {
        self.log.record("clear_scroll", request, listener)
    }

    fn execute_term_vector(
        &self,
        request: TermVectorRequest,
        listener: Listener<TermVectorResponse>,
    ) {
        self.log.record("term_vector", request, listener)
    }

    fn execute_multi_term_vectors(
        &self,
        request: MultiTermVectorsRequest,
        listener: Listener<MultiTermVectorsResponse>,
    ) {
        self.log.record("multi_term_vectors", request, listener)
    }

    fn execute_percolate(&self, request: PercolateRequest, listener: Listener<PercolateResponse>) {
        self.log.record("percolate", request, listener)
    }

    fn execute_multi_percolate(
        &self,
        request: MultiPercolateRequest,
        listener: Listener<MultiPercolateResponse>,
    ) {
        self.log.record("multi_percolate", request, listener)
    }

    fn execute_explain(&self, request: ExplainRequest, listener: Listener<ExplainResponse>) {
        self.log.record("explain", request, listener)
    }

    fn execute_put_indexed_script(
        &self,
        request: PutIndexedScriptRequest,
        listener: Listener<PutIndexedScriptResponse>,
    ) {
        self.log.record("put_indexed_script", request, listener)
    }

    fn execute_get_indexed_script(
        &self,
        request: GetIndexedScriptRequest,
        listener: Listener<GetIndexedScriptResponse>,
    ) {
        self.log.record("get_indexed_script", request, listener)
    }

    fn execute_delete_indexed_script(
        &self,
        request: DeleteIndexedScriptRequest,
        listener: Listener<DeleteIndexedScriptResponse>,
    ) {
        self.log.record("delete_indexed_script", request, listener)
    }
}
