//! [`Client`] implementation backed by the `opensearch` crate.

use crate::client::{AdminClient, Client, Listener};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::request::*;
use crate::response::*;
use crate::settings::Settings;
use armature_action::ActionError;
use opensearch::{
    http::{
        headers::{HeaderMap, HeaderValue, ACCEPT_ENCODING},
        request::{JsonBody, NdBody},
        transport::{SingleNodeConnectionPool, TransportBuilder},
        Method as HttpMethod, StatusCode,
    },
    OpenSearch,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, trace};

/// Validates requests, sends them on the runtime and completes listeners.
#[derive(Clone)]
struct Executor {
    client: Arc<OpenSearch>,
    runtime: Handle,
}

impl Executor {
    fn execute<R: ActionRequest>(&self, request: R, listener: Listener<R::Response>) {
        if let Err(e) = request.validate() {
            debug!("Rejecting invalid {}: {}", std::any::type_name::<R>(), e);
            listener.on_failure(e);
            return;
        }

        let endpoint = request.endpoint();
        let client = self.client.clone();
        self.runtime.spawn(async move {
            match send::<R::Response>(&client, endpoint).await {
                Ok(response) => listener.on_response(response),
                Err(e) => listener.on_failure(e),
            }
        });
    }
}

async fn send<T: FromResponseBody>(client: &OpenSearch, endpoint: Endpoint) -> armature_action::Result<T> {
    debug!("{:?} {}", endpoint.method, endpoint.path);

    let method = match endpoint.method {
        Method::Get => HttpMethod::Get,
        Method::Post => HttpMethod::Post,
        Method::Put => HttpMethod::Put,
        Method::Delete => HttpMethod::Delete,
        Method::Head => HttpMethod::Head,
    };
    let params = (!endpoint.params.is_empty()).then_some(&endpoint.params);

    let response = match endpoint.body {
        Some(Body::Json(body)) => {
            client
                .send(method, &endpoint.path, HeaderMap::new(), params, Some(JsonBody::new(body)), None)
                .await
        }
        Some(Body::NdJson(lines)) => {
            let lines: Vec<JsonBody<Value>> = lines.into_iter().map(JsonBody::new).collect();
            client
                .send(method, &endpoint.path, HeaderMap::new(), params, Some(NdBody::new(lines)), None)
                .await
        }
        None => {
            client
                .send::<JsonBody<Value>, _>(method, &endpoint.path, HeaderMap::new(), params, None, None)
                .await
        }
    }
    .map_err(|e| ActionError::Transport(e.to_string()))?;

    let status = response.status_code();
    let text = response
        .text()
        .await
        .map_err(|e| ActionError::Transport(e.to_string()))?;
    trace!("{} {}", status, text);

    if status.is_success() {
        let body: Value =
            serde_json::from_str(&text).map_err(|e| ActionError::Parse(e.to_string()))?;
        return T::from_body(body);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(body) if describes_missing_document(status, &body) => T::from_body(body),
        Ok(body) => Err(ActionError::Remote {
            status: status.as_u16(),
            reason: error_reason(&body).unwrap_or_else(|| fallback_reason(status, &text)),
        }),
        Err(_) => Err(ActionError::Remote {
            status: status.as_u16(),
            reason: fallback_reason(status, &text),
        }),
    }
}

fn error_reason(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("reason").or(Some(e)))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Reason for an error response without a usable `error` object.
fn fallback_reason(status: StatusCode, text: &str) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None if !text.trim().is_empty() => text.trim().to_string(),
        None => "Unknown error".to_string(),
    }
}

/// A 404 for a get or delete still carries a well-formed response.
fn describes_missing_document(status: StatusCode, body: &Value) -> bool {
    status == StatusCode::NOT_FOUND
        && (body.get("found").is_some()
            || body.get("result").and_then(Value::as_str) == Some("not_found"))
}

/// [`Client`] that talks to an OpenSearch cluster over HTTP.
///
/// Actions run on the tokio runtime captured at construction, so listeners
/// are completed on runtime worker threads.
#[derive(Clone)]
pub struct OpenSearchClient {
    executor: Executor,
    admin: OpenSearchAdminClient,
    settings: Settings,
    config: Arc<ClientConfig>,
}

impl OpenSearchClient {
    /// Create a client that runs actions on the current tokio runtime.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| ClientError::NoRuntime(e.to_string()))?;
        Self::with_runtime(config, runtime)
    }

    /// Create a client that runs actions on the given runtime.
    pub fn with_runtime(config: ClientConfig, runtime: Handle) -> Result<Self> {
        info!("Initializing search client for: {:?}", config.urls);
        config.validate()?;

        let url = config
            .urls
            .first()
            .ok_or_else(|| ClientError::Validation("No URLs provided".to_string()))?;
        let url = opensearch::http::Url::parse(url)
            .map_err(|e| ClientError::Validation(format!("Invalid URL: {}", e)))?;

        let conn_pool = SingleNodeConnectionPool::new(url);
        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(config.request_timeout)
            .disable_proxy();

        // Responses are gzip-negotiated unless compression is switched off.
        if !config.compression {
            builder = builder.header(ACCEPT_ENCODING, HeaderValue::from_static("identity"));
        }

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.auth(opensearch::auth::Credentials::Basic(
                user.clone(),
                pass.clone(),
            ));
        }

        let transport = builder
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let executor = Executor {
            client: Arc::new(OpenSearch::new(transport)),
            runtime,
        };

        debug!("Search client initialized");

        Ok(Self {
            admin: OpenSearchAdminClient {
                executor: executor.clone(),
            },
            executor,
            settings: config.to_settings(),
            config: Arc::new(config),
        })
    }

    /// Get the underlying OpenSearch client.
    pub fn inner(&self) -> &OpenSearch {
        &self.executor.client
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Client for OpenSearchClient {
    fn admin_client(&self) -> &dyn AdminClient {
        &self.admin
    }

    fn client_settings(&self) -> &Settings {
        &self.settings
    }

    fn execute_index(&self, request: IndexRequest, listener: Listener<IndexResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_bulk(&self, request: BulkRequest, listener: Listener<BulkResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_update(&self, request: UpdateRequest, listener: Listener<UpdateResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_delete(&self, request: DeleteRequest, listener: Listener<DeleteResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_delete_by_query(
        &self,
        request: DeleteByQueryRequest,
        listener: Listener<DeleteByQueryResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_get(&self, request: GetRequest, listener: Listener<GetResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_multi_get(&self, request: MultiGetRequest, listener: Listener<MultiGetResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_suggest(&self, request: SuggestRequest, listener: Listener<SuggestResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_search(&self, request: SearchRequest, listener: Listener<SearchResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_multi_search(
        &self,
        request: MultiSearchRequest,
        listener: Listener<MultiSearchResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_more_like_this(
        &self,
        request: MoreLikeThisRequest,
        listener: Listener<SearchResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_count(&self, request: CountRequest, listener: Listener<CountResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_search_scroll(
        &self,
        request: SearchScrollRequest,
        listener: Listener<SearchResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_clear_scroll(
        &self,
        request: ClearScrollRequest,
        listener: Listener<ClearScrollResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_term_vector(
        &self,
        request: TermVectorRequest,
        listener: Listener<TermVectorResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_multi_term_vectors(
        &self,
        request: MultiTermVectorsRequest,
        listener: Listener<MultiTermVectorsResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_percolate(&self, request: PercolateRequest, listener: Listener<PercolateResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_multi_percolate(
        &self,
        request: MultiPercolateRequest,
        listener: Listener<MultiPercolateResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_explain(&self, request: ExplainRequest, listener: Listener<ExplainResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_put_indexed_script(
        &self,
        request: PutIndexedScriptRequest,
        listener: Listener<PutIndexedScriptResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_get_indexed_script(
        &self,
        request: GetIndexedScriptRequest,
        listener: Listener<GetIndexedScriptResponse>,
    ) {
        self.executor.execute(request, listener)
    }

    fn execute_delete_indexed_script(
        &self,
        request: DeleteIndexedScriptRequest,
        listener: Listener<DeleteIndexedScriptResponse>,
    ) {
        self.executor.execute(request, listener)
    }
}

/// [`AdminClient`] sharing the transport of an [`OpenSearchClient`].
#[derive(Clone)]
pub struct OpenSearchAdminClient {
    executor: Executor,
}

impl AdminClient for OpenSearchAdminClient {
    fn execute_refresh(&self, request: RefreshRequest, listener: Listener<RefreshResponse>) {
        self.executor.execute(request, listener)
    }

    fn execute_cluster_health(
        &self,
        request: ClusterHealthRequest,
        listener: Listener<ClusterHealthResponse>,
    ) {
        self.executor.execute(request, listener)
    }
}
