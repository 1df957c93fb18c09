//! Typed views over response bodies.
//!
//! Every response keeps the raw JSON body it was built from and exposes a
//! handful of accessors for the fields callers usually need. Anything else
//! is reachable through [`body`](SearchResponse::body).

use crate::request::script_source;
use armature_action::{ActionError, Result};
use serde_json::Value;

/// Build a response from a decoded body.
pub trait FromResponseBody: Sized {
    /// Wrap `body`, rejecting bodies that are not JSON objects.
    fn from_body(body: Value) -> Result<Self>;
}

macro_rules! response {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            body: Value,
        }

        impl $name {
            /// Wrap a raw response body.
            pub fn new(body: Value) -> Self {
                Self { body }
            }

            /// Raw response body.
            pub fn body(&self) -> &Value {
                &self.body
            }

            /// Consume the response, returning the raw body.
            pub fn into_body(self) -> Value {
                self.body
            }
        }

        impl FromResponseBody for $name {
            fn from_body(body: Value) -> Result<Self> {
                if body.is_object() {
                    Ok(Self::new(body))
                } else {
                    Err(ActionError::Parse(format!(
                        "expected a JSON object for {}, got {}",
                        stringify!($name),
                        body
                    )))
                }
            }
        }
    };
}

fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

fn u64_field(body: &Value, key: &str) -> u64 {
    body.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn bool_field(body: &Value, key: &str) -> bool {
    body.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn nested<T: FromResponseBody>(body: &Value, key: &str) -> Vec<T> {
    body.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| T::from_body(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

response!(
    /// Result of indexing a document.
    IndexResponse
);

impl IndexResponse {
    /// Index the document landed in.
    pub fn index(&self) -> Option<&str> {
        str_field(&self.body, "_index")
    }

    /// Id of the document, generated or given.
    pub fn id(&self) -> Option<&str> {
        str_field(&self.body, "_id")
    }

    /// Version after the write.
    pub fn version(&self) -> Option<i64> {
        self.body.get("_version").and_then(Value::as_i64)
    }

    /// Whether the document was newly created rather than replaced.
    pub fn created(&self) -> bool {
        str_field(&self.body, "result") == Some("created") || bool_field(&self.body, "created")
    }
}

response!(
    /// Result of a partial update.
    UpdateResponse
);

impl UpdateResponse {
    /// Id of the updated document.
    pub fn id(&self) -> Option<&str> {
        str_field(&self.body, "_id")
    }

    /// Version after the update.
    pub fn version(&self) -> Option<i64> {
        self.body.get("_version").and_then(Value::as_i64)
    }

    /// `updated`, `created` or `noop`.
    pub fn result(&self) -> Option<&str> {
        str_field(&self.body, "result")
    }
}

response!(
    /// Result of deleting a document.
    DeleteResponse
);

impl DeleteResponse {
    /// Id of the deleted document.
    pub fn id(&self) -> Option<&str> {
        str_field(&self.body, "_id")
    }

    /// Version after the delete.
    pub fn version(&self) -> Option<i64> {
        self.body.get("_version").and_then(Value::as_i64)
    }

    /// Whether the document existed.
    pub fn found(&self) -> bool {
        str_field(&self.body, "result") == Some("deleted") || bool_field(&self.body, "found")
    }
}

response!(
    /// Per-item results of a bulk request.
    BulkResponse
);

impl BulkResponse {
    /// Milliseconds the cluster spent on the request.
    pub fn took(&self) -> u64 {
        u64_field(&self.body, "took")
    }

    /// Whether any item failed.
    pub fn has_failures(&self) -> bool {
        bool_field(&self.body, "errors")
    }

    /// Item results in request order.
    pub fn items(&self) -> &[Value] {
        self.body
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Reasons of the failed items, in request order.
    pub fn failure_reasons(&self) -> Vec<String> {
        self.items()
            .iter()
            .filter_map(|item| item.as_object()?.values().next())
            .filter_map(|result| result.get("error"))
            .map(|error| {
                error
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string())
            })
            .collect()
    }
}

response!(
    /// Result of deleting by query.
    DeleteByQueryResponse
);

impl DeleteByQueryResponse {
    /// Number of deleted documents.
    pub fn deleted(&self) -> u64 {
        u64_field(&self.body, "deleted")
    }

    /// Milliseconds the cluster spent on the request.
    pub fn took(&self) -> u64 {
        u64_field(&self.body, "took")
    }
}

response!(
    /// A fetched document.
    GetResponse
);

impl GetResponse {
    /// Index of the document.
    pub fn index(&self) -> Option<&str> {
        str_field(&self.body, "_index")
    }

    /// Id of the document.
    pub fn id(&self) -> Option<&str> {
        str_field(&self.body, "_id")
    }

    /// Current version.
    pub fn version(&self) -> Option<i64> {
        self.body.get("_version").and_then(Value::as_i64)
    }

    /// Whether the document exists.
    pub fn exists(&self) -> bool {
        bool_field(&self.body, "found")
    }

    /// Document source, if it exists and was requested.
    pub fn source(&self) -> Option<&Value> {
        self.body.get("_source")
    }
}

response!(
    /// Several fetched documents.
    MultiGetResponse
);

impl MultiGetResponse {
    /// Documents in request order.
    pub fn responses(&self) -> Vec<GetResponse> {
        nested(&self.body, "docs")
    }
}

response!(
    /// Search hits and aggregations.
    SearchResponse
);

impl SearchResponse {
    /// Milliseconds the cluster spent on the search.
    pub fn took(&self) -> u64 {
        u64_field(&self.body, "took")
    }

    /// Whether the search ran out of time.
    pub fn timed_out(&self) -> bool {
        bool_field(&self.body, "timed_out")
    }

    /// Total matching documents.
    ///
    /// Accepts both a bare number and the `{"value": n}` form.
    pub fn total_hits(&self) -> u64 {
        match self.body.get("hits").and_then(|h| h.get("total")) {
            Some(Value::Object(total)) => total.get("value").and_then(Value::as_u64).unwrap_or(0),
            Some(total) => total.as_u64().unwrap_or(0),
            None => 0,
        }
    }

    /// Hits on this page.
    pub fn hits(&self) -> &[Value] {
        self.body
            .get("hits")
            .and_then(|h| h.get("hits"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Scroll id for the next page.
    pub fn scroll_id(&self) -> Option<&str> {
        str_field(&self.body, "_scroll_id")
    }

    /// Aggregation results.
    pub fn aggregations(&self) -> Option<&Value> {
        self.body.get("aggregations")
    }
}

response!(
    /// Results of several searches.
    MultiSearchResponse
);

impl MultiSearchResponse {
    /// Search results in request order.
    pub fn responses(&self) -> Vec<SearchResponse> {
        nested(&self.body, "responses")
    }
}

response!(
    /// Number of matching documents.
    CountResponse
);

impl CountResponse {
    /// Matching documents.
    pub fn count(&self) -> u64 {
        u64_field(&self.body, "count")
    }
}

response!(
    /// Result of releasing scroll contexts.
    ClearScrollResponse
);

impl ClearScrollResponse {
    /// Whether the contexts were released.
    pub fn succeeded(&self) -> bool {
        bool_field(&self.body, "succeeded")
    }

    /// Number of released contexts.
    pub fn num_freed(&self) -> u64 {
        u64_field(&self.body, "num_freed")
    }
}

response!(
    /// Suggestions.
    SuggestResponse
);

impl SuggestResponse {
    /// Suggestions keyed by suggester name.
    pub fn suggest(&self) -> Option<&Value> {
        self.body.get("suggest")
    }
}

response!(
    /// Explanation of a document's score.
    ExplainResponse
);

impl ExplainResponse {
    /// Whether the document matches the query.
    pub fn matched(&self) -> bool {
        bool_field(&self.body, "matched")
    }

    /// Score explanation tree.
    pub fn explanation(&self) -> Option<&Value> {
        self.body.get("explanation")
    }
}

response!(
    /// Registered queries that matched a document.
    PercolateResponse
);

impl PercolateResponse {
    /// Number of matching queries.
    pub fn count(&self) -> u64 {
        SearchResponse::new(self.body.clone()).total_hits()
    }

    /// `(index, id)` of each matching query.
    pub fn matches(&self) -> Vec<(String, String)> {
        SearchResponse::new(self.body.clone())
            .hits()
            .iter()
            .filter_map(|hit| {
                Some((
                    str_field(hit, "_index")?.to_string(),
                    str_field(hit, "_id")?.to_string(),
                ))
            })
            .collect()
    }
}

response!(
    /// Results of several percolations.
    MultiPercolateResponse
);

impl MultiPercolateResponse {
    /// Percolation results in request order.
    pub fn responses(&self) -> Vec<PercolateResponse> {
        nested(&self.body, "responses")
    }
}

response!(
    /// Term vectors of a document.
    TermVectorResponse
);

impl TermVectorResponse {
    /// Id of the document.
    pub fn id(&self) -> Option<&str> {
        str_field(&self.body, "_id")
    }

    /// Whether the document exists.
    pub fn found(&self) -> bool {
        bool_field(&self.body, "found")
    }

    /// Term vectors keyed by field.
    pub fn term_vectors(&self) -> Option<&Value> {
        self.body.get("term_vectors")
    }
}

response!(
    /// Term vectors of several documents.
    MultiTermVectorsResponse
);

impl MultiTermVectorsResponse {
    /// Term vector results in request order.
    pub fn responses(&self) -> Vec<TermVectorResponse> {
        nested(&self.body, "docs")
    }
}

response!(
    /// Result of storing a script.
    PutIndexedScriptResponse
);

impl PutIndexedScriptResponse {
    /// Whether the cluster acknowledged the script.
    pub fn acknowledged(&self) -> bool {
        bool_field(&self.body, "acknowledged")
    }
}

response!(
    /// A stored script.
    GetIndexedScriptResponse
);

impl GetIndexedScriptResponse {
    /// Id of the script.
    pub fn id(&self) -> Option<&str> {
        str_field(&self.body, "_id")
    }

    /// Whether the script exists.
    pub fn exists(&self) -> bool {
        bool_field(&self.body, "found")
    }

    /// Script source.
    pub fn script(&self) -> Option<&str> {
        script_source(&self.body)
    }
}

response!(
    /// Result of removing a stored script.
    DeleteIndexedScriptResponse
);

impl DeleteIndexedScriptResponse {
    /// Whether the cluster acknowledged the removal.
    pub fn acknowledged(&self) -> bool {
        bool_field(&self.body, "acknowledged")
    }
}

response!(
    /// Result of refreshing indices.
    RefreshResponse
);

impl RefreshResponse {
    /// Shards the refresh was sent to.
    pub fn total_shards(&self) -> u64 {
        self.body.get("_shards").map_or(0, |s| u64_field(s, "total"))
    }

    /// Shards that refreshed.
    pub fn successful_shards(&self) -> u64 {
        self.body
            .get("_shards")
            .map_or(0, |s| u64_field(s, "successful"))
    }

    /// Shards that failed to refresh.
    pub fn failed_shards(&self) -> u64 {
        self.body.get("_shards").map_or(0, |s| u64_field(s, "failed"))
    }
}

response!(
    /// Cluster or index health.
    ClusterHealthResponse
);

impl ClusterHealthResponse {
    /// Name of the cluster.
    pub fn cluster_name(&self) -> Option<&str> {
        str_field(&self.body, "cluster_name")
    }

    /// `green`, `yellow` or `red`.
    pub fn status(&self) -> Option<&str> {
        str_field(&self.body, "status")
    }

    /// Whether the requested status was not reached in time.
    pub fn timed_out(&self) -> bool {
        bool_field(&self.body, "timed_out")
    }

    /// Number of nodes in the cluster.
    pub fn number_of_nodes(&self) -> u64 {
        u64_field(&self.body, "number_of_nodes")
    }
}
