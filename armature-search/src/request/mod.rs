//! Typed action requests.
//!
//! Each request is a plain record with public fields plus chainable setters
//! of the same names, so it can be filled in either way:
//!
//! ```rust
//! use armature_search::{IndexRequest, Requests};
//! use serde_json::json;
//!
//! let mut request: IndexRequest = Requests::index_request();
//! request.index("posts").doc_type("article").id("1");
//! request.source = Some(json!({ "title": "hi" }));
//! ```

mod admin;
mod document;
mod percolate;
mod script;
mod search;
mod termvector;

pub use admin::{ClusterHealthRequest, RefreshRequest};
pub use document::{
    BulkItem, BulkRequest, DeleteByQueryRequest, DeleteRequest, GetRequest, IndexRequest,
    MultiGetItem, MultiGetRequest, OpType, UpdateRequest,
};
pub use percolate::{MultiPercolateRequest, PercolateRequest, DEFAULT_PERCOLATOR_FIELD};
pub use script::{DeleteIndexedScriptRequest, GetIndexedScriptRequest, PutIndexedScriptRequest};
pub(crate) use script::script_source;
pub use search::{
    ClearScrollRequest, CountRequest, ExplainRequest, MoreLikeThisRequest, MultiSearchRequest,
    SearchRequest, SearchScrollRequest, SuggestRequest,
};
pub use termvector::{MultiTermVectorsRequest, TermVectorRequest};

use crate::response::FromResponseBody;
use armature_action::{ActionError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

/// A request that can be executed by a [`Client`](crate::Client).
pub trait ActionRequest: Send + 'static {
    /// Response the action resolves to.
    type Response: FromResponseBody + Clone + Send + Sync + 'static;

    /// Check that the request is complete enough to send.
    fn validate(&self) -> Result<()>;

    /// Describe the HTTP exchange that carries out the request.
    fn endpoint(&self) -> Endpoint;
}

/// HTTP method of an [`Endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// HEAD
    Head,
}

/// Request body of an [`Endpoint`].
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A single JSON document.
    Json(Value),
    /// Newline-delimited JSON, one value per line.
    NdJson(Vec<Value>),
}

/// HTTP exchange for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the cluster URL, starting with `/`.
    pub path: String,
    /// Query string parameters.
    pub params: Vec<(String, String)>,
    /// Request body.
    pub body: Option<Body>,
}

impl Endpoint {
    /// Create an endpoint without parameters or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
        }
    }

    /// Add a query string parameter.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query string parameter if a value is present.
    pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Add `key=true` if `flag` is set.
    pub fn flag(self, key: &str, flag: bool) -> Self {
        if flag {
            self.param(key, true)
        } else {
            self
        }
    }

    /// Set a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Set a newline-delimited JSON body.
    pub fn ndjson(mut self, lines: Vec<Value>) -> Self {
        self.body = Some(Body::NdJson(lines));
        self
    }

    /// Look up a query string parameter.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Factory functions for requests that are not simply default-constructed.
pub struct Requests;

impl Requests {
    /// Create an index request.
    pub fn index_request() -> IndexRequest {
        IndexRequest::default()
    }

    /// Create a delete-by-query request.
    pub fn delete_by_query_request() -> DeleteByQueryRequest {
        DeleteByQueryRequest::default()
    }

    /// Create a get request for a document in `index`.
    pub fn get_request(index: impl Into<String>) -> GetRequest {
        GetRequest::new(index)
    }

    /// Create a search request across all indices.
    pub fn search_request() -> SearchRequest {
        SearchRequest::default()
    }

    /// Create a more-like-this request for a document in `index`.
    pub fn more_like_this_request(index: impl Into<String>) -> MoreLikeThisRequest {
        MoreLikeThisRequest::new(index)
    }

    /// Create a count request across all indices.
    pub fn count_request() -> CountRequest {
        CountRequest::default()
    }
}

const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a single path segment.
pub(crate) fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// `/a,b` for a list of indices, or an empty string for all indices.
pub(crate) fn indices_path(indices: &[String]) -> String {
    if indices.is_empty() {
        return String::new();
    }
    let encoded: Vec<String> = indices.iter().map(|i| encode(i)).collect();
    format!("/{}", encoded.join(","))
}

/// Collects validation messages the way every request reports them.
#[derive(Default)]
pub(crate) struct Validation {
    errors: Vec<String>,
}

impl Validation {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `message` unless `ok` holds.
    pub(crate) fn check(&mut self, ok: bool, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.errors.push(message.into());
        }
        self
    }

    /// Record `<name> is missing` if `value` is absent or empty.
    pub(crate) fn require(&mut self, value: &Option<String>, name: &str) -> &mut Self {
        let present = value.as_deref().is_some_and(|v| !v.is_empty());
        self.check(present, format!("{} is missing", name))
    }

    /// Fold a nested request's failures in, prefixed with its position.
    pub(crate) fn nested(&mut self, position: usize, result: Result<()>) -> &mut Self {
        if let Err(ActionError::Validation(errors)) = result {
            for error in errors {
                self.errors.push(format!("{} for request {}", error, position));
            }
        }
        self
    }

    pub(crate) fn finish(&mut self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ActionError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode("posts"), "posts");
        assert_eq!(encode("a b/c?d"), "a%20b%2Fc%3Fd");
        assert_eq!(encode("logs-2024.01"), "logs-2024.01");
    }

    #[test]
    fn test_indices_path() {
        assert_eq!(indices_path(&[]), "");
        assert_eq!(
            indices_path(&["a".to_string(), "b".to_string()]),
            "/a,b"
        );
    }

    #[test]
    fn test_endpoint_params() {
        let endpoint = Endpoint::new(Method::Get, "/x")
            .param("routing", "r1")
            .param_opt::<&str>("preference", None)
            .flag("refresh", true)
            .flag("realtime", false);

        assert_eq!(endpoint.param_value("routing"), Some("r1"));
        assert_eq!(endpoint.param_value("preference"), None);
        assert_eq!(endpoint.param_value("refresh"), Some("true"));
        assert_eq!(endpoint.param_value("realtime"), None);
    }

    #[test]
    fn test_validation_collects_messages() {
        let missing: Option<String> = None;
        let empty = Some(String::new());
        let result = Validation::new()
            .require(&missing, "index")
            .require(&empty, "id")
            .check(true, "never")
            .finish();

        assert_eq!(
            result,
            Err(ActionError::Validation(vec![
                "index is missing".to_string(),
                "id is missing".to_string(),
            ]))
        );
    }

    #[test]
    fn test_factories() {
        assert_eq!(Requests::get_request("posts").index.as_deref(), Some("posts"));
        assert_eq!(
            Requests::more_like_this_request("posts").index.as_deref(),
            Some("posts")
        );
        assert!(Requests::search_request().indices.is_empty());
        assert!(Requests::count_request().indices.is_empty());
        assert!(Requests::index_request().index.is_none());
        assert!(Requests::delete_by_query_request().source.is_none());
    }
}
