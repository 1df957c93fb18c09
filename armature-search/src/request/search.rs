//! Search, scroll, count, suggest, more-like-this and explain requests.

use super::{encode, indices_path, ActionRequest, Endpoint, Method, Validation};
use crate::response::{
    ClearScrollResponse, CountResponse, ExplainResponse, MultiSearchResponse, SearchResponse,
    SuggestResponse,
};
use armature_action::{Result, TimeValue};
use serde_json::{json, Map, Value};

/// Search one or more indices with a query body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// Indices to search; all indices when empty.
    pub indices: Vec<String>,
    /// Document types.
    pub types: Vec<String>,
    /// Search body (`query`, `size`, `sort`, `aggs`, ...).
    pub source: Option<Value>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Shard copy preference.
    pub preference: Option<String>,
    /// Search type, e.g. `dfs_query_then_fetch`.
    pub search_type: Option<String>,
    /// Keep a scroll context open for this long.
    pub scroll: Option<TimeValue>,
    /// Search timeout.
    pub timeout: Option<TimeValue>,
}

impl SearchRequest {
    /// Set the indices to search.
    pub fn indices<I, S>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }

    /// Set the document types.
    pub fn types<I, S>(&mut self, types: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the search body.
    pub fn source(&mut self, source: impl Into<Value>) -> &mut Self {
        self.source = Some(source.into());
        self
    }

    /// Set the routing value.
    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.routing = Some(routing.into());
        self
    }

    /// Set the shard copy preference.
    pub fn preference(&mut self, preference: impl Into<String>) -> &mut Self {
        self.preference = Some(preference.into());
        self
    }

    /// Set the search type.
    pub fn search_type(&mut self, search_type: impl Into<String>) -> &mut Self {
        self.search_type = Some(search_type.into());
        self
    }

    /// Open a scroll context kept alive for `keep_alive`.
    pub fn scroll(&mut self, keep_alive: TimeValue) -> &mut Self {
        self.scroll = Some(keep_alive);
        self
    }

    /// Set the search timeout.
    pub fn timeout(&mut self, timeout: TimeValue) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Header line used when this search is part of a multi-search.
    pub(crate) fn msearch_header(&self) -> Value {
        let mut header = Map::new();
        if !self.indices.is_empty() {
            header.insert("index".to_string(), json!(self.indices));
        }
        if let Some(routing) = &self.routing {
            header.insert("routing".to_string(), json!(routing));
        }
        if let Some(preference) = &self.preference {
            header.insert("preference".to_string(), json!(preference));
        }
        if let Some(search_type) = &self.search_type {
            header.insert("search_type".to_string(), json!(search_type));
        }
        Value::Object(header)
    }

    fn body(&self) -> Value {
        let mut body = self.source.clone().unwrap_or_else(|| json!({}));
        if let (Some(timeout), Value::Object(map)) = (self.timeout, &mut body) {
            map.entry("timeout").or_insert_with(|| json!(timeout.to_string()));
        }
        body
    }
}

impl ActionRequest for SearchRequest {
    type Response = SearchResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(
            self.source.as_ref().is_none_or(Value::is_object),
            "search source must be an object",
        );
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::Post, format!("{}/_search", indices_path(&self.indices)))
            .param_opt("routing", self.routing.as_ref())
            .param_opt("preference", self.preference.as_ref())
            .param_opt("search_type", self.search_type.as_ref())
            .param_opt("scroll", self.scroll)
            .json(self.body())
    }
}

/// Execute several searches in one round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiSearchRequest {
    /// Searches in response order.
    pub requests: Vec<SearchRequest>,
}

impl MultiSearchRequest {
    /// Add a search.
    pub fn add(&mut self, request: SearchRequest) -> &mut Self {
        self.requests.push(request);
        self
    }
}

impl ActionRequest for MultiSearchRequest {
    type Response = MultiSearchResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(!self.requests.is_empty(), "no requests added");
        for (i, request) in self.requests.iter().enumerate() {
            v.nested(i, request.validate());
        }
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let mut lines = Vec::with_capacity(self.requests.len() * 2);
        for request in &self.requests {
            lines.push(request.msearch_header());
            lines.push(request.body());
        }
        Endpoint::new(Method::Post, "/_msearch").ndjson(lines)
    }
}

/// Count documents matching a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountRequest {
    /// Indices to count in; all indices when empty.
    pub indices: Vec<String>,
    /// Document types.
    pub types: Vec<String>,
    /// Query body, e.g. `{"query": {...}}`; counts everything when absent.
    pub source: Option<Value>,
    /// Only count documents scoring at least this much.
    pub min_score: Option<f32>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Shard copy preference.
    pub preference: Option<String>,
}

impl CountRequest {
    /// Set the indices to count in.
    pub fn indices<I, S>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }

    /// Set the document types.
    pub fn types<I, S>(&mut self, types: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the query body.
    pub fn source(&mut self, source: impl Into<Value>) -> &mut Self {
        self.source = Some(source.into());
        self
    }

    /// Set the minimum score.
    pub fn min_score(&mut self, min_score: f32) -> &mut Self {
        self.min_score = Some(min_score);
        self
    }

    /// Set the routing value.
    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.routing = Some(routing.into());
        self
    }

    /// Set the shard copy preference.
    pub fn preference(&mut self, preference: impl Into<String>) -> &mut Self {
        self.preference = Some(preference.into());
        self
    }
}

impl ActionRequest for CountRequest {
    type Response = CountResponse;

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn endpoint(&self) -> Endpoint {
        let endpoint =
            Endpoint::new(Method::Post, format!("{}/_count", indices_path(&self.indices)))
                .param_opt("min_score", self.min_score)
                .param_opt("routing", self.routing.as_ref())
                .param_opt("preference", self.preference.as_ref());

        match &self.source {
            Some(source) => endpoint.json(source.clone()),
            None => endpoint,
        }
    }
}

/// Continue a scrolled search.
///
/// Each [`SearchResponse`] carries the scroll id to use for the next page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchScrollRequest {
    /// Scroll id from the previous page.
    pub scroll_id: Option<String>,
    /// Keep the scroll context alive for this long.
    pub scroll: Option<TimeValue>,
}

impl SearchScrollRequest {
    /// Set the scroll id.
    pub fn scroll_id(&mut self, scroll_id: impl Into<String>) -> &mut Self {
        self.scroll_id = Some(scroll_id.into());
        self
    }

    /// Set the keep-alive.
    pub fn scroll(&mut self, keep_alive: TimeValue) -> &mut Self {
        self.scroll = Some(keep_alive);
        self
    }
}

impl ActionRequest for SearchScrollRequest {
    type Response = SearchResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.scroll_id, "scrollId");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let mut body = Map::new();
        body.insert("scroll_id".to_string(), json!(self.scroll_id));
        if let Some(scroll) = self.scroll {
            body.insert("scroll".to_string(), json!(scroll.to_string()));
        }
        Endpoint::new(Method::Post, "/_search/scroll").json(Value::Object(body))
    }
}

/// Release scroll contexts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClearScrollRequest {
    /// Scroll ids to clear.
    pub scroll_ids: Vec<String>,
}

impl ClearScrollRequest {
    /// Add a scroll id.
    pub fn add_scroll_id(&mut self, scroll_id: impl Into<String>) -> &mut Self {
        self.scroll_ids.push(scroll_id.into());
        self
    }

    /// Replace the scroll ids.
    pub fn scroll_ids<I, S>(&mut self, scroll_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scroll_ids = scroll_ids.into_iter().map(Into::into).collect();
        self
    }
}

impl ActionRequest for ClearScrollRequest {
    type Response = ClearScrollResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(!self.scroll_ids.is_empty(), "no scroll ids specified");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::Delete, "/_search/scroll")
            .json(json!({ "scroll_id": self.scroll_ids }))
    }
}

/// Request term or phrase suggestions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestRequest {
    /// Indices to suggest from; all indices when empty.
    pub indices: Vec<String>,
    /// Suggest body, keyed by suggestion name.
    pub suggest: Option<Value>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Shard copy preference.
    pub preference: Option<String>,
}

impl SuggestRequest {
    /// Set the indices to suggest from.
    pub fn indices<I, S>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }

    /// Set the suggest body.
    pub fn suggest(&mut self, suggest: impl Into<Value>) -> &mut Self {
        self.suggest = Some(suggest.into());
        self
    }

    /// Set the routing value.
    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.routing = Some(routing.into());
        self
    }

    /// Set the shard copy preference.
    pub fn preference(&mut self, preference: impl Into<String>) -> &mut Self {
        self.preference = Some(preference.into());
        self
    }
}

impl ActionRequest for SuggestRequest {
    type Response = SuggestResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(self.suggest.is_some(), "suggest is missing");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::Post, format!("{}/_search", indices_path(&self.indices)))
            .param_opt("routing", self.routing.as_ref())
            .param_opt("preference", self.preference.as_ref())
            .json(json!({ "size": 0, "suggest": self.suggest }))
    }
}

/// Find documents similar to a given document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoreLikeThisRequest {
    /// Index of the reference document.
    pub index: Option<String>,
    /// Type of the reference document.
    pub doc_type: Option<String>,
    /// Id of the reference document.
    pub id: Option<String>,
    /// Routing of the reference document.
    pub routing: Option<String>,
    /// Fields to compare; all text fields when empty.
    pub fields: Vec<String>,
    /// Minimum term frequency in the reference document.
    pub min_term_freq: Option<u32>,
    /// Maximum number of query terms.
    pub max_query_terms: Option<u32>,
    /// Minimum number of documents a term must appear in.
    pub min_doc_freq: Option<u32>,
    /// Fraction of terms that must match, e.g. `"30%"`.
    pub minimum_should_match: Option<String>,
    /// Indices to search for similar documents; the reference index when empty.
    pub search_indices: Vec<String>,
    /// Number of hits to return.
    pub search_size: Option<u32>,
    /// Offset of the first hit.
    pub search_from: Option<u32>,
}

impl MoreLikeThisRequest {
    /// Create a request for a reference document in `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: Some(index.into()),
            ..Self::default()
        }
    }

    /// Set the reference index.
    pub fn index(&mut self, index: impl Into<String>) -> &mut Self {
        self.index = Some(index.into());
        self
    }

    /// Set the reference document type.
    pub fn doc_type(&mut self, doc_type: impl Into<String>) -> &mut Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Set the reference document id.
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// Set the reference document routing.
    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.routing = Some(routing.into());
        self
    }

    /// Set the fields to compare.
    pub fn fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the minimum term frequency.
    pub fn min_term_freq(&mut self, freq: u32) -> &mut Self {
        self.min_term_freq = Some(freq);
        self
    }

    /// Set the maximum number of query terms.
    pub fn max_query_terms(&mut self, terms: u32) -> &mut Self {
        self.max_query_terms = Some(terms);
        self
    }

    /// Set the minimum document frequency.
    pub fn min_doc_freq(&mut self, freq: u32) -> &mut Self {
        self.min_doc_freq = Some(freq);
        self
    }

    /// Set the minimum should match expression.
    pub fn minimum_should_match(&mut self, expr: impl Into<String>) -> &mut Self {
        self.minimum_should_match = Some(expr.into());
        self
    }

    /// Set the indices searched for similar documents.
    pub fn search_indices<I, S>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_indices = indices.into_iter().map(Into::into).collect();
        self
    }

    /// Set the number of hits to return.
    pub fn search_size(&mut self, size: u32) -> &mut Self {
        self.search_size = Some(size);
        self
    }

    /// Set the offset of the first hit.
    pub fn search_from(&mut self, from: u32) -> &mut Self {
        self.search_from = Some(from);
        self
    }

    fn query(&self) -> Value {
        let mut like = Map::new();
        like.insert("_index".to_string(), json!(self.index));
        like.insert("_id".to_string(), json!(self.id));
        if let Some(routing) = &self.routing {
            like.insert("routing".to_string(), json!(routing));
        }

        let mut mlt = Map::new();
        mlt.insert("like".to_string(), json!([Value::Object(like)]));
        if !self.fields.is_empty() {
            mlt.insert("fields".to_string(), json!(self.fields));
        }
        if let Some(freq) = self.min_term_freq {
            mlt.insert("min_term_freq".to_string(), json!(freq));
        }
        if let Some(terms) = self.max_query_terms {
            mlt.insert("max_query_terms".to_string(), json!(terms));
        }
        if let Some(freq) = self.min_doc_freq {
            mlt.insert("min_doc_freq".to_string(), json!(freq));
        }
        if let Some(expr) = &self.minimum_should_match {
            mlt.insert("minimum_should_match".to_string(), json!(expr));
        }
        json!({ "more_like_this": mlt })
    }
}

impl ActionRequest for MoreLikeThisRequest {
    type Response = SearchResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.index, "index").require(&self.id, "id");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let path = if self.search_indices.is_empty() {
            format!("/{}/_search", encode(self.index.as_deref().unwrap_or_default()))
        } else {
            format!("{}/_search", indices_path(&self.search_indices))
        };

        let mut body = Map::new();
        body.insert("query".to_string(), self.query());
        if let Some(size) = self.search_size {
            body.insert("size".to_string(), json!(size));
        }
        if let Some(from) = self.search_from {
            body.insert("from".to_string(), json!(from));
        }

        Endpoint::new(Method::Post, path).json(Value::Object(body))
    }
}

/// Explain how a document scores against a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplainRequest {
    /// Index of the document.
    pub index: Option<String>,
    /// Type of the document.
    pub doc_type: Option<String>,
    /// Id of the document.
    pub id: Option<String>,
    /// Query body, e.g. `{"query": {...}}`.
    pub source: Option<Value>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Shard copy preference.
    pub preference: Option<String>,
}

impl ExplainRequest {
    /// Create an explain request for a document.
    pub fn new(
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            index: Some(index.into()),
            doc_type: Some(doc_type.into()),
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Set the query body.
    pub fn source(&mut self, source: impl Into<Value>) -> &mut Self {
        self.source = Some(source.into());
        self
    }

    /// Set the routing value.
    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.routing = Some(routing.into());
        self
    }

    /// Set the shard copy preference.
    pub fn preference(&mut self, preference: impl Into<String>) -> &mut Self {
        self.preference = Some(preference.into());
        self
    }
}

impl ActionRequest for ExplainRequest {
    type Response = ExplainResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.index, "index")
            .require(&self.id, "id")
            .check(self.source.is_some(), "query is missing");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let path = format!(
            "/{}/_explain/{}",
            encode(self.index.as_deref().unwrap_or_default()),
            encode(self.id.as_deref().unwrap_or_default())
        );

        Endpoint::new(Method::Post, path)
            .param_opt("routing", self.routing.as_ref())
            .param_opt("preference", self.preference.as_ref())
            .json(self.source.clone().unwrap_or_else(|| json!({})))
    }
}
