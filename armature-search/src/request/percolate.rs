//! Percolation: find the stored queries that match a document.

use super::{indices_path, ActionRequest, Endpoint, Method, Validation};
use crate::response::{MultiPercolateResponse, PercolateResponse};
use armature_action::Result;
use serde_json::{json, Map, Value};

/// Field that holds registered queries unless overridden.
pub const DEFAULT_PERCOLATOR_FIELD: &str = "query";

/// Match a document against the queries registered in an index.
#[derive(Debug, Clone, PartialEq)]
pub struct PercolateRequest {
    /// Indices holding the registered queries.
    pub indices: Vec<String>,
    /// Type of the percolated document.
    pub document_type: Option<String>,
    /// Percolator field holding the queries.
    pub field: String,
    /// The document to percolate.
    pub document: Option<Value>,
    /// Percolate an already indexed document instead, by index and id.
    pub existing: Option<(String, String)>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Shard copy preference.
    pub preference: Option<String>,
    /// Only count matches instead of returning them.
    pub only_count: bool,
}

impl Default for PercolateRequest {
    fn default() -> Self {
        Self {
            indices: Vec::new(),
            document_type: None,
            field: DEFAULT_PERCOLATOR_FIELD.to_string(),
            document: None,
            existing: None,
            routing: None,
            preference: None,
            only_count: false,
        }
    }
}

impl PercolateRequest {
    /// Set the indices holding the registered queries.
    pub fn indices<I, S>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }

    /// Set the document type.
    pub fn document_type(&mut self, document_type: impl Into<String>) -> &mut Self {
        self.document_type = Some(document_type.into());
        self
    }

    /// Set the percolator field.
    pub fn field(&mut self, field: impl Into<String>) -> &mut Self {
        self.field = field.into();
        self
    }

    /// Set the document to percolate.
    pub fn document(&mut self, document: impl Into<Value>) -> &mut Self {
        self.document = Some(document.into());
        self
    }

    /// Percolate an indexed document.
    pub fn existing(&mut self, index: impl Into<String>, id: impl Into<String>) -> &mut Self {
        self.existing = Some((index.into(), id.into()));
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

    /// Only count matches.
    pub fn only_count(&mut self, only_count: bool) -> &mut Self {
        self.only_count = only_count;
        self
    }

    pub(crate) fn body(&self) -> Value {
        let mut percolate = Map::new();
        percolate.insert("field".to_string(), json!(self.field));
        match (&self.document, &self.existing) {
            (Some(document), _) => {
                percolate.insert("document".to_string(), document.clone());
            }
            (None, Some((index, id))) => {
                percolate.insert("index".to_string(), json!(index));
                percolate.insert("id".to_string(), json!(id));
            }
            (None, None) => {}
        }

        let mut body = json!({ "query": { "percolate": percolate } });
        if self.only_count {
            body["size"] = json!(0);
        }
        body
    }

    pub(crate) fn msearch_header(&self) -> Value {
        let mut header = Map::new();
        header.insert("index".to_string(), json!(self.indices));
        if let Some(routing) = &self.routing {
            header.insert("routing".to_string(), json!(routing));
        }
        if let Some(preference) = &self.preference {
            header.insert("preference".to_string(), json!(preference));
        }
        Value::Object(header)
    }
}

impl ActionRequest for PercolateRequest {
    type Response = PercolateResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(!self.indices.is_empty(), "index is missing")
            .check(!self.field.is_empty(), "field is missing")
            .check(
                self.document.is_some() || self.existing.is_some(),
                "source or get is missing",
            );
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::Post, format!("{}/_search", indices_path(&self.indices)))
            .param_opt("routing", self.routing.as_ref())
            .param_opt("preference", self.preference.as_ref())
            .json(self.body())
    }
}

/// Percolate several documents in one round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiPercolateRequest {
    /// Percolations in response order.
    pub requests: Vec<PercolateRequest>,
}

impl MultiPercolateRequest {
    /// Add a percolation.
    pub fn add(&mut self, request: PercolateRequest) -> &mut Self {
        self.requests.push(request);
        self
    }
}

impl ActionRequest for MultiPercolateRequest {
    type Response = MultiPercolateResponse;

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Body;
    use armature_action::ActionError;

    #[test]
    fn test_percolate_document() {
        let mut request = PercolateRequest::default();
        request
            .indices(["alerts"])
            .document_type("doc")
            .document(json!({ "message": "disk full" }));

        assert!(request.validate().is_ok());
        let endpoint = request.endpoint();
        assert_eq!(endpoint.path, "/alerts/_search");
        assert_eq!(
            endpoint.body,
            Some(Body::Json(json!({
                "query": {
                    "percolate": { "field": "query", "document": { "message": "disk full" } }
                }
            })))
        );
    }

    #[test]
    fn test_percolate_existing_only_count() {
        let mut request = PercolateRequest::default();
        request.indices(["alerts"]).existing("logs", "7").only_count(true);

        match request.endpoint().body {
            Some(Body::Json(body)) => {
                assert_eq!(body["size"], 0);
                assert_eq!(body["query"]["percolate"]["index"], "logs");
                assert_eq!(body["query"]["percolate"]["id"], "7");
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_percolate_validation() {
        assert_eq!(
            PercolateRequest::default().validate(),
            Err(ActionError::Validation(vec![
                "index is missing".to_string(),
                "source or get is missing".to_string(),
            ]))
        );
    }

    #[test]
    fn test_multi_percolate_lines() {
        let mut single = PercolateRequest::default();
        single.indices(["alerts"]).document(json!({ "m": 1 }));

        let mut request = MultiPercolateRequest::default();
        request.add(single.clone()).add(single);

        match request.endpoint().body {
            Some(Body::NdJson(lines)) => {
                assert_eq!(lines.len(), 4);
                assert_eq!(lines[0], json!({ "index": ["alerts"] }));
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }
}
