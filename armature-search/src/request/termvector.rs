//! Term vector requests.

use super::{encode, ActionRequest, Endpoint, Method, Validation};
use crate::response::{MultiTermVectorsResponse, TermVectorResponse};
use armature_action::Result;
use serde_json::{json, Map, Value};

/// Return the term vectors of a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct TermVectorRequest {
    /// Index of the document.
    pub index: Option<String>,
    /// Type of the document.
    pub doc_type: Option<String>,
    /// Id of the document.
    pub id: Option<String>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Shard copy preference.
    pub preference: Option<String>,
    /// Fields to return vectors for; all fields when empty.
    pub selected_fields: Vec<String>,
    /// Include term offsets.
    pub offsets: bool,
    /// Include term positions.
    pub positions: bool,
    /// Include term payloads.
    pub payloads: bool,
    /// Include total term frequency and document frequency.
    pub term_statistics: bool,
    /// Include document count, sum of document frequencies and sum of total term frequencies.
    pub field_statistics: bool,
    /// Read from the translog rather than the last refresh.
    pub realtime: Option<bool>,
}

impl Default for TermVectorRequest {
    fn default() -> Self {
        Self {
            index: None,
            doc_type: None,
            id: None,
            routing: None,
            preference: None,
            selected_fields: Vec::new(),
            offsets: true,
            positions: true,
            payloads: true,
            term_statistics: false,
            field_statistics: true,
            realtime: None,
        }
    }
}

impl TermVectorRequest {
    /// Create a term vector request for a document.
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

    /// Restrict the fields vectors are returned for.
    pub fn selected_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Include or omit offsets.
    pub fn offsets(&mut self, offsets: bool) -> &mut Self {
        self.offsets = offsets;
        self
    }

    /// Include or omit positions.
    pub fn positions(&mut self, positions: bool) -> &mut Self {
        self.positions = positions;
        self
    }

    /// Include or omit payloads.
    pub fn payloads(&mut self, payloads: bool) -> &mut Self {
        self.payloads = payloads;
        self
    }

    /// Include or omit term statistics.
    pub fn term_statistics(&mut self, term_statistics: bool) -> &mut Self {
        self.term_statistics = term_statistics;
        self
    }

    /// Include or omit field statistics.
    pub fn field_statistics(&mut self, field_statistics: bool) -> &mut Self {
        self.field_statistics = field_statistics;
        self
    }

    /// Enable or disable realtime reads.
    pub fn realtime(&mut self, realtime: bool) -> &mut Self {
        self.realtime = Some(realtime);
        self
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        if !self.selected_fields.is_empty() {
            options.insert("fields".to_string(), json!(self.selected_fields));
        }
        options.insert("offsets".to_string(), json!(self.offsets));
        options.insert("positions".to_string(), json!(self.positions));
        options.insert("payloads".to_string(), json!(self.payloads));
        options.insert("term_statistics".to_string(), json!(self.term_statistics));
        options.insert("field_statistics".to_string(), json!(self.field_statistics));
        if let Some(routing) = &self.routing {
            options.insert("routing".to_string(), json!(routing));
        }
        options
    }

    /// Document entry used when this request is part of a multi term vectors request.
    pub(crate) fn doc_json(&self) -> Value {
        let mut doc = self.options();
        doc.insert("_index".to_string(), json!(self.index));
        doc.insert("_id".to_string(), json!(self.id));
        Value::Object(doc)
    }
}

impl ActionRequest for TermVectorRequest {
    type Response = TermVectorResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.index, "index").require(&self.id, "id");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let path = format!(
            "/{}/_termvectors/{}",
            encode(self.index.as_deref().unwrap_or_default()),
            encode(self.id.as_deref().unwrap_or_default())
        );

        let mut options = self.options();
        options.remove("routing");

        Endpoint::new(Method::Post, path)
            .param_opt("routing", self.routing.as_ref())
            .param_opt("preference", self.preference.as_ref())
            .param_opt("realtime", self.realtime)
            .json(Value::Object(options))
    }
}

/// Return term vectors for several documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiTermVectorsRequest {
    /// Documents in response order.
    pub requests: Vec<TermVectorRequest>,
}

impl MultiTermVectorsRequest {
    /// Add a document.
    pub fn add(&mut self, request: TermVectorRequest) -> &mut Self {
        self.requests.push(request);
        self
    }

    /// Add a document by index, type and id with default options.
    pub fn add_doc(
        &mut self,
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<String>,
    ) -> &mut Self {
        self.add(TermVectorRequest::new(index, doc_type, id))
    }
}

impl ActionRequest for MultiTermVectorsRequest {
    type Response = MultiTermVectorsResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(!self.requests.is_empty(), "no documents requested");
        for (i, request) in self.requests.iter().enumerate() {
            v.nested(i, request.validate());
        }
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let docs: Vec<Value> = self.requests.iter().map(TermVectorRequest::doc_json).collect();
        Endpoint::new(Method::Post, "/_mtermvectors").json(json!({ "docs": docs }))
    }
}
