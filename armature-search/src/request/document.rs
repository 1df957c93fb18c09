//! Single-document and bulk document requests.

use super::{encode, indices_path, ActionRequest, Endpoint, Method, Validation};
use crate::response::{
    BulkResponse, DeleteByQueryResponse, DeleteResponse, GetResponse, IndexResponse,
    MultiGetResponse, UpdateResponse,
};
use armature_action::{Result, TimeValue};
use serde_json::{json, Map, Value};

/// Whether an index request may overwrite an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpType {
    /// Create or replace the document.
    #[default]
    Index,
    /// Fail if the document already exists.
    Create,
}

/// Index a JSON document.
///
/// The document type is kept for callers that organise documents by type;
/// typeless clusters do not receive it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexRequest {
    /// Target index.
    pub index: Option<String>,
    /// Document type.
    pub doc_type: Option<String>,
    /// Document id; generated by the cluster when absent.
    pub id: Option<String>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Document source.
    pub source: Option<Value>,
    /// Index or create.
    pub op_type: OpType,
    /// Refresh the shard after the operation.
    pub refresh: bool,
    /// Primary shard wait timeout.
    pub timeout: Option<TimeValue>,
}

impl IndexRequest {
    /// Set the target index.
    pub fn index(&mut self, index: impl Into<String>) -> &mut Self {
        self.index = Some(index.into());
        self
    }

    /// Set the document type.
    pub fn doc_type(&mut self, doc_type: impl Into<String>) -> &mut Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Set the document id.
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// Set the routing value.
    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.routing = Some(routing.into());
        self
    }

    /// Set the document source.
    pub fn source(&mut self, source: impl Into<Value>) -> &mut Self {
        self.source = Some(source.into());
        self
    }

    /// Set the operation type.
    pub fn op_type(&mut self, op_type: OpType) -> &mut Self {
        self.op_type = op_type;
        self
    }

    /// Shorthand for `op_type(OpType::Create)` when `create` is set.
    pub fn create(&mut self, create: bool) -> &mut Self {
        self.op_type = if create { OpType::Create } else { OpType::Index };
        self
    }

    /// Refresh after indexing.
    pub fn refresh(&mut self, refresh: bool) -> &mut Self {
        self.refresh = refresh;
        self
    }

    /// Set the primary shard wait timeout.
    pub fn timeout(&mut self, timeout: TimeValue) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    fn bulk_action(&self) -> &'static str {
        match self.op_type {
            OpType::Index => "index",
            OpType::Create => "create",
        }
    }
}

impl ActionRequest for IndexRequest {
    type Response = IndexResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.index, "index")
            .check(self.source.is_some(), "source is missing")
            .check(
                self.op_type == OpType::Index || self.id.is_some(),
                "an id must be provided for create operations",
            );
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let index = encode(self.index.as_deref().unwrap_or_default());
        let endpoint = match (&self.id, self.op_type) {
            (Some(id), OpType::Create) => {
                Endpoint::new(Method::Put, format!("/{}/_create/{}", index, encode(id)))
            }
            (Some(id), OpType::Index) => {
                Endpoint::new(Method::Put, format!("/{}/_doc/{}", index, encode(id)))
            }
            (None, _) => Endpoint::new(Method::Post, format!("/{}/_doc", index)),
        };

        endpoint
            .param_opt("routing", self.routing.as_ref())
            .param_opt("timeout", self.timeout)
            .flag("refresh", self.refresh)
            .json(self.source.clone().unwrap_or_else(|| json!({})))
    }
}

/// Update a document with a partial document or a script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequest {
    /// Target index.
    pub index: Option<String>,
    /// Document type.
    pub doc_type: Option<String>,
    /// Document id.
    pub id: Option<String>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Script source.
    pub script: Option<String>,
    /// Script language.
    pub script_lang: Option<String>,
    /// Script parameters.
    pub script_params: Map<String, Value>,
    /// Partial document merged into the existing one.
    pub doc: Option<Value>,
    /// Document indexed when the target does not exist.
    pub upsert: Option<Value>,
    /// Use `doc` as the upsert document.
    pub doc_as_upsert: bool,
    /// Retries on version conflicts.
    pub retry_on_conflict: u32,
    /// Refresh the shard after the operation.
    pub refresh: bool,
    /// Primary shard wait timeout.
    pub timeout: Option<TimeValue>,
}

impl UpdateRequest {
    /// Set the target index.
    pub fn index(&mut self, index: impl Into<String>) -> &mut Self {
        self.index = Some(index.into());
        self
    }

    /// Set the document type.
    pub fn doc_type(&mut self, doc_type: impl Into<String>) -> &mut Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Set the document id.
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// Set the routing value.
    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.routing = Some(routing.into());
        self
    }

    /// Set the update script.
    pub fn script(&mut self, script: impl Into<String>) -> &mut Self {
        self.script = Some(script.into());
        self
    }

    /// Set the script language.
    pub fn script_lang(&mut self, lang: impl Into<String>) -> &mut Self {
        self.script_lang = Some(lang.into());
        self
    }

    /// Add a script parameter.
    pub fn add_script_param(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.script_params.insert(name.into(), value.into());
        self
    }

    /// Set the partial document.
    pub fn doc(&mut self, doc: impl Into<Value>) -> &mut Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the upsert document.
    pub fn upsert(&mut self, upsert: impl Into<Value>) -> &mut Self {
        self.upsert = Some(upsert.into());
        self
    }

    /// Use the partial document as the upsert document.
    pub fn doc_as_upsert(&mut self, doc_as_upsert: bool) -> &mut Self {
        self.doc_as_upsert = doc_as_upsert;
        self
    }

    /// Set the number of retries on version conflicts.
    pub fn retry_on_conflict(&mut self, retries: u32) -> &mut Self {
        self.retry_on_conflict = retries;
        self
    }

    /// Refresh after updating.
    pub fn refresh(&mut self, refresh: bool) -> &mut Self {
        self.refresh = refresh;
        self
    }

    /// Set the primary shard wait timeout.
    pub fn timeout(&mut self, timeout: TimeValue) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Update body shared by the single and bulk forms.
    pub(crate) fn body(&self) -> Value {
        let mut body = Map::new();
        if let Some(script) = &self.script {
            let mut s = Map::new();
            s.insert("source".to_string(), json!(script));
            if let Some(lang) = &self.script_lang {
                s.insert("lang".to_string(), json!(lang));
            }
            if !self.script_params.is_empty() {
                s.insert("params".to_string(), Value::Object(self.script_params.clone()));
            }
            body.insert("script".to_string(), Value::Object(s));
        }
        if let Some(doc) = &self.doc {
            body.insert("doc".to_string(), doc.clone());
        }
        if let Some(upsert) = &self.upsert {
            body.insert("upsert".to_string(), upsert.clone());
        }
        if self.doc_as_upsert {
            body.insert("doc_as_upsert".to_string(), json!(true));
        }
        Value::Object(body)
    }
}

impl ActionRequest for UpdateRequest {
    type Response = UpdateResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.index, "index")
            .require(&self.id, "id")
            .check(
                self.script.is_some() || self.doc.is_some(),
                "script or doc is missing",
            )
            .check(
                self.script.is_none() || self.doc.is_none(),
                "can't provide both script and doc",
            );
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let path = format!(
            "/{}/_update/{}",
            encode(self.index.as_deref().unwrap_or_default()),
            encode(self.id.as_deref().unwrap_or_default())
        );

        let retries = (self.retry_on_conflict > 0).then_some(self.retry_on_conflict);
        Endpoint::new(Method::Post, path)
            .param_opt("routing", self.routing.as_ref())
            .param_opt("retry_on_conflict", retries)
            .param_opt("timeout", self.timeout)
            .flag("refresh", self.refresh)
            .json(self.body())
    }
}

/// Delete a document by index and id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteRequest {
    /// Target index.
    pub index: Option<String>,
    /// Document type.
    pub doc_type: Option<String>,
    /// Document id.
    pub id: Option<String>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Refresh the shard after the operation.
    pub refresh: bool,
    /// Primary shard wait timeout.
    pub timeout: Option<TimeValue>,
}

impl DeleteRequest {
    /// Set the target index.
    pub fn index(&mut self, index: impl Into<String>) -> &mut Self {
        self.index = Some(index.into());
        self
    }

    /// Set the document type.
    pub fn doc_type(&mut self, doc_type: impl Into<String>) -> &mut Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Set the document id.
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// Set the routing value.
    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.routing = Some(routing.into());
        self
    }

    /// Refresh after deleting.
    pub fn refresh(&mut self, refresh: bool) -> &mut Self {
        self.refresh = refresh;
        self
    }

    /// Set the primary shard wait timeout.
    pub fn timeout(&mut self, timeout: TimeValue) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ActionRequest for DeleteRequest {
    type Response = DeleteResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.index, "index").require(&self.id, "id");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let path = format!(
            "/{}/_doc/{}",
            encode(self.index.as_deref().unwrap_or_default()),
            encode(self.id.as_deref().unwrap_or_default())
        );

        Endpoint::new(Method::Delete, path)
            .param_opt("routing", self.routing.as_ref())
            .param_opt("timeout", self.timeout)
            .flag("refresh", self.refresh)
    }
}

/// One operation inside a [`BulkRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum BulkItem {
    /// Index a document.
    Index(IndexRequest),
    /// Update a document.
    Update(UpdateRequest),
    /// Delete a document.
    Delete(DeleteRequest),
}

/// Execute many index, update and delete operations in one round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkRequest {
    /// Operations in execution order.
    pub requests: Vec<BulkItem>,
    /// Refresh the affected shards afterwards.
    pub refresh: bool,
    /// Primary shard wait timeout.
    pub timeout: Option<TimeValue>,
}

impl BulkRequest {
    /// Add an index operation.
    pub fn add(&mut self, request: IndexRequest) -> &mut Self {
        self.requests.push(BulkItem::Index(request));
        self
    }

    /// Add an update operation.
    pub fn add_update(&mut self, request: UpdateRequest) -> &mut Self {
        self.requests.push(BulkItem::Update(request));
        self
    }

    /// Add a delete operation.
    pub fn add_delete(&mut self, request: DeleteRequest) -> &mut Self {
        self.requests.push(BulkItem::Delete(request));
        self
    }

    /// Number of queued operations.
    pub fn number_of_actions(&self) -> usize {
        self.requests.len()
    }

    /// Refresh after the bulk completes.
    pub fn refresh(&mut self, refresh: bool) -> &mut Self {
        self.refresh = refresh;
        self
    }

    /// Set the primary shard wait timeout.
    pub fn timeout(&mut self, timeout: TimeValue) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }
}

fn bulk_meta(index: &Option<String>, id: &Option<String>, routing: &Option<String>) -> Value {
    let mut meta = Map::new();
    if let Some(index) = index {
        meta.insert("_index".to_string(), json!(index));
    }
    if let Some(id) = id {
        meta.insert("_id".to_string(), json!(id));
    }
    if let Some(routing) = routing {
        meta.insert("routing".to_string(), json!(routing));
    }
    Value::Object(meta)
}

impl ActionRequest for BulkRequest {
    type Response = BulkResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(!self.requests.is_empty(), "no requests added");
        for (i, item) in self.requests.iter().enumerate() {
            let result = match item {
                BulkItem::Index(r) => r.validate(),
                BulkItem::Update(r) => r.validate(),
                BulkItem::Delete(r) => r.validate(),
            };
            v.nested(i, result);
        }
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let mut lines = Vec::with_capacity(self.requests.len() * 2);
        for item in &self.requests {
            match item {
                BulkItem::Index(r) => {
                    lines.push(json!({ r.bulk_action(): bulk_meta(&r.index, &r.id, &r.routing) }));
                    lines.push(r.source.clone().unwrap_or_else(|| json!({})));
                }
                BulkItem::Update(r) => {
                    let mut meta = bulk_meta(&r.index, &r.id, &r.routing);
                    if r.retry_on_conflict > 0 {
                        meta["retry_on_conflict"] = json!(r.retry_on_conflict);
                    }
                    lines.push(json!({ "update": meta }));
                    lines.push(r.body());
                }
                BulkItem::Delete(r) => {
                    lines.push(json!({ "delete": bulk_meta(&r.index, &r.id, &r.routing) }));
                }
            }
        }

        Endpoint::new(Method::Post, "/_bulk")
            .param_opt("timeout", self.timeout)
            .flag("refresh", self.refresh)
            .ndjson(lines)
    }
}

/// Delete every document matching a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteByQueryRequest {
    /// Indices to delete from; all indices when empty.
    pub indices: Vec<String>,
    /// Document types.
    pub types: Vec<String>,
    /// Query body, e.g. `{"query": {...}}`.
    pub source: Option<Value>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Operation timeout.
    pub timeout: Option<TimeValue>,
}

impl DeleteByQueryRequest {
    /// Set the indices to delete from.
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

    /// Set the routing value.
    pub fn routing(&mut self, routing: impl Into<String>) -> &mut Self {
        self.routing = Some(routing.into());
        self
    }

    /// Set the operation timeout.
    pub fn timeout(&mut self, timeout: TimeValue) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ActionRequest for DeleteByQueryRequest {
    type Response = DeleteByQueryResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(self.source.is_some(), "source is missing");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let indices = if self.indices.is_empty() {
            "/_all".to_string()
        } else {
            indices_path(&self.indices)
        };

        Endpoint::new(Method::Post, format!("{}/_delete_by_query", indices))
            .param_opt("routing", self.routing.as_ref())
            .param_opt("timeout", self.timeout)
            .json(self.source.clone().unwrap_or_else(|| json!({})))
    }
}

/// Fetch a document by index and id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetRequest {
    /// Source index.
    pub index: Option<String>,
    /// Document type.
    pub doc_type: Option<String>,
    /// Document id.
    pub id: Option<String>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Shard copy preference.
    pub preference: Option<String>,
    /// Stored fields to return.
    pub fields: Vec<String>,
    /// Read from the translog rather than the last refresh.
    pub realtime: Option<bool>,
    /// Refresh the shard before reading.
    pub refresh: bool,
}

impl GetRequest {
    /// Create a get request for a document in `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: Some(index.into()),
            ..Self::default()
        }
    }

    /// Set the source index.
    pub fn index(&mut self, index: impl Into<String>) -> &mut Self {
        self.index = Some(index.into());
        self
    }

    /// Set the document type.
    pub fn doc_type(&mut self, doc_type: impl Into<String>) -> &mut Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Set the document id.
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
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

    /// Set the stored fields to return.
    pub fn fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable realtime reads.
    pub fn realtime(&mut self, realtime: bool) -> &mut Self {
        self.realtime = Some(realtime);
        self
    }

    /// Refresh before reading.
    pub fn refresh(&mut self, refresh: bool) -> &mut Self {
        self.refresh = refresh;
        self
    }
}

impl ActionRequest for GetRequest {
    type Response = GetResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.index, "index").require(&self.id, "id");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let path = format!(
            "/{}/_doc/{}",
            encode(self.index.as_deref().unwrap_or_default()),
            encode(self.id.as_deref().unwrap_or_default())
        );
        let fields = (!self.fields.is_empty()).then(|| self.fields.join(","));

        Endpoint::new(Method::Get, path)
            .param_opt("routing", self.routing.as_ref())
            .param_opt("preference", self.preference.as_ref())
            .param_opt("stored_fields", fields)
            .param_opt("realtime", self.realtime)
            .flag("refresh", self.refresh)
    }
}

/// One document addressed by a [`MultiGetRequest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiGetItem {
    /// Source index.
    pub index: Option<String>,
    /// Document type.
    pub doc_type: Option<String>,
    /// Document id.
    pub id: Option<String>,
    /// Shard routing value.
    pub routing: Option<String>,
    /// Stored fields to return.
    pub fields: Vec<String>,
}

impl MultiGetItem {
    fn to_json(&self) -> Value {
        let mut doc = bulk_meta(&self.index, &self.id, &self.routing);
        if !self.fields.is_empty() {
            doc["stored_fields"] = json!(self.fields);
        }
        doc
    }
}

/// Fetch several documents in one round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiGetRequest {
    /// Documents to fetch.
    pub items: Vec<MultiGetItem>,
    /// Shard copy preference.
    pub preference: Option<String>,
    /// Read from the translog rather than the last refresh.
    pub realtime: Option<bool>,
    /// Refresh the shards before reading.
    pub refresh: bool,
}

impl MultiGetRequest {
    /// Add a document by index, type and id.
    pub fn add(
        &mut self,
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<String>,
    ) -> &mut Self {
        self.items.push(MultiGetItem {
            index: Some(index.into()),
            doc_type: Some(doc_type.into()),
            id: Some(id.into()),
            ..MultiGetItem::default()
        });
        self
    }

    /// Add a fully specified item.
    pub fn add_item(&mut self, item: MultiGetItem) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Set the shard copy preference.
    pub fn preference(&mut self, preference: impl Into<String>) -> &mut Self {
        self.preference = Some(preference.into());
        self
    }

    /// Enable or disable realtime reads.
    pub fn realtime(&mut self, realtime: bool) -> &mut Self {
        self.realtime = Some(realtime);
        self
    }

    /// Refresh before reading.
    pub fn refresh(&mut self, refresh: bool) -> &mut Self {
        self.refresh = refresh;
        self
    }
}

impl ActionRequest for MultiGetRequest {
    type Response = MultiGetResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(!self.items.is_empty(), "no documents to get");
        for (i, item) in self.items.iter().enumerate() {
            v.require(&item.index, &format!("index for doc {}", i))
                .require(&item.id, &format!("id for doc {}", i));
        }
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        let docs: Vec<Value> = self.items.iter().map(MultiGetItem::to_json).collect();

        Endpoint::new(Method::Post, "/_mget")
            .param_opt("preference", self.preference.as_ref())
            .param_opt("realtime", self.realtime)
            .flag("refresh", self.refresh)
            .json(json!({ "docs": docs }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Body;
    use armature_action::ActionError;

    #[test]
    fn test_index_request_setters_and_endpoint() {
        let mut request = IndexRequest::default();
        request
            .index("posts")
            .doc_type("article")
            .id("1")
            .source(json!({ "title": "hi" }))
            .refresh(true);

        assert!(request.validate().is_ok());
        let endpoint = request.endpoint();
        assert_eq!(endpoint.method, Method::Put);
        assert_eq!(endpoint.path, "/posts/_doc/1");
        assert_eq!(endpoint.param_value("refresh"), Some("true"));
        assert_eq!(endpoint.body, Some(Body::Json(json!({ "title": "hi" }))));
    }

    #[test]
    fn test_index_request_without_id_posts() {
        let mut request = IndexRequest::default();
        request.index("posts").source(json!({}));
        let endpoint = request.endpoint();
        assert_eq!(endpoint.method, Method::Post);
        assert_eq!(endpoint.path, "/posts/_doc");
    }

    #[test]
    fn test_index_request_create() {
        let mut request = IndexRequest::default();
        request.index("posts").id("1").create(true).source(json!({}));
        assert_eq!(request.endpoint().path, "/posts/_create/1");
    }

    #[test]
    fn test_index_request_validation() {
        let request = IndexRequest::default();
        assert_eq!(
            request.validate(),
            Err(ActionError::Validation(vec![
                "index is missing".to_string(),
                "source is missing".to_string(),
            ]))
        );
    }

    #[test]
    fn test_update_request_body() {
        let mut request = UpdateRequest::default();
        request
            .index("posts")
            .id("1")
            .script("ctx._source.views += params.n")
            .script_lang("painless")
            .add_script_param("n", 1)
            .retry_on_conflict(3);

        assert!(request.validate().is_ok());
        let endpoint = request.endpoint();
        assert_eq!(endpoint.path, "/posts/_update/1");
        assert_eq!(endpoint.param_value("retry_on_conflict"), Some("3"));
        assert_eq!(
            endpoint.body,
            Some(Body::Json(json!({
                "script": {
                    "source": "ctx._source.views += params.n",
                    "lang": "painless",
                    "params": { "n": 1 }
                }
            })))
        );
    }

    #[test]
    fn test_update_request_rejects_script_and_doc() {
        let mut request = UpdateRequest::default();
        request.index("posts").id("1").script("x").doc(json!({}));
        assert_eq!(
            request.validate(),
            Err(ActionError::Validation(vec![
                "can't provide both script and doc".to_string()
            ]))
        );
    }

    #[test]
    fn test_delete_request_endpoint() {
        let mut request = DeleteRequest::default();
        request.index("posts").id("a b").routing("r");
        let endpoint = request.endpoint();
        assert_eq!(endpoint.method, Method::Delete);
        assert_eq!(endpoint.path, "/posts/_doc/a%20b");
        assert_eq!(endpoint.param_value("routing"), Some("r"));
    }

    #[test]
    fn test_bulk_request_lines() {
        let mut index = IndexRequest::default();
        index.index("posts").id("1").source(json!({ "t": 1 }));
        let mut delete = DeleteRequest::default();
        delete.index("posts").id("2");

        let mut bulk = BulkRequest::default();
        bulk.add(index).add_delete(delete);

        assert_eq!(bulk.number_of_actions(), 2);
        assert!(bulk.validate().is_ok());
        assert_eq!(
            bulk.endpoint().body,
            Some(Body::NdJson(vec![
                json!({ "index": { "_index": "posts", "_id": "1" } }),
                json!({ "t": 1 }),
                json!({ "delete": { "_index": "posts", "_id": "2" } }),
            ]))
        );
    }

    #[test]
    fn test_bulk_request_validation() {
        assert_eq!(
            BulkRequest::default().validate(),
            Err(ActionError::Validation(vec!["no requests added".to_string()]))
        );

        let mut bulk = BulkRequest::default();
        bulk.add_delete(DeleteRequest::default());
        assert_eq!(
            bulk.validate(),
            Err(ActionError::Validation(vec![
                "index is missing for request 0".to_string(),
                "id is missing for request 0".to_string(),
            ]))
        );
    }

    #[test]
    fn test_delete_by_query_defaults_to_all_indices() {
        let mut request = DeleteByQueryRequest::default();
        request.source(json!({ "query": { "match_all": {} } }));
        assert_eq!(request.endpoint().path, "/_all/_delete_by_query");

        request.indices(["a", "b"]);
        assert_eq!(request.endpoint().path, "/a,b/_delete_by_query");
    }

    #[test]
    fn test_get_request_endpoint() {
        let mut request = GetRequest::new("posts");
        request.doc_type("article").id("7").fields(["title", "body"]).realtime(false);

        assert!(request.validate().is_ok());
        let endpoint = request.endpoint();
        assert_eq!(endpoint.method, Method::Get);
        assert_eq!(endpoint.path, "/posts/_doc/7");
        assert_eq!(endpoint.param_value("stored_fields"), Some("title,body"));
        assert_eq!(endpoint.param_value("realtime"), Some("false"));
    }

    #[test]
    fn test_multi_get_request() {
        let mut request = MultiGetRequest::default();
        request.add("posts", "article", "1").add("posts", "article", "2");

        assert!(request.validate().is_ok());
        assert_eq!(
            request.endpoint().body,
            Some(Body::Json(json!({
                "docs": [
                    { "_index": "posts", "_id": "1" },
                    { "_index": "posts", "_id": "2" }
                ]
            })))
        );

        assert!(MultiGetRequest::default().validate().is_err());
    }
}
