//! Stored script requests.

use super::{encode, ActionRequest, Endpoint, Method, Validation};
use crate::response::{
    DeleteIndexedScriptResponse, GetIndexedScriptResponse, PutIndexedScriptResponse,
};
use armature_action::Result;
use serde_json::{json, Value};

/// Store a script under an id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PutIndexedScriptRequest {
    /// Script language, e.g. `painless`.
    pub script_lang: Option<String>,
    /// Script id.
    pub id: Option<String>,
    /// Script source.
    pub source: Option<String>,
}

impl PutIndexedScriptRequest {
    /// Set the script language.
    pub fn script_lang(&mut self, script_lang: impl Into<String>) -> &mut Self {
        self.script_lang = Some(script_lang.into());
        self
    }

    /// Set the script id.
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// Set the script source.
    pub fn source(&mut self, source: impl Into<String>) -> &mut Self {
        self.source = Some(source.into());
        self
    }
}

impl ActionRequest for PutIndexedScriptRequest {
    type Response = PutIndexedScriptResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.script_lang, "scriptLang")
            .require(&self.id, "id")
            .require(&self.source, "source");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::Put, script_path(&self.id)).json(json!({
            "script": { "lang": self.script_lang, "source": self.source }
        }))
    }
}

/// Fetch a stored script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetIndexedScriptRequest {
    /// Script language.
    pub script_lang: Option<String>,
    /// Script id.
    pub id: Option<String>,
}

impl GetIndexedScriptRequest {
    /// Set the script language.
    pub fn script_lang(&mut self, script_lang: impl Into<String>) -> &mut Self {
        self.script_lang = Some(script_lang.into());
        self
    }

    /// Set the script id.
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }
}

impl ActionRequest for GetIndexedScriptRequest {
    type Response = GetIndexedScriptResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.script_lang, "scriptLang").require(&self.id, "id");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::Get, script_path(&self.id))
    }
}

/// Remove a stored script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteIndexedScriptRequest {
    /// Script language.
    pub script_lang: Option<String>,
    /// Script id.
    pub id: Option<String>,
}

impl DeleteIndexedScriptRequest {
    /// Set the script language.
    pub fn script_lang(&mut self, script_lang: impl Into<String>) -> &mut Self {
        self.script_lang = Some(script_lang.into());
        self
    }

    /// Set the script id.
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }
}

impl ActionRequest for DeleteIndexedScriptRequest {
    type Response = DeleteIndexedScriptResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.require(&self.script_lang, "scriptLang").require(&self.id, "id");
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::Delete, script_path(&self.id))
    }
}

fn script_path(id: &Option<String>) -> String {
    format!("/_scripts/{}", encode(id.as_deref().unwrap_or_default()))
}

/// Source of a stored script as returned by the cluster.
pub(crate) fn script_source(body: &Value) -> Option<&str> {
    body.get("script")?.get("source")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Body;
    use armature_action::ActionError;

    #[test]
    fn test_put_script() {
        let mut request = PutIndexedScriptRequest::default();
        request.script_lang("painless").id("boost").source("_score * 2");

        assert!(request.validate().is_ok());
        let endpoint = request.endpoint();
        assert_eq!(endpoint.method, Method::Put);
        assert_eq!(endpoint.path, "/_scripts/boost");
        assert_eq!(
            endpoint.body,
            Some(Body::Json(json!({
                "script": { "lang": "painless", "source": "_score * 2" }
            })))
        );
    }

    #[test]
    fn test_script_validation() {
        assert_eq!(
            PutIndexedScriptRequest::default().validate(),
            Err(ActionError::Validation(vec![
                "scriptLang is missing".to_string(),
                "id is missing".to_string(),
                "source is missing".to_string(),
            ]))
        );

        let mut get = GetIndexedScriptRequest::default();
        get.id("boost");
        assert_eq!(
            get.validate(),
            Err(ActionError::Validation(vec!["scriptLang is missing".to_string()]))
        );
    }

    #[test]
    fn test_get_and_delete_paths() {
        let mut get = GetIndexedScriptRequest::default();
        get.script_lang("painless").id("boost");
        assert_eq!(get.endpoint().method, Method::Get);
        assert_eq!(get.endpoint().path, "/_scripts/boost");

        let mut delete = DeleteIndexedScriptRequest::default();
        delete.script_lang("painless").id("boost");
        assert_eq!(delete.endpoint().method, Method::Delete);
    }

    #[test]
    fn test_script_source() {
        let body = json!({ "_id": "boost", "found": true, "script": { "lang": "painless", "source": "x" } });
        assert_eq!(script_source(&body), Some("x"));
        assert_eq!(script_source(&json!({ "found": false })), None);
    }
}
