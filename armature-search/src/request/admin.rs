//! Requests served by the admin client.

use super::{indices_path, ActionRequest, Endpoint, Method, Validation};
use crate::response::{ClusterHealthResponse, RefreshResponse};
use armature_action::{Result, TimeValue};

/// Make recent operations on the given indices visible to search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshRequest {
    /// Indices to refresh; all indices when empty.
    pub indices: Vec<String>,
}

impl RefreshRequest {
    /// Set the indices to refresh.
    pub fn indices<I, S>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }
}

impl ActionRequest for RefreshRequest {
    type Response = RefreshResponse;

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(Method::Post, format!("{}/_refresh", indices_path(&self.indices)))
    }
}

/// Cluster or index health, optionally waiting for a status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterHealthRequest {
    /// Indices to report on; the whole cluster when empty.
    pub indices: Vec<String>,
    /// Block until the status is at least this (`green`, `yellow` or `red`).
    pub wait_for_status: Option<String>,
    /// How long the cluster may wait before answering.
    pub timeout: Option<TimeValue>,
}

impl ClusterHealthRequest {
    /// Set the indices to report on.
    pub fn indices<I, S>(&mut self, indices: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }

    /// Wait for a status.
    pub fn wait_for_status(&mut self, status: impl Into<String>) -> &mut Self {
        self.wait_for_status = Some(status.into());
        self
    }

    /// Set the wait timeout.
    pub fn timeout(&mut self, timeout: TimeValue) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }
}

impl ActionRequest for ClusterHealthRequest {
    type Response = ClusterHealthResponse;

    fn validate(&self) -> Result<()> {
        let mut v = Validation::new();
        v.check(
            self.wait_for_status
                .as_deref()
                .is_none_or(|s| matches!(s, "green" | "yellow" | "red")),
            "waitForStatus must be green, yellow or red",
        );
        v.finish()
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(
            Method::Get,
            format!("/_cluster/health{}", indices_path(&self.indices)),
        )
        .param_opt("wait_for_status", self.wait_for_status.as_ref())
        .param_opt("timeout", self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_paths() {
        assert_eq!(RefreshRequest::default().endpoint().path, "/_refresh");

        let mut request = RefreshRequest::default();
        request.indices(["a", "b"]);
        assert_eq!(request.endpoint().path, "/a,b/_refresh");
        assert_eq!(request.endpoint().method, Method::Post);
    }

    #[test]
    fn test_cluster_health_endpoint() {
        let mut request = ClusterHealthRequest::default();
        request
            .indices(["posts"])
            .wait_for_status("yellow")
            .timeout(TimeValue::timeout_value_seconds(30));

        assert!(request.validate().is_ok());
        let endpoint = request.endpoint();
        assert_eq!(endpoint.path, "/_cluster/health/posts");
        assert_eq!(endpoint.param_value("wait_for_status"), Some("yellow"));
        assert_eq!(endpoint.param_value("timeout"), Some("30s"));
    }

    #[test]
    fn test_cluster_health_rejects_unknown_status() {
        let mut request = ClusterHealthRequest::default();
        request.wait_for_status("purple");
        assert!(request.validate().is_err());
    }
}
