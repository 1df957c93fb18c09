//! Client configuration.

use crate::error::{ClientError, Result};
use crate::settings::Settings;
use armature_action::TimeValue;
use std::time::Duration;

/// Setting holding the comma separated cluster URLs.
pub const CLUSTER_URLS: &str = "cluster.urls";
/// Setting holding the per-request timeout.
pub const REQUEST_TIMEOUT: &str = "client.request_timeout";
/// Setting holding the basic auth user name.
pub const USERNAME: &str = "client.username";
/// Setting toggling compressed responses.
pub const COMPRESSION: &str = "client.compression";

/// Connection settings for the OpenSearch-backed client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Cluster URL(s). Requests go to the first one.
    pub urls: Vec<String>,
    /// Basic auth username.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Request timeout.
    pub request_timeout: Duration,
    /// Accept gzip-compressed responses.
    pub compression: bool,
    /// Extra settings exposed through [`Client::client_settings`](crate::Client::client_settings).
    pub extra: Settings,
}

impl ClientConfig {
    /// Create a new configuration with a single URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            password: None,
            request_timeout: Duration::from_secs(30),
            compression: true,
            extra: Settings::empty(),
        }
    }

    /// Create configuration with multiple URLs for a cluster.
    pub fn cluster(urls: Vec<String>) -> Self {
        Self {
            urls,
            ..Self::new("")
        }
    }

    /// Set basic authentication credentials.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Enable or disable compression.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compression = enabled;
        self
    }

    /// Add an extra setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra = Settings::builder()
            .put_all(&self.extra)
            .put(key, value)
            .build();
        self
    }

    /// Settings view of this configuration. The password is never included.
    pub fn to_settings(&self) -> Settings {
        let mut builder = Settings::builder()
            .put_all(&self.extra)
            .put(CLUSTER_URLS, self.urls.join(","))
            .put(REQUEST_TIMEOUT, TimeValue::from(self.request_timeout))
            .put(COMPRESSION, self.compression);
        if let Some(username) = &self.username {
            builder = builder.put(USERNAME, username);
        }
        builder.build()
    }

    /// Rebuild a configuration from settings, e.g. ones loaded from a file.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let urls: Vec<String> = settings
            .get(CLUSTER_URLS)
            .ok_or_else(|| ClientError::Validation(format!("{} is missing", CLUSTER_URLS)))?
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();

        let timeout = settings
            .get_as_time(REQUEST_TIMEOUT, TimeValue::timeout_value_seconds(30))
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let extra = settings
            .keys()
            .filter(|key| ![CLUSTER_URLS, REQUEST_TIMEOUT, USERNAME, COMPRESSION].contains(key))
            .fold(Settings::builder(), |builder, key| {
                builder.put(key, settings.get_or(key, ""))
            })
            .build();

        Ok(Self {
            urls,
            username: settings.get(USERNAME).map(str::to_string),
            password: None,
            request_timeout: timeout.to_duration(),
            compression: settings.get_as_bool(COMPRESSION, true),
            extra,
        })
    }

    /// Check the configuration can produce a client.
    pub fn validate(&self) -> Result<()> {
        match self.urls.first() {
            Some(url) if !url.is_empty() => Ok(()),
            _ => Err(ClientError::Validation("No URLs provided".to_string())),
        }
    }
}
