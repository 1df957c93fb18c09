//! Immutable client settings.

use armature_action::{Result, TimeValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// String settings a client was built from.
///
/// Serializes as a flat JSON object of strings, so settings can be stored
/// alongside other configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Empty settings.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building settings.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Get a raw value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a value or a default.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Get a boolean value; anything other than `true`, `on`, `yes` or `1` is false.
    pub fn get_as_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(value) => matches!(value, "true" | "on" | "yes" | "1"),
            None => default,
        }
    }

    /// Get a time value, parsing the stored string.
    pub fn get_as_time(&self, key: &str, default: TimeValue) -> Result<TimeValue> {
        match self.get(key) {
            Some(value) => TimeValue::parse(value),
            None => Ok(default),
        }
    }

    /// Check if a key exists.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of settings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no settings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.values {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Builder for [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    values: BTreeMap<String, String>,
}

impl SettingsBuilder {
    /// Set a value, replacing any previous one.
    pub fn put(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.values.insert(key.into(), value.to_string());
        self
    }

    /// Copy every value from existing settings.
    pub fn put_all(mut self, settings: &Settings) -> Self {
        self.values
            .extend(settings.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Finish building.
    pub fn build(self) -> Settings {
        Settings {
            values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armature_action::ActionError;

    #[test]
    fn test_builder_and_get() {
        let settings = Settings::builder()
            .put("cluster.name", "dev")
            .put("client.sniff", true)
            .build();

        assert_eq!(settings.get("cluster.name"), Some("dev"));
        assert_eq!(settings.get_or("missing", "x"), "x");
        assert!(settings.has("client.sniff"));
        assert_eq!(settings.len(), 2);
        assert_eq!(settings.keys().collect::<Vec<_>>(), vec!["client.sniff", "cluster.name"]);
    }

    #[test]
    fn test_get_as_bool() {
        let settings = Settings::builder().put("a", "true").put("b", "off").build();
        assert!(settings.get_as_bool("a", false));
        assert!(!settings.get_as_bool("b", true));
        assert!(settings.get_as_bool("missing", true));
    }

    #[test]
    fn test_get_as_time() {
        let settings = Settings::builder()
            .put("timeout", "30s")
            .put("broken", "soon")
            .build();

        assert_eq!(
            settings.get_as_time("timeout", TimeValue::timeout_value_millis(1)),
            Ok(TimeValue::timeout_value_seconds(30))
        );
        assert_eq!(
            settings.get_as_time("missing", TimeValue::timeout_value_millis(5)),
            Ok(TimeValue::timeout_value_millis(5))
        );
        assert!(matches!(
            settings.get_as_time("broken", TimeValue::timeout_value_millis(1)),
            Err(ActionError::Parse(_))
        ));
    }

    #[test]
    fn test_put_all_and_display() {
        let base = Settings::builder().put("a", 1).build();
        let merged = Settings::builder().put("b", 2).put_all(&base).build();
        assert_eq!(merged.to_string(), "a=1, b=2");
        assert!(Settings::empty().is_empty());
    }

    #[test]
    fn test_serde_flat_object() {
        let settings: Settings =
            serde_json::from_value(serde_json::json!({ "cluster.urls": "http://localhost:9200" }))
                .unwrap();
        assert_eq!(settings.get("cluster.urls"), Some("http://localhost:9200"));
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            serde_json::json!({ "cluster.urls": "http://localhost:9200" })
        );
    }
}
