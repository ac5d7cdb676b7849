// request-client/src/config.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Construction-time settings of a [`RequestClient`](crate::RequestClient).
///
/// Unknown keys are ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Prefix for every request path, concatenated as-is
    #[serde(default, rename = "baseURL", alias = "base_url")]
    pub base_url: String,
    /// Headers sent with every request unless overridden per call
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "");
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://a.b").header("Content-Type", "application/json");
        assert_eq!(config.base_url, "http://a.b");
        assert_eq!(
            config.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_keys() {
        let config: ClientConfig = serde_json::from_value(json!({
            "baseURL": "http://a.b",
            "headers": {"Content-Type": "application/json"},
            "timeout": 30
        }))
        .unwrap();
        assert_eq!(config, ClientConfig::new("http://a.b").header("Content-Type", "application/json"));

        let empty: ClientConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, ClientConfig::default());
    }

    #[test]
    fn test_from_toml() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "http://localhost:9000"

            [headers]
            Accept = "application/json"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(
            config.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_from_toml_rejects_wrong_types() {
        assert!(ClientConfig::from_toml_str("base_url = 5").is_err());
    }
}
