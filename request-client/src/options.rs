// request-client/src/options.rs
use crate::error::{RequestError, TypeError};
use crate::http::HttpMethod;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-call options. Nothing here outlives the call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// Defaults to GET
    #[serde(deserialize_with = "method_from_str")]
    pub method: Option<HttpMethod>,
    #[serde(deserialize_with = "string_map")]
    pub query: BTreeMap<String, String>,
    /// Values for `{name}` placeholders in the path
    #[serde(deserialize_with = "string_map")]
    pub params: BTreeMap<String, String>,
    #[serde(deserialize_with = "string_map")]
    pub headers: BTreeMap<String, String>,
    /// Sent as JSON on every method, GET included
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options from an untyped value. Anything but a JSON object is
    /// rejected; unrecognized keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self, RequestError> {
        if !value.is_object() {
            return Err(TypeError::OptionsNotObject.into());
        }
        serde_json::from_value(value.clone())
            .map_err(|e| RequestError::InvalidOptions(e.to_string()))
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key.into(), value.to_string());
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Like [`body`](Self::body) for any serializable value
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, RequestError> {
        let value = serde_json::to_value(body).map_err(RequestError::Serialize)?;
        Ok(self.body(value))
    }
}

fn method_from_str<'de, D>(deserializer: D) -> Result<Option<HttpMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| s.parse().map_err(D::Error::custom))
        .transpose()
}

// Scalars are string-coerced; nested values are rejected.
fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key, s)),
            Value::Number(n) => Ok((key, n.to_string())),
            Value::Bool(b) => Ok((key, b.to_string())),
            other => Err(D::Error::custom(format!(
                "value for `{}` must be a string, got {}",
                key, other
            ))),
        })
        .collect()
}
