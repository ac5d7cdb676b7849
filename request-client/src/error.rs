// request-client/src/error.rs
use crate::http::HttpError;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Malformed call, caught before anything touches the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("URL must be string")]
    UrlNotString,
    #[error("Options must be an object!")]
    OptionsNotObject,
}

/// A non-2xx response, normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status}{}: {message}", code_suffix(.code))]
pub struct ResponseError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    /// Raw response body as received
    pub body: String,
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_ref()
        .map(|code| format!(" ({})", code))
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct ErrorPayload {
    code: Option<Value>,
    message: Option<Value>,
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

impl ResponseError {
    /// Build from a failed response body. A JSON object keeps its `code`
    /// and `message` (non-strings are stringified); the raw text stands in
    /// for a missing message and for bodies that are not JSON objects.
    pub fn from_body(status: u16, body: String) -> Self {
        let payload = serde_json::from_str::<Value>(&body)
            .ok()
            .filter(Value::is_object)
            .and_then(|value| serde_json::from_value::<ErrorPayload>(value).ok());

        let (code, message) = match payload {
            Some(payload) => (payload.code.map(stringify), payload.message.map(stringify)),
            None => (None, None),
        };

        Self {
            status,
            code,
            message: message.unwrap_or_else(|| body.clone()),
            body,
        }
    }

    /// The error body parsed as JSON, if it is JSON at all
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("invalid request options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RequestError {
    /// HTTP status attached to the failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Response(err) => Some(err.status),
            RequestError::Transport(err) => err.status,
            _ => None,
        }
    }
}
