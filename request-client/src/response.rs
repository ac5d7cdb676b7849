// request-client/src/response.rs
use crate::error::{RequestError, ResponseError};
use crate::http::HttpResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Successful response payload
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    /// Body of a response whose content type mentions `json`
    Json(Value),
    /// Any other body, unparsed
    Text(String),
}

impl ResponseData {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(text) => Some(text),
            ResponseData::Json(_) => None,
        }
    }

    /// JSON payloads as-is; text payloads become a JSON string
    pub fn into_json(self) -> Value {
        match self {
            ResponseData::Json(value) => value,
            ResponseData::Text(text) => Value::String(text),
        }
    }

    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        serde_json::from_value(self.into_json()).map_err(RequestError::Decode)
    }
}

fn body_text(body: Vec<u8>) -> String {
    String::from_utf8(body)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Turn a raw transport response into data or an error.
pub fn interpret(response: HttpResponse) -> Result<ResponseData, RequestError> {
    if !response.is_success() {
        return Err(ResponseError::from_body(response.status, body_text(response.body)).into());
    }

    let is_json = response
        .content_type()
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));

    if is_json {
        let value = serde_json::from_slice(&response.body).map_err(RequestError::Decode)?;
        return Ok(ResponseData::Json(value));
    }

    Ok(ResponseData::Text(body_text(response.body)))
}
