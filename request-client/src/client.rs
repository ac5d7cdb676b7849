// request-client/src/client.rs
use crate::config::ClientConfig;
use crate::error::{RequestError, TypeError};
use crate::headers::Headers;
use crate::http::{HttpClient, HttpMethod};
use crate::options::RequestOptions;
use crate::resolve::resolve_url;
use crate::response::{interpret, ResponseData};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

#[cfg(feature = "reqwest")]
use crate::http::ReqwestClient;

/// Everything needed to put one request on the wire
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

pub struct RequestClient<C: HttpClient> {
    http: C,
    config: ClientConfig,
}

impl<C: HttpClient> RequestClient<C> {
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.config.headers
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the outgoing request without sending it
    pub fn resolve(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ResolvedRequest, RequestError> {
        let url = resolve_url(
            &self.config.base_url,
            path,
            &options.params,
            &options.query,
        );

        let mut headers = Headers::from(&self.config.headers);
        headers.merge(&Headers::from(&options.headers));

        let body = match &options.body {
            Some(body) => {
                let bytes = serde_json::to_vec(body).map_err(RequestError::Serialize)?;
                if !headers.contains("content-type") {
                    headers.insert("content-type", "application/json");
                }
                Some(bytes)
            }
            None => None,
        };

        Ok(ResolvedRequest {
            method: options.method.unwrap_or_default(),
            url,
            headers,
            body,
        })
    }

    /// Send a request and normalize the response
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseData, RequestError> {
        let resolved = self.resolve(path, &options)?;

        tracing::debug!(method = %resolved.method, url = %resolved.url, "dispatching request");

        let response = self
            .http
            .send(
                resolved.method,
                &resolved.url,
                &resolved.headers,
                resolved.body,
            )
            .await?;

        tracing::debug!(
            status = response.status,
            content_type = response.content_type().unwrap_or(""),
            "received response"
        );

        interpret(response)
    }

    /// Like [`request`](Self::request), deserializing the payload into `T`
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, RequestError> {
        self.request(path, options).await?.deserialize()
    }

    /// Entry point for untyped callers: `path` must be a JSON string and
    /// `options` a JSON object.
    pub async fn request_value(
        &self,
        path: &Value,
        options: &Value,
    ) -> Result<ResponseData, RequestError> {
        let path = path.as_str().ok_or(TypeError::UrlNotString)?;
        let options = RequestOptions::from_value(options)?;
        self.request(path, options).await
    }

    pub async fn get(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseData, RequestError> {
        self.request(path, options.method(HttpMethod::Get)).await
    }

    pub async fn post(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseData, RequestError> {
        self.request(path, options.method(HttpMethod::Post)).await
    }

    pub async fn put(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseData, RequestError> {
        self.request(path, options.method(HttpMethod::Put)).await
    }

    pub async fn patch(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseData, RequestError> {
        self.request(path, options.method(HttpMethod::Patch)).await
    }

    pub async fn del(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseData, RequestError> {
        self.request(path, options.method(HttpMethod::Delete)).await
    }

    /// Same as [`del`](Self::del)
    pub async fn delete(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseData, RequestError> {
        self.del(path, options).await
    }
}

#[cfg(feature = "reqwest")]
impl RequestClient<ReqwestClient> {
    pub fn with_config(config: ClientConfig) -> Self {
        Self::new(ReqwestClient::new(), config)
    }
}

#[cfg(feature = "reqwest")]
impl Default for RequestClient<ReqwestClient> {
    fn default() -> Self {
        Self::with_config(ClientConfig::default())
    }
}
