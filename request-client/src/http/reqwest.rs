// request-client/src/http/reqwest.rs
use super::{HttpClient, HttpError, HttpMethod, HttpResponse};
use crate::headers::Headers;
use async_trait::async_trait;

#[cfg(feature = "reqwest")]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client, e.g. one built with a timeout
    pub fn with_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

#[cfg(feature = "reqwest")]
impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "reqwest")]
fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &Headers,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, HttpError> {
        let mut req = self.inner.request(to_reqwest_method(method), url);

        for (name, value) in headers.iter() {
            req = req.header(name, value);
        }

        if let Some(body) = body {
            req = req.body(body);
        }

        let resp = req.send().await.map_err(|e| HttpError::new(e.to_string()))?;

        let status = resp.status().as_u16();

        let mut resp_headers = Headers::new();
        for (name, value) in resp.headers() {
            resp_headers.append(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).to_string(),
            );
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| HttpError {
                status: Some(status),
                message: e.to_string(),
            })?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers: resp_headers,
            body,
        })
    }
}
