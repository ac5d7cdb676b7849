// request-client/src/lib.rs
//! A small HTTP client façade.
//!
//! [`RequestClient`] joins a base URL with a path template, merges query
//! parameters and headers, sends a JSON body through a pluggable
//! [`HttpClient`] transport, and turns the response into [`ResponseData`] or
//! a [`RequestError`].
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod options;
pub mod resolve;
pub mod response;

pub use client::{RequestClient, ResolvedRequest};
pub use config::ClientConfig;
pub use error::{RequestError, ResponseError, TypeError};
pub use headers::Headers;
pub use http::{HttpClient, HttpError, HttpMethod, HttpResponse};
pub use options::RequestOptions;
pub use response::ResponseData;

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
