//! HTTP client for the VoucherFinder backend.
//!
//! Two layers:
//!
//! - [`FetchClient`]: a small builder API over `reqwest` with a base URL,
//!   default headers and JSON helpers. Works natively and in the browser.
//! - [`VoucherApi`]: the six backend calls as a trait, with [`ApiClient`] as
//!   the HTTP implementation. Every call is a single round trip; nothing here
//!   retries, caches or de-duplicates.
//!
//! # Example
//!
//! ```rust,ignore
//! use voucher_data::{ApiClient, ApiConfig, VoucherApi};
//!
//! let api = ApiClient::new(&ApiConfig::from_env());
//! let found = api.search_codes("NordVPN").await?;
//! println!("{} codes (stale: {})", found.codes.len(), found.stale);
//! ```

mod api;
mod config;
mod error;
mod request;
mod response;

use std::collections::HashMap;

use http::Method;
use serde::Serialize;

pub use api::{ApiClient, VoucherApi};
pub use config::{ApiConfig, ConfigError, BASE_URL_ENV, CONFIG_PATH_ENV, DEFAULT_BASE_URL};
pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;

/// HTTP client for making outbound requests.
///
/// Relative URLs are joined onto the base URL; absolute ones are sent as is.
#[derive(Debug, Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    http: reqwest::Client,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::GET, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::POST, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// The request as it would be sent.
    pub fn into_request(self) -> RequestBuilder {
        self.builder
    }

    /// Send the request and read the whole response.
    ///
    /// Non-2xx statuses are returned as a normal [`Response`]; call
    /// [`Response::error_for_status`] to treat them as errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.url()?;
        tracing::debug!(method = %self.builder.method, url = %url, "sending request");

        let mut request = self.client.http.request(self.builder.method.clone(), url);
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = self.builder.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, bytes = body.len(), "received response");
        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiConfig, FetchClient, FetchError, Response, VoucherApi};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url_joins_base() {
        let client = FetchClient::new().with_base_url("http://localhost:5001/");
        let req = client.get("/api/health").into_request();
        assert_eq!(req.url().unwrap().as_str(), "http://localhost:5001/api/health");
    }

    #[test]
    fn test_absolute_url_ignores_base() {
        let client = FetchClient::new().with_base_url("http://localhost:5001");
        let req = client.get("https://other.test/ping").into_request();
        assert_eq!(req.url().unwrap().as_str(), "https://other.test/ping");
    }

    #[test]
    fn test_default_headers_applied() {
        let client = FetchClient::new().with_default_header("Accept", "application/json");
        let req = client.post("http://localhost/x").header("X-Extra", "1").into_request();
        assert_eq!(req.header_value("accept"), Some("application/json"));
        assert_eq!(req.header_value("x-extra"), Some("1"));
        assert_eq!(req.method(), &Method::POST);
    }
}
