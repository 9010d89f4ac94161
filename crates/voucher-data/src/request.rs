//! HTTP request builder.

use std::collections::HashMap;

use http::Method;
use reqwest::Url;
use serde::Serialize;

use crate::FetchError;

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter. Values are form-encoded when the URL is built.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Resolve the final URL including the encoded query string.
    pub fn url(&self) -> Result<Url, FetchError> {
        let parsed = if self.query.is_empty() {
            Url::parse(&self.url)
        } else {
            Url::parse_with_params(&self.url, &self.query)
        };
        parsed.map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_form_encoded() {
        let req = RequestBuilder::new(Method::GET, "http://localhost:5001/api/codes/search")
            .query("brand", "Amazon Prime & More");
        assert_eq!(
            req.url().unwrap().as_str(),
            "http://localhost:5001/api/codes/search?brand=Amazon+Prime+%26+More"
        );
    }

    #[test]
    fn test_url_without_query_has_no_separator() {
        let req = RequestBuilder::new(Method::GET, "http://localhost:5001/api/health");
        assert_eq!(req.url().unwrap().as_str(), "http://localhost:5001/api/health");
    }

    #[test]
    fn test_invalid_url() {
        let req = RequestBuilder::new(Method::GET, "/api/health");
        assert!(matches!(req.url(), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::POST, "http://localhost/api/codes/copy")
            .json(&serde_json::json!({ "code_id": 3 }))
            .unwrap();
        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.body(), Some(br#"{"code_id":3}"#.as_slice()));
    }
}
