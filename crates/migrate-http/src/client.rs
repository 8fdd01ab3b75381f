//! Thin HTTP client with base URL and default headers.

use crate::{FetchError, Response};
use serde::Serialize;
use std::collections::HashMap;

/// HTTP client for making outbound requests.
///
/// Wraps a [`reqwest::Client`] with a base URL that relative paths are
/// resolved against and headers sent with every request.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Set a base URL that will be prepended to relative request paths.
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

    /// Add a bearer token authorization header to all requests.
    pub fn with_bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.with_default_header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Resolve a path against the base URL. Absolute URLs pass through.
    pub fn resolve_url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url.to_string(),
        }
    }

    /// Send a GET request.
    pub async fn get(&self, url: &str) -> Result<Response, FetchError> {
        let request = self.client.get(self.resolve_url(url));
        self.send(request).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, FetchError> {
        let payload = serde_json::to_vec(body)?;
        let request = self
            .client
            .post(self.resolve_url(url))
            .header("Content-Type", "application/json")
            .body(payload);
        self.send(request).await
    }

    async fn send(&self, mut request: reqwest::RequestBuilder) -> Result<Response, FetchError> {
        for (key, value) in &self.default_headers {
            request = request.header(key.as_str(), value.as_str());
        }
        request = request.header("Accept", "application/json");

        let response = request.send().await?;
        Response::from_reqwest(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_url() {
        let client = FetchClient::new().with_base_url("https://shop.example.com/");
        assert_eq!(
            client.resolve_url("/admin/api/2024-01/products.json"),
            "https://shop.example.com/admin/api/2024-01/products.json"
        );
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let client = FetchClient::new().with_base_url("https://shop.example.com");
        assert_eq!(
            client.resolve_url("https://cdn.example.com/next?page_info=x"),
            "https://cdn.example.com/next?page_info=x"
        );
    }

    #[test]
    fn test_no_base_url() {
        let client = FetchClient::new();
        assert_eq!(client.resolve_url("/products"), "/products");
    }

    #[test]
    fn test_bearer_header() {
        let client = FetchClient::new().with_bearer_auth("secret");
        assert_eq!(
            client.default_headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
    }
}
