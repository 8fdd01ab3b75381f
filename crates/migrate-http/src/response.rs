//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A fully-buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Buffer a `reqwest` response.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self, FetchError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();
        Ok(Self::new(status, headers, body))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        // Case-insensitive header lookup
        let key_lower = key.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == key_lower)
            .map(|(_, v)| v.as_str())
    }

    /// The `rel="next"` target of the `Link` header, if any.
    pub fn next_page_url(&self) -> Option<String> {
        self.header("Link").and_then(next_link)
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(FetchError::HttpError {
                status: self.status,
                message,
            })
        }
    }
}

/// Extract the `rel="next"` URL from an RFC 8288 `Link` header value.
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim().replace(' ', "");
            param.eq_ignore_ascii_case("rel=\"next\"") || param.eq_ignore_ascii_case("rel=next")
        });

        if is_next && target.starts_with('<') && target.ends_with('>') {
            Some(target[1..target.len() - 1].to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    fn make_response_with_headers(
        status: u16,
        headers: Vec<(&str, &str)>,
        body: &[u8],
    ) -> Response {
        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Response::new(status, headers, body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(201, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(300, b"").is_success());
    }

    #[test]
    fn test_response_json() {
        let resp = make_response(200, br#"{"products": []}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["products"], serde_json::json!([]));
    }

    #[test]
    fn test_response_json_invalid() {
        let resp = make_response(200, b"not json");
        let result: Result<serde_json::Value, _> = resp.json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let resp = make_response_with_headers(200, vec![("Content-Type", "text/html")], b"");
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_response_error_for_status() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());

        let err = make_response(401, b"Invalid API key").error_for_status().unwrap_err();
        assert!(matches!(err, FetchError::HttpError { status: 401, .. }));
        assert_eq!(err.to_string(), "HTTP 401: Invalid API key");
    }

    #[test]
    fn test_next_link_only() {
        let header = r#"<https://shop.example.com/admin/api/2024-01/products.json?limit=250&page_info=abc>; rel="next""#;
        assert_eq!(
            next_link(header).as_deref(),
            Some("https://shop.example.com/admin/api/2024-01/products.json?limit=250&page_info=abc")
        );
    }

    #[test]
    fn test_next_link_with_previous() {
        let header = r#"<https://s/p.json?page_info=prev>; rel="previous", <https://s/p.json?page_info=next>; rel="next""#;
        assert_eq!(next_link(header).as_deref(), Some("https://s/p.json?page_info=next"));
    }

    #[test]
    fn test_next_link_absent_on_last_page() {
        let header = r#"<https://s/p.json?page_info=prev>; rel="previous""#;
        assert_eq!(next_link(header), None);

        let resp = make_response_with_headers(200, vec![("link", header)], b"");
        assert_eq!(resp.next_page_url(), None);
    }
}
