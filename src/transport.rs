//! HTTP transport
//!
//! The classifier and record builder never talk to the network themselves.
//! They consume a `RawResponse` produced by whatever `Transport` the client
//! was constructed with, which keeps them testable without a live API.

use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by the transport layer itself (before any payload exists)
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or no response was received
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// The raw outcome of a single GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// Response body as text
    pub body: String,
    /// Best-effort JSON decode of the body, `None` if it is not JSON
    pub decoded: Option<Value>,
    /// HTTP status code
    pub status: u16,
}

impl RawResponse {
    /// Wraps a response body, decoding it as JSON where possible.
    pub fn new(body: impl Into<String>, status: u16) -> Self {
        let body = body.into();
        let decoded = serde_json::from_str(&body).ok();
        Self {
            body,
            decoded,
            status,
        }
    }
}

/// Executes exactly one GET request per call.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Sends a GET request to `url` and returns the raw response.
    ///
    /// Non-2xx statuses are not errors at this level; the body still has to
    /// be classified.
    fn execute(&self, url: &Url) -> Result<RawResponse, TransportError>;
}

/// Blocking `reqwest` transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::with_client(reqwest::blocking::Client::new())
    }

    /// Creates a transport from a preconfigured client (timeouts, proxies, ...).
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn execute(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(RawResponse::new(body, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_response_decodes_json() {
        let raw = RawResponse::new(r#"{"Response":"True"}"#, 200);
        assert_eq!(raw.decoded, Some(json!({"Response": "True"})));
        assert_eq!(raw.status, 200);
    }

    #[test]
    fn test_raw_response_keeps_undecodable_body() {
        let raw = RawResponse::new("<html>Bad Gateway</html>", 502);
        assert_eq!(raw.decoded, None);
        assert_eq!(raw.body, "<html>Bad Gateway</html>");
    }
}
