// # API Transport
//
// The single capability the Porkbun provider needs from the network: POST a
// JSON body to a path and get back the status plus the parsed body.
//
// `ReqwestTransport` is the real implementation. Tests substitute their own.

use async_trait::async_trait;
use ddns_core::{Error, Result};
use serde_json::Value;
use std::time::Duration;

/// Status and body of one API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status (may be empty)
    pub status_text: String,
    /// Parsed JSON body, `None` when the body was not JSON
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The provider's `message` field, if any
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref()?.get("message")?.as_str()
    }

    /// Provider message, falling back to the status text
    pub fn describe(&self) -> String {
        match self.message() {
            Some(message) => message.to_string(),
            None if !self.status_text.is_empty() => self.status_text.clone(),
            None => "no message".to_string(),
        }
    }
}

/// Capability to POST JSON to the provider API
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// POST `body` to `path` (relative to the API host)
    ///
    /// Non-success statuses are returned as a normal [`ApiResponse`]; only
    /// transport failures produce `Err`.
    async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// API host, without a trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        tracing::debug!("POST {} -> {}", url, status);

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: serde_json::from_str(&text).ok(),
        })
    }
}
