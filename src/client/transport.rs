//! Transport layer for talking to a remote agent.
//!
//! Provides the `Transport` trait for abstracting over different communication
//! protocols, and `JsonRpcTransport` for the standard JSON-RPC over HTTP binding.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{A2AError, A2AResult};
use crate::types::{JsonRpcRequest, JsonRpcResponse};

use super::sse;
use super::subscription::TaskSubscription;

/// Transport abstraction for A2A communication.
///
/// Implementations handle the low-level details of sending JSON-RPC requests
/// and receiving responses (or SSE streams) over a particular protocol binding.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON-RPC request and receive a JSON-RPC response.
    async fn send(&self, request: &JsonRpcRequest) -> A2AResult<JsonRpcResponse>;

    /// Send a JSON-RPC request and subscribe to the resulting event stream.
    ///
    /// Used for `message/stream`.
    async fn send_stream(&self, request: &JsonRpcRequest) -> A2AResult<TaskSubscription>;

    /// Close the transport and release any held resources.
    ///
    /// The default implementation is a no-op.
    async fn close(&self) -> A2AResult<()> {
        Ok(())
    }
}

/// Configuration for [`JsonRpcTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Total time allowed for one non-streaming request. Defaults to 60 seconds.
    ///
    /// Streams are not bounded by this; they use an idle timeout instead.
    pub request_timeout: Duration,
    /// Time allowed to establish a connection. Defaults to 10 seconds.
    pub connect_timeout: Duration,
    /// Additional HTTP headers to include on every request.
    pub headers: HashMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            headers: HashMap::new(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` honoring the connect timeout and headers.
    ///
    /// Headers that are not valid HTTP are skipped with a warning.
    pub fn build_client(&self) -> reqwest::Client {
        let mut default_headers = HeaderMap::new();
        for (key, value) in &self.headers {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(val)) => {
                    default_headers.insert(name, val);
                }
                _ => tracing::warn!(header = %key, "skipping invalid HTTP header"),
            }
        }

        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .default_headers(default_headers)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                reqwest::Client::new()
            })
    }
}

/// JSON-RPC over HTTP transport using `reqwest`.
///
/// Sends POST requests with `Content-Type: application/json` and parses
/// the response as a JSON-RPC result or error. For streaming methods the
/// response body is read as an SSE event stream.
///
/// # Example
///
/// ```no_run
/// use a2a_host::client::JsonRpcTransport;
///
/// let transport = JsonRpcTransport::new("http://localhost:10003/");
/// ```
#[derive(Debug, Clone)]
pub struct JsonRpcTransport {
    client: reqwest::Client,
    url: String,
    request_timeout: Option<Duration>,
}

impl JsonRpcTransport {
    /// Create a new transport targeting the given A2A endpoint URL.
    ///
    /// Uses default configuration (60s request timeout, no extra headers).
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_config(url, TransportConfig::default())
    }

    /// Create a new transport with custom configuration.
    pub fn with_config(url: impl Into<String>, config: TransportConfig) -> Self {
        Self {
            client: config.build_client(),
            url: url.into(),
            request_timeout: Some(config.request_timeout),
        }
    }

    /// Create a new transport with an existing `reqwest::Client`.
    ///
    /// Useful for sharing one connection pool across every agent.
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.into(),
            request_timeout: None,
        }
    }

    /// Bound each non-streaming request by `timeout` (builder-style).
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Returns the URL this transport sends requests to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn map_send_error(what: &str, e: reqwest::Error) -> A2AError {
    if e.is_timeout() {
        A2AError::Timeout(format!("{what} timed out: {e}"))
    } else if e.is_connect() {
        A2AError::Transport(format!("{what} connection failed: {e}"))
    } else {
        A2AError::Transport(format!("{what} failed: {e}"))
    }
}

async fn check_status(response: reqwest::Response) -> A2AResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(A2AError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl Transport for JsonRpcTransport {
    async fn send(&self, request: &JsonRpcRequest) -> A2AResult<JsonRpcResponse> {
        let body = serde_json::to_vec(request).map_err(|e| {
            A2AError::Transport(format!("failed to serialize JSON-RPC request: {e}"))
        })?;

        let mut builder = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .body(body);
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(url = %self.url, method = %request.method, "sending JSON-RPC request");
        let response = builder
            .send()
            .await
            .map_err(|e| map_send_error("HTTP request", e))?;
        let response = check_status(response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| A2AError::Transport(format!("failed to read response body: {e}")))?;

        let rpc_response: JsonRpcResponse = serde_json::from_slice(&bytes).map_err(|e| {
            A2AError::InvalidJson(format!("failed to parse JSON-RPC response: {e}"))
        })?;

        Ok(rpc_response)
    }

    async fn send_stream(&self, request: &JsonRpcRequest) -> A2AResult<TaskSubscription> {
        let body = serde_json::to_vec(request).map_err(|e| {
            A2AError::Transport(format!("failed to serialize JSON-RPC request: {e}"))
        })?;

        tracing::debug!(url = %self.url, method = %request.method, "opening SSE stream");
        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .body(body)
            .send()
            .await
            .map_err(|e| map_send_error("stream request", e))?;
        let response = check_status(response).await?;

        Ok(sse::subscribe(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.headers.is_empty());
    }

    #[test]
    fn invalid_headers_do_not_prevent_client_construction() {
        let mut config = TransportConfig::default();
        config
            .headers
            .insert("bad header\n".to_string(), "x".to_string());
        config
            .headers
            .insert("Authorization".to_string(), "Bearer t".to_string());
        let transport = JsonRpcTransport::with_config("http://localhost:1/", config);
        assert_eq!(transport.url(), "http://localhost:1/");
    }
}
