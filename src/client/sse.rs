//! Server-Sent Events (SSE) parsing for A2A streaming responses.
//!
//! Parses SSE `data:` lines from HTTP responses and deserializes them into
//! [`StreamResponse`] events (status updates, artifact updates, task snapshots,
//! and direct messages).

use tokio::sync::mpsc;

use super::subscription::{TaskSubscription, SUBSCRIPTION_BUFFER};
use crate::error::{A2AError, A2AResult};
use crate::types::StreamResponse;

/// Start reading `response` as an SSE body.
///
/// Spawns a background task that parses `data:` lines and forwards them to
/// the returned subscription. A read or parse failure is delivered as the
/// last item.
pub(crate) fn subscribe(response: reqwest::Response) -> TaskSubscription {
    let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);

    let reader = tokio::spawn(async move {
        if let Err(e) = parse_sse_stream(response, &tx).await {
            tracing::debug!(error = %e, "SSE stream ended with error");
            // Receiver may have been dropped.
            let _ = tx.send(Err(e)).await;
        }
    });

    TaskSubscription::with_reader(rx, reader)
}

/// Parse an SSE response body line-by-line, sending parsed events to `tx`.
async fn parse_sse_stream(
    response: reqwest::Response,
    tx: &mpsc::Sender<A2AResult<StreamResponse>>,
) -> A2AResult<()> {
    use futures::StreamExt;

    let mut stream = response.bytes_stream();
    // Raw bytes: a chunk may end inside a multibyte character.
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result
            .map_err(|e| A2AError::Transport(format!("error reading SSE stream: {e}")))?;
        buffer.extend_from_slice(&chunk);

        while let Some(newline_pos) = buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = buffer.drain(..=newline_pos).collect();
            let line = decode_line(&line)?;

            if let Some(event) = parse_sse_line(line.trim_end_matches(['\r', '\n']))? {
                if tx.send(Ok(event)).await.is_err() {
                    // Receiver dropped: stop parsing.
                    return Ok(());
                }
            }
        }
    }

    // Process any remaining data in the buffer (no trailing newline).
    let rest = decode_line(&buffer)?;
    if !rest.trim().is_empty() {
        if let Some(event) = parse_sse_line(rest.trim())? {
            let _ = tx.send(Ok(event)).await;
        }
    }

    Ok(())
}

fn decode_line(bytes: &[u8]) -> A2AResult<&str> {
    std::str::from_utf8(bytes)
        .map_err(|e| A2AError::Transport(format!("invalid UTF-8 in SSE stream: {e}")))
}

/// Parse a single SSE line. Returns `Some(event)` for `data:` lines with
/// valid JSON, `None` for comments, empty lines, and keep-alive signals.
///
/// Handles two formats:
/// 1. **Raw events**: the data is a `StreamResponse` directly (status update,
///    artifact update, task, or message).
/// 2. **JSON-RPC wrapped**: the data is a full JSON-RPC response with
///    `jsonrpc`, `id`, and `result` fields.
///    In this case, the `result` field is extracted and parsed as a
///    `StreamResponse`.
fn parse_sse_line(line: &str) -> A2AResult<Option<StreamResponse>> {
    // Empty line = event boundary (we process data lines individually).
    if line.is_empty() {
        return Ok(None);
    }

    // SSE comments (lines starting with ':') are keep-alive signals.
    if line.starts_with(':') {
        return Ok(None);
    }

    // We only care about `data:` lines.
    if let Some(data) = line.strip_prefix("data:") {
        let data = data.trim();

        // Empty data field: skip.
        if data.is_empty() {
            return Ok(None);
        }

        // "[DONE]" is a common sentinel for stream completion.
        if data == "[DONE]" {
            return Ok(None);
        }

        // Parse the JSON.
        let value: serde_json::Value = serde_json::from_str(data).map_err(|e| {
            A2AError::InvalidJson(format!(
                "failed to parse SSE event data: {e} (data: {data})"
            ))
        })?;

        // Detect JSON-RPC wrapper: has "jsonrpc" field.
        let event_value = if value.get("jsonrpc").is_some() {
            // JSON-RPC wrapped response: check for error.
            if let Some(error) = value.get("error") {
                let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(-1);
                let message = error
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown error")
                    .to_string();
                let data = error.get("data").cloned();
                return Err(A2AError::JsonRpc {
                    code,
                    message,
                    data,
                });
            }
            // Extract the `result` field.
            value.get("result").cloned().ok_or_else(|| {
                A2AError::InvalidJson(format!(
                    "JSON-RPC SSE response has neither 'result' nor 'error': {data}"
                ))
            })?
        } else {
            // Raw event: parse directly.
            value
        };

        let event: StreamResponse = serde_json::from_value(event_value).map_err(|e| {
            A2AError::InvalidJson(format!(
                "failed to parse SSE event as StreamResponse: {e} (data: {data})"
            ))
        })?;

        return Ok(Some(event));
    }

    // Other SSE fields (event:, id:, retry:) carry nothing we need.
    Ok(None)
}
