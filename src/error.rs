//! A2A host error types: transport failures, JSON-RPC errors and dispatch errors.
//!
//! Transport-side variants describe what went wrong talking to one agent.
//! Dispatch-side variants (`AgentNotFound`, `Remote`, `TaskFailed`,
//! `TaskCanceled`) add the agent the failure belongs to.

use crate::types::JsonRpcError;

/// Unified error type for the host.
#[derive(Debug, Clone, thiserror::Error)]
pub enum A2AError {
    // -- Client/transport-side errors --
    /// Transport-level error (connection failed, request failed, etc.).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request or stream timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// HTTP error with status code and response body.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Invalid JSON received from remote (parse or deserialization failure).
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// A JSON-RPC error response was received from the remote agent.
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
        /// Optional structured error data.
        data: Option<serde_json::Value>,
    },

    // -- Dispatch errors --
    /// No connection is registered under this agent name.
    #[error("Agent {0} not found")]
    AgentNotFound(String),

    /// A transport failure while talking to a named agent.
    #[error("Agent {agent} at {address}: {source}")]
    Remote {
        /// Agent name.
        agent: String,
        /// Address the agent was resolved from.
        address: String,
        /// Underlying failure.
        #[source]
        source: Box<A2AError>,
    },

    /// The remote agent reported the task as failed.
    #[error("Agent {agent} task {task_id} failed")]
    TaskFailed {
        /// Agent name.
        agent: String,
        /// Task identifier.
        task_id: String,
    },

    /// The remote agent reported the task as canceled.
    #[error("Agent {agent} task {task_id} was canceled")]
    TaskCanceled {
        /// Agent name.
        agent: String,
        /// Task identifier.
        task_id: String,
    },

    /// Catch-all for errors that don't fit other categories.
    #[error("{0}")]
    Other(String),
}

/// Convenience result type for A2A operations.
pub type A2AResult<T> = Result<T, A2AError>;

impl A2AError {
    /// Wrap a transport failure with the agent it came from.
    ///
    /// Already-wrapped errors and dispatch errors pass through unchanged.
    pub fn remote(agent: impl Into<String>, address: impl Into<String>, err: A2AError) -> Self {
        match err {
            A2AError::Remote { .. }
            | A2AError::AgentNotFound(_)
            | A2AError::TaskFailed { .. }
            | A2AError::TaskCanceled { .. } => err,
            other => A2AError::Remote {
                agent: agent.into(),
                address: address.into(),
                source: Box::new(other),
            },
        }
    }

    /// Whether this error (or the one it wraps) is a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            A2AError::Timeout(_) => true,
            A2AError::Remote { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

impl From<JsonRpcError> for A2AError {
    fn from(err: JsonRpcError) -> Self {
        A2AError::JsonRpc {
            code: err.code,
            message: err.message,
            data: err.data,
        }
    }
}

impl From<serde_json::Error> for A2AError {
    fn from(err: serde_json::Error) -> Self {
        A2AError::InvalidJson(err.to_string())
    }
}
