//! JSON-RPC client for one remote agent.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{A2AError, A2AResult};
use crate::types::{
    AgentCard, JsonRpcId, JsonRpcRequest, JsonRpcResponse, Message, Part, Role,
    SendMessageParams, SendMessageResponse,
};

use super::card_resolver::CardResolver;
use super::endpoint::AgentEndpoint;
use super::subscription::TaskSubscription;
use super::transport::{JsonRpcTransport, Transport};

/// Client for a remote A2A agent.
///
/// Speaks the two methods the host needs:
/// - `message/send`: send a message and get a task or message back
/// - `message/stream`: send a message and stream status/artifact updates
///
/// # Construction
///
/// ```no_run
/// use a2a_host::client::A2AClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // From a base URL (resolves agent card, discovers endpoint):
/// let client = A2AClient::from_url("http://localhost:10003").await?;
///
/// // With custom transport:
/// use a2a_host::client::JsonRpcTransport;
/// let transport = JsonRpcTransport::new("http://localhost:10003/");
/// let client = A2AClient::with_transport(Box::new(transport));
/// # Ok(())
/// # }
/// ```
pub struct A2AClient {
    transport: Box<dyn Transport>,
    agent_card: Option<AgentCard>,
}

impl std::fmt::Debug for A2AClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("A2AClient")
            .field("agent", &self.agent_card.as_ref().map(|c| &c.name))
            .finish_non_exhaustive()
    }
}

impl A2AClient {
    /// Create a client from a base URL.
    ///
    /// This will:
    /// 1. Resolve the agent card from `{url}/.well-known/agent-card.json`
    ///    (falls back to `/.well-known/agent.json` for older agents)
    /// 2. Pick the endpoint URL from the card
    /// 3. Create a `JsonRpcTransport` pointing to that endpoint
    pub async fn from_url(url: &str) -> A2AResult<Self> {
        let resolver = CardResolver::new();
        let card = resolver.resolve(url).await?;
        let endpoint = CardResolver::endpoint_url(&card, url);
        Ok(Self::from_card(card, JsonRpcTransport::new(endpoint)))
    }

    /// Create a client for an already-resolved agent card.
    pub fn from_card(card: AgentCard, transport: JsonRpcTransport) -> Self {
        Self {
            transport: Box::new(transport),
            agent_card: Some(card),
        }
    }

    /// Create a client with a custom transport.
    ///
    /// Use this when you need custom HTTP configuration, authentication,
    /// or a non-HTTP transport implementation.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            agent_card: None,
        }
    }

    /// Create a client from a direct endpoint URL (skips agent card resolution).
    pub fn from_endpoint(url: &str) -> Self {
        Self::with_transport(Box::new(JsonRpcTransport::new(url)))
    }

    /// Send a message to the agent (`message/send`).
    ///
    /// The agent processes the message and returns either a task or a
    /// direct [`Message`].
    pub async fn send_message(&self, params: SendMessageParams) -> A2AResult<SendMessageResponse> {
        let request = build_request("message/send", &params)?;
        let response = self.transport.send(&request).await?;
        parse_result(response)
    }

    /// Send a message with streaming (`message/stream`).
    ///
    /// Returns a subscription that yields [`crate::types::StreamResponse`]
    /// events as the agent processes the message.
    pub async fn send_message_stream(
        &self,
        params: SendMessageParams,
    ) -> A2AResult<TaskSubscription> {
        let request = build_request("message/stream", &params)?;
        self.transport.send_stream(&request).await
    }

    /// Get the cached agent card.
    pub fn get_card(&self) -> A2AResult<&AgentCard> {
        self.agent_card.as_ref().ok_or_else(|| {
            A2AError::Other(
                "no agent card available; use A2AClient::from_url() to auto-resolve".to_string(),
            )
        })
    }

    /// Convenience: send a text message and get back the response.
    pub async fn send_text(&self, text: &str) -> A2AResult<SendMessageResponse> {
        self.send_message(SendMessageParams {
            message: create_text_message(Role::User, text),
            configuration: None,
            metadata: None,
        })
        .await
    }

    /// Close the client and release any held resources.
    pub async fn close(self) -> A2AResult<()> {
        self.transport.close().await
    }
}

#[async_trait]
impl AgentEndpoint for A2AClient {
    async fn send_task(&self, params: SendMessageParams) -> A2AResult<SendMessageResponse> {
        self.send_message(params).await
    }

    async fn send_task_streaming(
        &self,
        params: SendMessageParams,
    ) -> A2AResult<TaskSubscription> {
        self.send_message_stream(params).await
    }
}

/// Build a JSON-RPC request with a random UUID ID.
fn build_request(method: &str, params: &impl Serialize) -> A2AResult<JsonRpcRequest> {
    let params_value = serde_json::to_value(params)
        .map_err(|e| A2AError::Transport(format!("failed to serialize request params: {e}")))?;

    Ok(JsonRpcRequest::new(
        JsonRpcId::String(uuid::Uuid::new_v4().to_string()),
        method,
        Some(params_value),
    ))
}

/// Parse the `result` field from a JSON-RPC response into the expected type.
///
/// If the response contains an error, converts it into an [`A2AError::JsonRpc`].
fn parse_result<T: serde::de::DeserializeOwned>(response: JsonRpcResponse) -> A2AResult<T> {
    if let Some(error) = response.error {
        return Err(error.into());
    }

    let result = response.result.ok_or_else(|| {
        A2AError::InvalidJson("JSON-RPC response has neither 'result' nor 'error'".to_string())
    })?;

    serde_json::from_value(result)
        .map_err(|e| A2AError::InvalidJson(format!("failed to deserialize response result: {e}")))
}

/// Create a [`Message`] containing a single text part.
///
/// # Example
///
/// ```
/// use a2a_host::client::create_text_message;
/// use a2a_host::types::Role;
///
/// let msg = create_text_message(Role::User, "Hello, agent!");
/// assert_eq!(msg.role, Role::User);
/// assert_eq!(msg.parts.len(), 1);
/// ```
pub fn create_text_message(role: Role, content: &str) -> Message {
    Message {
        message_id: uuid::Uuid::new_v4().to_string(),
        role,
        kind: "message".to_string(),
        parts: vec![Part::text(content)],
        context_id: None,
        task_id: None,
        reference_task_ids: None,
        metadata: None,
        extensions: None,
    }
}
