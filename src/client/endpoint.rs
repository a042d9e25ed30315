//! The seam between the host and whatever actually reaches a remote agent.

use async_trait::async_trait;

use crate::error::A2AResult;
use crate::types::{SendMessageParams, SendMessageResponse};

use super::subscription::TaskSubscription;

/// Something that accepts task-send requests on behalf of one remote agent.
///
/// [`A2AClient`](super::A2AClient) implements this over JSON-RPC/HTTP. Tests
/// and in-process agents can implement it directly.
#[async_trait]
pub trait AgentEndpoint: Send + Sync {
    /// Send a task and wait for the single reply (`message/send`).
    async fn send_task(&self, params: SendMessageParams) -> A2AResult<SendMessageResponse>;

    /// Send a task and subscribe to its event stream (`message/stream`).
    async fn send_task_streaming(&self, params: SendMessageParams)
        -> A2AResult<TaskSubscription>;
}
