//! Routing tasks from a planner to named remote agents.
//!
//! [`HostCoordinator`] is the host's single entry point: it looks the target
//! agent up in the registry, builds the task request from the conversation's
//! [`SessionState`], submits it and writes the correlation ids back so the
//! next turn continues the same remote session.

use serde_json::{json, Map, Value};

use crate::connection::TaskCallback;
use crate::error::{A2AError, A2AResult};
use crate::metadata::MESSAGE_ID_KEY;
use crate::registry::{AgentRegistry, AgentSummary};
use crate::response::TaskResponse;
use crate::session::{
    SessionState, ACTIVE_AGENT_KEY, CONTEXT_ID_KEY, LAST_MESSAGE_ID_KEY, TASK_ID_KEY,
};
use crate::types::{AgentCard, Task, TaskRequest, TaskState};
use crate::utils::{get_message_text, new_user_text_message};

/// Metadata key carrying the conversation (context) id.
pub const CONVERSATION_ID_KEY: &str = "conversation_id";

/// Output types the host can render.
pub const ACCEPTED_OUTPUT_MODES: [&str; 3] = ["text", "text/plain", "image/png"];

/// Dispatches tasks to the agents in a registry.
pub struct HostCoordinator {
    registry: AgentRegistry,
    callback: Option<TaskCallback>,
}

impl std::fmt::Debug for HostCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCoordinator")
            .field("registry", &self.registry)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl HostCoordinator {
    /// Create a coordinator over `registry`, reporting every update to
    /// `callback` when one is given.
    pub fn new(registry: AgentRegistry, callback: Option<TaskCallback>) -> Self {
        Self { registry, callback }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Name and description of every reachable agent, sorted by name.
    pub fn list_agents(&self) -> Vec<AgentSummary> {
        self.registry.list_agents()
    }

    /// Add an agent whose card was obtained out of band.
    pub fn register_agent_card(&self, card: AgentCard, address: &str) -> A2AResult<()> {
        self.registry.register(card, address).map(|_| ())
    }

    /// The agent the conversation is currently talking to, if its session is
    /// still open.
    pub fn active_agent<'a>(&self, state: &'a SessionState) -> Option<&'a str> {
        if state.is_session_active() {
            state.last_agent()
        } else {
            None
        }
    }

    /// Send `task` to `agent_name` and return the reconciled result.
    ///
    /// Ids come from `state` when present so a multi-turn exchange stays in
    /// one remote task and context. After a successful submission `state`
    /// records the context id, the message id that was sent and whether the
    /// remote session is still open.
    ///
    /// # Errors
    ///
    /// [`A2AError::AgentNotFound`] when no such agent is registered (`state`
    /// is left untouched), or [`A2AError::Remote`] wrapping the transport
    /// failure.
    pub async fn dispatch(
        &self,
        agent_name: &str,
        task: &str,
        state: &mut SessionState,
    ) -> A2AResult<Option<Task>> {
        let connection = self
            .registry
            .get(agent_name)
            .ok_or_else(|| A2AError::AgentNotFound(agent_name.to_string()))?;

        state.set_str(ACTIVE_AGENT_KEY, agent_name);
        let request = build_request(task, state);

        tracing::info!(
            agent = %agent_name,
            task_id = %request.id,
            context_id = %request.context_id,
            streaming = connection.supports_streaming(),
            "dispatching task"
        );
        let result = connection
            .submit(&request, self.callback.as_ref())
            .await
            .map_err(|e| A2AError::remote(agent_name, connection.address(), e))?;

        record_outcome(state, &request, result.as_ref());
        Ok(result)
    }

    /// [`dispatch`](Self::dispatch), then flatten the task for the planner.
    ///
    /// A failed or canceled task is an error; `Ok(None)` means the agent
    /// reported nothing usable.
    pub async fn send_task(
        &self,
        agent_name: &str,
        task: &str,
        state: &mut SessionState,
    ) -> A2AResult<Option<TaskResponse>> {
        let Some(task) = self.dispatch(agent_name, task, state).await? else {
            return Ok(None);
        };

        match task.status.state {
            TaskState::Failed => Err(A2AError::TaskFailed {
                agent: agent_name.to_string(),
                task_id: task.id,
            }),
            TaskState::Canceled => Err(A2AError::TaskCanceled {
                agent: agent_name.to_string(),
                task_id: task.id,
            }),
            reported => {
                if reported == TaskState::InputRequired {
                    let prompt = task
                        .status
                        .message
                        .as_ref()
                        .map(|m| get_message_text(m, " "))
                        .unwrap_or_default();
                    tracing::info!(agent = %agent_name, task_id = %task.id, %prompt, "agent needs more input");
                }
                Ok(Some(TaskResponse::from(&task)))
            }
        }
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Build the request for one dispatch from the conversation state.
fn build_request(task: &str, state: &SessionState) -> TaskRequest {
    let task_id = state.task_id().map(str::to_string).unwrap_or_else(new_id);
    let context_id = state.context_id().map(str::to_string).unwrap_or_else(new_id);

    let input_metadata = state.input_message_metadata();
    let message_id = input_metadata
        .and_then(|m| m.get(MESSAGE_ID_KEY))
        .and_then(Value::as_str)
        .or_else(|| state.message_id())
        .map(str::to_string)
        .unwrap_or_else(new_id);

    let mut metadata: Map<String, Value> = input_metadata.cloned().unwrap_or_default();
    metadata.insert(CONVERSATION_ID_KEY.to_string(), json!(context_id));
    metadata.insert(MESSAGE_ID_KEY.to_string(), json!(message_id));

    let message = new_user_text_message(message_id, task, metadata);
    TaskRequest::new(task_id, context_id.clone(), message)
        .with_metadata(json!({ CONVERSATION_ID_KEY: context_id }))
        .with_accepted_output_modes(
            ACCEPTED_OUTPUT_MODES
                .iter()
                .map(|mode| mode.to_string())
                .collect(),
        )
}

/// Write the ids of a finished dispatch back into the conversation state.
fn record_outcome(state: &mut SessionState, request: &TaskRequest, result: Option<&Task>) {
    state.set_str(CONTEXT_ID_KEY, request.context_id.clone());
    state.remove(MESSAGE_ID_KEY);
    state.set_str(LAST_MESSAGE_ID_KEY, request.message.message_id.clone());

    let active = result.is_some_and(|task| !task.status.state.ends_session());
    state.set_session_active(active);
    match result {
        Some(task) if active => state.set_str(TASK_ID_KEY, task.id.clone()),
        _ => {
            state.remove(TASK_ID_KEY);
        }
    }
}
