//! Per-conversation correlation state.
//!
//! A [`SessionState`] is owned by whoever drives the conversation and passed
//! to every dispatch by `&mut`. It is a plain JSON object so callers can keep
//! their own keys next to the ones the coordinator manages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use crate::metadata::{LAST_MESSAGE_ID_KEY, MESSAGE_ID_KEY};

pub const ACTIVE_AGENT_KEY: &str = "active_agent";
pub const TASK_ID_KEY: &str = "task_id";
pub const CONTEXT_ID_KEY: &str = "context_id";
pub const INPUT_MESSAGE_METADATA_KEY: &str = "input_message_metadata";
pub const SESSION_ACTIVE_KEY: &str = "session_active";

/// Conversation state carried between dispatches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionState(Map<String, Value>);

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// A string-valued entry. Non-string values read as absent.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), Value::String(value.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn task_id(&self) -> Option<&str> {
        self.get_str(TASK_ID_KEY)
    }

    pub fn context_id(&self) -> Option<&str> {
        self.get_str(CONTEXT_ID_KEY)
    }

    pub fn message_id(&self) -> Option<&str> {
        self.get_str(MESSAGE_ID_KEY)
    }

    pub fn last_message_id(&self) -> Option<&str> {
        self.get_str(LAST_MESSAGE_ID_KEY)
    }

    /// Name of the agent the last dispatch went to.
    pub fn last_agent(&self) -> Option<&str> {
        self.get_str(ACTIVE_AGENT_KEY)
    }

    /// Whether the remote agent is still mid-conversation.
    pub fn is_session_active(&self) -> bool {
        self.0
            .get(SESSION_ACTIVE_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_session_active(&mut self, active: bool) {
        self.0
            .insert(SESSION_ACTIVE_KEY.to_string(), Value::Bool(active));
    }

    /// Metadata of the user message that started this turn, if recorded.
    pub fn input_message_metadata(&self) -> Option<&Map<String, Value>> {
        self.0
            .get(INPUT_MESSAGE_METADATA_KEY)
            .and_then(Value::as_object)
    }

    pub fn set_input_message_metadata(&mut self, metadata: Map<String, Value>) {
        self.0.insert(
            INPUT_MESSAGE_METADATA_KEY.to_string(),
            Value::Object(metadata),
        );
    }

    /// Prepare for a new user turn.
    ///
    /// When no remote session is active this assigns a fresh context id (if
    /// none is recorded yet) and marks the session active.
    pub fn begin_turn(&mut self) {
        if self.is_session_active() {
            return;
        }
        if self.context_id().is_none() {
            self.set_str(CONTEXT_ID_KEY, uuid::Uuid::new_v4().to_string());
        }
        self.set_session_active(true);
    }
}

impl From<Map<String, Value>> for SessionState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
