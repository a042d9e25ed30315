//! Utility functions for building Task objects on the host side.

use chrono::{SecondsFormat, Utc};

use crate::types::{Task, TaskRequest, TaskState, TaskStatus, TaskStatusUpdateEvent};

/// Current time as an RFC 3339 timestamp, suitable for `TaskStatus::timestamp`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The placeholder Task reported before a streaming submission is sent.
///
/// The task is `submitted`, carries the request message as both its status
/// message and its only history entry, and is stamped with the current time.
///
/// # Example
///
/// ```
/// use a2a_host::types::{Message, TaskRequest, TaskState};
/// use a2a_host::utils::submitted_task;
///
/// let request = TaskRequest::new("task-1", "ctx-1", Message::user("msg-1", "Hello"));
/// let task = submitted_task(&request);
/// assert_eq!(task.status.state, TaskState::Submitted);
/// assert_eq!(task.history.unwrap().len(), 1);
/// ```
pub fn submitted_task(request: &TaskRequest) -> Task {
    Task {
        id: request.id.clone(),
        context_id: request.context_id.clone(),
        kind: "task".to_string(),
        status: TaskStatus {
            state: TaskState::Submitted,
            message: Some(request.message.clone()),
            timestamp: Some(now_timestamp()),
        },
        artifacts: None,
        history: Some(vec![request.message.clone()]),
        metadata: None,
    }
}

/// Rebuild a Task from a status event when no full snapshot ever arrived.
///
/// Status events may omit the context id, so the caller supplies it.
pub fn task_from_status(event: TaskStatusUpdateEvent, context_id: impl Into<String>) -> Task {
    Task {
        id: event.task_id,
        context_id: context_id.into(),
        kind: "task".to_string(),
        status: event.status,
        artifacts: None,
        history: None,
        metadata: event.metadata,
    }
}
