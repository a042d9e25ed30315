//! Deciding what a submission finally produced.
//!
//! Agents report progress as a mix of full task snapshots, incremental status
//! events and artifact fragments. Some never send a terminal snapshot at all.
//! [`UpdateReconciler`] watches the updates of one submission and settles on a
//! single answer once they stop.

use crate::types::{Task, TaskRequest, TaskStatusUpdateEvent, TaskUpdate};
use crate::utils::task_from_status;

/// Tracks the updates of one submission.
///
/// Holds at most the last terminal task snapshot and the last status event
/// that carried a message; everything else is discarded as it arrives.
#[derive(Debug, Default)]
pub struct UpdateReconciler {
    final_task: Option<Task>,
    last_status_with_message: Option<TaskStatusUpdateEvent>,
}

impl UpdateReconciler {
    /// Create an empty reconciler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one update from a stream.
    ///
    /// A task snapshot only counts once it is terminal, since more updates
    /// may follow.
    pub fn observe(&mut self, update: &TaskUpdate) {
        match update {
            TaskUpdate::Task(task) if task.status.state.is_terminal() => {
                tracing::debug!(task_id = %task.id, state = %task.status.state, "terminal task snapshot");
                self.final_task = Some(task.clone());
            }
            TaskUpdate::Status(event) => self.observe_status(event),
            _ => {}
        }
    }

    /// Record the single reply of a non-streaming submission.
    ///
    /// Nothing can follow it, so any task snapshot is authoritative,
    /// including non-terminal ones such as `input-required`.
    pub fn observe_response(&mut self, update: &TaskUpdate) {
        match update {
            TaskUpdate::Task(task) => self.final_task = Some(task.clone()),
            TaskUpdate::Status(event) => self.observe_status(event),
            TaskUpdate::Artifact(_) => {}
        }
    }

    fn observe_status(&mut self, event: &TaskStatusUpdateEvent) {
        if event.status.message.is_some() {
            self.last_status_with_message = Some(event.clone());
        }
    }

    /// Whether a task snapshot has been settled on.
    pub fn has_final_task(&self) -> bool {
        self.final_task.is_some()
    }

    /// Settle on the submission's result.
    ///
    /// The recorded task snapshot wins. Without one, a task is rebuilt from
    /// the last status event that carried a message, taking its context id
    /// from `request`. Without either there is nothing to report.
    pub fn resolve(self, request: &TaskRequest) -> Option<Task> {
        if let Some(task) = self.final_task {
            return Some(task);
        }
        self.last_status_with_message
            .map(|event| task_from_status(event, request.context_id.clone()))
    }
}
