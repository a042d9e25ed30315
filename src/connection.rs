//! One live connection to a remote agent.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::client::{AgentEndpoint, TaskSubscription};
use crate::error::A2AResult;
use crate::metadata::{merge_metadata, rotate_message_id};
use crate::reconciler::UpdateReconciler;
use crate::types::{AgentCard, StreamResponse, Task, TaskRequest, TaskUpdate};
use crate::utils::submitted_task;

/// Error type a [`TaskCallback`] may return.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Observer invoked for every update a submission produces.
///
/// Failures (returned errors and panics alike) are logged and never
/// interrupt the submission.
pub type TaskCallback =
    Arc<dyn Fn(&TaskUpdate, &AgentCard) -> Result<(), CallbackError> + Send + Sync>;

/// A remote agent together with the endpoint used to reach it.
///
/// Connections are shared (`Arc`) between the registry and any number of
/// concurrent submissions. Each submission's task id is tracked as pending
/// for exactly as long as the submission runs.
pub struct RemoteAgentConnection {
    card: AgentCard,
    address: String,
    endpoint: Arc<dyn AgentEndpoint>,
    pending: Mutex<HashMap<String, usize>>,
    stream_idle_timeout: Option<Duration>,
}

impl std::fmt::Debug for RemoteAgentConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAgentConnection")
            .field("agent", &self.card.name)
            .field("address", &self.address)
            .field("pending", &self.pending.lock().len())
            .finish_non_exhaustive()
    }
}

impl RemoteAgentConnection {
    /// Create a connection for `card`, resolved from `address`.
    pub fn new(
        card: AgentCard,
        address: impl Into<String>,
        endpoint: Arc<dyn AgentEndpoint>,
    ) -> Self {
        Self {
            card,
            address: address.into(),
            endpoint,
            pending: Mutex::new(HashMap::new()),
            stream_idle_timeout: None,
        }
    }

    /// Fail a stream read that waits longer than `idle` for the next event.
    pub fn with_stream_idle_timeout(mut self, idle: Duration) -> Self {
        self.stream_idle_timeout = Some(idle);
        self
    }

    pub fn card(&self) -> &AgentCard {
        &self.card
    }

    pub fn name(&self) -> &str {
        &self.card.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether submissions use `message/stream`.
    pub fn supports_streaming(&self) -> bool {
        self.card.supports_streaming()
    }

    /// Ids of tasks currently being submitted, sorted.
    pub fn pending_tasks(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.pending.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Send `request` to the agent and settle on its result.
    ///
    /// Streams when the agent's card advertises streaming, otherwise makes a
    /// single call. Every update is enriched with the request's metadata and
    /// handed to `callback` before it is reconciled.
    ///
    /// Returns `Ok(None)` when the agent reported nothing that describes a
    /// task outcome. Transport failures are returned as errors; nothing is
    /// retried.
    pub async fn submit(
        &self,
        request: &TaskRequest,
        callback: Option<&TaskCallback>,
    ) -> A2AResult<Option<Task>> {
        let _pending = PendingGuard::register(&self.pending, &request.id);

        let reconciler = if self.supports_streaming() {
            self.submit_streaming(request, callback).await?
        } else {
            self.submit_once(request, callback).await?
        };

        let source = if reconciler.has_final_task() {
            "task"
        } else {
            "status-update"
        };
        let result = reconciler.resolve(request);
        match &result {
            Some(task) => tracing::info!(
                agent = %self.card.name,
                task_id = %task.id,
                state = %task.status.state,
                source,
                "submission resolved"
            ),
            None => tracing::warn!(
                agent = %self.card.name,
                task_id = %request.id,
                "agent reported no task outcome"
            ),
        }
        Ok(result)
    }

    async fn submit_streaming(
        &self,
        request: &TaskRequest,
        callback: Option<&TaskCallback>,
    ) -> A2AResult<UpdateReconciler> {
        if let Some(callback) = callback {
            self.notify(callback, &TaskUpdate::Task(submitted_task(request)));
        }

        tracing::debug!(agent = %self.card.name, task_id = %request.id, "opening task stream");
        let mut subscription = self
            .endpoint
            .send_task_streaming(request.to_send_params())
            .await?;

        let mut reconciler = UpdateReconciler::new();
        while let Some(event) = self.next_event(&mut subscription).await {
            let Some(mut update) = self.as_task_update(event?) else {
                continue;
            };
            self.enrich(&mut update, request);
            if let Some(callback) = callback {
                self.notify(callback, &update);
            }
            reconciler.observe(&update);

            if update.is_final() {
                tracing::debug!(agent = %self.card.name, task_id = %update.task_id(), "final event received");
                subscription.close();
                break;
            }
        }
        Ok(reconciler)
    }

    async fn submit_once(
        &self,
        request: &TaskRequest,
        callback: Option<&TaskCallback>,
    ) -> A2AResult<UpdateReconciler> {
        tracing::debug!(agent = %self.card.name, task_id = %request.id, "sending task");
        let response = self.endpoint.send_task(request.to_send_params()).await?;

        let mut reconciler = UpdateReconciler::new();
        let update = match TaskUpdate::try_from(response) {
            Ok(update) => Some(update),
            Err(message) => {
                tracing::debug!(agent = %self.card.name, message_id = %message.message_id, "agent replied with a message, not a task");
                None
            }
        };
        if let Some(mut update) = update {
            self.enrich(&mut update, request);
            if let Some(callback) = callback {
                self.notify(callback, &update);
            }
            reconciler.observe_response(&update);
        }
        Ok(reconciler)
    }

    async fn next_event(
        &self,
        subscription: &mut TaskSubscription,
    ) -> Option<A2AResult<StreamResponse>> {
        match self.stream_idle_timeout {
            Some(idle) => subscription.next_timeout(idle).await,
            None => subscription.next().await,
        }
    }

    fn as_task_update(&self, event: StreamResponse) -> Option<TaskUpdate> {
        match TaskUpdate::try_from(event) {
            Ok(update) => Some(update),
            Err(message) => {
                tracing::debug!(agent = %self.card.name, message_id = %message.message_id, "skipping direct message in task stream");
                None
            }
        }
    }

    /// Carry request metadata onto an update before anyone sees it.
    fn enrich(&self, update: &mut TaskUpdate, request: &TaskRequest) {
        merge_metadata(update, request);
        if let Some(message) = update.status_mut().and_then(|s| s.message.as_mut()) {
            merge_metadata(message, &request.message);
            rotate_message_id(message);
        }
    }

    fn notify(&self, callback: &TaskCallback, update: &TaskUpdate) {
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| callback(update, &self.card)));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(
                agent = %self.card.name,
                task_id = %update.task_id(),
                error = %e,
                "task callback failed"
            ),
            Err(_) => tracing::error!(
                agent = %self.card.name,
                task_id = %update.task_id(),
                "task callback panicked"
            ),
        }
    }
}

/// Marks a task id as pending until dropped.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashMap<String, usize>>,
    task_id: String,
}

impl<'a> PendingGuard<'a> {
    fn register(pending: &'a Mutex<HashMap<String, usize>>, task_id: &str) -> Self {
        *pending.lock().entry(task_id.to_string()).or_insert(0) += 1;
        Self {
            pending,
            task_id: task_id.to_string(),
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut pending = self.pending.lock();
        if let Some(count) = pending.get_mut(&self.task_id) {
            *count -= 1;
            if *count == 0 {
                pending.remove(&self.task_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_guard_counts_overlapping_submissions() {
        let pending = Mutex::new(HashMap::new());
        let first = PendingGuard::register(&pending, "t1");
        let second = PendingGuard::register(&pending, "t1");
        assert_eq!(pending.lock().get("t1"), Some(&2));
        drop(first);
        assert_eq!(pending.lock().get("t1"), Some(&1));
        drop(second);
        assert!(pending.lock().is_empty());
    }
}
