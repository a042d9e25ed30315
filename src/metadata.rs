//! Metadata propagation across request/response boundaries.
//!
//! Every A2A object that carries a `metadata` mapping implements
//! [`HasMetadata`]. Types without one simply don't implement the trait, so
//! merging into them is rejected at compile time rather than silently skipped.

use serde_json::{Map, Value};

use crate::types::{
    Artifact, Message, SendMessageParams, Task, TaskArtifactUpdateEvent, TaskRequest,
    TaskStatusUpdateEvent, TaskUpdate,
};

/// Key under which a message's current id is recorded in its metadata.
pub const MESSAGE_ID_KEY: &str = "message_id";

/// Key under which the previous message id is preserved after rotation.
pub const LAST_MESSAGE_ID_KEY: &str = "last_message_id";

/// Access to an object's optional metadata mapping.
pub trait HasMetadata {
    /// The metadata, if any.
    fn metadata(&self) -> Option<&Value>;

    /// Mutable slot for the metadata.
    fn metadata_mut(&mut self) -> &mut Option<Value>;
}

macro_rules! impl_has_metadata {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl HasMetadata for $ty {
                fn metadata(&self) -> Option<&Value> {
                    self.metadata.as_ref()
                }

                fn metadata_mut(&mut self) -> &mut Option<Value> {
                    &mut self.metadata
                }
            }
        )+
    };
}

impl_has_metadata!(
    Task,
    Message,
    Artifact,
    TaskStatusUpdateEvent,
    TaskArtifactUpdateEvent,
    TaskRequest,
    SendMessageParams,
);

impl HasMetadata for TaskUpdate {
    fn metadata(&self) -> Option<&Value> {
        match self {
            TaskUpdate::Task(task) => task.metadata(),
            TaskUpdate::Status(event) => event.metadata(),
            TaskUpdate::Artifact(event) => event.metadata(),
        }
    }

    fn metadata_mut(&mut self) -> &mut Option<Value> {
        match self {
            TaskUpdate::Task(task) => task.metadata_mut(),
            TaskUpdate::Status(event) => event.metadata_mut(),
            TaskUpdate::Artifact(event) => event.metadata_mut(),
        }
    }
}

/// Merge `source`'s metadata into `target`'s.
///
/// Nothing happens when the source has no metadata, an empty mapping, or a
/// non-object value. When the target already holds a non-empty mapping the
/// source entries are inserted over it; otherwise the target takes a copy of
/// the source mapping.
pub fn merge_metadata<T, S>(target: &mut T, source: &S)
where
    T: HasMetadata + ?Sized,
    S: HasMetadata + ?Sized,
{
    let Some(Value::Object(incoming)) = source.metadata() else {
        return;
    };
    if incoming.is_empty() {
        return;
    }

    let slot = target.metadata_mut();
    if let Some(Value::Object(existing)) = slot {
        if !existing.is_empty() {
            for (key, value) in incoming {
                existing.insert(key.clone(), value.clone());
            }
            return;
        }
    }
    *slot = Some(Value::Object(incoming.clone()));
}

/// Give `message` a fresh id in its metadata, keeping the previous one.
///
/// An existing `message_id` entry moves to `last_message_id`; a new UUID v4 is
/// written as `message_id` and returned. Non-object metadata is replaced.
pub fn rotate_message_id(message: &mut Message) -> String {
    let slot = message.metadata_mut();
    if !matches!(slot, Some(Value::Object(_))) {
        *slot = Some(Value::Object(Map::new()));
    }

    let fresh = uuid::Uuid::new_v4().to_string();
    if let Some(Value::Object(map)) = slot {
        if let Some(previous) = map.remove(MESSAGE_ID_KEY) {
            map.insert(LAST_MESSAGE_ID_KEY.to_string(), previous);
        }
        map.insert(MESSAGE_ID_KEY.to_string(), Value::String(fresh.clone()));
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TaskState, TaskStatus};
    use serde_json::json;

    fn message_with(metadata: Option<Value>) -> Message {
        let mut message = Message::user("m1", "hello");
        message.metadata = metadata;
        message
    }

    fn task_with(metadata: Option<Value>) -> Task {
        Task {
            id: "t1".to_string(),
            context_id: "c1".to_string(),
            kind: "task".to_string(),
            status: TaskStatus::new(TaskState::Working),
            artifacts: None,
            history: None,
            metadata,
        }
    }

    #[test]
    fn merge_into_existing_mapping_source_wins() {
        let mut target = task_with(Some(json!({"a": 1, "b": 2})));
        let source = message_with(Some(json!({"b": 3, "c": 4})));
        merge_metadata(&mut target, &source);
        assert_eq!(target.metadata, Some(json!({"a": 1, "b": 3, "c": 4})));
    }

    #[test]
    fn merge_into_missing_mapping_copies() {
        let mut target = task_with(None);
        let source = message_with(Some(json!({"conversation_id": "c9"})));
        merge_metadata(&mut target, &source);
        assert_eq!(target.metadata, Some(json!({"conversation_id": "c9"})));
    }

    #[test]
    fn merge_into_empty_mapping_copies() {
        let mut target = task_with(Some(json!({})));
        let source = message_with(Some(json!({"k": "v"})));
        merge_metadata(&mut target, &source);
        assert_eq!(target.metadata, Some(json!({"k": "v"})));
    }

    #[test]
    fn absent_or_empty_source_is_noop() {
        let mut target = task_with(Some(json!({"a": 1})));
        merge_metadata(&mut target, &message_with(None));
        merge_metadata(&mut target, &message_with(Some(json!({}))));
        merge_metadata(&mut target, &message_with(Some(json!("not a map"))));
        assert_eq!(target.metadata, Some(json!({"a": 1})));
    }

    #[test]
    fn merge_is_idempotent() {
        let mut target = task_with(Some(json!({"a": 1})));
        let source = message_with(Some(json!({"b": 2})));
        merge_metadata(&mut target, &source);
        let once = target.metadata.clone();
        merge_metadata(&mut target, &source);
        assert_eq!(target.metadata, once);
    }

    #[test]
    fn merge_through_task_update() {
        let mut update = TaskUpdate::Task(task_with(None));
        let request = TaskRequest::new("t1", "c1", message_with(None))
            .with_metadata(json!({"conversation_id": "c1"}));
        merge_metadata(&mut update, &request);
        assert_eq!(update.metadata(), Some(&json!({"conversation_id": "c1"})));
    }

    #[test]
    fn rotation_preserves_previous_id() {
        let mut message = message_with(Some(json!({"message_id": "old", "x": true})));
        let fresh = rotate_message_id(&mut message);
        let meta = message.metadata.unwrap();
        assert_eq!(meta["last_message_id"], "old");
        assert_eq!(meta["message_id"], fresh.as_str());
        assert_eq!(meta["x"], true);
        assert_ne!(fresh, "old");
    }

    #[test]
    fn rotation_without_metadata_creates_mapping() {
        let mut message = message_with(None);
        let fresh = rotate_message_id(&mut message);
        let meta = message.metadata.unwrap();
        assert_eq!(meta["message_id"], fresh.as_str());
        assert!(meta.get("last_message_id").is_none());
        assert!(uuid::Uuid::parse_str(&fresh).is_ok());
    }
}
