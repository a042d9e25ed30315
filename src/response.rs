//! Planner-facing view of a finished task.

use serde::{Deserialize, Serialize};

use crate::types::{FileContent, Part, Task, TaskState};
use crate::utils::task_parts;

/// One piece of content returned by a remote agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponsePart {
    Text { text: String },
    Data { data: serde_json::Value },
    File { file: FileContent },
}

impl From<&Part> for ResponsePart {
    fn from(part: &Part) -> Self {
        match part {
            Part::Text { text, .. } => ResponsePart::Text { text: text.clone() },
            Part::Data { data, .. } => ResponsePart::Data { data: data.clone() },
            Part::File { file, .. } => ResponsePart::File { file: file.clone() },
        }
    }
}

/// What a dispatched task produced, flattened for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task_id: String,
    pub context_id: String,
    pub state: TaskState,
    /// Status message parts first, then every artifact's parts in order.
    pub parts: Vec<ResponsePart>,
    /// The agent is waiting for more input from the user.
    pub needs_input: bool,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            context_id: task.context_id.clone(),
            state: task.status.state,
            parts: task_parts(task).map(ResponsePart::from).collect(),
            needs_input: task.status.state == TaskState::InputRequired,
        }
    }
}

impl TaskResponse {
    /// All text parts joined by `delimiter`.
    pub fn text(&self, delimiter: &str) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                ResponsePart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Artifact, FileWithUri, Message, TaskStatus};
    use serde_json::json;

    fn task(state: TaskState) -> Task {
        Task {
            id: "t1".to_string(),
            context_id: "c1".to_string(),
            kind: "task".to_string(),
            status: TaskStatus::new(state).with_message(Message::agent("m1", "Here you go")),
            artifacts: Some(vec![Artifact {
                artifact_id: "a1".to_string(),
                name: Some("itinerary".to_string()),
                description: None,
                parts: vec![
                    Part::data(json!({"flight": "UA1"})),
                    Part::file_from_uri(
                        "https://example.com/map.png",
                        None,
                        Some("image/png".to_string()),
                    ),
                ],
                metadata: None,
            }]),
            history: None,
            metadata: None,
        }
    }

    #[test]
    fn converts_status_then_artifacts() {
        let response = TaskResponse::from(&task(TaskState::Completed));
        assert_eq!(response.parts.len(), 3);
        assert_eq!(
            response.parts[0],
            ResponsePart::Text {
                text: "Here you go".to_string()
            }
        );
        assert_eq!(
            response.parts[1],
            ResponsePart::Data {
                data: json!({"flight": "UA1"})
            }
        );
        assert!(matches!(
            &response.parts[2],
            ResponsePart::File { file: FileContent::Uri(FileWithUri { uri, .. }) }
                if uri == "https://example.com/map.png"
        ));
        assert!(!response.needs_input);
    }

    #[test]
    fn input_required_needs_input() {
        let response = TaskResponse::from(&task(TaskState::InputRequired));
        assert!(response.needs_input);
        assert_eq!(response.text("\n"), "Here you go");
    }

    #[test]
    fn parts_serialize_with_type_tag() {
        let part = ResponsePart::Text {
            text: "hi".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({"type": "text", "text": "hi"})
        );
    }
}
