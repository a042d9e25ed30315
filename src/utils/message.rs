//! Utility functions for creating and handling A2A Message objects.

use serde_json::{Map, Value};

use crate::types::{Message, Part, Role};
use crate::utils::parts::get_text_parts;

/// Creates a user message containing a single text Part.
///
/// # Arguments
///
/// * `message_id` - The id the message is sent under.
/// * `text` - The text content of the message.
/// * `metadata` - Metadata mapping attached to the message; an empty map
///   is left off the wire.
///
/// # Example
///
/// ```
/// use a2a_host::utils::new_user_text_message;
///
/// let message = new_user_text_message("msg-1", "Book a flight", Default::default());
/// assert_eq!(message.role, a2a_host::types::Role::User);
/// assert!(message.metadata.is_none());
/// ```
pub fn new_user_text_message(
    message_id: impl Into<String>,
    text: impl Into<String>,
    metadata: Map<String, Value>,
) -> Message {
    Message {
        message_id: message_id.into(),
        role: Role::User,
        kind: "message".to_string(),
        parts: vec![Part::text(text)],
        context_id: None,
        task_id: None,
        metadata: (!metadata.is_empty()).then_some(Value::Object(metadata)),
        extensions: None,
        reference_task_ids: None,
    }
}

/// Extracts and joins all text content from a Message's parts.
///
/// # Example
///
/// ```
/// use a2a_host::types::Message;
/// use a2a_host::utils::get_message_text;
///
/// let message = Message::agent("m1", "Hello, world!");
/// assert_eq!(get_message_text(&message, "\n"), "Hello, world!");
/// ```
pub fn get_message_text(message: &Message, delimiter: &str) -> String {
    get_text_parts(&message.parts).join(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_message_carries_metadata() {
        let mut metadata = Map::new();
        metadata.insert("conversation_id".to_string(), json!("ctx-1"));
        let message = new_user_text_message("msg-1", "hi", metadata);
        assert_eq!(message.message_id, "msg-1");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.metadata, Some(json!({"conversation_id": "ctx-1"})));
    }

    #[test]
    fn message_text_joins_text_parts() {
        let mut message = Message::agent("m1", "one");
        message.parts.push(Part::data(json!({})));
        message.parts.push(Part::text("two"));
        assert_eq!(get_message_text(&message, " "), "one two");
    }

    #[test]
    fn message_text_empty_without_text() {
        let mut message = Message::agent("m1", "x");
        message.parts.clear();
        assert_eq!(get_message_text(&message, "\n"), "");
    }
}
