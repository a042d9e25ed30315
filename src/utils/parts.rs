//! Utility functions for working with A2A Part objects.

use crate::types::{Part, Task};

/// Extracts text content from all text Parts in a list.
///
/// # Example
///
/// ```
/// use a2a_host::types::Part;
/// use a2a_host::utils::get_text_parts;
///
/// let parts = vec![Part::text("Hello"), Part::text("World")];
/// assert_eq!(get_text_parts(&parts), vec!["Hello", "World"]);
/// ```
pub fn get_text_parts(parts: &[Part]) -> Vec<String> {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Every content part a task has produced, in reporting order.
///
/// The status message's parts come first, followed by the parts of each
/// artifact in the order the artifacts were recorded.
pub fn task_parts(task: &Task) -> impl Iterator<Item = &Part> {
    let status_parts = task
        .status
        .message
        .iter()
        .flat_map(|message| message.parts.iter());
    let artifact_parts = task
        .artifacts
        .iter()
        .flatten()
        .flat_map(|artifact| artifact.parts.iter());
    status_parts.chain(artifact_parts)
}
