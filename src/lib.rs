//! # a2a-host: orchestrate remote Agent-to-Agent (A2A) agents
//!
//! This crate is the host side of the
//! [A2A protocol](https://a2a-protocol.org/latest/specification/) v0.3. A host
//! (typically an LLM planner) knows a set of remote agents by address and
//! delegates work to them by name over JSON-RPC 2.0, following their progress
//! through Server-Sent Events when the agent supports streaming.
//!
//! ## Overview
//!
//! The host:
//! - Discovers agents from their cards at `/.well-known/agent-card.json`
//! - Keeps a registry of reachable agents keyed by name
//! - Dispatches a task to a named agent, reusing the conversation's task and
//!   context ids so multi-turn exchanges stay in one remote session
//! - Reconciles a stream of status and artifact updates into one final task
//! - Forwards every update to an optional callback for live progress
//!
//! ## Feature flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `client` | yes     | HTTP transport, SSE streaming and card discovery (reqwest) |
//! | `full`   | no      | Enable all features |
//!
//! Without `client` the coordinator still works over any
//! [`AgentDirectory`](registry::AgentDirectory) you supply.
//!
//! ## Quick Start
//!
//! ```no_run
//! use a2a_host::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let coordinator = CoordinatorBuilder::new()
//!         .with_address("http://localhost:10002")
//!         .with_address("http://localhost:10003")
//!         .with_callback(|update, card| {
//!             if let Some(status) = update.status() {
//!                 println!("[{}] {}", card.name, status.state);
//!             }
//!             Ok(())
//!         })
//!         .build()
//!         .await?;
//!
//!     for agent in coordinator.list_agents() {
//!         println!("{}: {}", agent.name, agent.description);
//!     }
//!
//!     let mut state = SessionState::new();
//!     if let Some(response) = coordinator
//!         .send_task("Airbnb Agent", "Find a room in Paris for two nights", &mut state)
//!         .await?
//!     {
//!         println!("{}", response.text("\n"));
//!         if response.needs_input {
//!             // The next send_task with the same state continues this task.
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`coordinator::HostCoordinator`] routes tasks by agent name and keeps
//!   [`session::SessionState`] in step with the remote session
//! - [`registry::AgentRegistry`] resolves addresses into connections
//! - [`connection::RemoteAgentConnection`] submits one task, streaming or not
//! - [`reconciler::UpdateReconciler`] picks the task a submission resolves to
//! - [`metadata`] merges request metadata into outgoing updates
//! - [`client`] holds the JSON-RPC transport, SSE parsing and card discovery

pub mod builders;
pub mod client;
pub mod config;
pub mod connection;
pub mod coordinator;
pub mod error;
pub mod metadata;
pub mod reconciler;
pub mod registry;
pub mod response;
pub mod session;
pub mod types;
pub mod utils;

/// Prelude module that re-exports commonly used types and traits.
///
/// # Example
///
/// ```
/// use a2a_host::prelude::*;
///
/// let mut state = SessionState::new();
/// state.begin_turn();
/// assert!(state.is_session_active());
/// ```
pub mod prelude {
    // Core types
    pub use crate::types::{
        AgentCapabilities, AgentCard, AgentInterface, AgentSkill, Artifact, FileContent,
        FileWithBytes, FileWithUri, Message, Part, Role, SendMessageConfiguration,
        SendMessageParams, StreamResponse, Task, TaskArtifactUpdateEvent, TaskRequest, TaskState,
        TaskStatus, TaskStatusUpdateEvent, TaskUpdate,
    };

    // Error types
    pub use crate::error::{A2AError, A2AResult};

    // Builders
    pub use crate::builders::{AgentCardBuilder, CoordinatorBuilder};

    // Host
    pub use crate::client::{AgentEndpoint, SendMessageResponse, TaskSubscription};
    pub use crate::config::CoordinatorConfig;
    pub use crate::connection::{RemoteAgentConnection, TaskCallback};
    pub use crate::coordinator::HostCoordinator;
    pub use crate::metadata::{merge_metadata, HasMetadata};
    pub use crate::registry::{AgentDirectory, AgentRegistry, AgentSummary};
    pub use crate::response::{ResponsePart, TaskResponse};
    pub use crate::session::SessionState;

    #[cfg(feature = "client")]
    pub use crate::client::A2AClient;

    #[cfg(feature = "client")]
    pub use crate::registry::HttpAgentDirectory;
}

// Re-export core types at crate root for convenience.
pub use builders::{AgentCardBuilder, CoordinatorBuilder};
pub use coordinator::HostCoordinator;
pub use error::{A2AError, A2AResult};
pub use session::SessionState;
pub use types::*;
