//! Reaching remote agents.
//!
//! - [`AgentEndpoint`]: the task-send seam every connection talks through
//! - [`TaskSubscription`]: a cancellable stream of task events
//! - [`A2AClient`]: JSON-RPC/HTTP implementation of [`AgentEndpoint`]
//! - [`CardResolver`]: discover agent cards via the well-known URL convention
//! - [`Transport`] / [`JsonRpcTransport`]: pluggable transport layer
//!
//! The HTTP pieces require the `client` feature.
//!
//! # Quick Start
//!
//! ```no_run
//! use a2a_host::client::{A2AClient, AgentEndpoint};
//! use a2a_host::types::{Message, SendMessageParams};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = A2AClient::from_url("http://localhost:10003").await?;
//!
//! let params = SendMessageParams {
//!     message: Message::user("m1", "Write a haiku"),
//!     configuration: None,
//!     metadata: None,
//! };
//! let mut events = client.send_task_streaming(params).await?;
//! while let Some(event) = events.next().await {
//!     println!("{:?}", event?);
//! }
//! # Ok(())
//! # }
//! ```

mod endpoint;
mod subscription;

#[cfg(feature = "client")]
mod a2a_client;
#[cfg(feature = "client")]
mod card_resolver;
#[cfg(feature = "client")]
mod sse;
#[cfg(feature = "client")]
mod transport;

pub use crate::types::SendMessageResponse;
pub use endpoint::AgentEndpoint;
pub use subscription::TaskSubscription;

#[cfg(feature = "client")]
pub use a2a_client::{create_text_message, A2AClient};
#[cfg(feature = "client")]
pub use card_resolver::CardResolver;
#[cfg(feature = "client")]
pub use transport::{JsonRpcTransport, Transport, TransportConfig};
