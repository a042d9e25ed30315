//! Resolving agent addresses and indexing live connections by agent name.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::client::AgentEndpoint;
use crate::connection::RemoteAgentConnection;
use crate::error::{A2AError, A2AResult};
use crate::types::AgentCard;

/// Finds remote agents and opens endpoints to them.
#[async_trait]
pub trait AgentDirectory: Send + Sync {
    /// Fetch the agent card published at `address`.
    async fn resolve(&self, address: &str) -> A2AResult<AgentCard>;

    /// Open an endpoint for an agent whose card was resolved from `address`.
    fn connect(&self, card: &AgentCard, address: &str) -> A2AResult<Arc<dyn AgentEndpoint>>;
}

#[cfg(feature = "client")]
pub use http::HttpAgentDirectory;

#[cfg(feature = "client")]
mod http {
    use super::*;
    use crate::client::{A2AClient, CardResolver, JsonRpcTransport, TransportConfig};

    /// Directory backed by the well-known agent card URLs over HTTP.
    ///
    /// One `reqwest::Client` is shared by card resolution and by every
    /// endpoint this directory opens.
    #[derive(Debug, Clone)]
    pub struct HttpAgentDirectory {
        client: reqwest::Client,
        resolver: CardResolver,
        request_timeout: Duration,
    }

    impl HttpAgentDirectory {
        /// Create a directory using `config` for every connection.
        pub fn new(config: &TransportConfig) -> Self {
            let client = config.build_client();
            Self {
                resolver: CardResolver::with_client(client.clone())
                    .with_timeout(config.request_timeout),
                client,
                request_timeout: config.request_timeout,
            }
        }

        /// Fetch cards from `path` instead of the well-known paths.
        pub fn with_card_path(mut self, path: impl Into<String>) -> Self {
            self.resolver = self.resolver.with_card_path(path);
            self
        }
    }

    impl Default for HttpAgentDirectory {
        fn default() -> Self {
            Self::new(&TransportConfig::default())
        }
    }

    #[async_trait]
    impl AgentDirectory for HttpAgentDirectory {
        async fn resolve(&self, address: &str) -> A2AResult<AgentCard> {
            self.resolver.resolve(address).await
        }

        fn connect(&self, card: &AgentCard, address: &str) -> A2AResult<Arc<dyn AgentEndpoint>> {
            let url = CardResolver::endpoint_url(card, address);
            tracing::debug!(agent = %card.name, %url, "connecting to agent endpoint");
            let transport = JsonRpcTransport::with_client(url, self.client.clone())
                .with_request_timeout(self.request_timeout);
            Ok(Arc::new(A2AClient::from_card(card.clone(), transport)))
        }
    }
}

/// Name and description of a registered agent, as shown to a planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub name: String,
    pub description: String,
}

/// Live connections, one per agent name.
///
/// Registering a card whose name is already present replaces the earlier
/// connection; in-flight submissions on the old one run to completion.
pub struct AgentRegistry {
    directory: Arc<dyn AgentDirectory>,
    connections: RwLock<HashMap<String, Arc<RemoteAgentConnection>>>,
    stream_idle_timeout: Option<Duration>,
    resolve_timeout: Option<Duration>,
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("agents", &self.names())
            .finish_non_exhaustive()
    }
}

impl AgentRegistry {
    /// Create an empty registry resolving through `directory`.
    pub fn new(directory: Arc<dyn AgentDirectory>) -> Self {
        Self {
            directory,
            connections: RwLock::new(HashMap::new()),
            stream_idle_timeout: None,
            resolve_timeout: None,
        }
    }

    /// Apply a stream idle timeout to every connection registered afterwards.
    pub fn with_stream_idle_timeout(mut self, idle: Duration) -> Self {
        self.stream_idle_timeout = Some(idle);
        self
    }

    /// Give up on resolving a single address after `timeout`.
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = Some(timeout);
        self
    }

    async fn resolve_one(&self, address: &str) -> A2AResult<AgentCard> {
        let Some(limit) = self.resolve_timeout else {
            return self.directory.resolve(address).await;
        };
        tokio::time::timeout(limit, self.directory.resolve(address))
            .await
            .unwrap_or_else(|_| {
                Err(A2AError::Timeout(format!(
                    "no agent card from {address} within {limit:?}"
                )))
            })
    }

    /// Resolve every address concurrently and register the agents found.
    ///
    /// Each address is handled in isolation: a failure is logged and the
    /// address skipped, and with a resolve timeout set a stalled address is
    /// abandoned once it expires. Results are registered in address order, so
    /// when two addresses serve the same agent name the later one wins.
    /// Returns how many addresses were registered.
    pub async fn resolve_all<S: AsRef<str> + Sync>(&self, addresses: &[S]) -> usize {
        let resolutions = addresses.iter().map(|address| async move {
            let address = address.as_ref();
            (address, self.resolve_one(address).await)
        });

        let mut registered = 0;
        for (address, result) in join_all(resolutions).await {
            match result.and_then(|card| self.register(card, address)) {
                Ok(connection) => {
                    tracing::info!(agent = %connection.name(), %address, "registered remote agent");
                    registered += 1;
                }
                Err(e) => {
                    tracing::error!(%address, error = %e, "failed to resolve remote agent");
                }
            }
        }
        registered
    }

    /// Register an agent whose card is already known.
    pub fn register(
        &self,
        card: AgentCard,
        address: &str,
    ) -> A2AResult<Arc<RemoteAgentConnection>> {
        let endpoint = self.directory.connect(&card, address)?;
        let mut connection = RemoteAgentConnection::new(card, address, endpoint);
        if let Some(idle) = self.stream_idle_timeout {
            connection = connection.with_stream_idle_timeout(idle);
        }
        let connection = Arc::new(connection);

        let previous = self
            .connections
            .write()
            .insert(connection.name().to_string(), connection.clone());
        if let Some(previous) = previous {
            tracing::info!(
                agent = %connection.name(),
                old_address = %previous.address(),
                new_address = %address,
                "replacing agent connection"
            );
        }
        Ok(connection)
    }

    /// The connection registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<RemoteAgentConnection>> {
        self.connections.read().get(name).cloned()
    }

    /// Summaries of every registered agent, sorted by name.
    pub fn list_agents(&self) -> Vec<AgentSummary> {
        let mut agents: Vec<AgentSummary> = self
            .connections
            .read()
            .values()
            .map(|connection| AgentSummary {
                name: connection.card().name.clone(),
                description: connection.card().description.clone(),
            })
            .collect();
        agents.sort_by(|a, b| a.name.cmp(&b.name));
        agents
    }

    /// Registered agent names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.connections.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }
}
