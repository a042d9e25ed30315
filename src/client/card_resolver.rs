//! Agent card discovery and resolution.
//!
//! Implements the well-known URI convention for discovering A2A agent cards.
//! An agent card describes the agent's capabilities, supported interfaces,
//! skills, and the endpoint URL for JSON-RPC communication.

use std::time::Duration;

use crate::error::{A2AError, A2AResult};
use crate::types::AgentCard;

/// Default path for the agent card well-known endpoint (A2A v0.3+).
const DEFAULT_AGENT_CARD_PATH: &str = "/.well-known/agent-card.json";

/// Previous well-known path (pre-v0.3 compat).
const PREV_AGENT_CARD_PATH: &str = "/.well-known/agent.json";

/// Resolves [`AgentCard`]s from agent base URLs.
///
/// Fetches the agent card from the well-known endpoint
/// (`{base_url}/.well-known/agent-card.json`, falling back to
/// `/.well-known/agent.json`) and deserializes it into an [`AgentCard`].
///
/// # Example
///
/// ```no_run
/// use a2a_host::client::CardResolver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = CardResolver::new();
/// let card = resolver.resolve("http://localhost:10003").await?;
/// println!("Agent: {} v{}", card.name, card.version);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CardResolver {
    client: reqwest::Client,
    /// Override the default agent card path. If `None`, uses the
    /// well-known paths.
    card_path: Option<String>,
    /// Bound on each card request, headers and body included.
    timeout: Option<Duration>,
}

impl CardResolver {
    /// Create a new resolver with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            card_path: None,
            timeout: None,
        }
    }

    /// Create a new resolver with an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            card_path: None,
            timeout: None,
        }
    }

    /// Give up on a card request after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the agent card path (instead of the well-known paths).
    pub fn with_card_path(mut self, path: impl Into<String>) -> Self {
        self.card_path = Some(path.into());
        self
    }

    /// Fetch and parse the agent card from the given base URL.
    ///
    /// Constructs the full URL as `{base_url}{card_path}` and performs an
    /// HTTP GET request. The response is parsed as JSON into an [`AgentCard`].
    ///
    /// When using the default card path, this method first tries the new
    /// `/.well-known/agent-card.json` path. If that returns a 404, it falls
    /// back to the previous `/.well-known/agent.json` path for backwards
    /// compatibility.
    ///
    /// # Errors
    ///
    /// Returns [`A2AError::Transport`] on connection failures, [`A2AError::Http`]
    /// on non-2xx responses, and [`A2AError::InvalidJson`] on parse failures.
    pub async fn resolve(&self, base_url: &str) -> A2AResult<AgentCard> {
        let base = base_url.trim_end_matches('/');

        if let Some(path) = self.card_path.as_deref() {
            // Custom path: try it directly, no fallback.
            return self.fetch_card(base, path).await;
        }

        // Try the new well-known path first.
        match self.fetch_card(base, DEFAULT_AGENT_CARD_PATH).await {
            Ok(card) => Ok(card),
            Err(A2AError::Http { status: 404, .. }) => {
                // Fall back to the previous well-known path.
                tracing::debug!(
                    "agent card not found at {}{}, trying fallback path {}",
                    base,
                    DEFAULT_AGENT_CARD_PATH,
                    PREV_AGENT_CARD_PATH,
                );
                self.fetch_card(base, PREV_AGENT_CARD_PATH).await
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch and parse an agent card from a specific path relative to a base URL.
    async fn fetch_card(&self, base: &str, path: &str) -> A2AResult<AgentCard> {
        // Ensure path starts with '/'.
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let url = format!("{base}{path}");

        tracing::debug!(%url, "resolving agent card");

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    A2AError::Transport(format!("failed to connect to agent at {url}: {e}"))
                } else if e.is_timeout() {
                    A2AError::Timeout(format!("timed out fetching agent card from {url}: {e}"))
                } else {
                    A2AError::Transport(format!("failed to fetch agent card from {url}: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(A2AError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                A2AError::Timeout(format!("timed out reading agent card from {url}: {e}"))
            } else {
                A2AError::Transport(format!("failed to read agent card response: {e}"))
            }
        })?;

        let card: AgentCard = serde_json::from_slice(&bytes)
            .map_err(|e| A2AError::InvalidJson(format!("failed to parse agent card: {e}")))?;

        tracing::debug!(agent = %card.name, version = %card.version, "resolved agent card");

        Ok(card)
    }

    /// Extract the A2A endpoint URL from an agent card.
    ///
    /// Looks for the first supported interface with `transport` of
    /// `"JSONRPC"` (case-insensitive) and returns its URL.
    ///
    /// Returns `None` if no JSON-RPC interface is found.
    pub fn get_a2a_url(card: &AgentCard) -> Option<String> {
        card.supported_interfaces
            .iter()
            .find(|iface| iface.transport.eq_ignore_ascii_case("JSONRPC"))
            .map(|iface| iface.url.clone())
    }

    /// The URL to send JSON-RPC calls to for `card`.
    ///
    /// Prefers a declared JSON-RPC interface, then the card's own `url`, then
    /// the address the card was resolved from.
    pub fn endpoint_url(card: &AgentCard, address: &str) -> String {
        Self::get_a2a_url(card)
            .or_else(|| (!card.url.is_empty()).then(|| card.url.clone()))
            .unwrap_or_else(|| address.to_string())
    }
}

impl Default for CardResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::AgentCardBuilder;

    #[test]
    fn endpoint_prefers_jsonrpc_interface() {
        let card = AgentCardBuilder::new("a", "b", "1.0")
            .with_url("http://card-url/")
            .with_jsonrpc_interface("http://rpc-url/a2a")
            .build();
        assert_eq!(
            CardResolver::endpoint_url(&card, "http://addr"),
            "http://rpc-url/a2a"
        );
    }

    #[test]
    fn endpoint_falls_back_to_card_url_then_address() {
        let card = AgentCardBuilder::new("a", "b", "1.0")
            .with_url("http://card-url/")
            .build();
        assert_eq!(CardResolver::endpoint_url(&card, "http://addr"), "http://card-url/");

        let card = AgentCardBuilder::new("a", "b", "1.0").build();
        assert_eq!(CardResolver::endpoint_url(&card, "http://addr"), "http://addr");
    }
}
