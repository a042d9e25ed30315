//! Builder patterns for ergonomic construction of host types.

use std::sync::Arc;
use std::time::Duration;

use crate::config::CoordinatorConfig;
use crate::connection::{CallbackError, TaskCallback};
use crate::coordinator::HostCoordinator;
use crate::error::A2AResult;
use crate::registry::{AgentDirectory, AgentRegistry};
use crate::types::*;

/// Builder for constructing [`AgentCard`] with sensible defaults.
///
/// # Example
///
/// ```
/// use a2a_host::builders::AgentCardBuilder;
///
/// let card = AgentCardBuilder::new("Planner", "Plans trips", "1.0.0")
///     .with_jsonrpc_interface("http://localhost:10003/")
///     .with_skill("plan", "Plan", "Plans a trip", vec!["travel".to_string()])
///     .with_streaming(true)
///     .build();
/// assert!(card.supports_streaming());
/// ```
#[derive(Debug, Clone)]
pub struct AgentCardBuilder {
    name: String,
    description: String,
    version: String,
    supported_interfaces: Vec<AgentInterface>,
    provider: Option<AgentProvider>,
    documentation_url: Option<String>,
    capabilities: AgentCapabilities,
    default_input_modes: Vec<String>,
    default_output_modes: Vec<String>,
    skills: Vec<AgentSkill>,
    preferred_transport: Option<String>,
    protocol_version: Option<String>,
    url: String,
}

impl AgentCardBuilder {
    /// Create a new builder with required fields.
    ///
    /// # Arguments
    ///
    /// * `name` - Agent name, unique within a registry
    /// * `description` - Description of agent capabilities
    /// * `version` - Version string (e.g., "1.0.0")
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: version.into(),
            supported_interfaces: Vec::new(),
            provider: None,
            documentation_url: None,
            capabilities: AgentCapabilities::default(),
            default_input_modes: vec!["text/plain".to_string()],
            default_output_modes: vec!["text/plain".to_string()],
            skills: Vec::new(),
            preferred_transport: None,
            protocol_version: Some("0.3".to_string()),
            url: String::new(),
        }
    }

    /// Set the card's primary URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Add a JSON-RPC interface at the given URL.
    ///
    /// Also becomes the card's primary URL when none is set yet.
    pub fn with_jsonrpc_interface(mut self, url: impl Into<String>) -> Self {
        let url_str = url.into();
        self.supported_interfaces.push(AgentInterface {
            url: url_str.clone(),
            transport: "JSONRPC".to_string(),
            protocol_version: Some("0.3".to_string()),
        });
        if self.url.is_empty() {
            self.url = url_str;
        }
        self
    }

    /// Set the provider information.
    pub fn with_provider(
        mut self,
        organization: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.provider = Some(AgentProvider {
            organization: organization.into(),
            url: url.into(),
        });
        self
    }

    /// Set the documentation URL.
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Enable or disable streaming support.
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.capabilities.streaming = Some(enabled);
        self
    }

    /// Enable or disable push notifications support.
    pub fn with_push_notifications(mut self, enabled: bool) -> Self {
        self.capabilities.push_notifications = Some(enabled);
        self
    }

    /// Add a skill to the agent card.
    pub fn with_skill(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        self.skills.push(AgentSkill {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags,
            examples: None,
        });
        self
    }

    /// Set the default input MIME types.
    pub fn with_input_modes(mut self, modes: Vec<String>) -> Self {
        self.default_input_modes = modes;
        self
    }

    /// Set the default output MIME types.
    pub fn with_output_modes(mut self, modes: Vec<String>) -> Self {
        self.default_output_modes = modes;
        self
    }

    /// Set the preferred transport protocol.
    pub fn with_preferred_transport(mut self, transport: impl Into<String>) -> Self {
        self.preferred_transport = Some(transport.into());
        self
    }

    /// Build the [`AgentCard`].
    pub fn build(self) -> AgentCard {
        AgentCard {
            name: self.name,
            description: self.description,
            version: self.version,
            supported_interfaces: self.supported_interfaces,
            provider: self.provider,
            documentation_url: self.documentation_url,
            capabilities: self.capabilities,
            security_schemes: None,
            default_input_modes: self.default_input_modes,
            default_output_modes: self.default_output_modes,
            skills: self.skills,
            preferred_transport: self.preferred_transport,
            protocol_version: self.protocol_version,
            url: self.url,
        }
    }
}

/// Builder for a [`HostCoordinator`] with its registry already resolved.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use a2a_host::builders::CoordinatorBuilder;
/// use std::time::Duration;
///
/// let coordinator = CoordinatorBuilder::new()
///     .with_address("http://localhost:10002")
///     .with_address("http://localhost:10003")
///     .with_request_timeout(Duration::from_secs(30))
///     .with_callback(|update, card| {
///         println!("{}: {:?}", card.name, update.status().map(|s| s.state));
///         Ok(())
///     })
///     .build()
///     .await?;
/// println!("{:?}", coordinator.list_agents());
/// # Ok(())
/// # }
/// ```
pub struct CoordinatorBuilder {
    config: CoordinatorConfig,
    callback: Option<TaskCallback>,
    directory: Option<Arc<dyn AgentDirectory>>,
}

impl std::fmt::Debug for CoordinatorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinatorBuilder")
            .field("config", &self.config)
            .field("callback", &self.callback.is_some())
            .field("custom_directory", &self.directory.is_some())
            .finish()
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinatorBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::from_config(CoordinatorConfig::default())
    }

    /// Start from an existing configuration.
    pub fn from_config(config: CoordinatorConfig) -> Self {
        Self {
            config,
            callback: None,
            directory: None,
        }
    }

    /// Add a remote agent base URL.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.config.addresses.push(address.into());
        self
    }

    /// Add several remote agent base URLs.
    pub fn with_addresses<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .addresses
            .extend(addresses.into_iter().map(Into::into));
        self
    }

    /// Set the per-request timeout for non-streaming calls.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Fail a stream that stays silent for longer than `idle`.
    pub fn with_stream_idle_timeout(mut self, idle: Duration) -> Self {
        self.config.stream_idle_timeout = Some(idle);
        self
    }

    /// Add a custom HTTP header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Add an Authorization header with a bearer token.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", token.into()),
        );
        self
    }

    /// Fetch agent cards from `path` instead of the well-known paths.
    pub fn with_card_path(mut self, path: impl Into<String>) -> Self {
        self.config.card_path = Some(path.into());
        self
    }

    /// Observe every task update of every dispatch.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&TaskUpdate, &AgentCard) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Resolve agents through `directory` instead of HTTP.
    pub fn with_directory(mut self, directory: Arc<dyn AgentDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Resolve every configured address and build the coordinator.
    ///
    /// Addresses that fail to resolve are logged and skipped.
    pub async fn build(self) -> A2AResult<HostCoordinator> {
        let directory = match self.directory {
            Some(directory) => directory,
            None => default_directory(&self.config)?,
        };

        let mut registry =
            AgentRegistry::new(directory).with_resolve_timeout(self.config.request_timeout);
        if let Some(idle) = self.config.stream_idle_timeout {
            registry = registry.with_stream_idle_timeout(idle);
        }
        let registered = registry.resolve_all(self.config.addresses.as_slice()).await;
        tracing::info!(
            registered,
            configured = self.config.addresses.len(),
            "remote agents resolved"
        );

        Ok(HostCoordinator::new(registry, self.callback))
    }
}

#[cfg(feature = "client")]
fn default_directory(config: &CoordinatorConfig) -> A2AResult<Arc<dyn AgentDirectory>> {
    let mut directory = crate::registry::HttpAgentDirectory::new(&config.transport_config());
    if let Some(path) = &config.card_path {
        directory = directory.with_card_path(path.clone());
    }
    Ok(Arc::new(directory))
}

#[cfg(not(feature = "client"))]
fn default_directory(_config: &CoordinatorConfig) -> A2AResult<Arc<dyn AgentDirectory>> {
    Err(crate::error::A2AError::Other(
        "no agent directory configured; enable the `client` feature or call with_directory()"
            .to_string(),
    ))
}
