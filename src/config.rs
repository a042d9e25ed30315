//! Host configuration.
//!
//! Everything has a default; [`CoordinatorConfig::from_env`] overlays the
//! environment on top of those defaults.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{A2AError, A2AResult};

/// Comma-separated base URLs of the remote agents to resolve at startup.
pub const ADDRESSES_ENV: &str = "REMOTE_AGENT_ADDRESSES";

/// Per-request timeout for non-streaming calls, in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "A2A_HOST_REQUEST_TIMEOUT_SECS";

/// Idle timeout between stream events, in seconds.
pub const STREAM_IDLE_TIMEOUT_ENV: &str = "A2A_HOST_STREAM_IDLE_TIMEOUT_SECS";

/// How the host reaches its remote agents.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Agent base URLs, resolved in this order.
    pub addresses: Vec<String>,
    /// Total time allowed for one non-streaming request.
    pub request_timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Maximum wait between two events of a stream. `None` waits forever.
    pub stream_idle_timeout: Option<Duration>,
    /// Extra HTTP headers sent with every request.
    pub headers: HashMap<String, String>,
    /// Agent card path overriding the well-known paths.
    pub card_path: Option<String>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            addresses: Vec::new(),
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            stream_idle_timeout: None,
            headers: HashMap::new(),
            card_path: None,
        }
    }
}

impl CoordinatorConfig {
    /// Defaults overlaid with [`ADDRESSES_ENV`], [`REQUEST_TIMEOUT_ENV`] and
    /// [`STREAM_IDLE_TIMEOUT_ENV`].
    pub fn from_env() -> A2AResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> A2AResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ADDRESSES_ENV) {
            config.addresses = parse_addresses(&raw);
        }
        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV) {
            config.request_timeout = parse_secs(REQUEST_TIMEOUT_ENV, &raw)?;
        }
        if let Some(raw) = lookup(STREAM_IDLE_TIMEOUT_ENV) {
            config.stream_idle_timeout = Some(parse_secs(STREAM_IDLE_TIMEOUT_ENV, &raw)?);
        }
        Ok(config)
    }

    /// The transport settings every agent connection shares.
    #[cfg(feature = "client")]
    pub fn transport_config(&self) -> crate::client::TransportConfig {
        crate::client::TransportConfig {
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            headers: self.headers.clone(),
        }
    }
}

/// Split a comma-separated address list, dropping blanks.
pub fn parse_addresses(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_secs(name: &str, raw: &str) -> A2AResult<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| A2AError::Other(format!("invalid {name} value {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_addresses(" http://localhost:10002, ,http://localhost:10003,"),
            vec!["http://localhost:10002", "http://localhost:10003"]
        );
        assert!(parse_addresses("").is_empty());
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = CoordinatorConfig::from_lookup(|key| match key {
            ADDRESSES_ENV => Some("http://a,http://b".to_string()),
            REQUEST_TIMEOUT_ENV => Some("5".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.addresses, vec!["http://a", "http://b"]);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.stream_idle_timeout.is_none());
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = CoordinatorConfig::from_lookup(|key| {
            (key == STREAM_IDLE_TIMEOUT_ENV).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains(STREAM_IDLE_TIMEOUT_ENV));
    }
}
