//! Agent card discovery against a live mock agent.

mod common;

use a2a_host::builders::AgentCardBuilder;
use a2a_host::client::CardResolver;
use a2a_host::error::A2AError;
use a2a_host::types::*;
use common::*;
use serde_json::json;

// ============================================================================
// Construction tests
// ============================================================================

#[test]
fn test_card_resolver_default_construction() {
    let resolver = CardResolver::new();
    let _ = format!("{:?}", resolver);
}

#[test]
fn test_card_resolver_with_reqwest_client() {
    let client = reqwest::Client::new();
    let resolver = CardResolver::with_client(client).with_card_path("/custom/card");
    let _ = format!("{:?}", resolver);
}

// ============================================================================
// Endpoint selection
// ============================================================================

#[test]
fn test_get_a2a_url_case_insensitive() {
    let mut card = AgentCardBuilder::new("TestAgent", "test", "1.0").build();
    card.supported_interfaces.push(AgentInterface {
        url: "http://example.com/rpc".to_string(),
        transport: "jsonrpc".to_string(),
        protocol_version: Some("0.3".to_string()),
    });
    assert_eq!(
        CardResolver::get_a2a_url(&card),
        Some("http://example.com/rpc".to_string())
    );
}

#[test]
fn test_get_a2a_url_ignores_other_transports() {
    let mut card = AgentCardBuilder::new("TestAgent", "test", "1.0").build();
    card.supported_interfaces.push(AgentInterface {
        url: "http://example.com/grpc".to_string(),
        transport: "GRPC".to_string(),
        protocol_version: None,
    });
    assert_eq!(CardResolver::get_a2a_url(&card), None);
}

#[test]
fn test_endpoint_url_falls_back_to_card_url_then_address() {
    let card = AgentCardBuilder::new("TestAgent", "test", "1.0")
        .with_url("http://card.example.com/")
        .build();
    assert_eq!(
        CardResolver::endpoint_url(&card, "http://address.example.com"),
        "http://card.example.com/"
    );

    let bare = AgentCardBuilder::new("TestAgent", "test", "1.0").build();
    assert_eq!(
        CardResolver::endpoint_url(&bare, "http://address.example.com"),
        "http://address.example.com"
    );
}

// ============================================================================
// HTTP resolution
// ============================================================================

#[tokio::test]
async fn test_resolve_from_well_known_path() {
    let server = start_mock_agent_with_card("Weather Agent", true, MockAgent::default()).await;

    let card = CardResolver::new().resolve(&server.base_url).await.unwrap();

    assert_eq!(card.name, "Weather Agent");
    assert!(card.supports_streaming());
    assert_eq!(
        CardResolver::get_a2a_url(&card),
        Some(format!("{}/a2a", server.base_url))
    );
}

#[tokio::test]
async fn test_resolve_tolerates_trailing_slash() {
    let server = start_mock_agent_with_card("Weather Agent", false, MockAgent::default()).await;

    let card = CardResolver::new()
        .resolve(&format!("{}/", server.base_url))
        .await
        .unwrap();
    assert_eq!(card.name, "Weather Agent");
}

#[tokio::test]
async fn test_resolve_falls_back_to_legacy_path() {
    let server = start_mock_agent_with_card(
        "Legacy Agent",
        false,
        MockAgent {
            legacy_card_path: true,
            ..MockAgent::default()
        },
    )
    .await;

    let card = CardResolver::new().resolve(&server.base_url).await.unwrap();
    assert_eq!(card.name, "Legacy Agent");
}

#[tokio::test]
async fn test_custom_path_has_no_fallback() {
    let server = start_mock_agent_with_card("Weather Agent", false, MockAgent::default()).await;

    let err = CardResolver::new()
        .with_card_path("/cards/weather.json")
        .resolve(&server.base_url)
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::Http { status: 404, .. }));
}

#[tokio::test]
async fn test_missing_card_is_http_error() {
    let server = start_mock_agent(MockAgent::default()).await;

    let err = CardResolver::new()
        .resolve(&server.base_url)
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::Http { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_card_is_invalid_json() {
    let server = start_mock_agent(MockAgent {
        card: Some(json!({"name": "half a card"})),
        ..MockAgent::default()
    })
    .await;

    let err = CardResolver::new()
        .resolve(&server.base_url)
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::InvalidJson(_)));
}

#[tokio::test]
async fn test_unreachable_agent_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = CardResolver::new()
        .resolve(&format!("http://{addr}"))
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::Transport(_)));
}
