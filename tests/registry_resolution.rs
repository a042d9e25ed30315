//! Resolving agent addresses into a registry.

mod common;

use std::sync::Arc;
use std::time::Duration;

use a2a_host::registry::{AgentRegistry, AgentSummary};
use common::*;

fn endpoint() -> Arc<ScriptedEndpoint> {
    Arc::new(ScriptedEndpoint::new())
}

#[tokio::test]
async fn test_resolve_all_skips_unreachable_addresses() {
    let directory = Arc::new(
        MockDirectory::new()
            .with_agent(
                "http://weather",
                agent_card("Weather Agent", "http://weather/a2a", true),
                endpoint(),
            )
            .with_agent(
                "http://airbnb",
                agent_card("Airbnb Agent", "http://airbnb/a2a", false),
                endpoint(),
            ),
    );
    let registry = AgentRegistry::new(directory.clone());

    let registered = registry
        .resolve_all(&["http://weather", "http://down", "http://airbnb"])
        .await;

    assert_eq!(registered, 2);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.names(), vec!["Airbnb Agent", "Weather Agent"]);
    assert!(registry.get("Weather Agent").unwrap().supports_streaming());
    assert_eq!(
        registry.get("Airbnb Agent").unwrap().address(),
        "http://airbnb"
    );
    assert_eq!(directory.resolved().len(), 3);
}

#[tokio::test]
async fn test_stalled_address_times_out_without_blocking_others() {
    let directory = Arc::new(
        MockDirectory::new()
            .with_stalled("http://hung")
            .with_agent(
                "http://weather",
                agent_card("Weather Agent", "http://weather/a2a", true),
                endpoint(),
            ),
    );
    let registry =
        AgentRegistry::new(directory).with_resolve_timeout(Duration::from_millis(100));

    let registered = tokio::time::timeout(
        Duration::from_secs(5),
        registry.resolve_all(&["http://hung", "http://weather"]),
    )
    .await
    .expect("resolve_all finished");

    assert_eq!(registered, 1);
    assert_eq!(registry.names(), vec!["Weather Agent"]);
}

#[tokio::test]
async fn test_empty_address_list() {
    let registry = AgentRegistry::new(Arc::new(MockDirectory::new()));
    let registered = registry.resolve_all::<&str>(&[]).await;
    assert_eq!(registered, 0);
    assert!(registry.is_empty());
    assert!(registry.list_agents().is_empty());
}

#[tokio::test]
async fn test_later_address_wins_on_duplicate_name() {
    let directory = Arc::new(
        MockDirectory::new()
            .with_agent(
                "http://first",
                agent_card("Planner", "http://first/a2a", false),
                endpoint(),
            )
            .with_agent(
                "http://second",
                agent_card("Planner", "http://second/a2a", true),
                endpoint(),
            ),
    );
    let registry = AgentRegistry::new(directory);

    let registered = registry
        .resolve_all(&["http://first".to_string(), "http://second".to_string()])
        .await;

    assert_eq!(registered, 2);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("Planner").unwrap().address(), "http://second");
}

#[tokio::test]
async fn test_list_agents_reports_name_and_description() {
    let directory = Arc::new(MockDirectory::new().with_agent(
        "http://weather",
        agent_card("Weather Agent", "http://weather/a2a", true),
        endpoint(),
    ));
    let registry = AgentRegistry::new(directory);
    registry.resolve_all(&["http://weather"]).await;

    assert_eq!(
        registry.list_agents(),
        vec![AgentSummary {
            name: "Weather Agent".to_string(),
            description: "Weather Agent for testing".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_register_replaces_connection_but_keeps_old_one_alive() {
    let directory = Arc::new(
        MockDirectory::new()
            .with_agent(
                "http://old",
                agent_card("Planner", "http://old/a2a", false),
                endpoint(),
            )
            .with_agent(
                "http://new",
                agent_card("Planner", "http://new/a2a", false),
                endpoint(),
            ),
    );
    let registry = AgentRegistry::new(directory);

    let old = registry
        .register(agent_card("Planner", "http://old/a2a", false), "http://old")
        .unwrap();
    registry
        .register(agent_card("Planner", "http://new/a2a", false), "http://new")
        .unwrap();

    assert_eq!(registry.get("Planner").unwrap().address(), "http://new");
    // Holders of the previous connection can still use it.
    assert_eq!(old.address(), "http://old");
}

#[tokio::test]
async fn test_register_fails_when_directory_cannot_connect() {
    let registry = AgentRegistry::new(Arc::new(MockDirectory::new()));
    let result = registry.register(
        agent_card("Ghost", "http://ghost/a2a", false),
        "http://ghost",
    );
    assert!(result.is_err());
    assert!(registry.get("Ghost").is_none());
}
