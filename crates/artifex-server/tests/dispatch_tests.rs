mod common;

use common::demo_state;

use artifex_core_types::{CorrelationId, RequestContext};
use artifex_server::dispatch::dispatch;
use artifex_server::{actions, ActionRegistry, RequestEnvelope, ServerConfig};

fn registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    actions::register_all(&mut registry);
    registry
}

fn request(id: &str, action: &str, object_type: Option<&str>, params: serde_json::Value) -> RequestEnvelope {
    RequestEnvelope {
        id: id.to_string(),
        action: action.to_string(),
        object_type: object_type.map(str::to_string),
        parameters: params.as_object().cloned(),
    }
}

fn context(id: &str) -> RequestContext {
    RequestContext::with_correlation_id(CorrelationId::from_string(id.to_string()))
}

// ===== CORRELATION / RESOLUTION =====

#[test]
fn test_response_echoes_request_id() {
    let config = ServerConfig::default();
    let (_backend, state) = demo_state(&config);
    let registry = registry();

    let response = dispatch(
        &registry,
        &state,
        request("corr-7", "Ping", None, serde_json::json!({})),
        context("corr-7"),
    );
    assert_eq!(response.id, "corr-7");
    assert!(response.success);
    assert_eq!(response.data.unwrap()["pong"], serde_json::json!(true));
    assert!(response.processing_time_ms.is_some());
}

#[test]
fn test_action_match_is_case_insensitive() {
    let config = ServerConfig::default();
    let (_backend, state) = demo_state(&config);
    let registry = registry();

    let response = dispatch(
        &registry,
        &state,
        request("x", "pInG", None, serde_json::json!({})),
        context("x"),
    );
    assert!(response.success);
}

#[test]
fn test_unknown_action_is_an_error_response() {
    let config = ServerConfig::default();
    let (_backend, state) = demo_state(&config);
    let registry = registry();

    let response = dispatch(
        &registry,
        &state,
        request("u1", "Frobnicate", None, serde_json::json!({})),
        context("u1"),
    );
    assert_eq!(response.id, "u1");
    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("Unknown action: Frobnicate")
    );
}

// ===== SCENARIOS =====

#[test]
fn test_create_with_missing_required_parameter_has_no_side_effects() {
    let config = ServerConfig::default();
    let (backend, state) = demo_state(&config);
    let registry = registry();

    let response = dispatch(
        &registry,
        &state,
        request("b1", "CreateObject", Some("Report"), serde_json::json!({})),
        context("b1"),
    );
    assert!(!response.success);
    assert!(response
        .error
        .as_deref()
        .unwrap()
        .contains("Required parameter missing: name"));
    assert_eq!(backend.object_count(), 0);

    // A dependent read still reports absence
    let get = dispatch(
        &registry,
        &state,
        request(
            "b2",
            "GetObject",
            Some("Report"),
            serde_json::json!({"name": "r1"}),
        ),
        context("b2"),
    );
    assert!(!get.success);
    assert!(get.error.as_deref().unwrap().contains("Object not found"));
}

#[test]
fn test_inspect_unknown_type_reports_found_false() {
    let config = ServerConfig::default();
    let (_backend, state) = demo_state(&config);
    let registry = registry();

    let response = dispatch(
        &registry,
        &state,
        request(
            "a1",
            "InspectObject",
            Some("Gadget"),
            serde_json::json!({"name": "g1"}),
        ),
        context("a1"),
    );
    // The inspection itself succeeds; absence is data, not transport error
    assert!(response.success);
    let data = response.data.unwrap();
    assert_eq!(data["found"], serde_json::json!(false));
    assert_eq!(data["error"], serde_json::json!("Unknown object type: Gadget"));
}

#[test]
fn test_cascade_delete_is_declared_but_not_implemented() {
    let config = ServerConfig::default();
    let (_backend, state) = demo_state(&config);
    let registry = registry();

    dispatch(
        &registry,
        &state,
        request(
            "c0",
            "CreateObject",
            Some("Report"),
            serde_json::json!({"name": "doomed"}),
        ),
        context("c0"),
    );

    let response = dispatch(
        &registry,
        &state,
        request(
            "c1",
            "DeleteObject",
            Some("Report"),
            serde_json::json!({"name": "doomed", "cascade": true}),
        ),
        context("c1"),
    );
    assert!(!response.success);
    assert!(response
        .error
        .as_deref()
        .unwrap()
        .contains("Not implemented: cascade delete"));

    // Plain delete still works
    let plain = dispatch(
        &registry,
        &state,
        request(
            "c2",
            "DeleteObject",
            Some("Report"),
            serde_json::json!({"name": "doomed"}),
        ),
        context("c2"),
    );
    assert!(plain.success);
    assert_eq!(plain.data.unwrap()["deleted"], serde_json::json!(true));
}

#[test]
fn test_build_pattern_end_to_end() {
    let config = ServerConfig::default();
    let (_backend, state) = demo_state(&config);
    let registry = registry();

    let response = dispatch(
        &registry,
        &state,
        request(
            "d1",
            "BuildPattern",
            None,
            serde_json::json!({
                "pattern": "LoginForm",
                "targetType": "Form",
                "targetName": "login",
            }),
        ),
        context("d1"),
    );
    assert!(response.success, "error: {:?}", response.error);
    let data = response.data.unwrap();
    assert_eq!(data["created"], serde_json::json!(2));
    assert_eq!(data["valid"], serde_json::json!(true));
    assert_eq!(data["partial"], serde_json::json!(false));

    // The built form was persisted with its two elements
    let get = dispatch(
        &registry,
        &state,
        request(
            "d2",
            "GetObject",
            Some("Form"),
            serde_json::json!({"name": "login"}),
        ),
        context("d2"),
    );
    assert!(get.success);
    let form = get.data.unwrap();
    assert_eq!(form["collections"]["Elements"].as_array().unwrap().len(), 2);
}

#[test]
fn test_list_and_get_type_round_trip() {
    let config = ServerConfig::default();
    let (_backend, state) = demo_state(&config);
    let registry = registry();

    let list = dispatch(
        &registry,
        &state,
        request("t1", "ListTypes", None, serde_json::json!({})),
        context("t1"),
    );
    assert!(list.success);
    let names: Vec<String> =
        serde_json::from_value(list.data.unwrap()["types"].clone()).unwrap();
    assert!(names.contains(&"Form".to_string()));

    for name in names {
        let get = dispatch(
            &registry,
            &state,
            request("t2", "GetType", Some(&name), serde_json::json!({})),
            context("t2"),
        );
        assert!(get.success, "GetType {} failed", name);
        assert_eq!(get.data.unwrap()["name"], serde_json::json!(name));
    }
}

#[test]
fn test_get_properties_returns_batched_details() {
    let config = ServerConfig::default();
    let (backend, state) = demo_state(&config);
    let registry = registry();

    for _ in 0..3 {
        let response = dispatch(
            &registry,
            &state,
            request("p1", "GetProperties", Some("Form"), serde_json::json!({})),
            context("p1"),
        );
        assert!(response.success);
        let properties = response.data.unwrap()["properties"].clone();
        assert_eq!(properties.as_array().unwrap().len(), 2);
    }

    // Three calls, one provider round trip
    assert_eq!(backend.detail_call_count(), 1);
}
