//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use stage_configurator_lib::command::{execute_json, execute_json_batch};
use stage_configurator_lib::harness::TestHarness;
use stage_configurator_lib::pricing::{BASE_PLYWOOD_RATE, TRUSS_RATE};

fn id_of(resp: &stage_configurator_lib::command::CommandResponse) -> String {
    resp.data.as_ref().unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_command_add_object() {
    let mut h = TestHarness::new();
    let json = r#"{"command": "add_object", "category": "truss", "params": {"width": 10}, "position": [0, 5, 0]}"#;

    let resp = execute_json(&mut h.state, json).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.as_ref().unwrap()["price"], TRUSS_RATE * 10);
    assert_eq!(h.object_count(), 1);
}

#[test]
fn test_command_unknown_category_placeholder() {
    let mut h = TestHarness::new();
    let resp = h
        .execute(r#"{"command": "add_object", "category": "hologram"}"#)
        .unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["category"], "unknown");
    assert!(h.quote().items.is_empty());
}

#[test]
fn test_command_transform_edits() {
    let mut h = TestHarness::new();
    let resp = h
        .execute(r#"{"command": "add_object", "category": "speaker"}"#)
        .unwrap();
    let id = id_of(&resp);

    let cmd = format!(r#"{{"command": "set_position", "id": "{id}", "axis": "y", "value": "-3"}}"#);
    let resp = h.execute(&cmd).unwrap();
    assert_eq!(resp.data.unwrap()["position"][1], 0.0);

    let cmd = format!(r#"{{"command": "set_position", "id": "{id}", "axis": "x", "value": "1.5*2"}}"#);
    let resp = h.execute(&cmd).unwrap();
    assert_eq!(resp.data.unwrap()["position"][0], 3.0);

    let cmd = format!(r#"{{"command": "set_rotation", "id": "{id}", "axis": "y", "value": 180}}"#);
    let resp = h.execute(&cmd).unwrap();
    let r = resp.data.unwrap()["rotation"][1].as_f64().unwrap();
    assert!((r - std::f64::consts::PI).abs() < 1e-9);

    let cmd = format!(r#"{{"command": "set_scale", "id": "{id}", "value": ""}}"#);
    let resp = h.execute(&cmd).unwrap();
    let scale = resp.data.unwrap()["scale"].clone();
    assert!(scale.as_array().unwrap().iter().all(|s| s.as_f64().unwrap() > 0.0));
}

#[test]
fn test_command_update_property_reprices() {
    let mut h = TestHarness::new();
    let resp = h
        .execute(r#"{"command": "add_object", "category": "stage"}"#)
        .unwrap();
    let id = id_of(&resp);
    let cmd = format!(r#"{{"command": "update_property", "id": "{id}", "key": "depth", "value": 2}}"#);
    let resp = h.execute(&cmd).unwrap();
    assert_eq!(resp.data.unwrap()["price"], BASE_PLYWOOD_RATE * 12);
}

#[test]
fn test_command_select_delete_duplicate() {
    let mut h = TestHarness::new();
    let resp = h
        .execute(r#"{"command": "add_object", "category": "chair"}"#)
        .unwrap();
    let id = id_of(&resp);

    let resp = h
        .execute(&format!(r#"{{"command": "select", "id": "{id}"}}"#))
        .unwrap();
    assert!(resp.success);

    let resp = h.execute(r#"{"command": "duplicate"}"#).unwrap();
    let copy = id_of(&resp);
    assert_eq!(h.selected(), Some(copy.as_str()));

    let resp = h.execute(r#"{"command": "delete"}"#).unwrap();
    assert!(resp.success);
    assert!(h.object(&copy).is_none());
    assert!(h.selected().is_none());
    assert_eq!(h.object_count(), 1);
}

#[test]
fn test_command_click_and_tick() {
    let mut h = TestHarness::new();
    let resp = h
        .execute(r#"{"command": "add_object", "category": "camera"}"#)
        .unwrap();
    let id = id_of(&resp);

    h.execute(&format!(r#"{{"command": "click", "id": "{id}", "time_ms": 1000}}"#))
        .unwrap();
    let resp = h.execute(r#"{"command": "tick", "time_ms": 1100}"#).unwrap();
    assert_eq!(resp.data.unwrap()["applied"], false);
    let resp = h.execute(r#"{"command": "tick", "time_ms": 1300}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["applied"], true);
    assert_eq!(data["selected"], id.as_str());
}

#[test]
fn test_command_key_press() {
    let mut h = TestHarness::new();
    h.execute(r#"{"command": "add_object", "category": "lighting"}"#)
        .unwrap();
    let resp = h
        .execute(r#"{"command": "key_press", "key": "z", "ctrl": true, "text_focused": true}"#)
        .unwrap();
    assert!(resp.data.unwrap()["action"].is_null());
    assert_eq!(h.visible_count(), 1);

    let resp = h
        .execute(r#"{"command": "key_press", "key": "z", "ctrl": true}"#)
        .unwrap();
    assert_eq!(resp.data.unwrap()["action"], "undo");
    assert_eq!(h.visible_count(), 0);
}

#[test]
fn test_command_apply_template_twice() {
    let mut h = TestHarness::new();
    let first = h
        .execute(r#"{"command": "apply_template", "template": "proscenium"}"#)
        .unwrap();
    let second = h
        .execute(r#"{"command": "apply_template", "template": "proscenium"}"#)
        .unwrap();
    let n = second.data.unwrap()["count"].as_u64().unwrap() as usize;
    assert_eq!(first.data.unwrap()["count"].as_u64().unwrap() as usize, n);
    assert_eq!(h.object_count(), n);
}

#[test]
fn test_command_unknown_template_rejected() {
    let mut h = TestHarness::new();
    let result = h.execute(r#"{"command": "apply_template", "template": "circus"}"#);
    assert!(result.is_err());
}

#[test]
fn test_command_batch() {
    let mut h = TestHarness::new();
    let json = r#"[
        {"command": "add_object", "category": "stage"},
        {"command": "add_object", "category": "truss", "position": [0, 5, 0]},
        {"command": "undo"},
        {"command": "quote"}
    ]"#;

    let resps = execute_json_batch(&mut h.state, json).unwrap();
    assert_eq!(resps.len(), 4);
    assert!(resps.iter().all(|r| r.success));
    let quote = resps[3].data.as_ref().unwrap();
    assert_eq!(quote["items"].as_array().unwrap().len(), 1);
    assert_eq!(quote["subtotal"], BASE_PLYWOOD_RATE * 24);
}

#[test]
fn test_command_invalid_json() {
    let mut h = TestHarness::new();
    assert!(execute_json(&mut h.state, "{").is_err());
    assert!(execute_json_batch(&mut h.state, r#"{"command": "undo"}"#).is_err());
    assert!(execute_json(&mut h.state, r#"{"command": "teleport"}"#).is_err());
}
