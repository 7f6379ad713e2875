use super::*;

#[test]
fn run_action_replaces_state_and_returns_reply() {
    let mut node = bump_node("tally");
    let mut log = NullSink;
    let reply = node
        .run_action("bump", &json!({"amount": 3}), &mut log)
        .expect("dispatch");
    assert_eq!(reply.response, "count is 3");
    assert_eq!(reply.new_state, json!({"count": 3}));
    assert_eq!(node.state(), json!({"count": 3}));
}

#[test]
fn unknown_action_is_routing_error_and_state_unchanged() {
    let mut node = bump_node("tally");
    let mut log = NullSink;
    let err = node
        .run_action("missing", &json!({}), &mut log)
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::UnknownAction {
            action: "missing".to_string(),
        }
    );
    assert_eq!(err.to_string(), "unknown action: missing");
    assert_eq!(node.state(), json!({"count": 0}));
}

#[test]
fn handler_failure_propagates_and_leaves_state_untouched() {
    let mut node = bump_node("tally");
    let mut log = NullSink;
    node.run_action("bump", &json!({"amount": 2}), &mut log)
        .expect("dispatch");

    let err = node
        .run_action("bump", &json!({"amount": 0}), &mut log)
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::Handler {
            action: "bump".to_string(),
            error: ActionError::validation("amount must be positive"),
        }
    );
    assert_eq!(err.to_string(), "action bump failed: amount must be positive");
    assert_eq!(node.state(), json!({"count": 2}));
}

#[test]
fn system_reports_unknown_node() {
    let mut system = System::new("metrics", vec![bump_node("tally")]).expect("system");
    let mut log = NullSink;
    let err = system
        .run_node_action("ghost", "bump", &json!({}), &mut log)
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::UnknownNode {
            node: "ghost".to_string(),
        }
    );
}

#[test]
fn world_reports_unknown_system_and_keeps_states() {
    let mut world = demo_world();
    let mut log = NullSink;
    let err = world
        .run_action("ghost", "tally", "bump", &json!({}), &mut log)
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::UnknownSystem {
            system: "ghost".to_string(),
        }
    );
    assert_eq!(world.state(), json!({"metrics": {"tally": {"count": 0}}}));
}

#[test]
fn world_routes_to_nested_node() {
    let mut world = demo_world();
    let mut log = NullSink;
    let reply = world
        .run_action("metrics", "tally", "bump", &json!({"amount": 4}), &mut log)
        .expect("dispatch");
    assert_eq!(reply.response, "count is 4");
    assert_eq!(world.state(), json!({"metrics": {"tally": {"count": 4}}}));
}

#[test]
fn state_copies_are_isolated_from_the_node() {
    let node = bump_node("tally");
    let mut copy = node.state();
    if let Value::Object(map) = &mut copy {
        map.insert("count".to_string(), json!(999));
        map.insert("junk".to_string(), json!(true));
    }
    assert_eq!(node.state(), json!({"count": 0}));
}

#[test]
fn reply_state_is_isolated_from_the_node() {
    let mut node = bump_node("tally");
    let mut log = NullSink;
    let mut reply = node
        .run_action("bump", &json!({"amount": 1}), &mut log)
        .expect("dispatch");
    if let Value::Object(map) = &mut reply.new_state {
        map.insert("count".to_string(), json!(-7));
    }
    assert_eq!(node.state(), json!({"count": 1}));
}

#[test]
fn set_state_roundtrip_is_a_noop() {
    let mut node = bump_node("tally");
    let before = node.state();
    node.set_state(before.clone());
    assert_eq!(node.state(), before);
}

#[test]
fn reset_restores_construction_state() {
    let mut node = bump_node("tally");
    let mut log = NullSink;
    node.run_action("bump", &json!({"amount": 9}), &mut log)
        .expect("dispatch");
    node.set_state(json!({"count": 123, "junk": "yes"}));

    node.reset();
    assert_eq!(node.state(), json!({"count": 0}));
    assert_eq!(node.state(), node.initial_state());
}

#[test]
fn reply_serializes_in_collaborator_shape() {
    let reply = ActionReply {
        response: "count is 1".to_string(),
        new_state: json!({"count": 1}),
    };
    assert_eq!(
        serde_json::to_value(&reply).expect("serialize"),
        json!({"response": "count is 1", "newState": {"count": 1}})
    );
}
