//! Tests for the runtime module.

use indexmap::IndexMap;
use serde_json::{json, Value};

use super::*;

fn bump(ctx: ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
    let amount = ctx.payload.get("amount").and_then(Value::as_i64).unwrap_or(1);
    if amount <= 0 {
        return Err(ActionError::validation("amount must be positive"));
    }
    let current = ctx.state.get("count").and_then(Value::as_i64).unwrap_or(0);
    let next = current + amount;
    ctx.log.info(format!("count bumped to {next}"));
    let mut state = ctx.state.clone();
    if let Value::Object(map) = &mut state {
        map.insert("count".to_string(), json!(next));
    }
    Ok(ActionOutcome {
        state,
        response: format!("count is {next}"),
    })
}

fn echo(ctx: ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
    Ok(ActionOutcome {
        state: ctx.state.clone(),
        response: "ok".to_string(),
    })
}

pub(super) fn bump_action() -> Action {
    let mut params = IndexMap::new();
    params.insert(
        "amount".to_string(),
        ParamSpec::new(ParamKind::Number, "amount to add").with_default(json!(1)),
    );
    let fixtures = vec![
        TestCase::expect_outcome(
            json!({"count": 0}),
            json!({"amount": 2}),
            json!({"count": 2}),
            "count is 2",
        ),
        TestCase::expect_error(
            json!({"count": 0}),
            json!({"amount": 0}),
            "amount must be positive",
        ),
    ];
    Action::new("bump", params, Box::new(bump), fixtures).expect("bump action")
}

pub(super) fn named_action(name: &str) -> Action {
    Action::new(name, IndexMap::new(), Box::new(echo), Vec::new()).expect("echo action")
}

pub(super) fn bump_node(name: &str) -> Node {
    Node::new(name, vec![bump_action()], json!({"count": 0})).expect("node")
}

pub(super) fn demo_world() -> World {
    let system = System::new("metrics", vec![bump_node("tally")]).expect("system");
    World::new("bench", vec![system]).expect("world")
}

mod dispatch;
mod fixtures;
