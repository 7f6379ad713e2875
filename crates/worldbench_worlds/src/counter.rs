//! Counter system: the minimal increment example.

use indexmap::IndexMap;
use serde_json::{json, Value};
use worldbench::{
    Action, ActionContext, ActionError, ActionOutcome, ComposeError, LogSink, Node, ParamKind,
    ParamSpec, System, TestCase,
};

const DEFAULT_AMOUNT: i64 = 1;
const DEFAULT_MAX_VALUE: i64 = 100;

fn increment(ctx: ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
    let amount = ctx
        .payload
        .get("amount")
        .and_then(Value::as_i64)
        .unwrap_or(DEFAULT_AMOUNT);
    let max_value = ctx
        .payload
        .get("maxValue")
        .and_then(Value::as_i64)
        .unwrap_or(DEFAULT_MAX_VALUE);
    let current = ctx.state.get("count").and_then(Value::as_i64).unwrap_or(0);
    let next = (current + amount).min(max_value);

    ctx.log.info(format!(
        "Counter incremented from {current} to {next} (amount: {amount}, max: {max_value})"
    ));
    if next >= 10 {
        ctx.log.warning("Counter reached double digits!".to_string());
    }
    if next == max_value {
        ctx.log
            .warning(format!("Counter reached maximum value of {max_value}!"));
    }

    let mut state = ctx.state.clone();
    if let Value::Object(map) = &mut state {
        map.insert("count".to_string(), json!(next));
    }
    Ok(ActionOutcome {
        state,
        response: format!("Counter incremented to {next}"),
    })
}

/// `increment`: adds `amount` to `count`, clamped to `maxValue`.
pub fn increment_action() -> Result<Action, ComposeError> {
    let mut params = IndexMap::new();
    params.insert(
        "amount".to_string(),
        ParamSpec::new(ParamKind::Number, "Amount to increment by").with_default(json!(1)),
    );
    params.insert(
        "maxValue".to_string(),
        ParamSpec::new(ParamKind::Number, "Maximum value allowed").with_default(json!(100)),
    );

    let fixtures = vec![
        TestCase::expect_outcome(
            json!({"count": 0}),
            json!({"amount": 3}),
            json!({"count": 3}),
            "Counter incremented to 3",
        ),
        TestCase::expect_outcome(
            json!({"count": 5}),
            json!({"amount": 3}),
            json!({"count": 8}),
            "Counter incremented to 8",
        ),
        TestCase::expect_outcome(
            json!({"count": 0}),
            json!({"amount": 500}),
            json!({"count": 100}),
            "Counter incremented to 100",
        ),
    ];

    Action::new("increment", params, Box::new(increment), fixtures)
}

pub fn counter_node(name: &str) -> Result<Node, ComposeError> {
    Node::new(name, vec![increment_action()?], json!({"count": 0}))
}

pub fn counter_system() -> Result<System, ComposeError> {
    System::new("counter", vec![counter_node("counter")?])
}
