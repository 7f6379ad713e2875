//! Character system: experience gain and leveling with handler-side
//! validation.

use indexmap::IndexMap;
use serde_json::{json, Value};
use worldbench::{
    Action, ActionContext, ActionError, ActionOutcome, ComposeError, LogSink, Node, ParamKind,
    ParamSpec, System, TestCase,
};

const VALID_ATTRIBUTES: [&str; 3] = ["strength", "dexterity", "intelligence"];
const EXPERIENCE_PER_LEVEL: i64 = 100;

fn gain_experience(ctx: ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
    let amount = ctx.payload.get("amount").and_then(Value::as_f64);
    let amount = match amount {
        Some(value) if value > 0.0 => value,
        _ => return Err(ActionError::validation("Experience amount must be positive")),
    };
    let source = ctx
        .payload
        .get("source")
        .and_then(Value::as_str)
        .unwrap_or("combat");
    let multiplier = ctx
        .payload
        .get("multiplier")
        .and_then(Value::as_f64)
        .unwrap_or(1.0);

    let gained = (amount * multiplier).round() as i64;
    let current_exp = ctx
        .state
        .get("experience")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let new_exp = current_exp + gained;
    let level = ctx.state.get("level").and_then(Value::as_i64).unwrap_or(1);
    let exp_needed = level * EXPERIENCE_PER_LEVEL;

    ctx.log
        .info(format!("Gained {gained} experience from {source}"));
    if multiplier > 1.0 {
        ctx.log
            .info(format!("Experience multiplier active: {multiplier}x"));
    }
    if new_exp >= exp_needed {
        ctx.log
            .warning(format!("Level up available! ({new_exp}/{exp_needed})"));
    }

    let mut state = ctx.state.clone();
    if let Value::Object(map) = &mut state {
        map.insert("experience".to_string(), json!(new_exp));
    }
    Ok(ActionOutcome {
        state,
        response: format!("Gained {gained} experience ({source}). Total: {new_exp}/{exp_needed}"),
    })
}

fn level_up(ctx: ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
    let stat_points = ctx
        .payload
        .get("statPoints")
        .and_then(Value::as_i64)
        .unwrap_or(1);
    let attribute = ctx
        .payload
        .get("attribute")
        .and_then(Value::as_str)
        .unwrap_or("strength");

    if !VALID_ATTRIBUTES.contains(&attribute) {
        return Err(ActionError::validation(format!(
            "Invalid attribute: {attribute}"
        )));
    }

    let level = ctx.state.get("level").and_then(Value::as_i64).unwrap_or(1);
    let experience = ctx
        .state
        .get("experience")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let exp_needed = level * EXPERIENCE_PER_LEVEL;

    if experience < exp_needed {
        ctx.log.warning(format!(
            "Not enough experience to level up! ({experience}/{exp_needed})"
        ));
        return Err(ActionError::validation(format!(
            "Need {} more experience to level up",
            exp_needed - experience
        )));
    }

    let new_level = level + 1;
    let new_attribute = ctx
        .state
        .get(attribute)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        + stat_points;

    ctx.log
        .info(format!("Character leveled up to {new_level}!"));
    ctx.log
        .info(format!("Increased {attribute} by {stat_points} points"));

    let mut state = ctx.state.clone();
    if let Value::Object(map) = &mut state {
        map.insert("level".to_string(), json!(new_level));
        map.insert("experience".to_string(), json!(experience - exp_needed));
        map.insert(attribute.to_string(), json!(new_attribute));
    }
    Ok(ActionOutcome {
        state,
        response: format!(
            "Leveled up to {new_level} and increased {attribute} to {new_attribute}"
        ),
    })
}

/// `gainExperience`: adds (possibly multiplied) experience to the character.
pub fn gain_experience_action() -> Result<Action, ComposeError> {
    let mut params = IndexMap::new();
    params.insert(
        "amount".to_string(),
        ParamSpec::new(ParamKind::Number, "Amount of experience to gain")
            .required()
            .with_default(json!(50)),
    );
    params.insert(
        "source".to_string(),
        ParamSpec::new(
            ParamKind::String,
            "Source of the experience (quest, combat, training)",
        )
        .with_default(json!("combat")),
    );
    params.insert(
        "multiplier".to_string(),
        ParamSpec::new(ParamKind::Number, "Experience multiplier (events, bonuses)")
            .with_default(json!(1)),
    );

    let fixtures = vec![
        TestCase::expect_outcome(
            json!({"level": 1, "experience": 0}),
            json!({"amount": 50, "source": "quest", "multiplier": 2}),
            json!({"level": 1, "experience": 100}),
            "Gained 100 experience (quest). Total: 100/100",
        ),
        TestCase::expect_outcome(
            json!({"level": 1, "experience": 50}),
            json!({"amount": 25}),
            json!({"level": 1, "experience": 75}),
            "Gained 25 experience (combat). Total: 75/100",
        ),
    ];

    Action::new("gainExperience", params, Box::new(gain_experience), fixtures)
}

/// `levelUp`: spends banked experience to raise the level and one attribute.
pub fn level_up_action() -> Result<Action, ComposeError> {
    let mut params = IndexMap::new();
    params.insert(
        "statPoints".to_string(),
        ParamSpec::new(ParamKind::Number, "Number of stat points to allocate")
            .required()
            .with_default(json!(1)),
    );
    params.insert(
        "attribute".to_string(),
        ParamSpec::new(
            ParamKind::String,
            "Attribute to increase (strength, dexterity, intelligence)",
        )
        .required()
        .with_default(json!("strength")),
    );

    let fixtures = vec![
        TestCase::expect_outcome(
            json!({"level": 1, "experience": 100, "strength": 10}),
            json!({"statPoints": 1, "attribute": "strength"}),
            json!({"level": 2, "experience": 0, "strength": 11}),
            "Leveled up to 2 and increased strength to 11",
        ),
        TestCase::expect_error(
            json!({"level": 1, "experience": 50, "strength": 10}),
            json!({"statPoints": 1, "attribute": "strength"}),
            "Need 50 more experience to level up",
        ),
    ];

    Action::new("levelUp", params, Box::new(level_up), fixtures)
}

pub fn character_node(name: &str) -> Result<Node, ComposeError> {
    Node::new(
        name,
        vec![level_up_action()?, gain_experience_action()?],
        json!({
            "level": 1,
            "experience": 0,
            "strength": 10,
            "dexterity": 10,
            "intelligence": 10,
        }),
    )
}

pub fn character_system() -> Result<System, ComposeError> {
    System::new("character", vec![character_node("character")?])
}
