use super::*;

fn always_seven(ctx: ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
    let _ = ctx.state;
    Ok(ActionOutcome {
        state: json!({"value": 7}),
        response: "value is 7".to_string(),
    })
}

fn always_rejects(_ctx: ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
    Err(ActionError::validation("value is required"))
}

fn chatty(ctx: ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
    ctx.log.warning("noise during verification".to_string());
    Ok(ActionOutcome {
        state: ctx.state.clone(),
        response: "done".to_string(),
    })
}

fn seven_action(fixtures: Vec<TestCase>) -> Result<Action, ComposeError> {
    Action::new("seven", IndexMap::new(), Box::new(always_seven), fixtures)
}

fn rejecting_action(fixtures: Vec<TestCase>) -> Result<Action, ComposeError> {
    Action::new("reject", IndexMap::new(), Box::new(always_rejects), fixtures)
}

#[test]
fn matching_fixture_passes_construction() {
    let action = seven_action(vec![TestCase::expect_outcome(
        json!({}),
        json!({}),
        json!({"value": 7}),
        "value is 7",
    )])
    .expect("action");

    let reports = action.test_reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].passed);
    assert_eq!(reports[0].message, "test 1 passed");
    assert_eq!(reports[0].actual, None);
    assert!(action.fixture_summary().all_passed());
}

#[test]
fn state_mismatch_fails_construction() {
    let err = seven_action(vec![TestCase::expect_outcome(
        json!({}),
        json!({}),
        json!({"value": 8}),
        "value is 7",
    )])
    .unwrap_err();
    assert_eq!(
        err,
        ComposeError::FixtureMismatch {
            action: "seven".to_string(),
            index: 1,
            detail: "test 1 failed: output mismatch".to_string(),
        }
    );
}

#[test]
fn response_mismatch_fails_construction() {
    let err = seven_action(vec![TestCase::expect_outcome(
        json!({}),
        json!({}),
        json!({"value": 7}),
        "value is 8",
    )])
    .unwrap_err();
    assert!(matches!(err, ComposeError::FixtureMismatch { index: 1, .. }));
}

#[test]
fn declared_error_fixture_matches_exact_message() {
    let action = rejecting_action(vec![TestCase::expect_error(
        json!({}),
        json!({}),
        "value is required",
    )])
    .expect("action");

    let report = &action.test_reports()[0];
    assert!(report.passed);
    assert_eq!(report.message, "test 1 passed: expected error received");
    assert_eq!(
        report.actual,
        Some(TestActual::Error("value is required".to_string()))
    );
}

#[test]
fn wrong_error_message_fails_construction() {
    let err = rejecting_action(vec![TestCase::expect_error(
        json!({}),
        json!({}),
        "a different message",
    )])
    .unwrap_err();
    assert_eq!(
        err,
        ComposeError::FixtureMismatch {
            action: "reject".to_string(),
            index: 1,
            detail: "test 1 failed: wrong error message".to_string(),
        }
    );
}

#[test]
fn expected_error_but_success_fails_construction() {
    let err = seven_action(vec![TestCase::expect_error(
        json!({}),
        json!({}),
        "value is required",
    )])
    .unwrap_err();
    assert!(matches!(
        err,
        ComposeError::FixtureMismatch { ref detail, .. }
            if detail == "test 1 failed: expected error but got success"
    ));
}

#[test]
fn unexpected_error_fails_construction() {
    let err = rejecting_action(vec![TestCase::expect_outcome(
        json!({}),
        json!({}),
        json!({}),
        "fine",
    )])
    .unwrap_err();
    assert!(matches!(
        err,
        ComposeError::FixtureMismatch { ref detail, .. }
            if detail == "test 1 failed: unexpected error: value is required"
    ));
}

#[test]
fn failure_reports_one_based_fixture_index() {
    let err = seven_action(vec![
        TestCase::expect_outcome(json!({}), json!({}), json!({"value": 7}), "value is 7"),
        TestCase::expect_outcome(json!({}), json!({}), json!({"value": 9}), "value is 7"),
    ])
    .unwrap_err();
    assert!(matches!(err, ComposeError::FixtureMismatch { index: 2, .. }));
}

#[test]
fn fixture_summary_counts_all_fixtures() {
    let action = seven_action(vec![
        TestCase::expect_outcome(json!({}), json!({}), json!({"value": 7}), "value is 7"),
        TestCase::expect_outcome(json!({"x": 1}), json!({}), json!({"value": 7}), "value is 7"),
    ])
    .expect("action");
    let summary = action.fixture_summary();
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total(), 2);
}

#[test]
fn logging_handlers_verify_without_observable_output() {
    let action = Action::new(
        "chatty",
        IndexMap::new(),
        Box::new(chatty),
        vec![TestCase::expect_outcome(
            json!({"a": 1}),
            json!({}),
            json!({"a": 1}),
            "done",
        )],
    )
    .expect("action");
    assert!(action.fixture_summary().all_passed());
}

#[test]
fn test_case_serializes_in_fixture_file_shape() {
    let success = TestCase::expect_outcome(
        json!({"count": 0}),
        json!({"amount": 2}),
        json!({"count": 2}),
        "count is 2",
    );
    assert_eq!(
        serde_json::to_value(&success).expect("serialize"),
        json!({
            "input": {"state": {"count": 0}, "payload": {"amount": 2}},
            "output": {"state": {"count": 2}, "response": "count is 2"},
        })
    );

    let failure = TestCase::expect_error(json!({}), json!({}), "nope");
    assert_eq!(
        serde_json::to_value(&failure).expect("serialize"),
        json!({
            "input": {"state": {}, "payload": {}},
            "output": {"error": "nope"},
        })
    );
}

#[test]
fn test_case_deserializes_both_expectation_shapes() {
    let success: TestCase = serde_json::from_value(json!({
        "input": {"state": {"count": 0}, "payload": {}},
        "output": {"state": {"count": 1}, "response": "ok"},
    }))
    .expect("deserialize success");
    assert!(matches!(success.expect, TestExpectation::Success { .. }));

    let failure: TestCase = serde_json::from_value(json!({
        "input": {"state": {}, "payload": {}},
        "output": {"error": "nope"},
    }))
    .expect("deserialize error");
    assert!(matches!(failure.expect, TestExpectation::Error { .. }));
}
