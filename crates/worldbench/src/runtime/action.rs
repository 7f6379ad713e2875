//! Action contract and construction-time fixture verification.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::error::{ActionError, ComposeError};
use super::logging::{LogSink, NullSink};

// ============================================================================
// Parameter schema
// ============================================================================

/// Advisory payload field type.
///
/// Documentation and default-payload generation only; the engine never
/// enforces it. Payload validation is the handler's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Number,
    String,
    Boolean,
    Object,
    Array,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Number => "number",
            ParamKind::String => "string",
            ParamKind::Boolean => "boolean",
            ParamKind::Object => "object",
            ParamKind::Array => "array",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one payload field of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            required: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

// ============================================================================
// Handler contract
// ============================================================================

/// Input handed to an action handler: the node's current state, the caller's
/// payload, and the log sink (the only sanctioned side channel).
pub struct ActionContext<'a> {
    pub state: &'a Value,
    pub payload: &'a Value,
    pub log: &'a mut dyn LogSink,
}

/// Successful handler result: the replacement state and a display response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub state: Value,
    pub response: String,
}

/// A pure state transformer. It must not read or write anything outside its
/// context and must return a fresh state value rather than mutate its input.
pub type ActionHandler = Box<dyn Fn(ActionContext<'_>) -> Result<ActionOutcome, ActionError>>;

// ============================================================================
// Fixtures
// ============================================================================

/// Input half of a fixture: the state/payload handed to the handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestInput {
    pub state: Value,
    pub payload: Value,
}

/// Expected outcome of a fixture run: either a concrete success or a
/// declared handler error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestExpectation {
    Error { error: String },
    Success { state: Value, response: String },
}

/// A construction-time self-check: input plus the declared expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: TestInput,
    #[serde(rename = "output")]
    pub expect: TestExpectation,
}

impl TestCase {
    /// Fixture expecting a successful run with exactly this state/response.
    pub fn expect_outcome(
        state: Value,
        payload: Value,
        expected_state: Value,
        response: impl Into<String>,
    ) -> Self {
        Self {
            input: TestInput { state, payload },
            expect: TestExpectation::Success {
                state: expected_state,
                response: response.into(),
            },
        }
    }

    /// Fixture expecting the handler to fail with exactly this message.
    pub fn expect_error(state: Value, payload: Value, error: impl Into<String>) -> Self {
        Self {
            input: TestInput { state, payload },
            expect: TestExpectation::Error {
                error: error.into(),
            },
        }
    }
}

/// What the handler actually produced when a fixture ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TestActual {
    Outcome(ActionOutcome),
    Error(String),
}

/// Verification verdict for one fixture, computed once at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub passed: bool,
    pub message: String,
    #[serde(rename = "testCase")]
    pub case: TestCase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<TestActual>,
}

/// Aggregate pass/fail counts over an action's fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixtureSummary {
    pub passed: usize,
    pub failed: usize,
}

impl FixtureSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

// ============================================================================
// Action
// ============================================================================

/// Serializable listing of an action for the dynamic request form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionView {
    pub name: String,
    pub params: IndexMap<String, ParamSpec>,
    pub default_payload: Value,
}

/// A named, schema-described, pure state transformer with embedded fixtures.
///
/// Immutable after construction. Construction verifies every fixture against
/// the handler and fails with [`ComposeError::FixtureMismatch`] on the first
/// disagreement, so a malformed action never reaches a registry.
pub struct Action {
    name: String,
    params: IndexMap<String, ParamSpec>,
    handler: ActionHandler,
    fixtures: Vec<TestCase>,
    reports: Vec<TestReport>,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("fixtures", &self.fixtures.len())
            .finish_non_exhaustive()
    }
}

impl Action {
    pub fn new(
        name: impl Into<String>,
        params: IndexMap<String, ParamSpec>,
        handler: ActionHandler,
        fixtures: Vec<TestCase>,
    ) -> Result<Self, ComposeError> {
        let name = name.into();
        let reports = verify_fixtures(&handler, &fixtures);
        if let Some((index, report)) = reports.iter().enumerate().find(|(_, r)| !r.passed) {
            return Err(ComposeError::FixtureMismatch {
                action: name,
                index: index + 1,
                detail: report.message.clone(),
            });
        }
        Ok(Self {
            name,
            params,
            handler,
            fixtures,
            reports,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &IndexMap<String, ParamSpec> {
        &self.params
    }

    pub fn fixtures(&self) -> &[TestCase] {
        &self.fixtures
    }

    /// Per-fixture verification reports, computed once at construction.
    pub fn test_reports(&self) -> &[TestReport] {
        &self.reports
    }

    pub fn fixture_summary(&self) -> FixtureSummary {
        let mut summary = FixtureSummary::default();
        for report in &self.reports {
            if report.passed {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
        }
        summary
    }

    /// One entry per declared param: the declared default, or JSON null.
    pub fn default_payload(&self) -> Value {
        let mut payload = serde_json::Map::new();
        for (name, param) in &self.params {
            payload.insert(name.clone(), param.default.clone().unwrap_or(Value::Null));
        }
        Value::Object(payload)
    }

    pub fn view(&self) -> ActionView {
        ActionView {
            name: self.name.clone(),
            params: self.params.clone(),
            default_payload: self.default_payload(),
        }
    }

    /// Invokes the handler verbatim. Errors are not trapped here;
    /// propagation is the caller's responsibility.
    pub fn execute(&self, ctx: ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        (self.handler)(ctx)
    }
}

// ============================================================================
// Fixture verification
// ============================================================================

fn verify_fixtures(handler: &ActionHandler, fixtures: &[TestCase]) -> Vec<TestReport> {
    fixtures
        .iter()
        .enumerate()
        .map(|(index, case)| run_fixture(handler, index, case))
        .collect()
}

/// Runs one fixture against copies of its declared input, never a live node.
/// Log output goes to a [`NullSink`]: verification has no observable side
/// effects.
fn run_fixture(handler: &ActionHandler, index: usize, case: &TestCase) -> TestReport {
    let number = index + 1;
    let mut sink = NullSink;
    let result = handler(ActionContext {
        state: &case.input.state,
        payload: &case.input.payload,
        log: &mut sink,
    });

    match (result, &case.expect) {
        (Ok(outcome), TestExpectation::Error { .. }) => TestReport {
            passed: false,
            message: format!("test {number} failed: expected error but got success"),
            case: case.clone(),
            actual: Some(TestActual::Outcome(outcome)),
        },
        (Ok(outcome), TestExpectation::Success { state, response }) => {
            if outcome.state == *state && outcome.response == *response {
                TestReport {
                    passed: true,
                    message: format!("test {number} passed"),
                    case: case.clone(),
                    actual: None,
                }
            } else {
                TestReport {
                    passed: false,
                    message: format!("test {number} failed: output mismatch"),
                    case: case.clone(),
                    actual: Some(TestActual::Outcome(outcome)),
                }
            }
        }
        (Err(raised), TestExpectation::Error { error }) => {
            let message = raised.to_string();
            if message == *error {
                TestReport {
                    passed: true,
                    message: format!("test {number} passed: expected error received"),
                    case: case.clone(),
                    actual: Some(TestActual::Error(message)),
                }
            } else {
                TestReport {
                    passed: false,
                    message: format!("test {number} failed: wrong error message"),
                    case: case.clone(),
                    actual: Some(TestActual::Error(message)),
                }
            }
        }
        (Err(raised), TestExpectation::Success { .. }) => TestReport {
            passed: false,
            message: format!("test {number} failed: unexpected error: {raised}"),
            case: case.clone(),
            actual: Some(TestActual::Error(raised.to_string())),
        },
    }
}
