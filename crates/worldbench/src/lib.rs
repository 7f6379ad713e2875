pub mod runtime;

pub use runtime::{
    Action, ActionContext, ActionError, ActionHandler, ActionOutcome, ActionReply, ActionView,
    ComposeError, DispatchError, FixtureSummary, LogBuffer, LogEntry, LogLevel, LogSink, Node,
    NullSink, ParamKind, ParamSpec, SnapshotError, SnapshotRecord, System, TestActual, TestCase,
    TestExpectation, TestInput, TestReport, World, WorldSnapshot, DEFAULT_LOG_CAPACITY,
};
