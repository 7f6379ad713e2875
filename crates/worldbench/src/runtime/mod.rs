//! Runtime module - the dispatch and self-verifying registry engine.
//!
//! This module contains the containment hierarchy and all supporting types
//! for:
//! - The World → System → Node → Action routing chain
//! - The action contract and construction-time fixture verification
//! - Log capture (the sanctioned handler side channel)
//! - Snapshot persistence of the full state tree

mod action;
mod error;
mod logging;
mod node;
mod snapshot;
mod system;
mod world;

#[cfg(test)]
mod tests;

// Re-export all public types

// Action contract and fixture harness
pub use action::{
    Action, ActionContext, ActionHandler, ActionOutcome, ActionView, FixtureSummary, ParamKind,
    ParamSpec, TestActual, TestCase, TestExpectation, TestInput, TestReport,
};

// Errors
pub use error::{ActionError, ComposeError, DispatchError};

// Log capture
pub use logging::{LogBuffer, LogEntry, LogLevel, LogSink, NullSink, DEFAULT_LOG_CAPACITY};

// Node
pub use node::{ActionReply, Node};

// Snapshot persistence
pub use snapshot::{SnapshotError, SnapshotRecord, WorldSnapshot};

// System
pub use system::System;

// World
pub use world::World;
