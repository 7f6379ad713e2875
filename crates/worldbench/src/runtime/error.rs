//! Error types for the runtime module.

use std::error::Error;
use std::fmt;

/// Errors raised while composing the World/System/Node/Action hierarchy.
///
/// Composition failures are programming defects. Callers are expected to
/// fail fast at startup rather than continue with a partial registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    FixtureMismatch {
        action: String,
        index: usize,
        detail: String,
    },
    DuplicateAction { node: String, action: String },
    DuplicateNode { system: String, node: String },
    DuplicateSystem { world: String, system: String },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::FixtureMismatch {
                action,
                index,
                detail,
            } => {
                write!(f, "action {action} fixture {index} failed: {detail}")
            }
            ComposeError::DuplicateAction { node, action } => {
                write!(f, "duplicate action in node {node}: {action}")
            }
            ComposeError::DuplicateNode { system, node } => {
                write!(f, "duplicate node in system {system}: {node}")
            }
            ComposeError::DuplicateSystem { world, system } => {
                write!(f, "duplicate system in world {world}: {system}")
            }
        }
    }
}

impl Error for ComposeError {}

/// Errors raised while routing and executing a single dispatch request.
///
/// Routing failures are fatal to the requested operation, never retried,
/// and surfaced verbatim. A handler failure is propagated unchanged inside
/// the `Handler` variant; the target node's state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    UnknownSystem { system: String },
    UnknownNode { node: String },
    UnknownAction { action: String },
    Handler { action: String, error: ActionError },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownSystem { system } => write!(f, "unknown system: {system}"),
            DispatchError::UnknownNode { node } => write!(f, "unknown node: {node}"),
            DispatchError::UnknownAction { action } => write!(f, "unknown action: {action}"),
            DispatchError::Handler { action, error } => {
                write!(f, "action {action} failed: {error}")
            }
        }
    }
}

impl Error for DispatchError {}

/// A failure raised by an action handler itself, not by the engine.
///
/// `Display` is the bare handler message: fixture error-matching compares it
/// for exact equality, and the user-visible "action X failed" translation
/// wraps it without rewording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    Validation { message: String },
}

impl ActionError {
    pub fn validation(message: impl Into<String>) -> Self {
        ActionError::Validation {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ActionError::Validation { message } => message,
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Validation { message } => write!(f, "{message}"),
        }
    }
}

impl Error for ActionError {}
