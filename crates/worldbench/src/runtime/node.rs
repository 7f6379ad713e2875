//! Node: the unit holding one mutable state value and its action registry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::action::{Action, ActionContext, ActionView};
use super::error::{ComposeError, DispatchError};
use super::logging::LogSink;

/// Result of a successful dispatch, returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionReply {
    pub response: String,
    pub new_state: Value,
}

/// Owns one JSON state value and the actions that may transform it.
///
/// The stored state never aliases values handed out: `state()` returns a
/// deep copy, `set_state` takes ownership of its replacement, and
/// `run_action` replaces the stored value wholesale only after the handler
/// returns successfully.
#[derive(Debug)]
pub struct Node {
    name: String,
    actions: IndexMap<String, Action>,
    initial_state: Value,
    state: Value,
}

impl Node {
    /// Builds a node with its action registry (keyed by action name,
    /// insertion order preserved) and captures `initial_state` for `reset`.
    pub fn new(
        name: impl Into<String>,
        actions: Vec<Action>,
        initial_state: Value,
    ) -> Result<Self, ComposeError> {
        let name = name.into();
        let mut registry = IndexMap::with_capacity(actions.len());
        for action in actions {
            let key = action.name().to_string();
            if registry.insert(key.clone(), action).is_some() {
                return Err(ComposeError::DuplicateAction { node: name, action: key });
            }
        }
        let state = initial_state.clone();
        Ok(Self {
            name,
            actions: registry,
            initial_state,
            state,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Independent copy of the current state.
    pub fn state(&self) -> Value {
        self.state.clone()
    }

    /// Replaces the state wholesale. No validation against any action's
    /// param schema: the schema is documentation, not a state-shape contract.
    pub fn set_state(&mut self, state: Value) {
        self.state = state;
    }

    /// Independent copy of the state captured at construction.
    pub fn initial_state(&self) -> Value {
        self.initial_state.clone()
    }

    /// Restores the state captured at construction.
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Listing consumed by the dynamic request form.
    pub fn action_views(&self) -> Vec<ActionView> {
        self.actions.values().map(Action::view).collect()
    }

    /// Dispatches one action against this node.
    ///
    /// Not transactional across nodes, and deliberately simple within one:
    /// the stored state is replaced only after the handler returns, so a
    /// failing action leaves this node untouched.
    pub fn run_action(
        &mut self,
        action: &str,
        payload: &Value,
        log: &mut dyn LogSink,
    ) -> Result<ActionReply, DispatchError> {
        let found = self
            .actions
            .get(action)
            .ok_or_else(|| DispatchError::UnknownAction {
                action: action.to_string(),
            })?;

        let outcome = found
            .execute(ActionContext {
                state: &self.state,
                payload,
                log,
            })
            .map_err(|error| DispatchError::Handler {
                action: action.to_string(),
                error,
            })?;

        self.state = outcome.state;
        Ok(ActionReply {
            response: outcome.response,
            new_state: self.state.clone(),
        })
    }
}
