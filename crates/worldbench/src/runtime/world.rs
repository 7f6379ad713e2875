//! World: the top-level routing entry point and unit of snapshot/restore.

use indexmap::IndexMap;
use serde_json::Value;

use super::error::{ComposeError, DispatchError};
use super::logging::LogSink;
use super::node::ActionReply;
use super::system::System;

/// A named registry of systems. Ownership is strictly tree-shaped: no
/// system, node, or action is shared across two parents.
#[derive(Debug)]
pub struct World {
    name: String,
    systems: IndexMap<String, System>,
}

impl World {
    pub fn new(name: impl Into<String>, systems: Vec<System>) -> Result<Self, ComposeError> {
        let name = name.into();
        let mut registry = IndexMap::with_capacity(systems.len());
        for system in systems {
            let key = system.name().to_string();
            if registry.insert(key.clone(), system).is_some() {
                return Err(ComposeError::DuplicateSystem { world: name, system: key });
            }
        }
        Ok(Self {
            name,
            systems: registry,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn systems(&self) -> impl Iterator<Item = &System> {
        self.systems.values()
    }

    pub fn system(&self, name: &str) -> Option<&System> {
        self.systems.get(name)
    }

    pub fn system_mut(&mut self, name: &str) -> Option<&mut System> {
        self.systems.get_mut(name)
    }

    /// Nested `{system: {node: state}}` snapshot of the whole world.
    pub fn state(&self) -> Value {
        let mut state = serde_json::Map::new();
        for (name, system) in &self.systems {
            state.insert(name.clone(), system.state());
        }
        Value::Object(state)
    }

    /// Routes `(system, node, action, payload)` down the hierarchy.
    pub fn run_action(
        &mut self,
        system: &str,
        node: &str,
        action: &str,
        payload: &Value,
        log: &mut dyn LogSink,
    ) -> Result<ActionReply, DispatchError> {
        let found = self
            .systems
            .get_mut(system)
            .ok_or_else(|| DispatchError::UnknownSystem {
                system: system.to_string(),
            })?;
        found.run_node_action(node, action, payload, log)
    }
}
