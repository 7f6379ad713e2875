//! System: a named registry of nodes within a world.

use indexmap::IndexMap;
use serde_json::Value;

use super::error::{ComposeError, DispatchError};
use super::logging::LogSink;
use super::node::{ActionReply, Node};

/// Routes an action request to the right node and owns its nodes
/// exclusively.
#[derive(Debug)]
pub struct System {
    name: String,
    nodes: IndexMap<String, Node>,
}

impl System {
    pub fn new(name: impl Into<String>, nodes: Vec<Node>) -> Result<Self, ComposeError> {
        let name = name.into();
        let mut registry = IndexMap::with_capacity(nodes.len());
        for node in nodes {
            let key = node.name().to_string();
            if registry.insert(key.clone(), node).is_some() {
                return Err(ComposeError::DuplicateNode { system: name, node: key });
            }
        }
        Ok(Self {
            name,
            nodes: registry,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.get_mut(name)
    }

    /// Nested `{node: state}` snapshot, copying every owned node's state.
    /// Display/export only; never a live view.
    pub fn state(&self) -> Value {
        let mut state = serde_json::Map::new();
        for (name, node) in &self.nodes {
            state.insert(name.clone(), node.state());
        }
        Value::Object(state)
    }

    pub fn run_node_action(
        &mut self,
        node: &str,
        action: &str,
        payload: &Value,
        log: &mut dyn LogSink,
    ) -> Result<ActionReply, DispatchError> {
        let found = self
            .nodes
            .get_mut(node)
            .ok_or_else(|| DispatchError::UnknownNode {
                node: node.to_string(),
            })?;
        found.run_action(action, payload, log)
    }
}
