//! Snapshot persistence: the full World → System → Node → state tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use super::world::World;

// ============================================================================
// Snapshot
// ============================================================================

/// The persisted tree, shaped `{ world: { system: { node: state } } }`.
///
/// Applying a snapshot restores every addressed node via `set_state`.
/// Nodes absent from the snapshot keep their current state; names in the
/// snapshot unknown to the hierarchy are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldSnapshot {
    worlds: IndexMap<String, Value>,
}

impl WorldSnapshot {
    /// Captures the state tree of every given world.
    pub fn capture(worlds: &[&World]) -> Result<Self, SnapshotError> {
        let mut tree = IndexMap::with_capacity(worlds.len());
        for world in worlds {
            let key = world.name().to_string();
            if tree.insert(key.clone(), world.state()).is_some() {
                return Err(SnapshotError::DuplicateWorld { world: key });
            }
        }
        Ok(Self { worlds: tree })
    }

    pub fn worlds(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.worlds.iter().map(|(name, state)| (name.as_str(), state))
    }

    pub fn world_state(&self, world: &str) -> Option<&Value> {
        self.worlds.get(world)
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// Restores every node this snapshot addresses in the given worlds.
    pub fn apply(&self, worlds: &mut [World]) {
        for world in worlds.iter_mut() {
            let Some(world_tree) = self.worlds.get(world.name()) else {
                continue;
            };
            let Some(systems) = world_tree.as_object() else {
                continue;
            };
            for (system_name, system_tree) in systems {
                let Some(system) = world.system_mut(system_name) else {
                    continue;
                };
                let Some(nodes) = system_tree.as_object() else {
                    continue;
                };
                for (node_name, node_state) in nodes {
                    if let Some(node) = system.node_mut(node_name) {
                        node.set_state(node_state.clone());
                    }
                }
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(input: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(input)?;
        if !value.is_object() {
            return Err(SnapshotError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<SnapshotRecord, SnapshotError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(path, data)?;
        self.record()
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// SHA-256 hex of the canonical JSON bytes. Two captures of identical
    /// state trees hash identically.
    pub fn hash(&self) -> Result<String, SnapshotError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(sha256_hex(&bytes))
    }

    /// Export metadata for the save/export view.
    pub fn record(&self) -> Result<SnapshotRecord, SnapshotError> {
        Ok(SnapshotRecord {
            snapshot_hash: self.hash()?,
            worlds: self.worlds.len(),
            nodes: self.count_nodes(),
        })
    }

    fn count_nodes(&self) -> usize {
        let mut nodes = 0;
        for world_tree in self.worlds.values() {
            let Some(systems) = world_tree.as_object() else {
                continue;
            };
            for system_tree in systems.values() {
                if let Some(tree) = system_tree.as_object() {
                    nodes += tree.len();
                }
            }
        }
        nodes
    }
}

/// Metadata surfaced after a snapshot save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub snapshot_hash: String,
    pub worlds: usize,
    pub nodes: usize,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    Io(String),
    Serde(String),
    NotAnObject,
    DuplicateWorld { world: String },
}

impl From<io::Error> for SnapshotError {
    fn from(err: io::Error) -> Self {
        SnapshotError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Serde(err.to_string())
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(message) => write!(f, "snapshot io error: {message}"),
            SnapshotError::Serde(message) => write!(f, "snapshot serde error: {message}"),
            SnapshotError::NotAnObject => write!(f, "snapshot root is not a json object"),
            SnapshotError::DuplicateWorld { world } => {
                write!(f, "duplicate world in snapshot: {world}")
            }
        }
    }
}

impl Error for SnapshotError {}
