//! Accessibility records and the per-ingestion node snapshot.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one accessibility node, unique within one ingestion.
///
/// Ids from sub-frames are prefixed with the frame ordinal (`"2:41"`) so that
/// records merged from multiple frames never collide. The main document
/// (ordinal 0) keeps its raw ids unprefixed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create an id from a raw per-frame id and the frame's merge ordinal.
    pub fn in_frame(frame_ordinal: usize, raw: &str) -> Self {
        if frame_ordinal == 0 {
            Self(raw.to_string())
        } else {
            Self(format!("{frame_ordinal}:{raw}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque handle tying a node to the live document element.
///
/// Carried unmodified from ingestion to the element actuator; the kernel
/// never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendRef(pub serde_json::Value);

/// A sub-frame target reported by the accessibility source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTarget {
    /// Opaque target identifier understood by the source.
    pub target_id: String,
}

/// One accessibility record, parsed strictly at the ingestion boundary.
///
/// Immutable once ingested. `child_ids` may reference nodes that were dropped
/// as ignored; such references simply fail to resolve during traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AXNode {
    pub id: NodeId,
    pub role: String,
    pub name: String,
    pub description: String,
    pub value: String,
    pub child_ids: Vec<NodeId>,
    pub ignored: bool,
    pub backend_ref: Option<BackendRef>,
}

/// The snapshot of all non-ignored nodes from one ingestion.
///
/// Built fresh on every ingestion and replaced wholesale — never patched.
/// Keeps ingestion order alongside the id index because root election falls
/// back to "first node ingested".
#[derive(Debug, Clone, Default)]
pub struct NodeMap {
    nodes: HashMap<NodeId, AXNode>,
    order: Vec<NodeId>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, preserving ingestion order. Later duplicates of the
    /// same id are ignored.
    pub fn insert(&mut self, node: AXNode) {
        if !self.nodes.contains_key(&node.id) {
            self.order.push(node.id.clone());
            self.nodes.insert(node.id.clone(), node);
        }
    }

    pub fn get(&self, id: &NodeId) -> Option<&AXNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Ids in the order the nodes were ingested.
    pub fn ids_in_order(&self) -> impl Iterator<Item = &NodeId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
