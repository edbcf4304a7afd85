//! The tree-to-filesystem projection.
//!
//! A [`VfsMapper`] is an immutable view over one ingestion's `NodeMap`:
//! classification, naming, wrapper flattening, and sibling dedup all happen
//! per listing call. Nothing here is cached between calls — the kernel swaps
//! the whole mapper on refresh, which gives snapshot isolation without
//! incremental diffing.

pub mod naming;
pub mod roles;

use axsh_types::{AXNode, NodeId, NodeMap, VfsEntry};

/// Immutable directory/file view over one ingested node snapshot.
#[derive(Debug)]
pub struct VfsMapper {
    map: NodeMap,
    root: NodeId,
}

impl VfsMapper {
    pub fn new(map: NodeMap, root: NodeId) -> Self {
        Self { map, root }
    }

    pub fn root(&self) -> &NodeId {
        &self.root
    }

    pub fn node(&self, id: &NodeId) -> Option<&AXNode> {
        self.map.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.map.contains(id)
    }

    /// Directory if the role is a container role, or if the node has any
    /// child and its role is not interactive. A childless non-container
    /// node, or any interactive node, is a file.
    pub fn is_directory(node: &AXNode) -> bool {
        roles::is_container(&node.role)
            || (!node.child_ids.is_empty() && !roles::is_interactive(&node.role))
    }

    /// List a parent's children as virtual entries.
    ///
    /// Children are walked in original order; references to dropped
    /// (ignored) nodes are treated as absent; anonymous generic wrappers are
    /// flattened one level; survivors are named and then deduplicated.
    pub fn list_children(&self, parent: &NodeId) -> Vec<VfsEntry> {
        let Some(parent_node) = self.map.get(parent) else {
            return Vec::new();
        };

        let mut entries: Vec<VfsEntry> = parent_node
            .child_ids
            .iter()
            .filter_map(|id| self.map.get(id))
            .map(|child| self.flatten(child))
            .map(|node| self.entry_for(node))
            .collect();

        naming::deduplicate(&mut entries);
        entries
    }

    /// Exact-match lookup of one child by display name. Linear scan over the
    /// listing; no prefix or fuzzy matching at this layer.
    pub fn find_child(&self, parent: &NodeId, name: &str) -> Option<VfsEntry> {
        self.list_children(parent)
            .into_iter()
            .find(|e| e.display_name == name)
    }

    /// Elide one level of semantically-empty wrapper: a directory-classified
    /// `generic` with no accessible name and exactly one resolvable child is
    /// replaced by that child at the same listing position.
    ///
    /// One level per listing call. Chains of wrappers still resolve because
    /// every nested `list_children` call reapplies the rule.
    fn flatten<'a>(&'a self, child: &'a AXNode) -> &'a AXNode {
        if !child.role.eq_ignore_ascii_case("generic")
            || !child.name.is_empty()
            || !Self::is_directory(child)
        {
            return child;
        }
        let mut resolvable = child.child_ids.iter().filter_map(|id| self.map.get(id));
        match (resolvable.next(), resolvable.next()) {
            (Some(only), None) => only,
            _ => child,
        }
    }

    fn entry_for(&self, node: &AXNode) -> VfsEntry {
        VfsEntry {
            id: node.id.clone(),
            display_name: naming::generate_name(node),
            role: node.role.clone(),
            is_directory: Self::is_directory(node),
            value: node.value.clone(),
            backend_ref: node.backend_ref.clone(),
        }
    }
}
