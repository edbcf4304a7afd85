//! The derived directory/file projection of an accessibility node.

use serde::{Deserialize, Serialize};

use crate::node::{BackendRef, NodeId};

/// One entry in a virtual directory listing.
///
/// Computed on demand from the current `NodeMap`; never persisted and not
/// cached beyond one listing call. `display_name` is unique only among the
/// siblings of the listing that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VfsEntry {
    pub id: NodeId,
    pub display_name: String,
    pub role: String,
    pub is_directory: bool,
    pub value: String,
    pub backend_ref: Option<BackendRef>,
}

impl VfsEntry {
    /// Listing name with the `/` marker directories carry in output.
    pub fn decorated_name(&self) -> String {
        if self.is_directory {
            format!("{}/", self.display_name)
        } else {
            self.display_name.clone()
        }
    }
}
