//! Execution context passed to tools.
//!
//! The context owns the ShellState of one attached session: the working
//! directory as parallel id/name vectors, the environment map, the current
//! VFS snapshot, and the actuator handle. The kernel swaps the snapshot
//! wholesale on refresh; tools never see a partially-replaced tree.

use std::collections::HashMap;
use std::sync::Arc;

use axsh_types::{NodeId, ShellError, VfsEntry};

use crate::source::ElementActuator;
use crate::vfs::VfsMapper;

/// Result of resolving a textual path without mutating the CWD.
#[derive(Debug, Clone)]
pub struct ResolvedPath {
    /// Node ids from root to the target, inclusive.
    pub ids: Vec<NodeId>,
    /// Parallel display names; `names[0]` is the `/` root marker.
    pub names: Vec<String>,
    /// The target's listing entry. `None` when the target is the root
    /// directory itself, which never appears in any listing.
    pub entry: Option<VfsEntry>,
}

impl ResolvedPath {
    pub fn target(&self) -> &NodeId {
        // ids always contains at least the root
        &self.ids[self.ids.len() - 1]
    }

    pub fn is_directory(&self) -> bool {
        self.entry.as_ref().is_none_or(|e| e.is_directory)
    }

    /// Rendered path: `/` for root, `/a/b` otherwise.
    pub fn rendered(&self) -> String {
        render_path(&self.names)
    }
}

/// Join CWD-style name vectors: bare root renders as `/`.
pub(crate) fn render_path(names: &[String]) -> String {
    if names.len() <= 1 {
        "/".to_string()
    } else {
        format!("/{}", names[1..].join("/"))
    }
}

/// Execution context for one attached session.
pub struct ExecContext {
    /// Current VFS snapshot.
    pub vfs: Arc<VfsMapper>,
    /// Working directory, root to current node.
    pub cwd: Vec<NodeId>,
    /// Display names parallel to `cwd`; `cwd_names[0]` is always `/`.
    pub cwd_names: Vec<String>,
    /// Environment bindings (`env` / `export`).
    pub env: HashMap<String, String>,
    /// Element actuator for delegated commands.
    pub actuator: Arc<dyn ElementActuator>,
}

impl ExecContext {
    /// Create a context rooted at the snapshot's root.
    pub fn new(vfs: Arc<VfsMapper>, actuator: Arc<dyn ElementActuator>) -> Self {
        let root = vfs.root().clone();
        Self {
            vfs,
            cwd: vec![root],
            cwd_names: vec!["/".to_string()],
            env: HashMap::new(),
            actuator,
        }
    }

    /// Id of the current directory.
    pub fn current(&self) -> &NodeId {
        &self.cwd[self.cwd.len() - 1]
    }

    /// Rendered working directory.
    pub fn pwd(&self) -> String {
        render_path(&self.cwd_names)
    }

    pub fn reset_to_root(&mut self) {
        self.cwd = vec![self.vfs.root().clone()];
        self.cwd_names = vec!["/".to_string()];
    }

    /// Replace the VFS snapshot wholesale and reset the CWD to its root.
    pub fn swap_snapshot(&mut self, vfs: Arc<VfsMapper>) {
        self.vfs = vfs;
        self.reset_to_root();
    }

    /// True while the CWD's last id still resolves in the snapshot.
    pub fn cwd_is_valid(&self) -> bool {
        self.vfs.contains(self.current())
    }

    /// Resolve a path against the CWD without mutating it.
    ///
    /// Segment semantics match `cd`: leading `/` is absolute, `.` is a
    /// no-op, `..` pops (no-op at root), every intermediate segment must be
    /// a directory. The final segment may be a file.
    pub fn resolve(&self, path: &str) -> Result<ResolvedPath, ShellError> {
        let mut ids;
        let mut names;
        if path.starts_with('/') {
            ids = vec![self.vfs.root().clone()];
            names = vec!["/".to_string()];
        } else {
            ids = self.cwd.clone();
            names = self.cwd_names.clone();
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut entry: Option<VfsEntry> = None;

        for (i, segment) in segments.iter().enumerate() {
            match *segment {
                "." => continue,
                ".." => {
                    if ids.len() > 1 {
                        ids.pop();
                        names.pop();
                    }
                    entry = None;
                }
                name => {
                    if let Some(e) = &entry {
                        // the previous segment resolved to a file
                        return Err(ShellError::NotADirectory(e.display_name.clone()));
                    }
                    let found = self
                        .vfs
                        .find_child(&ids[ids.len() - 1], name)
                        .ok_or_else(|| ShellError::NoSuchPath(name.to_string()))?;
                    ids.push(found.id.clone());
                    names.push(found.display_name.clone());
                    if found.is_directory {
                        entry = if i == segments.len() - 1 {
                            Some(found)
                        } else {
                            None
                        };
                    } else {
                        entry = Some(found);
                    }
                }
            }
        }

        Ok(ResolvedPath { ids, names, entry })
    }

    /// Resolve a path and require a directory, returning its id.
    pub fn resolve_directory(&self, path: &str) -> Result<ResolvedPath, ShellError> {
        let resolved = self.resolve(path)?;
        if resolved.is_directory() {
            Ok(resolved)
        } else {
            Err(ShellError::NotADirectory(
                resolved
                    .entry
                    .as_ref()
                    .map(|e| e.display_name.clone())
                    .unwrap_or_else(|| path.to_string()),
            ))
        }
    }
}
