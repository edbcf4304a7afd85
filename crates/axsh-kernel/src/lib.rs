//! axsh-kernel: The core of axsh.
//!
//! This crate turns a browser page's accessibility tree into a navigable
//! virtual filesystem and exposes a shell-like command surface over it:
//!
//! - **Ingest**: fetches accessibility records for the main document and all
//!   sub-frames, merges them into one globally-unique id space, and drops
//!   ignored records
//! - **VFS**: classifies nodes as directory/file, generates deterministic
//!   display names with sibling dedup, and flattens anonymous wrappers
//! - **Kernel**: owns working-directory state, resolves paths, and runs the
//!   command set (`ls`, `cd`, `cat`, `grep`, `find`, `tree`, `pwd`, …)
//! - **Watch**: reacts to page navigation/mutation signals, refreshing the
//!   tree and replaying the working directory where possible
//!
//! The terminal UI, transport, live element actuation, and the security
//! wrapper are external collaborators behind the traits in [`source`].

pub mod ingest;
pub mod kernel;
pub mod source;
pub mod tools;
pub mod vfs;
pub mod watch;

pub use axsh_types::{AXNode, BackendRef, ExecResult, NodeId, NodeMap, ShellError, VfsEntry};
pub use kernel::{Kernel, KernelConfig};
pub use source::{AccessibilitySource, ElementActuator, PageSignal};
pub use watch::ChangeDetector;
