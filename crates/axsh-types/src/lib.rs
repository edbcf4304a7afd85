//! axsh-types: Pure data types for axsh.
//!
//! This crate holds the data model shared across the workspace:
//!
//! - **AXNode / NodeMap**: one ingested accessibility record and the
//!   wholesale-replaced snapshot of all records
//! - **VfsEntry**: the derived directory/file projection of a node
//! - **ExecResult**: the plain-text result of every command
//! - **ShellError**: the closed set of error kinds surfaced at the
//!   command boundary
//!
//! No I/O, no async, no policy — those live in `axsh-kernel`.

mod entry;
mod error;
mod node;
mod result;

pub use entry::VfsEntry;
pub use error::ShellError;
pub use node::{AXNode, BackendRef, FrameTarget, NodeId, NodeMap};
pub use result::ExecResult;
