//! External collaborator traits: the accessibility source and the element
//! actuator.
//!
//! The kernel consumes these and nothing else from the outside world. Both
//! boundaries are async round-trips with no kernel-side timeout — timeouts
//! belong to the bridge that implements them.

mod scripted;

pub use scripted::{ScriptedActuator, ScriptedPage, ScriptedSource};

use async_trait::async_trait;

use axsh_types::{BackendRef, FrameTarget, ShellError};

/// Provider of raw accessibility records.
///
/// `get_full_tree` returns the loosely-typed record list in CDP shape
/// (`{"nodes": [{"nodeId": …, "role": {"value": …}, …}]}`); the ingestor
/// parses it into strict records at the boundary.
#[async_trait]
pub trait AccessibilitySource: Send + Sync {
    /// Fetch the full accessibility tree for a target (main document or one
    /// sub-frame).
    async fn get_full_tree(&self, target: &str) -> anyhow::Result<serde_json::Value>;

    /// Enumerate the sub-frame targets of a target.
    async fn get_frame_tree(&self, target: &str) -> anyhow::Result<Vec<FrameTarget>>;
}

/// Low-level element actuation against the live document.
///
/// `BackendRef` is carried unmodified from ingestion; only the actuator
/// interprets it. Errors — notably [`ShellError::StaleReference`] after a
/// navigation invalidated a ref — surface verbatim through the kernel.
#[async_trait]
pub trait ElementActuator: Send + Sync {
    async fn click(&self, backend_ref: &BackendRef) -> Result<String, ShellError>;

    async fn focus(&self, backend_ref: &BackendRef) -> Result<String, ShellError>;

    /// Type text into the currently focused element.
    async fn type_text(&self, text: &str) -> Result<String, ShellError>;

    /// Read the rendered text of an element.
    async fn read_text(&self, backend_ref: &BackendRef) -> Result<String, ShellError>;

    /// Identity/session summary for the `whoami` command.
    async fn whoami(&self) -> Result<String, ShellError>;
}

/// Page lifecycle signals delivered by the actuation layer.
///
/// `Navigated` invalidates everything; `DomMutated` means the same document
/// changed shape and the working directory may survive a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    Navigated,
    DomMutated,
}
