//! Error kinds surfaced at the command boundary.

use thiserror::Error;

/// The closed set of errors the shell surface can report.
///
/// All of these are caught at the command boundary and rendered as plain
/// text; none terminate the kernel. `StaleReference` originates in the
/// element actuator and passes through verbatim, never reclassified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("not attached: run `attach` first")]
    NotAttached,

    #[error("no such path: {0}")]
    NoSuchPath(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("stale reference: {0}")]
    StaleReference(String),

    #[error("ingestion failed: {0}")]
    IngestionFailure(String),
}
