//! click / focus / type / whoami — Delegated actuation commands.
//!
//! These resolve a virtual path to its backend reference and hand off to the
//! external actuator. Actuator errors — `StaleReference` above all — surface
//! verbatim; the kernel never reclassifies them.

use async_trait::async_trait;

use axsh_types::{BackendRef, ExecResult, ShellError};

use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Resolve a path to the backend ref the actuator needs.
fn backend_ref_for(ctx: &ExecContext, cmd: &str, path: &str) -> Result<BackendRef, String> {
    let resolved = ctx.resolve(path).map_err(|e| format!("{cmd}: {e}"))?;
    let entry = ctx
        .vfs
        .node(resolved.target())
        .ok_or_else(|| format!("{cmd}: {path}: entry vanished"))?;
    entry
        .backend_ref
        .clone()
        .ok_or_else(|| format!("{cmd}: {path}: no backend reference"))
}

/// Click tool: click the element behind a virtual entry.
pub struct Click;

#[async_trait]
impl Tool for Click {
    fn name(&self) -> &str {
        "click"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("click", "Click the element behind an entry")
            .param(ParamSchema::required("path", "entry to click"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(path) = args.get_string("path", 0) else {
            return ExecResult::failure(1, "click: missing path argument");
        };
        let backend_ref = match backend_ref_for(ctx, "click", &path) {
            Ok(r) => r,
            Err(e) => return ExecResult::failure(1, e),
        };
        match ctx.actuator.click(&backend_ref).await {
            Ok(out) => ExecResult::success(out),
            Err(e) => ExecResult::failure(1, format!("click: {e}")),
        }
    }
}

/// Focus tool: focus the element behind a virtual entry.
pub struct Focus;

#[async_trait]
impl Tool for Focus {
    fn name(&self) -> &str {
        "focus"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("focus", "Focus the element behind an entry")
            .param(ParamSchema::required("path", "entry to focus"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(path) = args.get_string("path", 0) else {
            return ExecResult::failure(1, "focus: missing path argument");
        };
        let backend_ref = match backend_ref_for(ctx, "focus", &path) {
            Ok(r) => r,
            Err(e) => return ExecResult::failure(1, e),
        };
        match ctx.actuator.focus(&backend_ref).await {
            Ok(out) => ExecResult::success(out),
            Err(e) => ExecResult::failure(1, format!("focus: {e}")),
        }
    }
}

/// Type tool: send text to the focused element.
pub struct TypeText;

#[async_trait]
impl Tool for TypeText {
    fn name(&self) -> &str {
        "type"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("type", "Type text into the focused element")
            .param(ParamSchema::required("text", "text to type"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        if args.positional.is_empty() {
            return ExecResult::failure(1, "type: missing text argument");
        }
        let text = args.positional.join(" ");
        match ctx.actuator.type_text(&text).await {
            Ok(out) => ExecResult::success(out),
            Err(e) => ExecResult::failure(1, format!("type: {e}")),
        }
    }
}

/// Whoami tool: identity summary from the actuation layer.
pub struct Whoami;

#[async_trait]
impl Tool for Whoami {
    fn name(&self) -> &str {
        "whoami"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("whoami", "Print the actuation session identity")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        match ctx.actuator.whoami().await {
            Ok(out) => ExecResult::success(out),
            Err(e) => ExecResult::failure(1, format!("whoami: {e}")),
        }
    }
}
