//! cat — Print the record behind a virtual entry.

use async_trait::async_trait;

use axsh_types::ExecResult;

use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Cat tool: show role, accessible name, value, and description of a node.
///
/// Works on directories too — every resolvable path has a record view.
pub struct Cat;

#[async_trait]
impl Tool for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cat", "Print the accessibility record of an entry")
            .param(ParamSchema::required("path", "entry to inspect"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(path) = args.get_string("path", 0) else {
            return ExecResult::failure(1, "cat: missing path argument");
        };

        let resolved = match ctx.resolve(&path) {
            Ok(r) => r,
            Err(e) => return ExecResult::failure(1, format!("cat: {e}")),
        };
        let Some(node) = ctx.vfs.node(resolved.target()) else {
            return ExecResult::failure(1, format!("cat: {path}: entry vanished"));
        };

        let mut lines = vec![
            format!("role: {}", node.role),
            format!("name: {}", node.name),
        ];
        if !node.value.is_empty() {
            lines.push(format!("value: {}", node.value));
        }
        if !node.description.is_empty() {
            lines.push(format!("description: {}", node.description));
        }
        ExecResult::success(lines.join("\n"))
    }
}
