//! find — Descend from the working directory and print matching paths.

use async_trait::async_trait;

use axsh_types::ExecResult;

use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

use super::walk;

/// Find tool: unbounded-depth descent, name-substring and role filters.
pub struct Find;

#[async_trait]
impl Tool for Find {
    fn name(&self) -> &str {
        "find"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("find", "Find entries below the working directory")
            .param(ParamSchema::optional("pattern", "name substring (default: everything)"))
            .param(ParamSchema::optional("--type ROLE", "only entries with this role"))
            .param(ParamSchema::optional("-n N", "stop after N results"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let pattern = args.get_string("pattern", 0).unwrap_or_default().to_lowercase();
        let role_filter = args.get_string("type", usize::MAX);
        let limit = args.get_usize("n").unwrap_or(usize::MAX);

        let base = ctx.pwd();
        let mut lines: Vec<String> = Vec::new();
        walk(&ctx.vfs, ctx.current(), &base, None, &mut |path, entry| {
            if lines.len() >= limit {
                return;
            }
            if !entry.display_name.to_lowercase().contains(&pattern) {
                return;
            }
            if let Some(role) = &role_filter {
                if !entry.role.eq_ignore_ascii_case(role) {
                    return;
                }
            }
            lines.push(path.to_string());
        });

        if lines.is_empty() {
            ExecResult::success("find: no matches")
        } else {
            ExecResult::success(lines.join("\n"))
        }
    }
}
