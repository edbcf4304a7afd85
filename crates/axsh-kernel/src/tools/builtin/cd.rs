//! cd — Change working directory.
//!
//! Resolution is non-atomic on purpose: each segment is applied to the CWD
//! as it resolves, and the first failing segment aborts the command with the
//! earlier segments still applied. This mirrors how agents actually probe a
//! page and is documented surface behavior, not a bug to roll back.

use async_trait::async_trait;

use axsh_types::{ExecResult, ShellError};

use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Cd tool: change the current working directory.
pub struct Cd;

#[async_trait]
impl Tool for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cd", "Change the current working directory")
            .param(ParamSchema::optional("path", "directory to change to (default /)"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let path = args.get_string("path", 0).unwrap_or_else(|| "/".to_string());

        if path.starts_with('/') {
            ctx.reset_to_root();
        }

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match segment {
                "." => {}
                ".." => {
                    // no-op at root
                    if ctx.cwd.len() > 1 {
                        ctx.cwd.pop();
                        ctx.cwd_names.pop();
                    }
                }
                name => {
                    let Some(entry) = ctx.vfs.find_child(ctx.current(), name) else {
                        return ExecResult::failure(
                            1,
                            format!("cd: {}", ShellError::NoSuchPath(name.to_string())),
                        );
                    };
                    if !entry.is_directory {
                        return ExecResult::failure(
                            1,
                            format!("cd: {}", ShellError::NotADirectory(entry.display_name)),
                        );
                    }
                    ctx.cwd.push(entry.id);
                    ctx.cwd_names.push(entry.display_name);
                }
            }
        }

        ExecResult::success("")
    }
}
