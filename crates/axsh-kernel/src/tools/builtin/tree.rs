//! tree — Render nested structure with branch connectors.

use async_trait::async_trait;

use axsh_types::{ExecResult, NodeId};

use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};
use crate::vfs::VfsMapper;

const DEFAULT_DEPTH: usize = 2;

/// Tree tool: render the subtree below the working directory.
pub struct Tree;

#[async_trait]
impl Tool for Tree {
    fn name(&self) -> &str {
        "tree"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("tree", "Render nested structure below the working directory")
            .param(ParamSchema::optional("depth", "levels to render (default 2)"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let depth = match args.get_string("depth", 0) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(d) => d,
                Err(_) => return ExecResult::failure(1, format!("tree: invalid depth: {raw}")),
            },
            None => DEFAULT_DEPTH,
        };

        let mut out = ctx.pwd();
        out.push('\n');
        render(&ctx.vfs, ctx.current(), "", depth, &mut out);
        ExecResult::success(out.trim_end().to_string())
    }
}

fn render(vfs: &VfsMapper, id: &NodeId, prefix: &str, depth_left: usize, out: &mut String) {
    if depth_left == 0 {
        return;
    }
    let entries = vfs.list_children(id);
    let last_index = entries.len().saturating_sub(1);
    for (i, entry) in entries.iter().enumerate() {
        let connector = if i == last_index { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&entry.decorated_name());
        out.push('\n');
        if entry.is_directory {
            let child_prefix = if i == last_index {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            render(vfs, &entry.id, &child_prefix, depth_left - 1, out);
        }
    }
}
