//! ls — List directory contents.

use async_trait::async_trait;

use axsh_types::{ExecResult, VfsEntry};

use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

use super::walk;

/// Ls tool: list the entries of a virtual directory.
pub struct Ls;

#[async_trait]
impl Tool for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("ls", "List directory contents")
            .param(ParamSchema::optional("path", "directory to list"))
            .param(ParamSchema::optional("-l", "long format with role and value"))
            .param(ParamSchema::optional("-r", "recurse into subdirectories"))
            .param(ParamSchema::optional("-n N", "limit output to N entries"))
            .param(ParamSchema::optional("--offset N", "skip the first N entries"))
            .param(ParamSchema::optional("--type ROLE", "only entries with this role"))
            .param(ParamSchema::optional("--count", "print the entry count only"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let path = args.get_string("path", 0).unwrap_or_else(|| ".".to_string());
        let resolved = match ctx.resolve_directory(&path) {
            Ok(r) => r,
            Err(e) => return ExecResult::failure(1, format!("ls: {e}")),
        };

        let recursive = args.has_flag("r");
        let long = args.has_flag("l") || args.has_flag("long");
        let role_filter = args.get_string("type", usize::MAX);

        // Listing root labels are relative; recursion prefixes subdir paths.
        let mut rows: Vec<(String, VfsEntry)> = Vec::new();
        let depth = if recursive { None } else { Some(1) };
        walk(&ctx.vfs, resolved.target(), "", depth, &mut |p, e| {
            rows.push((p.trim_start_matches('/').to_string(), e.clone()));
        });

        if let Some(role) = &role_filter {
            rows.retain(|(_, e)| e.role.eq_ignore_ascii_case(role));
        }

        if args.has_flag("count") {
            return ExecResult::success(rows.len().to_string());
        }

        let offset = args.get_usize("offset").unwrap_or(0);
        let limit = args.get_usize("n").unwrap_or(usize::MAX);
        let page: Vec<_> = rows.into_iter().skip(offset).take(limit).collect();

        if page.is_empty() {
            return ExecResult::success("(empty)");
        }

        let lines: Vec<String> = if long {
            page.iter().map(|(path, e)| long_line(path, e)).collect()
        } else {
            page.iter()
                .map(|(path, e)| {
                    if e.is_directory {
                        format!("{path}/")
                    } else {
                        path.clone()
                    }
                })
                .collect()
        };
        ExecResult::success(lines.join("\n"))
    }
}

fn long_line(path: &str, entry: &VfsEntry) -> String {
    let type_char = if entry.is_directory { 'd' } else { '-' };
    let name = if entry.is_directory {
        format!("{path}/")
    } else {
        path.to_string()
    };
    let mut line = format!("{}  {:<12}  {}", type_char, entry.role, name);
    if !entry.value.is_empty() {
        line.push_str(&format!("  value=\"{}\"", entry.value));
    }
    line
}
