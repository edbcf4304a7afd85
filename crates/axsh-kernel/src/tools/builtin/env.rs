//! env / export — Session environment bindings.

use async_trait::async_trait;

use axsh_types::ExecResult;

use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

/// Env tool: print all bindings, sorted by key.
pub struct Env;

#[async_trait]
impl Tool for Env {
    fn name(&self) -> &str {
        "env"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("env", "Print environment bindings")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let mut pairs: Vec<_> = ctx.env.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        let lines: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        ExecResult::success(lines.join("\n"))
    }
}

/// Export tool: set one binding from a `KEY=VALUE` argument.
pub struct Export;

#[async_trait]
impl Tool for Export {
    fn name(&self) -> &str {
        "export"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("export", "Set an environment binding")
            .param(ParamSchema::required("KEY=VALUE", "binding to set"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let usage = "export: usage: export KEY=VALUE";
        let Some(pair) = args.positional.first() else {
            return ExecResult::failure(1, usage);
        };
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                ctx.env.insert(key.to_string(), value.to_string());
                ExecResult::success("")
            }
            _ => ExecResult::failure(1, usage),
        }
    }
}
