//! grep — Search entries by name, role, and value.

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};

use axsh_types::ExecResult;

use crate::tools::{ExecContext, ParamSchema, Tool, ToolArgs, ToolSchema};

use super::walk;

/// Grep tool: case-insensitive substring match over the entries of the
/// current directory (or the whole subtree with `-r`).
pub struct Grep;

#[async_trait]
impl Tool for Grep {
    fn name(&self) -> &str {
        "grep"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("grep", "Search entries by name, role, and value")
            .param(ParamSchema::required("pattern", "substring to search for"))
            .param(ParamSchema::optional("-r", "recurse into subdirectories"))
            .param(ParamSchema::optional("-n N", "stop after N matches"))
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(pattern) = args.get_string("pattern", 0) else {
            return ExecResult::failure(1, "grep: missing pattern");
        };
        let matcher = match substring_matcher(&pattern) {
            Ok(m) => m,
            Err(e) => return ExecResult::failure(1, format!("grep: {e}")),
        };

        let depth = if args.has_flag("r") { None } else { Some(1) };
        let limit = args.get_usize("n").unwrap_or(usize::MAX);

        let base = ctx.pwd();
        let mut lines: Vec<String> = Vec::new();
        walk(&ctx.vfs, ctx.current(), &base, depth, &mut |path, entry| {
            if lines.len() >= limit {
                return;
            }
            let accessible_name = ctx
                .vfs
                .node(&entry.id)
                .map(|n| n.name.as_str())
                .unwrap_or("");
            let hit = matcher.is_match(&entry.display_name)
                || matcher.is_match(&entry.role)
                || matcher.is_match(&entry.value)
                || matcher.is_match(accessible_name);
            if hit {
                let mut line = format!("{path}: {} \"{}\"", entry.role, entry.display_name);
                if !entry.value.is_empty() {
                    line.push_str(&format!(" value=\"{}\"", entry.value));
                }
                lines.push(line);
            }
        });

        if lines.is_empty() {
            ExecResult::success("grep: no matches")
        } else {
            ExecResult::success(lines.join("\n"))
        }
    }
}

/// Escaped, case-insensitive matcher: substring semantics, regex engine.
fn substring_matcher(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(pattern))
        .case_insensitive(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::super::testkit::*;
    use super::*;

    async fn grep(ctx: &mut ExecContext, line_args: &[&str]) -> ExecResult {
        let tokens: Vec<String> = line_args.iter().map(|s| s.to_string()).collect();
        Grep.execute(ToolArgs::parse(&tokens), ctx).await
    }

    #[tokio::test]
    async fn grep_matches_case_insensitively() {
        let (_page, mut ctx) = page_ctx();
        let result = grep(&mut ctx, &["PRIVACY"]).await;
        assert!(result.ok());
        assert!(result.out.contains("/privacy_policy_link"));
    }

    #[tokio::test]
    async fn grep_is_shallow_by_default() {
        let (_page, mut ctx) = page_ctx();
        let shallow = grep(&mut ctx, &["submit"]).await;
        assert_eq!(shallow.out, "grep: no matches");

        let deep = grep(&mut ctx, &["submit", "-r"]).await;
        assert!(deep.out.contains("/login/submit_btn"));
    }

    #[tokio::test]
    async fn grep_matches_role_and_value() {
        let (_page, mut ctx) = page_ctx();
        let by_role = grep(&mut ctx, &["navigation"]).await;
        assert!(by_role.out.contains("/navigation"));

        let by_value = grep(&mut ctx, &["ready", "-r"]).await;
        assert!(by_value.out.contains("submit_btn"));
    }

    #[tokio::test]
    async fn grep_limit_caps_matches() {
        let (_page, mut ctx) = page_ctx();
        let result = grep(&mut ctx, &["-r", "-n", "1", "link"]).await;
        assert_eq!(result.out.lines().count(), 1);
    }

    #[tokio::test]
    async fn grep_pattern_is_literal_not_regex() {
        let (_page, mut ctx) = page_ctx();
        let result = grep(&mut ctx, &[".*"]).await;
        assert_eq!(result.out, "grep: no matches");
    }
}
