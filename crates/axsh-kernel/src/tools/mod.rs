//! Tool infrastructure: the `Tool` trait, argument parsing, schemas.

pub mod builtin;
mod context;
mod registry;

pub use context::{ExecContext, ResolvedPath};
pub use registry::ToolRegistry;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use axsh_types::ExecResult;

/// Flags that consume the following token as their value.
const VALUE_FLAGS: &[&str] = &["n", "offset", "type"];

/// A tool executable through the command surface.
///
/// Tools receive parsed arguments and the mutable execution context; most
/// are pure reads, only `cd` and `export` mutate state.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Command name used for dispatch.
    fn name(&self) -> &str;

    /// Schema describing the tool, rendered by `help`.
    fn schema(&self) -> ToolSchema;

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult;
}

/// Parsed command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Positional arguments, in order.
    pub positional: Vec<String>,
    /// Value-carrying flags (`-n 5`, `--type button`).
    pub named: HashMap<String, String>,
    /// Bare flags (`-l`, `-r`, `--count`).
    pub flags: HashSet<String>,
}

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the tokens after the command name.
    ///
    /// `--key=value` and `--key value` (for value flags) populate `named`;
    /// other dashed tokens are bare flags; everything else is positional.
    pub fn parse(tokens: &[String]) -> Self {
        let mut args = Self::new();
        let mut iter = tokens.iter().peekable();
        while let Some(token) = iter.next() {
            if let Some(stripped) = strip_dashes(token) {
                if let Some((key, value)) = stripped.split_once('=') {
                    args.named.insert(key.to_string(), value.to_string());
                } else if VALUE_FLAGS.contains(&stripped) {
                    match iter.next() {
                        Some(value) => {
                            args.named.insert(stripped.to_string(), value.clone());
                        }
                        None => {
                            args.flags.insert(stripped.to_string());
                        }
                    }
                } else {
                    args.flags.insert(stripped.to_string());
                }
            } else {
                args.positional.push(token.clone());
            }
        }
        args
    }

    /// Look up a string argument by flag name, falling back to a positional
    /// index.
    pub fn get_string(&self, name: &str, index: usize) -> Option<String> {
        self.named
            .get(name)
            .cloned()
            .or_else(|| self.positional.get(index).cloned())
    }

    pub fn get_usize(&self, name: &str) -> Option<usize> {
        self.named.get(name).and_then(|v| v.parse().ok())
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }
}

/// `-l` → `l`, `--long` → `long`. A bare `-` or `--` is positional.
fn strip_dashes(token: &str) -> Option<&str> {
    let stripped = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))?;
    // negative numbers and bare dashes are not flags
    if stripped.is_empty() || stripped.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(stripped)
}

/// Schema for one tool, rendered by `help`.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSchema>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// One-line rendering: `ls [path] — List the current directory`.
    pub fn usage_line(&self) -> String {
        let mut line = self.name.clone();
        for p in &self.params {
            if p.required {
                line.push_str(&format!(" <{}>", p.name));
            } else {
                line.push_str(&format!(" [{}]", p.name));
            }
        }
        format!("{}  — {}", line, self.description)
    }
}

/// Schema for one tool parameter.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    pub name: String,
    pub required: bool,
    pub description: String,
}

impl ParamSchema {
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            description: description.into(),
        }
    }

    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_mixes_flags_named_and_positional() {
        let args = ToolArgs::parse(&tokens(&["-l", "main", "--type", "button", "-n", "3", "-r"]));
        assert!(args.has_flag("l"));
        assert!(args.has_flag("r"));
        assert_eq!(args.get_string("type", 99), Some("button".into()));
        assert_eq!(args.get_usize("n"), Some(3));
        assert_eq!(args.positional, vec!["main".to_string()]);
    }

    #[test]
    fn parse_accepts_equals_form() {
        let args = ToolArgs::parse(&tokens(&["--type=link", "--offset=2"]));
        assert_eq!(args.get_string("type", 0), Some("link".into()));
        assert_eq!(args.get_usize("offset"), Some(2));
    }

    #[test]
    fn get_string_falls_back_to_positional() {
        let args = ToolArgs::parse(&tokens(&["form"]));
        assert_eq!(args.get_string("path", 0), Some("form".into()));
        assert_eq!(args.get_string("path", 1), None);
    }

    #[test]
    fn usage_line_marks_required_params() {
        let schema = ToolSchema::new("cd", "Change directory")
            .param(ParamSchema::required("path", "target directory"));
        assert_eq!(schema.usage_line(), "cd <path>  — Change directory");
    }
}
