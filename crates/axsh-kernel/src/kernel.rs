//! The Kernel — the heart of axsh.
//!
//! The kernel owns the two-state machine behind the command surface:
//!
//! ```text
//! DETACHED ──attach──▶ ATTACHED ──detach──▶ DETACHED
//!                        │  ▲
//!                     refresh (NodeMap swapped wholesale, CWD reset)
//! ```
//!
//! Every command arrives as one plain-text line and leaves as one plain-text
//! block. `execute` takes `&mut self`: commands are strictly serialized, so
//! the NodeMap and CWD need no locking. A long-running source or actuator
//! round-trip simply blocks the next command; there is no kernel-level
//! timeout or cancellation.

use std::sync::Arc;

use tracing::debug;

use axsh_types::{ExecResult, ShellError};

use crate::ingest::Ingestor;
use crate::source::{AccessibilitySource, ElementActuator};
use crate::tools::{builtin, ExecContext, ToolArgs, ToolRegistry};
use crate::vfs::VfsMapper;

/// Configuration for kernel construction.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Default ingestion target used by a bare `attach`.
    pub target: String,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            target: "page".to_string(),
        }
    }
}

impl KernelConfig {
    pub fn for_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// The kernel: state machine, path resolution, and command dispatch.
pub struct Kernel {
    config: KernelConfig,
    ingestor: Ingestor,
    actuator: Arc<dyn ElementActuator>,
    tools: ToolRegistry,
    /// ShellState of the attached session; `None` while detached.
    ctx: Option<ExecContext>,
}

impl Kernel {
    pub fn new(
        config: KernelConfig,
        source: Arc<dyn AccessibilitySource>,
        actuator: Arc<dyn ElementActuator>,
    ) -> Self {
        let mut tools = ToolRegistry::new();
        builtin::register_builtins(&mut tools);
        Self {
            config,
            ingestor: Ingestor::new(source),
            actuator,
            tools,
            ctx: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.ctx.is_some()
    }

    /// Rendered working directory, while attached.
    pub fn pwd(&self) -> Option<String> {
        self.ctx.as_ref().map(ExecContext::pwd)
    }

    /// Execute one command line.
    pub async fn execute(&mut self, line: &str) -> ExecResult {
        let tokens = split_line(line);
        let Some((cmd, rest)) = tokens.split_first() else {
            return ExecResult::success("");
        };
        debug!(command = %cmd, "dispatch");
        let args = ToolArgs::parse(rest);

        match cmd.as_str() {
            "attach" => self.attach(args.positional.first().cloned()).await,
            "detach" => self.detach(),
            "refresh" => self.refresh_command().await,
            "help" => ExecResult::success(self.help_text()),
            _ => self.dispatch(cmd, args).await,
        }
    }

    /// Execute one command line and collapse the result into the single
    /// plain-text block the outer surface expects.
    pub async fn run(&mut self, line: &str) -> String {
        self.execute(line).await.render()
    }

    async fn dispatch(&mut self, cmd: &str, args: ToolArgs) -> ExecResult {
        let Some(ctx) = self.ctx.as_mut() else {
            return ExecResult::failure(1, ShellError::NotAttached.to_string());
        };
        // Invariant guard: the CWD's last id must resolve in the current
        // snapshot or everything fails until refresh.
        if !ctx.cwd_is_valid() {
            return ExecResult::failure(
                1,
                format!("working directory {} is stale, run `refresh`", ctx.pwd()),
            );
        }
        match self.tools.get(cmd) {
            Some(tool) => tool.execute(args, ctx).await,
            None => ExecResult::failure(127, format!("unknown command: {cmd}")),
        }
    }

    async fn attach(&mut self, target_override: Option<String>) -> ExecResult {
        let target = target_override.unwrap_or_else(|| self.config.target.clone());
        if let Err(e) = self.ingestor.attach(&target).await {
            self.ctx = None;
            return ExecResult::failure(1, e.to_string());
        }
        match self.build_snapshot().await {
            Ok(vfs) => {
                // fresh ShellState per attach
                self.ctx = Some(ExecContext::new(vfs, self.actuator.clone()));
                ExecResult::success(format!("attached: {target}"))
            }
            Err(e) => {
                self.ctx = None;
                ExecResult::failure(1, e.to_string())
            }
        }
    }

    fn detach(&mut self) -> ExecResult {
        if self.ctx.is_none() {
            return ExecResult::failure(1, ShellError::NotAttached.to_string());
        }
        self.ingestor.detach();
        self.ctx = None;
        ExecResult::success("detached")
    }

    async fn refresh_command(&mut self) -> ExecResult {
        if self.ctx.is_none() {
            return ExecResult::failure(1, ShellError::NotAttached.to_string());
        }
        match self.refresh().await {
            Ok(()) => ExecResult::success("refreshed"),
            Err(e) => ExecResult::failure(1, e.to_string()),
        }
    }

    /// Re-ingest and swap the snapshot wholesale, resetting the CWD to root.
    /// On failure the previous snapshot stays in place untouched.
    pub(crate) async fn refresh(&mut self) -> Result<(), ShellError> {
        let vfs = self.build_snapshot().await?;
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.swap_snapshot(vfs);
        }
        Ok(())
    }

    async fn build_snapshot(&self) -> Result<Arc<VfsMapper>, ShellError> {
        let raw = self.ingestor.fetch_tree().await?;
        let map = Ingestor::build_node_map(raw);
        let root = Ingestor::find_root(&map).ok_or_else(|| {
            ShellError::IngestionFailure("tree contained no usable nodes".to_string())
        })?;
        debug!(nodes = map.len(), root = %root, "built snapshot");
        Ok(Arc::new(VfsMapper::new(map, root)))
    }

    /// Working-directory display names below the root marker.
    pub(crate) fn cwd_names_below_root(&self) -> Vec<String> {
        self.ctx
            .as_ref()
            .map(|ctx| ctx.cwd_names[1..].to_vec())
            .unwrap_or_default()
    }

    /// Replay a previously recorded CWD name path against the current
    /// snapshot. Any segment that fails to resolve to a directory falls
    /// back silently to root.
    pub(crate) fn replay_cwd(&mut self, names: &[String]) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        for name in names {
            let found = ctx.vfs.find_child(ctx.current(), name);
            match found {
                Some(entry) if entry.is_directory => {
                    ctx.cwd.push(entry.id);
                    ctx.cwd_names.push(entry.display_name);
                }
                _ => {
                    debug!(segment = %name, "cwd replay failed, falling back to root");
                    ctx.reset_to_root();
                    return;
                }
            }
        }
    }

    fn help_text(&self) -> String {
        let mut lines = vec![
            "attach [target]  — Bind to a page and ingest its tree".to_string(),
            "detach  — Drop the session".to_string(),
            "refresh  — Re-ingest the tree (resets the working directory)".to_string(),
        ];
        lines.extend(self.tools.schemas().iter().map(|s| s.usage_line()));
        lines.join("\n")
    }
}

/// Quote-aware whitespace tokenizer for command lines.
///
/// Double and single quotes group words; there is no escaping, no variable
/// expansion, no operators — the surface is flat by design.
fn split_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}
