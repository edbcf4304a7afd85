//! Scripted in-memory source and actuator.
//!
//! The scripted page plays the role the real CDP bridge plays in production:
//! it serves CDP-shaped record lists and actuates "elements". All state is
//! ephemeral. Used by tests and demos.
//!
//! Replacing a scripted tree starts a new ref generation: backend refs that
//! no longer appear in any current tree fail with `StaleReference`, which is
//! exactly what a real bridge reports after navigation removed an element.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use axsh_types::{BackendRef, FrameTarget, ShellError};

use super::{AccessibilitySource, ElementActuator};

#[derive(Default)]
struct PageState {
    /// target → CDP-shaped `{"nodes": [...]}` document.
    trees: Mutex<HashMap<String, Value>>,
    /// target → sub-frame targets.
    frames: Mutex<HashMap<String, Vec<FrameTarget>>>,
    /// Canonical backend refs present in the current generation of trees.
    valid_refs: Mutex<HashSet<String>>,
    /// Recorded actuator calls, in order.
    actions: Mutex<Vec<String>>,
    /// When true, the source refuses all calls (simulates a dead bridge).
    offline: Mutex<bool>,
}

impl PageState {
    fn canonical(backend_ref: &BackendRef) -> String {
        backend_ref.0.to_string()
    }

    fn recompute_valid_refs(&self) {
        let trees = lock(&self.trees);
        let mut valid = HashSet::new();
        for tree in trees.values() {
            if let Some(nodes) = tree.get("nodes").and_then(Value::as_array) {
                for node in nodes {
                    if let Some(raw) = node.get("backendDOMNodeId") {
                        valid.insert(BackendRef(raw.clone()).0.to_string());
                    }
                }
            }
        }
        *lock(&self.valid_refs) = valid;
    }

    fn check_ref(&self, backend_ref: &BackendRef) -> Result<(), ShellError> {
        let key = Self::canonical(backend_ref);
        if lock(&self.valid_refs).contains(&key) {
            Ok(())
        } else {
            Err(ShellError::StaleReference(format!(
                "element {key} no longer exists"
            )))
        }
    }

    fn record(&self, action: String) {
        lock(&self.actions).push(action);
    }

    /// Find the accessible name of the node a ref points at, for read_text.
    fn text_of(&self, backend_ref: &BackendRef) -> String {
        let trees = lock(&self.trees);
        for tree in trees.values() {
            let Some(nodes) = tree.get("nodes").and_then(Value::as_array) else {
                continue;
            };
            for node in nodes {
                let matches = node
                    .get("backendDOMNodeId")
                    .is_some_and(|raw| *raw == backend_ref.0);
                if matches {
                    for field in ["value", "name"] {
                        let text = node
                            .get(field)
                            .and_then(|v| v.get("value"))
                            .and_then(Value::as_str)
                            .unwrap_or("");
                        if !text.is_empty() {
                            return text.to_string();
                        }
                    }
                }
            }
        }
        String::new()
    }
}

/// Poisoned-mutex recovery: scripted state is test infrastructure, keep
/// serving the data rather than cascading panics across the test.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// A scripted page: shared state behind a source handle and an actuator
/// handle.
#[derive(Clone, Default)]
pub struct ScriptedPage {
    state: Arc<PageState>,
}

impl ScriptedPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page whose main target already serves `tree`.
    pub fn with_tree(target: &str, tree: Value) -> Self {
        let page = Self::new();
        page.set_tree(target, tree);
        page
    }

    /// Install (or replace) the tree served for a target. Starts a new ref
    /// generation.
    pub fn set_tree(&self, target: &str, tree: Value) {
        lock(&self.state.trees).insert(target.to_string(), tree);
        self.state.recompute_valid_refs();
    }

    /// Remove a target's tree entirely.
    pub fn remove_tree(&self, target: &str) {
        lock(&self.state.trees).remove(target);
        self.state.recompute_valid_refs();
    }

    /// Install the sub-frame list reported for a target.
    pub fn set_frames(&self, target: &str, frames: Vec<FrameTarget>) {
        lock(&self.state.frames).insert(target.to_string(), frames);
    }

    /// Make the source refuse all calls (or accept them again).
    pub fn set_offline(&self, offline: bool) {
        *lock(&self.state.offline) = offline;
    }

    /// Actuator calls recorded so far, in order.
    pub fn actions(&self) -> Vec<String> {
        lock(&self.state.actions).clone()
    }

    pub fn source(&self) -> Arc<dyn AccessibilitySource> {
        Arc::new(ScriptedSource {
            state: self.state.clone(),
        })
    }

    pub fn actuator(&self) -> Arc<dyn ElementActuator> {
        Arc::new(ScriptedActuator {
            state: self.state.clone(),
        })
    }
}

/// `AccessibilitySource` handle onto a [`ScriptedPage`].
pub struct ScriptedSource {
    state: Arc<PageState>,
}

#[async_trait]
impl AccessibilitySource for ScriptedSource {
    async fn get_full_tree(&self, target: &str) -> anyhow::Result<Value> {
        if *lock(&self.state.offline) {
            anyhow::bail!("scripted source is offline");
        }
        lock(&self.state.trees)
            .get(target)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no tree scripted for target {target}"))
    }

    async fn get_frame_tree(&self, target: &str) -> anyhow::Result<Vec<FrameTarget>> {
        if *lock(&self.state.offline) {
            anyhow::bail!("scripted source is offline");
        }
        Ok(lock(&self.state.frames)
            .get(target)
            .cloned()
            .unwrap_or_default())
    }
}

/// `ElementActuator` handle onto a [`ScriptedPage`].
pub struct ScriptedActuator {
    state: Arc<PageState>,
}

#[async_trait]
impl ElementActuator for ScriptedActuator {
    async fn click(&self, backend_ref: &BackendRef) -> Result<String, ShellError> {
        self.state.check_ref(backend_ref)?;
        self.state
            .record(format!("click {}", PageState::canonical(backend_ref)));
        Ok("clicked".to_string())
    }

    async fn focus(&self, backend_ref: &BackendRef) -> Result<String, ShellError> {
        self.state.check_ref(backend_ref)?;
        self.state
            .record(format!("focus {}", PageState::canonical(backend_ref)));
        Ok("focused".to_string())
    }

    async fn type_text(&self, text: &str) -> Result<String, ShellError> {
        self.state.record(format!("type {text}"));
        Ok(format!("typed {} chars", text.chars().count()))
    }

    async fn read_text(&self, backend_ref: &BackendRef) -> Result<String, ShellError> {
        self.state.check_ref(backend_ref)?;
        Ok(self.state.text_of(backend_ref))
    }

    async fn whoami(&self) -> Result<String, ShellError> {
        Ok("scripted-session".to_string())
    }
}
