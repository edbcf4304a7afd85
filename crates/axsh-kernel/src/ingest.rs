//! Accessibility ingestion: fetch, frame merge, strict parse, root election.
//!
//! Records arrive from the source as loose CDP-shaped JSON and are parsed
//! into strict [`AXNode`]s right here at the boundary; nothing downstream
//! touches raw JSON. Every ingestion rebuilds the whole `NodeMap` — there is
//! no incremental patching.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use axsh_types::{AXNode, BackendRef, NodeId, NodeMap, ShellError};

use crate::source::AccessibilitySource;

/// Roles marking a top-level document area, in the order CDP reports them.
const TOP_LEVEL_DOCUMENT_ROLES: &[&str] = &["RootWebArea", "WebArea", "document"];

/// Fetches and merges accessibility trees for one bound target.
pub struct Ingestor {
    source: Arc<dyn AccessibilitySource>,
    target: Option<String>,
}

impl Ingestor {
    pub fn new(source: Arc<dyn AccessibilitySource>) -> Self {
        Self {
            source,
            target: None,
        }
    }

    /// The currently bound target, if any.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Bind to a target. Idempotent for the same target; a different target
    /// replaces the previous binding. Probes the source so an unreachable
    /// bridge fails here rather than on the first command.
    pub async fn attach(&mut self, target: &str) -> Result<(), ShellError> {
        if self.target.as_deref() != Some(target) {
            self.target = None;
        }
        self.source
            .get_frame_tree(target)
            .await
            .map_err(|e| ShellError::IngestionFailure(format!("{e:#}")))?;
        self.target = Some(target.to_string());
        Ok(())
    }

    /// Drop the binding.
    pub fn detach(&mut self) {
        self.target = None;
    }

    /// Fetch the full node list: main document first, then every sub-frame,
    /// merged into one sequence with frame-ordinal id prefixes.
    ///
    /// A sub-frame whose fetch fails is skipped with a warning; the merge
    /// continues with the remaining frames.
    pub async fn fetch_tree(&self) -> Result<Vec<AXNode>, ShellError> {
        let target = self.target.as_deref().ok_or(ShellError::NotAttached)?;

        let main_doc = self
            .source
            .get_full_tree(target)
            .await
            .map_err(|e| ShellError::IngestionFailure(format!("{e:#}")))?;
        let mut nodes = parse_nodes(&main_doc, 0);

        let frames = self
            .source
            .get_frame_tree(target)
            .await
            .map_err(|e| ShellError::IngestionFailure(format!("{e:#}")))?;

        for (index, frame) in frames.iter().enumerate() {
            let ordinal = index + 1;
            match self.source.get_full_tree(&frame.target_id).await {
                Ok(doc) => nodes.extend(parse_nodes(&doc, ordinal)),
                Err(e) => {
                    warn!(frame = %frame.target_id, error = %format!("{e:#}"), "skipping unreachable frame");
                }
            }
        }

        debug!(target, frames = frames.len(), nodes = nodes.len(), "fetched tree");
        Ok(nodes)
    }

    /// Build the node map from raw records, dropping every ignored node.
    ///
    /// References to dropped children are not repaired; they fail to resolve
    /// and are treated as absent during traversal.
    pub fn build_node_map(raw: Vec<AXNode>) -> NodeMap {
        let mut map = NodeMap::new();
        for node in raw {
            if node.ignored {
                continue;
            }
            map.insert(node);
        }
        map
    }

    /// Elect the tree root: the first node whose role marks a top-level
    /// document area, else the first node in ingestion order. With multiple
    /// document areas (e.g. frames) the main frame wins because its nodes
    /// are ingested first.
    pub fn find_root(map: &NodeMap) -> Option<NodeId> {
        map.ids_in_order()
            .find(|id| {
                map.get(id)
                    .is_some_and(|n| TOP_LEVEL_DOCUMENT_ROLES.contains(&n.role.as_str()))
            })
            .or_else(|| map.ids_in_order().next())
            .cloned()
    }
}

/// Parse one CDP-shaped `{"nodes": [...]}` document.
fn parse_nodes(doc: &Value, frame_ordinal: usize) -> Vec<AXNode> {
    let Some(raw_nodes) = doc.get("nodes").and_then(Value::as_array) else {
        return Vec::new();
    };
    raw_nodes
        .iter()
        .filter_map(|raw| parse_node(raw, frame_ordinal))
        .collect()
}

/// Parse one raw record. Records without an id are unusable and dropped.
fn parse_node(raw: &Value, frame_ordinal: usize) -> Option<AXNode> {
    let raw_id = id_string(raw.get("nodeId")?)?;
    let child_ids = raw
        .get("childIds")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(id_string)
                .map(|id| NodeId::in_frame(frame_ordinal, &id))
                .collect()
        })
        .unwrap_or_default();

    Some(AXNode {
        id: NodeId::in_frame(frame_ordinal, &raw_id),
        role: ax_value(raw, "role"),
        name: ax_value(raw, "name"),
        description: ax_value(raw, "description"),
        value: ax_value(raw, "value"),
        child_ids,
        ignored: raw.get("ignored").and_then(Value::as_bool).unwrap_or(false),
        backend_ref: raw.get("backendDOMNodeId").cloned().map(BackendRef),
    })
}

/// CDP wraps role/name/value/description as `{"type": …, "value": …}`;
/// accept the bare string form too.
fn ax_value(node: &Value, field: &str) -> String {
    node.get(field)
        .and_then(|v| v.get("value").and_then(Value::as_str).or_else(|| v.as_str()))
        .unwrap_or("")
        .to_string()
}

/// Node ids appear as strings or integers depending on the bridge.
fn id_string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedPage;
    use axsh_types::FrameTarget;
    use serde_json::json;

    fn main_tree() -> Value {
        json!({
            "nodes": [
                {
                    "nodeId": "1",
                    "role": {"value": "RootWebArea"},
                    "name": {"value": "Example"},
                    "childIds": ["2", "3"],
                },
                {
                    "nodeId": "2",
                    "role": {"value": "button"},
                    "name": {"value": "Go"},
                    "backendDOMNodeId": 20,
                },
                {
                    "nodeId": "3",
                    "role": {"value": "generic"},
                    "ignored": true,
                },
            ]
        })
    }

    fn frame_tree() -> Value {
        json!({
            "nodes": [
                {
                    "nodeId": "1",
                    "role": {"value": "RootWebArea"},
                    "name": {"value": "Ad frame"},
                    "childIds": ["2"],
                },
                {
                    "nodeId": "2",
                    "role": {"value": "link"},
                    "name": {"value": "Buy now"},
                    "backendDOMNodeId": 40,
                },
            ]
        })
    }

    async fn attached(page: &ScriptedPage) -> Ingestor {
        let mut ingestor = Ingestor::new(page.source());
        ingestor.attach("page").await.unwrap();
        ingestor
    }

    #[tokio::test]
    async fn frame_ids_get_ordinal_prefixes() {
        let page = ScriptedPage::with_tree("page", main_tree());
        page.set_tree("frame-a", frame_tree());
        page.set_frames(
            "page",
            vec![FrameTarget {
                target_id: "frame-a".into(),
            }],
        );

        let ingestor = attached(&page).await;
        let raw = ingestor.fetch_tree().await.unwrap();

        let ids: Vec<_> = raw.iter().map(|n| n.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "1:1", "1:2"]);

        // child references inside the frame are prefixed the same way
        let frame_root = raw.iter().find(|n| n.id.as_str() == "1:1").unwrap();
        assert_eq!(frame_root.child_ids, vec![NodeId::from("1:2")]);
    }

    #[tokio::test]
    async fn unreachable_frame_is_skipped() {
        let page = ScriptedPage::with_tree("page", main_tree());
        page.set_frames(
            "page",
            vec![FrameTarget {
                target_id: "missing-frame".into(),
            }],
        );

        let ingestor = attached(&page).await;
        let raw = ingestor.fetch_tree().await.unwrap();
        assert_eq!(raw.len(), 3);
    }

    #[tokio::test]
    async fn ignored_nodes_are_dropped_from_the_map() {
        let page = ScriptedPage::with_tree("page", main_tree());
        let ingestor = attached(&page).await;
        let map = Ingestor::build_node_map(ingestor.fetch_tree().await.unwrap());

        assert_eq!(map.len(), 2);
        assert!(!map.contains(&"3".into()));
        // the parent still references the dropped child; not repaired
        assert!(map.get(&"1".into()).unwrap().child_ids.contains(&"3".into()));
    }

    #[tokio::test]
    async fn root_prefers_top_level_document_role() {
        let page = ScriptedPage::with_tree(
            "page",
            json!({
                "nodes": [
                    {"nodeId": "5", "role": {"value": "generic"}},
                    {"nodeId": "6", "role": {"value": "RootWebArea"}},
                ]
            }),
        );
        let ingestor = attached(&page).await;
        let map = Ingestor::build_node_map(ingestor.fetch_tree().await.unwrap());
        assert_eq!(Ingestor::find_root(&map), Some("6".into()));
    }

    #[tokio::test]
    async fn root_falls_back_to_first_ingested() {
        let page = ScriptedPage::with_tree(
            "page",
            json!({
                "nodes": [
                    {"nodeId": "5", "role": {"value": "generic"}},
                    {"nodeId": "6", "role": {"value": "button"}},
                ]
            }),
        );
        let ingestor = attached(&page).await;
        let map = Ingestor::build_node_map(ingestor.fetch_tree().await.unwrap());
        assert_eq!(Ingestor::find_root(&map), Some("5".into()));
    }

    #[tokio::test]
    async fn attach_fails_when_source_unreachable() {
        let page = ScriptedPage::new();
        page.set_offline(true);
        let mut ingestor = Ingestor::new(page.source());
        let err = ingestor.attach("page").await.unwrap_err();
        assert!(matches!(err, ShellError::IngestionFailure(_)));
        assert_eq!(ingestor.target(), None);
    }

    #[tokio::test]
    async fn attach_is_idempotent_and_rebinds() {
        let page = ScriptedPage::with_tree("page", main_tree());
        let mut ingestor = attached(&page).await;
        ingestor.attach("page").await.unwrap();
        assert_eq!(ingestor.target(), Some("page"));

        page.set_tree("other", main_tree());
        ingestor.attach("other").await.unwrap();
        assert_eq!(ingestor.target(), Some("other"));
    }

    #[test]
    fn numeric_ids_are_accepted() {
        let doc = json!({
            "nodes": [
                {"nodeId": 7, "role": {"value": "button"}, "childIds": [8]},
            ]
        });
        let nodes = parse_nodes(&doc, 0);
        assert_eq!(nodes[0].id, NodeId::from("7"));
        assert_eq!(nodes[0].child_ids, vec![NodeId::from("8")]);
    }
}
