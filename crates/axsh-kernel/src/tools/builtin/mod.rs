//! Built-in tools: the shell command surface over the virtual filesystem.

mod actuate;
mod cat;
mod cd;
mod env;
mod find;
mod grep;
mod ls;
mod pwd;
mod tree;

use axsh_types::{NodeId, VfsEntry};

use super::ToolRegistry;
use crate::vfs::VfsMapper;

/// Register all built-in tools with the registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(ls::Ls);
    registry.register(cd::Cd);
    registry.register(pwd::Pwd);
    registry.register(cat::Cat);
    registry.register(grep::Grep);
    registry.register(find::Find);
    registry.register(tree::Tree);
    registry.register(env::Env);
    registry.register(env::Export);
    registry.register(actuate::Click);
    registry.register(actuate::Focus);
    registry.register(actuate::TypeText);
    registry.register(actuate::Whoami);
}

/// Depth-first walk over the virtual tree, visiting every listed entry with
/// its path. `base` is the absolute path of `start` (`/` for root);
/// `max_depth` of 1 visits only the immediate children.
pub(crate) fn walk(
    vfs: &VfsMapper,
    start: &NodeId,
    base: &str,
    max_depth: Option<usize>,
    visit: &mut dyn FnMut(&str, &VfsEntry),
) {
    if max_depth == Some(0) {
        return;
    }
    for entry in vfs.list_children(start) {
        let path = join_path(base, &entry.display_name);
        visit(&path, &entry);
        if entry.is_directory {
            walk(
                vfs,
                &entry.id,
                &path,
                max_depth.map(|d| d - 1),
                visit,
            );
        }
    }
}

pub(crate) fn join_path(base: &str, name: &str) -> String {
    if base == "/" {
        format!("/{name}")
    } else {
        format!("{base}/{name}")
    }
}

#[cfg(test)]
pub(crate) mod testkit {
    //! Shared fixtures for builtin-tool tests.

    use std::sync::Arc;

    use axsh_types::{AXNode, BackendRef, NodeMap};
    use serde_json::json;

    use super::*;
    use crate::source::ScriptedPage;
    use crate::tools::ExecContext;

    pub fn node(id: &str, role: &str, name: &str, children: &[&str]) -> AXNode {
        AXNode {
            id: id.into(),
            role: role.into(),
            name: name.into(),
            description: String::new(),
            value: String::new(),
            child_ids: children.iter().map(|c| NodeId::from(*c)).collect(),
            ignored: false,
            backend_ref: None,
        }
    }

    pub fn ctx_for(nodes: Vec<AXNode>) -> ExecContext {
        let root = nodes[0].id.clone();
        let mut map = NodeMap::new();
        for n in nodes {
            map.insert(n);
        }
        ExecContext::new(
            Arc::new(VfsMapper::new(map, root)),
            ScriptedPage::new().actuator(),
        )
    }

    /// A small page: root with a nav directory, a login form, and a loose
    /// link. Backend refs are wired to a scripted page so actuation works.
    pub fn page_ctx() -> (ScriptedPage, ExecContext) {
        let page = ScriptedPage::with_tree(
            "page",
            json!({
                "nodes": [
                    {"nodeId": "1", "role": {"value": "RootWebArea"}, "name": {"value": "Page"}},
                    {"nodeId": "4", "role": {"value": "button"}, "name": {"value": "Submit"}, "backendDOMNodeId": 40},
                ]
            }),
        );

        let mut nodes = vec![
            node("1", "RootWebArea", "Page", &["2", "3", "6"]),
            node("2", "navigation", "", &["5"]),
            node("3", "form", "Login", &["4"]),
            node("4", "button", "Submit", &[]),
            node("5", "link", "Home", &[]),
            node("6", "link", "Privacy policy", &[]),
        ];
        nodes[3].backend_ref = Some(BackendRef(json!(40)));
        nodes[3].value = "ready".into();

        let root = nodes[0].id.clone();
        let mut map = NodeMap::new();
        for n in nodes {
            map.insert(n);
        }
        let ctx = ExecContext::new(Arc::new(VfsMapper::new(map, root)), page.actuator());
        (page, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::testkit::*;
    use super::*;

    #[test]
    fn walk_respects_max_depth() {
        let (_page, ctx) = page_ctx();
        let mut shallow = Vec::new();
        walk(&ctx.vfs, ctx.current(), "/", Some(1), &mut |path, _| {
            shallow.push(path.to_string());
        });
        assert_eq!(shallow, vec!["/navigation", "/login", "/privacy_policy_link"]);

        let mut all = Vec::new();
        walk(&ctx.vfs, ctx.current(), "/", None, &mut |path, _| {
            all.push(path.to_string());
        });
        assert!(all.contains(&"/navigation/home_link".to_string()));
        assert!(all.contains(&"/login/submit_btn".to_string()));
    }
}
