//! End-to-end tests driving the full command surface through `Kernel::execute`,
//! the way the outer bridge does: plain text in, plain text out.

use serde_json::{json, Value};

use axsh_kernel::source::ScriptedPage;
use axsh_kernel::{Kernel, KernelConfig};
use axsh_types::FrameTarget;

/// A login page: nav with two links, a form with username/password/submit,
/// and an anonymous generic wrapper around a lone button.
fn login_page() -> Value {
    json!({
        "nodes": [
            {"nodeId": "1", "role": {"value": "RootWebArea"}, "name": {"value": "Sign in"},
             "childIds": ["2", "5", "10"]},
            {"nodeId": "2", "role": {"value": "navigation"}, "name": {"value": ""},
             "childIds": ["3", "4"]},
            {"nodeId": "3", "role": {"value": "link"}, "name": {"value": "Home"},
             "backendDOMNodeId": 30},
            {"nodeId": "4", "role": {"value": "link"}, "name": {"value": "About"},
             "backendDOMNodeId": 31},
            {"nodeId": "5", "role": {"value": "form"}, "name": {"value": "Login"},
             "childIds": ["6", "7", "8", "9"]},
            {"nodeId": "6", "role": {"value": "textbox"}, "name": {"value": "Username"},
             "backendDOMNodeId": 32},
            {"nodeId": "7", "role": {"value": "textbox"}, "name": {"value": "Password"},
             "backendDOMNodeId": 33},
            {"nodeId": "8", "role": {"value": "button"}, "name": {"value": "Submit"},
             "backendDOMNodeId": 34},
            {"nodeId": "9", "role": {"value": "button"}, "name": {"value": "Submit"},
             "backendDOMNodeId": 35},
            {"nodeId": "10", "role": {"value": "generic"}, "name": {"value": ""},
             "childIds": ["11"]},
            {"nodeId": "11", "role": {"value": "button"}, "name": {"value": "Go"},
             "backendDOMNodeId": 36},
        ]
    })
}

async fn attached(page: &ScriptedPage) -> Kernel {
    let mut kernel = Kernel::new(KernelConfig::default(), page.source(), page.actuator());
    let result = kernel.execute("attach").await;
    assert!(result.ok(), "attach failed: {}", result.err);
    kernel
}

#[tokio::test]
async fn attach_ls_cd_pwd_happy_path() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;

    let ls = kernel.run("ls").await;
    assert_eq!(ls, "navigation/\nlogin/\ngo_btn");

    assert!(kernel.execute("cd login").await.ok());
    assert_eq!(kernel.run("pwd").await, "/login");

    let ls = kernel.run("ls").await;
    assert_eq!(
        ls,
        "username_input\npassword_input\nsubmit_btn\nsubmit_btn_2"
    );
}

// ── Scenario A: empty root ─────────────────────────────────────────────

#[tokio::test]
async fn empty_root_has_explicit_markers() {
    let page = ScriptedPage::with_tree(
        "page",
        json!({"nodes": [
            {"nodeId": "1", "role": {"value": "RootWebArea"}, "name": {"value": "Blank"}},
        ]}),
    );
    let mut kernel = attached(&page).await;

    assert_eq!(kernel.run("ls").await, "(empty)");
    assert_eq!(kernel.run("grep anything").await, "grep: no matches");
    assert_eq!(kernel.run("find anything").await, "find: no matches");
    assert_eq!(kernel.run("tree").await, "/");
}

// ── Scenario B: duplicate siblings ─────────────────────────────────────

#[tokio::test]
async fn duplicate_buttons_are_numbered_in_traversal_order() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;

    let ls = kernel.run("ls login").await;
    assert_eq!(
        ls.lines().collect::<Vec<_>>(),
        vec!["username_input", "password_input", "submit_btn", "submit_btn_2"]
    );
}

// ── Scenario C: anonymous wrapper flattening ───────────────────────────

#[tokio::test]
async fn anonymous_generic_wrapper_is_invisible() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;

    let ls = kernel.run("ls").await;
    assert!(ls.contains("go_btn"));
    assert!(!ls.contains("generic"));

    // and the flattened entry is directly actuatable
    assert_eq!(kernel.run("click go_btn").await, "clicked");
    assert_eq!(page.actions(), vec!["click 36"]);
}

// ── Scenario D: non-atomic cd ──────────────────────────────────────────

#[tokio::test]
async fn partial_cd_keeps_successful_segments() {
    let page = ScriptedPage::with_tree(
        "page",
        json!({"nodes": [
            {"nodeId": "1", "role": {"value": "RootWebArea"}, "name": {"value": "P"},
             "childIds": ["2"]},
            {"nodeId": "2", "role": {"value": "main"}, "name": {"value": ""},
             "childIds": ["3"]},
            {"nodeId": "3", "role": {"value": "link"}, "name": {"value": "Out"}},
        ]}),
    );
    let mut kernel = attached(&page).await;

    let result = kernel.execute("cd main/form").await;
    assert!(!result.ok());
    assert!(result.err.contains("no such path: form"));
    assert_eq!(kernel.run("pwd").await, "/main");
}

// ── Scenario E: stale references after refresh ─────────────────────────

#[tokio::test]
async fn removed_element_fails_with_stale_reference() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;

    assert_eq!(kernel.run("click navigation/home_link").await, "clicked");

    // the page lost the nav; kernel refreshes and the agent retries blindly
    page.set_tree(
        "page",
        json!({"nodes": [
            {"nodeId": "1", "role": {"value": "RootWebArea"}, "name": {"value": "P"},
             "childIds": ["2"]},
            {"nodeId": "2", "role": {"value": "button"}, "name": {"value": "Only"},
             "backendDOMNodeId": 99},
        ]}),
    );
    assert_eq!(kernel.run("refresh").await, "refreshed");

    let result = kernel.execute("click only_btn").await;
    assert!(result.ok());

    // a ref cached from before the refresh is rejected by the actuator
    let stale = axsh_types::BackendRef(json!(30));
    let err = page.actuator().click(&stale).await.unwrap_err();
    assert!(matches!(err, axsh_types::ShellError::StaleReference(_)));
}

// ── State machine ──────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_resets_cwd_and_detach_clears_state() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;

    kernel.execute("cd login").await;
    kernel.execute("export FOO=1").await;
    assert_eq!(kernel.run("refresh").await, "refreshed");
    assert_eq!(kernel.run("pwd").await, "/");
    // env survives refresh
    assert_eq!(kernel.run("env").await, "FOO=1");

    assert_eq!(kernel.run("detach").await, "detached");
    let result = kernel.execute("pwd").await;
    assert!(!result.ok());
    assert!(result.err.contains("not attached"));

    // re-attach starts a fresh ShellState
    assert!(kernel.execute("attach").await.ok());
    assert_eq!(kernel.run("env").await, "");
}

#[tokio::test]
async fn attach_failure_stays_detached() {
    let page = ScriptedPage::new();
    page.set_offline(true);
    let mut kernel = Kernel::new(KernelConfig::default(), page.source(), page.actuator());

    let result = kernel.execute("attach").await;
    assert!(!result.ok());
    assert!(result.err.contains("ingestion failed"));
    assert!(!kernel.is_attached());
}

#[tokio::test]
async fn failed_refresh_keeps_the_old_snapshot() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;
    kernel.execute("cd login").await;

    page.set_offline(true);
    let result = kernel.execute("refresh").await;
    assert!(!result.ok());

    // prior snapshot and CWD remain fully intact
    assert_eq!(kernel.run("pwd").await, "/login");
    assert!(kernel.run("ls").await.contains("submit_btn"));
}

// ── Path rendering ─────────────────────────────────────────────────────

#[tokio::test]
async fn cd_root_and_dotdot_edge_cases() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;

    kernel.execute("cd login").await;
    assert!(kernel.execute("cd /").await.ok());
    assert_eq!(kernel.run("pwd").await, "/");

    assert!(kernel.execute("cd ..").await.ok());
    assert_eq!(kernel.run("pwd").await, "/");
}

#[tokio::test]
async fn pwd_reflects_disambiguated_names() {
    let page = ScriptedPage::with_tree(
        "page",
        json!({"nodes": [
            {"nodeId": "1", "role": {"value": "RootWebArea"}, "name": {"value": "P"},
             "childIds": ["2", "3"]},
            {"nodeId": "2", "role": {"value": "region"}, "name": {"value": "Panel"}},
            {"nodeId": "3", "role": {"value": "region"}, "name": {"value": "Panel"},
             "childIds": ["4"]},
            {"nodeId": "4", "role": {"value": "button"}, "name": {"value": "Hi"},
             "backendDOMNodeId": 7},
        ]}),
    );
    let mut kernel = attached(&page).await;

    assert!(kernel.execute("cd panel_2").await.ok());
    assert_eq!(kernel.run("pwd").await, "/panel_2");
    assert!(kernel.run("ls").await.contains("hi_btn"));
}

// ── Multi-frame merge ──────────────────────────────────────────────────

#[tokio::test]
async fn frames_merge_into_one_tree() {
    let page = ScriptedPage::with_tree(
        "page",
        json!({"nodes": [
            {"nodeId": "1", "role": {"value": "RootWebArea"}, "name": {"value": "Host"},
             "childIds": ["2"]},
            {"nodeId": "2", "role": {"value": "button"}, "name": {"value": "Host button"},
             "backendDOMNodeId": 1},
        ]}),
    );
    page.set_tree(
        "frame-a",
        json!({"nodes": [
            {"nodeId": "1", "role": {"value": "RootWebArea"}, "name": {"value": "Embedded"},
             "childIds": ["2"]},
            {"nodeId": "2", "role": {"value": "button"}, "name": {"value": "Frame button"},
             "backendDOMNodeId": 2},
        ]}),
    );
    page.set_frames(
        "page",
        vec![FrameTarget {
            target_id: "frame-a".into(),
        }],
    );
    let mut kernel = attached(&page).await;

    // the main document wins root election; its button is listed
    assert_eq!(kernel.run("ls").await, "host_button_btn");

    // frame nodes exist under prefixed ids and can be reached via find
    // once a future overlay mounts them; here we just confirm no id clash
    assert_eq!(kernel.run("ls --count").await, "1");
}

// ── grep / find / tree over a deeper page ──────────────────────────────

#[tokio::test]
async fn grep_find_tree_cover_the_subtree() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;

    let grep = kernel.run("grep -r submit").await;
    assert!(grep.contains("/login/submit_btn:"));
    assert!(grep.contains("/login/submit_btn_2:"));

    let find = kernel.run("find submit").await;
    assert_eq!(find, "/login/submit_btn\n/login/submit_btn_2");

    let tree = kernel.run("tree").await;
    assert!(tree.starts_with("/\n"));
    assert!(tree.contains("├── navigation/"));
    assert!(tree.contains("│   ├── home_link"));
    assert!(tree.contains("└── go_btn"));

    kernel.execute("cd login").await;
    let find = kernel.run("find --type textbox").await;
    assert_eq!(find, "/login/username_input\n/login/password_input");
}

#[tokio::test]
async fn cat_shows_the_record_view() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;

    let out = kernel.run("cat login/username_input").await;
    assert_eq!(out, "role: textbox\nname: Username");

    let out = kernel.run("cat /").await;
    assert!(out.contains("role: RootWebArea"));
}

#[tokio::test]
async fn type_and_whoami_are_delegated() {
    let page = ScriptedPage::with_tree("page", login_page());
    let mut kernel = attached(&page).await;

    assert!(kernel.execute("focus login/username_input").await.ok());
    assert_eq!(kernel.run("type \"amy tobey\"").await, "typed 9 chars");
    assert_eq!(kernel.run("whoami").await, "scripted-session");
    assert_eq!(page.actions(), vec!["focus 32", "type amy tobey"]);
}

#[tokio::test]
async fn ignored_nodes_never_appear() {
    let page = ScriptedPage::with_tree(
        "page",
        json!({"nodes": [
            {"nodeId": "1", "role": {"value": "RootWebArea"}, "name": {"value": "P"},
             "childIds": ["2", "3"]},
            {"nodeId": "2", "role": {"value": "button"}, "name": {"value": "Visible"},
             "backendDOMNodeId": 1},
            {"nodeId": "3", "role": {"value": "button"}, "name": {"value": "Hidden"},
             "ignored": true, "backendDOMNodeId": 2},
        ]}),
    );
    let mut kernel = attached(&page).await;

    assert_eq!(kernel.run("ls").await, "visible_btn");
    assert_eq!(kernel.run("find hidden").await, "find: no matches");
}
