//! Role tables driving classification and name suffixes.
//!
//! One closed classification per node, computed from these sets, instead of
//! role-string comparisons scattered through the command set. Matching is
//! ASCII-case-insensitive because bridges disagree on role casing
//! (`generic` vs `GenericContainer`, `textbox` vs `TextField`).

/// Roles that always map to a directory.
pub const CONTAINER_ROLES: &[&str] = &[
    "RootWebArea",
    "WebArea",
    "document",
    "navigation",
    "form",
    "list",
    "listitem",
    "dialog",
    "region",
    "table",
    "row",
    "rowgroup",
    "cell",
    "generic",
    "group",
    "main",
    "banner",
    "contentinfo",
    "complementary",
    "article",
    "section",
    "paragraph",
    "toolbar",
    "menu",
    "menubar",
    "tree",
    "grid",
    "tabpanel",
    "tablist",
];

/// Interactive roles: always files, never promoted to directories by having
/// children (a link wrapping an image is still a link).
pub const INTERACTIVE_ROLES: &[&str] = &[
    "button",
    "link",
    "textbox",
    "checkbox",
    "radio",
    "combobox",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "option",
    "switch",
    "tab",
    "slider",
    "spinbutton",
    "searchbox",
];

/// Role → display-name suffix. Unmapped roles get no suffix.
const ROLE_SUFFIXES: &[(&str, &str)] = &[
    ("button", "_btn"),
    ("link", "_link"),
    ("textbox", "_input"),
    ("searchbox", "_input"),
    ("checkbox", "_chk"),
    ("radio", "_radio"),
    ("combobox", "_select"),
    ("menuitem", "_item"),
    ("menuitemcheckbox", "_item"),
    ("menuitemradio", "_item"),
    ("tab", "_tab"),
    ("switch", "_switch"),
];

pub fn is_container(role: &str) -> bool {
    CONTAINER_ROLES.iter().any(|r| r.eq_ignore_ascii_case(role))
}

pub fn is_interactive(role: &str) -> bool {
    INTERACTIVE_ROLES.iter().any(|r| r.eq_ignore_ascii_case(role))
}

pub fn suffix_for(role: &str) -> &'static str {
    ROLE_SUFFIXES
        .iter()
        .find(|(r, _)| r.eq_ignore_ascii_case(role))
        .map(|(_, s)| *s)
        .unwrap_or("")
}
