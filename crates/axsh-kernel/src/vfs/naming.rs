//! Display-name generation and sibling dedup.

use axsh_types::{AXNode, VfsEntry};

use super::roles;

/// Maximum length of the sanitized base name, in characters.
const MAX_BASE_LEN: usize = 40;

/// Sanitize free text into a name fragment: lowercase, strip everything
/// outside `[a-z0-9 _-]`, collapse whitespace runs to `_`, truncate.
pub fn sanitize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join("_");
    collapsed.chars().take(MAX_BASE_LEN).collect()
}

/// Generate the display name for a node.
///
/// Base: sanitized accessible name, else sanitized description, else the
/// bare role string. A role suffix (`_btn`, `_link`, …) is appended. If even
/// the role fallback is empty, the raw node id forces non-emptiness — so the
/// name is non-empty for every non-ignored node.
pub fn generate_name(node: &AXNode) -> String {
    let mut base = sanitize(&node.name);
    if base.is_empty() {
        base = sanitize(&node.description);
    }
    if base.is_empty() {
        base = node.role.clone();
    }
    base.push_str(roles::suffix_for(&node.role));
    if base.is_empty() {
        base.push_str(node.id.as_str());
    }
    base
}

/// Disambiguate duplicate display names among siblings.
///
/// Single left-to-right pass in listing order: the first occurrence keeps
/// the bare name, later ones get `_2`, `_3`, … in order of appearance. Order
/// is traversal order; nothing is sorted. A generated name must not collide
/// with a name any sibling already carries (a literal `save_btn_2` next to
/// two `save_btn`s), so the suffix keeps bumping until the result is unused.
pub fn deduplicate(entries: &mut [VfsEntry]) {
    use std::collections::{HashMap, HashSet};

    let mut used: HashSet<String> = entries.iter().map(|e| e.display_name.clone()).collect();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for entry in entries.iter_mut() {
        let count = seen.entry(entry.display_name.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            continue;
        }
        let mut n = *count;
        let mut candidate = format!("{}_{}", entry.display_name, n);
        while used.contains(&candidate) {
            n += 1;
            candidate = format!("{}_{}", entry.display_name, n);
        }
        used.insert(candidate.clone());
        entry.display_name = candidate;
    }
}
