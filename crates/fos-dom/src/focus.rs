//! Focus Model
//!
//! Focusability, tab index and the host's native sequential navigation
//! order. Native navigation knows nothing about `inert`.

use crate::{DomTree, NodeId};

/// Sequential navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Forward,
    Backward,
}

/// Elements focusable without a tabindex attribute
const NATIVELY_FOCUSABLE: &[&str] = &["button", "select", "textarea", "iframe", "summary"];

/// Form controls honoring `disabled`
const DISABLEABLE: &[&str] = &["button", "input", "select", "textarea"];

/// Parse a tabindex attribute value
pub fn parse_tab_index(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok()
}

/// Effective tab index; absent or unparseable values count as 0
pub fn tab_index(tree: &DomTree, id: NodeId) -> i32 {
    tree.element(id)
        .and_then(|e| e.get_attr("tabindex"))
        .and_then(parse_tab_index)
        .unwrap_or(0)
}

/// Whether the element can receive focus at all
pub fn is_focusable(tree: &DomTree, id: NodeId) -> bool {
    let Some(element) = tree.element(id) else {
        return false;
    };
    if DISABLEABLE.contains(&element.tag.as_str()) && element.has_attr("disabled") {
        return false;
    }
    if element.get_attr("tabindex").and_then(parse_tab_index).is_some() {
        return true;
    }
    if let Some(editable) = element.get_attr("contenteditable") {
        if !editable.eq_ignore_ascii_case("false") {
            return true;
        }
    }
    match element.tag.as_str() {
        "input" => !element
            .get_attr("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("hidden")),
        "a" | "area" => element.has_attr("href"),
        tag => NATIVELY_FOCUSABLE.contains(&tag),
    }
}

/// Native Tab order of a scope (document or shadow root), with nested
/// shadow scopes spliced in after their host.
///
/// Within a scope: positive tab indices ascending (ties in tree order),
/// then tab index 0 in tree order.
pub fn sequential_navigation_order(tree: &DomTree, scope: NodeId) -> Vec<NodeId> {
    let mut positive = Vec::new();
    let mut rest = Vec::new();

    for (position, id) in tree.tree_order_elements(scope).into_iter().enumerate() {
        let index = tab_index(tree, id);
        if index > 0 && is_focusable(tree, id) {
            positive.push((index, position, id));
        } else if (index == 0 && is_focusable(tree, id)) || tree.shadow_root_of(id).is_some() {
            rest.push(id);
        }
    }
    positive.sort_by_key(|&(index, position, _)| (index, position));

    let mut order = Vec::new();
    for id in positive.into_iter().map(|(_, _, id)| id).chain(rest) {
        if is_focusable(tree, id) && tab_index(tree, id) >= 0 {
            order.push(id);
        }
        if let Some(shadow) = tree.shadow_root_of(id) {
            order.extend(sequential_navigation_order(tree, shadow));
        }
    }
    order
}
