//! Inertness Resolver
//!
//! Pure ancestor walk; called on every focus and click event.

use fos_dom::NodeId;

use crate::InertHost;

/// Nearest element carrying `marker` on the shadow-including ancestor
/// chain of `node` (inclusive), or `None` once the document is reached.
pub fn made_inert_by<H>(host: &H, node: NodeId, marker: &str) -> Option<NodeId>
where
    H: InertHost + ?Sized,
{
    let document = host.document();
    let mut start = Some(node);
    while let Some(scope_start) = start {
        let mut current = Some(scope_start);
        while let Some(element) = current {
            if host.has_attribute(element, marker) {
                return Some(element);
            }
            current = host.parent_element(element);
        }

        let root = host.root_node(scope_start);
        if root == document {
            break;
        }
        // Shadow root: continue from its host. Detached subtree: stop.
        start = host.shadow_host(root);
    }
    None
}

/// Whether some inclusive ancestor of `node` carries `marker`
pub fn is_inert<H>(host: &H, node: NodeId, marker: &str) -> bool
where
    H: InertHost + ?Sized,
{
    made_inert_by(host, node, marker).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INERT_ATTRIBUTE;
    use fos_dom::{Document, ShadowRootInit};

    #[test]
    fn test_no_marker() {
        let mut doc = Document::default();
        let body = doc.body();
        let input = doc.create_element("input");
        doc.append_child(body, input).unwrap();

        assert_eq!(made_inert_by(&doc, input, INERT_ATTRIBUTE), None);
        assert!(!is_inert(&doc, doc.root(), INERT_ATTRIBUTE));
    }

    #[test]
    fn test_nearest_marker_wins() {
        let mut doc = Document::default();
        let body = doc.body();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        let text = doc.create_text("label");
        doc.append_child(body, outer).unwrap();
        doc.append_child(outer, inner).unwrap();
        doc.append_child(inner, text).unwrap();
        doc.set_attribute(outer, "inert", "").unwrap();
        doc.set_attribute(inner, "inert", "").unwrap();

        assert_eq!(made_inert_by(&doc, text, INERT_ATTRIBUTE), Some(inner));
        assert_eq!(made_inert_by(&doc, outer, INERT_ATTRIBUTE), Some(outer));
    }

    #[test]
    fn test_crosses_shadow_boundary() {
        let mut doc = Document::default();
        let body = doc.body();
        let container = doc.create_element("section");
        let host = doc.create_element("div");
        doc.append_child(body, container).unwrap();
        doc.append_child(container, host).unwrap();
        let shadow = doc.attach_shadow(host, ShadowRootInit::closed()).unwrap();
        let wrapper = doc.create_element("div");
        let button = doc.create_element("button");
        doc.append_child(shadow, wrapper).unwrap();
        doc.append_child(wrapper, button).unwrap();

        assert!(!is_inert(&doc, button, INERT_ATTRIBUTE));
        doc.set_attribute(container, "inert", "").unwrap();
        assert_eq!(made_inert_by(&doc, button, INERT_ATTRIBUTE), Some(container));
        assert_eq!(made_inert_by(&doc, shadow, INERT_ATTRIBUTE), Some(container));
    }

    #[test]
    fn test_detached_subtree_terminates() {
        let mut doc = Document::default();
        let loose = doc.create_element("div");
        let child = doc.create_element("input");
        doc.append_child(loose, child).unwrap();

        assert!(!is_inert(&doc, child, INERT_ATTRIBUTE));
        doc.set_attribute(loose, "inert", "").unwrap();
        assert_eq!(made_inert_by(&doc, child, INERT_ATTRIBUTE), Some(loose));
    }

    #[test]
    fn test_custom_marker() {
        let mut doc = Document::default();
        let body = doc.body();
        let div = doc.create_element("div");
        doc.append_child(body, div).unwrap();
        doc.set_attribute(div, "data-inert", "").unwrap();

        assert!(!is_inert(&doc, div, INERT_ATTRIBUTE));
        assert!(is_inert(&doc, div, "data-inert"));
    }
}
