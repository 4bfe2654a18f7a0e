//! Traversal Engine
//!
//! Rebuilds Tab order from tree introspection. Within one traversal root
//! (document or shadow root) the order is:
//!
//! 1. positive tab indices, ascending, ties in tree order
//! 2. tab index 0 in tree order
//!
//! A non-inert shadow host is followed by its own shadow scope, at the
//! host's place in whichever group it belongs to.
//!
//! Running off either end of a shadow root continues from its host in the
//! parent root. Negative tab indices and inert candidates are excluded.

use fos_dom::NodeId;

use crate::resolver::made_inert_by;
use crate::{InertError, InertHost, TabDirection};

/// Next element that may take focus when moving from `start` in
/// `direction`, skipping anything made inert by `marker`.
///
/// `Ok(None)` means traversal ran out of candidates.
pub fn next<H>(host: &H, start: NodeId, direction: TabDirection, marker: &str) -> Result<Option<NodeId>, InertError>
where
    H: InertHost + ?Sized,
{
    let forward = match direction {
        TabDirection::None => return Ok(None),
        TabDirection::Forward => true,
        TabDirection::Backward => false,
    };
    Traversal { host, marker, forward }.run(start)
}

/// Where traversal goes after a root is exhausted
enum Ascend {
    /// Top-level document reached
    Exhausted,
    /// The host itself takes focus
    Found(NodeId),
    /// Resume from the host in its parent root
    Resume(NodeId),
}

struct Traversal<'a, H: ?Sized> {
    host: &'a H,
    marker: &'a str,
    forward: bool,
}

impl<H: InertHost + ?Sized> Traversal<'_, H> {
    fn run(&self, start: NodeId) -> Result<Option<NodeId>, InertError> {
        let document = self.host.document();
        // A host comes before its shadow scope, so moving forward from a
        // host starts inside it.
        if self.forward && made_inert_by(self.host, start, self.marker).is_none() {
            if let Some(found) = self.enter_scope(start) {
                return Ok(Some(found));
            }
        }
        let mut target = start;

        loop {
            let root = self.host.root_node(target);
            if root != document && self.host.shadow_host(root).is_none() {
                return Err(InertError::Detached(target));
            }

            let tab_index = self.host.tab_index(target);
            let mut from_group_start = false;
            if tab_index > 0 {
                let group = self.positive_group(root);
                let index = group
                    .iter()
                    .position(|&id| id == target)
                    .ok_or(InertError::MissingFromTabGroup { element: target, tab_index })?;
                if let Some(found) = self.scan_positive(&group, Some(index), root) {
                    return Ok(Some(found));
                }
                if !self.forward {
                    match self.ascend(root) {
                        Ascend::Exhausted => return Ok(None),
                        Ascend::Found(found) => return Ok(Some(found)),
                        Ascend::Resume(shadow_host) => {
                            target = shadow_host;
                            continue;
                        }
                    }
                }
                // Forward past the last positive index: index-0 elements
                // of this root, from the top.
                from_group_start = true;
            }

            let from = (!from_group_start).then_some(target);
            if let Some(found) = self.scan_primary(root, from)? {
                return Ok(Some(found));
            }
            if !self.forward {
                // Shift-Tab from the first index-0 element lands on the
                // highest positive index.
                let group = self.positive_group(root);
                if let Some(found) = self.scan_positive(&group, None, root) {
                    return Ok(Some(found));
                }
            }

            match self.ascend(root) {
                Ascend::Exhausted => return Ok(None),
                Ascend::Found(found) => return Ok(Some(found)),
                Ascend::Resume(shadow_host) => target = shadow_host,
            }
        }
    }

    /// Elements of `root` with a positive tab index, in visiting order
    fn positive_group(&self, root: NodeId) -> Vec<NodeId> {
        let mut group: Vec<(i32, usize, NodeId)> = self
            .host
            .tree_order_elements(root)
            .into_iter()
            .enumerate()
            .filter_map(|(position, id)| {
                let index = self.host.tab_index(id);
                (index > 0).then_some((index, position, id))
            })
            .collect();
        group.sort_by_key(|&(index, position, _)| (index, position));
        group.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Scan the positive group outward from `from` (or from the near end
    /// when `None`).
    fn scan_positive(&self, group: &[NodeId], from: Option<usize>, root: NodeId) -> Option<NodeId> {
        let candidates: Vec<NodeId> = match (from, self.forward) {
            (Some(i), true) => group[i + 1..].to_vec(),
            (Some(i), false) => group[..i].iter().rev().copied().collect(),
            (None, true) => group.to_vec(),
            (None, false) => group.iter().rev().copied().collect(),
        };

        let mut previous_inert: Option<NodeId> = None;
        for candidate in candidates {
            if self.host.tab_index(candidate) <= 0 {
                continue;
            }
            if previous_inert.is_some_and(|inert| self.host.contains(inert, candidate)) {
                continue;
            }
            match made_inert_by(self.host, candidate, self.marker) {
                None => {
                    let is_stop = self.host.is_focusable(candidate);
                    if let Some(found) = self.visit(candidate, is_stop, true) {
                        return Some(found);
                    }
                }
                Some(inert) => {
                    previous_inert = Some(inert);
                    if self.host.root_node(inert) != root {
                        // The whole root sits under an inert ancestor.
                        tracing::trace!("abandoning traversal root {:?}: inert via {:?}", root, inert);
                        break;
                    }
                }
            }
        }
        None
    }

    /// Scan index-0 elements of `root` from `from` (exclusive), or from
    /// the near end when `None`.
    fn scan_primary(&self, root: NodeId, from: Option<NodeId>) -> Result<Option<NodeId>, InertError> {
        let elements = self.host.tree_order_elements(root);
        let candidates: Vec<NodeId> = match from {
            Some(target) => {
                let index = elements
                    .iter()
                    .position(|&id| id == target)
                    .ok_or(InertError::Detached(target))?;
                if self.forward {
                    elements[index + 1..].to_vec()
                } else {
                    elements[..index].iter().rev().copied().collect()
                }
            }
            None if self.forward => elements,
            None => elements.into_iter().rev().collect(),
        };

        let mut previous_inert: Option<NodeId> = None;
        for candidate in candidates {
            if previous_inert.is_some_and(|inert| self.host.contains(inert, candidate)) {
                continue;
            }
            if let Some(inert) = made_inert_by(self.host, candidate, self.marker) {
                previous_inert = Some(inert);
                continue;
            }
            // Scopes of positive hosts belong to the positive group.
            let enter = self.host.tab_index(candidate) <= 0;
            if let Some(found) = self.visit(candidate, self.is_primary_stop(candidate), enter) {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// A host comes before its shadow scope: forward tries the host
    /// first, backward the scope.
    fn visit(&self, candidate: NodeId, is_stop: bool, enter: bool) -> Option<NodeId> {
        let scope = || if enter { self.enter_scope(candidate) } else { None };
        if self.forward {
            is_stop.then_some(candidate).or_else(scope)
        } else {
            scope().or(is_stop.then_some(candidate))
        }
    }

    fn is_primary_stop(&self, candidate: NodeId) -> bool {
        self.host.tab_index(candidate) == 0 && self.host.is_focusable(candidate)
    }

    /// Any tab stop, regardless of group
    fn is_tab_stop(&self, candidate: NodeId) -> bool {
        self.host.tab_index(candidate) >= 0 && self.host.is_focusable(candidate)
    }

    /// First (or last) non-inert tab stop inside the shadow scope hosted
    /// by `element`
    fn enter_scope(&self, element: NodeId) -> Option<NodeId> {
        let shadow = self.host.shadow_root_of(element)?;
        let sequence = self.scope_sequence(shadow);
        let not_inert = |id: &NodeId| made_inert_by(self.host, *id, self.marker).is_none();
        if self.forward {
            sequence.into_iter().find(not_inert)
        } else {
            sequence.into_iter().rev().find(not_inert)
        }
    }

    /// Complete Tab order of a scope, nested scopes spliced after their
    /// hosts
    fn scope_sequence(&self, scope: NodeId) -> Vec<NodeId> {
        let positive = self.positive_group(scope);
        let rest = self
            .host
            .tree_order_elements(scope)
            .into_iter()
            .filter(|&id| self.host.tab_index(id) <= 0);

        let mut sequence = Vec::new();
        for id in positive.into_iter().chain(rest) {
            if self.is_tab_stop(id) {
                sequence.push(id);
            }
            if let Some(nested) = self.host.shadow_root_of(id) {
                sequence.extend(self.scope_sequence(nested));
            }
        }
        sequence
    }

    /// Leave `root` for its host. Moving backward, the host itself is
    /// the next stop if it can take focus.
    fn ascend(&self, root: NodeId) -> Ascend {
        let Some(shadow_host) = self.host.shadow_host(root) else {
            return Ascend::Exhausted;
        };
        if !self.forward
            && self.is_tab_stop(shadow_host)
            && made_inert_by(self.host, shadow_host, self.marker).is_none()
        {
            return Ascend::Found(shadow_host);
        }
        Ascend::Resume(shadow_host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INERT_ATTRIBUTE;
    use fos_dom::{Document, ShadowRootInit};

    fn add(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
        let id = doc.create_element(tag);
        doc.append_child(parent, id).unwrap();
        id
    }

    fn add_indexed(doc: &mut Document, parent: NodeId, tab_index: i32) -> NodeId {
        let id = add(doc, parent, "input");
        doc.set_attribute(id, "tabindex", &tab_index.to_string()).unwrap();
        id
    }

    fn step(doc: &Document, from: NodeId, direction: TabDirection) -> Option<NodeId> {
        next(doc, from, direction, INERT_ATTRIBUTE).unwrap()
    }

    #[test]
    fn test_no_direction() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = add(&mut doc, body, "input");
        add(&mut doc, body, "input");
        assert_eq!(step(&doc, a, TabDirection::None), None);
    }

    #[test]
    fn test_document_order() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = add(&mut doc, body, "input");
        let div = add(&mut doc, body, "div");
        let b = add(&mut doc, div, "button");
        let c = add(&mut doc, body, "textarea");

        assert_eq!(step(&doc, a, TabDirection::Forward), Some(b));
        assert_eq!(step(&doc, b, TabDirection::Forward), Some(c));
        assert_eq!(step(&doc, c, TabDirection::Forward), None);
        assert_eq!(step(&doc, c, TabDirection::Backward), Some(b));
        assert_eq!(step(&doc, a, TabDirection::Backward), None);
    }

    #[test]
    fn test_skips_inert_and_negative() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = add(&mut doc, body, "input");
        let blocked = add(&mut doc, body, "div");
        add(&mut doc, blocked, "input");
        add(&mut doc, blocked, "button");
        let negative = add_indexed(&mut doc, body, -1);
        let z = add(&mut doc, body, "input");
        doc.set_attribute(blocked, "inert", "").unwrap();

        assert_eq!(step(&doc, a, TabDirection::Forward), Some(z));
        assert_eq!(step(&doc, z, TabDirection::Backward), Some(a));
        assert_eq!(step(&doc, blocked, TabDirection::Forward), Some(z));
        assert_eq!(step(&doc, negative, TabDirection::Backward), Some(a));
    }

    #[test]
    fn test_positive_group_precedes_primary() {
        let mut doc = Document::default();
        let body = doc.body();
        let zero = add(&mut doc, body, "input");
        let two = add_indexed(&mut doc, body, 2);
        let one_a = add_indexed(&mut doc, body, 1);
        let one_b = add_indexed(&mut doc, body, 1);

        assert_eq!(step(&doc, one_a, TabDirection::Forward), Some(one_b));
        assert_eq!(step(&doc, one_b, TabDirection::Forward), Some(two));
        assert_eq!(step(&doc, two, TabDirection::Forward), Some(zero));
        assert_eq!(step(&doc, zero, TabDirection::Backward), Some(two));
        assert_eq!(step(&doc, one_a, TabDirection::Backward), None);
    }

    #[test]
    fn test_positive_group_skips_inert_container() {
        let mut doc = Document::default();
        let body = doc.body();
        let first = add_indexed(&mut doc, body, 1);
        let dialog = add(&mut doc, body, "div");
        add_indexed(&mut doc, dialog, 2);
        add_indexed(&mut doc, dialog, 3);
        let last = add_indexed(&mut doc, body, 4);
        doc.set_attribute(dialog, "inert", "").unwrap();

        assert_eq!(step(&doc, first, TabDirection::Forward), Some(last));
        assert_eq!(step(&doc, last, TabDirection::Backward), Some(first));
    }

    #[test]
    fn test_shadow_scope_entered_and_left() {
        let mut doc = Document::default();
        let body = doc.body();
        let before = add(&mut doc, body, "input");
        let host = add(&mut doc, body, "div");
        let after = add(&mut doc, body, "input");
        let shadow = doc.attach_shadow(host, ShadowRootInit::open()).unwrap();
        let first = add(&mut doc, shadow, "button");
        let second = add(&mut doc, shadow, "button");

        assert_eq!(step(&doc, before, TabDirection::Forward), Some(first));
        assert_eq!(step(&doc, first, TabDirection::Forward), Some(second));
        assert_eq!(step(&doc, second, TabDirection::Forward), Some(after));
        assert_eq!(step(&doc, after, TabDirection::Backward), Some(second));
        assert_eq!(step(&doc, first, TabDirection::Backward), Some(before));
    }

    #[test]
    fn test_focusable_host_precedes_its_scope() {
        let mut doc = Document::default();
        let body = doc.body();
        let host = add(&mut doc, body, "div");
        doc.set_attribute(host, "tabindex", "0").unwrap();
        let shadow = doc.attach_shadow(host, ShadowRootInit::open()).unwrap();
        let inner = add(&mut doc, shadow, "button");

        assert_eq!(step(&doc, host, TabDirection::Forward), Some(inner));
        assert_eq!(step(&doc, inner, TabDirection::Forward), None);
        assert_eq!(step(&doc, inner, TabDirection::Backward), Some(host));
    }

    #[test]
    fn test_inert_host_hides_scope() {
        let mut doc = Document::default();
        let body = doc.body();
        let before = add(&mut doc, body, "input");
        let host = add(&mut doc, body, "div");
        let after = add(&mut doc, body, "input");
        let shadow = doc.attach_shadow(host, ShadowRootInit::open()).unwrap();
        let inner = add(&mut doc, shadow, "button");
        doc.set_attribute(host, "inert", "").unwrap();

        assert_eq!(step(&doc, before, TabDirection::Forward), Some(after));
        assert_eq!(step(&doc, inner, TabDirection::Forward), Some(after));
        assert_eq!(step(&doc, after, TabDirection::Backward), Some(before));
    }

    #[test]
    fn test_positive_group_inside_shadow() {
        let mut doc = Document::default();
        let body = doc.body();
        let host = add(&mut doc, body, "div");
        let after = add(&mut doc, body, "input");
        let shadow = doc.attach_shadow(host, ShadowRootInit::open()).unwrap();
        let zero = add(&mut doc, shadow, "input");
        let one = add_indexed(&mut doc, shadow, 1);

        assert_eq!(step(&doc, one, TabDirection::Forward), Some(zero));
        assert_eq!(step(&doc, zero, TabDirection::Forward), Some(after));
        assert_eq!(step(&doc, zero, TabDirection::Backward), Some(one));
        assert_eq!(step(&doc, one, TabDirection::Backward), None);
    }

    #[test]
    fn test_positive_host_scope_follows_host() {
        let mut doc = Document::default();
        let body = doc.body();
        let zero = add(&mut doc, body, "input");
        let host = add(&mut doc, body, "div");
        doc.set_attribute(host, "tabindex", "1").unwrap();
        let shadow = doc.attach_shadow(host, ShadowRootInit::open()).unwrap();
        let inner = add(&mut doc, shadow, "button");

        assert_eq!(step(&doc, host, TabDirection::Forward), Some(inner));
        assert_eq!(step(&doc, inner, TabDirection::Forward), Some(zero));
        assert_eq!(step(&doc, zero, TabDirection::Backward), Some(inner));
        assert_eq!(step(&doc, inner, TabDirection::Backward), Some(host));
    }

    #[test]
    fn test_detached_start() {
        let mut doc = Document::default();
        let loose = doc.create_element("input");
        assert!(matches!(
            next(&doc, loose, TabDirection::Forward, INERT_ATTRIBUTE),
            Err(InertError::Detached(id)) if id == loose
        ));
    }
}
