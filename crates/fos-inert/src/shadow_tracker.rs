//! Shadow-Focus Tracker
//!
//! Focus moves inside one shadow tree never reach document listeners, so
//! while focus is inside a shadow tree a capture listener sits on every
//! shadow root enclosing it. A move from a nested root out to its
//! enclosing root is then still seen by the enclosing root's listener.
//! Each root carries at most one such listener.

use std::cell::RefCell;
use std::rc::Rc;

use fos_dom::{Document, EventType, ListenerId, ListenerOptions, NodeId};

use crate::{FocusInterceptor, InertSession};

/// Listener registered on one shadow root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeListener {
    pub root: NodeId,
    pub listener: ListenerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Unattached,
    /// Innermost root first
    AttachedTo(Vec<ScopeListener>),
}

impl TrackerState {
    /// Innermost tracked root
    pub fn root(&self) -> Option<NodeId> {
        self.roots().first().copied()
    }

    pub fn roots(&self) -> Vec<NodeId> {
        match self {
            Self::Unattached => Vec::new(),
            Self::AttachedTo(scopes) => scopes.iter().map(|scope| scope.root).collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ShadowFocusTracker {
    state: RefCell<TrackerState>,
}

impl ShadowFocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TrackerState {
        self.state.borrow().clone()
    }

    pub fn tracked_root(&self) -> Option<NodeId> {
        self.state.borrow().root()
    }

    /// Every tracked root, innermost first
    pub fn tracked_roots(&self) -> Vec<NodeId> {
        self.state.borrow().roots()
    }

    /// Follow focus landing on `target`: listen on each shadow root
    /// enclosing it, and on nothing else.
    pub fn observe(&self, document: &mut Document, session: &Rc<InertSession>, target: NodeId) {
        let chain = enclosing_shadow_roots(document, target);
        if chain == self.tracked_roots() {
            return;
        }

        let previous = match self.state.replace(TrackerState::Unattached) {
            TrackerState::Unattached => Vec::new(),
            TrackerState::AttachedTo(scopes) => scopes,
        };
        for stale in previous.iter().filter(|scope| !chain.contains(&scope.root)) {
            document.remove_event_listener(stale.listener);
            tracing::debug!("stopped tracking shadow root {:?}", stale.root);
        }

        let scopes: Vec<ScopeListener> = chain
            .into_iter()
            .map(|root| match previous.iter().find(|scope| scope.root == root) {
                Some(&kept) => kept,
                None => {
                    let interceptor = FocusInterceptor::scoped(Rc::clone(session), root);
                    let listener = document.add_event_listener(
                        root,
                        EventType::Focus,
                        ListenerOptions::capture(),
                        Rc::new(interceptor),
                    );
                    tracing::debug!("tracking focus in shadow root {:?}", root);
                    ScopeListener { root, listener }
                }
            })
            .collect();
        if !scopes.is_empty() {
            self.state.replace(TrackerState::AttachedTo(scopes));
        }
    }

    /// Re-sync with whatever holds focus now, detaching if nothing does
    pub fn follow_focus(&self, document: &mut Document, session: &Rc<InertSession>) {
        match document.focused_element() {
            Some(focused) => self.observe(document, session, focused),
            None => self.detach(document),
        }
    }

    /// Remove every shadow root listener
    pub fn detach(&self, document: &mut Document) {
        if let TrackerState::AttachedTo(scopes) = self.state.replace(TrackerState::Unattached) {
            for scope in scopes {
                document.remove_event_listener(scope.listener);
                tracing::debug!("stopped tracking shadow root {:?}", scope.root);
            }
        }
    }
}

/// Shadow roots containing `node`, innermost first
fn enclosing_shadow_roots(document: &Document, node: NodeId) -> Vec<NodeId> {
    let tree = document.tree();
    let mut roots = Vec::new();
    let mut root = tree.root_node(node);
    while tree.is_shadow_root(root) {
        roots.push(root);
        match tree.shadow_host(root) {
            Some(host) => root = tree.root_node(host),
            None => break,
        }
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InertConfig;
    use fos_dom::ShadowRootInit;

    fn setup() -> (Document, Rc<InertSession>, NodeId, NodeId, NodeId) {
        let mut doc = Document::default();
        let session = InertSession::install(&mut doc, InertConfig::default().without_style());
        let body = doc.body();
        let light = doc.create_element("input");
        let host_a = doc.create_element("div");
        let host_b = doc.create_element("div");
        for el in [light, host_a, host_b] {
            doc.append_child(body, el).unwrap();
        }
        (doc, session, light, host_a, host_b)
    }

    #[test]
    fn test_attach_move_detach() {
        let (mut doc, session, light, host_a, host_b) = setup();
        let root_a = doc.attach_shadow(host_a, ShadowRootInit::open()).unwrap();
        let root_b = doc.attach_shadow(host_b, ShadowRootInit::closed()).unwrap();
        let in_a = doc.create_element("button");
        let in_b = doc.create_element("button");
        doc.append_child(root_a, in_a).unwrap();
        doc.append_child(root_b, in_b).unwrap();
        let tracker = ShadowFocusTracker::new();

        tracker.observe(&mut doc, &session, in_a);
        assert_eq!(tracker.tracked_root(), Some(root_a));
        assert_eq!(doc.listener_count(root_a), 1);

        tracker.observe(&mut doc, &session, in_b);
        assert_eq!(tracker.tracked_root(), Some(root_b));
        assert_eq!(doc.listener_count(root_a), 0);
        assert_eq!(doc.listener_count(root_b), 1);

        tracker.observe(&mut doc, &session, light);
        assert_eq!(tracker.state(), TrackerState::Unattached);
        assert_eq!(doc.listener_count(root_b), 0);
    }

    #[test]
    fn test_same_root_keeps_listener() {
        let (mut doc, session, _, host_a, _) = setup();
        let root_a = doc.attach_shadow(host_a, ShadowRootInit::open()).unwrap();
        let first = doc.create_element("button");
        let second = doc.create_element("button");
        doc.append_child(root_a, first).unwrap();
        doc.append_child(root_a, second).unwrap();
        let tracker = ShadowFocusTracker::new();

        tracker.observe(&mut doc, &session, first);
        let before = tracker.state();
        tracker.observe(&mut doc, &session, second);
        assert_eq!(tracker.state(), before);
        assert_eq!(doc.listener_count(root_a), 1);
    }

    #[test]
    fn test_nested_roots_tracked_together() {
        let (mut doc, session, light, host_a, _) = setup();
        let outer = doc.attach_shadow(host_a, ShadowRootInit::open()).unwrap();
        let inner_host = doc.create_element("div");
        let sibling = doc.create_element("button");
        doc.append_child(outer, inner_host).unwrap();
        doc.append_child(outer, sibling).unwrap();
        let inner = doc.attach_shadow(inner_host, ShadowRootInit::open()).unwrap();
        let deep = doc.create_element("button");
        doc.append_child(inner, deep).unwrap();
        let tracker = ShadowFocusTracker::new();

        tracker.observe(&mut doc, &session, deep);
        assert_eq!(tracker.tracked_roots(), vec![inner, outer]);
        assert_eq!(tracker.tracked_root(), Some(inner));
        let nested = tracker.state();

        tracker.observe(&mut doc, &session, sibling);
        assert_eq!(tracker.tracked_roots(), vec![outer]);
        assert_eq!(doc.listener_count(inner), 0);
        assert_eq!(doc.listener_count(outer), 1);
        // The enclosing root keeps its original listener.
        let TrackerState::AttachedTo(before) = nested else { panic!("not attached") };
        assert_eq!(tracker.state(), TrackerState::AttachedTo(before[1..].to_vec()));

        tracker.observe(&mut doc, &session, light);
        assert!(tracker.tracked_roots().is_empty());
        assert_eq!(doc.listener_count(outer), 0);
    }

    #[test]
    fn test_follow_focus_detaches_without_focus() {
        let (mut doc, session, _, host_a, _) = setup();
        let root_a = doc.attach_shadow(host_a, ShadowRootInit::open()).unwrap();
        let button = doc.create_element("button");
        doc.append_child(root_a, button).unwrap();
        let tracker = ShadowFocusTracker::new();

        tracker.observe(&mut doc, &session, button);
        assert_eq!(doc.focused_element(), None);
        tracker.follow_focus(&mut doc, &session);
        assert_eq!(tracker.state(), TrackerState::Unattached);
        assert_eq!(doc.listener_count(root_a), 0);
    }

    #[test]
    fn test_detach_when_unattached() {
        let (mut doc, _, _, _, _) = setup();
        let tracker = ShadowFocusTracker::new();
        tracker.detach(&mut doc);
        assert_eq!(tracker.tracked_root(), None);
    }
}
