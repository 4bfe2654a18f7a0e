//! Document - High-level document API
//!
//! Owns the tree, the focus state and the listener registry, and runs
//! event dispatch. Listener callbacks get `&mut Document`, so dispatch is
//! re-entrant: a focus listener may focus another element, which
//! dispatches nested blur/focus events before the outer dispatch resumes.

use std::rc::Rc;

use crate::events::ListenerRegistry;
use crate::focus::{self, FocusDirection};
use crate::{
    DomError, DomResult, DomTree, Event, EventListener, EventPhase, EventType, Key, ListenerId,
    ListenerOptions, NodeId, PointerType, ShadowRootInit, ShadowRootMode,
};

/// Host capabilities that vary between platforms
#[derive(Debug, Clone, Default)]
pub struct DocumentSettings {
    /// Whether an untrusted Tab keydown runs native sequential navigation
    pub synthetic_tab_navigation: bool,
}

/// HTML Document
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    /// Deepest focused element, possibly inside a shadow tree
    focused: Option<NodeId>,
    /// Whether the window holding this document has system focus
    window_focused: bool,
    listeners: ListenerRegistry,
    settings: DocumentSettings,
}

impl Document {
    /// Create a document with `<html>`, `<head>` and `<body>`
    pub fn new(url: &str) -> Self {
        Self::with_settings(url, DocumentSettings::default())
    }

    pub fn with_settings(url: &str, settings: DocumentSettings) -> Self {
        let mut tree = DomTree::new();
        let root = tree.root();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under a fresh root cannot violate hierarchy rules.
        for (parent, child) in [(root, html), (html, head), (html, body)] {
            if let Err(err) = tree.append_child(parent, child) {
                tracing::error!("document skeleton: {}", err);
            }
        }

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            focused: None,
            window_focused: true,
            listeners: ListenerRegistry::default(),
            settings,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get `<head>` element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    // --- Tree mutation ---

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)?;
        Ok(child)
    }

    /// Remove a child; focus inside the removed subtree is dropped silently
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.remove_child(parent, child)?;
        if self
            .focused
            .is_some_and(|f| self.tree.shadow_including_contains(child, f))
        {
            tracing::debug!("focused element removed with {:?}", child);
            self.focused = None;
        }
        Ok(child)
    }

    pub fn attach_shadow(&mut self, host: NodeId, init: ShadowRootInit) -> DomResult<NodeId> {
        self.tree.attach_shadow(host, init)
    }

    /// `element.shadowRoot`: closed roots are not exposed
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        let root = self.tree.shadow_root_of(host)?;
        let data = self.tree.shadow_root_data(root)?;
        (data.mode == ShadowRootMode::Open).then_some(root)
    }

    // --- Attributes ---

    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.tree.element(element)?.get_attr(name)
    }

    pub fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        self.tree.element(element).is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        let data = self
            .tree
            .element_mut(element)
            .ok_or(DomError::NotAnElement(element))?;
        data.attrs.set_attribute(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> DomResult<bool> {
        let data = self
            .tree
            .element_mut(element)
            .ok_or(DomError::NotAnElement(element))?;
        Ok(data.attrs.remove_attribute(name).is_some())
    }

    pub fn toggle_attribute(&mut self, element: NodeId, name: &str, force: Option<bool>) -> DomResult<bool> {
        let data = self
            .tree
            .element_mut(element)
            .ok_or(DomError::NotAnElement(element))?;
        Ok(data.attrs.toggle_attribute(name, force))
    }

    /// Get element by ID, searching the light tree only
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .tree_order_elements(self.root())
            .into_iter()
            .find(|&e| self.get_attribute(e, "id") == Some(id))
    }

    // --- Focus ---

    /// Deepest focused element
    pub fn focused_element(&self) -> Option<NodeId> {
        self.focused
    }

    /// `document.activeElement`: focus retargeted to the document, else `<body>`
    pub fn active_element(&self) -> Option<NodeId> {
        match self.focused {
            Some(focused) => Some(self.retarget(focused, self.root())),
            None => self.body_element.option(),
        }
    }

    /// `shadowRoot.activeElement`
    pub fn shadow_active_element(&self, shadow_root: NodeId) -> Option<NodeId> {
        let focused = self.focused?;
        if focused == shadow_root || !self.tree.shadow_including_contains(shadow_root, focused) {
            return None;
        }
        Some(self.retarget(focused, shadow_root))
    }

    /// `document.hasFocus()`
    pub fn has_focus(&self) -> bool {
        self.window_focused
    }

    /// Simulate the window gaining or losing system focus
    pub fn set_window_focused(&mut self, focused: bool) {
        self.window_focused = focused;
    }

    pub fn is_focusable(&self, element: NodeId) -> bool {
        focus::is_focusable(&self.tree, element)
    }

    pub fn tab_index(&self, element: NodeId) -> i32 {
        focus::tab_index(&self.tree, element)
    }

    /// `element.focus()`
    ///
    /// Returns whether `element` holds focus once all nested listeners
    /// have run.
    pub fn focus(&mut self, element: NodeId) -> bool {
        if !self.tree.is_connected(element) || !self.is_focusable(element) {
            tracing::trace!("focus ignored for {:?}: not focusable", element);
            return false;
        }
        if self.focused == Some(element) {
            return true;
        }

        let previous = self.focused;
        if let Some(old) = previous {
            self.focused = None;
            self.dispatch_event(old, Event::blur(old, Some(element)));
        }
        self.focused = Some(element);
        self.dispatch_event(element, Event::focus(element, previous));
        self.focused == Some(element)
    }

    /// `element.blur()`
    pub fn blur(&mut self, element: NodeId) {
        if self.focused != Some(element) {
            return;
        }
        self.focused = None;
        self.dispatch_event(element, Event::blur(element, None));
    }

    /// Native sequential navigation from the focused element. No wrap.
    pub fn navigate(&mut self, direction: FocusDirection) -> Option<NodeId> {
        let order = focus::sequential_navigation_order(&self.tree, self.root());
        let position = self
            .focused
            .and_then(|f| order.iter().position(|&id| id == f));
        let next = match (position, direction) {
            (Some(i), FocusDirection::Forward) => order.get(i + 1),
            (Some(i), FocusDirection::Backward) => i.checked_sub(1).and_then(|j| order.get(j)),
            (None, FocusDirection::Forward) => order.first(),
            (None, FocusDirection::Backward) => order.last(),
        }
        .copied();

        match next {
            Some(next) => {
                tracing::trace!("native navigation {:?} to {:?}", direction, next);
                self.focus(next);
            }
            None => tracing::trace!("native navigation {:?}: end of document", direction),
        }
        next
    }

    // --- Input ---

    fn key_target(&self) -> NodeId {
        self.focused
            .or(self.body_element.option())
            .unwrap_or_else(|| self.root())
    }

    /// Trusted keydown at the focused element; Tab navigates natively
    pub fn press_key(&mut self, key: Key, shift: bool) -> bool {
        let target = self.key_target();
        let proceed = self.dispatch_event(target, Event::key_down(target, key.clone(), shift));
        if proceed && key == Key::Tab {
            self.navigate(tab_direction(shift));
        }
        proceed
    }

    /// Script-dispatched keydown; Tab navigates only where the host
    /// honors synthetic events
    pub fn dispatch_synthetic_key(&mut self, key: Key, shift: bool) -> bool {
        let target = self.key_target();
        let event = Event::key_down(target, key.clone(), shift).untrusted();
        let proceed = self.dispatch_event(target, event);
        if proceed && key == Key::Tab && self.settings.synthetic_tab_navigation {
            self.navigate(tab_direction(shift));
        }
        proceed
    }

    /// Pointer press; default action focuses the nearest focusable
    /// inclusive ancestor or clears focus
    pub fn pointer_down(&mut self, target: NodeId, pointer_type: PointerType) -> bool {
        let proceed = self.dispatch_event(target, Event::pointer_down(target, pointer_type));
        if !proceed {
            return false;
        }
        let mut current = Some(target);
        while let Some(id) = current {
            if self.is_focusable(id) {
                self.focus(id);
                return true;
            }
            current = self.tree.shadow_including_parent(id);
        }
        if let Some(focused) = self.focused {
            self.blur(focused);
        }
        true
    }

    /// `element.click()`; returns whether the activation was not canceled
    pub fn click(&mut self, target: NodeId) -> bool {
        self.dispatch_event(target, Event::click(target).untrusted())
    }

    // --- Events ---

    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        listener: Rc<dyn EventListener>,
    ) -> ListenerId {
        self.listeners.add(node, event_type, options, listener)
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn has_event_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    /// Number of listeners registered on `node`
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.count_on(node)
    }

    /// Retarget `a` against `b`: climb out of shadow trees that do not
    /// contain `b`
    pub fn retarget(&self, a: NodeId, b: NodeId) -> NodeId {
        let mut current = a;
        loop {
            let root = self.tree.root_node(current);
            if !self.tree.is_shadow_root(root) || self.tree.shadow_including_contains(root, b) {
                return current;
            }
            match self.tree.shadow_host(root) {
                Some(host) => current = host,
                None => return current,
            }
        }
    }

    /// Propagation path from `target` outwards. With a related target,
    /// the path ends where both retarget to the same node, so focus moves
    /// inside one shadow tree stay invisible outside it.
    pub fn event_path(&self, target: NodeId, related: Option<NodeId>) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            if let Some(related) = related {
                if node != target && self.retarget(related, node) == self.retarget(target, node) {
                    break;
                }
            }
            path.push(node);
            current = self.tree.shadow_including_parent(node);
        }
        path
    }

    /// Dispatch `event` at `target`; returns false if the default action
    /// was prevented
    pub fn dispatch_event(&mut self, target: NodeId, mut event: Event) -> bool {
        let path = self.event_path(target, event.related_target());
        event.set_path(path.clone());

        let mut stopped = false;
        for &node in path.iter().rev() {
            let phase = if node == target { EventPhase::AtTarget } else { EventPhase::Capturing };
            self.invoke(node, phase, true, &mut event);
            if event.is_propagation_stopped() {
                stopped = true;
                break;
            }
        }

        if !stopped {
            for &node in &path {
                if node != target && !event.bubbles {
                    break;
                }
                let phase = if node == target { EventPhase::AtTarget } else { EventPhase::Bubbling };
                self.invoke(node, phase, false, &mut event);
                if event.is_propagation_stopped() {
                    break;
                }
            }
        }

        event.finish();
        !event.is_default_prevented()
    }

    fn invoke(&mut self, node: NodeId, phase: EventPhase, capture: bool, event: &mut Event) {
        let listeners = self.listeners.matching(node, event.event_type, capture);
        if listeners.is_empty() {
            return;
        }
        let retargeted = self.retarget(event.original_target(), node);
        event.enter(node, retargeted, phase);
        for (id, once, listener) in listeners {
            if event.is_immediate_propagation_stopped() {
                break;
            }
            // Removed by an earlier listener in this phase.
            if !self.listeners.contains(id) {
                continue;
            }
            if once {
                self.listeners.remove(id);
            }
            listener.handle_event(self, event);
        }
    }
}

fn tab_direction(shift: bool) -> FocusDirection {
    if shift {
        FocusDirection::Backward
    } else {
        FocusDirection::Forward
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
