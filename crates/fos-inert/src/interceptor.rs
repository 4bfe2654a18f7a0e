//! Focus and click interception
//!
//! Both run as capture listeners so they see an event before anything
//! inside the page does.

use std::rc::Rc;

use fos_dom::{Document, Event, EventListener, NodeId};

use crate::resolver::{is_inert, made_inert_by};
use crate::{InertSession, TabDirection, traversal};

/// What the focus interceptor did with one focus event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Target is not inert
    PassThrough,
    /// Focus moved on to the given element
    Redirected(NodeId),
    /// Target was blurred
    Blurred(NodeId),
}

/// Capture-phase focus listener
///
/// One is registered on the document; the shadow-focus tracker registers
/// one more on each shadow root enclosing the focused element.
#[derive(Debug)]
pub struct FocusInterceptor {
    session: Rc<InertSession>,
    scope: NodeId,
}

impl FocusInterceptor {
    /// Listener for the document scope
    pub fn new(session: Rc<InertSession>, document: &Document) -> Self {
        Self { session, scope: document.root() }
    }

    /// Listener for one shadow root
    pub fn scoped(session: Rc<InertSession>, scope: NodeId) -> Self {
        Self { session, scope }
    }

    pub fn scope(&self) -> NodeId {
        self.scope
    }

    /// Handle a focus event using the session's tracked direction
    pub fn intercept(&self, document: &mut Document, event: &mut Event) -> FocusOutcome {
        let direction = self.session.direction();
        self.intercept_with(document, event, direction)
    }

    /// Handle a focus event with an explicit Tab direction
    pub fn intercept_with(&self, document: &mut Document, event: &mut Event, direction: TabDirection) -> FocusOutcome {
        let target = effective_target(event);
        let marker = self.session.config().attribute.as_str();
        self.session.shadow_focus().observe(document, &self.session, target);

        let Some(inert_root) = made_inert_by(&*document, target, marker) else {
            return FocusOutcome::PassThrough;
        };
        tracing::debug!(
            "focus on {:?} blocked by inert {:?} (scope {:?}, direction {:?})",
            target,
            inert_root,
            self.scope,
            direction
        );

        let outcome = match self.redirect_target(document, target, inert_root, direction) {
            Some(next) => FocusOutcome::Redirected(next),
            None => {
                document.blur(target);
                self.session.shadow_focus().follow_focus(document, &self.session);
                FocusOutcome::Blurred(target)
            }
        };
        event.prevent_default();
        event.stop_propagation();
        outcome
    }

    /// Move focus past the inert subtree. `None` when focus must simply
    /// be dropped.
    fn redirect_target(
        &self,
        document: &mut Document,
        target: NodeId,
        inert_root: NodeId,
        direction: TabDirection,
    ) -> Option<NodeId> {
        if direction.is_none() || !document.has_focus() {
            return None;
        }
        let config = self.session.config();
        let marker = config.attribute.as_str();

        let profile = self.session.profile();
        if profile.native_redirect(document, direction) {
            if let Some(moved) = moved_to(document, target, marker) {
                tracing::debug!("{} profile moved focus to {:?}", profile.name(), moved);
                return Some(moved);
            }
            tracing::trace!("{} profile left focus in place", profile.name());
        }

        let mut cursor = inert_root;
        for _ in 0..config.max_redirect_attempts {
            match traversal::next(&*document, cursor, direction, marker) {
                Ok(Some(candidate)) => {
                    document.focus(candidate);
                    if let Some(moved) = moved_to(document, target, marker) {
                        return Some(moved);
                    }
                    // Candidate refused focus; keep going from it.
                    cursor = candidate;
                }
                Ok(None) => {
                    tracing::trace!("traversal exhausted from {:?}", cursor);
                    return None;
                }
                Err(err) => {
                    tracing::error!("traversal from {:?} failed: {}", cursor, err);
                    return None;
                }
            }
        }
        tracing::warn!(
            "no focus target after {} attempts from {:?}",
            config.max_redirect_attempts,
            inert_root
        );
        None
    }
}

/// Innermost target, before any shadow retargeting
fn effective_target(event: &Event) -> NodeId {
    event
        .composed_path()
        .first()
        .copied()
        .unwrap_or_else(|| event.original_target())
}

/// Focused element if focus has left `target` for something not inert
fn moved_to(document: &Document, target: NodeId, marker: &str) -> Option<NodeId> {
    document
        .focused_element()
        .filter(|&focused| focused != target && !is_inert(document, focused, marker))
}

impl EventListener for FocusInterceptor {
    fn handle_event(&self, document: &mut Document, event: &mut Event) {
        self.intercept(document, event);
    }
}

/// Capture-phase click listener; cancels activation of inert elements
#[derive(Debug, Clone)]
pub struct ClickInterceptor {
    marker: String,
}

impl ClickInterceptor {
    pub fn new(marker: &str) -> Self {
        Self { marker: marker.to_ascii_lowercase() }
    }

    /// Returns true if the click was suppressed
    pub fn intercept(&self, document: &Document, event: &mut Event) -> bool {
        let target = effective_target(event);
        match made_inert_by(document, target, &self.marker) {
            Some(inert_root) => {
                tracing::debug!("click on {:?} suppressed by inert {:?}", target, inert_root);
                event.prevent_default();
                event.stop_propagation();
                true
            }
            None => false,
        }
    }
}

impl EventListener for ClickInterceptor {
    fn handle_event(&self, document: &mut Document, event: &mut Event) {
        self.intercept(document, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InertConfig;
    use fos_dom::{EventType, ListenerOptions};
    use std::cell::Cell;

    // ============================================================================
    // Focus
    // ============================================================================

    fn three_inputs() -> (Document, Rc<InertSession>, [NodeId; 3]) {
        let mut doc = Document::default();
        let session = InertSession::install(&mut doc, InertConfig::default().without_style());
        let body = doc.body();
        let inputs = [(); 3].map(|_| {
            let id = doc.create_element("input");
            doc.append_child(body, id).unwrap();
            id
        });
        doc.set_attribute(inputs[1], "inert", "").unwrap();
        (doc, session, inputs)
    }

    #[test]
    fn test_pass_through() {
        let (mut doc, session, [before, _, _]) = three_inputs();
        let interceptor = FocusInterceptor::new(Rc::clone(&session), &doc);
        let mut event = Event::focus(before, None);
        assert_eq!(interceptor.intercept(&mut doc, &mut event), FocusOutcome::PassThrough);
        assert!(!event.is_propagation_stopped());
    }

    #[test]
    fn test_programmatic_focus_blurred() {
        let (mut doc, session, [_, during, _]) = three_inputs();
        assert!(!doc.focus(during));
        assert_eq!(doc.focused_element(), None);
        assert_eq!(session.direction(), TabDirection::None);
    }

    #[test]
    fn test_explicit_direction_redirects() {
        let (mut doc, session, [_, during, after]) = three_inputs();
        let interceptor = FocusInterceptor::new(Rc::clone(&session), &doc);

        let mut event = Event::focus(during, None);
        let outcome = interceptor.intercept_with(&mut doc, &mut event, TabDirection::Forward);
        assert_eq!(outcome, FocusOutcome::Redirected(after));
        assert_eq!(doc.focused_element(), Some(after));
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn test_no_window_focus_blurs() {
        let (mut doc, session, [before, during, _]) = three_inputs();
        doc.focus(before);
        doc.set_window_focused(false);
        let interceptor = FocusInterceptor::new(Rc::clone(&session), &doc);

        let mut event = Event::focus(during, None);
        let outcome = interceptor.intercept_with(&mut doc, &mut event, TabDirection::Forward);
        assert_eq!(outcome, FocusOutcome::Blurred(during));
        assert_eq!(doc.focused_element(), Some(before));
    }

    #[test]
    fn test_blur_releases_shadow_listener() {
        let mut doc = Document::default();
        let session = InertSession::install(&mut doc, InertConfig::default().without_style());
        let body = doc.body();
        let host = doc.create_element("div");
        doc.append_child(body, host).unwrap();
        let shadow = doc.attach_shadow(host, fos_dom::ShadowRootInit::open()).unwrap();
        let button = doc.create_element("button");
        doc.append_child(shadow, button).unwrap();
        doc.set_attribute(button, "inert", "").unwrap();
        let interceptor = FocusInterceptor::new(Rc::clone(&session), &doc);

        let mut event = Event::focus(button, None);
        assert_eq!(interceptor.intercept(&mut doc, &mut event), FocusOutcome::Blurred(button));
        assert_eq!(session.tracked_shadow_root(), None);
        assert_eq!(doc.listener_count(shadow), 0);
    }

    #[test]
    fn test_exhaustion_blurs() {
        let (mut doc, session, [before, during, after]) = three_inputs();
        doc.set_attribute(after, "inert", "").unwrap();
        doc.focus(before);
        doc.press_key(fos_dom::Key::Tab, false);
        assert_eq!(session.direction(), TabDirection::Forward);
        // Native navigation lands on `during`; nothing follows it.
        assert_eq!(doc.focused_element(), None);
        assert!(!doc.focus(during));
    }

    // ============================================================================
    // Click
    // ============================================================================

    #[test]
    fn test_click_suppressed_only_when_inert() {
        let mut doc = Document::default();
        let body = doc.body();
        let container = doc.create_element("div");
        let button = doc.create_element("button");
        doc.append_child(body, container).unwrap();
        doc.append_child(container, button).unwrap();

        let root = doc.root();
        doc.add_event_listener(
            root,
            EventType::Click,
            ListenerOptions::capture(),
            Rc::new(ClickInterceptor::new("inert")),
        );
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        doc.add_event_listener(
            button,
            EventType::Click,
            ListenerOptions::bubble(),
            Rc::new(move |_: &mut Document, _: &mut Event| counter.set(counter.get() + 1)),
        );

        doc.set_attribute(container, "inert", "").unwrap();
        assert!(!doc.click(button));
        assert_eq!(clicks.get(), 0);

        doc.remove_attribute(container, "inert").unwrap();
        assert!(doc.click(button));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_click_before_dispatch() {
        let mut doc = Document::default();
        let body = doc.body();
        let button = doc.create_element("button");
        doc.append_child(body, button).unwrap();
        let interceptor = ClickInterceptor::new("INERT");

        let mut event = Event::click(button);
        assert!(!interceptor.intercept(&doc, &mut event));
        doc.set_attribute(body, "inert", "").unwrap();
        assert!(interceptor.intercept(&doc, &mut event));
        assert!(event.is_default_prevented());
    }
}
