//! DOM Events
//!
//! Input and focus events, listener registration and the state carried
//! through capture, target and bubble phases.

use std::rc::Rc;

use crate::{Document, NodeId};

/// Event types the document dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    KeyDown,
    PointerDown,
    Focus,
    Blur,
    Click,
}

impl EventType {
    /// Check if this event type bubbles
    pub fn bubbles(self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur)
    }

    /// Check if this event type can be canceled
    pub fn cancelable(self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::KeyDown => "keydown",
            EventType::PointerDown => "pointerdown",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
            EventType::Click => "click",
        }
    }
}

/// Event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// Key value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Tab,
    Enter,
    Escape,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Shift,
    Unidentified(String),
}

impl Key {
    /// Parse from a `KeyboardEvent.key` string
    pub fn parse(s: &str) -> Self {
        match s {
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            "Escape" => Self::Escape,
            " " => Self::Space,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Shift" => Self::Shift,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Unidentified(s.to_string()),
                }
            }
        }
    }
}

/// Pointer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// A dispatched event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    /// Key for keyboard events
    pub key: Option<Key>,
    /// Shift modifier for keyboard events
    pub shift: bool,
    pub pointer_type: Option<PointerType>,
    pub bubbles: bool,
    pub cancelable: bool,
    /// False for script-dispatched events
    pub is_trusted: bool,
    target: NodeId,
    related_target: Option<NodeId>,
    current_target: Option<NodeId>,
    retargeted: NodeId,
    phase: EventPhase,
    path: Vec<NodeId>,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            key: None,
            shift: false,
            pointer_type: None,
            bubbles: event_type.bubbles(),
            cancelable: event_type.cancelable(),
            is_trusted: true,
            target,
            related_target: None,
            current_target: None,
            retargeted: target,
            phase: EventPhase::None,
            path: Vec::new(),
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    /// Create keydown event
    pub fn key_down(target: NodeId, key: Key, shift: bool) -> Self {
        Self {
            key: Some(key),
            shift,
            ..Self::new(EventType::KeyDown, target)
        }
    }

    /// Create pointerdown event
    pub fn pointer_down(target: NodeId, pointer_type: PointerType) -> Self {
        Self {
            pointer_type: Some(pointer_type),
            ..Self::new(EventType::PointerDown, target)
        }
    }

    /// Create focus event; `related` is the element losing focus
    pub fn focus(target: NodeId, related: Option<NodeId>) -> Self {
        Self {
            related_target: related,
            ..Self::new(EventType::Focus, target)
        }
    }

    /// Create blur event; `related` is the element gaining focus
    pub fn blur(target: NodeId, related: Option<NodeId>) -> Self {
        Self {
            related_target: related,
            ..Self::new(EventType::Blur, target)
        }
    }

    /// Create click event
    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, target)
    }

    /// Mark as script-dispatched
    pub fn untrusted(mut self) -> Self {
        self.is_trusted = false;
        self
    }

    /// Target as seen from the current listener (retargeted across
    /// shadow boundaries)
    pub fn target(&self) -> NodeId {
        self.retargeted
    }

    /// Target before retargeting
    pub fn original_target(&self) -> NodeId {
        self.target
    }

    pub fn related_target(&self) -> Option<NodeId> {
        self.related_target
    }

    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Propagation path, innermost first
    pub fn composed_path(&self) -> &[NodeId] {
        &self.path
    }

    /// Check for the Tab key
    pub fn is_tab(&self) -> bool {
        self.key == Some(Key::Tab)
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop propagation after the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation, skipping remaining listeners on the current node
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }

    pub(crate) fn set_path(&mut self, path: Vec<NodeId>) {
        self.path = path;
    }

    pub(crate) fn enter(&mut self, node: NodeId, retargeted: NodeId, phase: EventPhase) {
        self.current_target = Some(node);
        self.retargeted = retargeted;
        self.phase = phase;
    }

    pub(crate) fn finish(&mut self) {
        self.current_target = None;
        self.retargeted = self.target;
        self.phase = EventPhase::None;
    }
}

/// Event listener
///
/// Listeners receive the document mutably so they can move focus or
/// register further listeners while an event is in flight.
pub trait EventListener {
    fn handle_event(&self, document: &mut Document, event: &mut Event);
}

impl<F> EventListener for F
where
    F: Fn(&mut Document, &mut Event),
{
    fn handle_event(&self, document: &mut Document, event: &mut Event) {
        self(document, event)
    }
}

/// Handle returned by listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event listener options
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenerOptions {
    pub capture: bool,
    /// Remove after the first invocation
    pub once: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self {
            capture: true,
            once: false,
        }
    }

    pub fn bubble() -> Self {
        Self::default()
    }
}

struct Registration {
    id: ListenerId,
    node: NodeId,
    event_type: EventType,
    options: ListenerOptions,
    listener: Rc<dyn EventListener>,
}

/// Listener registrations, in registration order
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl ListenerRegistry {
    pub(crate) fn add(
        &mut self,
        node: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        listener: Rc<dyn EventListener>,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.registrations.push(Registration {
            id,
            node,
            event_type,
            options,
            listener,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    /// Snapshot of the listeners to invoke; later registrations on the
    /// same node do not join an in-flight phase.
    pub(crate) fn matching(
        &self,
        node: NodeId,
        event_type: EventType,
        capture: bool,
    ) -> Vec<(ListenerId, bool, Rc<dyn EventListener>)> {
        self.registrations
            .iter()
            .filter(|r| r.node == node && r.event_type == event_type && r.options.capture == capture)
            .map(|r| (r.id, r.options.once, Rc::clone(&r.listener)))
            .collect()
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    pub(crate) fn count_on(&self, node: NodeId) -> usize {
        self.registrations.iter().filter(|r| r.node == node).count()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("registrations", &self.registrations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_defaults() {
        let focus = Event::focus(NodeId(3), Some(NodeId(2)));
        assert!(!focus.bubbles);
        assert!(!focus.cancelable);
        assert_eq!(focus.related_target(), Some(NodeId(2)));

        let click = Event::click(NodeId(3));
        assert!(click.bubbles);
        assert!(click.cancelable);
        assert!(click.is_trusted);
        assert!(!click.untrusted().is_trusted);
    }

    #[test]
    fn test_prevent_default_requires_cancelable() {
        let mut focus = Event::focus(NodeId(1), None);
        focus.prevent_default();
        assert!(!focus.is_default_prevented());

        let mut click = Event::click(NodeId(1));
        click.prevent_default();
        assert!(click.is_default_prevented());
    }

    #[test]
    fn test_key_parse() {
        assert_eq!(Key::parse("Tab"), Key::Tab);
        assert_eq!(Key::parse("a"), Key::Character('a'));
        assert_eq!(Key::parse(" "), Key::Space);
        assert_eq!(Key::parse("F13"), Key::Unidentified("F13".to_string()));
        assert!(Event::key_down(NodeId(1), Key::Tab, true).is_tab());
    }

    #[test]
    fn test_registry_add_remove() {
        let mut registry = ListenerRegistry::default();
        let listener: Rc<dyn EventListener> = Rc::new(|_: &mut Document, _: &mut Event| {});
        let id = registry.add(NodeId(0), EventType::Focus, ListenerOptions::capture(), Rc::clone(&listener));
        registry.add(NodeId(0), EventType::Focus, ListenerOptions::bubble(), listener);

        assert_eq!(registry.matching(NodeId(0), EventType::Focus, true).len(), 1);
        assert_eq!(registry.matching(NodeId(0), EventType::Click, true).len(), 0);
        assert_eq!(registry.count_on(NodeId(0)), 2);
        assert!(registry.remove(id));
        assert!(!registry.contains(id));
        assert!(!registry.remove(id));
    }
}
