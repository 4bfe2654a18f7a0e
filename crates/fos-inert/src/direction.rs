//! Tab-Direction Tracker
//!
//! A focus event alone cannot tell Tab-driven focus from programmatic
//! focus, so the most recent keyboard intent is remembered here.

use std::cell::Cell;

use fos_dom::{Event, EventType, FocusDirection, Key};

/// Most recent directional intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabDirection {
    #[default]
    None,
    Forward,
    Backward,
}

impl TabDirection {
    /// Direction of a Tab press
    pub fn from_tab(shift: bool) -> Self {
        if shift { Self::Backward } else { Self::Forward }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }

    pub fn as_focus_direction(self) -> Option<FocusDirection> {
        match self {
            Self::None => None,
            Self::Forward => Some(FocusDirection::Forward),
            Self::Backward => Some(FocusDirection::Backward),
        }
    }
}

/// Direction state machine: None / Forward / Backward
#[derive(Debug, Default)]
pub struct DirectionTracker {
    state: Cell<TabDirection>,
}

impl DirectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> TabDirection {
        self.state.get()
    }

    /// Tab sets a direction; any other key clears it
    pub fn on_key_down(&self, key: &Key, shift: bool) {
        let next = match key {
            Key::Tab => TabDirection::from_tab(shift),
            _ => TabDirection::None,
        };
        self.state.set(next);
    }

    pub fn on_pointer_down(&self) {
        self.reset();
    }

    pub fn reset(&self) {
        self.state.set(TabDirection::None);
    }

    /// Feed a dispatched event; other event types leave the state alone
    pub fn observe(&self, event: &Event) {
        match event.event_type {
            EventType::KeyDown => match &event.key {
                Some(key) => self.on_key_down(key, event.shift),
                None => self.reset(),
            },
            EventType::PointerDown => self.on_pointer_down(),
            EventType::Focus | EventType::Blur | EventType::Click => {}
        }
    }
}
