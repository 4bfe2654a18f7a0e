//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree with shadow roots, focus state and
//! capture/bubble event dispatch.
//!
//! The document does not know about `inert`: focus and activation land
//! wherever the host would put them, and interception is left to listeners.

mod attributes;
mod document;
mod error;
mod events;
mod focus;
mod node;
mod shadow;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::{Document, DocumentSettings};
pub use error::{DomError, DomResult};
pub use events::{
    Event, EventListener, EventPhase, EventType, Key, ListenerId, ListenerOptions, PointerType,
};
pub use focus::{FocusDirection, is_focusable, parse_tab_index, sequential_navigation_order, tab_index};
pub use node::{ElementData, Node, NodeData};
pub use shadow::{ShadowError, ShadowRootData, ShadowRootInit, ShadowRootMode};
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for absent links
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the `NONE` sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}
