//! Shadow DOM
//!
//! Shadow root data and attachment rules. A shadow root lives in the arena
//! like any other node but has no parent; its host is the logical parent
//! once the root is exhausted.

use crate::NodeId;

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

/// Shadow root initialization options
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowRootInit {
    pub mode: ShadowRootMode,
    pub delegates_focus: bool,
}

impl ShadowRootInit {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn closed() -> Self {
        Self {
            mode: ShadowRootMode::Closed,
            ..Self::default()
        }
    }
}

/// Shadow root node data
#[derive(Debug, Clone)]
pub struct ShadowRootData {
    /// Host element
    pub host: NodeId,
    pub mode: ShadowRootMode,
    pub delegates_focus: bool,
}

impl ShadowRootData {
    pub fn new(host: NodeId, init: ShadowRootInit) -> Self {
        Self {
            host,
            mode: init.mode,
            delegates_focus: init.delegates_focus,
        }
    }
}

/// Shadow DOM errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShadowError {
    #[error("element already has a shadow root")]
    AlreadyAttached,
    #[error("element does not support a shadow root")]
    NotSupported,
}

/// Built-in elements that accept `attachShadow`
const SHADOW_HOST_TAGS: &[&str] = &[
    "article", "aside", "blockquote", "body", "div", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "main", "nav", "p", "section", "span",
];

/// Check whether an element with this tag may host a shadow root.
/// Autonomous custom elements (tag contains '-') always can.
pub fn can_attach_shadow(tag: &str) -> bool {
    tag.contains('-') || SHADOW_HOST_TAGS.contains(&tag)
}
