//! fOS Inert
//!
//! Emulates `inert` subtrees on a document that has no native support:
//! an inert element and its descendants (across shadow boundaries) cannot
//! take focus, cannot be activated and are skipped by Tab navigation.
//!
//! Features:
//! - Inertness resolution across shadow roots
//! - Tab direction tracking from keydown/pointerdown
//! - Tab-order traversal with positive tabindex groups
//! - Capture-phase focus and click interception
//! - Per-shadow-root focus listener tracking

pub mod config;
pub mod direction;
pub mod host;
pub mod interceptor;
pub mod profile;
pub mod property;
pub mod resolver;
pub mod session;
pub mod shadow_tracker;
pub mod style;
pub mod traversal;

pub use config::{InertConfig, ProfilePreference};
pub use direction::{DirectionTracker, TabDirection};
pub use host::InertHost;
pub use interceptor::{ClickInterceptor, FocusInterceptor, FocusOutcome};
pub use profile::{EmulatedTraversal, HostProfile, SyntheticTabDispatch, select_profile};
pub use property::InertElementExt;
pub use resolver::{is_inert, made_inert_by};
pub use session::InertSession;
pub use shadow_tracker::{ScopeListener, ShadowFocusTracker, TrackerState};
pub use style::INERT_STYLESHEET;

use fos_dom::NodeId;

/// Default marker attribute
pub const INERT_ATTRIBUTE: &str = "inert";

/// Inert emulation errors
#[derive(Debug, thiserror::Error)]
pub enum InertError {
    /// The traversal start claims a positive tab index but its root's
    /// positive group does not list it
    #[error("element {element:?} has tabindex {tab_index} but is missing from its positive tabindex group")]
    MissingFromTabGroup { element: NodeId, tab_index: i32 },

    /// The traversal start is not connected to the document
    #[error("element {0:?} is not connected to a traversal root")]
    Detached(NodeId),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Dom(#[from] fos_dom::DomError),
}
