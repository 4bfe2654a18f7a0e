//! DOM operation errors

use crate::{NodeId, ShadowError};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found in the arena
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("hierarchy request error")]
    HierarchyRequest,

    /// Operation requires an element
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// Node is not a child of the given parent
    #[error("node {0:?} is not a child")]
    NotAChild(NodeId),

    #[error(transparent)]
    Shadow(#[from] ShadowError),
}
