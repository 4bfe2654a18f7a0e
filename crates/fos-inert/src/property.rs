//! `element.inert` property
//!
//! Boolean reflection of a marker attribute on the host document. The
//! plain methods use `inert`; the `_by` variants take the marker a
//! session was configured with.

use fos_dom::{Document, DomResult, NodeId};

use crate::{INERT_ATTRIBUTE, resolver};

pub trait InertElementExt {
    /// Whether the element itself carries `marker`
    fn inert_by(&self, element: NodeId, marker: &str) -> bool;

    /// Add or remove `marker`
    fn set_inert_by(&mut self, element: NodeId, marker: &str, inert: bool) -> DomResult<()>;

    /// Whether the node or any shadow-including ancestor carries `marker`
    fn is_effectively_inert_by(&self, node: NodeId, marker: &str) -> bool;

    fn inert(&self, element: NodeId) -> bool {
        self.inert_by(element, INERT_ATTRIBUTE)
    }

    fn set_inert(&mut self, element: NodeId, inert: bool) -> DomResult<()> {
        self.set_inert_by(element, INERT_ATTRIBUTE, inert)
    }

    fn is_effectively_inert(&self, node: NodeId) -> bool {
        self.is_effectively_inert_by(node, INERT_ATTRIBUTE)
    }
}

impl InertElementExt for Document {
    fn inert_by(&self, element: NodeId, marker: &str) -> bool {
        self.has_attribute(element, marker)
    }

    fn set_inert_by(&mut self, element: NodeId, marker: &str, inert: bool) -> DomResult<()> {
        self.toggle_attribute(element, marker, Some(inert))?;
        Ok(())
    }

    fn is_effectively_inert_by(&self, node: NodeId, marker: &str) -> bool {
        resolver::is_inert(self, node, marker)
    }
}
