//! Host boundary
//!
//! The read-only queries the resolver and traversal engine make against a
//! live tree. `fos_dom::Document` is the engine's own host; anything that
//! can answer these questions can be traversed.

use fos_dom::{Document, NodeId};

pub trait InertHost {
    /// Top-level document node; traversal terminates here
    fn document(&self) -> NodeId;

    /// Parent if it is an element
    fn parent_element(&self, node: NodeId) -> Option<NodeId>;

    /// Root of the node's own tree
    fn root_node(&self, node: NodeId) -> NodeId;

    /// Host of a shadow root, `None` for any other node
    fn shadow_host(&self, root: NodeId) -> Option<NodeId>;

    /// Shadow root attached to an element, open or closed
    fn shadow_root_of(&self, element: NodeId) -> Option<NodeId>;

    fn has_attribute(&self, element: NodeId, name: &str) -> bool;

    /// Numeric tab index, 0 when absent
    fn tab_index(&self, element: NodeId) -> i32;

    fn is_focusable(&self, element: NodeId) -> bool;

    /// Inclusive descendant check within one tree
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Elements of a root in tree order, not entering shadow trees
    fn tree_order_elements(&self, root: NodeId) -> Vec<NodeId>;
}

impl InertHost for Document {
    fn document(&self) -> NodeId {
        self.root()
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.tree().parent_element(node)
    }

    fn root_node(&self, node: NodeId) -> NodeId {
        self.tree().root_node(node)
    }

    fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        self.tree().shadow_host(root)
    }

    fn shadow_root_of(&self, element: NodeId) -> Option<NodeId> {
        self.tree().shadow_root_of(element)
    }

    fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        Document::has_attribute(self, element, name)
    }

    fn tab_index(&self, element: NodeId) -> i32 {
        Document::tab_index(self, element)
    }

    fn is_focusable(&self, element: NodeId) -> bool {
        Document::is_focusable(self, element)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree().contains(ancestor, node)
    }

    fn tree_order_elements(&self, root: NodeId) -> Vec<NodeId> {
        self.tree().tree_order_elements(root)
    }
}
