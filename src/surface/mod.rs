// SPDX-License-Identifier: MPL-2.0
//! Rendering surface abstraction.
//!
//! The toast system never touches a real document. Everything it draws goes
//! through the [`Surface`] trait: a tree of tagged elements carrying classes,
//! attributes, inline styles and either plain text or raw markup. Hosts bind
//! the trait to their real UI (a browser DOM, a retained widget tree...) and
//! translate user input back into [`crate::toasts::Message`]s.
//!
//! [`MemorySurface`] is a complete in-memory implementation used by the tests
//! and for headless rendering to HTML.

mod memory;

pub use memory::{DispatchedEvent, MemorySurface};

/// Identifier of an element created on a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A tree of elements the toast renderer draws into.
///
/// Operations on unknown or already removed nodes are no-ops; queries on them
/// return empty values.
pub trait Surface {
    /// The element containers are appended to (the page body, usually).
    fn mount_point(&self) -> NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Replaces the node's children with plain text.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Replaces the node's children with caller-trusted markup.
    fn set_markup(&mut self, node: NodeId, markup: &str);

    /// Text or markup content last set on the node.
    fn content(&self, node: NodeId) -> Option<String>;

    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    fn append_child(&mut self, parent: NodeId, child: NodeId);

    fn prepend_child(&mut self, parent: NodeId, child: NodeId);

    /// Inserts `child` right after `sibling`, or appends when `sibling`
    /// is not a child of `parent`.
    fn insert_after(&mut self, parent: NodeId, child: NodeId, sibling: NodeId);

    /// Detaches the node and drops it with its subtree.
    fn remove(&mut self, node: NodeId);

    /// First attached element whose `id` attribute equals `id`, in document order.
    fn find_by_id(&self, id: &str) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Dispatches a named event on the node, with the toast id as payload.
    fn dispatch(&mut self, node: NodeId, event: &str, detail: &str);

    /// Sets several inline styles at once.
    fn set_styles(&mut self, node: NodeId, styles: &[(&str, &str)]) {
        for (property, value) in styles {
            self.set_style(node, property, value);
        }
    }
}
