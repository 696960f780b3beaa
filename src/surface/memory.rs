// SPDX-License-Identifier: MPL-2.0
//! In-memory element tree implementing [`Surface`].
//!
//! Clones share the same tree, so a test can keep one handle while the toast
//! manager owns another.

use super::{NodeId, Surface};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::rc::Rc;

/// An event dispatched on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub node: NodeId,
    pub name: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Empty,
    Text(String),
    Markup(String),
}

#[derive(Debug)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    content: Content,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            styles: Vec::new(),
            content: Content::Empty,
            children: Vec::new(),
            parent: None,
        }
    }
}

#[derive(Debug)]
struct Tree {
    elements: HashMap<NodeId, Element>,
    root: NodeId,
    next_id: u64,
    events: Vec<DispatchedEvent>,
}

impl Tree {
    fn new() -> Self {
        let root = NodeId::from_raw(0);
        let mut elements = HashMap::new();
        elements.insert(root, Element::new("body"));
        Self {
            elements,
            root,
            next_id: 1,
            events: Vec::new(),
        }
    }

    fn unlink(&mut self, node: NodeId) {
        let parent = self.elements.get_mut(&node).and_then(|e| e.parent.take());
        if let Some(parent) = parent.and_then(|p| self.elements.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
    }

    fn drop_subtree(&mut self, node: NodeId) {
        if let Some(element) = self.elements.remove(&node) {
            for child in element.children {
                self.drop_subtree(child);
            }
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = self
            .elements
            .get_mut(&node)
            .map(|e| std::mem::take(&mut e.children))
            .unwrap_or_default();
        for child in children {
            self.drop_subtree(child);
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.elements.get(&id).and_then(|e| e.parent);
        }
        false
    }

    /// Detaches `child` from wherever it is so it can be re-inserted.
    ///
    /// Refuses moves that would put a node inside its own subtree.
    fn adopt(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.elements.contains_key(&parent)
            || !self.elements.contains_key(&child)
            || child == self.root
            || self.is_ancestor_or_self(child, parent)
        {
            return false;
        }
        self.unlink(child);
        if let Some(element) = self.elements.get_mut(&child) {
            element.parent = Some(parent);
        }
        true
    }

    fn walk(&self, node: NodeId, visit: &mut impl FnMut(NodeId, &Element) -> bool) -> bool {
        let Some(element) = self.elements.get(&node) else {
            return false;
        };
        if visit(node, element) {
            return true;
        }
        element.children.iter().any(|child| self.walk(*child, visit))
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.elements.get(&node) else {
            return;
        };
        let _ = write!(out, "<{}", element.tag);
        if !element.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
        }
        for (name, value) in &element.attributes {
            if value.is_empty() {
                let _ = write!(out, " {}", name);
            } else {
                let _ = write!(out, " {}=\"{}\"", name, escape(value));
            }
        }
        if !element.styles.is_empty() {
            let style = element
                .styles
                .iter()
                .map(|(p, v)| format!("{}: {}", p, v))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        out.push('>');
        match &element.content {
            Content::Empty => {}
            Content::Text(text) => out.push_str(&escape(text)),
            Content::Markup(markup) => out.push_str(markup),
        }
        for child in &element.children {
            self.write_html(*child, out);
        }
        let _ = write!(out, "</{}>", element.tag);
    }
}

/// Escapes text for inclusion in HTML content or attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Shared in-memory element tree.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    tree: Rc<RefCell<Tree>>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree::new())),
        }
    }

    /// Every event dispatched so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<DispatchedEvent> {
        self.tree.borrow().events.clone()
    }

    /// Events with the given name, oldest first.
    #[must_use]
    pub fn events_named(&self, name: &str) -> Vec<DispatchedEvent> {
        self.tree
            .borrow()
            .events
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().elements.get(&node).map(|e| e.tag.clone())
    }

    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.tree
            .borrow()
            .elements
            .get(&node)
            .map(|e| e.classes.clone())
            .unwrap_or_default()
    }

    /// Whether the node still exists in the arena (attached or not).
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.tree.borrow().elements.contains_key(&node)
    }

    /// Whether the node is reachable from the mount point.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        tree.walk(tree.root, &mut |id, _| id == node)
    }

    /// Descendants of `node` (itself included) carrying `class`, in document order.
    #[must_use]
    pub fn find_by_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let mut found = Vec::new();
        tree.walk(node, &mut |id, element| {
            if element.classes.iter().any(|c| c == class) {
                found.push(id);
            }
            false
        });
        found
    }

    /// Serializes the subtree rooted at `node` to HTML.
    ///
    /// Text content is escaped; markup is emitted verbatim.
    #[must_use]
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree.borrow().write_html(node, &mut out);
        out
    }
}

impl Surface for MemorySurface {
    fn mount_point(&self) -> NodeId {
        self.tree.borrow().root
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let id = NodeId::from_raw(tree.next_id);
        tree.next_id += 1;
        tree.elements.insert(id, Element::new(tag));
        id
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.tree.borrow_mut().elements.get_mut(&node) {
            match element.attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => element
                    .attributes
                    .push((name.to_string(), value.to_string())),
            }
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let tree = self.tree.borrow();
        let element = tree.elements.get(&node)?;
        element
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if class.is_empty() {
            return;
        }
        if let Some(element) = self.tree.borrow_mut().elements.get_mut(&node) {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.tree.borrow_mut().elements.get_mut(&node) {
            element.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree
            .borrow()
            .elements
            .get(&node)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        tree.clear_children(node);
        if let Some(element) = tree.elements.get_mut(&node) {
            element.content = Content::Text(text.to_string());
        }
    }

    fn set_markup(&mut self, node: NodeId, markup: &str) {
        let mut tree = self.tree.borrow_mut();
        tree.clear_children(node);
        if let Some(element) = tree.elements.get_mut(&node) {
            element.content = Content::Markup(markup.to_string());
        }
    }

    fn content(&self, node: NodeId) -> Option<String> {
        let tree = self.tree.borrow();
        match &tree.elements.get(&node)?.content {
            Content::Empty => None,
            Content::Text(s) | Content::Markup(s) => Some(s.clone()),
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.tree.borrow_mut().elements.get_mut(&node) {
            match element.styles.iter_mut().find(|(p, _)| p == property) {
                Some((_, existing)) => *existing = value.to_string(),
                None => element
                    .styles
                    .push((property.to_string(), value.to_string())),
            }
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let tree = self.tree.borrow();
        let element = tree.elements.get(&node)?;
        element
            .styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.adopt(parent, child) {
            if let Some(element) = tree.elements.get_mut(&parent) {
                element.children.push(child);
            }
        }
    }

    fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.adopt(parent, child) {
            if let Some(element) = tree.elements.get_mut(&parent) {
                element.children.insert(0, child);
            }
        }
    }

    fn insert_after(&mut self, parent: NodeId, child: NodeId, sibling: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.adopt(parent, child) {
            if let Some(element) = tree.elements.get_mut(&parent) {
                match element.children.iter().position(|c| *c == sibling) {
                    Some(index) => element.children.insert(index + 1, child),
                    None => element.children.push(child),
                }
            }
        }
    }

    fn remove(&mut self, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if node == tree.root {
            return;
        }
        tree.unlink(node);
        tree.drop_subtree(node);
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let mut found = None;
        tree.walk(tree.root, &mut |node, element| {
            let matches = element
                .attributes
                .iter()
                .any(|(n, v)| n == "id" && v == id);
            if matches {
                found = Some(node);
            }
            matches
        });
        found
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .borrow()
            .elements
            .get(&node)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    fn dispatch(&mut self, node: NodeId, event: &str, detail: &str) {
        self.tree.borrow_mut().events.push(DispatchedEvent {
            node,
            name: event.to_string(),
            detail: detail.to_string(),
        });
    }
}
