//! In-memory document tree used by the folio presentation engine.
//!
//! Nodes live in an [`indextree::Arena`]; element attributes are kept in source
//! order in a small inline vector. Everything above this crate addresses nodes
//! by [`NodeId`] and mutates them through [`Document`].
#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod events;
pub mod parser;
mod printing;
pub mod selector;
pub mod style_attr;

use anyhow::{Error, anyhow};
use core::mem;
use indextree::{Arena, Node};
use log::trace;
use smallvec::SmallVec;
use url::Url;

pub use events::{
    EventKind, Propagation, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollRequest,
};
pub use indextree::NodeId;
pub use parser::parse_document;
pub use selector::{SelectorList, parse_selector_list};

/// Attribute storage for a single element, in source order.
pub type Attributes = SmallVec<(String, String), 4>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DomNode {
    pub kind: NodeKind,
    pub attrs: Attributes,
}

/// The document tree plus the small amount of host state the presentation
/// layer needs: a base URL for resolving `src` values and a log of
/// scroll-into-view requests for the embedder to act on.
pub struct Document {
    arena: Arena<DomNode>,
    root: NodeId,
    base_url: Option<Url>,
    scroll_requests: Vec<ScrollRequest>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the root node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DomNode::default());
        Self {
            arena,
            root,
            base_url: None,
            scroll_requests: Vec::new(),
        }
    }

    /// The `#document` node.
    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn set_base_url(&mut self, base_url: Option<Url>) {
        self.base_url = base_url;
    }

    pub fn node(&self, node: NodeId) -> Option<&DomNode> {
        self.arena
            .get(node)
            .filter(|entry| !entry.is_removed())
            .map(Node::get)
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut DomNode> {
        self.arena
            .get_mut(node)
            .filter(|entry| !entry.is_removed())
            .map(Node::get_mut)
    }

    /// Lowercase tag name for element nodes.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { tag } => Some(tag.as_str()),
            NodeKind::Document | NodeKind::Text { .. } | NodeKind::Comment { .. } => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.tag_name(node).is_some()
    }

    // -----------------------
    // Tree construction
    // -----------------------

    /// Create a detached element; attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(DomNode {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
            },
            attrs: Attributes::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DomNode {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            attrs: Attributes::new(),
        })
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DomNode {
            kind: NodeKind::Comment {
                text: text.to_owned(),
            },
            attrs: Attributes::new(),
        })
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if either node was removed or the append would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        parent
            .checked_append(child, &mut self.arena)
            .map_err(|error| anyhow!("append_child({parent:?}, {child:?}) failed: {error}"))
    }

    /// Remove every child of `node` together with their subtrees.
    pub fn remove_children(&mut self, node: NodeId) {
        let children: Vec<NodeId> = self.children(node).collect();
        for child in children {
            child.remove_subtree(&mut self.arena);
        }
    }

    /// Remove `node` and its subtree from the document.
    pub fn remove_node(&mut self, node: NodeId) {
        if node != self.root {
            node.remove_subtree(&mut self.arena);
        }
    }

    // -----------------------
    // Navigation
    // -----------------------

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.parent()
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
    }

    /// Inclusive ancestors, starting at `node` and ending at the root.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.ancestors(&self.arena)
    }

    /// Descendants of `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.arena).skip(1)
    }

    // -----------------------
    // Attributes and classes
    // -----------------------

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Set an attribute, keeping its original position when it already exists.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(entry) = self.node_mut(node) else {
            return;
        };
        if let Some(slot) = entry.attrs.iter_mut().find(|(key, _)| key == name) {
            value.clone_into(&mut slot.1);
        } else {
            entry.attrs.push((name.to_owned(), value.to_owned()));
        }
        trace!("setAttribute({node:?}, {name}={value:?})");
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(entry) = self.node_mut(node) {
            entry.attrs.retain(|(key, _)| key != name);
        }
    }

    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "id").filter(|value| !value.is_empty())
    }

    /// Class tokens of `node` in attribute order.
    pub fn class_list(&self, node: NodeId) -> Vec<&str> {
        self.attribute(node, "class")
            .map(|value| value.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|value| value.split_ascii_whitespace().any(|token| token == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.is_element(node) || self.has_class(node, class) {
            return;
        }
        let mut tokens: Vec<String> = self
            .class_list(node)
            .into_iter()
            .map(str::to_owned)
            .collect();
        tokens.push(class.to_owned());
        self.set_attribute(node, "class", &tokens.join(" "));
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.remove_classes(node, &[class]);
    }

    /// Remove several class tokens in one attribute write.
    pub fn remove_classes(&mut self, node: NodeId, classes: &[&str]) {
        if !classes.iter().any(|class| self.has_class(node, class)) {
            return;
        }
        let remaining: Vec<&str> = self
            .class_list(node)
            .into_iter()
            .filter(|token| !classes.contains(token))
            .collect();
        let joined = remaining.join(" ");
        self.set_attribute(node, "class", &joined);
    }

    /// `classList.toggle(class, force)`.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, force: bool) {
        if force {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    // -----------------------
    // Inline style
    // -----------------------

    /// Value of one property from the inline `style` attribute.
    pub fn style_property(&self, node: NodeId, property: &str) -> Option<String> {
        let style = self.attribute(node, "style")?;
        style_attr::property_value(style, property)
    }

    /// Set one inline style property; an empty `value` removes it, like
    /// assigning `""` through `element.style`.
    pub fn set_style_property(&mut self, node: NodeId, property: &str, value: &str) {
        let current = self.attribute(node, "style").unwrap_or_default();
        let updated = style_attr::with_property(current, property, value);
        if updated.is_empty() {
            self.remove_attribute(node, "style");
        } else {
            self.set_attribute(node, "style", &updated);
        }
    }

    // -----------------------
    // Text
    // -----------------------

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for descendant in node.descendants(&self.arena) {
            if let Some(DomNode {
                kind: NodeKind::Text { text },
                ..
            }) = self.node(descendant)
            {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace all children of `node` with a single text node.
    ///
    /// # Errors
    /// Returns an error if `node` is no longer part of the document.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), Error> {
        self.remove_children(node);
        if text.is_empty() {
            return Ok(());
        }
        let text_node = self.create_text(text);
        self.append_child(node, text_node)
    }

    // -----------------------
    // Queries
    // -----------------------

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&node| self.element_id(node) == Some(id))
    }

    /// First `<body>` element, if the document has one.
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&node| self.tag_name(node) == Some("body"))
    }

    /// First descendant of `scope` matching `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let list = parse_selector_list(selector);
        self.descendants(scope)
            .find(|&node| selector::matches_selector_list(self, node, &list))
    }

    /// All descendants of `scope` matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let list = parse_selector_list(selector);
        self.descendants(scope)
            .filter(|&node| selector::matches_selector_list(self, node, &list))
            .collect()
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let list = parse_selector_list(selector);
        self.ancestors(node)
            .find(|&candidate| selector::matches_selector_list(self, candidate, &list))
    }

    pub fn matches(&self, node: NodeId, selector: &str) -> bool {
        selector::matches_selector_list(self, node, &parse_selector_list(selector))
    }

    // -----------------------
    // Host state
    // -----------------------

    /// Resolve a `src`-style value against the base URL, the way a browser
    /// reports `img.src`. Without a base, or when joining fails, the raw
    /// value is returned unchanged.
    pub fn resolve_url(&self, raw: &str) -> String {
        self.base_url
            .as_ref()
            .and_then(|base| base.join(raw).ok())
            .map_or_else(|| raw.to_owned(), |url| url.to_string())
    }

    /// Record a request to scroll `node` into view.
    pub fn scroll_into_view(&mut self, node: NodeId, options: ScrollIntoViewOptions) {
        self.scroll_requests.push(ScrollRequest { node, options });
    }

    /// Drain pending scroll requests.
    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        mem::take(&mut self.scroll_requests)
    }

    pub fn pending_scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_with_class(document: &mut Document, class: &str) -> NodeId {
        let node = document.create_element("div");
        document.set_attribute(node, "class", class);
        let root = document.root();
        assert!(document.append_child(root, node).is_ok());
        node
    }

    #[test]
    fn class_list_edits_preserve_other_tokens() {
        let mut document = Document::new();
        let node = element_with_class(&mut document, "portfolio-item reveal-up");

        document.remove_class(node, "reveal-up");
        document.add_class(node, "revealed");
        document.add_class(node, "revealed");

        assert_eq!(document.class_list(node), vec!["portfolio-item", "revealed"]);
    }

    #[test]
    fn remove_classes_drops_every_listed_token() {
        let mut document = Document::new();
        let node = element_with_class(&mut document, "item active far-next keep");

        document.remove_classes(node, &["active", "prev", "next", "far-prev", "far-next"]);

        assert_eq!(document.attribute(node, "class"), Some("item keep"));
    }

    #[test]
    fn toggle_class_honours_force_flag() {
        let mut document = Document::new();
        let node = element_with_class(&mut document, "carousel-indicator");

        document.toggle_class(node, "active", true);
        assert!(document.has_class(node, "active"));
        document.toggle_class(node, "active", false);
        assert!(!document.has_class(node, "active"));
    }

    #[test]
    fn set_text_content_replaces_children() -> Result<(), Error> {
        let mut document = Document::new();
        let node = element_with_class(&mut document, "box");
        let inner = document.create_element("span");
        document.append_child(node, inner)?;

        document.set_text_content(node, "hello")?;

        assert_eq!(document.children(node).count(), 1);
        assert_eq!(document.text_content(node), "hello");
        assert!(document.node(inner).is_none());
        Ok(())
    }

    #[test]
    fn style_properties_round_through_attribute() {
        let mut document = Document::new();
        let node = element_with_class(&mut document, "modal-prev");

        document.set_style_property(node, "display", "none");
        assert_eq!(document.style_property(node, "display").as_deref(), Some("none"));

        document.set_style_property(node, "display", "");
        assert!(!document.has_attribute(node, "style"));
    }

    #[test]
    fn resolve_url_joins_against_base() -> Result<(), Error> {
        let mut document = Document::new();
        assert_eq!(document.resolve_url("img/a.png"), "img/a.png");

        document.set_base_url(Some(Url::parse("https://example.com/site/index.html")?));
        assert_eq!(
            document.resolve_url("img/a.png"),
            "https://example.com/site/img/a.png"
        );
        Ok(())
    }
}
