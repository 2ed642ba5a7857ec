//! In-memory `Document` used by the headless driver and by tests.
//!
//! Selectors are limited to a single compound selector: an optional tag
//! followed by any number of `#id` and `.class` parts (`button.btn-primary`,
//! `#likes`, `.modal-half`). Combinators are not supported and match nothing.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use serde::Serialize;
use tracing::debug;

use crate::{
    dom::Document,
    form::{ControlKind, FormControl},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

/// Builder for an element appended to a `MemoryDocument`.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    inner_html: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct PageState {
    nodes: Vec<Node>,
    clicks: Vec<NodeId>,
    reloads: usize,
}

/// Cloning yields another handle to the same page.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    state: Rc<RefCell<PageState>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Creates a page holding only a `<body>` root.
    pub fn new() -> Self {
        let body = Node {
            tag: "body".to_string(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            inner_html: None,
            parent: None,
            children: Vec::new(),
        };
        Self {
            state: Rc::new(RefCell::new(PageState {
                nodes: vec![body],
                clicks: Vec::new(),
                reloads: 0,
            })),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId(state.nodes.len());
        state.nodes.push(Node {
            tag: spec.tag,
            id: spec.id,
            classes: spec.classes,
            attributes: spec.attributes,
            text: spec.text,
            inner_html: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        state.nodes[parent.0].children.push(id);
        id
    }

    pub fn text(&self, node: NodeId) -> String {
        self.state.borrow().nodes[node.0].text.clone()
    }

    /// Markup assigned through `set_inner_html`, if any.
    pub fn inner_html(&self, node: NodeId) -> Option<String> {
        self.state.borrow().nodes[node.0].inner_html.clone()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.state.borrow().nodes[node.0].classes.clone()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.state.borrow().nodes[node.0]
            .attributes
            .get(name)
            .cloned()
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: impl Into<String>) {
        self.state.borrow_mut().nodes[node.0]
            .attributes
            .insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.state.borrow().nodes[node.0]
            .attributes
            .contains_key("disabled")
    }

    /// Synthetic clicks dispatched so far, oldest first.
    pub fn clicks(&self) -> Vec<NodeId> {
        self.state.borrow().clicks.clone()
    }

    pub fn reload_count(&self) -> usize {
        self.state.borrow().reloads
    }

    fn document_order(state: &PageState) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(state.nodes.len());
        let mut stack = vec![NodeId(0)];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(state.nodes[node.0].children.iter().rev().copied());
        }
        order
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl CompoundSelector {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.contains(|c: char| c.is_whitespace() || "> +~[:,".contains(c)) {
            return None;
        }

        let mut selector = Self::default();
        let mut rest = raw;
        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        if tag_end > 0 {
            selector.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let part = &body[..end];
            if part.is_empty() {
                return None;
            }
            match marker {
                '#' => selector.id = Some(part.to_string()),
                _ => selector.classes.push(part.to_string()),
            }
            rest = &body[end..];
        }
        Some(selector)
    }

    fn matches(&self, node: &Node) -> bool {
        self.tag.as_deref().map_or(true, |tag| node.tag == tag)
            && self
                .id
                .as_deref()
                .map_or(true, |id| node.id.as_deref() == Some(id))
            && self
                .classes
                .iter()
                .all(|class| node.classes.iter().any(|have| have == class))
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = CompoundSelector::parse(selector) else {
            debug!(selector, "unsupported selector in memory document");
            return Vec::new();
        };
        let state = self.state.borrow();
        Self::document_order(&state)
            .into_iter()
            .skip(1)
            .filter(|node| selector.matches(&state.nodes[node.0]))
            .collect()
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let state = self.state.borrow();
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if current == *ancestor {
                return true;
            }
            cursor = state.nodes[current.0].parent;
        }
        false
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.state.borrow().nodes[element.0].tag.to_ascii_uppercase()
    }

    fn id(&self, element: &NodeId) -> Option<String> {
        self.state.borrow().nodes[element.0].id.clone()
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.state.borrow().nodes[element.0]
            .classes
            .iter()
            .any(|have| have == class)
    }

    fn toggle_class(&self, element: &NodeId, class: &str) -> bool {
        let mut state = self.state.borrow_mut();
        let classes = &mut state.nodes[element.0].classes;
        if let Some(pos) = classes.iter().position(|have| have == class) {
            classes.remove(pos);
            false
        } else {
            classes.push(class.to_string());
            true
        }
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        let mut state = self.state.borrow_mut();
        let node = &mut state.nodes[element.0];
        node.text = text.to_string();
        node.inner_html = None;
    }

    fn set_inner_html(&self, element: &NodeId, html: &str) {
        self.state.borrow_mut().nodes[element.0].inner_html = Some(html.to_string());
    }

    fn set_disabled(&self, element: &NodeId, disabled: bool) {
        let mut state = self.state.borrow_mut();
        let attributes = &mut state.nodes[element.0].attributes;
        if disabled {
            attributes.insert("disabled".to_string(), String::new());
        } else {
            attributes.remove("disabled");
        }
    }

    fn form_controls(&self, form: &NodeId) -> Vec<FormControl> {
        let state = self.state.borrow();
        Self::document_order(&state)
            .into_iter()
            .filter(|node| node != form && self.contains(form, node))
            .filter_map(|node| {
                let node = &state.nodes[node.0];
                let kind = ControlKind::from_tag(
                    &node.tag,
                    node.attributes.get("type").map(String::as_str),
                );
                if kind == ControlKind::Other {
                    return None;
                }
                let value = match kind {
                    ControlKind::TextArea => node.text.clone(),
                    ControlKind::Checkbox | ControlKind::Radio => node
                        .attributes
                        .get("value")
                        .cloned()
                        .unwrap_or_else(|| "on".to_string()),
                    _ => node.attributes.get("value").cloned().unwrap_or_default(),
                };
                Some(FormControl {
                    name: node.attributes.get("name").cloned().unwrap_or_default(),
                    value,
                    kind,
                    disabled: node.attributes.contains_key("disabled"),
                    checked: node.attributes.contains_key("checked"),
                })
            })
            .collect()
    }

    fn click(&self, element: &NodeId) {
        self.state.borrow_mut().clicks.push(*element);
    }

    fn reload(&self) {
        self.state.borrow_mut().reloads += 1;
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
