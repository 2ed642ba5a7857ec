//! Document seam between the binder and a concrete page.
//!
//! Implementations mutate through `&self` the same way the browser DOM does:
//! everything runs on a single thread and handlers never overlap between
//! suspension points.

use std::{cell::Cell, fmt};

use crate::form::FormControl;

pub trait Document {
    /// Handle to a live element of this document.
    type Element: Clone + PartialEq + fmt::Debug;

    /// First element matching `selector` in document order.
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;
    fn tag_name(&self, element: &Self::Element) -> String;
    fn id(&self, element: &Self::Element) -> Option<String>;
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    /// Flips `class` and reports whether it is present afterwards.
    fn toggle_class(&self, element: &Self::Element, class: &str) -> bool;
    fn set_text(&self, element: &Self::Element, text: &str);
    fn set_inner_html(&self, element: &Self::Element, html: &str);
    fn set_disabled(&self, element: &Self::Element, disabled: bool);
    /// Controls owned by `form`, in document order.
    fn form_controls(&self, form: &Self::Element) -> Vec<FormControl>;
    /// Dispatches a synthetic click on `element`.
    fn click(&self, element: &Self::Element);
    fn reload(&self);

    fn is_button(&self, element: &Self::Element) -> bool {
        self.tag_name(element).eq_ignore_ascii_case("button")
    }
}

/// A click as seen by the binder: its exact target plus the default-action flag.
#[derive(Debug)]
pub struct ClickEvent<E> {
    target: E,
    default_prevented: Cell<bool>,
}

impl<E> ClickEvent<E> {
    pub fn new(target: E) -> Self {
        Self {
            target,
            default_prevented: Cell::new(false),
        }
    }

    pub fn target(&self) -> &E {
        &self.target
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
