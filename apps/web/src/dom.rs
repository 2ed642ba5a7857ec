//! `Document` over the live browser DOM.

use client_core::{ControlKind, Document, FormControl};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlOptionElement, HtmlSelectElement, HtmlTextAreaElement, Window,
};

const CONTROL_SELECTOR: &str = "input, textarea, select, button";

pub struct WebDocument {
    window: Window,
    dom: web_sys::Document,
}

impl WebDocument {
    pub fn new(window: Window) -> Option<Self> {
        let dom = window.document()?;
        Some(Self { window, dom })
    }

    pub fn dom(&self) -> &web_sys::Document {
        &self.dom
    }

    /// Origin the page was served from; requests are resolved against it.
    pub fn origin(&self) -> Result<String, JsValue> {
        self.window.location().origin()
    }

    fn elements(list: web_sys::NodeList) -> Vec<Element> {
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

fn controls_from(element: &Element) -> Vec<FormControl> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return vec![FormControl {
            name: input.name(),
            value: input.value(),
            kind: ControlKind::from_tag("input", Some(input.type_().as_str())),
            disabled: input.disabled(),
            checked: input.checked(),
        }];
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return vec![FormControl {
            disabled: area.disabled(),
            ..FormControl::new(ControlKind::TextArea, area.name(), area.value())
        }];
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        let options = select.selected_options();
        let selected = (0..options.length())
            .filter_map(|index| options.item(index))
            .filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
            .map(|option| option.value());
        return FormControl::select_options(&select.name(), selected, select.disabled());
    }
    if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
        return vec![FormControl {
            disabled: button.disabled(),
            ..FormControl::new(ControlKind::Button, button.name(), button.value())
        }];
    }
    Vec::new()
}

impl Document for WebDocument {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        match self.dom.query_selector(selector) {
            Ok(found) => found,
            Err(_) => {
                warn!(selector, "selector rejected by the browser");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.dom.query_selector_all(selector) {
            Ok(list) => Self::elements(list),
            Err(_) => {
                warn!(selector, "selector rejected by the browser");
                Vec::new()
            }
        }
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name()
    }

    fn id(&self, element: &Element) -> Option<String> {
        let id = element.id();
        (!id.is_empty()).then_some(id)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn toggle_class(&self, element: &Element, class: &str) -> bool {
        let classes = element.class_list();
        classes.toggle(class).unwrap_or_else(|_| {
            warn!(class, "class toggle rejected");
            classes.contains(class)
        })
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
            return;
        }
        let result = if disabled {
            element.set_attribute("disabled", "")
        } else {
            element.remove_attribute("disabled")
        };
        if result.is_err() {
            warn!(disabled, "could not update disabled attribute");
        }
    }

    fn form_controls(&self, form: &Element) -> Vec<FormControl> {
        let owned: Vec<Element> = match form.dyn_ref::<HtmlFormElement>() {
            Some(form) => {
                let collection = form.elements();
                (0..collection.length())
                    .filter_map(|index| collection.item(index))
                    .collect()
            }
            None => form
                .query_selector_all(CONTROL_SELECTOR)
                .map(Self::elements)
                .unwrap_or_default(),
        };
        owned.iter().flat_map(controls_from).collect()
    }

    fn click(&self, element: &Element) {
        match element.dyn_ref::<HtmlElement>() {
            Some(element) => element.click(),
            None => warn!("click target is not an HTML element"),
        }
    }

    fn reload(&self) {
        if self.window.location().reload().is_err() {
            warn!("page reload rejected");
        }
    }
}
