//! Browser entry point: binds the page behavior to the live DOM.

use std::rc::Rc;

use client_core::{BinderError, BinderOptions, ClickEvent, ReqwestTransport, UiEventBinder};
use tracing::{info, warn};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Element, MouseEvent};

mod dom;

pub use dom::WebDocument;

type PageBinder = UiEventBinder<WebDocument, ReqwestTransport>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let doc =
        WebDocument::new(window).ok_or_else(|| JsValue::from_str("window has no document"))?;
    let transport = ReqwestTransport::new(&doc.origin()?)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    match UiEventBinder::bind(doc, transport, BinderOptions::default()) {
        Ok(binder) => attach(Rc::new(binder)),
        // Pages without the message list carry no behavior.
        Err(BinderError::MissingElement(selector)) => {
            info!(selector, "page behavior not attached");
            Ok(())
        }
        Err(err) => Err(JsValue::from_str(&err.to_string())),
    }
}

fn attach(binder: Rc<PageBinder>) -> Result<(), JsValue> {
    let listener_binder = Rc::clone(&binder);
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        let click = ClickEvent::new(target);
        let action = listener_binder.route_click(&click);
        if click.default_prevented() {
            event.prevent_default();
        }
        let Some(action) = action else {
            return;
        };

        let binder = Rc::clone(&listener_binder);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = binder.perform(action).await {
                warn!("page action failed: {err}");
            }
        });
    });

    binder
        .document()
        .dom()
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}
