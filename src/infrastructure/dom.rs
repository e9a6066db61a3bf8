use leptos::ev::EventDescriptor;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, Window};

use crate::domain::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

impl EventOptions {
    /// Handlers that call `prevent_default` must not be passive.
    pub fn cancelable() -> Self {
        Self { passive: false, ..Self::default() }
    }

    pub fn once() -> Self {
        Self { once: true, ..Self::default() }
    }
}

/// Owns the JS callback of a registered listener. Dropping it invalidates
/// the closure, so page-lifetime listeners must be forgotten.
#[must_use = "dropping the handle invalidates the listener"]
pub struct EventListenerHandle {
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListenerHandle {
    pub fn forget(self) {
        self.callback.forget();
    }
}

pub fn listen_named(
    target: &EventTarget,
    event_name: &str,
    options: &EventOptions,
    mut cb: impl FnMut(Event) + 'static,
) -> AppResult<EventListenerHandle> {
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let callback = Closure::wrap(Box::new(move |ev: Event| cb(ev)) as Box<dyn FnMut(Event)>);

    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event_name,
            callback.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(|e| AppError::dom(&format!("addEventListener({event_name})"), e))?;

    Ok(EventListenerHandle { callback })
}

/// Typed variant using leptos' event descriptors (`ev::click`, `ev::submit`, ...).
pub fn listen<E>(
    target: &EventTarget,
    event: E,
    options: &EventOptions,
    mut cb: impl FnMut(E::EventType) + 'static,
) -> AppResult<EventListenerHandle>
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let event_name = event.name().into_owned();
    listen_named(target, &event_name, options, move |ev: Event| {
        cb(ev.unchecked_into::<E::EventType>());
    })
}

pub fn window() -> AppResult<Window> {
    web_sys::window().ok_or_else(|| AppError::DomError("Window not available".to_string()))
}

pub fn document() -> AppResult<Document> {
    window()?.document().ok_or_else(|| AppError::DomError("Document not available".to_string()))
}

/// Element by id, cast to the expected interface. A wrong element type is
/// treated like a missing one.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id).and_then(|el| el.dyn_into::<T>().ok())
}

pub fn query_all(document: &Document, selector: &str) -> AppResult<Vec<Element>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| AppError::dom(&format!("querySelectorAll({selector})"), e))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn data_attribute(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(&format!("data-{name}"))
}

pub fn alert(message: &str) -> AppResult<()> {
    window()?.alert_with_message(message).map_err(|e| AppError::dom("alert", e))
}

/// Runs `mount` once the DOM is parsed; immediately when that already
/// happened before the module was instantiated.
pub fn on_ready(document: &Document, mount: impl FnOnce() + 'static) -> AppResult<()> {
    if document.ready_state() != "loading" {
        mount();
        return Ok(());
    }
    let mut pending = Some(mount);
    listen_named(document, "DOMContentLoaded", &EventOptions::once(), move |_| {
        if let Some(mount) = pending.take() {
            mount();
        }
    })?
    .forget();
    Ok(())
}
