//! Bindings to the Bootstrap widgets the pages load globally.
//!
//! Every entry point is `catch`: when `window.bootstrap` is absent the
//! constructor throws a ReferenceError which surfaces as `Err`.

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::domain::errors::{AppError, AppResult};

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
    pub type Tooltip;

    #[wasm_bindgen(constructor, catch)]
    fn create(element: &Element) -> Result<Tooltip, JsValue>;

    #[wasm_bindgen(static_method_of = Tooltip, js_name = getInstance, catch)]
    fn get_instance(element: &Element) -> Result<Option<Tooltip>, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn dispose(this: &Tooltip) -> Result<(), JsValue>;

    pub type Popover;

    #[wasm_bindgen(constructor, catch)]
    fn create(element: &Element) -> Result<Popover, JsValue>;
}

/// Which widget a trigger element asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Tooltip,
    Popover,
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Tooltip => "tooltip",
            WidgetKind::Popover => "popover",
        }
    }
}

/// Instantiates a widget on `element`. The JS object registers itself on the
/// element, so the Rust handle is not kept.
pub fn attach(kind: WidgetKind, element: &Element) -> AppResult<()> {
    let result = match kind {
        WidgetKind::Tooltip => Tooltip::create(element).map(drop),
        WidgetKind::Popover => Popover::create(element).map(drop),
    };
    result.map_err(|e| AppError::widget(&format!("bootstrap.{}", kind.name()), e))
}

/// Disposes the tooltip registered on `element`, if any. Returns whether one
/// was found.
pub fn dispose_tooltip(element: &Element) -> AppResult<bool> {
    let instance =
        Tooltip::get_instance(element).map_err(|e| AppError::widget("bootstrap.Tooltip.getInstance", e))?;
    match instance {
        Some(tooltip) => {
            tooltip.dispose().map_err(|e| AppError::widget("bootstrap.Tooltip.dispose", e))?;
            Ok(true)
        }
        None => Ok(false),
    }
}
