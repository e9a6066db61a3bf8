use std::rc::Rc;

use leptos::ev;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::config::selectors;
use crate::{log_debug, log_error};
use crate::domain::{
    errors::{AppError, AppResult},
    logging::LogComponent,
    repositories::FragmentSource,
    social::{ReactionKind, reaction_selector},
};
use crate::infrastructure::dom::{EventOptions, listen, query_all};

/// Hooks every like/dislike control. Returns how many were found.
pub fn mount_reactions<F: FragmentSource + 'static>(document: &Document, source: Rc<F>) -> AppResult<usize> {
    let buttons = query_all(document, &reaction_selector())?;
    for button in &buttons {
        let target = button.clone();
        let source = Rc::clone(&source);
        listen(button, ev::click, &EventOptions::cancelable(), move |event| {
            event.prevent_default();
            let button = target.clone();
            let source = Rc::clone(&source);
            spawn_local(async move {
                if let Err(err) = react(&button, source.as_ref()).await {
                    log_error!(LogComponent::Application("Reactions"), "Error updating like/dislike: {err}");
                }
            });
        })?
        .forget();
    }
    log_debug!(LogComponent::Application("Reactions"), "{} reaction controls", buttons.len());
    Ok(buttons.len())
}

/// Sends the reaction for `button` and swaps in the returned counter markup.
pub async fn react<F: FragmentSource>(button: &Element, source: &F) -> AppResult<()> {
    let url = button
        .get_attribute("href")
        .filter(|href| !href.trim().is_empty())
        .ok_or_else(|| AppError::DomError("Reaction control has no href".to_string()))?;
    let kind = ReactionKind::from_classes(button.class_name().split_whitespace())
        .ok_or_else(|| AppError::DomError("Element is not a reaction control".to_string()))?;

    let html = source.post_for_fragment(&url).await?;
    apply_fragment(button, kind, &html)
}

/// Replaces the counter with `html` verbatim and flips the button style.
/// Nothing changes when the counter is missing.
pub fn apply_fragment(button: &Element, kind: ReactionKind, html: &str) -> AppResult<()> {
    let counter = button
        .query_selector(selectors::COUNTER)
        .map_err(|e| AppError::dom("querySelector(.counter)", e))?
        .ok_or_else(|| AppError::DomError("Reaction control has no counter".to_string()))?;

    counter.set_outer_html(html);

    let classes = button.class_list();
    for class in kind.toggled_classes() {
        classes.toggle(class).map_err(|e| AppError::dom("classList.toggle", e))?;
    }
    Ok(())
}
