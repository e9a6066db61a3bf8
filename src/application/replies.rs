use leptos::ev;
use web_sys::{Document, Element};

use crate::config::selectors;
use crate::domain::{
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
    social::{HIDDEN_CLASS, ReplyVisibility, replies_container_id},
};
use crate::infrastructure::dom::{EventOptions, data_attribute, listen, query_all};

pub fn mount_reply_toggles(document: &Document) -> AppResult<usize> {
    let toggles = query_all(document, selectors::REPLY_TOGGLES)?;
    for toggle in &toggles {
        let target = toggle.clone();
        let document = document.clone();
        listen(toggle, ev::click, &EventOptions::default(), move |_| {
            if let Err(err) = toggle_replies(&document, &target) {
                get_logger().error(LogComponent::Application("Replies"), &err.to_string());
            }
        })?
        .forget();
    }
    Ok(toggles.len())
}

/// Flips the replies container of `toggle`'s comment. `Ok(None)` when the
/// comment has no container on this page.
pub fn toggle_replies(document: &Document, toggle: &Element) -> AppResult<Option<ReplyVisibility>> {
    let Some(comment_id) = data_attribute(toggle, "comment-id") else {
        return Ok(None);
    };
    let Some(container) = document.get_element_by_id(&replies_container_id(&comment_id)) else {
        return Ok(None);
    };

    let hidden = container
        .class_list()
        .toggle(HIDDEN_CLASS)
        .map_err(|e| AppError::dom("classList.toggle", e))?;
    let visibility = ReplyVisibility::from_hidden(hidden);
    toggle.set_text_content(Some(visibility.toggle_label()));
    Ok(Some(visibility))
}
