#![cfg(target_arch = "wasm32")]
use trading_page_wasm::application::replies::{mount_reply_toggles, toggle_replies};
use trading_page_wasm::domain::social::ReplyVisibility;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture() -> Document {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(
        r#"<button class="toggle-replies" data-comment-id="42">Show Replies</button>
        <div id="replies-42" class="replies d-none"><p>reply</p></div>"#,
    );
    document
}

#[wasm_bindgen_test]
fn alternating_clicks_flip_class_and_label() {
    let document = fixture();
    assert_eq!(mount_reply_toggles(&document).unwrap(), 1);

    let toggle: HtmlElement = document.query_selector(".toggle-replies").unwrap().unwrap().dyn_into().unwrap();
    let container = document.get_element_by_id("replies-42").unwrap();

    toggle.click();
    assert!(!container.class_list().contains("d-none"));
    assert_eq!(toggle.text_content().as_deref(), Some("Hide Replies"));

    toggle.click();
    assert!(container.class_list().contains("d-none"));
    assert_eq!(toggle.text_content().as_deref(), Some("Show Replies"));
}

#[wasm_bindgen_test]
fn direct_toggle_reports_visibility() {
    let document = fixture();
    let toggle = document.query_selector(".toggle-replies").unwrap().unwrap();

    assert_eq!(toggle_replies(&document, &toggle).unwrap(), Some(ReplyVisibility::Shown));
    assert_eq!(toggle_replies(&document, &toggle).unwrap(), Some(ReplyVisibility::Hidden));
}

#[wasm_bindgen_test]
fn missing_container_is_a_no_op() {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(r#"<button class="toggle-replies" data-comment-id="9">Show Replies</button>"#);
    let toggle = document.query_selector(".toggle-replies").unwrap().unwrap();

    assert_eq!(toggle_replies(&document, &toggle).unwrap(), None);
    assert_eq!(toggle.text_content().as_deref(), Some("Show Replies"));
}
