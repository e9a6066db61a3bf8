#![cfg(target_arch = "wasm32")]
use trading_page_wasm::application::widgets::{WidgetReport, initialize_widgets};
use trading_page_wasm::domain::errors::AppError;
use trading_page_wasm::infrastructure::bootstrap::{WidgetKind, attach};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

// The test page does not load Bootstrap, so every attach fails.
#[wasm_bindgen_test]
fn missing_bootstrap_is_counted_not_fatal() {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(
        r#"<span data-bs-toggle="tooltip" title="a">a</span>
        <span data-bs-toggle="tooltip" title="b">b</span>
        <button data-bs-toggle="popover" data-bs-content="c">c</button>"#,
    );

    let report = initialize_widgets(&document).unwrap();
    assert_eq!(report, WidgetReport { attached: 0, failed: 3 });

    let element = document.query_selector("span").unwrap().unwrap();
    assert!(matches!(attach(WidgetKind::Tooltip, &element), Err(AppError::WidgetError(_))));
}

#[wasm_bindgen_test]
fn page_without_triggers_reports_nothing() {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html("<p>plain</p>");
    assert_eq!(initialize_widgets(&document).unwrap(), WidgetReport::default());
}
