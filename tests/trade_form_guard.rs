#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use trading_page_wasm::application::trade_form::TradeFormGuard;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, EventInit, HtmlInputElement, HtmlSelectElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(shares: &str) -> Document {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(&format!(
        r#"<div id="user-shares" data-shares="{shares}"></div>
        <form id="trade-form" action="/trade">
            <select id="action"><option value="buy">Buy</option><option value="sell">Sell</option></select>
            <input id="quantity" type="number" value="1">
            <input id="price" type="hidden" value="0">
        </form>"#
    ));
    document
}

fn select(document: &Document) -> HtmlSelectElement {
    document.get_element_by_id("action").unwrap().dyn_into().unwrap()
}

fn quantity(document: &Document) -> HtmlInputElement {
    document.get_element_by_id("quantity").unwrap().dyn_into().unwrap()
}

fn dispatch(document: &Document, target_id: &str, event_name: &str) -> bool {
    let init = EventInit::new();
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict(event_name, &init).unwrap();
    document.get_element_by_id(target_id).unwrap().dispatch_event(&event).unwrap()
}

#[wasm_bindgen_test]
fn sell_sets_max_and_buy_removes_it() {
    let document = fixture("10");
    let guard = TradeFormGuard::discover(&document).expect("form present");
    let input = quantity(&document);

    select(&document).set_value("sell");
    guard.apply_action().unwrap();
    assert_eq!(input.get_attribute("max").as_deref(), Some("10"));
    assert_eq!(input.get_attribute("title").as_deref(), Some("Maximum: 10 shares"));
    assert_eq!(input.get_attribute("data-bs-toggle").as_deref(), Some("tooltip"));
    assert_eq!(input.get_attribute("data-bs-placement").as_deref(), Some("top"));

    select(&document).set_value("buy");
    guard.apply_action().unwrap();
    assert_eq!(input.get_attribute("max"), None);
    assert_eq!(input.get_attribute("title"), None);
    assert_eq!(input.get_attribute("data-bs-toggle"), None);
}

#[wasm_bindgen_test]
fn change_event_drives_the_constraint() {
    let document = fixture("3.5");
    TradeFormGuard::discover(&document).unwrap().mount().unwrap();

    select(&document).set_value("sell");
    dispatch(&document, "action", "change");
    assert_eq!(quantity(&document).get_attribute("max").as_deref(), Some("3.5"));
}

#[wasm_bindgen_test]
fn over_limit_sell_is_blocked_with_alert() {
    let document = fixture("5");
    let alerts = Rc::new(RefCell::new(Vec::<String>::new()));
    let recorded = Rc::clone(&alerts);
    TradeFormGuard::discover(&document)
        .unwrap()
        .with_notifier(move |message| recorded.borrow_mut().push(message.to_string()))
        .mount()
        .unwrap();

    select(&document).set_value("sell");
    quantity(&document).set_value("6");
    let proceeded = dispatch(&document, "trade-form", "submit");

    assert!(!proceeded, "submission must be cancelled");
    assert_eq!(alerts.borrow().as_slice(), ["You can only sell a maximum of 5 shares."]);
}

#[wasm_bindgen_test]
fn sell_within_limit_and_buy_are_allowed() {
    let document = fixture("5");
    let guard = TradeFormGuard::discover(&document).unwrap();

    select(&document).set_value("sell");
    quantity(&document).set_value("5");
    assert!(guard.review_submission().is_ok());
    quantity(&document).set_value("2");
    assert!(guard.review_submission().is_ok());

    select(&document).set_value("buy");
    quantity(&document).set_value("500");
    assert!(guard.review_submission().is_ok());
}

#[wasm_bindgen_test]
fn missing_shares_attribute_means_zero_bound() {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(
        r#"<form id="trade-form"><select id="action"><option value="sell">Sell</option></select>
        <input id="quantity" type="number" value="1"></form>"#,
    );
    let guard = TradeFormGuard::discover(&document).unwrap();
    assert_eq!(guard.limit().value(), 0.0);
    assert!(guard.review_submission().is_err());
}

#[wasm_bindgen_test]
fn pages_without_trade_form_are_skipped() {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html("<p>no form</p>");
    assert!(TradeFormGuard::discover(&document).is_none());
}
