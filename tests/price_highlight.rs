#![cfg(target_arch = "wasm32")]
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::sleep;
use trading_page_wasm::application::price_poller::{PriceDisplay, PricePoller};
use trading_page_wasm::config::PageConfig;
use trading_page_wasm::domain::errors::{AppError, AppResult};
use trading_page_wasm::domain::pricing::{PriceDirection, PriceQuote, Ticker};
use trading_page_wasm::domain::repositories::PriceSource;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(previous: &str) -> Document {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(&format!(
        r#"<span id="current-price" data-ticker="AAPL" data-price="{previous}">${previous}</span>
        <input id="price" type="hidden" value="{previous}">"#
    ));
    document
}

fn price_element(document: &Document) -> Element {
    document.get_element_by_id("current-price").unwrap()
}

struct ScriptedSource {
    quote: Result<PriceQuote, AppError>,
    calls: Rc<Cell<usize>>,
}

impl PriceSource for ScriptedSource {
    async fn fetch_quote(&self, ticker: &Ticker) -> AppResult<PriceQuote> {
        assert_eq!(ticker.value(), "AAPL");
        self.calls.set(self.calls.get() + 1);
        self.quote.clone()
    }
}

fn poller(document: &Document, quote: Result<PriceQuote, AppError>) -> (PricePoller<ScriptedSource>, Rc<Cell<usize>>) {
    let (display, ticker) = PriceDisplay::discover(document, &PageConfig::default()).expect("price element");
    let calls = Rc::new(Cell::new(0));
    let source = ScriptedSource { quote, calls: Rc::clone(&calls) };
    (PricePoller::new(source, display, ticker), calls)
}

#[wasm_bindgen_test(async)]
async fn higher_price_flashes_up_for_one_second() {
    let document = fixture("100");
    let (poller, calls) = poller(&document, Ok(PriceQuote { success: true, price: Some(101.256) }));

    let direction = poller.poll_once().await.unwrap();
    assert_eq!(direction, Some(PriceDirection::Up));
    assert_eq!(calls.get(), 1);

    let element = price_element(&document);
    assert_eq!(element.text_content().as_deref(), Some("$101.26"));
    assert_eq!(element.get_attribute("data-price").as_deref(), Some("101.256"));
    assert!(element.class_list().contains("price-up"));
    assert!(!element.class_list().contains("price-down"));

    let hidden: HtmlInputElement = document.get_element_by_id("price").unwrap().dyn_into().unwrap();
    assert_eq!(hidden.value(), "101.256");

    sleep(Duration::from_millis(1100)).await;
    assert!(!element.class_list().contains("price-up"));
}

#[wasm_bindgen_test(async)]
async fn lower_price_flashes_down() {
    let document = fixture("100");
    price_element(&document).class_list().add_1("price-up").unwrap();
    let (poller, _) = poller(&document, Ok(PriceQuote { success: true, price: Some(99.0) }));

    assert_eq!(poller.poll_once().await.unwrap(), Some(PriceDirection::Down));
    let element = price_element(&document);
    assert!(element.class_list().contains("price-down"));
    assert!(!element.class_list().contains("price-up"));

    sleep(Duration::from_millis(1100)).await;
    assert!(!element.class_list().contains("price-down"));
}

#[wasm_bindgen_test(async)]
async fn equal_price_applies_no_highlight() {
    let document = fixture("100");
    let (poller, _) = poller(&document, Ok(PriceQuote { success: true, price: Some(100.0) }));

    assert_eq!(poller.poll_once().await.unwrap(), Some(PriceDirection::Unchanged));
    let element = price_element(&document);
    assert!(!element.class_list().contains("price-up"));
    assert!(!element.class_list().contains("price-down"));
    assert_eq!(element.text_content().as_deref(), Some("$100.00"));
}

#[wasm_bindgen_test(async)]
async fn unsuccessful_quote_leaves_display_untouched() {
    let document = fixture("100");
    let (poller, _) = poller(&document, Ok(PriceQuote { success: false, price: None }));

    assert_eq!(poller.poll_once().await.unwrap(), None);
    assert_eq!(price_element(&document).text_content().as_deref(), Some("$100"));
}

#[wasm_bindgen_test(async)]
async fn network_failure_is_reported_not_applied() {
    let document = fixture("100");
    let (poller, _) = poller(&document, Err(AppError::NetworkError("offline".into())));

    assert!(poller.poll_once().await.is_err());
    assert_eq!(price_element(&document).get_attribute("data-price").as_deref(), Some("100"));
}

#[wasm_bindgen_test(async)]
async fn interval_fires_repeatedly() {
    let document = fixture("100");
    let (poller, calls) = poller(&document, Ok(PriceQuote { success: true, price: Some(100.0) }));

    let interval = poller.start(30);
    sleep(Duration::from_millis(100)).await;
    drop(interval);
    assert!(calls.get() >= 2, "expected repeated polls, got {}", calls.get());
}

#[wasm_bindgen_test]
fn missing_ticker_disables_polling() {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(r#"<span id="current-price" data-price="1">$1</span>"#);
    assert!(PriceDisplay::discover(&document, &PageConfig::default()).is_none());
}
