use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::config::{PageConfig, selectors};
use crate::{log_debug, log_error, log_info, log_warn};
use crate::domain::{
    errors::AppResult,
    logging::LogComponent,
    pricing::{PriceDirection, Ticker, format_number, format_price, parse_price_attribute},
    repositories::PriceSource,
};
use crate::infrastructure::dom::{data_attribute, element_by_id};

/// The `#current-price` element and the hidden order field it feeds.
#[derive(Clone)]
pub struct PriceDisplay {
    element: HtmlElement,
    highlight_ms: u32,
}

impl PriceDisplay {
    /// `None` when the page shows no live price or the ticker is missing.
    pub fn discover(document: &Document, config: &PageConfig) -> Option<(Self, Ticker)> {
        let element = element_by_id::<HtmlElement>(document, selectors::CURRENT_PRICE_ID)?;
        let ticker = match Ticker::new(&data_attribute(&element, "ticker").unwrap_or_default()) {
            Ok(ticker) => ticker,
            Err(reason) => {
                log_warn!(LogComponent::Application("PricePoller"), "Not polling: {reason}");
                return None;
            }
        };
        Some((Self { element, highlight_ms: config.price_highlight_ms }, ticker))
    }

    pub fn displayed_price(&self) -> Option<f64> {
        parse_price_attribute(data_attribute(&self.element, "price").as_deref())
    }

    /// Shows `price`, flashes the direction class and mirrors the value into
    /// the trade form.
    pub fn apply_price(&self, price: f64) -> PriceDirection {
        let direction = PriceDirection::between(self.displayed_price(), price);

        let _ = self.element.set_attribute("data-price", &format_number(price));
        self.element.set_text_content(Some(&format_price(price)));

        if let Some((add, remove)) = direction.highlight() {
            let classes = self.element.class_list();
            let _ = classes.remove_1(remove);
            let _ = classes.add_1(add);
            let element = self.element.clone();
            Timeout::new(self.highlight_ms, move || {
                let _ = element.class_list().remove_1(add);
            })
            .forget();
        }

        let hidden = self
            .element
            .owner_document()
            .and_then(|doc| element_by_id::<HtmlInputElement>(&doc, selectors::HIDDEN_PRICE_ID));
        if let Some(input) = hidden {
            input.set_value(&format_number(price));
        }

        direction
    }
}

/// Periodic refresh of the displayed price.
pub struct PricePoller<S: PriceSource> {
    source: S,
    display: PriceDisplay,
    ticker: Ticker,
}

impl<S: PriceSource + 'static> PricePoller<S> {
    pub fn new(source: S, display: PriceDisplay, ticker: Ticker) -> Self {
        Self { source, display, ticker }
    }

    /// One request/update cycle. `Ok(None)` when the server had no price.
    pub async fn poll_once(&self) -> AppResult<Option<PriceDirection>> {
        let quote = self.source.fetch_quote(&self.ticker).await?;
        match quote.accepted_price() {
            Some(price) => {
                let direction = self.display.apply_price(price);
                log_debug!(
                    LogComponent::Application("PricePoller"),
                    "{} -> {} ({:?})",
                    self.ticker,
                    format_price(price),
                    direction
                );
                Ok(Some(direction))
            }
            None => {
                log_debug!(LogComponent::Application("PricePoller"), "No price for {} in response", self.ticker);
                Ok(None)
            }
        }
    }

    /// Starts polling every `interval_ms`. Each tick runs independently; a
    /// failure is logged and the next tick tries again.
    pub fn start(self, interval_ms: u32) -> Interval {
        let poller = Rc::new(self);
        log_info!(LogComponent::Application("PricePoller"), "Polling {} every {} ms", poller.ticker, interval_ms);
        Interval::new(interval_ms, move || {
            let poller = Rc::clone(&poller);
            spawn_local(async move {
                if let Err(err) = poller.poll_once().await {
                    log_error!(LogComponent::Application("PricePoller"), "Error fetching stock price: {err}");
                }
            });
        })
    }
}
