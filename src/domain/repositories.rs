use crate::domain::errors::AppResult;
use crate::domain::pricing::{PriceQuote, Ticker};

/// Where the poller gets fresh quotes from.
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    async fn fetch_quote(&self, ticker: &Ticker) -> AppResult<PriceQuote>;
}

/// Server-rendered partials returned by the reaction endpoints.
#[allow(async_fn_in_trait)]
pub trait FragmentSource {
    /// Posts to `url` and returns the response body verbatim.
    async fn post_for_fragment(&self, url: &str) -> AppResult<String>;
}
