use gloo::net::http::Request;

use crate::domain::{
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
    pricing::{PriceQuote, Ticker, price_url},
    repositories::{FragmentSource, PriceSource},
};

/// Client for `GET {endpoint}/{ticker}`
#[derive(Clone)]
pub struct PriceApiClient {
    endpoint: String,
}

impl PriceApiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    pub fn url_for(&self, ticker: &Ticker) -> String {
        price_url(&self.endpoint, ticker)
    }
}

impl PriceSource for PriceApiClient {
    /// The body is parsed whatever the status: the endpoint reports unknown
    /// tickers as `{"success": false}` with a 404.
    async fn fetch_quote(&self, ticker: &Ticker) -> AppResult<PriceQuote> {
        let url = self.url_for(ticker);
        get_logger().debug(LogComponent::Infrastructure("PriceApi"), &format!("Fetching {url}"));

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to fetch {url}: {e}")))?;

        let status = response.status();
        let quote: PriceQuote = response
            .json()
            .await
            .map_err(|e| AppError::ParseError(format!("Price response (HTTP {status}) is not a quote: {e}")))?;

        Ok(quote)
    }
}

/// POSTs reaction links the way the server's AJAX branch expects.
#[derive(Clone, Default)]
pub struct FragmentClient;

impl FragmentClient {
    pub fn new() -> Self {
        Self
    }
}

impl FragmentSource for FragmentClient {
    async fn post_for_fragment(&self, url: &str) -> AppResult<String> {
        get_logger().debug(LogComponent::Infrastructure("FragmentClient"), &format!("POST {url}"));

        let response = Request::post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to POST {url}: {e}")))?;

        if !response.ok() {
            return Err(AppError::NetworkError(format!(
                "HTTP error: {} - {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::ParseError(format!("Unreadable fragment body: {e}")))
    }
}
