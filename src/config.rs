use serde::Deserialize;

use crate::domain::errors::{AppError, AppResult};
use crate::domain::logging::LogLevel;

/// Names the server-rendered markup is expected to use.
pub mod selectors {
    pub const TOOLTIP_TRIGGERS: &str = r#"[data-bs-toggle="tooltip"]"#;
    pub const POPOVER_TRIGGERS: &str = r#"[data-bs-toggle="popover"]"#;

    pub const TRADE_FORM_ID: &str = "trade-form";
    pub const QUANTITY_ID: &str = "quantity";
    pub const ACTION_ID: &str = "action";
    pub const USER_SHARES_ID: &str = "user-shares";
    pub const HIDDEN_PRICE_ID: &str = "price";

    pub const CURRENT_PRICE_ID: &str = "current-price";
    pub const CHART_ID: &str = "stock-price-chart";

    pub const COUNTER: &str = ".counter";
    pub const REPLY_TOGGLES: &str = ".toggle-replies";

    pub const CONFIG_BLOB_ID: &str = "page-config";
}

/// Tunables of the page behaviors. Every field has a default so the optional
/// `#page-config` JSON blob only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub price_poll_interval_ms: u32,
    pub price_highlight_ms: u32,
    pub price_endpoint: String,
    pub log_level: LogLevel,
    pub chart_fallback_width: u32,
    pub chart_fallback_height: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            price_poll_interval_ms: 30_000,
            price_highlight_ms: 1_000,
            price_endpoint: "/api/stock/price".to_string(),
            log_level: LogLevel::Debug,
            chart_fallback_width: 800,
            chart_fallback_height: 400,
        }
    }
}

impl PageConfig {
    pub fn from_json(text: &str) -> AppResult<Self> {
        let config: PageConfig = serde_json::from_str(text)?;
        config.validated()
    }

    fn validated(self) -> AppResult<Self> {
        if self.price_poll_interval_ms == 0 {
            return Err(AppError::ParseError("price_poll_interval_ms must be positive".to_string()));
        }
        if self.price_endpoint.trim().is_empty() {
            return Err(AppError::ParseError("price_endpoint cannot be empty".to_string()));
        }
        Ok(self)
    }

    /// Reads the blob if the page has one. Failures fall back to defaults and
    /// are returned so they can be logged once a logger exists.
    pub fn load(document: Option<&web_sys::Document>) -> (Self, Option<AppError>) {
        let blob = document
            .and_then(|doc| doc.get_element_by_id(selectors::CONFIG_BLOB_ID))
            .and_then(|el| el.text_content());
        match blob {
            None => (Self::default(), None),
            Some(text) => match Self::from_json(&text) {
                Ok(config) => (config, None),
                Err(err) => (Self::default(), Some(err)),
            },
        }
    }
}
