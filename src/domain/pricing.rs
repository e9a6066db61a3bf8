use derive_more::Display;
use serde::Deserialize;

/// Stock ticker as emitted in `data-ticker`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("Ticker cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Body of the price lookup endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceQuote {
    pub success: bool,
    #[serde(default)]
    pub price: Option<f64>,
}

impl PriceQuote {
    /// The price when the lookup succeeded and carried a usable number.
    pub fn accepted_price(&self) -> Option<f64> {
        if !self.success {
            return None;
        }
        self.price.filter(|p| p.is_finite())
    }
}

/// Direction of a price move, mapped to the highlight class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDirection {
    Up,
    Down,
    Unchanged,
}

pub const PRICE_UP_CLASS: &str = "price-up";
pub const PRICE_DOWN_CLASS: &str = "price-down";

impl PriceDirection {
    /// Without a readable previous price there is nothing to compare against.
    pub fn between(previous: Option<f64>, current: f64) -> Self {
        match previous {
            Some(old) if current > old => PriceDirection::Up,
            Some(old) if current < old => PriceDirection::Down,
            _ => PriceDirection::Unchanged,
        }
    }

    /// `(class to add, class to remove)`
    pub fn highlight(&self) -> Option<(&'static str, &'static str)> {
        match self {
            PriceDirection::Up => Some((PRICE_UP_CLASS, PRICE_DOWN_CLASS)),
            PriceDirection::Down => Some((PRICE_DOWN_CLASS, PRICE_UP_CLASS)),
            PriceDirection::Unchanged => None,
        }
    }
}

/// `$123.46`
pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Plain numeric form written back into attributes and inputs.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

pub fn parse_price_attribute(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).filter(|p| p.is_finite())
}

pub fn price_url(endpoint: &str, ticker: &Ticker) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), ticker.value())
}
