use derive_more::Display;
use strum::{AsRefStr, EnumString};

/// Value of the trade form's action select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    /// Unknown values behave like "buy": no client-side bound applies.
    pub fn from_form_value(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

/// Owned shares of the ticker on the page, the upper bound for a sell order.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
#[display(fmt = "{}", _0)]
pub struct ShareLimit(f64);

impl ShareLimit {
    pub fn new(shares: f64) -> Self {
        Self(shares)
    }

    /// Reads the `data-shares` attribute. Missing, empty or garbled values
    /// yield a zero bound; the garbled case is reported as `Err` alongside.
    pub fn from_attribute(raw: Option<&str>) -> (Self, Option<String>) {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => (Self(0.0), None),
            Some(text) => match text.parse::<f64>() {
                Ok(value) if value.is_finite() => (Self(value), None),
                _ => (Self(0.0), Some(text.to_string())),
            },
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn tooltip_title(&self) -> String {
        format!("Maximum: {} shares", self)
    }
}

/// What the quantity input should look like for the selected action.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityConstraint {
    Bounded { max: String, title: String },
    Unbounded,
}

impl QuantityConstraint {
    pub fn for_action(action: Option<TradeAction>, limit: ShareLimit) -> Self {
        match action {
            Some(TradeAction::Sell) => QuantityConstraint::Bounded {
                max: limit.to_string(),
                title: limit.tooltip_title(),
            },
            _ => QuantityConstraint::Unbounded,
        }
    }
}

/// Reason a trade submission is held back on the client.
#[derive(Debug, Clone, PartialEq, Display)]
#[display(fmt = "You can only sell a maximum of {} shares.", limit)]
pub struct TradeRejection {
    pub limit: ShareLimit,
    pub requested: f64,
}

/// Advisory submit check. Only an unambiguous over-limit sell is rejected;
/// an unreadable quantity is left for the server to judge.
pub fn check_submission(
    action: Option<TradeAction>,
    quantity_raw: &str,
    limit: ShareLimit,
) -> Result<(), TradeRejection> {
    if action != Some(TradeAction::Sell) {
        return Ok(());
    }
    match quantity_raw.trim().parse::<f64>() {
        Ok(requested) if requested > limit.value() => Err(TradeRejection { limit, requested }),
        _ => Ok(()),
    }
}
