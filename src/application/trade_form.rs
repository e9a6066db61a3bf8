use std::rc::Rc;

use leptos::ev;
use web_sys::{Document, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use crate::config::selectors;
use crate::{log_debug, log_info, log_warn};
use crate::domain::{
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
    trade::{QuantityConstraint, ShareLimit, TradeAction, TradeRejection, check_submission},
};
use crate::infrastructure::{
    bootstrap::{WidgetKind, attach, dispose_tooltip},
    dom::{self, EventOptions, data_attribute, element_by_id, listen},
};

type Notifier = Rc<dyn Fn(&str)>;

/// Client-side guard of the buy/sell form. Advisory only: the server
/// re-validates every order.
pub struct TradeFormGuard {
    form: HtmlFormElement,
    quantity: Option<HtmlInputElement>,
    action: Option<HtmlSelectElement>,
    limit: ShareLimit,
    notify: Notifier,
}

impl TradeFormGuard {
    /// `None` when the page has no trade form.
    pub fn discover(document: &Document) -> Option<Self> {
        let form = element_by_id::<HtmlFormElement>(document, selectors::TRADE_FORM_ID)?;
        let raw_shares = document
            .get_element_by_id(selectors::USER_SHARES_ID)
            .and_then(|el| data_attribute(&el, "shares"));
        let (limit, garbled) = ShareLimit::from_attribute(raw_shares.as_deref());
        if let Some(raw) = garbled {
            log_warn!(LogComponent::Application("TradeForm"), "Unreadable owned-shares value {raw:?}, assuming 0");
        }

        Some(Self {
            form,
            quantity: element_by_id(document, selectors::QUANTITY_ID),
            action: element_by_id(document, selectors::ACTION_ID),
            limit,
            notify: Rc::new(|message: &str| {
                if let Err(err) = dom::alert(message) {
                    get_logger().error(LogComponent::Application("TradeForm"), &err.to_string());
                }
            }),
        })
    }

    /// Replaces the user-facing alert, e.g. to capture it.
    pub fn with_notifier(mut self, notify: impl Fn(&str) + 'static) -> Self {
        self.notify = Rc::new(notify);
        self
    }

    pub fn limit(&self) -> ShareLimit {
        self.limit
    }

    fn selected_action(&self) -> Option<TradeAction> {
        self.action.as_ref().and_then(|select| TradeAction::from_form_value(&select.value()))
    }

    /// Brings the quantity input in line with the selected action.
    pub fn apply_action(&self) -> AppResult<()> {
        let Some(input) = &self.quantity else {
            return Ok(());
        };

        match QuantityConstraint::for_action(self.selected_action(), self.limit) {
            QuantityConstraint::Bounded { max, title } => {
                input.set_max(&max);
                input
                    .set_attribute("data-bs-toggle", "tooltip")
                    .and_then(|_| input.set_attribute("data-bs-placement", "top"))
                    .and_then(|_| input.set_attribute("title", &title))
                    .map_err(|e| AppError::dom("quantity tooltip attributes", e))?;
                if let Err(err) = attach(WidgetKind::Tooltip, input) {
                    get_logger().warn(LogComponent::Application("TradeForm"), &err.to_string());
                }
            }
            QuantityConstraint::Unbounded => {
                let _ = input.remove_attribute("max");
                if let Err(err) = dispose_tooltip(input) {
                    get_logger().warn(LogComponent::Application("TradeForm"), &err.to_string());
                }
                let _ = input.remove_attribute("data-bs-toggle");
                let _ = input.remove_attribute("title");
            }
        }
        Ok(())
    }

    /// Submit-time check of the current form values.
    pub fn review_submission(&self) -> Result<(), TradeRejection> {
        let Some(input) = &self.quantity else {
            return Ok(());
        };
        check_submission(self.selected_action(), &input.value(), self.limit)
    }

    /// Wires the change and submit handlers for the page's lifetime.
    pub fn mount(self) -> AppResult<()> {
        let guard = Rc::new(self);

        if let Some(select) = &guard.action {
            let on_change = Rc::clone(&guard);
            listen(select, ev::change, &EventOptions::default(), move |_| {
                if let Err(err) = on_change.apply_action() {
                    get_logger().error(LogComponent::Application("TradeForm"), &err.to_string());
                }
            })?
            .forget();
        }

        let on_submit = Rc::clone(&guard);
        listen(&guard.form, ev::submit, &EventOptions::cancelable(), move |event| {
            if let Err(rejection) = on_submit.review_submission() {
                event.prevent_default();
                log_info!(LogComponent::Application("TradeForm"), "Blocked sell of {} shares", rejection.requested);
                (on_submit.notify)(&rejection.to_string());
            }
        })?
        .forget();

        log_debug!(LogComponent::Application("TradeForm"), "Trade form guard mounted, owned shares {}", guard.limit);
        Ok(())
    }
}
