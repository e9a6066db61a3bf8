use std::rc::Rc;

use web_sys::Document;

use crate::application::{
    chart::mount_price_chart,
    price_poller::{PriceDisplay, PricePoller},
    reactions::mount_reactions,
    replies::mount_reply_toggles,
    trade_form::TradeFormGuard,
    widgets::initialize_widgets,
};
use crate::config::PageConfig;
use crate::domain::{
    errors::AppResult,
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::http::{FragmentClient, PriceApiClient};
use crate::log_info;

/// What ended up active on the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountSummary {
    pub widgets: usize,
    pub trade_form: bool,
    pub price_poller: bool,
    pub reaction_controls: usize,
    pub reply_toggles: usize,
    pub chart: bool,
}

/// Mounts every page behavior against one document. The behaviors are
/// independent: one failing to mount never prevents the others.
pub struct PageCoordinator {
    document: Document,
    config: PageConfig,
}

impl PageCoordinator {
    pub fn new(document: Document, config: PageConfig) -> Self {
        Self { document, config }
    }

    pub fn mount_all(&self) -> MountSummary {
        let mut summary = MountSummary::default();

        if let Some(report) = self.attempt("Widgets", || initialize_widgets(&self.document)) {
            summary.widgets = report.attached;
        }
        summary.trade_form = self.attempt("TradeForm", || self.mount_trade_form()).unwrap_or(false);
        summary.price_poller = self.attempt("PricePoller", || Ok(self.mount_price_poller())).unwrap_or(false);
        summary.reaction_controls = self
            .attempt("Reactions", || mount_reactions(&self.document, Rc::new(FragmentClient::new())))
            .unwrap_or(0);
        summary.reply_toggles = self.attempt("Replies", || mount_reply_toggles(&self.document)).unwrap_or(0);
        summary.chart = self.attempt("Chart", || mount_price_chart(&self.document, &self.config)).unwrap_or(false);

        log_info!(LogComponent::Application("PageCoordinator"), "Mounted {summary:?}");
        summary
    }

    fn mount_trade_form(&self) -> AppResult<bool> {
        match TradeFormGuard::discover(&self.document) {
            Some(guard) => guard.mount().map(|_| true),
            None => Ok(false),
        }
    }

    fn mount_price_poller(&self) -> bool {
        let Some((display, ticker)) = PriceDisplay::discover(&self.document, &self.config) else {
            return false;
        };
        let source = PriceApiClient::new(self.config.price_endpoint.clone());
        PricePoller::new(source, display, ticker).start(self.config.price_poll_interval_ms).forget();
        true
    }

    fn attempt<T>(&self, name: &'static str, mount: impl FnOnce() -> AppResult<T>) -> Option<T> {
        match mount() {
            Ok(value) => Some(value),
            Err(err) => {
                get_logger().error(LogComponent::Application(name), &err.to_string());
                None
            }
        }
    }
}
