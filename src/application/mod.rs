pub mod chart;
pub mod coordinator;
pub mod price_poller;
pub mod reactions;
pub mod replies;
pub mod trade_form;
pub mod widgets;

pub use coordinator::*;
