pub mod errors;
pub mod line_chart;
pub mod logging;
pub mod pricing;
pub mod repositories;
pub mod social;
pub mod trade;
