use web_sys::Document;

use crate::config::selectors;
use crate::log_debug;
use crate::domain::errors::AppResult;
use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::bootstrap::{WidgetKind, attach};
use crate::infrastructure::dom::query_all;

/// Outcome of one initialization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetReport {
    pub attached: usize,
    pub failed: usize,
}

/// Instantiates Bootstrap tooltips and popovers on every trigger element.
/// A failing element is logged and skipped.
pub fn initialize_widgets(document: &Document) -> AppResult<WidgetReport> {
    let mut report = WidgetReport::default();

    for (kind, selector) in [
        (WidgetKind::Tooltip, selectors::TOOLTIP_TRIGGERS),
        (WidgetKind::Popover, selectors::POPOVER_TRIGGERS),
    ] {
        for element in query_all(document, selector)? {
            match attach(kind, &element) {
                Ok(()) => report.attached += 1,
                Err(err) => {
                    report.failed += 1;
                    get_logger().warn(LogComponent::Application("Widgets"), &err.to_string());
                }
            }
        }
    }

    log_debug!(
        LogComponent::Application("Widgets"),
        "Widgets attached: {}, failed: {}",
        report.attached,
        report.failed
    );
    Ok(report)
}
