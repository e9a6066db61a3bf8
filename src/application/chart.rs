use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use web_sys::{Document, HtmlCanvasElement};

use crate::config::{PageConfig, selectors};
use crate::domain::{
    errors::{AppError, AppResult},
    line_chart::{ChartStyle, PriceHistory},
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::{
    dom::{self, EventOptions, data_attribute, element_by_id, listen},
    rendering::LineChartRenderer,
};
use crate::log_info;

/// Builds the renderer for the page's history chart without drawing or
/// wiring anything. `Ok(None)` when the page has no chart placeholder.
pub fn prepare_price_chart(document: &Document, config: &PageConfig) -> AppResult<Option<LineChartRenderer>> {
    let Some(placeholder) = document.get_element_by_id(selectors::CHART_ID) else {
        return Ok(None);
    };

    let ticker = data_attribute(&placeholder, "ticker").unwrap_or_default();
    let series = PriceHistory::parse(data_attribute(&placeholder, "history").as_deref())?.into_series(&ticker)?;

    let canvas = element_by_id::<HtmlCanvasElement>(document, selectors::CHART_ID)
        .ok_or_else(|| AppError::RenderingError("Chart placeholder is not a canvas".to_string()))?;

    let renderer = LineChartRenderer::new(
        canvas,
        series,
        ChartStyle::default(),
        (config.chart_fallback_width, config.chart_fallback_height),
    )?;
    Ok(Some(renderer))
}

/// Draws the chart and keeps it responsive to resizes and hovering.
/// Returns whether a chart was drawn.
pub fn mount_price_chart(document: &Document, config: &PageConfig) -> AppResult<bool> {
    let Some(mut renderer) = prepare_price_chart(document, config)? else {
        return Ok(false);
    };
    renderer.resize()?;
    renderer.render()?;

    let points = renderer.layout().points.len();
    let canvas = renderer.canvas().clone();
    let renderer = Rc::new(RefCell::new(renderer));

    let window = dom::window()?;
    let on_resize = Rc::clone(&renderer);
    listen(&window, ev::resize, &EventOptions::default(), move |_| {
        let mut chart = on_resize.borrow_mut();
        if let Err(err) = chart.resize().and_then(|_| chart.render()) {
            get_logger().error(LogComponent::Application("Chart"), &err.to_string());
        }
    })?
    .forget();

    let on_move = Rc::clone(&renderer);
    listen(&canvas, ev::mousemove, &EventOptions::default(), move |event| {
        redraw_if(&on_move, |chart| chart.set_pointer(Some(event.offset_x() as f64)));
    })?
    .forget();

    let on_leave = Rc::clone(&renderer);
    listen(&canvas, ev::mouseleave, &EventOptions::default(), move |_| {
        redraw_if(&on_leave, |chart| chart.set_pointer(None));
    })?
    .forget();

    log_info!(LogComponent::Application("Chart"), "Rendered price chart with {points} points");
    Ok(true)
}

fn redraw_if(renderer: &Rc<RefCell<LineChartRenderer>>, update: impl FnOnce(&mut LineChartRenderer) -> bool) {
    let mut chart = renderer.borrow_mut();
    if update(&mut chart) {
        if let Err(err) = chart.render() {
            get_logger().error(LogComponent::Application("Chart"), &err.to_string());
        }
    }
}
