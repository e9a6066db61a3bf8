use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::{
    errors::{AppError, AppResult},
    line_chart::{ChartLayout, ChartStyle, LineSeries},
    logging::{LogComponent, get_logger},
    pricing::format_price,
};

const TOOLTIP_BACKGROUND: &str = "rgba(0, 0, 0, 0.8)";
const TOOLTIP_TEXT: &str = "#ffffff";
const TOOLTIP_PADDING: f64 = 6.0;
const TOOLTIP_LINE_HEIGHT: f64 = 16.0;
const TOOLTIP_OFFSET: f64 = 10.0;

/// Canvas 2D renderer for the single-series price chart
pub struct LineChartRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    series: LineSeries,
    style: ChartStyle,
    fallback_size: (u32, u32),
    size: (f64, f64),
    layout: ChartLayout,
    hover: Option<usize>,
}

impl LineChartRenderer {
    pub fn new(
        canvas: HtmlCanvasElement,
        series: LineSeries,
        style: ChartStyle,
        fallback_size: (u32, u32),
    ) -> AppResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| AppError::rendering("getContext(2d)", e))?
            .ok_or_else(|| AppError::RenderingError("2D context not available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::RenderingError("Failed to cast to 2D context".to_string()))?;

        let _ = canvas.set_attribute("aria-label", &series.label);
        let _ = canvas.set_attribute("role", "img");

        let size = (fallback_size.0 as f64, fallback_size.1 as f64);
        let layout = ChartLayout::compute(size.0, size.1, &series, &style);
        Ok(Self { canvas, context, series, style, fallback_size, size, layout, hover: None })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover
    }

    /// Fills the parent's box: pins the canvas CSS size to it, scales the
    /// backing store by the device pixel ratio and recomputes the layout in
    /// CSS pixels. A zero-sized or missing parent uses the fallback size.
    pub fn resize(&mut self) -> AppResult<()> {
        let (css_width, css_height) = self.container_size();
        let ratio = web_sys::window().map(|w| w.device_pixel_ratio()).filter(|r| *r > 0.0).unwrap_or(1.0);

        let style = self.canvas.style();
        let pinned = style
            .set_property("display", "block")
            .and_then(|_| style.set_property("width", &format!("{css_width}px")))
            .and_then(|_| style.set_property("height", &format!("{css_height}px")));
        pinned.map_err(|e| AppError::rendering("canvas style", e))?;

        self.canvas.set_width((css_width * ratio).round() as u32);
        self.canvas.set_height((css_height * ratio).round() as u32);
        self.context
            .set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0)
            .map_err(|e| AppError::rendering("setTransform", e))?;

        self.size = (css_width, css_height);
        self.layout = ChartLayout::compute(css_width, css_height, &self.series, &self.style);
        Ok(())
    }

    fn container_size(&self) -> (f64, f64) {
        let (width, height) = self
            .canvas
            .parent_element()
            .map(|parent| (parent.client_width(), parent.client_height()))
            .unwrap_or((0, 0));
        let width = if width > 0 { width as f64 } else { self.fallback_size.0 as f64 };
        let height = if height > 0 { height as f64 } else { self.fallback_size.1 as f64 };
        (width, height)
    }

    /// Updates the hovered point from a pointer x in CSS pixels. Returns
    /// whether a redraw is needed.
    pub fn set_pointer(&mut self, x: Option<f64>) -> bool {
        let hover = x.and_then(|x| self.layout.nearest_index(x));
        let changed = hover != self.hover;
        self.hover = hover;
        changed
    }

    pub fn render(&self) -> AppResult<()> {
        let ctx = &self.context;
        ctx.clear_rect(0.0, 0.0, self.size.0, self.size.1);

        self.render_value_axis()?;
        self.render_label_axis()?;
        self.render_series();
        if let Some(index) = self.hover {
            self.render_tooltip(index)?;
        }
        Ok(())
    }

    fn render_value_axis(&self) -> AppResult<()> {
        let ctx = &self.context;
        let plot = &self.layout.plot;
        let scale = &self.layout.scale;

        ctx.set_stroke_style_str(self.style.grid_color);
        ctx.set_line_width(1.0);
        ctx.set_fill_style_str(self.style.tick_color);
        ctx.set_font(self.style.font);
        ctx.set_text_align("right");
        ctx.set_text_baseline("middle");

        for (value, label) in scale.ticks().into_iter().zip(scale.tick_labels()) {
            let y = scale.project(value, plot).round() + 0.5;
            ctx.begin_path();
            ctx.move_to(plot.x, y);
            ctx.line_to(plot.right(), y);
            ctx.stroke();
            ctx.fill_text(&label, plot.x - 8.0, y).map_err(|e| AppError::rendering("fillText", e))?;
        }
        Ok(())
    }

    fn render_label_axis(&self) -> AppResult<()> {
        let ctx = &self.context;
        ctx.set_fill_style_str(self.style.tick_color);
        ctx.set_text_align("center");
        ctx.set_text_baseline("top");

        let baseline = self.layout.plot.bottom() + 8.0;
        for &index in &self.layout.x_labels {
            let (Some(label), Some(point)) = (self.series.labels.get(index), self.layout.points.get(index)) else {
                continue;
            };
            ctx.fill_text(label, point.x, baseline).map_err(|e| AppError::rendering("fillText", e))?;
        }
        Ok(())
    }

    fn render_series(&self) {
        let ctx = &self.context;
        let points = &self.layout.points;
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return;
        };

        if points.len() == 1 {
            ctx.set_fill_style_str(self.style.border_color);
            ctx.begin_path();
            let _ = ctx.arc(first.x, first.y, self.style.border_width, 0.0, 2.0 * PI);
            ctx.fill();
            return;
        }

        let trace = || {
            ctx.begin_path();
            ctx.move_to(first.x, first.y);
            for segment in &self.layout.segments {
                ctx.bezier_curve_to(
                    segment.cp1.x,
                    segment.cp1.y,
                    segment.cp2.x,
                    segment.cp2.y,
                    segment.end.x,
                    segment.end.y,
                );
            }
        };

        // area under the line
        trace();
        ctx.line_to(last.x, self.layout.plot.bottom());
        ctx.line_to(first.x, self.layout.plot.bottom());
        ctx.close_path();
        ctx.set_fill_style_str(self.style.fill_color);
        ctx.fill();

        trace();
        ctx.set_stroke_style_str(self.style.border_color);
        ctx.set_line_width(self.style.border_width);
        ctx.stroke();
    }

    fn render_tooltip(&self, index: usize) -> AppResult<()> {
        let ctx = &self.context;
        let (Some(point), Some(label), Some(value)) = (
            self.layout.points.get(index),
            self.series.labels.get(index),
            self.series.values.get(index),
        ) else {
            get_logger().warn(
                LogComponent::Infrastructure("LineChartRenderer"),
                &format!("Hover index {index} outside series"),
            );
            return Ok(());
        };

        ctx.set_fill_style_str(self.style.border_color);
        ctx.begin_path();
        ctx.arc(point.x, point.y, self.style.hover_radius, 0.0, 2.0 * PI)
            .map_err(|e| AppError::rendering("arc", e))?;
        ctx.fill();

        let body = format_price(*value);
        ctx.set_font(self.style.font);
        let measure = |text: &str| ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0);
        let width = measure(label).max(measure(&body)) + TOOLTIP_PADDING * 2.0;
        let height = TOOLTIP_LINE_HEIGHT * 2.0 + TOOLTIP_PADDING * 2.0;

        let mut x = point.x + TOOLTIP_OFFSET;
        if x + width > self.size.0 {
            x = point.x - TOOLTIP_OFFSET - width;
        }
        let y = (point.y - height / 2.0).clamp(0.0, (self.size.1 - height).max(0.0));

        ctx.set_fill_style_str(TOOLTIP_BACKGROUND);
        ctx.fill_rect(x, y, width, height);

        ctx.set_fill_style_str(TOOLTIP_TEXT);
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");
        ctx.fill_text(label, x + TOOLTIP_PADDING, y + TOOLTIP_PADDING)
            .map_err(|e| AppError::rendering("fillText", e))?;
        ctx.fill_text(&body, x + TOOLTIP_PADDING, y + TOOLTIP_PADDING + TOOLTIP_LINE_HEIGHT)
            .map_err(|e| AppError::rendering("fillText", e))?;
        Ok(())
    }
}
