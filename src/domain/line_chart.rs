//! Geometry for the historical price line chart.
//!
//! Everything here is plain arithmetic over the parsed history so it can be
//! exercised without a canvas; the browser renderer only replays the result.

use serde::Deserialize;

use crate::domain::errors::{AppError, AppResult};
use crate::domain::pricing::format_price;

/// One `{date, close}` entry of the inline history blob.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceHistory(Vec<HistoryPoint>);

impl PriceHistory {
    /// Parses `data-history`. A missing attribute or JSON `null` is an empty
    /// history, anything else that is not a list of points is an error.
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };
        let points: Option<Vec<HistoryPoint>> = serde_json::from_str(text)?;
        Ok(Self(points.unwrap_or_default()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|p| p.date.clone()).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.close).collect()
    }

    /// Requires at least one point; an empty chart is never drawn.
    pub fn into_series(self, ticker: &str) -> AppResult<LineSeries> {
        if self.is_empty() {
            return Err(AppError::RenderingError("No historical data available".to_string()));
        }
        Ok(LineSeries { label: format!("{} Price", ticker), labels: self.labels(), values: self.closes() })
    }
}

/// Single dataset of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Fixed look of the price chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub border_color: &'static str,
    pub fill_color: &'static str,
    pub border_width: f64,
    pub point_radius: f64,
    pub hover_radius: f64,
    pub tension: f64,
    pub max_x_ticks: usize,
    pub max_y_ticks: usize,
    pub tick_color: &'static str,
    pub grid_color: &'static str,
    pub font: &'static str,
    pub padding: Padding,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            border_color: "#0f4d92",
            fill_color: "rgba(15, 77, 146, 0.1)",
            border_width: 2.0,
            point_radius: 0.0,
            hover_radius: 5.0,
            tension: 0.1,
            max_x_ticks: 10,
            max_y_ticks: 6,
            tick_color: "#666666",
            grid_color: "rgba(0, 0, 0, 0.1)",
            font: "12px sans-serif",
            padding: Padding { top: 10.0, right: 16.0, bottom: 28.0, left: 68.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Y axis range snapped to round steps. Never forced to include zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ValueScale {
    pub fn nice(data_min: f64, data_max: f64, max_ticks: usize) -> Self {
        let (mut lo, mut hi) = (data_min.min(data_max), data_min.max(data_max));
        if (hi - lo).abs() < f64::EPSILON {
            let pad = if lo == 0.0 { 1.0 } else { (lo * 0.05).abs() };
            lo -= pad;
            hi += pad;
        }
        let intervals = max_ticks.max(2) - 1;
        let range = nice_number(hi - lo, false);
        let step = nice_number(range / intervals as f64, true);
        Self { min: (lo / step).floor() * step, max: (hi / step).ceil() * step, step }
    }

    pub fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as usize;
        (0..=count.min(1000)).map(|i| self.min + i as f64 * self.step).collect()
    }

    pub fn tick_labels(&self) -> Vec<String> {
        self.ticks().into_iter().map(format_price).collect()
    }

    pub fn project(&self, value: f64, area: &Rect) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return area.y + area.height / 2.0;
        }
        area.y + area.height * (self.max - value) / span
    }
}

/// Rounds a range to 1, 2, 5 or 10 times a power of ten.
fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = range / magnitude;
    let nice = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Indices of the x labels to draw, evenly thinned to at most `max_ticks`.
pub fn x_label_indices(count: usize, max_ticks: usize) -> Vec<usize> {
    if count == 0 || max_ticks == 0 {
        return Vec::new();
    }
    let stride = count.div_ceil(max_ticks);
    (0..count).step_by(stride).collect()
}

/// Cubic segment ending at `end`, starting where the previous one ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSegment {
    pub cp1: Point,
    pub cp2: Point,
    pub end: Point,
}

/// Control points around `current` for a monotone-ish spline.
fn control_points(previous: Point, current: Point, next: Point, tension: f64) -> (Point, Point) {
    let d01 = ((current.x - previous.x).powi(2) + (current.y - previous.y).powi(2)).sqrt();
    let d12 = ((next.x - current.x).powi(2) + (next.y - current.y).powi(2)).sqrt();
    let total = d01 + d12;
    let (s01, s12) = if total > 0.0 { (d01 / total, d12 / total) } else { (0.0, 0.0) };
    let fa = tension * s01;
    let fb = tension * s12;
    let dx = next.x - previous.x;
    let dy = next.y - previous.y;
    (
        Point { x: current.x - fa * dx, y: current.y - fa * dy },
        Point { x: current.x + fb * dx, y: current.y + fb * dy },
    )
}

pub fn curve_segments(points: &[Point], tension: f64) -> Vec<CurveSegment> {
    let controls: Vec<(Point, Point)> = points
        .iter()
        .enumerate()
        .map(|(i, &current)| {
            let previous = if i == 0 { current } else { points[i - 1] };
            let next = points.get(i + 1).copied().unwrap_or(current);
            control_points(previous, current, next, tension)
        })
        .collect();

    points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| CurveSegment { cp1: controls[i].1, cp2: controls[i + 1].0, end: pair[1] })
        .collect()
}

/// Everything the renderer needs for one frame at a given canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub plot: Rect,
    pub scale: ValueScale,
    pub points: Vec<Point>,
    pub segments: Vec<CurveSegment>,
    pub x_labels: Vec<usize>,
}

impl ChartLayout {
    pub fn compute(width: f64, height: f64, series: &LineSeries, style: &ChartStyle) -> Self {
        let pad = style.padding;
        let plot = Rect {
            x: pad.left,
            y: pad.top,
            width: (width - pad.left - pad.right).max(1.0),
            height: (height - pad.top - pad.bottom).max(1.0),
        };

        let data_min = series.values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let scale = if data_min.is_finite() && data_max.is_finite() {
            ValueScale::nice(data_min, data_max, style.max_y_ticks)
        } else {
            ValueScale::nice(0.0, 1.0, style.max_y_ticks)
        };

        let count = series.values.len();
        let points: Vec<Point> = series
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| Point { x: x_position(&plot, i, count), y: scale.project(value, &plot) })
            .collect();

        let segments = curve_segments(&points, style.tension);
        let x_labels = x_label_indices(count, style.max_x_ticks);

        Self { plot, scale, points, segments, x_labels }
    }

    /// Index of the point closest to a pointer x, if the pointer is over the
    /// plot (plus half a step on each side).
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        let count = self.points.len();
        if count == 0 {
            return None;
        }
        if count == 1 {
            return (x >= self.plot.x && x <= self.plot.right()).then_some(0);
        }
        let step = self.plot.width / (count - 1) as f64;
        if x < self.plot.x - step / 2.0 || x > self.plot.right() + step / 2.0 {
            return None;
        }
        let raw = ((x - self.plot.x) / step).round();
        Some(raw.clamp(0.0, (count - 1) as f64) as usize)
    }
}

fn x_position(plot: &Rect, index: usize, count: usize) -> f64 {
    if count <= 1 {
        return plot.x + plot.width / 2.0;
    }
    plot.x + plot.width * index as f64 / (count - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn series(values: &[f64]) -> LineSeries {
        LineSeries {
            label: "TEST Price".into(),
            labels: (0..values.len()).map(|i| format!("2024-01-{:02}", i + 1)).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn history_parsing() {
        let history =
            PriceHistory::parse(Some(r#"[{"date":"2024-01-02","close":101.5},{"date":"2024-01-03","close":99.0}]"#))
                .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.labels(), vec!["2024-01-02", "2024-01-03"]);
        assert_eq!(history.closes(), vec![101.5, 99.0]);

        assert!(PriceHistory::parse(Some("[]")).unwrap().is_empty());
        assert!(PriceHistory::parse(Some("null")).unwrap().is_empty());
        assert!(PriceHistory::parse(None).unwrap().is_empty());
        assert!(matches!(PriceHistory::parse(Some("[{\"date\":1}")), Err(AppError::ParseError(_))));
    }

    #[test]
    fn empty_history_yields_no_series() {
        let err = PriceHistory::default().into_series("AAPL").unwrap_err();
        assert_eq!(err, AppError::RenderingError("No historical data available".into()));

        let series = PriceHistory::parse(Some(r#"[{"date":"d","close":1.0}]"#))
            .unwrap()
            .into_series("AAPL")
            .unwrap();
        assert_eq!(series.label, "AAPL Price");
    }

    #[test]
    fn y_ticks_are_round_prices() {
        let scale = ValueScale::nice(101.2, 108.7, 6);
        insta::assert_snapshot!(scale.tick_labels().join("\n"), @r"
        $100.00
        $102.00
        $104.00
        $106.00
        $108.00
        $110.00
        ");
    }

    #[test]
    fn flat_series_gets_a_visible_range() {
        let scale = ValueScale::nice(50.0, 50.0, 6);
        assert!(scale.min < 50.0 && scale.max > 50.0);
        let zero = ValueScale::nice(0.0, 0.0, 6);
        assert!(zero.min < 0.0 && zero.max > 0.0);
    }

    #[quickcheck]
    fn nice_scale_covers_data(low: i32, width: u16) -> bool {
        let min = low as f64 / 100.0;
        let max = min + width as f64 / 100.0;
        let scale = ValueScale::nice(min, max, 6);
        let tolerance = scale.step * 1e-9;
        scale.min <= min + tolerance && scale.max >= max - tolerance && scale.ticks().len() >= 2
    }

    #[test]
    fn positive_prices_do_not_start_at_zero() {
        let scale = ValueScale::nice(180.0, 195.0, 6);
        assert!(scale.min > 0.0);
    }

    #[test]
    fn x_labels_are_thinned_to_ten() {
        assert_eq!(x_label_indices(5, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(x_label_indices(25, 10), vec![0, 3, 6, 9, 12, 15, 18, 21, 24]);
        assert_eq!(x_label_indices(100, 10).len(), 10);
        assert!(x_label_indices(0, 10).is_empty());
    }

    #[quickcheck]
    fn never_more_than_max_x_labels(count: u16) -> bool {
        x_label_indices(count as usize, 10).len() <= 10
    }

    #[test]
    fn zero_tension_keeps_controls_on_points() {
        let points = vec![Point { x: 0.0, y: 0.0 }, Point { x: 10.0, y: 5.0 }, Point { x: 20.0, y: 0.0 }];
        let segments = curve_segments(&points, 0.0);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].cp1, points[0]);
        assert_eq!(segments[0].cp2, points[1]);
        assert_eq!(segments[1].cp1, points[1]);
        assert_eq!(segments[1].end, points[2]);
    }

    #[test]
    fn layout_projects_extremes_inside_plot() {
        let style = ChartStyle::default();
        let layout = ChartLayout::compute(800.0, 400.0, &series(&[101.2, 104.9, 103.3, 108.7]), &style);
        assert_eq!(layout.points.len(), 4);
        assert_eq!(layout.points[0].x, layout.plot.x);
        assert_eq!(layout.points[3].x, layout.plot.right());
        for p in &layout.points {
            assert!(p.y >= layout.plot.y && p.y <= layout.plot.bottom());
        }
        // higher close sits higher on screen
        assert!(layout.points[3].y < layout.points[0].y);
    }

    #[test]
    fn hover_hit_testing() {
        let style = ChartStyle::default();
        let layout = ChartLayout::compute(800.0, 400.0, &series(&[1.0, 2.0, 3.0]), &style);
        let mid = layout.points[1].x;
        assert_eq!(layout.nearest_index(mid + 3.0), Some(1));
        assert_eq!(layout.nearest_index(layout.plot.x), Some(0));
        assert_eq!(layout.nearest_index(layout.plot.right() + 1.0), Some(2));
        assert_eq!(layout.nearest_index(2000.0), None);
    }
}
