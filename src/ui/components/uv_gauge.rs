//! UV gauge drawn on a braille canvas

use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::Frame;

use crate::gauge::{
    point_on_circle, RiskBand, UvGauge, CENTER, END_ANGLE, MARKER_RADIUS, START_ANGLE, VIEWBOX,
};

/// Marker and label colour
pub const MARKER_COLOR: Color = Color::Rgb(0xFD, 0x86, 0x70);

const MARKER_SIZE: f64 = 8.0;

/// Degrees between ring dots
const RING_STEP: usize = 3;

/// Colour for a risk band on the ring
pub fn band_color(band: RiskBand) -> Color {
    match band {
        RiskBand::Low => Color::Green,
        RiskBand::Moderate => Color::Yellow,
        RiskBand::High => Color::Rgb(0xFF, 0x8C, 0x00),
        RiskBand::VeryHigh => Color::Red,
        RiskBand::Extreme => Color::Magenta,
    }
}

/// Gauge y grows downward; canvas y grows upward
fn to_canvas((x, y): (f64, f64)) -> (f64, f64) {
    (x, VIEWBOX - y)
}

/// Ring dots grouped by the risk band of the UV value they stand for
fn ring_segments(max_uv_index: f64) -> Vec<(Color, Vec<(f64, f64)>)> {
    let sweep = (END_ANGLE - START_ANGLE) as usize;
    let mut segments: Vec<(Color, Vec<(f64, f64)>)> = Vec::new();

    for offset in (0..=sweep).step_by(RING_STEP) {
        let uv = offset as f64 / sweep as f64 * max_uv_index;
        let color = band_color(RiskBand::for_index(uv));
        let point = to_canvas(point_on_circle(
            CENTER,
            MARKER_RADIUS,
            START_ANGLE + offset as f64,
        ));

        match segments.last_mut() {
            Some((last, points)) if *last == color => points.push(point),
            _ => segments.push((color, vec![point])),
        }
    }
    segments
}

/// Format the index the way the marker label shows it
pub fn index_label(uv_index: f64) -> String {
    if !uv_index.is_finite() {
        "-".to_string()
    } else if uv_index.fract() == 0.0 {
        format!("{}", uv_index as i64)
    } else {
        format!("{:.1}", uv_index)
    }
}

/// Render the gauge ring, the marker and its label
pub fn render_uv_gauge(frame: &mut Frame, area: Rect, gauge: &UvGauge, now: Instant) {
    let (mx, my) = to_canvas(gauge.marker_at(now));
    let (lx, ly) = to_canvas(gauge.label_at(now));
    let segments = ring_segments(gauge.max_uv_index());
    let label = index_label(gauge.uv_index());
    let band = gauge.risk_band();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, VIEWBOX])
        .y_bounds([0.0, VIEWBOX])
        .paint(move |ctx| {
            for (color, coords) in &segments {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
            ctx.layer();
            ctx.draw(&Circle {
                x: mx,
                y: my,
                radius: MARKER_SIZE,
                color: MARKER_COLOR,
            });
            ctx.print(
                lx,
                ly,
                Span::styled(
                    label.clone(),
                    Style::default()
                        .fg(MARKER_COLOR)
                        .add_modifier(Modifier::BOLD),
                ),
            );
            ctx.print(
                CENTER.0 - 20.0,
                VIEWBOX - CENTER.1 + 10.0,
                Span::styled(band.label(), Style::default().fg(band_color(band))),
            );
        });

    frame.render_widget(canvas, area);
}
