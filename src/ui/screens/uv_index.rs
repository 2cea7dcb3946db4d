//! UV Index tab: location header, gauge, current conditions, forecast

use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::core::ScreenState;
use crate::report::UvReport;
use crate::startup::Assets;
use crate::state::UvState;
use crate::ui::components::{render_forecast_strip, render_uv_gauge, FORECAST_STRIP_HEIGHT};
use crate::weather::ConditionAsset;

pub fn render(frame: &mut Frame, area: Rect, uv: &UvState, assets: &Assets, now: Instant) {
    let block = Block::default()
        .title(" UV Index ")
        .borders(Borders::ALL)
        .border_style(Color::DarkGray);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &uv.screen {
        ScreenState::Loading => render_message(frame, inner, "Loading...", Color::Yellow),
        ScreenState::PermissionDenied(message) => {
            render_message(frame, inner, message, Color::White)
        }
        ScreenState::Failed(message) => {
            let text = format!("{}\n\nPress [r] to try again", message);
            render_message(frame, inner, &text, Color::Red)
        }
        ScreenState::Ready(report) => render_report(frame, inner, uv, report, assets, now),
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(1),
        ])
        .split(area);

    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, rows[1]);
}

fn render_report(
    frame: &mut Frame,
    area: Rect,
    uv: &UvState,
    report: &UvReport,
    assets: &Assets,
    now: Instant,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                     // Location header
            Constraint::Min(6),                        // Gauge
            Constraint::Length(3),                     // Current conditions
            Constraint::Length(1),                     // Spacer
            Constraint::Length(FORECAST_STRIP_HEIGHT), // Forecast
        ])
        .split(area);

    render_header(frame, rows[0], report);

    if let Some(gauge) = &uv.gauge {
        render_uv_gauge(frame, square(rows[1]), gauge, now);
    }

    render_current(frame, rows[2], report, assets);
    render_forecast_strip(frame, rows[4], &report.snapshot.weekly_forecast());
}

fn render_header(frame: &mut Frame, area: Rect, report: &UvReport) {
    let location = Paragraph::new(Span::styled(
        report.label.to_string().to_uppercase(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(location, area);

    let units = Paragraph::new("°C ").alignment(Alignment::Right);
    frame.render_widget(units, area);
}

fn render_current(frame: &mut Frame, area: Rect, report: &UvReport, assets: &Assets) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let asset = ConditionAsset::for_description(report.snapshot.current_condition());
    let art: Vec<Line> = assets
        .condition_art(asset)
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::Yellow))))
        .collect();
    frame.render_widget(Paragraph::new(art).alignment(Alignment::Right), columns[0]);

    let text = vec![
        Line::from(Span::styled(
            format!("{}°", report.snapshot.current_temp()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(report.snapshot.current_description()),
    ];
    frame.render_widget(Paragraph::new(text), columns[1]);
}

/// Largest area that looks square, given cells twice as tall as wide
fn square(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
