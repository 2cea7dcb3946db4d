//! Five-day forecast strip

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::weather::{icon_glyph, ForecastDay};

/// Rows used by one forecast column
pub const FORECAST_STRIP_HEIGHT: u16 = 4;

/// Lines for one day column: weekday, icon, max temperature, UV
pub fn day_lines(day: &ForecastDay) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            day.weekday.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(icon_glyph(&day.icon)),
        Line::from(format!("{}°", day.max_temp)),
        Line::from(Span::styled(
            day.uvi.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ]
}

/// Render the forecast days side by side
pub fn render_forecast_strip(frame: &mut Frame, area: Rect, days: &[ForecastDay]) {
    if days.is_empty() {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            days.iter()
                .map(|_| Constraint::Ratio(1, days.len() as u32))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (day, column) in days.iter().zip(columns.iter()) {
        let paragraph = Paragraph::new(day_lines(day)).alignment(Alignment::Center);
        frame.render_widget(paragraph, *column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn day(weekday: &str, max_temp: i64) -> ForecastDay {
        ForecastDay {
            weekday: weekday.to_string(),
            icon: "01d".to_string(),
            max_temp,
            uvi: 6,
        }
    }

    #[test]
    fn test_day_lines() {
        let lines = day_lines(&day("MON", 22));
        assert_eq!(lines.len(), FORECAST_STRIP_HEIGHT as usize);
        assert_eq!(lines[2].to_string(), "22°");
        assert_eq!(lines[3].to_string(), "6");
    }

    #[test]
    fn test_render_all_days() {
        let backend = TestBackend::new(50, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let days = vec![day("MON", 20), day("TUE", 21), day("WED", -3)];

        terminal
            .draw(|f| render_forecast_strip(f, f.area(), &days))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("MON"));
        assert!(text.contains("WED"));
        assert!(text.contains("-3°"));
    }
}
