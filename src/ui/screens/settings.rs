//! Settings tab: read-only view of the active configuration

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect, settings: &[(String, String)]) {
    let header = Row::new(vec![Cell::from("Setting"), Cell::from("Value")]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = settings
        .iter()
        .map(|(key, value)| {
            Row::new(vec![
                Cell::from(key.clone()).style(Style::default().fg(Color::Cyan)),
                Cell::from(value.clone()),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(24), Constraint::Min(10)])
        .header(header)
        .block(
            Block::default()
                .title(" Settings ")
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );

    frame.render_widget(table, area);
}
