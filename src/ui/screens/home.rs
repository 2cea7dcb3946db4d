//! Home tab

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::HomeState;

pub fn render(frame: &mut Frame, area: Rect, home: &HomeState) {
    let block = Block::default()
        .title(" Home ")
        .borders(Borders::ALL)
        .border_style(Color::DarkGray);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let permission = match home.notifications_permitted {
        None => Line::from(Span::styled(
            "Requesting notification permission...",
            Style::default().fg(Color::Yellow),
        )),
        Some(false) => Line::from(Span::styled(
            "Permission for notifications is required!",
            Style::default().fg(Color::Red),
        )),
        Some(true) => Line::from(Span::styled(
            "● Notifications enabled",
            Style::default().fg(Color::Green),
        )),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Welcome to SunSafe",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        permission,
        Line::from(""),
        Line::from("Press the key below to test a notification:"),
        Line::from(Span::styled(
            "[t] Test Notification",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    if home.reminders_sent > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Reminders delivered: {}", home.reminders_sent),
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}
