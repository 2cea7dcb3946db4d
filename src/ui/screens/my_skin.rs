//! My Skin tab

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::skin::{SkinSelection, SkinType};

pub fn render(frame: &mut Frame, area: Rect, selection: &SkinSelection) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let items: Vec<ListItem> = SkinType::all()
        .iter()
        .map(|skin| {
            let chosen = selection.chosen == Some(*skin);
            let marker = if chosen { "● " } else { "  " };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::styled(
                        skin.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", skin.description()),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Skin Type ")
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(selection.cursor));
    frame.render_stateful_widget(list, columns[0], &mut state);

    let advice = Paragraph::new(advice_lines(selection.chosen))
        .block(
            Block::default()
                .title(" Advice ")
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(advice, columns[1]);
}

fn advice_lines(chosen: Option<SkinType>) -> Vec<Line<'static>> {
    let Some(skin) = chosen else {
        return vec![Line::from(Span::styled(
            "Select your skin type with ↑/↓ and press Enter.",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    vec![
        Line::from(Span::styled(
            skin.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Use at least SPF {}.", skin.recommended_spf())),
        Line::from(format!(
            "Cover up when the UV index reaches {} or more.",
            skin.protect_from_uv()
        )),
        Line::from("Reapply every two hours and after swimming."),
    ]
}
