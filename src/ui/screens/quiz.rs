//! Sunscreen Quiz tab

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::quiz::{AnswerOutcome, QuizState};

const LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

pub fn render(frame: &mut Frame, area: Rect, quiz: &QuizState) {
    let block = Block::default()
        .title(" Sunscreen Quiz ")
        .borders(Borders::ALL)
        .border_style(Color::DarkGray);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let (position, total) = quiz.progress();
    let answered = if quiz.is_finished() { total } else { position - 1 };
    let ratio = if total == 0 {
        0.0
    } else {
        answered as f64 / total as f64
    };
    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(ratio)
        .label(format!("Score {} / {}", quiz.score(), total));
    frame.render_widget(progress, rows[0]);

    let width = rows[2].width.saturating_sub(2).max(10) as usize;
    let lines = match quiz.current() {
        Some(_) => question_lines(quiz, width),
        None => finished_lines(quiz),
    };
    frame.render_widget(Paragraph::new(lines), rows[2]);
}

fn question_lines(quiz: &QuizState, width: usize) -> Vec<Line<'static>> {
    let Some(question) = quiz.current() else {
        return vec![];
    };
    let (position, total) = quiz.progress();
    let answered = quiz.answered();

    let mut lines = vec![Line::from(Span::styled(
        format!("Question {}/{}", position, total),
        Style::default().fg(Color::Gray),
    ))];
    for row in textwrap::wrap(question.prompt, width) {
        lines.push(Line::from(Span::styled(
            row.into_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    for (i, choice) in question.choices.iter().enumerate() {
        let marker = if i == quiz.selected() { "▶" } else { " " };
        let style = match answered {
            Some(_) if i == question.answer => Style::default().fg(Color::Green),
            Some(AnswerOutcome::Incorrect { .. }) if i == quiz.selected() => {
                Style::default().fg(Color::Red)
            }
            None if i == quiz.selected() => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            _ => Style::default(),
        };
        lines.push(Line::from(Span::styled(
            format!("{} {}) {}", marker, LETTERS[i], choice),
            style,
        )));
    }

    if let Some(outcome) = answered {
        lines.push(Line::from(""));
        let verdict = match outcome {
            AnswerOutcome::Correct => Span::styled("Correct!", Style::default().fg(Color::Green)),
            AnswerOutcome::Incorrect { correct } => Span::styled(
                format!("Not quite. The answer is {}.", LETTERS[correct]),
                Style::default().fg(Color::Red),
            ),
        };
        lines.push(Line::from(verdict));
        for row in textwrap::wrap(question.explanation, width) {
            lines.push(Line::from(row.into_owned()));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter to continue",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

fn finished_lines(quiz: &QuizState) -> Vec<Line<'static>> {
    let (_, total) = quiz.progress();
    vec![
        Line::from(Span::styled(
            "Quiz complete!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("You scored {} out of {}.", quiz.score(), total)),
        Line::from(""),
        Line::from(Span::styled(
            "Press [r] to play again",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_question_lines_list_choices() {
        let quiz = QuizState::new();
        let rendered = text(&question_lines(&quiz, 60));
        assert!(rendered.contains("Question 1/"));
        assert!(rendered.contains("a) "));
        assert!(!rendered.contains("Press Enter"));
    }

    #[test]
    fn test_answered_question_shows_explanation() {
        let mut quiz = QuizState::new();
        let answer = quiz.current().unwrap().answer;
        quiz.choose(answer);
        let rendered = text(&question_lines(&quiz, 60));
        assert!(rendered.contains("Correct!"));
        assert!(rendered.contains("Press Enter"));
    }

    #[test]
    fn test_finished_lines_show_score() {
        let quiz = QuizState::new();
        let rendered = text(&finished_lines(&quiz));
        assert!(rendered.contains("You scored 0 out of"));
    }
}
