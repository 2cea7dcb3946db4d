//! UI Application logic

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::core::{NotificationLevel, Tab, UiAction};
use crate::startup;
use crate::state::AppState;
use crate::ui::screens;

/// UI Application controller
pub struct UiApp {
    pub state: AppState,
    pub should_quit: bool,
    actions: Vec<UiAction>,
}

impl UiApp {
    /// Create a new UI app and enter its initial tab
    pub fn new(state: AppState) -> Self {
        let mut app = Self {
            state,
            should_quit: false,
            actions: vec![],
        };
        app.enter_tab(app.state.current_tab);
        app
    }

    /// Drain the side effects requested since the last call
    pub fn take_actions(&mut self) -> Vec<UiAction> {
        std::mem::take(&mut self.actions)
    }

    /// Handle a terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
                self.state.terminal_size = (width, height);
            }
            _ => {}
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        // Only handle key press events (not release or repeat)
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            info!("Ctrl+C pressed");
            self.should_quit = true;
            return;
        }

        // An alert swallows everything until acknowledged
        if self.state.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_alert();
            }
            return;
        }

        if self.state.show_help && key.code != KeyCode::Char('?') {
            self.state.show_help = false;
            return;
        }

        if self.handle_tab_key(key) {
            return;
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                info!("Quit key pressed");
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(tab) = Tab::from_shortcut(c) {
                    self.switch_tab(tab);
                }
            }
            KeyCode::Right => self.next_tab(),
            KeyCode::Left => self.previous_tab(),
            KeyCode::Char('?') => {
                self.state.show_help = !self.state.show_help;
            }
            _ => {
                debug!("Unhandled key: {:?}", key);
            }
        }
    }

    /// Keys owned by the current tab. Returns `true` when consumed.
    fn handle_tab_key(&mut self, key: KeyEvent) -> bool {
        if !key.modifiers.is_empty() && key.modifiers != KeyModifiers::SHIFT {
            return false;
        }

        match (self.state.current_tab, key.code) {
            (Tab::Home, KeyCode::Char('t')) => {
                info!("Test notification requested");
                self.actions.push(UiAction::ScheduleTestNotification);
            }
            (Tab::UvIndex, KeyCode::Char('r')) => self.load_uv_report(),

            (Tab::Quiz, KeyCode::Char(c @ 'a'..='d')) => {
                let choice = c as usize - 'a' as usize;
                if let Some(outcome) = self.state.quiz.choose(choice) {
                    debug!("Quiz answer {}: {:?}", c, outcome);
                }
            }
            (Tab::Quiz, KeyCode::Down) => self.state.quiz.select_next(),
            (Tab::Quiz, KeyCode::Up) => self.state.quiz.select_previous(),
            (Tab::Quiz, KeyCode::Enter) => {
                if self.state.quiz.answered().is_some() {
                    self.state.quiz.advance();
                } else {
                    self.state.quiz.submit();
                }
            }
            (Tab::Quiz, KeyCode::Char('r')) => self.state.quiz.restart(),

            (Tab::MySkin, KeyCode::Down) => self.state.skin.next(),
            (Tab::MySkin, KeyCode::Up) => self.state.skin.previous(),
            (Tab::MySkin, KeyCode::Enter) => {
                let skin = self.state.skin.choose();
                info!("Skin type chosen: {}", skin);
                self.state.add_notification(
                    format!("{} selected, use SPF {}+", skin, skin.recommended_spf()),
                    NotificationLevel::Success,
                );
            }
            _ => return false,
        }
        true
    }

    /// Switch to a specific tab
    fn switch_tab(&mut self, tab: Tab) {
        if self.state.current_tab != tab {
            info!("Switching to tab: {:?}", tab);
            self.state.previous_tab = Some(self.state.current_tab);
            self.state.current_tab = tab;
            self.enter_tab(tab);
        }
    }

    /// Work that starts whenever a tab gains focus
    fn enter_tab(&mut self, tab: Tab) {
        match tab {
            Tab::Home if !self.state.home.permission_requested => {
                self.state.home.permission_requested = true;
                self.actions.push(UiAction::RequestNotificationPermission);
            }
            Tab::UvIndex => self.load_uv_report(),
            _ => {}
        }
    }

    fn load_uv_report(&mut self) {
        let visit = self.state.begin_uv_visit();
        self.actions.push(UiAction::LoadUvReport(visit));
    }

    /// Move to next tab (circular)
    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs
            .iter()
            .position(|t| *t == self.state.current_tab)
            .unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.switch_tab(tabs[next_idx]);
    }

    /// Move to previous tab (circular)
    fn previous_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs
            .iter()
            .position(|t| *t == self.state.current_tab)
            .unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.switch_tab(tabs[prev_idx]);
    }

    /// Render the UI. Nothing is drawn until startup assets are ready.
    pub fn draw(&self, frame: &mut Frame, now: Instant) {
        if !startup::is_ready() {
            return;
        }
        let area = frame.area();

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.state.show_header as u16), // Header
                Constraint::Min(3),                                // Main content
                Constraint::Length(self.state.show_footer as u16), // Footer
            ])
            .split(area);

        if self.state.show_header {
            self.render_header(frame, main_layout[0]);
        }
        self.render_main_content(frame, main_layout[1], now);
        if self.state.show_footer {
            self.render_footer(frame, main_layout[2]);
        }

        self.render_toasts(frame, main_layout[1]);

        if self.state.show_help {
            self.render_help_overlay(frame, area);
        }
        if self.state.alert.is_some() {
            self.render_alert(frame, area);
        }
    }

    /// Render the header
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let (bell, bell_color) = match self.state.home.notifications_permitted {
            Some(true) => ("●", Color::Green),
            Some(false) => ("○", Color::Red),
            None => ("○", Color::DarkGray),
        };

        let header_spans = vec![
            Span::styled(
                " ☀ SunSafe ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("v{} ", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("| "),
            Span::styled(
                self.state.current_tab.name(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(bell, Style::default().fg(bell_color)),
            Span::styled(" Reminders ", Style::default().fg(bell_color)),
        ];

        frame.render_widget(
            Paragraph::new(Line::from(header_spans)).style(Style::default().bg(Color::Black)),
            area,
        );
    }

    /// Render sidebar + main panel
    fn render_main_content(&self, frame: &mut Frame, area: Rect, now: Instant) {
        let sidebar_width = (area.width / 5).clamp(14, 22);

        let content_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(area);

        self.render_sidebar(frame, content_layout[0]);
        self.render_main_panel(frame, content_layout[1], now);
    }

    /// Render the sidebar with tabs
    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = Tab::all()
            .iter()
            .map(|tab| {
                let is_selected = self.state.current_tab == *tab;
                let style = if is_selected {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let marker = if is_selected { "▶" } else { " " };
                Line::from(Span::styled(
                    format!("{} {}:{}", marker, tab.shortcut(), tab.name()),
                    style,
                ))
            })
            .collect();

        let sidebar = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Color::DarkGray),
        );
        frame.render_widget(sidebar, area);
    }

    /// Render the main panel based on current tab
    fn render_main_panel(&self, frame: &mut Frame, area: Rect, now: Instant) {
        match self.state.current_tab {
            Tab::Home => screens::home::render(frame, area, &self.state.home),
            Tab::UvIndex => {
                if let Some(assets) = startup::assets() {
                    screens::uv_index::render(frame, area, &self.state.uv, assets, now);
                }
            }
            Tab::Quiz => screens::quiz::render(frame, area, &self.state.quiz),
            Tab::MySkin => screens::my_skin::render(frame, area, &self.state.skin),
            Tab::Settings => screens::settings::render(frame, area, &self.state.settings),
        }
    }

    /// Render the footer
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let help_text = match self.state.current_tab {
            Tab::Home => " [t]:Test Notification | [←/→ or 1-5]:Tabs | [?]:Help | [q]:Quit ",
            Tab::UvIndex => " [r]:Reload | [←/→ or 1-5]:Tabs | [?]:Help | [q]:Quit ",
            Tab::Quiz => " [a-d]:Answer | [↑/↓ Enter]:Select | [r]:Restart | [q]:Quit ",
            Tab::MySkin => " [↑/↓]:Select | [Enter]:Choose | [←/→ or 1-5]:Tabs | [q]:Quit ",
            Tab::Settings => " [←/→ or 1-5]:Switch Tabs | [?]:Help | [q]:Quit ",
        };

        let footer =
            Paragraph::new(help_text).style(Style::default().fg(Color::Gray).bg(Color::Black));
        frame.render_widget(footer, area);
    }

    /// Render toasts stacked in the top-right corner of the content area
    fn render_toasts(&self, frame: &mut Frame, area: Rect) {
        for (row, toast) in self.state.notifications.iter().rev().take(3).enumerate() {
            let color = match toast.level {
                NotificationLevel::Info => Color::Cyan,
                NotificationLevel::Success => Color::Green,
                NotificationLevel::Warning => Color::Yellow,
            };
            let text = format!(" {} ", toast.message);
            let width = (text.width() as u16 + 2).min(area.width);
            let y = area.y + (row as u16) * 3;
            if y + 3 > area.y + area.height {
                break;
            }
            let toast_area = Rect {
                x: area.x + area.width - width,
                y,
                width,
                height: 3,
            };
            frame.render_widget(Clear, toast_area);
            frame.render_widget(
                Paragraph::new(text).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                ),
                toast_area,
            );
        }
    }

    /// Render the blocking alert
    fn render_alert(&self, frame: &mut Frame, area: Rect) {
        let Some(alert) = &self.state.alert else {
            return;
        };
        let popup_area = Self::centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let body = vec![
            Line::from(alert.message.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] OK",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let popup = Paragraph::new(body)
            .block(
                Block::default()
                    .title(format!(" {} ", alert.title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, popup_area);
    }

    /// Render help overlay
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let popup_area = Self::centered_rect(60, 70, area);
        frame.render_widget(Clear, popup_area);

        let help_text = r#"Keyboard Shortcuts

Navigation:
  ← / →             Switch between tabs (circular)
  1 - 5             Jump directly to a tab

Home:
  t                 Send a test sunscreen reminder

UV Index:
  r                 Reload location and weather

Sunscreen Quiz:
  a - d             Answer
  ↑ / ↓, Enter      Select and answer, then continue
  r                 Restart

My Skin:
  ↑ / ↓, Enter      Choose your skin type

Global:
  q                 Quit application
  Ctrl+C            Force quit
  ?                 Toggle this help screen
"#;

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help (Press any key to close) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });

        frame.render_widget(help, popup_area);
    }

    /// Calculate centered rectangle for popups
    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coordinates, LocationError, LocationLabel, ScreenState};
    use crate::report::UvReport;
    use crate::weather::{CurrentConditions, WeatherSnapshot};
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(app: &UiApp) -> String {
        startup::init();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.draw(f, Instant::now())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn report() -> UvReport {
        UvReport {
            label: LocationLabel::new("Toronto", "Ontario"),
            coordinates: Coordinates::new(43.7, -79.42),
            snapshot: WeatherSnapshot {
                current: CurrentConditions {
                    temp: 21.6,
                    weather: vec![],
                    uvi: Some(7.0),
                },
                daily: vec![],
                timezone_offset: 0,
            },
        }
    }

    #[test]
    fn test_ui_app_creation_requests_permission() {
        let mut app = UiApp::new(AppState::default());
        assert!(!app.should_quit);
        assert_eq!(
            app.take_actions(),
            vec![UiAction::RequestNotificationPermission]
        );
        assert!(app.take_actions().is_empty());
    }

    #[test]
    fn test_quit_key() {
        let mut app = UiApp::new(AppState::default());
        app.handle_key_event(KeyEvent::from(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c() {
        let mut app = UiApp::new(AppState::default());
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_switching_numbers() {
        let mut app = UiApp::new(AppState::default());
        assert_eq!(app.state.current_tab, Tab::Home);

        app.handle_key_event(KeyEvent::from(KeyCode::Char('3')));
        assert_eq!(app.state.current_tab, Tab::Quiz);

        app.handle_key_event(KeyEvent::from(KeyCode::Char('5')));
        assert_eq!(app.state.current_tab, Tab::Settings);
    }

    #[test]
    fn test_tab_switching_arrows() {
        let mut app = UiApp::new(AppState::default());

        app.handle_key_event(KeyEvent::from(KeyCode::Right));
        assert_eq!(app.state.current_tab, Tab::UvIndex);

        app.handle_key_event(KeyEvent::from(KeyCode::Left));
        assert_eq!(app.state.current_tab, Tab::Home);

        // Wraps to the last tab
        app.handle_key_event(KeyEvent::from(KeyCode::Left));
        assert_eq!(app.state.current_tab, Tab::Settings);
    }

    #[test]
    fn test_each_uv_visit_starts_a_load() {
        let mut app = UiApp::new(AppState::default());
        app.take_actions();

        app.handle_key_event(KeyEvent::from(KeyCode::Char('2')));
        assert_eq!(app.take_actions(), vec![UiAction::LoadUvReport(1)]);
        assert!(app.state.uv.screen.is_loading());

        app.handle_key_event(KeyEvent::from(KeyCode::Char('1')));
        app.handle_key_event(KeyEvent::from(KeyCode::Char('2')));
        assert_eq!(app.take_actions(), vec![UiAction::LoadUvReport(2)]);

        app.handle_key_event(KeyEvent::from(KeyCode::Char('r')));
        assert_eq!(app.take_actions(), vec![UiAction::LoadUvReport(3)]);
    }

    #[test]
    fn test_home_permission_requested_once() {
        let mut app = UiApp::new(AppState::default());
        app.take_actions();
        // Still unanswered: leaving and returning must not ask again
        assert_eq!(app.state.home.notifications_permitted, None);

        app.handle_key_event(KeyEvent::from(KeyCode::Char('3')));
        app.handle_key_event(KeyEvent::from(KeyCode::Char('1')));
        assert!(app.take_actions().is_empty());
    }

    #[test]
    fn test_test_notification_key() {
        let mut app = UiApp::new(AppState::default());
        app.take_actions();

        app.handle_key_event(KeyEvent::from(KeyCode::Char('t')));
        assert_eq!(
            app.take_actions(),
            vec![UiAction::ScheduleTestNotification]
        );
    }

    #[test]
    fn test_alert_blocks_until_dismissed() {
        let mut app = UiApp::new(AppState::default());
        app.state.show_alert("Error", "boom");

        app.handle_key_event(KeyEvent::from(KeyCode::Char('3')));
        assert_eq!(app.state.current_tab, Tab::Home);
        assert!(app.state.alert.is_some());

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert!(app.state.alert.is_none());
    }

    #[test]
    fn test_quiz_keys() {
        let mut app = UiApp::new(AppState::default());
        app.handle_key_event(KeyEvent::from(KeyCode::Char('3')));

        let answer = app.state.quiz.current().unwrap().answer;
        let letter = (b'a' + answer as u8) as char;
        app.handle_key_event(KeyEvent::from(KeyCode::Char(letter)));
        assert_eq!(app.state.quiz.score(), 1);

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.state.quiz.progress().0, 2);

        app.handle_key_event(KeyEvent::from(KeyCode::Char('r')));
        assert_eq!(app.state.quiz.score(), 0);
        assert_eq!(app.state.quiz.progress().0, 1);
    }

    #[test]
    fn test_skin_selection() {
        let mut app = UiApp::new(AppState::default());
        app.handle_key_event(KeyEvent::from(KeyCode::Char('4')));
        app.handle_key_event(KeyEvent::from(KeyCode::Down));
        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        assert_eq!(app.state.skin.chosen, Some(crate::skin::SkinType::II));
        assert_eq!(app.state.notifications.len(), 1);
        assert_eq!(app.state.notifications[0].level, NotificationLevel::Success);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = UiApp::new(AppState::default());
        assert!(!app.state.show_help);

        app.handle_key_event(KeyEvent::from(KeyCode::Char('?')));
        assert!(app.state.show_help);

        app.handle_key_event(KeyEvent::from(KeyCode::Char('?')));
        assert!(!app.state.show_help);
    }

    #[test]
    fn test_rendering_home() {
        let mut app = UiApp::new(AppState::default());
        app.state.set_notification_permission(false);
        let text = screen_text(&app);
        assert!(text.contains("SunSafe"));
        assert!(text.contains("Permission for notifications is required!"));
    }

    #[test]
    fn test_hidden_header() {
        let mut state = AppState::default();
        state.show_header = false;
        let app = UiApp::new(state);
        assert!(!screen_text(&app).contains("SunSafe v"));
    }

    #[test]
    fn test_rendering_uv_states() {
        let mut app = UiApp::new(AppState::default());
        app.handle_key_event(KeyEvent::from(KeyCode::Char('2')));
        assert!(screen_text(&app).contains("Loading..."));

        let visit = app.state.uv.visit;
        app.state.apply_uv_result(
            visit,
            Err(LocationError::PermissionDenied.into()),
            Instant::now(),
        );
        assert!(screen_text(&app).contains("Permission to access location was denied."));

        app.handle_key_event(KeyEvent::from(KeyCode::Char('r')));
        let visit = app.state.uv.visit;
        app.state.apply_uv_result(visit, Ok(report()), Instant::now());
        assert!(matches!(app.state.uv.screen, ScreenState::Ready(_)));
        let text = screen_text(&app);
        assert!(text.contains("TORONTO, ONTARIO"));
        assert!(text.contains("22°"));
    }
}
