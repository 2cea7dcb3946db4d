//! Main application coordinator

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::core::{NotificationLevel, UiAction, VisitId};
use crate::location::{LocationProvider, SystemLocation};
use crate::notify::{ChannelNotifier, LocalNotification, NotificationService, ScheduledNotification};
use crate::report::{load_uv_report, UvReport};
use crate::startup;
use crate::state::AppState;
use crate::ui::UiApp;
use crate::weather::{WeatherClient, WeatherSource};

type UvResult = (VisitId, crate::core::Result<UvReport>);

/// Main application struct
pub struct App {
    config: Config,
    config_path: Option<PathBuf>,
    location: Arc<dyn LocationProvider>,
    weather: Arc<dyn WeatherSource>,
    notifications: NotificationService,
    notification_rx: mpsc::UnboundedReceiver<LocalNotification>,
    uv_tx: mpsc::UnboundedSender<UvResult>,
    uv_rx: mpsc::UnboundedReceiver<UvResult>,
    scheduled: Vec<ScheduledNotification>,
}

impl App {
    /// Create a new application instance with the real services
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Result<Self> {
        info!("Creating new App instance");

        let location = SystemLocation::from_config(&config.location)
            .context("Failed to set up location lookup")?;
        let weather = WeatherClient::new(&config.weather).context("Failed to set up weather client")?;

        Ok(Self::with_services(
            config,
            config_path,
            Arc::new(location),
            Arc::new(weather),
        ))
    }

    /// Create an application around explicit providers
    pub fn with_services(
        config: Config,
        config_path: Option<PathBuf>,
        location: Arc<dyn LocationProvider>,
        weather: Arc<dyn WeatherSource>,
    ) -> Self {
        let (notifier, notification_rx) = ChannelNotifier::channel();
        let notifications =
            NotificationService::new(config.notifications.enabled, Arc::new(notifier));
        let (uv_tx, uv_rx) = mpsc::unbounded_channel();

        Self {
            config,
            config_path,
            location,
            weather,
            notifications,
            notification_rx,
            uv_tx,
            uv_rx,
            scheduled: vec![],
        }
    }

    /// Initial state derived from configuration
    pub fn initial_state(&self) -> AppState {
        let mut state = AppState::new();
        state.uv.max_uv_index = self.config.gauge.max_uv_index;
        state.uv.pinned_uv_index = self.config.gauge.fixed_uv_index;
        state.uv.animation = Duration::from_millis(self.config.gauge.animation_ms);
        state.settings = self.config.summary(self.config_path.as_deref());
        state.show_header = self.config.ui.show_header;
        state.show_footer = self.config.ui.show_footer;
        state
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting main application loop");

        startup::prepare(&self.config.ui).await;

        let mut terminal = setup_terminal()?;
        let mut ui_app = UiApp::new(self.initial_state());

        let result = self.run_event_loop(&mut terminal, &mut ui_app).await;

        restore_terminal(&mut terminal)?;

        for scheduled in self.scheduled.drain(..) {
            scheduled.cancel();
        }

        result
    }

    /// Run the event loop
    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        ui_app: &mut UiApp,
    ) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_millis(self.config.general.tick_rate_ms);

        loop {
            self.process_actions(ui_app);

            terminal.draw(|f| ui_app.draw(f, Instant::now()))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if crossterm::event::poll(timeout)? {
                let event = crossterm::event::read()?;
                ui_app.handle_event(event);
            }

            if ui_app.should_quit {
                info!("Quit signal received, exiting event loop");
                break;
            }

            if last_tick.elapsed() >= tick_rate {
                self.on_tick(ui_app);
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Handle periodic tasks
    fn on_tick(&mut self, ui_app: &mut UiApp) {
        self.drain_channels(ui_app, Instant::now());
        ui_app
            .state
            .clear_old_notifications(self.config.general.toast_seconds);
        self.scheduled.retain(|s| !s.is_finished());
    }

    /// Carry out everything the UI asked for since the last call
    pub fn process_actions(&mut self, ui_app: &mut UiApp) {
        for action in ui_app.take_actions() {
            debug!("Processing action: {:?}", action);
            match action {
                UiAction::LoadUvReport(visit) => self.spawn_uv_report(visit),
                UiAction::RequestNotificationPermission => {
                    let granted = self.notifications.request_permissions();
                    ui_app.state.set_notification_permission(granted);
                }
                UiAction::ScheduleTestNotification => {
                    match self.notifications.schedule_test_notification() {
                        Ok(scheduled) => {
                            debug!("Scheduled notification {}", scheduled.id);
                            self.scheduled.push(scheduled);
                        }
                        Err(e) => ui_app
                            .state
                            .show_alert("Error", format!("Error scheduling test notification: {}", e)),
                    }
                }
            }
        }
    }

    fn spawn_uv_report(&self, visit: VisitId) {
        let location = Arc::clone(&self.location);
        let weather = Arc::clone(&self.weather);
        let tx = self.uv_tx.clone();

        tokio::spawn(async move {
            let result = load_uv_report(location.as_ref(), weather.as_ref()).await;
            if tx.send((visit, result)).is_err() {
                debug!("UV result for visit {} arrived after shutdown", visit);
            }
        });
    }

    /// Apply finished lookups and delivered notifications
    pub fn drain_channels(&mut self, ui_app: &mut UiApp, now: Instant) {
        while let Ok((visit, result)) = self.uv_rx.try_recv() {
            if let Err(e) = &result {
                warn!("UV report for visit {} failed: {}", visit, e);
            }
            ui_app.state.apply_uv_result(visit, result, now);
        }

        while let Ok(notification) = self.notification_rx.try_recv() {
            info!("Notification delivered: {}", notification.title);
            ui_app.state.home.reminders_sent += 1;
            ui_app.state.add_notification(
                format!("{}: {}", notification.title, notification.body),
                NotificationLevel::Warning,
            );
            if self.config.notifications.bell {
                ring_bell();
            }
        }
    }
}

fn ring_bell() {
    let mut stdout = io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
        error!("Could not ring terminal bell: {}", e);
    }
}

/// Setup the terminal for TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    info!("Setting up terminal");

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    info!("Terminal setup complete");
    Ok(terminal)
}

/// Restore terminal to original state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    info!("Restoring terminal");

    terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Terminal restored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coordinates, LocationLabel, ScreenState, Tab};
    use crate::location::provider::MockLocationProvider;
    use crate::location::PermissionStatus;
    use crate::weather::client::MockWeatherSource;
    use crate::weather::{CurrentConditions, WeatherSnapshot};
    use crossterm::event::{Event, KeyCode, KeyEvent};

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                temp: 18.0,
                weather: vec![],
                uvi: Some(6.6),
            },
            daily: vec![],
            timezone_offset: 0,
        }
    }

    fn app(config: Config) -> App {
        let mut location = MockLocationProvider::new();
        location
            .expect_request_permission()
            .returning(|| PermissionStatus::Granted);
        location
            .expect_current_position()
            .returning(|| Ok(Coordinates::new(43.7, -79.42)));
        location
            .expect_reverse_geocode()
            .returning(|_| Ok(LocationLabel::new("Toronto", "Ontario")));

        let mut weather = MockWeatherSource::new();
        weather.expect_fetch().returning(|_| Ok(snapshot()));

        App::with_services(config, None, Arc::new(location), Arc::new(weather))
    }

    fn press(ui: &mut UiApp, code: KeyCode) {
        ui.handle_event(Event::Key(KeyEvent::from(code)));
    }

    #[tokio::test]
    async fn test_initial_state_from_config() {
        let mut config = Config::default();
        config.gauge.max_uv_index = 12.0;
        config.gauge.fixed_uv_index = Some(7.0);
        let app = app(config);

        let state = app.initial_state();
        assert_eq!(state.uv.max_uv_index, 12.0);
        assert_eq!(state.uv.pinned_uv_index, Some(7.0));
        assert!(!state.settings.is_empty());
    }

    #[tokio::test]
    async fn test_permission_request_on_home() {
        let mut app = app(Config::default());
        let mut ui = UiApp::new(app.initial_state());

        app.process_actions(&mut ui);
        assert_eq!(ui.state.home.notifications_permitted, Some(true));
    }

    #[tokio::test]
    async fn test_uv_visit_loads_report() {
        let mut app = app(Config::default());
        let mut ui = UiApp::new(app.initial_state());
        app.process_actions(&mut ui);

        press(&mut ui, KeyCode::Char('2'));
        assert_eq!(ui.state.current_tab, Tab::UvIndex);
        app.process_actions(&mut ui);

        let (visit, result) = app.uv_rx.recv().await.unwrap();
        ui.state.apply_uv_result(visit, result, Instant::now());

        match &ui.state.uv.screen {
            ScreenState::Ready(report) => assert_eq!(report.label.city, "Toronto"),
            other => panic!("unexpected screen: {:?}", other),
        }
        assert_eq!(ui.state.uv.gauge.as_ref().unwrap().uv_index(), 7.0);
    }

    #[tokio::test]
    async fn test_denied_notifications_raise_alert() {
        let mut config = Config::default();
        config.notifications.enabled = false;
        let mut app = app(config);
        let mut ui = UiApp::new(app.initial_state());
        app.process_actions(&mut ui);
        assert_eq!(ui.state.home.notifications_permitted, Some(false));

        press(&mut ui, KeyCode::Char('t'));
        app.process_actions(&mut ui);

        let alert = ui.state.alert.as_ref().unwrap();
        assert_eq!(
            alert.message,
            "Error scheduling test notification: Permission for notifications is required!"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivered_notification_becomes_toast() {
        let mut app = app(Config::default());
        let mut ui = UiApp::new(app.initial_state());
        app.process_actions(&mut ui);

        press(&mut ui, KeyCode::Char('t'));
        app.process_actions(&mut ui);
        assert_eq!(app.scheduled.len(), 1);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        app.drain_channels(&mut ui, Instant::now());

        assert_eq!(ui.state.home.reminders_sent, 1);
        assert!(ui.state.notifications[0]
            .message
            .starts_with("Sunscreen Reminder"));
    }
}
