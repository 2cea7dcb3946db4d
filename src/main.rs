use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use sunsafe::app::App;
use sunsafe::config::{Config, LocationConfig, LocationSource};
use sunsafe::location::SystemLocation;
use sunsafe::notify::{ChannelNotifier, NotificationService};
use sunsafe::output;
use sunsafe::report::load_uv_report;
use sunsafe::weather::WeatherClient;

/// SunSafe - UV index and sunscreen reminders
#[derive(Parser, Debug)]
#[command(name = "sunsafe")]
#[command(about = "UV index gauge, 5-day forecast and sunscreen reminders in your terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging to file
    #[arg(short, long, global = true)]
    debug: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Latitude to use instead of looking up the position
    #[arg(long, value_name = "DEG", global = true, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude to use instead of looking up the position
    #[arg(long, value_name = "DEG", global = true, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Weather API key
    #[arg(long, value_name = "KEY", global = true)]
    api_key: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the TUI (default)
    #[command(alias = "tui")]
    Run,

    /// Print the current UV index and forecast once
    Weather,

    /// Schedule the test sunscreen reminder and wait for it
    Remind,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Version) = cli.command {
        print_version();
        return Ok(());
    }

    let (config, config_path) = load_config(&cli)?;
    init_logging(&cli, &config);
    info!("Starting SunSafe v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Weather) => print_weather(&config).await,
        Some(Commands::Remind) => remind(&config).await,
        _ => run_tui(config, config_path).await,
    }
}

fn print_version() {
    println!("sunsafe {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Platform: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
}

/// `--config FILE`, then the per-user file, then `./config.toml`, then defaults
fn load_config(cli: &Cli) -> Result<(Config, Option<PathBuf>)> {
    let (config, path) = match &cli.config {
        Some(path) => (Config::load(path)?, Some(path.clone())),
        None => {
            let path = Config::default_path()
                .filter(|p| p.exists())
                .or_else(|| Some(PathBuf::from("config.toml")).filter(|p| p.exists()));
            (Config::load_default()?, path)
        }
    };

    let config = apply_cli_overrides(config.with_env_overrides(), cli);
    config.validate().context("Invalid configuration")?;
    Ok((config, path))
}

fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        config.location = LocationConfig {
            source: LocationSource::Fixed,
            latitude: Some(lat),
            longitude: Some(lon),
            ..config.location
        };
    }
    if let Some(key) = &cli.api_key {
        config.weather.api_key = Some(key.clone());
    }
    config
}

/// Logs go to a file; the terminal belongs to the TUI
fn init_logging(cli: &Cli, config: &Config) {
    let log_level = if cli.debug {
        "debug"
    } else {
        cli.log_level.as_deref().unwrap_or(&config.logging.level)
    };

    let log_path = config
        .logging
        .file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("sunsafe.log"));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        tracing_subscriber::fmt()
            .with_env_filter(format!("sunsafe={}", log_level))
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter("off").init();
    }
}

async fn print_weather(config: &Config) -> Result<()> {
    let location = SystemLocation::from_config(&config.location)?;
    let weather = WeatherClient::new(&config.weather)?;

    let spinner = output::spinner("Looking up location and weather...");
    let result = load_uv_report(&location, &weather).await;
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            let uv = report.gauge_index(config.gauge.fixed_uv_index);
            let lines = output::report_lines(&report, uv);
            output::print_box(lines.as_slice());
            Ok(())
        }
        Err(e) => {
            output::print_error(&e.user_message());
            std::process::exit(1);
        }
    }
}

async fn remind(config: &Config) -> Result<()> {
    let (notifier, mut rx) = ChannelNotifier::channel();
    let service = NotificationService::new(config.notifications.enabled, Arc::new(notifier));

    if !service.request_permissions() {
        output::print_error("Permission for notifications is required!");
        std::process::exit(1);
    }

    let scheduled = service
        .schedule_test_notification()
        .context("Error scheduling test notification")?;

    let spinner = output::spinner(&format!(
        "Reminder scheduled, firing in {}s...",
        scheduled.delay.as_secs()
    ));
    let delivered = rx.recv().await;
    spinner.finish_and_clear();

    if let Some(notification) = delivered {
        if config.notifications.bell {
            print!("\x07");
        }
        output::print_success(&notification.title);
        println!("    {}", notification.body);
    }
    Ok(())
}

async fn run_tui(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    info!("Configuration loaded successfully");

    let mut app = App::new(config, config_path)?;
    app.run().await?;

    info!("SunSafe shutting down gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_coordinates_pin_location() {
        let cli = Cli::parse_from(["sunsafe", "weather", "--lat", "43.7", "--lon", "-79.42"]);
        assert!(matches!(cli.command, Some(Commands::Weather)));

        let config = apply_cli_overrides(Config::default(), &cli);
        assert_eq!(config.location.source, LocationSource::Fixed);
        assert_eq!(config.location.latitude, Some(43.7));
        assert_eq!(config.location.longitude, Some(-79.42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_coordinates_complete_fixed_config_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[location]\nsource = \"fixed\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let without = Cli::parse_from(["sunsafe", "--config", path.as_str()]);
        assert!(load_config(&without).is_err());

        let with = Cli::parse_from([
            "sunsafe", "--config", path.as_str(), "--lat", "43.7", "--lon", "-79.42",
        ]);
        let (config, source) = load_config(&with).unwrap();
        assert_eq!(config.location.latitude, Some(43.7));
        assert_eq!(source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_lat_requires_lon() {
        assert!(Cli::try_parse_from(["sunsafe", "--lat", "43.7"]).is_err());
    }

    #[test]
    fn test_api_key_flag() {
        let cli = Cli::parse_from(["sunsafe", "--api-key", "k"]);
        let config = apply_cli_overrides(Config::default(), &cli);
        assert_eq!(config.weather.api_key.as_deref(), Some("k"));
    }
}
