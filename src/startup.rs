//! One-shot startup gate.
//!
//! Display assets are prepared once per process behind a spinner before the
//! TUI takes over the terminal. Nothing is drawn until they exist.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::weather::ConditionAsset;

/// Spinner frames using braille dots for smooth animation
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval for spinner animation (80ms per frame)
const SPINNER_INTERVAL: u64 = 80;

static ASSETS: OnceLock<Assets> = OnceLock::new();

/// Display assets shared by every screen
#[derive(Debug)]
pub struct Assets {
    art: HashMap<ConditionAsset, Vec<&'static str>>,
}

impl Assets {
    fn load() -> Self {
        let art = ConditionAsset::all()
            .iter()
            .map(|asset| (*asset, condition_art(*asset).to_vec()))
            .collect();
        Self { art }
    }

    /// Small piece of artwork for a condition
    pub fn condition_art(&self, asset: ConditionAsset) -> &[&'static str] {
        self.art.get(&asset).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn condition_art(asset: ConditionAsset) -> &'static [&'static str] {
    match asset {
        ConditionAsset::Clear => &[r"  \ | /  ", r" -- O -- ", r"  / | \  "],
        ConditionAsset::FewClouds => &[r" \ /     ", r"-- .--.  ", r"  (____) "],
        ConditionAsset::Cloud => &[r"   .--.  ", r".-(    ). ", r"(___.__)_)"],
    }
}

/// Prepare assets immediately, without the splash
pub fn init() -> &'static Assets {
    ASSETS.get_or_init(|| {
        debug!("Loading display assets");
        Assets::load()
    })
}

/// Assets if startup has finished
pub fn assets() -> Option<&'static Assets> {
    ASSETS.get()
}

pub fn is_ready() -> bool {
    ASSETS.get().is_some()
}

/// Run the startup sequence once: show a spinner, prepare assets, and keep
/// the splash up for at least `splash_ms`.
pub async fn prepare(config: &UiConfig) -> &'static Assets {
    if let Some(assets) = ASSETS.get() {
        return assets;
    }

    let started = Instant::now();
    let spinner = spinner("Preparing SunSafe...");

    let assets = init();

    let minimum = Duration::from_millis(config.splash_ms);
    if let Some(remaining) = minimum.checked_sub(started.elapsed()) {
        tokio::time::sleep(remaining).await;
    }

    spinner.finish_and_clear();
    info!("Startup finished in {:?}", started.elapsed());
    assets
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(SPINNER_FRAMES)
        .template("  {spinner:.yellow} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(SPINNER_INTERVAL));
    pb
}
