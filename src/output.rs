//! Styled stdout output for the one-shot commands.
//!
//! These run without the TUI, so they print directly.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::gauge::RiskBand;
use crate::report::UvReport;
use crate::weather::icon_glyph;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner shown while a lookup is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(s) = ProgressStyle::default_spinner()
        .tick_strings(SPINNER_FRAMES)
        .template("  {spinner:.yellow} {msg}")
    {
        pb.set_style(s);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Lines of the one-shot weather report, before boxing
pub fn report_lines(report: &UvReport, uv_index: f64) -> Vec<String> {
    let band = RiskBand::for_index(uv_index);
    let mut lines = vec![
        style(report.label.to_string().to_uppercase()).bold().to_string(),
        format!(
            "{}°C  {}",
            report.snapshot.current_temp(),
            report.snapshot.current_description()
        ),
        format!("UV index {} ({})", uv_index, band_style(band)),
        String::new(),
    ];

    for day in report.snapshot.weekly_forecast() {
        lines.push(format!(
            "{:<4} {}  {:>4}°  UV {}",
            day.weekday,
            icon_glyph(&day.icon),
            day.max_temp,
            day.uvi
        ));
    }
    lines
}

fn band_style(band: RiskBand) -> console::StyledObject<&'static str> {
    let label = style(band.label());
    match band {
        RiskBand::Low => label.green(),
        RiskBand::Moderate => label.yellow(),
        RiskBand::High => label.color256(208),
        RiskBand::VeryHigh => label.red(),
        RiskBand::Extreme => label.magenta(),
    }
}

/// Print a bordered message box
pub fn print_box<S: AsRef<str>>(lines: &[S]) {
    let max_width = lines
        .iter()
        .map(|l| console::measure_text_width(l.as_ref()))
        .max()
        .unwrap_or(0);
    let box_width = max_width + 4;
    let horizontal = "─".repeat(box_width);

    println!();
    println!("  ┌{}┐", horizontal);
    for line in lines {
        let line = line.as_ref();
        let right_pad = box_width - console::measure_text_width(line) - 2;
        println!("  │  {}{}│", line, " ".repeat(right_pad));
    }
    println!("  └{}┘", horizontal);
    println!();
}

pub fn print_success(message: &str) {
    println!("  {} {}", style("✓").green(), style(message).green());
}

pub fn print_error(message: &str) {
    eprintln!("  {} {}", style("✗").red(), style(message).red().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coordinates, LocationLabel};
    use crate::weather::{CurrentConditions, WeatherSnapshot};

    #[test]
    fn test_report_lines() {
        console::set_colors_enabled(false);
        let report = UvReport {
            label: LocationLabel::new("Toronto", "Ontario"),
            coordinates: Coordinates::new(43.7, -79.42),
            snapshot: WeatherSnapshot {
                current: CurrentConditions {
                    temp: 24.5,
                    weather: vec![],
                    uvi: Some(7.0),
                },
                daily: vec![],
                timezone_offset: 0,
            },
        };

        let lines = report_lines(&report, 7.0);
        assert_eq!(lines[0], "TORONTO, ONTARIO");
        assert_eq!(lines[1], "25°C  ");
        assert_eq!(lines[2], "UV index 7 (High)");
    }
}
