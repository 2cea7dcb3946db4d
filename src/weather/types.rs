//! One-call weather payload and the derived display rows

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Number of days shown in the forecast strip
pub const FORECAST_DAYS: usize = 5;

/// Decoded one-call response. Fields the app does not use are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
    /// Seconds east of UTC for the forecast location
    #[serde(default)]
    pub timezone_offset: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: f64,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub uvi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Epoch seconds
    pub dt: i64,
    pub temp: DailyTemperature,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub uvi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub max: f64,
    #[serde(default)]
    pub min: Option<f64>,
}

/// One column of the forecast strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastDay {
    /// Upper-case short weekday, e.g. "MON"
    pub weekday: String,
    pub icon: String,
    pub max_temp: i64,
    pub uvi: i64,
}

/// Round to the nearest integer with halves going up (2.5 -> 3, -2.5 -> -2).
///
/// The cast saturates: NaN becomes 0 and infinities clamp to the `i64` range.
/// Payload values come from JSON, which cannot carry either.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Upper-case the first character, leave the rest alone
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl WeatherSnapshot {
    /// Current temperature rounded for display
    pub fn current_temp(&self) -> i64 {
        round_half_up(self.current.temp)
    }

    /// First current description, capitalised
    pub fn current_description(&self) -> String {
        self.current
            .weather
            .first()
            .map(|c| capitalize_first(&c.description))
            .unwrap_or_default()
    }

    /// Raw description used for the condition asset lookup
    pub fn current_condition(&self) -> &str {
        self.current
            .weather
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or("")
    }

    /// Current UV index, falling back to today's daily value
    pub fn current_uv_index(&self) -> Option<f64> {
        self.current
            .uvi
            .or_else(|| self.daily.first().map(|d| d.uvi))
    }

    /// The first five days as display rows
    pub fn weekly_forecast(&self) -> Vec<ForecastDay> {
        let offset = FixedOffset::east_opt(self.timezone_offset).unwrap_or_else(|| Utc.fix());

        self.daily
            .iter()
            .take(FORECAST_DAYS)
            .map(|day| ForecastDay {
                weekday: weekday_label(day.dt, offset),
                icon: day
                    .weather
                    .first()
                    .map(|c| c.icon.clone())
                    .unwrap_or_default(),
                max_temp: round_half_up(day.temp.max),
                uvi: round_half_up(day.uvi),
            })
            .collect()
    }
}

fn weekday_label(dt: i64, offset: FixedOffset) -> String {
    DateTime::<Utc>::from_timestamp(dt, 0)
        .map(|t| t.with_timezone(&offset).format("%a").to_string().to_uppercase())
        .unwrap_or_else(|| "---".to_string())
}
