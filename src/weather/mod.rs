//! Weather provider access and payload helpers

pub mod assets;
pub mod client;
pub mod types;

pub use assets::{icon_glyph, ConditionAsset};
pub use client::{WeatherClient, WeatherSource};
pub use types::*;
