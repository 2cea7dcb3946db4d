//! UI components

pub mod forecast_strip;
pub mod uv_gauge;

pub use forecast_strip::{render_forecast_strip, FORECAST_STRIP_HEIGHT};
pub use uv_gauge::{render_uv_gauge, MARKER_COLOR};
