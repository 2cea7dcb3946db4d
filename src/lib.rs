//! SunSafe - UV index, forecast and sunscreen reminders in the terminal
//!
//! A terminal user interface built with Rust.

pub mod app;
pub mod config;
pub mod core;
pub mod gauge;
pub mod location;
pub mod notify;
pub mod output;
pub mod quiz;
pub mod report;
pub mod skin;
pub mod startup;
pub mod state;
pub mod ui;
pub mod weather;
