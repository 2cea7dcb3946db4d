//! User interface module

pub mod app;
pub mod components;
pub mod screens;

pub use app::UiApp;
