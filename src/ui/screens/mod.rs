//! One module per tab

pub mod home;
pub mod my_skin;
pub mod quiz;
pub mod settings;
pub mod uv_index;
