//! Application configuration (`localvault.toml`).

pub mod settings;

pub use settings::Settings;
