//! Configuration management

mod settings;

pub use settings::{AppConfig, DisplayConfig, CONFIG_VERSION};
