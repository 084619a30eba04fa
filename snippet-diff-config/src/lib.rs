//! Configuration system for the snippet-diff viewer.
//!
//! This crate provides configuration loading, saving, and default values
//! for the diff engine and its terminal painter. It includes:
//!
//! - The top-level [`Config`] struct mapped to `config.yaml`
//! - Default values for every field
//! - Palette overrides for the terminal theme
//! - Typed errors for I/O, parse, and validation failures

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{LogLevel, ThemeConfig};
