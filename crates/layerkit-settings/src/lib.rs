//! layerkit Settings Crate
//!
//! Handles the configuration file shared by the layerkit subcommands.

pub mod config;
pub mod error;

pub use config::{BboxSettings, CliSettings, Config, GcodeSettings, LoggingSettings, VtkSettings};
pub use error::{SettingsError, SettingsResult};
