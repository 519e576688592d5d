//! Configuration for layerkit conversions
//!
//! Configuration is organized into sections, one per tool concern:
//! - Logging (level filter, optional log file, JSON output)
//! - G-code output (feed rate line)
//! - CLI output (Y shift workaround, header block, units factor)
//! - VTK output (dataset title)
//! - Bounding box (print parameters, end marker, literal mode)
//!
//! Every section has defaults so a file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Name of the config directory under the platform config dir
const APP_DIR: &str = "layerkit";

/// Default config file name
const CONFIG_FILE: &str = "config.toml";

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level filter when `RUST_LOG` is not set
    pub level: String,
    /// Also write log records to this file
    pub log_file: Option<PathBuf>,
    /// Emit console records as JSON lines
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: None,
            json: false,
        }
    }
}

/// G-code writer settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeSettings {
    /// Feed rate written as a leading `G1 F..` line
    pub feed_rate: Option<f64>,
}

/// CLI writer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// Shift added to the destination Y of every hatch
    ///
    /// Some simulators reject hatches whose end coincides with the next start.
    pub y_shift: f64,
    /// Whether the Y shift is applied at all
    pub shift_enabled: bool,
    /// Write the `$$HEADERSTART` .. `$$GEOMETRYEND` framing
    pub write_header: bool,
    /// Units factor written to `$$UNITS`
    pub units: f64,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            y_shift: 1e-4,
            shift_enabled: true,
            write_header: false,
            units: 1.0,
        }
    }
}

/// VTK writer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VtkSettings {
    /// Dataset title line
    pub title: String,
}

impl Default for VtkSettings {
    fn default() -> Self {
        Self {
            title: "layerkit toolpath".to_string(),
        }
    }
}

/// Bounding box settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BboxSettings {
    /// Layer height; inferred from the first Z step when unset
    pub layer_height: Option<f64>,
    /// Nozzle diameter in mm
    pub nozzle_diameter: f64,
    /// Skip inflation by nozzle width and base layer
    pub literal: bool,
    /// Comment that terminates the scan
    pub end_marker: String,
    /// Default output file
    pub output: PathBuf,
}

impl Default for BboxSettings {
    fn default() -> Self {
        Self {
            layer_height: None,
            nozzle_diameter: 0.4,
            literal: false,
            end_marker: ";End of Gcode".to_string(),
            output: PathBuf::from("bbox.geo.dat"),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingSettings,
    pub gcode: GcodeSettings,
    pub cli: CliSettings,
    pub vtk: VtkSettings,
    pub bbox: BboxSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location (`<config dir>/layerkit/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load an explicit file, else the platform file if it exists, else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(SettingsError::invalid("logging.level", "must not be empty"));
        }

        if let Some(rate) = self.gcode.feed_rate {
            if !(rate > 0.0) {
                return Err(SettingsError::invalid("gcode.feed_rate", "must be > 0"));
            }
        }

        if !self.cli.y_shift.is_finite() {
            return Err(SettingsError::invalid("cli.y_shift", "must be finite"));
        }

        if !(self.cli.units > 0.0) || !self.cli.units.is_finite() {
            return Err(SettingsError::invalid("cli.units", "must be > 0"));
        }

        if let Some(height) = self.bbox.layer_height {
            if !(height > 0.0) {
                return Err(SettingsError::invalid("bbox.layer_height", "must be > 0"));
            }
        }

        if !(self.bbox.nozzle_diameter >= 0.0) {
            return Err(SettingsError::invalid(
                "bbox.nozzle_diameter",
                "must be >= 0",
            ));
        }

        if self.bbox.end_marker.is_empty() {
            return Err(SettingsError::invalid(
                "bbox.end_marker",
                "must not be empty",
            ));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.cli.y_shift, 1e-4);
        assert!(config.cli.shift_enabled);
        assert_eq!(config.bbox.end_marker, ";End of Gcode");
        assert_eq!(config.bbox.nozzle_diameter, 0.4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[cli]\nwrite_header = true\n").unwrap();
        assert!(config.cli.write_header);
        assert_eq!(config.cli.units, 1.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_units() {
        let mut config = Config::new();
        config.cli.units = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_feed_rate() {
        let mut config = Config::new();
        config.gcode.feed_rate = Some(-5.0);
        assert!(config.validate().is_err());
    }
}
