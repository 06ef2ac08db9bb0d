//! Default-build policy settings.
//!
//! Settings are read from a JSON file and may be overridden by environment
//! variables. They are consulted only when producing a default loadout.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equipment::EngineType;
use crate::error::{Error, Result};

/// Environment variable naming a settings file.
pub const SETTINGS_ENV: &str = "MECHLAB_SETTINGS";
/// Environment override for [`LoadoutSettings::armor_percent`].
pub const ARMOR_PERCENT_ENV: &str = "MECHLAB_ARMOR_PERCENT";
/// Environment override for [`LoadoutSettings::engine`], e.g. `std-200` or `none`.
pub const ENGINE_ENV: &str = "MECHLAB_ENGINE";
/// Environment override for [`LoadoutSettings::heat_sinks`].
pub const HEAT_SINKS_ENV: &str = "MECHLAB_HEAT_SINKS";

const SETTINGS_FILENAME: &str = "settings.json";
const DEFAULT_HEAT_SINK_ID: &str = "heatsink";

/// Engine installed by the default-build policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    pub engine_type: EngineType,
    pub rating: u32,
}

impl fmt::Display for EngineSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.engine_type, self.rating)
    }
}

impl FromStr for EngineSettings {
    type Err = String;

    /// Parse `<type>-<rating>`, e.g. `xl-300`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (engine_type, rating) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("engine '{}' must look like std-200 or xl-300", s.trim()))?;
        Ok(Self {
            engine_type: engine_type.parse()?,
            rating: rating
                .parse::<u32>()
                .map_err(|e| format!("invalid engine rating '{}': {e}", rating))?,
        })
    }
}

/// Policy for default loadout construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadoutSettings {
    /// Share of each component's maximum armor to apply, 0 to 100.
    pub armor_percent: u8,
    /// Engine to install in the center torso, if any.
    pub engine: Option<EngineSettings>,
    /// External heat sinks to mount.
    pub heat_sinks: u32,
    /// Equipment id of the heat sink to mount.
    pub heat_sink_id: String,
}

impl Default for LoadoutSettings {
    fn default() -> Self {
        Self {
            armor_percent: 100,
            engine: None,
            heat_sinks: 0,
            heat_sink_id: DEFAULT_HEAT_SINK_ID.to_string(),
        }
    }
}

impl LoadoutSettings {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "loaded loadout settings");
        Ok(settings)
    }

    /// Resolve settings from, in order of preference: `explicit`, the file
    /// named by `MECHLAB_SETTINGS`, the platform default file if it exists,
    /// or built-in defaults. Environment overrides are applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => env::var_os(SETTINGS_ENV).map(PathBuf::from).or_else(|| {
                default_settings_path()
                    .ok()
                    .filter(|candidate| candidate.exists())
            }),
        };

        let mut settings = match path {
            Some(path) => Self::from_path(&path)?,
            None => {
                debug!("no settings file found; using built-in defaults");
                Self::default()
            }
        };
        settings.apply_overrides(|key| env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let invalid = |key: &str, detail: String| Error::SettingsValidation {
            message: format!("{key}: {detail}"),
        };

        if let Some(value) = lookup(ARMOR_PERCENT_ENV) {
            self.armor_percent = value
                .trim()
                .parse::<u8>()
                .map_err(|e| invalid(ARMOR_PERCENT_ENV, format!("{e}")))?;
        }
        if let Some(value) = lookup(ENGINE_ENV) {
            self.engine = if value.trim().eq_ignore_ascii_case("none") {
                None
            } else {
                Some(
                    value
                        .parse::<EngineSettings>()
                        .map_err(|e| invalid(ENGINE_ENV, e))?,
                )
            };
        }
        if let Some(value) = lookup(HEAT_SINKS_ENV) {
            self.heat_sinks = value
                .trim()
                .parse::<u32>()
                .map_err(|e| invalid(HEAT_SINKS_ENV, format!("{e}")))?;
        }
        Ok(())
    }

    /// Reject settings no chassis could satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.armor_percent > 100 {
            return Err(Error::SettingsValidation {
                message: format!(
                    "armor_percent must be between 0 and 100, got {}",
                    self.armor_percent
                ),
            });
        }
        if self.heat_sinks > 0 && self.heat_sink_id.trim().is_empty() {
            return Err(Error::SettingsValidation {
                message: "heat_sink_id must not be empty when heat sinks are requested"
                    .to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve the default settings file location using platform-specific
/// project directories.
pub fn default_settings_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "mechlab", "mechlab").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.config_dir().join(SETTINGS_FILENAME))
}
