//! Settings management
//!
//! Every field has a default, so a settings file only needs to name what it
//! changes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub map: MapSettings,
    pub screen: ScreenSettings,
    pub rules: RuleSettings,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Log destination. `None` logs to stderr.
    pub log_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub width: i32,
    pub height: i32,
    /// Number of dungeon levels; depth 0 is the top.
    pub depth_count: i32,
    pub wall_percentage: u32,
    pub smooth_iterations: u32,
    pub smooth_threshold: u32,
    pub zombies_per_level: u32,
    /// Percent chance of a wight on each level.
    pub wight_chance: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub fov_radius: i32,
    pub inventory_max: usize,
    pub heal_cap: i32,
    /// Turns between regeneration heals.
    pub regen_period: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            width: 25,
            height: 25,
            depth_count: 10,
            wall_percentage: 45,
            smooth_iterations: 2,
            smooth_threshold: 5,
            zombies_per_level: 5,
            wight_chance: 10,
        }
    }
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            width: 25,
            height: 25,
        }
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            fov_radius: 7,
            inventory_max: 4,
            heal_cap: 10,
            regen_period: 5,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map: MapSettings::default(),
            screen: ScreenSettings::default(),
            rules: RuleSettings::default(),
            seed: None,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Index of the deepest level.
    pub fn bottom_depth(&self) -> i32 {
        self.map.depth_count - 1
    }
}
