//! Journey configuration. Loaded from journey.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "journey.ron";

/// Host-side settings. Timing and motion constants live in code, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyConfig {
    /// Frames per second the headless driver simulates.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
    /// Radians of orbit per pixel of drag.
    #[serde(default = "default_orbit_sensitivity")]
    pub orbit_sensitivity: f32,
    /// Seed for scenery scatter.
    #[serde(default = "default_scenery_seed")]
    pub scenery_seed: u64,
    /// Number of ambient particles scattered along the road.
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
}

fn default_frame_rate() -> f32 {
    60.0
}
fn default_orbit_sensitivity() -> f32 {
    0.005
}
fn default_scenery_seed() -> u64 {
    7
}
fn default_particle_count() -> usize {
    700
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            orbit_sensitivity: default_orbit_sensitivity(),
            scenery_seed: default_scenery_seed(),
            particle_count: default_particle_count(),
        }
    }
}

impl JourneyConfig {
    /// Load config from `journey.ron` in the current directory.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Where [`JourneyConfig::load`] and [`JourneyConfig::save`] look for the file.
    pub fn path() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(CONFIG_FILE)
    }

    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `journey.ron`. Logs on error.
    pub fn save(&self) {
        self.save_to(&Self::path());
    }

    pub fn save_to(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    /// Duration of one simulated frame. Non-positive rates fall back to the default.
    pub fn frame_delta(&self) -> Duration {
        let rate = if self.frame_rate > 0.0 {
            self.frame_rate
        } else {
            default_frame_rate()
        };
        Duration::from_secs_f32(1.0 / rate)
    }
}
