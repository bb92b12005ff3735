//! Runtime tuning
//!
//! Every constant the simulation, camera and rules depend on lives here so a
//! `tilerunner.ron` file can override any subset of them. Missing fields fall
//! back to the defaults below.

use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for in the working directory and the user config dir
pub const CONFIG_FILE: &str = "tilerunner.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Player physics. Velocities are in world pixels per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// World pixels per tile unit in level data
    pub tile_size: f32,
    /// Fixed simulation rate (ticks per second)
    pub tick_rate: f32,
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_impulse: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Maximum downward velocity
    pub terminal_velocity: f32,
    pub player_width: f32,
    pub player_height: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            tick_rate: 60.0,
            move_speed: 4.0,
            jump_impulse: -12.5,
            gravity: 0.6,
            terminal_velocity: 12.0,
            player_width: 22.0,
            player_height: 30.0,
        }
    }
}

/// Camera zoom levels and transition timing (seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Zoom held during normal play once the intro transition finishes
    pub base_zoom: f32,
    /// Peak zoom of the portal reveal; also the upper zoom bound
    pub door_target_zoom: f32,
    /// Zoom forced while the manual zoom-out input is held
    pub manual_zoom_out: f32,
    /// Exponential follow factor per tick (0..1)
    pub smoothing: f32,
    pub transition_delay: f32,
    pub transition_duration: f32,
    pub focus_ease_in: f32,
    pub focus_hold: f32,
    pub focus_ease_out: f32,
    pub reset_duration: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            base_zoom: 1.5,
            door_target_zoom: 2.25,
            manual_zoom_out: 1.0,
            smoothing: 0.12,
            transition_delay: 0.6,
            transition_duration: 1.4,
            focus_ease_in: 1.0,
            focus_hold: 1.2,
            focus_ease_out: 0.8,
            reset_duration: 0.35,
        }
    }
}

/// Hostile actor tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileSettings {
    pub patrol_speed: f32,
    pub pursuer_speed: f32,
    pub pursuer_visibility: f32,
    /// Speed lost per level past the first
    pub pursuer_speed_step: f32,
    /// Visibility lost per level past the first
    pub pursuer_visibility_step: f32,
    pub pursuer_speed_floor: f32,
    pub pursuer_visibility_floor: f32,
    /// Lowest distance factor applied right next to the player
    pub pursuer_taper_floor: f32,
    /// Vertical bob amplitude (pixels per tick)
    pub bob_amplitude: f32,
    /// Vertical bob angular frequency (radians per second)
    pub bob_frequency: f32,
    /// Margin trimmed from every side of the player box for hostile contact
    pub contact_inset: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
}

impl Default for HostileSettings {
    fn default() -> Self {
        Self {
            patrol_speed: 1.5,
            pursuer_speed: 2.6,
            pursuer_visibility: 600.0,
            pursuer_speed_step: 0.25,
            pursuer_visibility_step: 40.0,
            pursuer_speed_floor: 1.2,
            pursuer_visibility_floor: 240.0,
            pursuer_taper_floor: 0.35,
            bob_amplitude: 0.6,
            bob_frequency: 3.0,
            contact_inset: 5.0,
            enemy_width: 24.0,
            enemy_height: 24.0,
        }
    }
}

/// What contact with a hazard or hostile costs the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactPolicy {
    /// Any contact ends the attempt
    InstantDefeat,
    /// Each contact consumes one unit; the attempt ends when none remain
    HealthPool { max: u32 },
}

impl Default for ContactPolicy {
    fn default() -> Self {
        Self::InstantDefeat
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub contact_policy: ContactPolicy,
    /// Immunity after a health-pool hit
    pub invulnerable_ticks: u32,
    /// Budget for levels that don't set their own
    pub default_time_budget: Option<f32>,
    /// Attempts per collectible before unconstrained fallback placement
    pub placement_attempts: u32,
    /// Collectibles are kept at least this far from any hazard
    pub hazard_safety_radius: f32,
    /// Platforms whose top is within this many tiles of the level floor count as ground
    pub ground_threshold_tiles: f32,
    pub collectible_size: f32,
    pub portal_width: f32,
    pub portal_height: f32,
    /// Seconds spent in `Completing` before the gate opens
    pub completing_seconds: f32,
    pub leaderboard_size: usize,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            contact_policy: ContactPolicy::default(),
            invulnerable_ticks: 90,
            default_time_budget: None,
            placement_attempts: 200,
            hazard_safety_radius: 48.0,
            ground_threshold_tiles: 2.0,
            collectible_size: 14.0,
            portal_width: 28.0,
            portal_height: 44.0,
            completing_seconds: 0.75,
            leaderboard_size: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsSettings,
    pub camera: CameraSettings,
    pub hostiles: HostileSettings,
    pub rules: RuleSettings,
}

impl GameConfig {
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Load from the first config file found, or defaults.
    /// A file that exists but fails to parse is reported and ignored.
    pub fn discover() -> Self {
        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                }
            }
        }
        Self::default()
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tilerunner").join(CONFIG_FILE));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_str(
            "(physics: (gravity: 1.0), rules: (contact_policy: HealthPool(max: 3)))",
        ).unwrap();
        assert_eq!(config.physics.gravity, 1.0);
        assert_eq!(config.physics.move_speed, PhysicsSettings::default().move_speed);
        assert_eq!(config.rules.contact_policy, ContactPolicy::HealthPool { max: 3 });
        assert_eq!(config.camera, CameraSettings::default());
    }

    #[test]
    fn test_bad_config_is_error() {
        assert!(GameConfig::from_str("(physics: 12)").is_err());
    }

    #[test]
    fn test_zoom_bounds_are_ordered() {
        let cam = CameraSettings::default();
        assert!(cam.manual_zoom_out >= 1.0);
        assert!(cam.base_zoom <= cam.door_target_zoom);
    }
}
