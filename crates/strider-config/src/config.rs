//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level controller configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Orbit camera settings.
    pub camera: CameraConfig,
    /// Character locomotion settings.
    pub locomotion: LocomotionConfig,
    /// Level and collision settings for the headless driver.
    pub world: WorldConfig,
    /// Simulation clock settings.
    pub sim: SimConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Per-axis look sensitivity.
///
/// Each axis is multiplied by its scale, by `-1` when inverted, and by the
/// tick's delta time before it is added to the camera angles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MouseSensitivity {
    /// Degrees of yaw per unit of horizontal look input per second.
    pub horizontal: f32,
    /// Degrees of pitch per unit of vertical look input per second.
    pub vertical: f32,
    /// Flip the horizontal look axis.
    pub invert_horizontal: bool,
    /// Flip the vertical look axis.
    pub invert_vertical: bool,
}

/// Camera pitch range in degrees. Positive pitch looks down at the target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PitchLimits {
    /// Lowest allowed pitch.
    pub min: f32,
    /// Highest allowed pitch.
    pub max: f32,
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Look sensitivity.
    pub sensitivity: MouseSensitivity,
    /// Pitch clamp range.
    pub pitch_limits: PitchLimits,
    /// Initial camera position relative to the target anchor. Its length
    /// becomes the fixed follow distance.
    pub offset: [f32; 3],
    /// Target anchor relative to the character origin (torso or head).
    pub target_offset: [f32; 3],
}

/// Horizontal speed tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovementTuning {
    /// Walking speed in units per second.
    pub base_speed: f32,
    /// Speed multiplier while sprinting.
    pub sprint_multiplier: f32,
    /// Maximum change of horizontal speed in units per second squared.
    pub acceleration: f32,
}

/// Vertical motion tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GravityTuning {
    /// Gravitational acceleration along +Y (negative pulls down).
    pub gravity_constant: f32,
    /// Scale applied to `gravity_constant` for game feel.
    pub gravity_multiplier: f32,
    /// Vertical velocity added by a grounded jump.
    pub jump_impulse: f32,
}

/// Locomotion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Horizontal speed tuning.
    pub movement: MovementTuning,
    /// Gravity and jump tuning.
    pub gravity: GravityTuning,
    /// Maximum facing turn rate in degrees per second.
    pub rotation_speed: f32,
}

/// Which collision primitive resolves character movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum MotorKind {
    /// Infinite walkable plane, no obstacles.
    Flat,
    /// Rapier kinematic capsule against static level geometry.
    Kinematic,
}

/// Level configuration for the headless driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Collision primitive to use.
    pub motor: MotorKind,
    /// Height of the ground plane.
    pub ground_height: f32,
    /// Character spawn position.
    pub spawn: [f32; 3],
}

/// Simulation clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation rate in Hz.
    pub tick_rate: u32,
    /// Simulated presentation rate in Hz for headless runs. Frames and
    /// simulation ticks are decoupled by the fixed-step accumulator.
    pub frame_rate: u32,
    /// Length of a headless run in seconds.
    pub duration_seconds: f32,
    /// Longest frame the fixed-step loop will try to catch up on, in seconds.
    pub max_frame_time: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Emit a trace event for every simulated tick.
    pub trace_ticks: bool,
}

// --- Default implementations ---

impl Default for MouseSensitivity {
    fn default() -> Self {
        Self {
            horizontal: 20.0,
            vertical: 20.0,
            invert_horizontal: false,
            invert_vertical: false,
        }
    }
}

impl Default for PitchLimits {
    fn default() -> Self {
        Self {
            min: -30.0,
            max: 70.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: MouseSensitivity::default(),
            pitch_limits: PitchLimits::default(),
            offset: [0.0, 2.0, -5.0],
            target_offset: [0.0, 1.5, 0.0],
        }
    }
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            base_speed: 4.0,
            sprint_multiplier: 2.0,
            acceleration: 12.0,
        }
    }
}

impl Default for GravityTuning {
    fn default() -> Self {
        Self {
            gravity_constant: -9.81,
            gravity_multiplier: 3.0,
            jump_impulse: 8.0,
        }
    }
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            movement: MovementTuning::default(),
            gravity: GravityTuning::default(),
            rotation_speed: 500.0,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            motor: MotorKind::Flat,
            ground_height: 0.0,
            spawn: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            frame_rate: 144,
            duration_seconds: 10.0,
            max_frame_time: 0.25,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            trace_ticks: false,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Fixed timestep in seconds derived from `sim.tick_rate`.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.sim.tick_rate.max(1) as f32
    }

    /// Simulated frame time in seconds derived from `sim.frame_rate`.
    #[must_use]
    pub fn frame_time(&self) -> f32 {
        1.0 / self.sim.frame_rate.max(1) as f32
    }

    /// Lists settings that are accepted but unlikely to behave sensibly.
    ///
    /// Nothing here is rejected: the controllers run with whatever they are
    /// given, the caller decides whether to surface the warnings.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let limits = self.camera.pitch_limits;
        if limits.min > limits.max {
            warnings.push(format!(
                "camera.pitch_limits.min ({}) is greater than max ({})",
                limits.min, limits.max
            ));
        }
        let [x, y, z] = self.camera.offset;
        if x * x + y * y + z * z <= f32::EPSILON {
            warnings.push("camera.offset is zero, follow distance will be zero".to_string());
        }
        let movement = self.locomotion.movement;
        if movement.acceleration <= 0.0 {
            warnings.push(format!(
                "locomotion.movement.acceleration ({}) never reaches the target speed",
                movement.acceleration
            ));
        }
        if self.locomotion.rotation_speed <= 0.0 {
            warnings.push(format!(
                "locomotion.rotation_speed ({}) never turns the character",
                self.locomotion.rotation_speed
            ));
        }
        if self.sim.tick_rate == 0 {
            warnings.push("sim.tick_rate is zero, using 1 Hz".to_string());
        }
        if self.sim.frame_rate == 0 {
            warnings.push("sim.frame_rate is zero, using 1 Hz".to_string());
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("rotation_speed: 500.0"));
        assert!(ron_str.contains("tick_rate: 60"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(camera: (), sim: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.locomotion, LocomotionConfig::default());
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let ron_str = "(camera: (sensitivity: (horizontal: 2.0, invert_vertical: true)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.camera.sensitivity.horizontal, 2.0);
        assert!(config.camera.sensitivity.invert_vertical);
        assert_eq!(config.camera.sensitivity.vertical, 20.0);
        assert_eq!(config.camera.pitch_limits, PitchLimits::default());
    }

    #[test]
    fn test_motor_kind_parses() {
        let config: Config = ron::from_str("(world: (motor: Kinematic))").unwrap();
        assert_eq!(config.world.motor, MotorKind::Kinematic);
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.camera.pitch_limits = PitchLimits {
            min: -80.0,
            max: 80.0,
        };
        config.locomotion.gravity.jump_impulse = 12.0;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_has_no_warnings() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn test_inverted_pitch_limits_warn() {
        let mut config = Config::default();
        config.camera.pitch_limits = PitchLimits {
            min: 10.0,
            max: -10.0,
        };
        config.camera.offset = [0.0, 0.0, 0.0];
        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("pitch_limits"));
    }

    #[test]
    fn test_fixed_dt_from_tick_rate() {
        let mut config = Config::default();
        config.sim.tick_rate = 50;
        assert!((config.fixed_dt() - 0.02).abs() < 1e-6);
        config.sim.tick_rate = 0;
        assert!((config.fixed_dt() - 1.0).abs() < 1e-6);
    }
}
