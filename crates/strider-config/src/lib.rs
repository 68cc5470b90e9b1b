//! Configuration for the Strider character controller.
//!
//! Holds the immutable tuning blocks the camera and locomotion controllers are
//! built from, persisted to disk as RON. Supports CLI overrides via clap and
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, default_config_dir};
pub use config::{
    CameraConfig, Config, DebugConfig, GravityTuning, LocomotionConfig, MotorKind,
    MouseSensitivity, MovementTuning, PitchLimits, SimConfig, WorldConfig,
};
pub use error::ConfigError;
