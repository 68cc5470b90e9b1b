//! Command-line argument parsing for the Strider driver.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, MotorKind};

/// Strider command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strider", about = "Headless third-person controller driver")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Simulated run length in seconds.
    #[arg(long)]
    pub duration: Option<f32>,

    /// Fixed simulation rate in Hz.
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// RON input script to replay instead of the built-in demo.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Collision primitive resolving character movement.
    #[arg(long, value_enum)]
    pub motor: Option<MotorKind>,

    /// Look sensitivity applied to both axes.
    #[arg(long)]
    pub sensitivity: Option<f32>,

    /// Invert the vertical look axis.
    #[arg(long)]
    pub invert_y: Option<bool>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(duration) = args.duration {
            self.sim.duration_seconds = duration;
        }
        if let Some(rate) = args.tick_rate {
            self.sim.tick_rate = rate;
        }
        if let Some(motor) = args.motor {
            self.world.motor = motor;
        }
        if let Some(s) = args.sensitivity {
            self.camera.sensitivity.horizontal = s;
            self.camera.sensitivity.vertical = s;
        }
        if let Some(invert) = args.invert_y {
            self.camera.sensitivity.invert_vertical = invert;
        }
    }
}

/// Default configuration directory: `<platform config dir>/strider`,
/// falling back to `./config` when the platform has none.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("strider"))
        .unwrap_or_else(|| PathBuf::from("config"))
}
