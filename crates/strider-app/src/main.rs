//! Headless driver for the Strider third-person controller.
//!
//! Loads `config.ron` (creating it on first run), applies CLI overrides,
//! replays an input script through the character rig and logs the result.
//!
//! Run with: `cargo run -p strider-app -- --motor kinematic --duration 5`

use std::process::ExitCode;

use clap::Parser;
use strider_config::{CliArgs, Config, default_config_dir};
use strider_input::InputScript;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    // Logging is configured from the config, so a load failure is reported
    // once the subscriber exists.
    let (mut config, load_error) = match Config::load_or_create(&config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    strider_log::init_logging(
        Some(log_dir.as_path()),
        cfg!(debug_assertions),
        Some(&config),
    );

    if let Some(e) = load_error {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    info!("Strider headless driver");
    info!(
        "Config: {} | motor={:?} tick_rate={}Hz duration={}s",
        config_dir.display(),
        config.world.motor,
        config.sim.tick_rate,
        config.sim.duration_seconds
    );
    for warning in config.validate() {
        warn!("{warning}");
    }

    let script = match args.script {
        Some(ref path) => match InputScript::load(path) {
            Ok(script) => script,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => InputScript::demo(config.sim.tick_rate),
    };

    let summary = strider_app::run_configured(&config, &script);
    if let Some(frame) = summary.last_frame {
        info!(
            "Final: pos=({:.2}, {:.2}, {:.2}) camera=({:.2}, {:.2}, {:.2}) grounded={}",
            frame.character_position.x,
            frame.character_position.y,
            frame.character_position.z,
            frame.camera.position.x,
            frame.camera.position.y,
            frame.camera.position.z,
            frame.grounded
        );
    }

    ExitCode::SUCCESS
}
