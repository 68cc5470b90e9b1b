//! Headless replay: feeds an input script through a rig on a fixed-step clock.

use glam::Vec3;
use strider_config::{Config, MotorKind};
use strider_input::InputScript;
use strider_physics::{
    CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS, CharacterMotor, FlatGroundMotor, KinematicMotor,
    PhysicsWorld,
};
use tracing::{info, trace, warn};

use crate::game_loop::FixedStepLoop;
use crate::rig::{CharacterRig, RigFrame};

/// Aggregate statistics of a headless run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Simulation ticks executed.
    pub ticks: u64,
    /// Presentation frames advanced.
    pub frames: u64,
    /// Horizontal path length travelled by the character.
    pub distance_travelled: f32,
    /// Highest character origin height reached.
    pub max_height: f32,
    /// Ticks that ended airborne.
    pub airborne_ticks: u64,
    /// Ticks whose displacement was trimmed by a collision.
    pub blocked_ticks: u64,
    /// Ticks simulated with sprint held.
    pub sprint_ticks: u64,
    /// Last simulated tick, if any ran.
    pub last_frame: Option<RigFrame>,
}

/// Replays `script` for `config.sim.duration_seconds` with the motor the
/// config selects.
pub fn run_configured(config: &Config, script: &InputScript) -> RunSummary {
    let spawn = Vec3::from_array(config.world.spawn);
    match config.world.motor {
        MotorKind::Flat => {
            let motor = FlatGroundMotor::new(spawn, config.world.ground_height);
            run_headless(config, motor, script)
        }
        MotorKind::Kinematic => {
            // Capsule is centred on its body; lift it so its base sits at the spawn point.
            let center = spawn + Vec3::Y * (CAPSULE_HALF_HEIGHT + CAPSULE_RADIUS);
            let mut motor = KinematicMotor::new(PhysicsWorld::new(config.fixed_dt()), center);
            motor.add_floor(config.world.ground_height);
            run_headless(config, motor, script)
        }
    }
}

/// Replays `script` through a rig built around `motor`.
pub fn run_headless<M: CharacterMotor>(
    config: &Config,
    motor: M,
    script: &InputScript,
) -> RunSummary {
    let mut rig = CharacterRig::new(config, motor);
    let mut clock = FixedStepLoop::new(config.sim.tick_rate, f64::from(config.sim.max_frame_time));
    let frame_time = f64::from(config.frame_time()).min(f64::from(config.sim.max_frame_time));
    let duration = f64::from(config.sim.duration_seconds.max(0.0));
    let tick_rate = u64::from(config.sim.tick_rate.max(1));
    // A single frame can run several ticks, so the run is bounded by tick count.
    let tick_budget = (duration * tick_rate as f64).round() as u64;
    let trace_ticks = config.debug.trace_ticks;

    let mut summary = RunSummary {
        max_height: rig.motor().position().y,
        ..Default::default()
    };
    let mut previous = rig.motor().position();

    info!(
        duration_seconds = duration,
        tick_rate,
        tick_budget,
        steps = script.steps.len(),
        "starting headless run"
    );

    if frame_time <= 0.0 && tick_budget > 0 {
        warn!("sim.max_frame_time is not positive, no ticks can run");
        return summary;
    }

    while summary.ticks < tick_budget {
        clock.advance(frame_time, |dt, tick| {
            if tick >= tick_budget {
                return;
            }
            summary.ticks += 1;
            for event in script.events_at(tick) {
                rig.handle_event(*event);
            }
            let frame = rig.step(dt as f32);

            let delta = frame.character_position - previous;
            summary.distance_travelled += Vec3::new(delta.x, 0.0, delta.z).length();
            summary.max_height = summary.max_height.max(frame.character_position.y);
            summary.airborne_ticks += u64::from(!frame.grounded);
            summary.blocked_ticks += u64::from(frame.blocked);
            summary.sprint_ticks += u64::from(frame.sprint_held);
            previous = frame.character_position;

            if trace_ticks {
                trace!(
                    tick = frame.tick,
                    position = ?frame.character_position,
                    camera = ?frame.camera.position,
                    grounded = frame.grounded,
                    "tick"
                );
            }
            if (frame.tick + 1) % tick_rate == 0 {
                log_second(&frame, rig.camera().yaw(), rig.camera().pitch(), tick_rate);
            }
            summary.last_frame = Some(frame);
        });
    }

    summary.frames = clock.frame_count();
    info!(
        ticks = summary.ticks,
        frames = summary.frames,
        distance = summary.distance_travelled,
        max_height = summary.max_height,
        airborne_ticks = summary.airborne_ticks,
        blocked_ticks = summary.blocked_ticks,
        sprint_ticks = summary.sprint_ticks,
        "headless run finished"
    );
    summary
}

fn log_second(frame: &RigFrame, yaw: f32, pitch: f32, tick_rate: u64) {
    let p = frame.character_position;
    info!(
        "t={:>5.1}s pos=({:>7.2}, {:>6.2}, {:>7.2}) speed={:.2} vy={:>6.2} yaw={:>7.1} pitch={:>5.1} grounded={}",
        (frame.tick + 1) as f64 / tick_rate as f64,
        p.x,
        p.y,
        p.z,
        frame.state.horizontal_speed,
        frame.state.vertical_velocity,
        yaw,
        pitch,
        frame.grounded
    );
}
