//! Per-character frame orchestration.
//!
//! [`CharacterRig`] owns an orbit camera, a locomotion controller and the
//! motor that resolves collisions, and runs them in the one order that keeps
//! the camera glued to the character:
//!
//! 1. camera integrates look input (yaw/pitch for this tick)
//! 2. locomotion reads that yaw and the motor's grounded flag
//! 3. motor resolves the requested displacement
//! 4. camera is placed behind the *resolved* character position

use glam::{Quat, Vec3};
use strider_config::Config;
use strider_input::{Action, ActionEdges, ControlEvent};
use strider_physics::CharacterMotor;
use strider_player::{CameraTransform, LocomotionController, LocomotionState, OrbitCamera};
use tracing::{debug, trace};

/// Snapshot of one simulated tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigFrame {
    /// Tick index (0-based).
    pub tick: u64,
    /// Camera transform placed after movement resolution.
    pub camera: CameraTransform,
    /// Character origin after movement resolution.
    pub character_position: Vec3,
    /// Character facing.
    pub facing: Quat,
    /// Motor's grounded report for this tick's move.
    pub grounded: bool,
    /// Whether collision trimmed the requested displacement.
    pub blocked: bool,
    /// Sprint level held during the tick.
    pub sprint_held: bool,
    /// Locomotion state after the tick.
    pub state: LocomotionState,
}

/// Camera, locomotion and motor for one controlled character.
pub struct CharacterRig<M: CharacterMotor> {
    camera: OrbitCamera,
    locomotion: LocomotionController,
    motor: M,
    edges: ActionEdges,
    target_offset: Vec3,
    tick: u64,
}

impl<M: CharacterMotor> CharacterRig<M> {
    /// Builds both controllers from `config` around an already spawned motor.
    ///
    /// The camera starts at `anchor + camera.offset`, so the follow distance is
    /// the length of that offset.
    pub fn new(config: &Config, motor: M) -> Self {
        let target_offset = Vec3::from_array(config.camera.target_offset);
        let anchor = motor.position() + target_offset;
        let camera = OrbitCamera::new(
            config.camera.sensitivity,
            config.camera.pitch_limits,
            anchor + Vec3::from_array(config.camera.offset),
            anchor,
        );
        let locomotion = LocomotionController::new(
            config.locomotion.movement,
            config.locomotion.gravity,
            config.locomotion.rotation_speed,
        );
        debug!(
            follow_distance = camera.follow_distance(),
            "character rig ready"
        );

        Self {
            camera,
            locomotion,
            motor,
            edges: ActionEdges::new(),
            target_offset,
            tick: 0,
        }
    }

    /// Routes one control event to the controller that owns it.
    pub fn handle_event(&mut self, event: ControlEvent) {
        trace!(event = event.name(), tick = self.tick, "control event");
        match event {
            ControlEvent::Look(delta) => self.camera.on_look_input(delta),
            ControlEvent::Move(raw) => self.locomotion.on_move_input(raw),
            ControlEvent::Sprint(active) => {
                if self.edges.is_pressed(Action::Sprint) != active {
                    debug!(active, tick = self.tick, "sprint level changed");
                }
                self.edges.set_level(Action::Sprint, active);
                self.locomotion.on_sprint_input(active);
            }
            ControlEvent::Jump(pressed) => {
                if self.edges.set_level(Action::Jump, pressed) {
                    self.locomotion.on_jump_edge(self.motor.is_grounded());
                }
            }
        }
    }

    /// Simulates one tick of `dt` seconds.
    pub fn step(&mut self, dt: f32) -> RigFrame {
        self.camera.tick(dt);

        let request = self
            .locomotion
            .tick(dt, self.camera.yaw(), self.motor.is_grounded());

        let outcome = self.motor.move_by(request.displacement, dt);

        let camera = self.camera.place(outcome.position + self.target_offset);

        let sprint_held = self.edges.is_pressed(Action::Sprint);
        self.edges.clear_transients();
        let frame = RigFrame {
            tick: self.tick,
            camera,
            character_position: outcome.position,
            facing: request.facing,
            grounded: outcome.grounded,
            blocked: outcome.blocked,
            sprint_held,
            state: self.locomotion.state(),
        };
        self.tick += 1;
        frame
    }

    /// Point the camera orbits: character origin plus the anchor offset.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.motor.position() + self.target_offset
    }

    #[must_use]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    #[must_use]
    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    #[must_use]
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Number of ticks simulated so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
