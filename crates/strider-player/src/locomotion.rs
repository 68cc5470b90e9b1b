//! Camera-relative character locomotion: facing, gravity, jump, and sprint smoothing.
//!
//! [`LocomotionController::tick`] never moves anything itself. It returns a
//! [`MovementRequest`] whose displacement the caller hands to a collision
//! primitive, which resolves it and reports back whether the character is
//! grounded for the next tick.

use glam::{Quat, Vec2, Vec3};
use strider_config::{GravityTuning, MovementTuning};
use tracing::{debug, trace};

/// Vertical velocity held while grounded. Slightly negative so the collision
/// primitive keeps reporting ground contact.
pub const GROUNDED_VELOCITY: f32 = -1.0;

/// Mutable locomotion state owned by the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocomotionState {
    /// Current horizontal speed in units per second.
    pub horizontal_speed: f32,
    /// Current vertical velocity in units per second (positive = up).
    pub vertical_velocity: f32,
    /// Whether the sprint action is held.
    pub is_sprinting: bool,
}

/// Output of one locomotion tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementRequest {
    /// Displacement to hand to the collision primitive for this tick.
    pub displacement: Vec3,
    /// Character facing after this tick's turn.
    pub facing: Quat,
}

/// Moves `current` toward `target` by at most `max_delta`, never overshooting.
#[must_use]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Rotates `from` toward `to` by at most `max_radians`, never overshooting.
#[must_use]
pub fn rotate_towards(from: Quat, to: Quat, max_radians: f32) -> Quat {
    let angle = from.angle_between(to);
    if angle <= max_radians || angle <= f32::EPSILON {
        to
    } else {
        from.slerp(to, max_radians / angle).normalize()
    }
}

/// Rotation about +Y whose forward (+Z) points along the horizontal part of `direction`.
fn look_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y(direction.x.atan2(direction.z))
}

/// Gravity-affected, camera-relative character movement.
#[derive(Clone, Debug)]
pub struct LocomotionController {
    state: LocomotionState,
    movement: MovementTuning,
    gravity: GravityTuning,
    /// Facing turn rate cap in degrees per second.
    rotation_speed: f32,
    raw_input: Vec2,
    /// Working direction: horizontal part from input, vertical part from gravity.
    direction: Vec3,
    facing: Quat,
}

impl LocomotionController {
    #[must_use]
    pub fn new(movement: MovementTuning, gravity: GravityTuning, rotation_speed: f32) -> Self {
        Self {
            state: LocomotionState::default(),
            movement,
            gravity,
            rotation_speed,
            raw_input: Vec2::ZERO,
            direction: Vec3::ZERO,
            facing: Quat::IDENTITY,
        }
    }

    /// Stores the raw move intent. A zero vector means "no intent".
    ///
    /// The horizontal direction is reset to the unrotated input; the next
    /// [`tick`](Self::tick) rotates it into camera space when it is nonzero.
    pub fn on_move_input(&mut self, raw: Vec2) {
        self.raw_input = raw;
        self.direction = Vec3::new(raw.x, 0.0, raw.y);
    }

    pub fn on_sprint_input(&mut self, active: bool) {
        self.state.is_sprinting = active;
    }

    /// Handles the rising edge of the jump action.
    ///
    /// Adds the jump impulse on top of the current vertical velocity when
    /// grounded and returns `true`. Airborne jumps are dropped, not queued.
    pub fn on_jump_edge(&mut self, is_grounded: bool) -> bool {
        if !is_grounded {
            trace!("jump ignored while airborne");
            return false;
        }
        self.state.vertical_velocity += self.gravity.jump_impulse;
        debug!(
            vertical_velocity = self.state.vertical_velocity,
            "jump impulse applied"
        );
        true
    }

    /// Runs one locomotion step.
    ///
    /// `camera_yaw` must be the yaw the camera produced in this same tick.
    /// `is_grounded` is the collision primitive's report from its last move.
    pub fn tick(&mut self, dt: f32, camera_yaw: f32, is_grounded: bool) -> MovementRequest {
        self.apply_rotation(dt, camera_yaw);
        self.apply_gravity(dt, is_grounded);
        self.apply_movement(dt)
    }

    fn apply_rotation(&mut self, dt: f32, camera_yaw: f32) {
        // Zero intent keeps the last facing.
        if self.raw_input.length_squared() == 0.0 {
            return;
        }
        let yaw = Quat::from_rotation_y(camera_yaw.to_radians());
        self.direction = yaw * Vec3::new(self.raw_input.x, 0.0, self.raw_input.y);
        let target = look_rotation(self.direction);
        let max_step = (self.rotation_speed * dt).to_radians();
        self.facing = rotate_towards(self.facing, target, max_step);
    }

    /// Grounded with zero vertical velocity also snaps to the bias, so a
    /// character spawned at rest is pressed onto the ground on its first tick.
    fn apply_gravity(&mut self, dt: f32, is_grounded: bool) {
        if is_grounded && self.state.vertical_velocity <= 0.0 {
            self.state.vertical_velocity = GROUNDED_VELOCITY;
        } else {
            self.state.vertical_velocity +=
                self.gravity.gravity_constant * self.gravity.gravity_multiplier * dt;
        }
        self.direction.y = self.state.vertical_velocity;
    }

    fn apply_movement(&mut self, dt: f32) -> MovementRequest {
        let target_speed = self.target_speed();
        self.state.horizontal_speed = move_towards(
            self.state.horizontal_speed,
            target_speed,
            self.movement.acceleration * dt,
        );
        // Vertical velocity rides the same speed scale as the horizontal part.
        MovementRequest {
            displacement: self.direction * self.state.horizontal_speed * dt,
            facing: self.facing,
        }
    }

    /// Speed the controller is currently accelerating toward.
    #[must_use]
    pub fn target_speed(&self) -> f32 {
        if self.state.is_sprinting {
            self.movement.base_speed * self.movement.sprint_multiplier
        } else {
            self.movement.base_speed
        }
    }

    #[must_use]
    pub fn state(&self) -> LocomotionState {
        self.state
    }

    #[must_use]
    pub fn facing(&self) -> Quat {
        self.facing
    }

    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[must_use]
    pub fn raw_input(&self) -> Vec2 {
        self.raw_input
    }
}
