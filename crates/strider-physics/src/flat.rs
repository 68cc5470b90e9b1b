//! Obstacle-free motor: an infinite walkable plane.

use glam::Vec3;
use tracing::trace;

use crate::{CharacterMotor, MotorOutcome};

/// Motor that resolves movement against a single horizontal plane at
/// `ground_height`. Anything ending at or below the plane is put back on it
/// and reported grounded.
#[derive(Clone, Debug)]
pub struct FlatGroundMotor {
    position: Vec3,
    ground_height: f32,
    grounded: bool,
}

impl FlatGroundMotor {
    /// Spawns at `spawn`, lifted onto the plane if it starts below it.
    #[must_use]
    pub fn new(spawn: Vec3, ground_height: f32) -> Self {
        let grounded = spawn.y <= ground_height;
        Self {
            position: Vec3::new(spawn.x, spawn.y.max(ground_height), spawn.z),
            ground_height,
            grounded,
        }
    }

    #[must_use]
    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }
}

impl CharacterMotor for FlatGroundMotor {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, displacement: Vec3, _dt: f32) -> MotorOutcome {
        let mut next = self.position + displacement;
        let mut blocked = false;
        if next.y <= self.ground_height {
            blocked = next.y < self.ground_height;
            next.y = self.ground_height;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        self.position = next;
        trace!(?next, grounded = self.grounded, "flat motor move");
        MotorOutcome {
            position: next,
            grounded: self.grounded,
            blocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_below_ground_is_lifted() {
        let motor = FlatGroundMotor::new(Vec3::new(1.0, -3.0, 2.0), 0.0);
        assert_eq!(motor.position(), Vec3::new(1.0, 0.0, 2.0));
        assert!(motor.is_grounded());
    }

    #[test]
    fn test_spawn_in_air_is_airborne() {
        let motor = FlatGroundMotor::new(Vec3::new(0.0, 5.0, 0.0), 0.0);
        assert!(!motor.is_grounded());
    }

    #[test]
    fn test_downward_move_clamps_to_plane() {
        let mut motor = FlatGroundMotor::new(Vec3::new(0.0, 0.5, 0.0), 0.0);
        let outcome = motor.move_by(Vec3::new(1.0, -2.0, 0.0), 1.0 / 60.0);
        assert_eq!(outcome.position, Vec3::new(1.0, 0.0, 0.0));
        assert!(outcome.grounded);
        assert!(outcome.blocked);
    }

    #[test]
    fn test_never_below_plane() {
        let mut motor = FlatGroundMotor::new(Vec3::ZERO, 1.25);
        for i in 0..50 {
            let dy = if i % 3 == 0 { 0.4 } else { -0.7 };
            motor.move_by(Vec3::new(0.1, dy, -0.1), 1.0 / 60.0);
            assert!(motor.position().y >= 1.25);
        }
    }

    #[test]
    fn test_upward_move_leaves_ground() {
        let mut motor = FlatGroundMotor::new(Vec3::ZERO, 0.0);
        let outcome = motor.move_by(Vec3::new(0.0, 0.3, 0.0), 1.0 / 60.0);
        assert!(!outcome.grounded);
        assert!(!outcome.blocked);
        assert!((outcome.position.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_zero_move_on_plane_stays_grounded() {
        let mut motor = FlatGroundMotor::new(Vec3::ZERO, 0.0);
        let outcome = motor.move_by(Vec3::ZERO, 1.0 / 60.0);
        assert!(outcome.grounded);
        assert!(!outcome.blocked);
    }
}
