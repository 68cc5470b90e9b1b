//! Rapier-backed motor: kinematic capsule swept by `KinematicCharacterController`.
//!
//! The motor owns its [`PhysicsWorld`] so the body's post-move position is
//! readable immediately after [`CharacterMotor::move_by`] returns.

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use tracing::{debug, trace};

use crate::{CharacterMotor, MotorOutcome, PhysicsWorld};

/// Capsule half-height of the cylindrical segment.
pub const CAPSULE_HALF_HEIGHT: f32 = 0.6;
/// Capsule radius.
pub const CAPSULE_RADIUS: f32 = 0.3;

/// Kinematic capsule character inside a private physics world.
pub struct KinematicMotor {
    physics: PhysicsWorld,
    body_handle: RigidBodyHandle,
    controller: KinematicCharacterController,
    grounded: bool,
    /// Static geometry was added since the last step; queries need a refresh.
    stale_queries: bool,
}

impl KinematicMotor {
    /// Spawns a 1.8 m capsule (2×0.6 half-height + 2×0.3 radius) centred at `spawn`.
    pub fn new(mut physics: PhysicsWorld, spawn: Vec3) -> Self {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(Vector::new(spawn.x, spawn.y, spawn.z))
            .build();
        let body_handle = physics.rigid_body_set.insert(body);

        let collider = ColliderBuilder::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS)
            .friction(0.0)
            .build();
        physics
            .collider_set
            .insert_with_parent(collider, body_handle, &mut physics.rigid_body_set);

        let controller = KinematicCharacterController {
            max_slope_climb_angle: std::f32::consts::FRAC_PI_4,
            min_slope_slide_angle: std::f32::consts::FRAC_PI_4,
            autostep: Some(CharacterAutostep {
                max_height: CharacterLength::Absolute(0.5),
                min_width: CharacterLength::Absolute(0.3),
                include_dynamic_bodies: false,
            }),
            snap_to_ground: Some(CharacterLength::Absolute(0.2)),
            offset: CharacterLength::Absolute(0.01),
            ..Default::default()
        };

        debug!(?spawn, "spawned kinematic character");

        Self {
            physics,
            body_handle,
            controller,
            grounded: false,
            stale_queries: true,
        }
    }

    /// Adds a floor slab whose top face is at `height`.
    pub fn add_floor(&mut self, height: f32) -> ColliderHandle {
        self.stale_queries = true;
        self.physics.add_floor(height)
    }

    /// Adds a fixed box obstacle.
    pub fn add_static_box(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        self.stale_queries = true;
        self.physics.add_static_box(center, half_extents)
    }
}

impl CharacterMotor for KinematicMotor {
    fn position(&self) -> Vec3 {
        let t = self.physics.rigid_body_set[self.body_handle].translation();
        Vec3::new(t.x, t.y, t.z)
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn move_by(&mut self, displacement: Vec3, dt: f32) -> MotorOutcome {
        if self.stale_queries {
            self.physics.step();
            self.stale_queries = false;
        }

        let desired = Vector::new(displacement.x, displacement.y, displacement.z);

        let filter = QueryFilter::new().exclude_rigid_body(self.body_handle);
        let query_pipeline = self.physics.broad_phase.as_query_pipeline(
            self.physics.narrow_phase.query_dispatcher(),
            &self.physics.rigid_body_set,
            &self.physics.collider_set,
            filter,
        );

        let character_shape = Capsule::new_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS);
        let body_pos = self.physics.rigid_body_set[self.body_handle].position();

        let corrected = self.controller.move_shape(
            dt,
            &query_pipeline,
            &character_shape,
            body_pos,
            desired,
            |_| {},
        );

        let moved = Vec3::new(
            corrected.translation.x,
            corrected.translation.y,
            corrected.translation.z,
        );
        let next = self.position() + moved;

        let body = &mut self.physics.rigid_body_set[self.body_handle];
        body.set_next_kinematic_translation(Vector::new(next.x, next.y, next.z));
        self.physics.step();

        self.grounded = corrected.grounded;
        let blocked = (moved - displacement).length_squared() > 1e-6;
        trace!(?next, grounded = self.grounded, blocked, "kinematic motor move");

        MotorOutcome {
            position: self.position(),
            grounded: self.grounded,
            blocked,
        }
    }
}
