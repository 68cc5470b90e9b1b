//! Collision primitives that resolve requested character displacements.
//!
//! The character controllers only ever *request* motion. A [`CharacterMotor`]
//! performs the authoritative sweep, reports where the character ended up and
//! whether it is standing on something. [`FlatGroundMotor`] is an obstacle-free
//! plane; [`KinematicMotor`] wraps the Rapier 3D kinematic character controller
//! behind a [`PhysicsWorld`] that owns all simulation state.

mod flat;
mod kinematic;

pub use flat::FlatGroundMotor;
pub use kinematic::{CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS, KinematicMotor};

use glam::Vec3;
use rapier3d::prelude::*;

/// Result of a single [`CharacterMotor::move_by`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotorOutcome {
    /// Character position after collision resolution.
    pub position: Vec3,
    /// Whether the character ended the move in contact with walkable ground.
    pub grounded: bool,
    /// Whether a collision removed part of the requested displacement.
    pub blocked: bool,
}

/// The collision/movement primitive a character is driven through.
///
/// Implementations own the character's authoritative position. Callers read
/// [`position`](Self::position) after [`move_by`](Self::move_by) to place
/// anything that follows the character.
pub trait CharacterMotor {
    /// Current character origin in world space.
    fn position(&self) -> Vec3;

    /// Grounded flag from the most recent move.
    fn is_grounded(&self) -> bool;

    /// Sweeps the character by `displacement`, resolving collisions.
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> MotorOutcome;
}

/// Static level geometry plus the Rapier state needed to sweep a kinematic
/// character through it. No joints or dynamic bodies are ever inserted.
pub struct PhysicsWorld {
    /// Only dynamic bodies would feel this; characters are kinematic.
    pub gravity: Vector,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    /// Also serves shape-cast queries for the character controller.
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    // Required by `PhysicsPipeline::step`, always empty.
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Creates a physics world stepping at `dt` seconds with gravity `(0, -9.81, 0)`.
    pub fn new(dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(0.0, -9.81, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Commits pending kinematic targets and refreshes the query structures.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Inserts a fixed axis-aligned box centred at `center` with the given half extents.
    pub fn add_static_box(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(center.x, center.y, center.z))
            .build();
        let handle = self.rigid_body_set.insert(body);
        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set)
    }

    /// Inserts a 100x1x100 floor slab whose top face sits at `height`.
    pub fn add_floor(&mut self, height: f32) -> ColliderHandle {
        self.add_static_box(
            Vec3::new(0.0, height - 0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_initializes() {
        let world = PhysicsWorld::new(1.0 / 60.0);
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
    }

    #[test]
    fn test_timestep_matches_requested_dt() {
        let world = PhysicsWorld::new(1.0 / 30.0);
        assert!((world.integration_parameters.dt - 1.0 / 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_floor_top_face_at_height() {
        let mut world = PhysicsWorld::new(1.0 / 60.0);
        let handle = world.add_floor(2.0);
        let collider = &world.collider_set[handle];
        let parent = collider.parent().unwrap();
        let t = world.rigid_body_set[parent].translation();
        assert!((t.y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_level_geometry_is_fixed_and_unjointed() {
        let mut world = PhysicsWorld::new(1.0 / 60.0);
        world.add_floor(0.0);
        world.add_static_box(Vec3::new(0.0, 1.0, 3.0), Vec3::splat(1.0));
        world.step();
        assert!(world.rigid_body_set.iter().all(|(_, body)| body.is_fixed()));
        assert_eq!(world.impulse_joint_set.len(), 0);
    }

    #[test]
    fn test_empty_world_steps_without_error() {
        let mut world = PhysicsWorld::new(1.0 / 60.0);
        for _ in 0..100 {
            world.step();
        }
    }
}
