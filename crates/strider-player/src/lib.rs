//! Third-person character control: orbit camera and camera-relative locomotion.
//!
//! Both controllers are plain state structs updated once per tick. They never
//! reference each other; the caller passes the camera yaw into locomotion and
//! the resolved character position into camera placement.

pub mod locomotion;
pub mod orbit_camera;

pub use locomotion::{
    GROUNDED_VELOCITY, LocomotionController, LocomotionState, MovementRequest, move_towards,
    rotate_towards,
};
pub use orbit_camera::{CameraOrientation, CameraTransform, OrbitCamera};
