//! Third-person orbit camera: look integration, pitch clamp, and follow placement.

use glam::{EulerRot, Quat, Vec2, Vec3};
use strider_config::{MouseSensitivity, PitchLimits};

/// Camera yaw and pitch in degrees.
///
/// Yaw is unbounded and wraps through the trigonometry; pitch stays inside the
/// camera's [`PitchLimits`] once the camera has ticked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraOrientation {
    pub yaw: f32,
    pub pitch: f32,
}

/// World transform produced by [`OrbitCamera::place`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

/// Orbit camera that trails its target at a fixed distance along its own
/// backward axis.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    orientation: CameraOrientation,
    sensitivity: MouseSensitivity,
    pitch_limits: PitchLimits,
    follow_distance: f32,
    look_input: Vec2,
}

fn axis_sign(invert: bool) -> f32 {
    if invert { -1.0 } else { 1.0 }
}

impl OrbitCamera {
    /// Creates a camera whose follow distance is the current distance between
    /// `camera_position` and `target_position`. Yaw and pitch start at zero.
    #[must_use]
    pub fn new(
        sensitivity: MouseSensitivity,
        pitch_limits: PitchLimits,
        camera_position: Vec3,
        target_position: Vec3,
    ) -> Self {
        Self {
            orientation: CameraOrientation::default(),
            sensitivity,
            pitch_limits,
            follow_distance: camera_position.distance(target_position),
            look_input: Vec2::ZERO,
        }
    }

    /// Stores the latest look delta, replacing any delta not yet consumed.
    pub fn on_look_input(&mut self, delta: Vec2) {
        self.look_input = delta;
    }

    /// Integrates the stored look delta into yaw and pitch, then clamps pitch.
    ///
    /// Must run before [`place`](Self::place) and before locomotion reads
    /// [`yaw`](Self::yaw) in the same tick.
    pub fn tick(&mut self, dt: f32) {
        let s = self.sensitivity;
        self.orientation.yaw +=
            self.look_input.x * s.horizontal * axis_sign(s.invert_horizontal) * dt;
        self.orientation.pitch +=
            self.look_input.y * s.vertical * axis_sign(s.invert_vertical) * dt;
        self.orientation.pitch = self
            .orientation
            .pitch
            .clamp(self.pitch_limits.min, self.pitch_limits.max);
    }

    /// Places the camera behind `target_position`.
    ///
    /// Pass the target's position *after* this tick's movement has been
    /// resolved, otherwise the camera trails one frame behind.
    #[must_use]
    pub fn place(&self, target_position: Vec3) -> CameraTransform {
        let rotation = self.rotation();
        CameraTransform {
            position: target_position - rotation * Vec3::Z * self.follow_distance,
            rotation,
        }
    }

    /// Orientation built from the `(pitch, yaw, 0)` Euler angles.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.orientation.yaw.to_radians(),
            self.orientation.pitch.to_radians(),
            0.0,
        )
    }

    /// Unit vector the camera looks along.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.orientation.yaw
    }

    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.orientation.pitch
    }

    #[must_use]
    pub fn orientation(&self) -> CameraOrientation {
        self.orientation
    }

    /// Distance captured at construction.
    #[must_use]
    pub fn follow_distance(&self) -> f32 {
        self.follow_distance
    }

    /// Look delta that the next tick will integrate.
    #[must_use]
    pub fn look_input(&self) -> Vec2 {
        self.look_input
    }
}
