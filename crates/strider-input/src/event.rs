//! Control events delivered by the input-binding layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One normalized input event.
///
/// Axes are already normalized by the binding layer; this crate never sees
/// raw devices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// Look delta for the current tick. Replaces any earlier delta.
    Look(Vec2),
    /// Move intent: `x` strafes, `y` moves forward. Zero means no intent.
    Move(Vec2),
    /// Sprint action level.
    Sprint(bool),
    /// Jump action level. Only the rising edge triggers a jump.
    Jump(bool),
}

impl ControlEvent {
    /// Short label for log fields.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ControlEvent::Look(_) => "look",
            ControlEvent::Move(_) => "move",
            ControlEvent::Sprint(_) => "sprint",
            ControlEvent::Jump(_) => "jump",
        }
    }
}
