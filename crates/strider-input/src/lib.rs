//! Normalized control events, action edge detection, and scripted input playback.
//!
//! Device handling lives outside this crate. Whatever reads the keyboard,
//! mouse or gamepad hands over [`ControlEvent`]s; [`ActionEdges`] turns held
//! levels into the rising edges the controllers react to.

pub mod edges;
pub mod error;
pub mod event;
pub mod script;

pub use edges::{Action, ActionEdges};
pub use error::InputError;
pub use event::ControlEvent;
pub use script::{InputScript, ScriptStep};
