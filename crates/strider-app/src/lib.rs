//! Frame orchestration for the Strider controller: the per-character rig,
//! the fixed-step clock, and the headless script driver.

pub mod driver;
pub mod game_loop;
pub mod rig;

pub use driver::{RunSummary, run_configured, run_headless};
pub use game_loop::FixedStepLoop;
pub use rig::{CharacterRig, RigFrame};
