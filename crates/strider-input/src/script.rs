//! Tick-stamped input recordings stored as RON.
//!
//! A script is a flat list of `(tick, event)` steps. Steps sharing a tick are
//! delivered in file order before that tick is simulated.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::InputError;
use crate::event::ControlEvent;

/// One scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Tick index (0-based) before which the event is delivered.
    pub tick: u64,
    pub event: ControlEvent,
}

/// Ordered list of scheduled control events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    /// Builds a script, sorting steps by tick while keeping same-tick order.
    #[must_use]
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by_key(|s| s.tick);
        Self { steps }
    }

    /// Parses a script from RON text.
    pub fn from_ron_str(contents: &str) -> Result<Self, InputError> {
        let script: InputScript = ron::from_str(contents).map_err(InputError::ParseError)?;
        Ok(Self::new(script.steps))
    }

    /// Loads a script file.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let contents = std::fs::read_to_string(path).map_err(InputError::ReadError)?;
        let script = Self::from_ron_str(&contents)?;
        info!(
            "Loaded input script {} ({} steps)",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }

    /// Writes the script as pretty RON.
    pub fn save(&self, path: &Path) -> Result<(), InputError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(InputError::SerializeError)?;
        std::fs::write(path, serialized).map_err(InputError::WriteError)
    }

    /// Events scheduled for `tick`, in delivery order.
    pub fn events_at(&self, tick: u64) -> impl Iterator<Item = &ControlEvent> {
        let start = self.steps.partition_point(|s| s.tick < tick);
        self.steps[start..]
            .iter()
            .take_while(move |s| s.tick == tick)
            .map(|s| &s.event)
    }

    /// Tick of the last scheduled event, or `None` for an empty script.
    #[must_use]
    pub fn last_tick(&self) -> Option<u64> {
        self.steps.last().map(|s| s.tick)
    }

    /// Built-in ten-second tour: walk, turn the camera, sprint, jump, strafe,
    /// jump again, and tilt the camera.
    #[must_use]
    pub fn demo(tick_rate: u32) -> Self {
        let rate = u64::from(tick_rate.max(1));
        let at = |seconds: f32| (seconds * rate as f32).round() as u64;
        let step = |tick: u64, event: ControlEvent| ScriptStep { tick, event };

        Self::new(vec![
            step(0, ControlEvent::Move(Vec2::new(0.0, 1.0))),
            step(at(1.0), ControlEvent::Look(Vec2::new(4.5, 0.0))),
            step(at(2.0), ControlEvent::Look(Vec2::ZERO)),
            step(at(3.0), ControlEvent::Sprint(true)),
            step(at(5.0), ControlEvent::Sprint(false)),
            step(at(6.0), ControlEvent::Jump(true)),
            step(at(6.0) + 1, ControlEvent::Jump(false)),
            step(at(7.0), ControlEvent::Move(Vec2::new(1.0, 0.0))),
            step(at(8.0), ControlEvent::Move(Vec2::ZERO)),
            step(at(8.5), ControlEvent::Jump(true)),
            step(at(8.5) + 1, ControlEvent::Jump(false)),
            step(at(9.0), ControlEvent::Look(Vec2::new(0.0, 1.0))),
            step(at(9.5), ControlEvent::Look(Vec2::ZERO)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ron_script() {
        let ron_str = r#"(
            steps: [
                (tick: 10, event: Jump(true)),
                (tick: 0, event: Move((0.0, 1.0))),
                (tick: 10, event: Sprint(true)),
            ],
        )"#;
        let script = InputScript::from_ron_str(ron_str).unwrap();
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[0].event, ControlEvent::Move(Vec2::new(0.0, 1.0)));
        let at_ten: Vec<_> = script.events_at(10).copied().collect();
        assert_eq!(
            at_ten,
            vec![ControlEvent::Jump(true), ControlEvent::Sprint(true)]
        );
    }

    #[test]
    fn test_events_at_empty_tick() {
        let script = InputScript::demo(60);
        assert_eq!(script.events_at(1).count(), 0);
        assert_eq!(script.events_at(0).count(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.ron");
        let script = InputScript::demo(30);
        script.save(&path).unwrap();
        let loaded = InputScript::load(&path).unwrap();
        assert_eq!(script, loaded);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = InputScript::load(&dir.path().join("missing.ron"));
        assert!(matches!(result, Err(InputError::ReadError(_))));
    }

    #[test]
    fn test_invalid_ron_is_parse_error() {
        let result = InputScript::from_ron_str("(steps: [(tick: x)])");
        assert!(matches!(result, Err(InputError::ParseError(_))));
    }

    #[test]
    fn test_demo_scales_with_tick_rate() {
        let script = InputScript::demo(60);
        assert_eq!(script.last_tick(), Some(570));
        let jump_edges = script
            .steps
            .iter()
            .filter(|s| s.event == ControlEvent::Jump(true))
            .count();
        assert_eq!(jump_edges, 2);
    }

    #[test]
    fn test_empty_script_has_no_last_tick() {
        assert_eq!(InputScript::default().last_tick(), None);
        assert!(InputScript::from_ron_str("()").unwrap().steps.is_empty());
    }
}
