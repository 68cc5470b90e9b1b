//! Frame-coherent edge tracking for level-triggered actions.
//!
//! The binding layer reports whether an action is held. [`ActionEdges`] keeps
//! the held level per action and latches the press/release edges until
//! [`clear_transients`](ActionEdges::clear_transients) runs at the end of a tick.

/// Discrete actions that carry a held level.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Action {
    Jump,
    Sprint,
}

impl Action {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        match self {
            Action::Jump => 0,
            Action::Sprint => 1,
        }
    }
}

/// Per-action press/release tracking for a single tick.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
}

/// Edge latches for every [`Action`].
#[derive(Debug, Clone, Default)]
pub struct ActionEdges {
    buttons: [ButtonFrame; Action::COUNT],
}

impl ActionEdges {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current level of `action`. Returns `true` on a rising edge.
    ///
    /// Repeated reports of the same level are not edges, so a held key that
    /// auto-repeats only fires once.
    pub fn set_level(&mut self, action: Action, pressed: bool) -> bool {
        let button = &mut self.buttons[action.index()];
        let rising = pressed && !button.pressed;
        let falling = !pressed && button.pressed;
        button.pressed = pressed;
        button.just_pressed |= rising;
        button.just_released |= falling;
        rising
    }

    /// Whether the action is currently held.
    #[must_use]
    pub fn is_pressed(&self, action: Action) -> bool {
        self.buttons[action.index()].pressed
    }

    /// Whether the action went down this tick.
    #[must_use]
    pub fn just_pressed(&self, action: Action) -> bool {
        self.buttons[action.index()].just_pressed
    }

    /// Whether the action went up this tick.
    #[must_use]
    pub fn just_released(&self, action: Action) -> bool {
        self.buttons[action.index()].just_released
    }

    /// Clears per-tick edges; held levels persist.
    pub fn clear_transients(&mut self) {
        for b in &mut self.buttons {
            b.just_pressed = false;
            b.just_released = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_single_edge() {
        let mut edges = ActionEdges::new();
        assert!(edges.set_level(Action::Jump, true));
        assert!(!edges.set_level(Action::Jump, true));
        assert!(!edges.set_level(Action::Jump, true));
        assert!(edges.is_pressed(Action::Jump));
        assert!(edges.just_pressed(Action::Jump));
    }

    #[test]
    fn test_release_then_press_is_new_edge() {
        let mut edges = ActionEdges::new();
        edges.set_level(Action::Jump, true);
        assert!(!edges.set_level(Action::Jump, false));
        assert!(edges.just_released(Action::Jump));
        assert!(edges.set_level(Action::Jump, true));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut edges = ActionEdges::new();
        assert!(!edges.set_level(Action::Sprint, false));
        assert!(!edges.just_released(Action::Sprint));
    }

    #[test]
    fn test_clear_transients_keeps_level() {
        let mut edges = ActionEdges::new();
        edges.set_level(Action::Sprint, true);
        edges.clear_transients();
        assert!(edges.is_pressed(Action::Sprint));
        assert!(!edges.just_pressed(Action::Sprint));
    }

    #[test]
    fn test_actions_are_independent() {
        let mut edges = ActionEdges::new();
        edges.set_level(Action::Sprint, true);
        assert!(!edges.is_pressed(Action::Jump));
        assert!(edges.set_level(Action::Jump, true));
    }
}
