//! Input source abstraction
//!
//! Physical key events arrive on the host's schedule, not the
//! simulation's. The host arms an [`InputFrame`] from its event listeners;
//! the core queries it exactly once per tick through two primitives: a
//! level-triggered held check and an edge-triggered newly-pressed check
//! that consumes each press once. Scripted fighters skip the frame
//! entirely and produce an [`Intent`] directly, but both paths feed the
//! same fighter entry point.

use serde::{Deserialize, Serialize};

/// The six logical actions a fighter can be asked to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
    Melee,
    Ranged,
    Dash,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Melee,
        Action::Ranged,
        Action::Dash,
    ];

    fn index(self) -> usize {
        match self {
            Action::Left => 0,
            Action::Right => 1,
            Action::Jump => 2,
            Action::Melee => 3,
            Action::Ranged => 4,
            Action::Dash => 5,
        }
    }
}

/// Who decides a fighter's intent each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlSource {
    Human,
    Scripted,
}

/// Per-fighter input state armed by the host and read by the core
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    held: [bool; 6],
    pressed: [bool; 6],
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host-side: key went down. Records a fresh edge unless the key was
    /// already held (OS key repeat must not re-arm edges).
    pub fn press(&mut self, action: Action) {
        let i = action.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    /// Host-side: key went up
    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    /// Is the action currently held?
    pub fn held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Was the action newly pressed since last consumed? Consumes the edge.
    pub fn take_pressed(&mut self, action: Action) -> bool {
        let i = action.index();
        std::mem::take(&mut self.pressed[i])
    }

    /// Drop all held/pressed state, as on a window focus loss
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One tick's resolved control decision for a fighter
///
/// Movement is level-triggered; jump and the three moves are
/// edge-triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    /// Horizontal movement request in [-1, 1]
    pub move_dir: f32,
    pub jump: bool,
    pub melee: bool,
    pub ranged: bool,
    pub dash: bool,
}

impl Intent {
    /// Build an intent by querying a human input frame
    ///
    /// Consumes the pressed edges for jump/melee/ranged/dash.
    pub fn from_input(input: &mut InputFrame) -> Self {
        let mut move_dir = 0.0;
        if input.held(Action::Left) {
            move_dir -= 1.0;
        }
        if input.held(Action::Right) {
            move_dir += 1.0;
        }
        Self {
            move_dir,
            jump: input.take_pressed(Action::Jump),
            melee: input.take_pressed(Action::Melee),
            ranged: input.take_pressed(Action::Ranged),
            dash: input.take_pressed(Action::Dash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_edge_consumed_once() {
        let mut input = InputFrame::new();
        input.press(Action::Melee);
        assert!(input.take_pressed(Action::Melee));
        assert!(!input.take_pressed(Action::Melee));
        // Still held even after the edge is consumed
        assert!(input.held(Action::Melee));
    }

    #[test]
    fn test_key_repeat_does_not_rearm_edge() {
        let mut input = InputFrame::new();
        input.press(Action::Jump);
        assert!(input.take_pressed(Action::Jump));
        // OS auto-repeat fires press again without a release
        input.press(Action::Jump);
        assert!(!input.take_pressed(Action::Jump));
        // A real release/press cycle re-arms
        input.release(Action::Jump);
        input.press(Action::Jump);
        assert!(input.take_pressed(Action::Jump));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut input = InputFrame::new();
        input.press(Action::Left);
        input.press(Action::Right);
        let intent = Intent::from_input(&mut input);
        assert_eq!(intent.move_dir, 0.0);
    }

    #[test]
    fn test_intent_from_input_reads_all_actions() {
        let mut input = InputFrame::new();
        input.press(Action::Right);
        input.press(Action::Melee);
        input.press(Action::Dash);
        let intent = Intent::from_input(&mut input);
        assert_eq!(intent.move_dir, 1.0);
        assert!(intent.melee);
        assert!(intent.dash);
        assert!(!intent.ranged);
        assert!(!intent.jump);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut input = InputFrame::new();
        input.press(Action::Left);
        input.press(Action::Ranged);
        input.clear();
        assert!(!input.held(Action::Left));
        assert!(!input.take_pressed(Action::Ranged));
    }
}
