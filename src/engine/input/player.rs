// Action state for the local player

use super::action::Action;
use std::collections::HashSet;

/// Held and just-pressed tracking for every action
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions pressed since the last update (press events)
    just_pressed: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Update input state for a new frame
    /// Call this after every fixed update so each press is seen once
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Forget every pressed action
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }

    /// +1 clockwise, -1 counter-clockwise, 0 when neither or both are held
    pub fn rotate_axis(&self) -> i32 {
        i32::from(self.is_pressed(Action::RotateRight)) - i32::from(self.is_pressed(Action::RotateLeft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Attack);
        assert!(input.is_pressed(Action::Attack));
        assert!(input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Attack);
        input.update();
        input.release(Action::Attack);
        assert!(!input.is_pressed(Action::Attack));
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = PlayerInput::new();
        input.press(Action::Attack);
        input.update();
        assert!(input.is_pressed(Action::Attack));
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_repeat_press_is_not_a_new_edge() {
        let mut input = PlayerInput::new();
        input.press(Action::Attack);
        input.update();
        input.press(Action::Attack);
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new();
        input.release(Action::Attack);
        assert!(!input.is_pressed(Action::Attack));
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveForward);
        input.press(Action::Attack);
        input.reset();

        assert!(!input.is_pressed(Action::MoveForward));
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_rotate_axis() {
        let mut input = PlayerInput::new();
        assert_eq!(input.rotate_axis(), 0);

        input.press(Action::RotateRight);
        assert_eq!(input.rotate_axis(), 1);

        // Opposing keys cancel out
        input.press(Action::RotateLeft);
        assert_eq!(input.rotate_axis(), 0);

        input.release(Action::RotateRight);
        assert_eq!(input.rotate_axis(), -1);
    }
}
