// Input manager - turns winit keyboard events into action state

use super::action::InputSource;
use super::config::InputConfigManager;
use super::player::PlayerInput;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Coordinates bindings and the player's action state
#[derive(Debug, Default)]
pub struct InputManager {
    /// Bindings for every context
    config: InputConfigManager,

    /// Action state of the local player
    player: PlayerInput,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_source(InputSource::key(key_code), event.state, event.repeat);
        }
    }

    fn process_source(&mut self, source: InputSource, state: ElementState, repeat: bool) {
        for action in self.config.get_actions(source) {
            match state {
                // Key repeats are not new presses
                ElementState::Pressed if !repeat => self.player.press(action),
                ElementState::Pressed => {}
                ElementState::Released => self.player.release(action),
            }
        }
    }

    /// Clear press/release edges; call after every fixed update
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Current action state
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Drop all held keys; releases that happen while the window is
    /// unfocused never arrive
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_key_press_maps_to_action() {
        let mut manager = InputManager::new();
        manager.process_source(InputSource::key(KeyCode::KeyW), ElementState::Pressed, false);
        assert!(manager.player().is_pressed(Action::MoveForward));

        manager.process_source(InputSource::key(KeyCode::KeyW), ElementState::Released, false);
        assert!(!manager.player().is_pressed(Action::MoveForward));
    }

    #[test]
    fn test_space_presses_attack_and_confirm() {
        let mut manager = InputManager::new();
        manager.process_source(InputSource::key(KeyCode::Space), ElementState::Pressed, false);
        assert!(manager.player().just_pressed(Action::Attack));
        assert!(manager.player().just_pressed(Action::Confirm));
    }

    #[test]
    fn test_repeat_events_ignored() {
        let mut manager = InputManager::new();
        manager.process_source(InputSource::key(KeyCode::KeyH), ElementState::Pressed, true);
        assert!(!manager.player().is_pressed(Action::DebugDamage));
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::new();
        manager.process_source(InputSource::key(KeyCode::KeyQ), ElementState::Pressed, false);
        assert!(!manager.player().is_pressed(Action::Attack));
    }

    #[test]
    fn test_update_clears_just_pressed() {
        let mut manager = InputManager::new();
        manager.process_source(InputSource::key(KeyCode::Space), ElementState::Pressed, false);
        manager.update();
        assert!(!manager.player().just_pressed(Action::Attack));
        assert!(manager.player().is_pressed(Action::Attack));
    }

    #[test]
    fn test_reset_drops_held_keys() {
        let mut manager = InputManager::new();
        manager.process_source(InputSource::key(KeyCode::KeyS), ElementState::Pressed, false);
        manager.process_source(InputSource::key(KeyCode::ArrowLeft), ElementState::Pressed, false);
        manager.reset();

        assert!(!manager.player().is_pressed(Action::MoveBack));
        assert_eq!(manager.player().rotate_axis(), 0);
        assert!(!manager.player().just_pressed(Action::MoveBack));
    }
}
