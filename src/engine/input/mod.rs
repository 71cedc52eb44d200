// Input handling system
//
// Keyboard input is translated into game actions through per-context
// bindings, then exposed as pressed / just-pressed state.
//
// ## Architecture
//
// - `action`: Defines game actions, input contexts and default key bindings
// - `config`: Binding tables and remapping
// - `player`: Action state of the local player
// - `manager`: Feeds winit keyboard events through the bindings
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, Action};
//
// let mut input = InputManager::new();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // After each fixed update has read the input
// input.update();
//
// if input.player().just_pressed(Action::Attack) {
//     // Swing!
// }
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, InputContext, InputSource};
pub use config::{InputConfig, InputConfigManager};
pub use manager::InputManager;
pub use player::PlayerInput;
