// Game layer: everything specific to this adventure
//
// - `session`: the top-level state machine driven once per fixed update
// - `player`, `enemy`, `level`: the world
// - `menu`, `hud`, `view`: what gets shown for each state

pub mod enemy;
pub mod hud;
pub mod level;
pub mod menu;
pub mod player;
pub mod session;
pub mod state;
pub mod view;

pub use session::{Game, GameCommand};
pub use state::GameState;
