// Player character
//
// This module contains everything related to the hero:
// - Player entity (movement, facing, combat entry points)
// - Fixed tuning values
// - State machine for standing / running / attacking
// - Health, invulnerability and the damage queue
// - Animation timing and sprite selection

pub mod animation;
pub mod health;
#[allow(clippy::module_inception)]
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{character_sprite_index, FrameTicker, CHARACTER_SPRITE_COUNT};
pub use health::{DamageQueue, Health};
pub use player::Player;
pub use state::{FacingDirection, PlayerState, PlayerStateMachine};
pub use stats::{PlayerStats, BASE_STATS, CHAR_SCALE, LEAN_TILT};
