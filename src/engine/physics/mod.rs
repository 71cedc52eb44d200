// Collision detection: axis-aligned hitbox overlap and the hitbox overlay

mod collision;
mod debug;

pub use collision::{
    all_overlaps, first_overlap, DebugRect, CONTACT_HITBOX_COLOR, ENEMY_HITBOX_COLOR,
    PLAYER_HITBOX_COLOR,
};
pub use debug::DebugRenderer;
