// Enemies: passive contact-damage entities placed by the level

use glam::{Vec2, Vec4};

use crate::core::Rect;

/// Enemy sprite edge length in pixels
pub const ENEMY_SPRITE_SIZE: i32 = 32;

/// Pixels trimmed from each side of the sprite for the hitbox
pub const ENEMY_HITBOX_INSET: i32 = 2;

/// What kind of creature an enemy is
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Goblin,
    Bat,
    Skeleton,
    /// Any other name a map gives an enemy
    Other(String),
}

impl EnemyKind {
    /// Kind from a map object's name (case-insensitive)
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "goblin" => Self::Goblin,
            "bat" => Self::Bat,
            "skeleton" => Self::Skeleton,
            _ => Self::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Goblin => "goblin",
            Self::Bat => "bat",
            Self::Skeleton => "skeleton",
            Self::Other(name) => name,
        }
    }

    /// Placeholder colour the enemy is drawn with
    pub fn color(&self) -> Vec4 {
        match self {
            Self::Bat => Vec4::new(150.0 / 255.0, 0.0, 0.0, 1.0),
            Self::Skeleton => Vec4::new(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0),
            Self::Goblin | Self::Other(_) => Vec4::new(1.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Enemy stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: i32,
    pub speed: f32,
    /// Damage dealt to the player on contact
    pub damage: i32,
}

/// Stats every spawned enemy starts with
pub const DEFAULT_ENEMY_STATS: EnemyStats = EnemyStats {
    health: 30,
    speed: 1.5,
    damage: 10,
};

/// A stationary enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Top-left corner of the sprite
    pub position: Vec2,
    pub health: i32,
    /// Unused: enemies do not move yet
    pub speed: f32,
    pub damage: i32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, position: Vec2) -> Self {
        Self::with_stats(kind, position, DEFAULT_ENEMY_STATS)
    }

    pub fn with_stats(kind: EnemyKind, position: Vec2, stats: EnemyStats) -> Self {
        Self {
            kind,
            position,
            health: stats.health,
            speed: stats.speed,
            damage: stats.damage,
        }
    }

    /// Hitbox: the 32x32 sprite trimmed by two pixels per side
    pub fn collision_rect(&self) -> Rect {
        Rect::inset_box(
            self.position,
            ENEMY_SPRITE_SIZE,
            ENEMY_SPRITE_SIZE,
            ENEMY_HITBOX_INSET,
        )
    }

    /// Drawn sprite size
    pub fn size(&self) -> Vec2 {
        Vec2::splat(ENEMY_SPRITE_SIZE as f32)
    }
}
