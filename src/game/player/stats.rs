// Player stats - fixed tuning values for the hero

use std::time::Duration;

/// Number of steps on the facing-angle circle
pub const MAX_ANGLE: i32 = 256;

/// Bound of the visual lean, in both directions
pub const MAX_LEAN: i32 = 16;

/// Scale applied to character sprites when drawn
pub const CHAR_SCALE: f32 = 0.15;

/// Nominal character sprite size in pixels
pub const SPRITE_WIDTH: u32 = 64;
pub const SPRITE_HEIGHT: u32 = 64;

/// Visual tilt applied per unit of lean (radians)
pub const LEAN_TILT: f32 = 0.01;

/// Fixed player tuning
#[derive(Debug, Clone)]
pub struct PlayerStats {
    // Movement
    /// Displacement per move/strafe call (pixels)
    pub move_speed: f32,
    /// Angle steps per rotate call
    pub rotation_speed: i32,

    // Animation
    /// Time between idle/run animation frames
    pub animation_interval: Duration,
    /// Number of frames in the idle/run cycle
    pub animation_frames: usize,

    // Combat
    /// Minimum time between attack starts
    pub attack_cooldown: Duration,
    /// Time between attack animation frames
    pub attack_frame_interval: Duration,
    /// Number of attack animation frames
    pub attack_frames: usize,

    // Health
    pub max_health: i32,
    /// How long damage is ignored after a hit
    pub invulnerability_duration: Duration,
    /// Visibility toggle period while invulnerable
    pub blink_interval: Duration,
    /// How long a queued damage entry lingers before it is absorbed
    pub damage_fade_delay: Duration,

    // Collision
    /// Pixels trimmed from each side of the sprite for the hitbox
    pub hitbox_inset: i32,
}

/// The hero's tuning
pub const BASE_STATS: PlayerStats = PlayerStats {
    move_speed: 3.0,
    rotation_speed: 1,

    // 10 FPS idle/run cycle
    animation_interval: Duration::from_millis(100),
    animation_frames: 4,

    // 15 FPS swing
    attack_cooldown: Duration::from_millis(500),
    attack_frame_interval: Duration::from_nanos(1_000_000_000 / 15),
    attack_frames: 4,

    max_health: 100,
    invulnerability_duration: Duration::from_secs(2),
    blink_interval: Duration::from_millis(100),
    damage_fade_delay: Duration::from_secs(1),

    hitbox_inset: 4,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}
