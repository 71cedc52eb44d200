// Player animation timing and sprite selection

use std::time::{Duration, Instant};

use super::state::{FacingDirection, PlayerState};

/// Number of character sprites the registry provides, in fixed order
pub const CHARACTER_SPRITE_COUNT: usize = 36;

/// Frames per run/attack direction in the sprite ordering
pub const FRAMES_PER_DIRECTION: usize = 4;

/// First attack sprite index
const ATTACK_BASE: usize = 20;

/// Looping frame counter advanced on a wall-clock interval
#[derive(Debug, Clone)]
pub struct FrameTicker {
    frame: usize,
    frame_count: usize,
    interval: Duration,
    last_advance: Option<Instant>,
}

impl FrameTicker {
    pub fn new(frame_count: usize, interval: Duration) -> Self {
        Self {
            frame: 0,
            frame_count: frame_count.max(1),
            interval,
            last_advance: None,
        }
    }

    /// Advance one frame if the interval has passed since the last advance
    pub fn update(&mut self, now: Instant) {
        let due = self
            .last_advance
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval);
        if due {
            self.last_advance = Some(now);
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.last_advance = None;
    }
}

/// Index into the character sprite ordering for the given pose.
///
/// Layout: 0-3 standing (back, forward, left, right), 4-19 running
/// (down, forward, right, left; four frames each), 20-35 attacking
/// (down, forward, right, left; four frames each).
pub fn character_sprite_index(
    state: PlayerState,
    direction: FacingDirection,
    anim_frame: usize,
    attack_frame: usize,
) -> usize {
    match state {
        PlayerState::Standing => match direction {
            FacingDirection::Back => 0,
            FacingDirection::Forward => 1,
            FacingDirection::Left => 2,
            FacingDirection::Right => 3,
        },
        PlayerState::Running => {
            let base = match direction {
                FacingDirection::Back => 4,
                FacingDirection::Forward => 8,
                FacingDirection::Right => 12,
                FacingDirection::Left => 16,
            };
            base + anim_frame % FRAMES_PER_DIRECTION
        }
        PlayerState::Attacking => {
            let row = match direction {
                FacingDirection::Back => 0,
                FacingDirection::Forward => 1,
                FacingDirection::Right => 2,
                FacingDirection::Left => 3,
            };
            ATTACK_BASE + row * FRAMES_PER_DIRECTION + attack_frame % FRAMES_PER_DIRECTION
        }
    }
}
