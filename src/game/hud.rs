// Heads-up display: hearts, damage flash, invulnerability bar, status line

use glam::{Vec2, Vec4};
use std::time::{Duration, Instant};

use super::menu::{MainMenu, MENU_TITLE, MENU_VERSION};
use super::player::{Health, Player};
use super::state::GameState;

/// Hit points represented by one heart
pub const HP_PER_HEART: i32 = 20;

pub const HEART_SIZE: f32 = 48.0;
pub const HEART_SPACING: f32 = 15.0;
pub const HEART_TOP_MARGIN: f32 = 20.0;
pub const HEART_RIGHT_MARGIN: f32 = 50.0;

/// How long lost hearts stay on screen after a hit
const BROKEN_HEART_DURATION: Duration = Duration::from_secs(1);
/// How long the background flashes red after a hit
const DAMAGE_FLASH_DURATION: Duration = Duration::from_millis(250);

const INVULNERABILITY_BAR_HEIGHT: f32 = 8.0;
const INVULNERABILITY_BAR_GAP: f32 = 6.0;

pub const BACKGROUND_COLOR: Vec4 = Vec4::new(250.0 / 255.0, 248.0 / 255.0, 239.0 / 255.0, 1.0);
pub const DAMAGE_FLASH_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 64.0 / 255.0);
pub const INVULNERABILITY_BAR_COLOR: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);

/// How one heart slot is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeartSlot {
    Full,
    /// Lost to a recent hit, drawn with this alpha
    Broken(f32),
    Empty,
}

/// Full hearts and hearts still animating out of the damage queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartCounts {
    pub total: usize,
    pub full: usize,
    pub damaged: usize,
}

impl HeartCounts {
    pub fn new(health: &Health) -> Self {
        let full = health.current() / HP_PER_HEART;
        let damaged = if health.damage_queue().is_empty() {
            0
        } else {
            (health.current() + health.damage_queue().total()) / HP_PER_HEART - full
        };

        Self {
            total: (health.max() / HP_PER_HEART).max(0) as usize,
            full: full.max(0) as usize,
            damaged: damaged.max(0) as usize,
        }
    }
}

/// Slot states, left to right
pub fn heart_slots(health: &Health, now: Instant) -> Vec<HeartSlot> {
    let counts = HeartCounts::new(health);
    let since_hit = health.time_since_hit(now);

    (0..counts.total)
        .map(|i| {
            if i < counts.full {
                return HeartSlot::Full;
            }
            if i >= counts.full + counts.damaged {
                return HeartSlot::Empty;
            }
            match since_hit {
                Some(elapsed) if elapsed < BROKEN_HEART_DURATION => {
                    HeartSlot::Broken(broken_heart_alpha(elapsed))
                }
                _ => HeartSlot::Empty,
            }
        })
        .collect()
}

/// Half-transparent on even tenths of a second
fn broken_heart_alpha(since_hit: Duration) -> f32 {
    if (since_hit.as_secs_f64() * 10.0) as u64 % 2 == 0 {
        0.5
    } else {
        1.0
    }
}

/// Top-left corner of heart `index`, hearts right-aligned on the canvas
pub fn heart_position(index: usize, total: usize, canvas_width: f32) -> Vec2 {
    let from_right = total.saturating_sub(1).saturating_sub(index) as f32;
    Vec2::new(
        canvas_width - HEART_RIGHT_MARGIN - from_right * (HEART_SIZE + HEART_SPACING),
        HEART_TOP_MARGIN,
    )
}

/// Background while playing: red for a moment after each hit
pub fn background_color(health: &Health, now: Instant) -> Vec4 {
    match health.time_since_hit(now) {
        Some(elapsed) if elapsed < DAMAGE_FLASH_DURATION => {
            let a = DAMAGE_FLASH_COLOR.w;
            (BACKGROUND_COLOR * (1.0 - a) + DAMAGE_FLASH_COLOR * a).truncate().extend(1.0)
        }
        _ => BACKGROUND_COLOR,
    }
}

/// Bar under the hearts shrinking with the invulnerability left.
///
/// Returns the bar's top-left corner and size, `None` when not invulnerable.
pub fn invulnerability_bar(health: &Health, now: Instant, canvas_width: f32) -> Option<(Vec2, Vec2)> {
    let remaining = health.invulnerability_remaining(now);
    let duration = health.invulnerability_duration().as_secs_f32();
    if remaining <= 0.0 || duration <= 0.0 {
        return None;
    }

    let total = (health.max() / HP_PER_HEART).max(1) as usize;
    let left = heart_position(0, total, canvas_width);
    let full_width = canvas_width - HEART_RIGHT_MARGIN + HEART_SIZE - left.x;

    Some((
        Vec2::new(left.x, HEART_TOP_MARGIN + HEART_SIZE + INVULNERABILITY_BAR_GAP),
        Vec2::new(full_width * remaining / duration, INVULNERABILITY_BAR_HEIGHT),
    ))
}

/// One-line status shown in the window title
pub fn status_line(state: GameState, player: &Player, menu: &MainMenu, fps: f32, now: Instant) -> String {
    match state {
        GameState::MainMenu => format!(
            "{MENU_TITLE} {MENU_VERSION} | > {}",
            menu.options()[menu.selected()]
        ),
        GameState::Playing => {
            let health = player.health();
            let mut line = format!(
                "{state} | HP {}/{}",
                health.current(),
                health.max()
            );
            if health.is_invulnerable() {
                line.push_str(&format!(
                    " | Invuln: {:.1}s",
                    health.invulnerability_remaining(now)
                ));
            }
            line.push_str(&format!(" | {fps:.0} FPS"));
            line
        }
        GameState::GameOver => format!("{state} | Press R to restart"),
    }
}
