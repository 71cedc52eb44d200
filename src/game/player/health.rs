// Health, invulnerability and the trailing damage queue

use std::collections::VecDeque;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

use super::stats::PlayerStats;

/// FIFO of recent hits, used only to animate hearts breaking.
///
/// The authoritative health value is already reduced when an entry is pushed;
/// entries linger here so the HUD can show the lost hearts for a while.
#[derive(Debug, Default)]
pub struct DamageQueue {
    entries: VecDeque<i32>,
    armed_at: Option<Instant>,
}

impl DamageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit and re-arm the fade timer
    pub fn push(&mut self, amount: i32, now: Instant) {
        self.entries.push_back(amount);
        self.armed_at = Some(now);
    }

    /// Drop the oldest entry once `delay` has passed since the timer was armed
    pub fn update(&mut self, now: Instant, delay: Duration) {
        if self.entries.is_empty() {
            return;
        }

        let elapsed = self
            .armed_at
            .map_or(delay, |armed| now.saturating_duration_since(armed));
        if elapsed < delay {
            return;
        }

        self.entries.pop_front();
        self.armed_at = if self.entries.is_empty() {
            None
        } else {
            Some(now)
        };
    }

    /// Sum of all queued damage
    pub fn total(&self) -> i32 {
        self.entries.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.armed_at = None;
    }
}

/// Hit points plus the post-hit invulnerability window and blink effect
#[derive(Debug)]
pub struct Health {
    current: i32,
    max: i32,

    invulnerable: bool,
    invulnerable_since: Option<Instant>,
    invulnerability_duration: Duration,

    blink_interval: Duration,
    blink_timer: Duration,
    visible: bool,

    last_hit: Option<Instant>,
    last_update: Option<Instant>,

    damage_queue: DamageQueue,
    damage_fade_delay: Duration,
}

impl Health {
    pub fn new(stats: &PlayerStats) -> Self {
        Self {
            current: stats.max_health,
            max: stats.max_health,
            invulnerable: false,
            invulnerable_since: None,
            invulnerability_duration: stats.invulnerability_duration,
            blink_interval: stats.blink_interval,
            blink_timer: Duration::ZERO,
            visible: true,
            last_hit: None,
            last_update: None,
            damage_queue: DamageQueue::new(),
            damage_fade_delay: stats.damage_fade_delay,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn damage_queue(&self) -> &DamageQueue {
        &self.damage_queue
    }

    /// Apply a hit. Returns false when the hit was ignored.
    pub fn take_damage(&mut self, amount: i32, now: Instant) -> bool {
        if amount <= 0 || self.invulnerable || self.current <= 0 {
            return false;
        }

        // Queue the hit points actually lost so the hearts never overshoot
        let before = self.current;
        self.current = self.current.saturating_sub(amount).max(0);
        self.damage_queue.push(before - self.current, now);
        self.last_hit = Some(now);

        self.invulnerable = true;
        self.invulnerable_since = Some(now);

        // Vanish immediately, the next update starts the blink cycle
        self.blink_timer = Duration::ZERO;
        self.visible = false;

        if self.current <= 0 {
            self.die();
        }

        true
    }

    fn die(&mut self) {
        self.current = 0;
        self.visible = false;
    }

    /// Restore hit points, never above the maximum. Non-positive amounts
    /// do nothing.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Advance invulnerability, blinking and the damage queue
    pub fn update(&mut self, now: Instant) {
        let since_last_update = self
            .last_update
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_update = Some(now);

        if self.invulnerable && self.invulnerability_elapsed(now) >= self.invulnerability_duration {
            self.invulnerable = false;
            self.visible = true;
        }

        if self.invulnerable {
            self.blink_timer = self.blink_timer.saturating_sub(since_last_update);
            if self.blink_timer.is_zero() {
                self.visible = !self.visible;
                self.blink_timer = self.blink_interval;
            }
        }

        self.damage_queue.update(now, self.damage_fade_delay);
    }

    fn invulnerability_elapsed(&self, now: Instant) -> Duration {
        self.invulnerable_since
            .map_or(Duration::ZERO, |since| now.saturating_duration_since(since))
    }

    /// Sprite alpha: a flicker while invulnerable, opaque otherwise
    pub fn draw_opacity(&self, now: Instant) -> f32 {
        if !self.invulnerable {
            return 1.0;
        }
        let progress = self.invulnerability_elapsed(now).as_secs_f64()
            / self.invulnerability_duration.as_secs_f64();
        (0.3 + 0.7 * (progress * PI * 10.0).sin().abs()) as f32
    }

    /// Seconds of invulnerability left, zero when not invulnerable
    pub fn invulnerability_remaining(&self, now: Instant) -> f32 {
        if !self.invulnerable {
            return 0.0;
        }
        self.invulnerability_duration
            .saturating_sub(self.invulnerability_elapsed(now))
            .as_secs_f32()
    }

    pub fn invulnerability_duration(&self) -> Duration {
        self.invulnerability_duration
    }

    /// Time since the most recent accepted hit
    pub fn time_since_hit(&self, now: Instant) -> Option<Duration> {
        self.last_hit.map(|hit| now.saturating_duration_since(hit))
    }
}
