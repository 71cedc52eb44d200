// Player entity

use glam::Vec2;
use std::time::Instant;

use crate::config::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::core::math::{clamp, step_toward_zero, steps_to_radians, wrap};
use crate::core::Rect;

use super::animation::{character_sprite_index, FrameTicker};
use super::health::Health;
use super::state::{FacingDirection, PlayerState, PlayerStateMachine};
use super::stats::{PlayerStats, CHAR_SCALE, MAX_ANGLE, MAX_LEAN, SPRITE_HEIGHT, SPRITE_WIDTH};

/// The hero: position, facing, animation, combat and health
#[derive(Debug)]
pub struct Player {
    /// Top-left corner of the sprite in world pixels
    pub position: Vec2,
    /// Facing angle on the 256-step circle
    angle: i32,
    /// Visual tilt, decays toward zero once the player stops turning
    lean: i32,
    /// Set by `rotate`, cleared by `update`
    rotated: bool,
    direction: FacingDirection,

    /// Drawn sprite size (already scaled)
    size: Vec2,
    /// Area the sprite must stay inside
    bounds: Vec2,

    stats: PlayerStats,
    state_machine: PlayerStateMachine,
    animation: FrameTicker,
    health: Health,
}

impl Player {
    /// Create a player at `spawn` whose unscaled sprite measures `sprite_size`
    pub fn new(spawn: Vec2, sprite_size: Vec2) -> Self {
        Self::with_stats(spawn, sprite_size, PlayerStats::default())
    }

    pub fn with_stats(spawn: Vec2, sprite_size: Vec2, stats: PlayerStats) -> Self {
        let mut player = Self {
            position: spawn,
            angle: MAX_ANGLE * 3 / 4,
            lean: 0,
            rotated: false,
            direction: FacingDirection::Forward,
            size: sprite_size * CHAR_SCALE,
            bounds: Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT),
            state_machine: PlayerStateMachine::new(
                stats.attack_cooldown,
                stats.attack_frame_interval,
                stats.attack_frames,
            ),
            animation: FrameTicker::new(stats.animation_frames, stats.animation_interval),
            health: Health::new(&stats),
            stats,
        };
        player.clamp_position();
        player
    }

    /// Nominal sprite size used when no sprite has been loaded
    pub fn default_sprite_size() -> Vec2 {
        Vec2::new(SPRITE_WIDTH as f32, SPRITE_HEIGHT as f32)
    }

    /// Per-update housekeeping: health timers, animation, attack, lean
    pub fn update(&mut self, now: Instant) {
        self.health.update(now);

        if !self.state_machine.state().is_attacking() {
            self.animation.update(now);
        }

        self.state_machine.update(now);

        if !self.rotated {
            self.lean = step_toward_zero(self.lean);
        }
        self.rotated = false;
    }

    pub fn can_attack(&self, now: Instant) -> bool {
        self.state_machine.can_attack(now)
    }

    /// Start a swing; false when mid-swing or cooling down
    pub fn attack(&mut self, now: Instant) -> bool {
        self.state_machine.attack(now)
    }

    /// Move forward (+1) or back (-1) along the facing angle
    pub fn move_along_facing(&mut self, direction: f32) {
        if !self.state_machine.start_running() {
            return;
        }

        let radians = steps_to_radians(self.angle, MAX_ANGLE);
        self.position.x += self.stats.move_speed * radians.cos() * direction;
        self.position.y += self.stats.move_speed * radians.sin() * direction;
        self.direction = FacingDirection::from_move(direction);

        self.clamp_position();
    }

    /// Strictly horizontal step, right (+1) or left (-1), ignoring the angle
    pub fn strafe(&mut self, direction: f32) {
        if !self.state_machine.start_running() {
            return;
        }

        self.position.x += self.stats.move_speed * direction;
        self.direction = FacingDirection::from_strafe(direction);

        self.clamp_position();
    }

    pub fn stop(&mut self) {
        self.state_machine.stop();
    }

    /// Turn clockwise (+1) or counter-clockwise (-1) and lean into the turn
    pub fn rotate(&mut self, direction: i32) {
        self.angle = wrap(self.angle + direction * self.stats.rotation_speed, MAX_ANGLE);
        self.lean = clamp(self.lean + direction, -MAX_LEAN, MAX_LEAN);
        self.rotated = true;
    }

    fn clamp_position(&mut self) {
        let max = (self.bounds - self.size).max(Vec2::ZERO);
        self.position.x = clamp(self.position.x, 0.0, max.x);
        self.position.y = clamp(self.position.y, 0.0, max.y);
    }

    /// Returns true when the hit landed
    pub fn take_damage(&mut self, amount: i32, now: Instant) -> bool {
        self.health.take_damage(amount, now)
    }

    pub fn heal(&mut self, amount: i32) {
        self.health.heal(amount);
    }

    /// Hitbox: the scaled sprite, trimmed on every side
    pub fn collision_rect(&self) -> Rect {
        let width = self.size.x.round() as i32;
        let height = self.size.y.round() as i32;
        Rect::inset_box(self.position, width, height, self.stats.hitbox_inset)
    }

    /// Index of the character sprite for the current pose
    pub fn sprite_index(&self) -> usize {
        character_sprite_index(
            self.state_machine.state(),
            self.direction,
            self.animation.frame(),
            self.state_machine.attack_frame(),
        )
    }

    pub fn draw_opacity(&self, now: Instant) -> f32 {
        self.health.draw_opacity(now)
    }

    pub fn is_visible(&self) -> bool {
        self.health.is_visible()
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn state(&self) -> PlayerState {
        self.state_machine.state()
    }

    pub fn direction(&self) -> FacingDirection {
        self.direction
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn lean(&self) -> i32 {
        self.lean
    }

    pub fn anim_frame(&self) -> usize {
        self.animation.frame()
    }

    pub fn attack_frame(&self) -> usize {
        self.state_machine.attack_frame()
    }

    /// Drawn sprite size
    pub fn size(&self) -> Vec2 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn player() -> Player {
        Player::new(
            Vec2::new(LOGICAL_WIDTH / 2.0, LOGICAL_HEIGHT / 2.0),
            Player::default_sprite_size(),
        )
    }

    #[test]
    fn test_new_player_defaults() {
        let p = player();
        assert_eq!(p.angle(), 192);
        assert_eq!(p.lean(), 0);
        assert_eq!(p.state(), PlayerState::Standing);
        assert_eq!(p.direction(), FacingDirection::Forward);
        assert_eq!(p.health().current(), 100);
        assert!(p.is_visible());
    }

    #[test]
    fn test_move_follows_angle() {
        let mut p = player();
        let start = p.position;

        // 192 steps = 270 degrees: straight up the screen
        p.move_along_facing(1.0);
        assert_relative_eq!(p.position.x, start.x, epsilon = 1e-3);
        assert_relative_eq!(p.position.y, start.y - 3.0, epsilon = 1e-3);
        assert_eq!(p.state(), PlayerState::Running);
        assert_eq!(p.direction(), FacingDirection::Forward);

        p.move_along_facing(-1.0);
        assert_relative_eq!(p.position.y, start.y, epsilon = 1e-3);
        assert_eq!(p.direction(), FacingDirection::Back);
    }

    #[test]
    fn test_strafe_ignores_angle() {
        let mut p = player();
        p.rotate(17);
        let start = p.position;

        p.strafe(-1.0);
        assert_relative_eq!(p.position.x, start.x - 3.0);
        assert_relative_eq!(p.position.y, start.y);
        assert_eq!(p.direction(), FacingDirection::Left);
    }

    #[test]
    fn test_no_movement_while_attacking() {
        let mut p = player();
        let start = p.position;
        assert!(p.attack(Instant::now()));

        p.move_along_facing(1.0);
        p.strafe(1.0);
        p.stop();
        assert_eq!(p.position, start);
        assert_eq!(p.state(), PlayerState::Attacking);
    }

    #[test]
    fn test_rotate_wraps_both_ways() {
        let mut p = player();
        for _ in 0..300 {
            p.rotate(-1);
            assert!((0..MAX_ANGLE).contains(&p.angle()));
        }
        assert_eq!(p.angle(), (192 - 300_i32).rem_euclid(256));

        for _ in 0..1000 {
            p.rotate(3);
            assert!((0..MAX_ANGLE).contains(&p.angle()));
        }
    }

    #[test]
    fn test_lean_clamps_and_decays() {
        let mut p = player();
        for _ in 0..40 {
            p.rotate(1);
        }
        assert_eq!(p.lean(), MAX_LEAN);

        // Turning this update: no decay yet
        let now = Instant::now();
        p.update(now);
        assert_eq!(p.lean(), MAX_LEAN);

        p.update(now);
        assert_eq!(p.lean(), MAX_LEAN - 1);

        for _ in 0..40 {
            p.rotate(-1);
        }
        assert_eq!(p.lean(), -MAX_LEAN);
    }

    #[test]
    fn test_lean_builds_while_turning_each_update() {
        let mut p = player();
        let now = Instant::now();
        for _ in 0..3 {
            p.rotate(-1);
            p.update(now);
        }
        assert_eq!(p.lean(), -3);

        for _ in 0..3 {
            p.update(now);
        }
        assert_eq!(p.lean(), 0);
    }

    #[test]
    fn test_position_stays_in_bounds() {
        let mut p = player();
        let max_x = LOGICAL_WIDTH - p.size().x;
        let max_y = LOGICAL_HEIGHT - p.size().y;

        for step in 0..2000 {
            match step % 5 {
                0 => p.strafe(1.0),
                1 => p.move_along_facing(1.0),
                2 => p.rotate(7),
                3 => p.move_along_facing(-1.0),
                _ => p.strafe(-1.0),
            }
            assert!(p.position.x >= 0.0 && p.position.x <= max_x);
            assert!(p.position.y >= 0.0 && p.position.y <= max_y);
        }

        for _ in 0..1000 {
            p.strafe(1.0);
        }
        assert_relative_eq!(p.position.x, max_x);
    }

    #[test]
    fn test_spawn_outside_bounds_is_clamped() {
        let p = Player::new(Vec2::new(-50.0, 5000.0), Player::default_sprite_size());
        assert_eq!(p.position.x, 0.0);
        assert_relative_eq!(p.position.y, LOGICAL_HEIGHT - p.size().y);
    }

    #[test]
    fn test_animation_paused_while_attacking() {
        let mut p = player();
        let t0 = Instant::now();
        p.update(t0);
        assert_eq!(p.anim_frame(), 1);

        p.attack(t0);
        p.update(t0 + Duration::from_millis(150));
        assert_eq!(p.anim_frame(), 1);
        assert_eq!(p.attack_frame(), 1);
    }

    #[test]
    fn test_attack_sprite_selected() {
        let mut p = player();
        p.move_along_facing(-1.0);
        p.stop();
        assert_eq!(p.sprite_index(), 0);

        p.attack(Instant::now());
        assert_eq!(p.sprite_index(), 20);
    }

    #[test]
    fn test_collision_rect_is_inset() {
        let p = Player::new(Vec2::new(100.0, 200.0), Vec2::new(400.0, 400.0));
        // 400 * 0.15 = 60, minus 4 on each side
        assert_eq!(p.collision_rect(), Rect::new(104, 204, 156, 256));
    }

    #[test]
    fn test_damage_and_heal() {
        let mut p = player();
        let now = Instant::now();
        assert!(p.take_damage(40, now));
        assert!(!p.take_damage(40, now));
        assert_eq!(p.health().current(), 60);

        p.heal(15);
        assert_eq!(p.health().current(), 75);
        assert!(p.is_alive());
    }
}
