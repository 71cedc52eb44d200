// Player state machine

use std::time::{Duration, Instant};

/// Represents the current movement/combat state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Idle on the spot
    #[default]
    Standing,
    /// Moving or strafing
    Running,
    /// Swinging the weapon
    Attacking,
}

impl PlayerState {
    /// Check if movement requests are honoured
    pub fn can_move(&self) -> bool {
        !matches!(self, Self::Attacking)
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self, Self::Attacking)
    }
}

/// Which way the character sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FacingDirection {
    /// Walking away from the camera
    #[default]
    Forward,
    /// Walking toward the camera
    Back,
    Left,
    Right,
}

impl FacingDirection {
    /// Direction tag for a forward/back move
    pub fn from_move(direction: f32) -> Self {
        if direction > 0.0 {
            Self::Forward
        } else {
            Self::Back
        }
    }

    /// Direction tag for a sideways strafe
    pub fn from_strafe(direction: f32) -> Self {
        if direction > 0.0 {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// State machine that handles player state transitions and attack timing
#[derive(Debug)]
pub struct PlayerStateMachine {
    current_state: PlayerState,
    previous_state: PlayerState,
    attack_frame: usize,
    attack_frame_started: Option<Instant>,
    last_attack_started: Option<Instant>,
    attack_cooldown: Duration,
    attack_frame_interval: Duration,
    attack_frames: usize,
}

impl PlayerStateMachine {
    pub fn new(attack_cooldown: Duration, attack_frame_interval: Duration, attack_frames: usize) -> Self {
        Self {
            current_state: PlayerState::Standing,
            previous_state: PlayerState::Standing,
            attack_frame: 0,
            attack_frame_started: None,
            last_attack_started: None,
            attack_cooldown,
            attack_frame_interval,
            attack_frames,
        }
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> PlayerState {
        self.previous_state
    }

    /// Current frame of the attack animation
    pub fn attack_frame(&self) -> usize {
        self.attack_frame
    }

    /// Transition to a new state
    fn transition(&mut self, new_state: PlayerState) {
        if self.current_state != new_state {
            self.previous_state = self.current_state;
            self.current_state = new_state;
        }
    }

    /// Not mid-swing and the cooldown since the last swing has elapsed
    pub fn can_attack(&self, now: Instant) -> bool {
        if self.current_state.is_attacking() {
            return false;
        }
        match self.last_attack_started {
            Some(started) => now.saturating_duration_since(started) >= self.attack_cooldown,
            None => true,
        }
    }

    /// Start a swing; returns false when the request is rejected
    pub fn attack(&mut self, now: Instant) -> bool {
        if !self.can_attack(now) {
            return false;
        }

        self.transition(PlayerState::Attacking);
        self.attack_frame = 0;
        self.attack_frame_started = Some(now);
        self.last_attack_started = Some(now);
        true
    }

    /// Advance the swing animation (called every update)
    pub fn update(&mut self, now: Instant) {
        if !self.current_state.is_attacking() {
            return;
        }

        let Some(started) = self.attack_frame_started else {
            return;
        };

        if now.saturating_duration_since(started) >= self.attack_frame_interval {
            self.attack_frame += 1;
            self.attack_frame_started = Some(now);

            if self.attack_frame >= self.attack_frames {
                self.finish_attack();
            }
        }
    }

    fn finish_attack(&mut self) {
        self.attack_frame = 0;
        self.attack_frame_started = None;
        self.transition(PlayerState::Standing);
    }

    /// Called when a move or strafe is requested
    pub fn start_running(&mut self) -> bool {
        if !self.current_state.can_move() {
            return false;
        }
        self.transition(PlayerState::Running);
        true
    }

    /// Called when no movement input is held
    pub fn stop(&mut self) {
        if !self.current_state.is_attacking() {
            self.transition(PlayerState::Standing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> PlayerStateMachine {
        PlayerStateMachine::new(Duration::from_millis(500), Duration::from_millis(50), 4)
    }

    #[test]
    fn test_initial_state() {
        let sm = machine();
        assert_eq!(sm.state(), PlayerState::Standing);
        assert_eq!(sm.attack_frame(), 0);
    }

    #[test]
    fn test_running_and_stop() {
        let mut sm = machine();
        assert!(sm.start_running());
        assert_eq!(sm.state(), PlayerState::Running);
        assert_eq!(sm.previous_state(), PlayerState::Standing);

        sm.stop();
        assert_eq!(sm.state(), PlayerState::Standing);
    }

    #[test]
    fn test_first_attack_allowed() {
        let mut sm = machine();
        assert!(sm.attack(Instant::now()));
        assert_eq!(sm.state(), PlayerState::Attacking);
    }

    #[test]
    fn test_no_running_while_attacking() {
        let mut sm = machine();
        let t0 = Instant::now();
        sm.attack(t0);

        assert!(!sm.start_running());
        sm.stop();
        assert_eq!(sm.state(), PlayerState::Attacking);
    }

    #[test]
    fn test_attack_takes_four_gated_advances() {
        let mut sm = machine();
        let t0 = Instant::now();
        sm.attack(t0);

        // Not enough time for a frame yet
        sm.update(t0 + Duration::from_millis(10));
        assert_eq!(sm.attack_frame(), 0);

        let mut now = t0;
        for expected in 1..4 {
            now += Duration::from_millis(50);
            sm.update(now);
            assert_eq!(sm.attack_frame(), expected);
            assert_eq!(sm.state(), PlayerState::Attacking);
        }

        now += Duration::from_millis(50);
        sm.update(now);
        assert_eq!(sm.state(), PlayerState::Standing);
        assert_eq!(sm.attack_frame(), 0);
    }

    #[test]
    fn test_attack_cooldown() {
        let mut sm = machine();
        let t0 = Instant::now();
        assert!(sm.attack(t0));

        // Finish the swing quickly
        for i in 1..=4 {
            sm.update(t0 + Duration::from_millis(50 * i));
        }
        assert_eq!(sm.state(), PlayerState::Standing);

        // 400ms after the previous start: still cooling down
        assert!(!sm.attack(t0 + Duration::from_millis(400)));
        assert_eq!(sm.state(), PlayerState::Standing);

        assert!(sm.attack(t0 + Duration::from_millis(500)));
        assert_eq!(sm.state(), PlayerState::Attacking);
    }

    #[test]
    fn test_direction_tags() {
        assert_eq!(FacingDirection::from_move(1.0), FacingDirection::Forward);
        assert_eq!(FacingDirection::from_move(-1.0), FacingDirection::Back);
        assert_eq!(FacingDirection::from_strafe(1.0), FacingDirection::Right);
        assert_eq!(FacingDirection::from_strafe(-1.0), FacingDirection::Left);
    }
}
