/// Frame timing for the event loop
///
/// Gameplay advances in fixed 60 Hz steps; rendering happens once per
/// redraw. `begin_frame` converts wall-clock frame time into a number of
/// fixed updates, so per-update movement stays frame-rate independent.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Target update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of updates per frame to prevent spiral of death
pub const MAX_UPDATES_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Time not yet consumed by fixed updates
    accumulator: Duration,

    last_frame_time: Instant,
    start_time: Instant,

    /// Whether updates are suspended (window minimised)
    paused: bool,

    /// Recent frame durations for the FPS average
    frame_times: VecDeque<Duration>,

    frame_count: u64,
    update_count: u64,
    current_fps: f32,

    /// Time since the previous frame (seconds)
    frame_delta: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a loop whose clock starts at `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            paused: false,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            update_count: 0,
            current_fps: 0.0,
            frame_delta: 0.0,
        }
    }

    /// Begin a new frame at `now`, returns the number of fixed updates to run
    pub fn begin_frame(&mut self, now: Instant) -> u32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.frame_delta = frame_time.as_secs_f32();

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_UPDATES_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Drop the backlog a stalled frame leaves behind
        if updates == MAX_UPDATES_PER_FRAME {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }

        self.update_count += u64::from(updates);
        updates
    }

    /// Get the delta time since the previous frame (in seconds)
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game loop paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game loop resumed");
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.update_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_one_update_per_timestep() {
        let t0 = Instant::now();
        let mut game_loop = GameLoop::starting_at(t0);

        assert_eq!(game_loop.begin_frame(t0 + Duration::from_millis(10)), 0);
        // 10ms + 10ms crosses one timestep
        assert_eq!(game_loop.begin_frame(t0 + Duration::from_millis(20)), 1);
        assert_eq!(game_loop.update_count(), 1);
    }

    #[test]
    fn test_two_updates_for_a_slow_frame() {
        let t0 = Instant::now();
        let mut game_loop = GameLoop::starting_at(t0);
        assert_eq!(game_loop.begin_frame(t0 + Duration::from_millis(34)), 2);
    }

    #[test]
    fn test_max_updates_limit() {
        let t0 = Instant::now();
        let mut game_loop = GameLoop::starting_at(t0);

        // 300ms would allow 18 updates
        let updates = game_loop.begin_frame(t0 + Duration::from_millis(300));
        assert_eq!(updates, MAX_UPDATES_PER_FRAME);

        // The backlog is dropped rather than replayed
        let next = game_loop.begin_frame(t0 + Duration::from_millis(301));
        assert!(next <= 1);
    }

    #[test]
    fn test_paused_no_updates() {
        let t0 = Instant::now();
        let mut game_loop = GameLoop::starting_at(t0);
        game_loop.pause();

        assert_eq!(game_loop.begin_frame(t0 + Duration::from_millis(50)), 0);
        assert_eq!(game_loop.frame_count(), 1);

        game_loop.resume();
        assert!(!game_loop.is_paused());
        assert_eq!(game_loop.begin_frame(t0 + Duration::from_millis(60)), 0);
    }

    #[test]
    fn test_fps_average() {
        let t0 = Instant::now();
        let mut game_loop = GameLoop::starting_at(t0);
        for i in 1..=10 {
            game_loop.begin_frame(t0 + Duration::from_millis(20 * i));
        }
        assert_relative_eq!(game_loop.fps(), 50.0, epsilon = 0.01);
        assert_relative_eq!(game_loop.frame_delta(), 0.02, epsilon = 1e-6);
    }

    #[test]
    fn test_elapsed_time() {
        let t0 = Instant::now();
        let game_loop = GameLoop::starting_at(t0);
        assert_eq!(
            game_loop.elapsed(t0 + Duration::from_millis(10)),
            Duration::from_millis(10)
        );
    }
}
