// Game session: state machine, input dispatch and per-update ordering

use glam::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;
use std::time::Instant;

use crate::config::{GameConfig, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::engine::assets::AssetRegistry;
use crate::engine::input::{Action, PlayerInput};
use crate::engine::physics::{all_overlaps, first_overlap};

use super::enemy::Enemy;
use super::level::{create_levels, Level};
use super::menu::{MainMenu, MenuCommand};
use super::player::Player;
use super::state::GameState;

/// Damage dealt by the debug self-hit key
pub const DEBUG_DAMAGE: i32 = 20;

/// Requests from the session to the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Quit,
}

/// Everything that changes while the game runs
pub struct Game {
    config: GameConfig,
    state: GameState,
    rng: StdRng,

    levels: Vec<Level>,
    current_level: usize,

    player: Player,
    /// Unscaled character sprite size
    sprite_size: Vec2,

    menu: MainMenu,
    debug_overlay: bool,

    /// Enemies overlapping the player after the last update
    contacts: Vec<usize>,
}

impl Game {
    /// Build the level set and a player at its spawn, starting at the main menu
    pub fn new(config: GameConfig, registry: &mut AssetRegistry, mut rng: StdRng) -> Self {
        let levels = create_levels(&config, registry, &mut rng);
        let sprite_size = registry.character_size();
        let player = Player::new(spawn_point(levels.first()), sprite_size);

        Self {
            config,
            state: GameState::MainMenu,
            rng,
            levels,
            current_level: 0,
            player,
            sprite_size,
            menu: MainMenu::new(),
            debug_overlay: false,
            contacts: Vec::new(),
        }
    }

    /// One fixed update. Edge-triggered actions are expected to be cleared
    /// by the caller after each call.
    pub fn update(
        &mut self,
        now: Instant,
        input: &PlayerInput,
        registry: &mut AssetRegistry,
    ) -> Option<GameCommand> {
        match self.state {
            GameState::MainMenu => return self.update_menu(input, registry),
            GameState::Playing => self.update_playing(now, input),
            GameState::GameOver => self.update_game_over(input),
        }
        None
    }

    fn update_menu(
        &mut self,
        input: &PlayerInput,
        registry: &mut AssetRegistry,
    ) -> Option<GameCommand> {
        if input.just_pressed(Action::MenuDown) {
            self.menu.move_down();
        } else if input.just_pressed(Action::MenuUp) {
            self.menu.move_up();
        } else if input.just_pressed(Action::Confirm) {
            match self.menu.confirm() {
                MenuCommand::StartGame => self.start_game(registry),
                MenuCommand::LoadGame => info!("Load Game is not available yet"),
                MenuCommand::Options => info!("Options are not available yet"),
                MenuCommand::Quit => {
                    info!("Quit selected from the main menu");
                    return Some(GameCommand::Quit);
                }
            }
        }
        None
    }

    fn update_playing(&mut self, now: Instant, input: &PlayerInput) {
        self.handle_movement(input);

        let rotation = input.rotate_axis();
        if rotation != 0 {
            self.player.rotate(rotation);
        }

        if input.just_pressed(Action::Attack) && self.player.can_attack(now) {
            self.player.attack(now);
        }

        if input.just_pressed(Action::DebugDamage) {
            self.player.take_damage(DEBUG_DAMAGE, now);
        }

        if input.just_pressed(Action::ToggleDebug) {
            self.debug_overlay = !self.debug_overlay;
            info!(
                "Debug overlay {}",
                if self.debug_overlay { "on" } else { "off" }
            );
        }

        self.player.update(now);
        self.check_collisions(now);

        if !self.player.is_alive() {
            info!("Player died");
            self.state = GameState::GameOver;
        }
    }

    /// Each held key moves once; no movement key means standing still
    fn handle_movement(&mut self, input: &PlayerInput) {
        let mut moving = false;

        if input.is_pressed(Action::MoveForward) {
            self.player.move_along_facing(1.0);
            moving = true;
        }
        if input.is_pressed(Action::MoveBack) {
            self.player.move_along_facing(-1.0);
            moving = true;
        }
        if input.is_pressed(Action::StrafeRight) {
            self.player.strafe(1.0);
            moving = true;
        }
        if input.is_pressed(Action::StrafeLeft) {
            self.player.strafe(-1.0);
            moving = true;
        }

        if !moving {
            self.player.stop();
        }
    }

    /// The first touching enemy, in level order, deals its contact damage
    fn check_collisions(&mut self, now: Instant) {
        let Some(level) = self.levels.get(self.current_level) else {
            self.contacts.clear();
            return;
        };

        let player_rect = self.player.collision_rect();
        let enemy_rects = || level.enemies.iter().map(Enemy::collision_rect);

        self.contacts = all_overlaps(&player_rect, enemy_rects());

        if let Some(index) = first_overlap(&player_rect, enemy_rects()) {
            let enemy = &level.enemies[index];
            if self.player.take_damage(enemy.damage, now) {
                debug!(
                    "Hit by {} for {} (health {})",
                    enemy.kind.name(),
                    enemy.damage,
                    self.player.health().current()
                );
            }
        }
    }

    fn update_game_over(&mut self, input: &PlayerInput) {
        if input.just_pressed(Action::Restart) {
            self.restart();
        }
    }

    /// Rebuild the levels and begin at the first one
    fn start_game(&mut self, registry: &mut AssetRegistry) {
        self.levels = create_levels(&self.config, registry, &mut self.rng);
        self.restart();
    }

    /// Fresh player on the first level
    fn restart(&mut self) {
        self.current_level = 0;
        self.player = Player::new(spawn_point(self.levels.first()), self.sprite_size);
        self.contacts.clear();
        self.state = GameState::Playing;
        info!(
            "Starting {}",
            self.level().map_or("without a level", |level| level.name.as_str())
        );
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn level(&self) -> Option<&Level> {
        self.levels.get(self.current_level)
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn menu(&self) -> &MainMenu {
        &self.menu
    }

    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Indices of enemies touching the player
    pub fn contacts(&self) -> &[usize] {
        &self.contacts
    }
}

/// Level's start marker, or the middle of the canvas
fn spawn_point(level: Option<&Level>) -> Vec2 {
    level
        .and_then(|level| level.spawn)
        .unwrap_or(Vec2::new(LOGICAL_WIDTH / 2.0, LOGICAL_HEIGHT / 2.0))
}
