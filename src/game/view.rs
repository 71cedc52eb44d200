// Builds the renderer's frame from the game session

use glam::{Vec2, Vec4};
use std::time::Instant;

use crate::config::LOGICAL_WIDTH;
use crate::engine::assets::AssetRegistry;
use crate::engine::physics::{DebugRect, CONTACT_HITBOX_COLOR, ENEMY_HITBOX_COLOR, PLAYER_HITBOX_COLOR};
use crate::engine::renderer::{Frame, Sprite};

use super::hud::{self, HeartSlot, HEART_SIZE, INVULNERABILITY_BAR_COLOR};
use super::level::{Level, LevelLayout, TiledMap, TileLookup};
use super::menu::MainMenu;
use super::player::{Player, LEAN_TILT};
use super::session::Game;
use super::state::GameState;

const MENU_BACKGROUND: Vec4 = Vec4::new(30.0 / 255.0, 30.0 / 255.0, 60.0 / 255.0, 1.0);
const GAME_OVER_BACKGROUND: Vec4 = Vec4::new(0x44 as f32 / 255.0, 0x22 as f32 / 255.0, 0x22 as f32 / 255.0, 1.0);
const MENU_SELECTED: Vec4 = Vec4::new(1.0, 200.0 / 255.0, 0.0, 1.0);
const MENU_UNSELECTED: Vec4 = Vec4::ONE;

const MENU_TOP: f32 = 200.0;
const MENU_LINE_SPACING: f32 = 40.0;
const MENU_BAR_SIZE: Vec2 = Vec2::new(320.0, 28.0);

/// Drawn where a map references a tile no tileset provides
const MISSING_TILE_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 128.0 / 255.0);
/// Overlay on enemies touching the player
const CONTACT_HIGHLIGHT_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 128.0 / 255.0);

/// Everything the current state shows, back to front
pub fn build_frame(game: &Game, registry: &AssetRegistry, now: Instant) -> Frame {
    match game.state() {
        GameState::MainMenu => menu_frame(game.menu()),
        GameState::GameOver => Frame::new(GAME_OVER_BACKGROUND),
        GameState::Playing => playing_frame(game, registry, now),
    }
}

fn menu_frame(menu: &MainMenu) -> Frame {
    let mut frame = Frame::new(MENU_BACKGROUND);

    for (i, _) in menu.options().iter().enumerate() {
        let color = if i == menu.selected() {
            MENU_SELECTED
        } else {
            MENU_UNSELECTED
        };
        let position = Vec2::new(
            (LOGICAL_WIDTH - MENU_BAR_SIZE.x) / 2.0,
            MENU_TOP + i as f32 * MENU_LINE_SPACING,
        );
        frame.push(Sprite::solid(position, MENU_BAR_SIZE, color));
    }

    frame
}

fn playing_frame(game: &Game, registry: &AssetRegistry, now: Instant) -> Frame {
    let player = game.player();
    let mut frame = Frame::new(hud::background_color(player.health(), now));

    if let Some(level) = game.level() {
        draw_level(&mut frame, level, game.contacts());
    }
    draw_player(&mut frame, player, registry, now);
    draw_hud(&mut frame, player, registry, now);

    if game.debug_overlay() {
        frame
            .debug_rects
            .push(DebugRect::new(player.collision_rect(), PLAYER_HITBOX_COLOR));
        if let Some(level) = game.level() {
            for (i, enemy) in level.enemies.iter().enumerate() {
                let color = if game.contacts().contains(&i) {
                    CONTACT_HITBOX_COLOR
                } else {
                    ENEMY_HITBOX_COLOR
                };
                frame
                    .debug_rects
                    .push(DebugRect::new(enemy.collision_rect(), color));
            }
        }
    }

    frame
}

/// Terrain, then enemies, highlighting those in `contacts`
pub fn draw_level(frame: &mut Frame, level: &Level, contacts: &[usize]) {
    match &level.layout {
        LevelLayout::Grid(rows) => {
            let tile = level.tile_size();
            for (y, row) in rows.iter().enumerate() {
                for (x, cell) in row.iter().enumerate() {
                    let position = Vec2::new(x as f32, y as f32) * tile;
                    frame.push(Sprite::solid(position, tile, cell.color()));
                }
            }
        }
        LevelLayout::Tiled(map) => draw_tiled_map(frame, map, &level.tiles),
    }

    for (i, enemy) in level.enemies.iter().enumerate() {
        frame.push(Sprite::solid(enemy.position, enemy.size(), enemy.kind.color()));
        if contacts.contains(&i) {
            frame.push(Sprite::solid(
                enemy.position,
                enemy.size(),
                CONTACT_HIGHLIGHT_COLOR,
            ));
        }
    }
}

fn draw_tiled_map(frame: &mut Frame, map: &TiledMap, tiles: &TileLookup) {
    let tile_size = Vec2::new(map.tile_width as f32, map.tile_height as f32);

    for layer in map.tile_layers().filter(|layer| layer.visible) {
        let tint = Vec4::new(1.0, 1.0, 1.0, layer.opacity);
        for y in 0..layer.height {
            for x in 0..layer.width {
                let gid = layer.gid_at(x, y);
                if gid == 0 {
                    continue;
                }

                let position = Vec2::new(x as f32, y as f32) * tile_size;
                let sprite = match tiles.get(gid) {
                    Some(tile) => Sprite::image(tile.image, position, tile_size)
                        .with_region(&tile.region)
                        .with_color(tint),
                    None => Sprite::solid(position, tile_size, MISSING_TILE_COLOR),
                };
                frame.push(sprite);
            }
        }
    }

    for layer in map.object_layers().filter(|layer| layer.visible) {
        for object in &layer.objects {
            let Some(tile) = tiles.get(object.tile_gid()) else {
                continue;
            };
            let size = Vec2::new(object.width, object.height);
            let size = if size.cmpgt(Vec2::ZERO).all() {
                size
            } else {
                tile.region.size()
            };
            frame.push(
                Sprite::image(tile.image, Vec2::new(object.x, object.y), size)
                    .with_region(&tile.region),
            );
        }
    }
}

/// Current pose, tilted by the lean; nothing while blinked out
fn draw_player(frame: &mut Frame, player: &Player, registry: &AssetRegistry, now: Instant) {
    if !player.is_visible() {
        return;
    }

    let image = registry.character_sprite(player.sprite_index());
    frame.push(
        Sprite::image(image, player.position, player.size())
            .with_rotation(player.lean() as f32 * LEAN_TILT)
            .with_color(Vec4::new(1.0, 1.0, 1.0, player.draw_opacity(now))),
    );
}

fn draw_hud(frame: &mut Frame, player: &Player, registry: &AssetRegistry, now: Instant) {
    let health = player.health();
    let slots = hud::heart_slots(health, now);
    let total = slots.len();

    for (i, slot) in slots.into_iter().enumerate() {
        let position = hud::heart_position(i, total, LOGICAL_WIDTH);
        let size = Vec2::splat(HEART_SIZE);
        match slot {
            HeartSlot::Full => frame.push(Sprite::image(registry.heart(), position, size)),
            HeartSlot::Broken(alpha) => frame.push(
                Sprite::image(registry.broken_heart(), position, size)
                    .with_color(Vec4::new(1.0, 1.0, 1.0, alpha)),
            ),
            HeartSlot::Empty => {}
        }
    }

    if let Some((position, size)) = hud::invulnerability_bar(health, now, LOGICAL_WIDTH) {
        frame.push(Sprite::solid(position, size, INVULNERABILITY_BAR_COLOR));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::engine::assets::{AssetLoader, ImageHandle};
    use crate::engine::input::{Action, PlayerInput};
    use crate::game::enemy::{Enemy, EnemyKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::{Path, PathBuf};

    fn registry() -> AssetRegistry {
        AssetRegistry::load(AssetLoader::new(
            std::env::temp_dir().join("adventure-game-view-no-assets"),
        ))
    }

    fn game(registry: &mut AssetRegistry) -> Game {
        let root = PathBuf::from("/nonexistent/adventure-game");
        let config = GameConfig {
            asset_root: root.clone(),
            maps_dir: root.join("maps"),
            map_path: root.join("maps/map.json"),
            ..GameConfig::default()
        };
        Game::new(config, registry, StdRng::seed_from_u64(9))
    }

    fn tap(game: &mut Game, registry: &mut AssetRegistry, action: Action, now: Instant) {
        let mut input = PlayerInput::new();
        input.press(action);
        game.update(now, &input, registry);
    }

    #[test]
    fn test_menu_frame_highlights_selection() {
        let mut registry = registry();
        let game = game(&mut registry);
        let frame = build_frame(&game, &registry, Instant::now());

        assert_eq!(frame.clear_color, MENU_BACKGROUND);
        assert_eq!(frame.sprites.len(), 4);
        assert_eq!(frame.sprites[0].color, MENU_SELECTED);
        assert_eq!(frame.sprites[1].color, MENU_UNSELECTED);
        assert_eq!(frame.sprites[3].position.y, 320.0);
    }

    #[test]
    fn test_playing_frame_contents() {
        let mut registry = registry();
        let mut game = game(&mut registry);
        let now = Instant::now();
        tap(&mut game, &mut registry, Action::Confirm, now);

        let frame = build_frame(&game, &registry, now);
        assert_eq!(frame.clear_color, hud::BACKGROUND_COLOR);

        // 30x16 grass cells, one goblin, the player, five hearts
        assert_eq!(frame.sprites.len(), 480 + 1 + 1 + 5);
        assert!(frame.debug_rects.is_empty());

        let player = &frame.sprites[481];
        assert_eq!(player.position, game.player().position);
        assert_eq!(player.image, registry.character_sprite(1));

        let heart = frame.sprites.last().unwrap();
        assert_eq!(heart.image, registry.heart());
        assert_eq!(heart.position, Vec2::new(1870.0, 20.0));
    }

    #[test]
    fn test_hit_shows_broken_heart_and_bar() {
        let mut registry = registry();
        let mut game = game(&mut registry);
        let now = Instant::now();
        tap(&mut game, &mut registry, Action::Confirm, now);
        tap(&mut game, &mut registry, Action::DebugDamage, now);

        let frame = build_frame(&game, &registry, now);
        assert_ne!(frame.clear_color, hud::BACKGROUND_COLOR);

        let broken: Vec<_> = frame
            .sprites
            .iter()
            .filter(|s| s.image == registry.broken_heart())
            .collect();
        assert_eq!(broken.len(), 1);
        assert_eq!(frame.sprites.last().unwrap().color, INVULNERABILITY_BAR_COLOR);
    }

    #[test]
    fn test_debug_overlay_outlines_hitboxes() {
        let mut registry = registry();
        let mut game = game(&mut registry);
        let now = Instant::now();
        tap(&mut game, &mut registry, Action::Confirm, now);
        tap(&mut game, &mut registry, Action::ToggleDebug, now);

        let frame = build_frame(&game, &registry, now);
        assert_eq!(frame.debug_rects.len(), 2);
        assert_eq!(frame.debug_rects[0].color, PLAYER_HITBOX_COLOR);
        assert_eq!(frame.debug_rects[1].color, ENEMY_HITBOX_COLOR);
    }

    #[test]
    fn test_game_over_frame() {
        let mut registry = registry();
        let mut game = game(&mut registry);
        let t0 = Instant::now();
        tap(&mut game, &mut registry, Action::Confirm, t0);
        for i in 0..5 {
            let now = t0 + std::time::Duration::from_secs(3 * i);
            game.update(now, &PlayerInput::new(), &mut registry);
            tap(&mut game, &mut registry, Action::DebugDamage, now);
        }

        let frame = build_frame(&game, &registry, t0);
        assert_eq!(frame.clear_color, GAME_OVER_BACKGROUND);
        assert!(frame.sprites.is_empty());
    }

    #[test]
    fn test_tiled_level_missing_tiles_and_contacts() {
        let json = r#"{
            "width": 2, "height": 1, "tilewidth": 32, "tileheight": 32,
            "layers": [
                {"name": "ground", "type": "tilelayer", "data": [0, 7], "width": 2, "height": 1},
                {"name": "hidden", "type": "tilelayer", "data": [7, 7], "width": 2, "height": 1,
                 "visible": false}
            ],
            "tilesets": []
        }"#;
        let mut registry = registry();
        let mut level = Level::from_json_str(
            json,
            Path::new("test.json"),
            "test",
            Path::new("."),
            &mut registry,
        )
        .unwrap();
        level.enemies.push(Enemy::new(EnemyKind::Skeleton, Vec2::new(5.0, 5.0)));

        let mut frame = Frame::new(Vec4::ONE);
        draw_level(&mut frame, &level, &[0]);

        // One missing tile, the enemy, its contact highlight
        assert_eq!(frame.sprites.len(), 3);
        assert_eq!(frame.sprites[0].position, Vec2::new(32.0, 0.0));
        assert_eq!(frame.sprites[0].color, MISSING_TILE_COLOR);
        assert_eq!(frame.sprites[0].image, ImageHandle::SOLID);
        assert_eq!(frame.sprites[1].color, EnemyKind::Skeleton.color());
        assert_eq!(frame.sprites[2].color, CONTACT_HIGHLIGHT_COLOR);
    }
}
