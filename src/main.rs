use anyhow::Result;
use glam::Vec2;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use crate::config::{GameConfig, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::engine::assets::{AssetLoader, AssetRegistry};
use crate::engine::game_loop::GameLoop;
use crate::engine::input::InputManager;
use crate::engine::renderer::Renderer;
use crate::game::{hud, view, Game, GameCommand};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Adventure Game...");

    let config = GameConfig::default().resolve()?;
    info!("Asset root: {}", config.asset_root.display());

    let mut registry = AssetRegistry::load(AssetLoader::new(&config.asset_root));
    let mut game = Game::new(config.clone(), &mut registry, StdRng::from_entropy());
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window_width,
                config.window_height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        Vec2::new(LOGICAL_WIDTH, LOGICAL_HEIGHT),
    ))?;

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                if physical_size.width == 0 || physical_size.height == 0 {
                    game_loop.pause();
                } else {
                    game_loop.resume();
                    renderer.resize(physical_size);
                }
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Key releases are not delivered while unfocused
                input.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let now = Instant::now();
                let updates = game_loop.begin_frame(now);

                for _ in 0..updates {
                    let command = game.update(now, input.player(), &mut registry);
                    // Each press is seen by exactly one update
                    input.update();

                    if command == Some(GameCommand::Quit) {
                        info!("Quitting...");
                        elwt.exit();
                        return;
                    }
                }

                let frame = view::build_frame(&game, &registry, now);
                if let Err(e) = renderer.render(&frame, &registry) {
                    match e.downcast_ref::<wgpu::SurfaceError>() {
                        Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure();
                        }
                        Some(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory, shutting down");
                            elwt.exit();
                        }
                        _ => warn!("Render error: {e}"),
                    }
                }

                window.set_title(&format!(
                    "{} - {}",
                    config.title,
                    hud::status_line(
                        game.state(),
                        game.player(),
                        game.menu(),
                        game_loop.fps(),
                        now
                    )
                ));
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
