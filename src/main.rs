//! TOMB-RUNNER: a parallax side-scrolling runner
//!
//! A cat sprints through a pyramid valley; tombs spawn at randomized
//! intervals and scroll in from the right; jumping clears them, touching
//! them costs a life, surviving them scores. The simulation lives in
//! `game/` as plain data, this file wires it to macroquad's window, frame
//! loop, and input.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod config;
mod game;

use macroquad::prelude::*;

use assets::{frame_dims, Assets};
use config::{ConfigError, GameConfig, CONFIG_PATH};
use game::renderer;
use game::{
    AnimationSpec, GameSession, ObstacleSpec, Player, PlayerParams, ScrollingLayer,
    SessionConfig, SessionState, FRAME_DT_MS,
};

fn window_conf() -> Conf {
    // Window size comes from the same config main loads; fall back to
    // defaults here and let main surface the real error.
    let cfg = GameConfig::load_or_default(CONFIG_PATH).unwrap_or_default();
    Conf {
        window_title: format!("Tomb Runner v{VERSION}"),
        window_width: cfg.window_width,
        window_height: cfg.window_height,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

/// Glue measured texture sizes and config tuning into a session.
fn build_session(cfg: &GameConfig, assets: &Assets) -> Result<GameSession, ConfigError> {
    let (stand_w, stand_h) = frame_dims(&assets.stand);
    let (run_w, run_h) = frame_dims(&assets.run);
    let (jump_w, jump_h) = frame_dims(&assets.jump);
    let stand = AnimationSpec::new("stand", assets.stand.len(), stand_w, stand_h, cfg.stand_interval_ms)?;
    let run = AnimationSpec::new("run", assets.run.len(), run_w, run_h, cfg.run_interval_ms)?;
    let jump = AnimationSpec::new("jump", assets.jump.len(), jump_w, jump_h, cfg.jump_interval_ms)?;

    let ground_line = cfg.window_height as f32;
    let player = Player::new(PlayerParams {
        x: cfg.player_x,
        ground_y: ground_line - run_h,
        jump_impulse: cfg.jump_impulse,
        gravity: cfg.gravity,
        lives: cfg.starting_lives,
        hitbox: cfg.player_hitbox,
        stand,
        run,
        jump,
    });

    let layers = assets
        .backgrounds
        .iter()
        .enumerate()
        .map(|(i, texture)| {
            // Back-most band fills the window; the rest are overlay strips
            let height = if i == 0 { ground_line } else { cfg.overlay_layer_height };
            let speed = cfg.base_layer_speed + i as f32 * cfg.layer_speed_step;
            ScrollingLayer::new(i, speed, texture.width(), height)
        })
        .collect();

    let pool = assets
        .obstacles
        .iter()
        .map(|texture| ObstacleSpec {
            width: texture.width() * cfg.obstacle_scale,
            height: texture.height() * cfg.obstacle_scale,
        })
        .collect();

    Ok(GameSession::new(
        SessionConfig {
            viewport_w: cfg.window_width as f32,
            viewport_h: cfg.window_height as f32,
            obstacle_speed: cfg.obstacle_speed,
            obstacle_hitbox_inset: cfg.obstacle_hitbox_inset,
            spawn_min_ms: cfg.spawn_min_ms,
            spawn_max_ms: cfg.spawn_max_ms,
        },
        layers,
        player,
        pool,
    ))
}

/// Pointer press inside the given control this frame?
fn clicked_in(bounds: &game::Rect) -> bool {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return false;
    }
    let (mx, my) = mouse_position();
    bounds.contains(mx, my)
}

#[macroquad::main(window_conf)]
async fn main() {
    let cfg = match GameConfig::load_or_default(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return;
        }
    };

    let assets = match Assets::load(&cfg.assets).await {
        Ok(assets) => assets,
        Err(e) => {
            eprintln!("asset error: {e}");
            return;
        }
    };

    let mut session = match build_session(&cfg, &assets) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return;
        }
    };

    loop {
        let dt_ms = if cfg.scale_time {
            get_frame_time() * 1000.0
        } else {
            FRAME_DT_MS
        };

        match session.state() {
            SessionState::Idle => {
                // Passive preview: stand cycle only, plus the start control
                session.idle_step(dt_ms);
                renderer::draw_session(&session, &assets, cfg.debug_hitboxes);
                let start = renderer::draw_start_button();
                if clicked_in(&start) {
                    session.start();
                }
            }
            SessionState::Running => {
                if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Up) {
                    session.jump();
                }
                session.step(dt_ms);
                renderer::draw_session(&session, &assets, cfg.debug_hitboxes);
            }
            SessionState::GameOver => {
                // Simulation frozen; keep the last world state under the modal
                renderer::draw_session(&session, &assets, cfg.debug_hitboxes);
                let retry = renderer::draw_game_over(&session);
                if clicked_in(&retry) {
                    session.restart();
                }
            }
        }

        next_frame().await;
    }
}
