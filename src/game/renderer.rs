//! Render pass
//!
//! Maps simulation state to macroquad draw calls, back to front: layers,
//! obstacles, player, HUD, then whichever overlay the session state asks
//! for. The overlay functions return the clickable control's rectangle so
//! the input wiring in `main` can hit-test the next pointer press.

use macroquad::prelude::*;

use crate::assets::Assets;
use crate::game::collision::Rect;
use crate::game::layer::ScrollingLayer;
use crate::game::obstacle::Obstacle;
use crate::game::player::{Mode, Player};
use crate::game::session::GameSession;

const HUD_FONT_SIZE: f32 = 30.0;
const LIFE_ICON_SIZE: f32 = 24.0;
const BUTTON_W: f32 = 200.0;
const BUTTON_H: f32 = 64.0;

/// Render-one-frame capability, the draw-side counterpart of
/// [`crate::game::Advance`].
pub trait Draw {
    fn draw(&self, assets: &Assets);
}

impl Draw for ScrollingLayer {
    fn draw(&self, assets: &Assets) {
        if let Some(texture) = assets.backgrounds.get(self.image_index) {
            // Twice for the wrap: coverage is continuous for any offset
            // in (-width, 0]
            for x in [self.offset_x, self.offset_x + self.width] {
                draw_texture_ex(
                    texture,
                    x,
                    0.0,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(self.width, self.height)),
                        ..Default::default()
                    },
                );
            }
        }
    }
}

impl Draw for Obstacle {
    fn draw(&self, assets: &Assets) {
        if let Some(texture) = assets.obstacles.get(self.image_index) {
            draw_texture_ex(
                texture,
                self.x,
                self.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(self.width, self.height)),
                    ..Default::default()
                },
            );
        }
    }
}

impl Draw for Player {
    fn draw(&self, assets: &Assets) {
        // Blink-off frames of the hit flash skip the sprite entirely
        if !self.sprite_visible() {
            return;
        }
        let frames = match self.mode() {
            Mode::Standing => &assets.stand,
            Mode::Running => &assets.run,
            Mode::Jumping => &assets.jump,
        };
        if let Some(texture) = frames.get(self.frame_index()) {
            let (w, h) = self.frame_size();
            draw_texture_ex(
                texture,
                self.x,
                self.y(),
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(w, h)),
                    ..Default::default()
                },
            );
        }
    }
}

/// Draw the whole world plus HUD for the current frame.
pub fn draw_session(session: &GameSession, assets: &Assets, debug_hitboxes: bool) {
    clear_background(BLACK);

    let drawables = session
        .layers()
        .iter()
        .map(|l| l as &dyn Draw)
        .chain(session.obstacles().iter().map(|o| o as &dyn Draw))
        .chain(std::iter::once(session.player() as &dyn Draw));
    for d in drawables {
        d.draw(assets);
    }

    if debug_hitboxes {
        let p = session.player().hitbox_rect();
        draw_rectangle_lines(p.x, p.y, p.w, p.h, 2.0, RED);
        for ob in session.obstacles() {
            let r = ob.hitbox_rect();
            draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, BLUE);
        }
    }

    draw_hud(session, assets);
}

fn draw_hud(session: &GameSession, assets: &Assets) {
    draw_text(
        &format!("SCORE {:03}", session.score()),
        16.0,
        34.0,
        HUD_FONT_SIZE,
        WHITE,
    );

    // Remaining lives as a row of icons, right-aligned
    for i in 0..session.lives() {
        let x = screen_width() - 16.0 - (i as f32 + 1.0) * (LIFE_ICON_SIZE + 6.0);
        draw_texture_ex(
            &assets.life_icon,
            x,
            12.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(LIFE_ICON_SIZE, LIFE_ICON_SIZE)),
                ..Default::default()
            },
        );
    }
}

/// Idle overlay: the start control. Returns its bounds for hit-testing.
pub fn draw_start_button() -> Rect {
    let button = centered_button(screen_height() * 0.5 - BUTTON_H * 0.5);
    draw_button(&button, "START");
    button
}

/// Game-over modal: message, score, elapsed time, retry control.
pub fn draw_game_over(session: &GameSession) -> Rect {
    draw_rectangle(
        0.0,
        0.0,
        screen_width(),
        screen_height(),
        Color::new(0.0, 0.0, 0.0, 0.6),
    );

    let cx = screen_width() * 0.5;
    let cy = screen_height() * 0.5;
    draw_text_centered("GAME OVER", cx, cy - 70.0, 48.0, WHITE);
    draw_text_centered(
        &format!("Score: {}", session.score()),
        cx,
        cy - 28.0,
        HUD_FONT_SIZE,
        WHITE,
    );
    draw_text_centered(
        &format!("Time: {:.1}s", session.final_elapsed_ms() / 1000.0),
        cx,
        cy,
        HUD_FONT_SIZE,
        WHITE,
    );

    let button = centered_button(cy + 24.0);
    draw_button(&button, "RETRY");
    button
}

fn centered_button(top: f32) -> Rect {
    Rect::new(screen_width() * 0.5 - BUTTON_W * 0.5, top, BUTTON_W, BUTTON_H)
}

fn draw_button(bounds: &Rect, label: &str) {
    draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, Color::new(0.1, 0.1, 0.15, 0.9));
    draw_rectangle_lines(bounds.x, bounds.y, bounds.w, bounds.h, 3.0, WHITE);
    draw_text_centered(label, bounds.center_x(), bounds.center_y() + 10.0, 36.0, WHITE);
}

fn draw_text_centered(text: &str, cx: f32, baseline_y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, cx - dims.width * 0.5, baseline_y, font_size, color);
}
