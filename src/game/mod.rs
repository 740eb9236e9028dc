//! Game Core Module
//!
//! The per-frame simulation for the runner: parallax layers, the player
//! state machine, obstacles and their spawner, AABB collision, and the
//! session state machine that ties them together once per frame.
//!
//! Everything in here is plain data driven by `advance(dt_ms)` calls and
//! knows nothing about textures or the window; the renderer maps this
//! state to draw calls. That split keeps the whole simulation testable
//! headless.

pub mod collision;
pub mod sprite;
pub mod layer;
pub mod player;
pub mod obstacle;
pub mod session;
pub mod renderer;

pub use collision::{Hitbox, Rect};
pub use layer::ScrollingLayer;
pub use obstacle::{Obstacle, ObstacleSpec, Spawner};
pub use player::{Mode, Player, PlayerParams};
pub use session::{GameSession, SessionConfig, SessionState};
pub use sprite::{AnimationSpec, SpriteSequencer};

/// One tick of the reference 60 FPS cadence, in milliseconds.
///
/// The simulation treats speeds and accelerations as per-frame quantities.
/// Passing this value as `dt_ms` makes every motion step a multiply by
/// exactly 1.0, reproducing the fixed-cadence arithmetic the game was tuned
/// against. Real frame deltas are an opt-in (`GameConfig::scale_time`).
pub const FRAME_DT_MS: f32 = 16.67;

/// Convert a frame delta in milliseconds to reference-frame ticks.
pub fn ticks(dt_ms: f32) -> f32 {
    dt_ms / FRAME_DT_MS
}

/// The advance-one-step capability shared by every simulated entity.
///
/// The session fans its update phase out through this interface rather
/// than the concrete types; the renderer has a matching `Draw` trait for
/// the render phase.
pub trait Advance {
    fn advance(&mut self, dt_ms: f32);
}
