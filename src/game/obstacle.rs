//! Obstacles and their spawn scheduler
//!
//! Obstacles slide left at a fixed per-frame speed and are pruned once
//! their right edge leaves the viewport. The spawner is a deadline owned
//! by the session, compared against session-elapsed simulated time: no
//! global timer handles, cancellation is just session-state mutation, and
//! multiple sessions (tests) never interfere.

use macroquad::rand::gen_range;

use super::collision::{Hitbox, Rect};
use super::{ticks, Advance};

/// Size of one obstacle image from the pool, pre-scaled to screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    pub width: f32,
    pub height: f32,
}

/// A single live hazard.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Leftward speed in px per reference frame.
    pub speed: f32,
    /// Index into the obstacle texture pool.
    pub image_index: usize,
    /// Flips false -> true at most once; guarantees a single life
    /// deduction no matter how many frames the overlap persists.
    pub collided: bool,
    pub hitbox: Hitbox,
}

impl Obstacle {
    /// True once the right edge has passed the left edge of the viewport;
    /// the session then scores and removes it.
    pub fn off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }

    pub fn hitbox_rect(&self) -> Rect {
        self.hitbox.resolve(self.x, self.y)
    }
}

impl Advance for Obstacle {
    fn advance(&mut self, dt_ms: f32) {
        self.x -= self.speed * ticks(dt_ms);
    }
}

/// Deadline-based spawn scheduler.
///
/// While armed, [`Spawner::poll`] reports a firing once the session clock
/// passes the deadline and immediately re-arms with a fresh uniform draw
/// from `[min, max]` milliseconds.
#[derive(Debug, Clone)]
pub struct Spawner {
    min_interval_ms: f32,
    max_interval_ms: f32,
    deadline_ms: Option<f32>,
}

impl Spawner {
    /// Starts disarmed; call [`Spawner::schedule`] when the session starts.
    pub fn new(min_interval_ms: f32, max_interval_ms: f32) -> Self {
        Self { min_interval_ms, max_interval_ms, deadline_ms: None }
    }

    /// Draw the next inter-arrival duration.
    pub fn roll_interval(&self) -> f32 {
        gen_range(self.min_interval_ms, self.max_interval_ms)
    }

    /// Arm (or re-arm) the deadline relative to the session clock.
    pub fn schedule(&mut self, now_ms: f32) {
        self.deadline_ms = Some(now_ms + self.roll_interval());
    }

    /// Disarm; nothing fires until rescheduled.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Returns true when a spawn is due, re-arming for the next one.
    pub fn poll(&mut self, now_ms: f32) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.schedule(now_ms);
                true
            }
            _ => false,
        }
    }
}
