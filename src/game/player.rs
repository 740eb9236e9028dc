//! The player character
//!
//! A three-state machine (Standing, Running, Jumping) with per-frame jump
//! physics, a life counter, and a timed hit-flash. Standing is only the
//! pre-start idle pose; once running has started the character never
//! stands again, landing always re-enters Running.
//!
//! Coordinates: `y` is the sprite's top edge, y grows downward, and
//! `ground_y` is the resting top position. `y <= ground_y` at all times;
//! the character is Jumping exactly while `y < ground_y`.

use super::collision::{Hitbox, Rect};
use super::sprite::{AnimationSpec, SpriteSequencer};
use super::{ticks, Advance};

/// Total duration of the post-hit blink.
pub const FLASH_DURATION_MS: f32 = 1000.0;
/// Length of one blink sub-interval; the sprite is hidden during the even
/// ones (starting hidden registers the hit immediately).
pub const FLASH_BLINK_MS: f32 = 100.0;

/// Movement state. Damage (lives, flash) is orthogonal to this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Standing,
    Running,
    Jumping,
}

/// Everything needed to construct a [`Player`]; plain data so tests build
/// one without touching assets.
#[derive(Debug, Clone)]
pub struct PlayerParams {
    pub x: f32,
    pub ground_y: f32,
    /// Initial vertical velocity applied on jump, px/frame (negative = up).
    pub jump_impulse: f32,
    /// Downward acceleration, px/frame^2.
    pub gravity: f32,
    pub lives: u32,
    pub hitbox: Hitbox,
    pub stand: AnimationSpec,
    pub run: AnimationSpec,
    pub jump: AnimationSpec,
}

pub struct Player {
    pub x: f32,
    y: f32,
    ground_y: f32,
    vertical_velocity: f32,
    jump_impulse: f32,
    gravity: f32,
    mode: Mode,
    seq: SpriteSequencer,
    stand: AnimationSpec,
    run: AnimationSpec,
    jump: AnimationSpec,
    lives: u32,
    starting_lives: u32,
    hitbox: Hitbox,
    /// Elapsed flash time; `None` when the effect is inactive.
    flash_ms: Option<f32>,
}

impl Player {
    pub fn new(params: PlayerParams) -> Self {
        Self {
            x: params.x,
            y: params.ground_y,
            ground_y: params.ground_y,
            vertical_velocity: 0.0,
            jump_impulse: params.jump_impulse,
            gravity: params.gravity,
            mode: Mode::Standing,
            seq: SpriteSequencer::new(),
            stand: params.stand,
            run: params.run,
            jump: params.jump,
            lives: params.lives,
            starting_lives: params.lives,
            hitbox: params.hitbox,
            flash_ms: None,
        }
    }

    /// Back to the session-start state: standing on the ground with full
    /// lives and no active effects.
    pub fn reset(&mut self) {
        self.y = self.ground_y;
        self.vertical_velocity = 0.0;
        self.lives = self.starting_lives;
        self.flash_ms = None;
        self.set_mode(Mode::Standing);
    }

    /// Standing -> Running on the external start signal.
    pub fn start_running(&mut self) {
        if self.mode == Mode::Standing {
            self.set_mode(Mode::Running);
        }
    }

    /// Running -> Jumping on the external jump signal. Ignored while
    /// already airborne: no double jump, no queued jump.
    pub fn jump(&mut self) {
        if self.mode == Mode::Running {
            self.vertical_velocity = self.jump_impulse;
            self.set_mode(Mode::Jumping);
        }
    }

    /// Deduct one life; true signals the terminal hit.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Start (or restart) the hit blink. Re-triggering restarts the timer
    /// rather than stacking effects.
    pub fn flash(&mut self) {
        self.flash_ms = Some(0.0);
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_ms.is_some()
    }

    /// False during the blink-off sub-intervals of an active flash; the
    /// renderer skips the sprite for those frames.
    pub fn sprite_visible(&self) -> bool {
        match self.flash_ms {
            None => true,
            Some(elapsed) => ((elapsed / FLASH_BLINK_MS) as u32) % 2 == 1,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn frame_index(&self) -> usize {
        self.seq.frame_index()
    }

    /// On-screen size of the current animation frame.
    pub fn frame_size(&self) -> (f32, f32) {
        self.current_spec().frame_size()
    }

    /// Absolute collision rectangle for this frame.
    pub fn hitbox_rect(&self) -> Rect {
        self.hitbox.resolve(self.x, self.y)
    }

    fn current_spec(&self) -> &AnimationSpec {
        match self.mode {
            Mode::Standing => &self.stand,
            Mode::Running => &self.run,
            Mode::Jumping => &self.jump,
        }
    }

    /// Mode edges always restart the animation from frame zero.
    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.seq.reset();
    }

    #[cfg(test)]
    fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }
}

impl Advance for Player {
    fn advance(&mut self, dt_ms: f32) {
        let spec = match self.mode {
            Mode::Standing => &self.stand,
            Mode::Running => &self.run,
            Mode::Jumping => &self.jump,
        };
        self.seq.advance(spec, dt_ms);

        if self.mode == Mode::Jumping {
            let t = ticks(dt_ms);
            self.y += self.vertical_velocity * t;
            self.vertical_velocity += self.gravity * t;
            if self.y >= self.ground_y {
                // Landed: clamp and go straight back to running
                self.y = self.ground_y;
                self.vertical_velocity = 0.0;
                self.set_mode(Mode::Running);
            }
        }

        if let Some(elapsed) = self.flash_ms.as_mut() {
            *elapsed += dt_ms;
            if *elapsed >= FLASH_DURATION_MS {
                self.flash_ms = None;
            }
        }
    }
}
