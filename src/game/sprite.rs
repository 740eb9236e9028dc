//! Sprite sequencing
//!
//! A `SpriteSequencer` walks an index through a finite frame list at a
//! fixed cadence. The timer resets to zero on advance rather than keeping
//! the remainder; animation speed is therefore quantized to whole update
//! calls, which is the cadence the art was authored against.

use crate::config::ConfigError;

/// Immutable description of one animation mode: how many frames, how big
/// each frame is on screen, and how long each frame holds.
///
/// The frame images themselves live in [`crate::assets::Assets`]; the
/// simulation only ever needs the count and dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    frame_count: usize,
    frame_w: f32,
    frame_h: f32,
    interval_ms: f32,
}

impl AnimationSpec {
    /// Build a spec, failing fast on an empty frame set or a non-positive
    /// interval. Both are configuration errors with no runtime recovery.
    pub fn new(
        name: &str,
        frame_count: usize,
        frame_w: f32,
        frame_h: f32,
        interval_ms: f32,
    ) -> Result<Self, ConfigError> {
        if frame_count == 0 {
            return Err(ConfigError::EmptyAnimation { name: name.to_string() });
        }
        if interval_ms <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: format!("{name} frame interval"),
                value: interval_ms,
            });
        }
        Ok(Self { frame_count, frame_w, frame_h, interval_ms })
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frame_size(&self) -> (f32, f32) {
        (self.frame_w, self.frame_h)
    }

    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }
}

/// Cursor into an [`AnimationSpec`]'s frame list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteSequencer {
    frame_index: usize,
    timer_ms: f32,
}

impl SpriteSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate frame time; once it reaches the spec's interval, step to
    /// the next frame (wrapping) and zero the timer.
    pub fn advance(&mut self, spec: &AnimationSpec, dt_ms: f32) {
        self.timer_ms += dt_ms;
        if self.timer_ms >= spec.interval_ms {
            self.frame_index = (self.frame_index + 1) % spec.frame_count;
            self.timer_ms = 0.0;
        }
    }

    /// Rewind to the first frame. Called whenever the animation mode
    /// switches.
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.timer_ms = 0.0;
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(frames: usize, interval: f32) -> AnimationSpec {
        AnimationSpec::new("test", frames, 50.0, 50.0, interval).unwrap()
    }

    #[test]
    fn test_empty_frame_set_rejected() {
        assert!(AnimationSpec::new("stand", 0, 50.0, 50.0, 200.0).is_err());
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        assert!(AnimationSpec::new("run", 4, 50.0, 50.0, 0.0).is_err());
        assert!(AnimationSpec::new("run", 4, 50.0, 50.0, -100.0).is_err());
    }

    #[test]
    fn test_under_interval_never_advances() {
        let s = spec(4, 100.0);
        let mut seq = SpriteSequencer::new();
        seq.advance(&s, 40.0);
        seq.advance(&s, 40.0);
        assert_eq!(seq.frame_index(), 0);
    }

    #[test]
    fn test_reaching_interval_advances_exactly_one() {
        let s = spec(4, 100.0);
        let mut seq = SpriteSequencer::new();
        seq.advance(&s, 100.0);
        assert_eq!(seq.frame_index(), 1);
        // Timer reset to zero, not the remainder: a large delta still only
        // buys one frame.
        seq.advance(&s, 250.0);
        assert_eq!(seq.frame_index(), 2);
    }

    #[test]
    fn test_wraps_modulo_length() {
        let s = spec(3, 100.0);
        let mut seq = SpriteSequencer::new();
        for _ in 0..3 {
            seq.advance(&s, 100.0);
        }
        assert_eq!(seq.frame_index(), 0);
    }

    #[test]
    fn test_reset_rewinds() {
        let s = spec(4, 100.0);
        let mut seq = SpriteSequencer::new();
        seq.advance(&s, 100.0);
        seq.advance(&s, 60.0);
        seq.reset();
        assert_eq!(seq.frame_index(), 0);
        // Accumulated partial time is gone too
        seq.advance(&s, 60.0);
        assert_eq!(seq.frame_index(), 0);
    }
}
