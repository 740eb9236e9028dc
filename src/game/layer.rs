//! Parallax background layers
//!
//! Each layer scrolls left at its own speed and wraps seamlessly: the
//! renderer draws the image twice, at `offset_x` and `offset_x + width`,
//! so any offset in `(-width, 0]` gives continuous coverage.

use super::{ticks, Advance};

/// One background band with an independent horizontal offset.
///
/// Invariant after every advance: `0 >= offset_x > -width`.
#[derive(Debug, Clone)]
pub struct ScrollingLayer {
    /// Index into the ordered background texture list.
    pub image_index: usize,
    /// Scroll speed in px per reference frame.
    pub speed: f32,
    pub offset_x: f32,
    pub width: f32,
    pub height: f32,
}

impl ScrollingLayer {
    pub fn new(image_index: usize, speed: f32, width: f32, height: f32) -> Self {
        Self { image_index, speed, offset_x: 0.0, width, height }
    }
}

impl Advance for ScrollingLayer {
    fn advance(&mut self, dt_ms: f32) {
        self.offset_x -= self.speed * ticks(dt_ms);
        // Wrap the moment a full image width has scrolled past
        if self.offset_x <= -self.width {
            self.offset_x = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::FRAME_DT_MS;

    #[test]
    fn test_offset_stays_bounded() {
        let mut layer = ScrollingLayer::new(0, 3.5, 800.0, 400.0);
        for _ in 0..10_000 {
            layer.advance(FRAME_DT_MS);
            assert!(layer.offset_x <= 0.0, "offset {} above zero", layer.offset_x);
            assert!(
                layer.offset_x > -layer.width,
                "offset {} crossed -width",
                layer.offset_x
            );
        }
    }

    #[test]
    fn test_wrap_resets_to_exactly_zero() {
        let mut layer = ScrollingLayer::new(0, 5.0, 10.0, 400.0);
        layer.advance(FRAME_DT_MS);
        assert_eq!(layer.offset_x, -5.0);
        // Second step would land on -width exactly; the wrap fires the same
        // step and snaps back to zero.
        layer.advance(FRAME_DT_MS);
        assert_eq!(layer.offset_x, 0.0);
    }

    #[test]
    fn test_fixed_tick_moves_exactly_speed() {
        let mut layer = ScrollingLayer::new(0, 3.0, 800.0, 400.0);
        layer.advance(FRAME_DT_MS);
        assert_eq!(layer.offset_x, -3.0);
    }
}
