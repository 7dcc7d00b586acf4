//! Window push transition

use embedded_graphics::geometry::Point;

/// Frames of an animated push
pub const TRANSITION_FRAMES: u32 = 8;

/// Offsets of a window sliding in from the right edge.
///
/// Yields one offset per frame, easing out towards the final position. The
/// last offset is always `Point::zero()`.
#[derive(Clone, Debug)]
pub struct Transition {
    distance: i32,
    frames: u32,
    frame: u32,
}

impl Transition {
    /// Push transition across `width` pixels
    pub fn push(width: u32, animated: bool) -> Self {
        Self {
            distance: width as i32,
            frames: if animated { TRANSITION_FRAMES } else { 1 },
            frame: 0,
        }
    }
}

impl Iterator for Transition {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.frames {
            return None;
        }
        self.frame += 1;

        // Quadratic ease-out
        let remaining = (self.frames - self.frame) as i32;
        let frames = self.frames as i32;
        let x = self.distance * remaining * remaining / (frames * frames);
        Some(Point::new(x, 0))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.frames - self.frame) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Transition {}
