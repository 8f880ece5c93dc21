//! Playable area bounds.

use serde::{Deserialize, Serialize};

use crate::math::Fixed;

/// Current playable width and height in pixels.
pub trait Viewport {
    /// Playable width.
    fn width(&self) -> Fixed;
    /// Playable height.
    fn height(&self) -> Fixed;
}

/// Screen-sized viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBounds {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScreenBounds {
    /// Create viewport bounds.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Change the bounds, e.g. after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl Viewport for ScreenBounds {
    fn width(&self) -> Fixed {
        Fixed::saturating_from_num(self.width)
    }

    fn height(&self) -> Fixed {
        Fixed::saturating_from_num(self.height)
    }
}
