//! Fixed-point math and grid geometry.
//!
//! Cell positions live in pixel space but are always snapped to the grid.
//! All coordinates use fixed-point arithmetic so that placement checks give
//! identical answers on every platform.

use fixed::types::I32F32;
use serde::{Deserialize, Serialize};

/// Fixed-point number type for all coordinate math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Default grid cell edge length in pixels.
pub const DEFAULT_GRID_SIZE: u32 = 32;

/// Fixed-point 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec2Fixed {
    /// X coordinate.
    #[serde(with = "fixed_serde")]
    pub x: Fixed,
    /// Y coordinate.
    #[serde(with = "fixed_serde")]
    pub y: Fixed,
}

/// Serde support for fixed-point numbers.
///
/// Serializes fixed-point numbers as their raw bit representation (i64)
/// to preserve exact precision across serialization boundaries.
pub mod fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number as its raw bit representation.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_bits().serialize(serializer)
    }

    /// Deserialize a fixed-point number from its raw bit representation.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = i64::deserialize(deserializer)?;
        Ok(Fixed::from_bits(bits))
    }
}

impl Vec2Fixed {
    /// Create a new fixed-point vector.
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Create a vector from whole pixel coordinates.
    #[must_use]
    pub fn from_pixels(x: i32, y: i32) -> Self {
        Self::new(Fixed::from_num(x), Fixed::from_num(y))
    }

    /// Zero vector.
    pub const ZERO: Self = Self {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    /// Calculate squared distance (avoids sqrt for comparisons).
    ///
    /// Saturates instead of overflowing for very distant points.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> Fixed {
        let dx = self.x.saturating_sub(other.x);
        let dy = self.y.saturating_sub(other.y);
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

impl std::ops::Add for Vec2Fixed {
    type Output = Self;

    /// Saturates at the fixed-point range instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

// ============================================================================
// Grid Geometry
// ============================================================================

/// Grid edge length as a fixed-point step, `None` for a zero grid.
#[must_use]
pub fn grid_step(grid_size: u32) -> Option<Fixed> {
    (grid_size > 0).then(|| Fixed::saturating_from_num(grid_size))
}

/// Snap a pixel position down to the origin of its grid cell.
///
/// A zero grid size leaves the position unsnapped.
#[must_use]
pub fn to_grid_position(pos: Vec2Fixed, grid_size: u32) -> Vec2Fixed {
    let Some(size) = grid_step(grid_size) else {
        return pos;
    };
    Vec2Fixed::new(
        (pos.x / size).floor().saturating_mul(size),
        (pos.y / size).floor().saturating_mul(size),
    )
}

/// Integer grid cell index containing a pixel position.
///
/// Negative positions map to negative indices (floor division). Returns
/// `None` for a zero grid size.
#[must_use]
pub fn grid_cell(pos: Vec2Fixed, grid_size: u32) -> Option<(i32, i32)> {
    let size = grid_step(grid_size)?;
    Some((
        (pos.x / size).floor().saturating_to_num::<i32>(),
        (pos.y / size).floor().saturating_to_num::<i32>(),
    ))
}

/// Half-open point-in-rectangle test: `[x, x + w) × [y, y + h)`.
#[must_use]
pub fn point_in_rect(point: Vec2Fixed, origin: Vec2Fixed, size: Vec2Fixed) -> bool {
    point.x >= origin.x
        && point.y >= origin.y
        && point.x < origin.x.saturating_add(size.x)
        && point.y < origin.y.saturating_add(size.y)
}
