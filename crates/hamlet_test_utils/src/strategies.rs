//! Proptest strategies for property-based testing.
//!
//! Positions are generated on and slightly beyond the standard 800×600
//! viewport so that both in-bounds and out-of-bounds placements get exercised.
//! The `arb_any_*` strategies cover the whole `Fixed` range for overflow checks.

use fixed::types::I32F32;
use hamlet_core::cells::Footprint;
use hamlet_core::math::Vec2Fixed;
use proptest::prelude::*;

use crate::fixtures::{STANDARD_GRID, STANDARD_HEIGHT, STANDARD_WIDTH};

/// A placement or removal step.
#[derive(Debug, Clone)]
pub enum PlacementOp {
    /// Place a building of `footprint` at `position`.
    Place {
        /// Requested pixel position.
        position: Vec2Fixed,
        /// Footprint in grid cells.
        footprint: Footprint,
    },
    /// Destroy the `index`-th live cell (modulo the live count).
    Destroy {
        /// Index into the live list.
        index: usize,
    },
}

/// Grid-aligned pixel position, including a margin outside the viewport.
pub fn arb_grid_position() -> impl Strategy<Value = Vec2Fixed> {
    let grid = STANDARD_GRID as i32;
    let cols = (STANDARD_WIDTH / STANDARD_GRID) as i32;
    let rows = (STANDARD_HEIGHT / STANDARD_GRID) as i32;
    (-2..cols + 2, -2..rows + 2).prop_map(move |(x, y)| Vec2Fixed::from_pixels(x * grid, y * grid))
}

/// Arbitrary pixel position, not necessarily aligned.
///
/// Mostly near the viewport, sometimes pressed against `i32::MAX` pixels
/// where a far-edge sum would overflow.
pub fn arb_pixel_position() -> impl Strategy<Value = Vec2Fixed> {
    let width = STANDARD_WIDTH as i32;
    let height = STANDARD_HEIGHT as i32;
    let extreme = i32::MAX - 1024..=i32::MAX;
    prop_oneof![
        4 => (-64..width + 64, -64..height + 64),
        1 => (extreme.clone(), -64..height + 64),
        1 => (-64..width + 64, extreme),
    ]
    .prop_map(|(x, y)| Vec2Fixed::from_pixels(x, y))
}

/// Any representable position, fractional bits included.
pub fn arb_any_position() -> impl Strategy<Value = Vec2Fixed> {
    (any::<i64>(), any::<i64>())
        .prop_map(|(x, y)| Vec2Fixed::new(I32F32::from_bits(x), I32F32::from_bits(y)))
}

/// Footprints from 1×1 to 4×4.
pub fn arb_footprint() -> impl Strategy<Value = Footprint> {
    (1u32..=4, 1u32..=4).prop_map(|(w, h)| Footprint::new(w, h))
}

/// Small footprints mixed with ones whose pixel size saturates.
pub fn arb_any_footprint() -> impl Strategy<Value = Footprint> {
    prop_oneof![
        3 => arb_footprint(),
        1 => (1u32..=u32::MAX, 1u32..=4).prop_map(|(w, h)| Footprint::new(w, h)),
        1 => (1u32..=4, 1u32..=u32::MAX).prop_map(|(w, h)| Footprint::new(w, h)),
    ]
}

/// One placement or removal step, weighted towards placement.
pub fn arb_placement_op() -> impl Strategy<Value = PlacementOp> {
    prop_oneof![
        4 => (arb_grid_position(), arb_footprint())
            .prop_map(|(position, footprint)| PlacementOp::Place { position, footprint }),
        1 => any::<usize>().prop_map(|index| PlacementOp::Destroy { index }),
    ]
}

/// A sequence of placement steps.
pub fn arb_placement_ops(max_len: usize) -> impl Strategy<Value = Vec<PlacementOp>> {
    proptest::collection::vec(arb_placement_op(), 0..max_len)
}
