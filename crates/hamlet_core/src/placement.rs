//! Placement validation results and ghost previews.

use crate::cells::{CellId, Footprint};
use crate::math::{grid_cell, Vec2Fixed};

/// Result of placement validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementResult {
    /// Placement is valid.
    Valid,
    /// The footprint would leave the viewport.
    OutOfBounds,
    /// One or more live cells sit under the footprint.
    Occupied {
        /// Blocking cells, in the order they were hit.
        cells: Vec<CellId>,
    },
}

impl PlacementResult {
    /// Check if placement is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, PlacementResult::Valid)
    }
}

/// Data for rendering a placement ghost under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Snapped pixel position the cell would occupy.
    pub position: Vec2Fixed,
    /// Footprint being previewed.
    pub footprint: Footprint,
    /// Whether the current placement is valid.
    pub is_valid: bool,
    /// Cells in the way (empty when valid or out of bounds).
    pub blocking: Vec<CellId>,
}

impl PlacementPreview {
    /// Grid indices covered by this preview (empty for a zero grid size).
    #[must_use]
    pub fn footprint_cells(&self, grid_size: u32) -> Vec<(i32, i32)> {
        let Some((start_x, start_y)) = grid_cell(self.position, grid_size) else {
            return Vec::new();
        };
        let mut cells = Vec::new();
        for dy in 0..self.footprint.height {
            for dx in 0..self.footprint.width {
                cells.push((
                    start_x.saturating_add_unsigned(dx),
                    start_y.saturating_add_unsigned(dy),
                ));
            }
        }
        cells
    }
}
