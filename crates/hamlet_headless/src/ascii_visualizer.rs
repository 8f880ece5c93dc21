//! ASCII grid visualizer.
//!
//! Renders the registry's live cells as one character per grid cell for
//! quick terminal review.

use std::collections::BTreeMap;

use hamlet_core::cells::{Cell, CellTag};
use hamlet_core::group::DrawSink;
use hamlet_core::math::grid_cell;
use hamlet_core::registry::CellRegistry;

/// ASCII visualization configuration.
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Show per-kind counts under the map.
    pub show_legend: bool,
    /// Use colored output (ANSI).
    pub use_color: bool,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            show_legend: true,
            use_color: true,
        }
    }
}

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const CYAN: &str = "\x1b[36m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GREEN: &str = "\x1b[32m";
    pub const WHITE: &str = "\x1b[37m";
}

fn tag_char(tag: CellTag) -> char {
    match tag {
        CellTag::Building => '#',
        CellTag::Layout => '+',
        CellTag::Farmland => '"',
        CellTag::House => 'H',
    }
}

fn tag_color(tag: CellTag) -> &'static str {
    match tag {
        CellTag::Building => colors::WHITE,
        CellTag::Layout => colors::CYAN,
        CellTag::Farmland => colors::GREEN,
        CellTag::House => colors::YELLOW,
    }
}

fn tag_name(tag: CellTag) -> &'static str {
    match tag {
        CellTag::Building => "building",
        CellTag::Layout => "layout",
        CellTag::Farmland => "farmland",
        CellTag::House => "house",
    }
}

/// Character grid filled by a registry draw pass.
struct Canvas {
    columns: usize,
    rows: usize,
    grid_size: u32,
    tiles: Vec<Option<CellTag>>,
    counts: BTreeMap<&'static str, u32>,
}

impl Canvas {
    fn new(columns: usize, rows: usize, grid_size: u32) -> Self {
        Self {
            columns,
            rows,
            grid_size,
            tiles: vec![None; columns * rows],
            counts: BTreeMap::new(),
        }
    }
}

impl DrawSink for Canvas {
    fn draw_cell(&mut self, cell: &Cell) {
        let tag = cell.tag();
        *self.counts.entry(tag_name(tag)).or_insert(0) += 1;

        let Some((start_x, start_y)) = grid_cell(cell.position(), self.grid_size) else {
            return;
        };
        let footprint = cell.footprint();
        for dy in 0..footprint.height {
            for dx in 0..footprint.width {
                let x = start_x.saturating_add_unsigned(dx);
                let y = start_y.saturating_add_unsigned(dy);
                if x < 0 || y < 0 || x as usize >= self.columns || y as usize >= self.rows {
                    continue;
                }
                self.tiles[y as usize * self.columns + x as usize] = Some(tag);
            }
        }
    }
}

/// Render the live cells of `registry` as an ASCII map.
pub fn render_ascii(registry: &CellRegistry, config: &AsciiConfig) -> String {
    let grid_size = registry.grid_size();
    let viewport = registry.viewport();
    let columns = (viewport.width / grid_size) as usize;
    let rows = (viewport.height / grid_size) as usize;

    let mut canvas = Canvas::new(columns, rows, grid_size);
    registry.draw(&mut canvas);

    let mut output = String::new();
    let border = format!("+{}+\n", "-".repeat(columns));
    output.push_str(&border);
    for row in canvas.tiles.chunks(columns.max(1)).take(rows) {
        output.push('|');
        for tile in row {
            match (tile, config.use_color) {
                (Some(tag), true) => {
                    output.push_str(tag_color(*tag));
                    output.push(tag_char(*tag));
                    output.push_str(colors::RESET);
                }
                (Some(tag), false) => output.push(tag_char(*tag)),
                (None, true) => {
                    output.push_str(colors::DIM);
                    output.push('.');
                    output.push_str(colors::RESET);
                }
                (None, false) => output.push('.'),
            }
        }
        output.push_str("|\n");
    }
    output.push_str(&border);

    if config.show_legend {
        if config.use_color {
            output.push_str(colors::BOLD);
        }
        output.push_str(&format!(
            "{}x{} grid, {}px cells, {} live",
            columns,
            rows,
            grid_size,
            registry.len()
        ));
        if config.use_color {
            output.push_str(colors::RESET);
        }
        output.push('\n');
        for (name, count) in &canvas.counts {
            output.push_str(&format!("  {name}: {count}\n"));
        }
    }

    output
}
