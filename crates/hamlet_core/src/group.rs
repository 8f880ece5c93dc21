//! Ordered container of live cells.
//!
//! Insertion order is the only ordering. Destroying a cell flags it and
//! removes it from iteration at once, so `children()` is always the live set.

use crate::cells::{Cell, CellId};

/// Receives cells during a draw pass.
pub trait DrawSink {
    /// Render one cell.
    fn draw_cell(&mut self, cell: &Cell);
}

impl DrawSink for Vec<CellId> {
    fn draw_cell(&mut self, cell: &Cell) {
        self.push(cell.id());
    }
}

/// Ordered cell storage with id assignment.
#[derive(Debug, Clone)]
pub struct CellGroup {
    children: Vec<Cell>,
    next_id: CellId,
}

impl Default for CellGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl CellGroup {
    /// Create an empty group. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a cell and return its new id.
    pub fn add(&mut self, mut cell: Cell) -> CellId {
        let id = self.next_id;
        self.next_id += 1;
        cell.id = id;
        cell.destroyed = false;
        self.children.push(cell);
        id
    }

    /// Flag a cell destroyed and remove it, returning the removed cell.
    pub fn destroy(&mut self, id: CellId) -> Option<Cell> {
        let index = self.children.iter().position(|cell| cell.id == id)?;
        let mut cell = self.children.remove(index);
        cell.destroyed = true;
        Some(cell)
    }

    /// Advance every live cell by one frame, in insertion order.
    pub fn update(&mut self) {
        for cell in self.children.iter_mut().filter(|cell| !cell.destroyed) {
            cell.tick();
        }
    }

    /// Hand every live cell to `sink`, in insertion order.
    pub fn draw(&self, sink: &mut dyn DrawSink) {
        for cell in self.children.iter().filter(|cell| !cell.destroyed) {
            sink.draw_cell(cell);
        }
    }

    /// Live cells in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Cell] {
        &self.children
    }

    /// Look up a cell by id.
    #[must_use]
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.children.iter().find(|cell| cell.id == id)
    }

    /// Look up a cell by id for mutation.
    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.children.iter_mut().find(|cell| cell.id == id)
    }

    /// Drop every cell without flagging them. Ids keep counting up.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Number of live cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the group holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
