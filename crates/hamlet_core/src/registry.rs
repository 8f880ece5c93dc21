//! The cell registry: owner of every placed cell.
//!
//! The registry answers spatial queries, gates placement on bounds,
//! occupancy and cost, hands build/plant orders to an [`OrderQueue`], and
//! broadcasts the live cell list on every add or destroy.
//!
//! Queries are linear scans in insertion order. Failure is reported with
//! `None`, never by panicking.
//!
//! # Example
//!
//! ```
//! use hamlet_core::prelude::*;
//!
//! let mut registry = CellRegistry::new(RegistryConfig::default())?;
//! registry.start();
//!
//! let sawmill = CellBlueprint::new("sawmill", "Sawmill").with_footprint(Footprint::new(2, 1));
//! let mut orders = OrderBook::new();
//!
//! let layout = registry.build_cell(&sawmill, Some(Vec2Fixed::from_pixels(0, 0)), &mut orders);
//! assert!(layout.is_some());
//! assert_eq!(orders.len(), 1);
//! assert!(!registry.is_empty_at(Vec2Fixed::from_pixels(0, 0), Footprint::new(2, 1)));
//! # Ok::<(), hamlet_core::error::RegistryError>(())
//! ```

use crate::cells::{Cell, CellBlueprint, CellId, CellTag, Footprint, HumanId};
use crate::config::{RegistryConfig, EMPTY_POSITION_ATTEMPTS};
use crate::error::{RegistryError, Result};
use crate::events::{ChangeChannel, SubscriptionId};
use crate::group::{CellGroup, DrawSink};
use crate::ledger::ResourceLedger;
use crate::math::{grid_cell, to_grid_position, Fixed, Vec2Fixed};
use crate::orders::{Order, OrderKind, OrderQueue};
use crate::placement::{PlacementPreview, PlacementResult};
use crate::viewport::{ScreenBounds, Viewport};

/// Owned registry of placed cells.
#[derive(Debug)]
pub struct CellRegistry<V = ScreenBounds> {
    config: RegistryConfig,
    viewport: V,
    cells: CellGroup,
    on_changed: ChangeChannel,
    cursor: Vec2Fixed,
    started: bool,
}

impl CellRegistry<ScreenBounds> {
    /// Create a registry using the configured screen bounds as viewport.
    ///
    /// Fails if the configuration does not pass [`RegistryConfig::validate`].
    pub fn new(config: RegistryConfig) -> Result<Self> {
        Self::with_viewport(config, config.viewport)
    }

    /// Change the playable area.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }
}

impl Default for CellRegistry<ScreenBounds> {
    fn default() -> Self {
        let config = RegistryConfig::default();
        Self::assemble(config, config.viewport)
    }
}

impl<V: Viewport> CellRegistry<V> {
    /// Create a registry over a caller-supplied viewport.
    ///
    /// Fails if the configuration does not pass [`RegistryConfig::validate`].
    pub fn with_viewport(config: RegistryConfig, viewport: V) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, viewport))
    }

    fn assemble(config: RegistryConfig, viewport: V) -> Self {
        Self {
            config,
            viewport,
            cells: CellGroup::new(),
            on_changed: ChangeChannel::new(),
            cursor: Vec2Fixed::ZERO,
            started: false,
        }
    }

    /// Configuration this registry was built with.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Grid cell edge length in pixels.
    #[must_use]
    pub fn grid_size(&self) -> u32 {
        self.config.grid_size
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable viewport.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Record the latest cursor position; used when coordinates are omitted.
    pub fn set_cursor(&mut self, position: Vec2Fixed) {
        self.cursor = position;
    }

    /// Last recorded cursor position.
    #[must_use]
    pub fn cursor(&self) -> Vec2Fixed {
        self.cursor
    }

    fn resolve(&self, at: Option<Vec2Fixed>) -> Vec2Fixed {
        at.unwrap_or(self.cursor)
    }

    fn live(&self) -> impl Iterator<Item = &Cell> {
        self.cells.children().iter().filter(|cell| !cell.is_destroyed())
    }

    // ------------------------------------------------------------------------
    // Spatial queries
    // ------------------------------------------------------------------------

    /// First live cell whose rectangle contains `point`.
    #[must_use]
    pub fn cell_at(&self, point: Vec2Fixed) -> Option<&Cell> {
        let grid_size = self.config.grid_size;
        self.live().find(|cell| cell.contains(point, grid_size))
    }

    /// First live cell whose grid-quantized origin matches `point`'s grid cell.
    ///
    /// Only the origin cell is compared, not the whole footprint.
    #[must_use]
    pub fn cell_at_grid(&self, point: Vec2Fixed) -> Option<&Cell> {
        self.cell_at_grid_with(point, self.config.grid_size)
    }

    /// [`Self::cell_at_grid`] with an explicit quantization size.
    ///
    /// A zero `grid_size` matches nothing.
    #[must_use]
    pub fn cell_at_grid_with(&self, point: Vec2Fixed, grid_size: u32) -> Option<&Cell> {
        let target = grid_cell(point, grid_size)?;
        self.live()
            .find(|cell| grid_cell(cell.position(), grid_size) == Some(target))
    }

    /// Validate a footprint at `pos`, reporting why it fails.
    ///
    /// Samples one point per grid cell of the footprint, so positions and
    /// footprints are expected to be grid-aligned. A far edge that cannot be
    /// represented counts as out of bounds.
    #[must_use]
    pub fn check_placement(&self, pos: Vec2Fixed, footprint: Footprint) -> PlacementResult {
        let extent = footprint.pixel_size(self.config.grid_size);
        let within = |start: Fixed, length: Fixed, limit: Fixed| {
            start >= Fixed::ZERO && start.checked_add(length).is_some_and(|end| end <= limit)
        };
        if !within(pos.x, extent.x, self.viewport.width())
            || !within(pos.y, extent.y, self.viewport.height())
        {
            return PlacementResult::OutOfBounds;
        }

        let step = Fixed::saturating_from_num(self.config.grid_size);
        let mut blocking = Vec::new();
        for cy in 0..footprint.height {
            for cx in 0..footprint.width {
                let sample = Vec2Fixed::new(
                    pos.x.saturating_add(Fixed::saturating_from_num(cx).saturating_mul(step)),
                    pos.y.saturating_add(Fixed::saturating_from_num(cy).saturating_mul(step)),
                );
                if let Some(cell) = self.cell_at(sample) {
                    if !blocking.contains(&cell.id()) {
                        blocking.push(cell.id());
                    }
                }
            }
        }

        if blocking.is_empty() {
            PlacementResult::Valid
        } else {
            PlacementResult::Occupied { cells: blocking }
        }
    }

    /// Check if `footprint` fits at `pos`: inside the viewport and clear of live cells.
    #[must_use]
    pub fn is_empty_at(&self, pos: Vec2Fixed, footprint: Footprint) -> bool {
        self.check_placement(pos, footprint).is_valid()
    }

    /// Ghost preview data for placing `footprint` at `pos` (cursor when `None`).
    #[must_use]
    pub fn preview(&self, footprint: Footprint, at: Option<Vec2Fixed>) -> PlacementPreview {
        let pos = self.resolve(at);
        let (is_valid, blocking) = match self.check_placement(pos, footprint) {
            PlacementResult::Valid => (true, Vec::new()),
            PlacementResult::Occupied { cells } => (false, cells),
            PlacementResult::OutOfBounds => (false, Vec::new()),
        };
        PlacementPreview {
            position: to_grid_position(pos, self.config.grid_size),
            footprint,
            is_valid,
            blocking,
        }
    }

    /// Draw candidate points from the generators until one is empty (1×1).
    ///
    /// Each generator is called at most [`EMPTY_POSITION_ATTEMPTS`] times.
    /// Returns `None` when every candidate failed; callers must treat that
    /// as a normal outcome.
    pub fn empty_position<X, Y>(&self, mut x_gen: X, mut y_gen: Y) -> Option<Vec2Fixed>
    where
        X: FnMut() -> Fixed,
        Y: FnMut() -> Fixed,
    {
        for _ in 0..EMPTY_POSITION_ATTEMPTS {
            let candidate = Vec2Fixed::new(x_gen(), y_gen());
            if self.is_empty_at(candidate, Footprint::default()) {
                return Some(candidate);
            }
        }
        None
    }

    /// Live cells of one variant, in insertion order.
    #[must_use]
    pub fn cells_of_kind(&self, tag: CellTag) -> Vec<&Cell> {
        self.live().filter(|cell| cell.tag() == tag).collect()
    }

    /// Houses a settler could go to, ordered for selection.
    ///
    /// A house qualifies if `human` already lives there or it lets the
    /// settler in (an unspecified settler when `human` is `None`). Results are
    /// sorted nearest-first, then stably re-sorted by level, highest first:
    /// level dominates and distance only breaks ties.
    #[must_use]
    pub fn nearest_houses_to(&self, point: Vec2Fixed, human: Option<HumanId>) -> Vec<&Cell> {
        let mut houses: Vec<&Cell> = self
            .live()
            .filter(|cell| {
                cell.as_house().is_some_and(|house| {
                    let resident = human.is_some_and(|h| house.has_human(h));
                    resident || house.lets_in(human)
                })
            })
            .collect();

        houses.sort_by(|a, b| {
            a.position()
                .distance_squared(point)
                .cmp(&b.position().distance_squared(point))
        });
        houses.sort_by(|a, b| house_level(b).cmp(&house_level(a)));
        houses
    }

    // ------------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------------

    /// Place `cell` at `at` (cursor when `None`).
    ///
    /// On success the position is snapped to the grid, the creation hook runs,
    /// the cell joins the registry and subscribers are notified. On failure
    /// nothing changes and the cell is dropped.
    pub fn place_cell(&mut self, mut cell: Cell, at: Option<Vec2Fixed>) -> Option<CellId> {
        let pos = self.resolve(at);
        let footprint = cell.footprint();

        if !self.is_empty_at(pos, footprint) {
            tracing::trace!(
                kind = ?cell.tag(),
                x = %pos.x,
                y = %pos.y,
                "Rejected cell placement"
            );
            return None;
        }

        cell.position = to_grid_position(pos, self.config.grid_size);
        cell.create();
        let id = self.cells.add(cell);

        tracing::debug!(
            cell = id,
            x = %pos.x,
            y = %pos.y,
            width = footprint.width,
            height = footprint.height,
            "Placed cell"
        );

        self.on_changed.notify(self.cells.children());
        Some(id)
    }

    /// Lay out `blueprint` for construction and queue a build order.
    ///
    /// The order is only queued when the layout cell was placed.
    pub fn build_cell(
        &mut self,
        blueprint: &CellBlueprint,
        at: Option<Vec2Fixed>,
        orders: &mut dyn OrderQueue,
    ) -> Option<CellId> {
        self.place_with_order(Cell::layout(blueprint), OrderKind::Build, at, orders)
    }

    /// Till farmland for `crop` and queue a plant order.
    ///
    /// The order is only queued when the farmland cell was placed.
    pub fn plant_cell(
        &mut self,
        crop: &CellBlueprint,
        at: Option<Vec2Fixed>,
        orders: &mut dyn OrderQueue,
    ) -> Option<CellId> {
        self.place_with_order(Cell::farmland(crop), OrderKind::Plant, at, orders)
    }

    fn place_with_order(
        &mut self,
        wrapper: Cell,
        kind: OrderKind,
        at: Option<Vec2Fixed>,
        orders: &mut dyn OrderQueue,
    ) -> Option<CellId> {
        let category = wrapper.order_category();
        let id = self.place_cell(wrapper, at)?;

        tracing::debug!(cell = id, ?kind, ?category, "Queued order");
        orders.enqueue(Order::new(kind, id, category));
        Some(id)
    }

    /// Check if `blueprint` could be built at `at` (cursor when `None`).
    ///
    /// Pure predicate: cost (unless `ignore_cost`) and footprint emptiness.
    #[must_use]
    pub fn can_build_cell(
        &self,
        blueprint: &CellBlueprint,
        at: Option<Vec2Fixed>,
        ledger: &dyn ResourceLedger,
        ignore_cost: bool,
    ) -> bool {
        let pos = self.resolve(at);
        (ignore_cost || ledger.can_afford(&blueprint.cost))
            && self.is_empty_at(pos, blueprint.footprint)
    }

    /// Remove a cell and notify subscribers. Returns the removed cell.
    pub fn destroy_cell(&mut self, id: CellId) -> Result<Cell> {
        let cell = self
            .cells
            .destroy(id)
            .ok_or(RegistryError::CellNotFound(id))?;

        tracing::debug!(cell = id, "Destroyed cell");
        self.on_changed.notify(self.cells.children());
        Ok(cell)
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    /// Subscribe to the live cell list after every add or destroy.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&[Cell]) + 'static,
    {
        self.on_changed.subscribe(subscriber)
    }

    /// Stop receiving change notifications.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.on_changed.unsubscribe(id)
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Mark the registry started. No-op if already started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        tracing::info!(grid_size = self.config.grid_size, "Cell registry started");
    }

    /// Check if [`Self::start`] has been called since the last teardown.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Advance every live cell by one frame.
    pub fn update(&mut self) {
        self.cells.update();
    }

    /// Hand every live cell to `sink`.
    pub fn draw(&self, sink: &mut dyn DrawSink) {
        self.cells.draw(sink);
    }

    /// Tear down: mark not started and drop every cell without notifying.
    pub fn destroy(&mut self) {
        self.started = false;
        let dropped = self.cells.len();
        self.cells.clear();
        tracing::info!(dropped, "Cell registry torn down");
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Live cells in insertion order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        self.cells.children()
    }

    /// Look up a live cell.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Mutate a live cell's payload (e.g. house residents).
    ///
    /// Not a structural change, so no notification is sent.
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id)
    }

    /// Number of live cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cells are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn house_level(cell: &Cell) -> u8 {
    cell.as_house().map_or(0, |house| house.level)
}
