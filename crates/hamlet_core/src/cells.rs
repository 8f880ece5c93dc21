//! Cell entities placed on the grid.
//!
//! A [`Cell`] is one placed thing: a finished building, a layout marker
//! waiting for construction, a farmland plot waiting for planting, or a
//! house. The variant set is closed ([`CellKind`]); per-variant behaviour
//! goes through the [`CellBehavior`] capability trait.

use serde::{Deserialize, Serialize};

use crate::math::{point_in_rect, Fixed, Vec2Fixed};
use crate::orders::OrderCategory;

/// Unique identifier for placed cells.
pub type CellId = u64;

/// Unique identifier for settlers that can live in houses.
pub type HumanId = u64;

// ============================================================================
// Costs
// ============================================================================

/// Stockpiled resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Logs from felled trees.
    Wood,
    /// Quarried stone.
    Stone,
    /// Harvested grain.
    Grain,
    /// Currency.
    Coin,
}

/// Resources consumed to build a cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildCost(pub Vec<(Resource, u32)>);

impl BuildCost {
    /// A cost of nothing.
    #[must_use]
    pub const fn free() -> Self {
        Self(Vec::new())
    }

    /// Add a resource requirement.
    #[must_use]
    pub fn with(mut self, resource: Resource, amount: u32) -> Self {
        self.0.push((resource, amount));
        self
    }

    /// Iterate over `(resource, amount)` requirements.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        self.0.iter().copied()
    }

    /// Check if nothing is required.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.0.iter().all(|&(_, amount)| amount == 0)
    }
}

// ============================================================================
// Footprint
// ============================================================================

/// Size of a cell in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

impl Footprint {
    /// Create a new footprint.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Create a square footprint.
    #[must_use]
    pub const fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Get the total number of grid cells this footprint covers.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.width.saturating_mul(self.height)
    }

    /// Pixel extent of this footprint for a given grid size.
    ///
    /// Saturates at `Fixed::MAX` instead of overflowing.
    #[must_use]
    pub fn pixel_size(&self, grid_size: u32) -> Vec2Fixed {
        let size = Fixed::saturating_from_num(grid_size);
        Vec2Fixed::new(
            Fixed::saturating_from_num(self.width).saturating_mul(size),
            Fixed::saturating_from_num(self.height).saturating_mul(size),
        )
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

// ============================================================================
// Blueprints
// ============================================================================

/// String identifier for a cell type (e.g. `"sawmill"`, `"wheat"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellTypeId(pub String);

impl CellTypeId {
    /// Create a new cell type id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CellTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a blueprint turns into once it exists on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlueprintKind {
    /// Plain building with no extra state.
    Building,
    /// Dwelling that accepts residents.
    House {
        /// Maximum number of residents.
        capacity: u8,
        /// Comfort tier, higher is better.
        level: u8,
    },
    /// Crop planted on farmland.
    Crop,
}

/// Definition of a cell type: what it costs and how much room it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBlueprint {
    /// Type identity.
    pub id: CellTypeId,
    /// Display name.
    pub name: String,
    /// Size in grid cells.
    pub footprint: Footprint,
    /// Resources required to build.
    pub cost: BuildCost,
    /// Labour category for orders targeting this type.
    pub order_category: OrderCategory,
    /// Variant produced on placement.
    pub kind: BlueprintKind,
}

impl CellBlueprint {
    /// Create a plain 1×1 building blueprint with no cost.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CellTypeId::new(id),
            name: name.into(),
            footprint: Footprint::default(),
            cost: BuildCost::free(),
            order_category: OrderCategory::Construction,
            kind: BlueprintKind::Building,
        }
    }

    /// Set the footprint.
    #[must_use]
    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    /// Set the build cost.
    #[must_use]
    pub fn with_cost(mut self, cost: BuildCost) -> Self {
        self.cost = cost;
        self
    }

    /// Set the order category.
    #[must_use]
    pub fn with_order_category(mut self, category: OrderCategory) -> Self {
        self.order_category = category;
        self
    }

    /// Set the blueprint kind.
    #[must_use]
    pub fn with_kind(mut self, kind: BlueprintKind) -> Self {
        self.kind = kind;
        self
    }
}

// ============================================================================
// Variant Payloads
// ============================================================================

/// Per-variant hooks invoked by the registry.
pub trait CellBehavior {
    /// Variant tag.
    fn tag(&self) -> CellTag;

    /// Called once, right before the cell joins the registry.
    fn on_create(&mut self) {}

    /// Called once per frame while the cell is live.
    fn on_update(&mut self) {}
}

/// Marker for a building that has been laid out but not yet built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutCell {
    target: CellBlueprint,
    /// Frames elapsed since the layout was placed.
    pub waiting_ticks: u32,
}

impl LayoutCell {
    /// Wrap a building blueprint pending construction.
    #[must_use]
    pub fn new(target: CellBlueprint) -> Self {
        Self {
            target,
            waiting_ticks: 0,
        }
    }

    /// Blueprint that will replace this layout once built.
    #[must_use]
    pub fn target(&self) -> &CellBlueprint {
        &self.target
    }
}

impl CellBehavior for LayoutCell {
    fn tag(&self) -> CellTag {
        CellTag::Layout
    }

    fn on_create(&mut self) {
        self.waiting_ticks = 0;
    }

    fn on_update(&mut self) {
        self.waiting_ticks = self.waiting_ticks.saturating_add(1);
    }
}

/// Tilled plot waiting for a crop to be planted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmlandCell {
    crop: CellBlueprint,
    /// Frames elapsed since the plot was placed.
    pub growth_ticks: u32,
}

impl FarmlandCell {
    /// Wrap a crop blueprint pending planting.
    #[must_use]
    pub fn new(crop: CellBlueprint) -> Self {
        Self {
            crop,
            growth_ticks: 0,
        }
    }

    /// Crop that will be planted here.
    #[must_use]
    pub fn crop(&self) -> &CellBlueprint {
        &self.crop
    }
}

impl CellBehavior for FarmlandCell {
    fn tag(&self) -> CellTag {
        CellTag::Farmland
    }

    fn on_create(&mut self) {
        self.growth_ticks = 0;
    }

    fn on_update(&mut self) {
        self.growth_ticks = self.growth_ticks.saturating_add(1);
    }
}

/// Dwelling state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseCell {
    /// Comfort tier, higher is better.
    pub level: u8,
    /// Maximum number of residents.
    pub capacity: u8,
    residents: Vec<HumanId>,
}

impl HouseCell {
    /// Create an empty house.
    #[must_use]
    pub fn new(level: u8, capacity: u8) -> Self {
        Self {
            level,
            capacity,
            residents: Vec::new(),
        }
    }

    /// Current residents in arrival order.
    #[must_use]
    pub fn residents(&self) -> &[HumanId] {
        &self.residents
    }

    /// Check if a settler lives here.
    #[must_use]
    pub fn has_human(&self, human: HumanId) -> bool {
        self.residents.contains(&human)
    }

    /// Check if the house would take in a newcomer.
    ///
    /// `None` asks about an unspecified settler. Both forms require a free slot.
    #[must_use]
    pub fn lets_in(&self, _human: Option<HumanId>) -> bool {
        self.residents.len() < usize::from(self.capacity)
    }

    /// Move a settler in.
    ///
    /// Returns `false` if the house is full or the settler already lives here.
    pub fn admit(&mut self, human: HumanId) -> bool {
        if self.has_human(human) || !self.lets_in(Some(human)) {
            return false;
        }
        self.residents.push(human);
        true
    }

    /// Move a settler out. Returns `false` if they did not live here.
    pub fn evict(&mut self, human: HumanId) -> bool {
        let before = self.residents.len();
        self.residents.retain(|&r| r != human);
        self.residents.len() != before
    }
}

impl CellBehavior for HouseCell {
    fn tag(&self) -> CellTag {
        CellTag::House
    }
}

// ============================================================================
// Cell
// ============================================================================

/// Type tag used for filtered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellTag {
    /// Finished building with no extra state.
    Building,
    /// Construction marker.
    Layout,
    /// Farmland plot.
    Farmland,
    /// Dwelling.
    House,
}

/// Variant payload of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    /// Finished building.
    Building,
    /// Construction marker.
    Layout(LayoutCell),
    /// Farmland plot.
    Farmland(FarmlandCell),
    /// Dwelling.
    House(HouseCell),
}

impl CellKind {
    /// Variant tag.
    #[must_use]
    pub fn tag(&self) -> CellTag {
        match self {
            Self::Building => CellTag::Building,
            Self::Layout(layout) => layout.tag(),
            Self::Farmland(farmland) => farmland.tag(),
            Self::House(house) => house.tag(),
        }
    }

    fn behavior_mut(&mut self) -> Option<&mut dyn CellBehavior> {
        match self {
            Self::Building => None,
            Self::Layout(layout) => Some(layout as &mut dyn CellBehavior),
            Self::Farmland(farmland) => Some(farmland as &mut dyn CellBehavior),
            Self::House(house) => Some(house as &mut dyn CellBehavior),
        }
    }
}

/// A placed (or about-to-be-placed) grid entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) id: CellId,
    pub(crate) position: Vec2Fixed,
    pub(crate) destroyed: bool,
    created: bool,
    age_ticks: u32,
    type_id: CellTypeId,
    footprint: Footprint,
    cost: BuildCost,
    order_category: OrderCategory,
    kind: CellKind,
}

impl Cell {
    fn with_kind(blueprint: &CellBlueprint, kind: CellKind) -> Self {
        Self {
            id: 0,
            position: Vec2Fixed::ZERO,
            destroyed: false,
            created: false,
            age_ticks: 0,
            type_id: blueprint.id.clone(),
            footprint: blueprint.footprint,
            cost: blueprint.cost.clone(),
            order_category: blueprint.order_category,
            kind,
        }
    }

    /// Create an unplaced cell straight from a blueprint.
    #[must_use]
    pub fn from_blueprint(blueprint: &CellBlueprint) -> Self {
        let kind = match blueprint.kind {
            BlueprintKind::House { capacity, level } => {
                CellKind::House(HouseCell::new(level, capacity))
            }
            BlueprintKind::Building | BlueprintKind::Crop => CellKind::Building,
        };
        Self::with_kind(blueprint, kind)
    }

    /// Create an unplaced layout marker for a building.
    ///
    /// The marker takes the target's footprint, cost and order category.
    #[must_use]
    pub fn layout(target: &CellBlueprint) -> Self {
        Self::with_kind(target, CellKind::Layout(LayoutCell::new(target.clone())))
    }

    /// Create an unplaced farmland plot for a crop.
    #[must_use]
    pub fn farmland(crop: &CellBlueprint) -> Self {
        Self::with_kind(crop, CellKind::Farmland(FarmlandCell::new(crop.clone())))
    }

    /// Registry-assigned id (0 until placed).
    #[must_use]
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// Snapped pixel origin.
    #[must_use]
    pub const fn position(&self) -> Vec2Fixed {
        self.position
    }

    /// Size in grid cells.
    #[must_use]
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Check if the cell has been removed.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Check if the creation hook has run.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        self.created
    }

    /// Frames this cell has been live.
    #[must_use]
    pub const fn age_ticks(&self) -> u32 {
        self.age_ticks
    }

    /// Type identity (the target type for layout and farmland cells).
    #[must_use]
    pub fn type_id(&self) -> &CellTypeId {
        &self.type_id
    }

    /// Resources needed to build this cell.
    #[must_use]
    pub fn build_cost(&self) -> &BuildCost {
        &self.cost
    }

    /// Labour category for orders on this cell.
    #[must_use]
    pub const fn order_category(&self) -> OrderCategory {
        self.order_category
    }

    /// Variant payload.
    #[must_use]
    pub fn kind(&self) -> &CellKind {
        &self.kind
    }

    /// Mutable variant payload.
    pub fn kind_mut(&mut self) -> &mut CellKind {
        &mut self.kind
    }

    /// Variant tag.
    #[must_use]
    pub fn tag(&self) -> CellTag {
        self.kind.tag()
    }

    /// House payload, if this is a house.
    #[must_use]
    pub fn as_house(&self) -> Option<&HouseCell> {
        match &self.kind {
            CellKind::House(house) => Some(house),
            _ => None,
        }
    }

    /// Mutable house payload, if this is a house.
    pub fn as_house_mut(&mut self) -> Option<&mut HouseCell> {
        match &mut self.kind {
            CellKind::House(house) => Some(house),
            _ => None,
        }
    }

    /// Pixel extent for a given grid size.
    #[must_use]
    pub fn pixel_size(&self, grid_size: u32) -> Vec2Fixed {
        self.footprint.pixel_size(grid_size)
    }

    /// Check if a pixel point falls inside this cell's rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2Fixed, grid_size: u32) -> bool {
        point_in_rect(point, self.position, self.pixel_size(grid_size))
    }

    pub(crate) fn create(&mut self) {
        self.created = true;
        if let Some(behavior) = self.kind.behavior_mut() {
            behavior.on_create();
        }
    }

    pub(crate) fn tick(&mut self) {
        self.age_ticks = self.age_ticks.saturating_add(1);
        if let Some(behavior) = self.kind.behavior_mut() {
            behavior.on_update();
        }
    }
}
