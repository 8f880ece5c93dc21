//! Test fixtures and helpers.
//!
//! Pre-built registries and blueprints for consistent testing.

use fixed::types::I32F32;
use hamlet_core::cells::{BlueprintKind, BuildCost, CellBlueprint, Footprint, Resource};
use hamlet_core::config::RegistryConfig;
use hamlet_core::math::Vec2Fixed;
use hamlet_core::orders::OrderCategory;
use hamlet_core::registry::CellRegistry;
use hamlet_core::viewport::ScreenBounds;

/// Viewport width used by [`standard_registry`].
pub const STANDARD_WIDTH: u32 = 800;

/// Viewport height used by [`standard_registry`].
pub const STANDARD_HEIGHT: u32 = 600;

/// Grid size used by [`standard_registry`].
pub const STANDARD_GRID: u32 = 32;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// Create a pixel position from integers.
#[must_use]
pub fn px(x: i32, y: i32) -> Vec2Fixed {
    Vec2Fixed::from_pixels(x, y)
}

/// 800×600 viewport with a 32px grid.
#[must_use]
pub fn standard_config() -> RegistryConfig {
    RegistryConfig {
        grid_size: STANDARD_GRID,
        viewport: ScreenBounds::new(STANDARD_WIDTH, STANDARD_HEIGHT),
    }
}

/// Started registry over [`standard_config`].
#[must_use]
pub fn standard_registry() -> CellRegistry {
    let mut registry = CellRegistry::new(standard_config()).expect("standard config is valid");
    registry.start();
    registry
}

/// Free building blueprint of the given size.
#[must_use]
pub fn building(id: &str, width: u32, height: u32) -> CellBlueprint {
    CellBlueprint::new(id, id).with_footprint(Footprint::new(width, height))
}

/// Sawmill: 2×1, costs 10 wood.
#[must_use]
pub fn sawmill() -> CellBlueprint {
    building("sawmill", 2, 1).with_cost(BuildCost::free().with(Resource::Wood, 10))
}

/// Wheat crop: 1×1, agricultural orders.
#[must_use]
pub fn wheat() -> CellBlueprint {
    CellBlueprint::new("wheat", "Wheat")
        .with_order_category(OrderCategory::Agriculture)
        .with_kind(BlueprintKind::Crop)
}

/// 1×1 house of the given level and capacity.
#[must_use]
pub fn house(level: u8, capacity: u8) -> CellBlueprint {
    CellBlueprint::new(format!("house_l{level}"), "House")
        .with_order_category(OrderCategory::Housing)
        .with_kind(BlueprintKind::House { capacity, level })
}
