//! # Hamlet Core
//!
//! Grid-based cell registry and placement engine for Hamlet.
//!
//! This crate owns the placed "cells" of a settlement (buildings, layout
//! markers, farmland, houses) and contains **only** deterministic logic:
//! - No rendering (draw passes go through [`group::DrawSink`])
//! - No IO (configuration is parsed from strings)
//! - No floating-point math (uses fixed-point)
//!
//! ## Crate Structure
//!
//! - [`registry`] - The cell registry: queries, placement, lifecycle
//! - [`cells`] - Cell entities, blueprints and variant payloads
//! - [`group`] - Ordered cell container
//! - [`events`] - Synchronous change notification
//! - [`orders`] - Build/plant orders and the order queue seam
//! - [`ledger`] - Resource stockpile and affordability seam
//! - [`viewport`] - Playable area seam
//! - [`math`] - Fixed-point math and grid geometry

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod catalog;
pub mod cells;
pub mod config;
pub mod error;
pub mod events;
pub mod group;
pub mod ledger;
pub mod math;
pub mod orders;
pub mod placement;
pub mod registry;
pub mod viewport;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{BlueprintCatalog, CellData};
    pub use crate::cells::{
        BlueprintKind, BuildCost, Cell, CellBehavior, CellBlueprint, CellId, CellKind, CellTag,
        CellTypeId, FarmlandCell, Footprint, HouseCell, HumanId, LayoutCell, Resource,
    };
    pub use crate::config::{RegistryConfig, EMPTY_POSITION_ATTEMPTS};
    pub use crate::error::{RegistryError, Result};
    pub use crate::events::{ChangeChannel, SubscriptionId};
    pub use crate::group::{CellGroup, DrawSink};
    pub use crate::ledger::{ResourceLedger, Stockpile};
    pub use crate::math::{Fixed, Vec2Fixed, DEFAULT_GRID_SIZE};
    pub use crate::orders::{Order, OrderBook, OrderCategory, OrderKind, OrderQueue};
    pub use crate::placement::{PlacementPreview, PlacementResult};
    pub use crate::registry::CellRegistry;
    pub use crate::viewport::{ScreenBounds, Viewport};
}
