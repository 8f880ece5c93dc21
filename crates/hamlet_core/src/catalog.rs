//! Data-driven cell type definitions.
//!
//! Blueprints are described in RON and collected into a [`BlueprintCatalog`]
//! keyed by type id. This module does no file IO.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cells::{BlueprintKind, BuildCost, CellBlueprint, CellTypeId, Footprint, Resource};
use crate::error::{RegistryError, Result};
use crate::orders::OrderCategory;

/// Data-driven cell definition.
///
/// # Example RON
///
/// ```ron
/// CellData(
///     id: "cottage",
///     name: "Cottage",
///     footprint: (width: 2, height: 2),
///     cost: [(Wood, 20), (Stone, 5)],
///     order_category: Housing,
///     kind: House(capacity: 4, level: 1),
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellData {
    /// Unique string identifier for this cell type.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Size in grid cells.
    #[serde(default)]
    pub footprint: Footprint,

    /// Resources required to build.
    #[serde(default)]
    pub cost: Vec<(Resource, u32)>,

    /// Labour category for orders.
    #[serde(default)]
    pub order_category: OrderCategory,

    /// Variant produced on placement.
    #[serde(default = "default_kind")]
    pub kind: BlueprintKind,
}

const fn default_kind() -> BlueprintKind {
    BlueprintKind::Building
}

impl CellData {
    /// Convert into a registry blueprint.
    #[must_use]
    pub fn to_blueprint(&self) -> CellBlueprint {
        CellBlueprint {
            id: CellTypeId::new(self.id.clone()),
            name: self.name.clone(),
            footprint: self.footprint,
            cost: BuildCost(self.cost.clone()),
            order_category: self.order_category,
            kind: self.kind,
        }
    }
}

/// All known blueprints, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct BlueprintCatalog {
    blueprints: BTreeMap<CellTypeId, CellBlueprint>,
}

impl BlueprintCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of definitions. Later ids replace earlier ones.
    #[must_use]
    pub fn from_data(data: &[CellData]) -> Self {
        let mut catalog = Self::new();
        for entry in data {
            catalog.insert(entry.to_blueprint());
        }
        catalog
    }

    /// Parse a RON list of [`CellData`].
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let data: Vec<CellData> = ron::from_str(ron).map_err(|source| {
            RegistryError::ConfigParse {
                what: "cell catalog",
                source,
            }
        })?;
        Ok(Self::from_data(&data))
    }

    /// Add or replace a blueprint.
    pub fn insert(&mut self, blueprint: CellBlueprint) {
        self.blueprints.insert(blueprint.id.clone(), blueprint);
    }

    /// Look up a blueprint by id.
    pub fn get(&self, id: &str) -> Result<&CellBlueprint> {
        self.blueprints
            .get(&CellTypeId::new(id))
            .ok_or_else(|| RegistryError::UnknownBlueprint(id.to_string()))
    }

    /// Iterate over blueprints in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CellBlueprint> {
        self.blueprints.values()
    }

    /// Number of blueprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        CellData(
            id: "cottage",
            name: "Cottage",
            footprint: (width: 2, height: 2),
            cost: [(Wood, 20), (Stone, 5)],
            order_category: Housing,
            kind: House(capacity: 4, level: 1),
        ),
        CellData(
            id: "wheat",
            name: "Wheat",
            order_category: Agriculture,
            kind: Crop,
        ),
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = BlueprintCatalog::from_ron_str(CATALOG).expect("valid catalog");
        assert_eq!(catalog.len(), 2);

        let cottage = catalog.get("cottage").expect("cottage");
        assert_eq!(cottage.footprint, Footprint::square(2));
        assert_eq!(
            cottage.cost,
            BuildCost::free()
                .with(Resource::Wood, 20)
                .with(Resource::Stone, 5)
        );
        assert_eq!(
            cottage.kind,
            BlueprintKind::House {
                capacity: 4,
                level: 1
            }
        );

        let wheat = catalog.get("wheat").expect("wheat");
        assert_eq!(wheat.footprint, Footprint::default());
        assert!(wheat.cost.is_free());
        assert_eq!(wheat.order_category, OrderCategory::Agriculture);
    }

    #[test]
    fn test_unknown_blueprint() {
        let catalog = BlueprintCatalog::new();
        assert!(matches!(
            catalog.get("castle"),
            Err(RegistryError::UnknownBlueprint(id)) if id == "castle"
        ));
    }

    #[test]
    fn test_to_blueprint() {
        let data = CellData {
            id: "cottage".to_string(),
            name: "Cottage".to_string(),
            footprint: Footprint::square(2),
            cost: vec![(Resource::Wood, 20)],
            order_category: OrderCategory::Housing,
            kind: BlueprintKind::Building,
        };
        let blueprint = data.to_blueprint();
        assert_eq!(blueprint.id, CellTypeId::new("cottage"));
        assert_eq!(blueprint.cost, BuildCost::free().with(Resource::Wood, 20));
        assert_eq!(blueprint.order_category, OrderCategory::Housing);
    }
}
