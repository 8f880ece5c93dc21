//! Scenario loading and configuration.
//!
//! A scenario sets up the registry (grid, viewport, catalog, starting
//! stockpile) and lists the steps the runner replays against it.

use std::path::Path;

use hamlet_core::catalog::{BlueprintCatalog, CellData};
use hamlet_core::cells::Resource;
use hamlet_core::config::RegistryConfig;
use hamlet_core::error::RegistryError;
use hamlet_core::ledger::Stockpile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Registry rejected the scenario contents.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A single scripted action.
///
/// Positions are pixel coordinates; `None` means "wherever the cursor is".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Move the placement cursor.
    Cursor {
        /// Pixel x.
        x: i32,
        /// Pixel y.
        y: i32,
    },
    /// Place a finished cell directly.
    Place {
        /// Blueprint id.
        cell: String,
        /// Target position.
        #[serde(default)]
        at: Option<(i32, i32)>,
    },
    /// Pay for a blueprint, lay it out and queue a build order.
    Build {
        /// Blueprint id.
        cell: String,
        /// Target position.
        #[serde(default)]
        at: Option<(i32, i32)>,
    },
    /// Till farmland and queue a plant order.
    Plant {
        /// Crop blueprint id.
        crop: String,
        /// Target position.
        #[serde(default)]
        at: Option<(i32, i32)>,
    },
    /// Destroy whatever covers the given point.
    Destroy {
        /// Pixel position.
        at: (i32, i32),
    },
    /// Advance the frame loop.
    Tick {
        /// Number of frames.
        frames: u32,
    },
    /// Plant crops at random empty positions.
    ScatterFarmland {
        /// Crop blueprint id.
        crop: String,
        /// How many plots to try for.
        count: u32,
        /// Generator seed.
        seed: u64,
    },
}

/// A complete scenario configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Grid and viewport.
    #[serde(default)]
    pub config: RegistryConfig,
    /// Starting resources.
    #[serde(default)]
    pub stockpile: Vec<(Resource, u32)>,
    /// Cell definitions available to the steps.
    #[serde(default)]
    pub catalog: Vec<CellData>,
    /// Steps, in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "Empty Meadow".to_string(),
            description: "Default grid with nothing to do".to_string(),
            config: RegistryConfig::default(),
            stockpile: Vec::new(),
            catalog: Vec::new(),
            steps: Vec::new(),
        }
    }
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string (useful for embedded scenarios).
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        scenario.config.validate()?;
        Ok(scenario)
    }

    /// Blueprint catalog built from the scenario's definitions.
    #[must_use]
    pub fn blueprint_catalog(&self) -> BlueprintCatalog {
        BlueprintCatalog::from_data(&self.catalog)
    }

    /// Starting stockpile.
    #[must_use]
    pub fn starting_stockpile(&self) -> Stockpile {
        self.stockpile
            .iter()
            .fold(Stockpile::new(), |pile, &(resource, amount)| {
                pile.with(resource, amount)
            })
    }
}

/// Simple deterministic RNG for scattering.
#[derive(Debug, Clone)]
pub struct ScatterRng {
    state: u64,
}

impl ScatterRng {
    /// Create new RNG from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15),
        }
    }

    /// Get next random value.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(0x5DEE_CE66D).wrapping_add(11);
        self.state >> 16
    }

    /// Get random int in range [min, max).
    pub fn next_range(&mut self, min: i32, max: i32) -> i32 {
        let range = (max - min) as u64;
        if range == 0 {
            return min;
        }
        min + (self.next() % range) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamlet_core::viewport::ScreenBounds;

    const VILLAGE: &str = r#"
        Scenario(
            name: "Test Village",
            config: (grid_size: 16, viewport: (width: 320, height: 240)),
            stockpile: [(Wood, 30)],
            catalog: [
                CellData(id: "hut", name: "Hut", cost: [(Wood, 5)]),
                CellData(id: "wheat", name: "Wheat", order_category: Agriculture, kind: Crop),
            ],
            steps: [
                Cursor(x: 16, y: 16),
                Build(cell: "hut"),
                Plant(crop: "wheat", at: Some((64, 64))),
                Tick(frames: 3),
                Destroy(at: (20, 20)),
                ScatterFarmland(crop: "wheat", count: 4, seed: 7),
            ],
        )
    "#;

    #[test]
    fn test_default_scenario() {
        let scenario = Scenario::default();
        assert_eq!(scenario.config, RegistryConfig::default());
        assert!(scenario.steps.is_empty());
    }

    #[test]
    fn test_parse_from_ron() {
        let scenario = Scenario::from_ron_str(VILLAGE).unwrap();
        assert_eq!(scenario.name, "Test Village");
        assert_eq!(scenario.config.grid_size, 16);
        assert_eq!(scenario.config.viewport, ScreenBounds::new(320, 240));
        assert_eq!(scenario.steps.len(), 6);
        assert_eq!(
            scenario.steps[1],
            Step::Build {
                cell: "hut".to_string(),
                at: None
            }
        );
        assert_eq!(scenario.blueprint_catalog().len(), 2);
        assert_eq!(scenario.starting_stockpile().amount(Resource::Wood), 30);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let ron = r#"Scenario(name: "Broken", config: (grid_size: 0))"#;
        assert!(matches!(
            Scenario::from_ron_str(ron),
            Err(ScenarioError::Registry(RegistryError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Scenario::from_ron_str("Scenario(name: )"),
            Err(ScenarioError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Scenario::load("/definitely/not/here.ron"),
            Err(ScenarioError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("village.ron");
        std::fs::write(&path, VILLAGE).unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.catalog.len(), 2);
    }

    #[test]
    fn test_scatter_rng_deterministic() {
        let mut a = ScatterRng::new(42);
        let mut b = ScatterRng::new(42);
        for _ in 0..20 {
            let value = a.next_range(0, 800);
            assert_eq!(value, b.next_range(0, 800));
            assert!((0..800).contains(&value));
        }
        assert_eq!(a.next_range(5, 5), 5);
    }
}
