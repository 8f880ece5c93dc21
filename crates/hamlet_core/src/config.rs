//! Registry configuration.
//!
//! Loaded from RON; every field has a default so partial files are fine.
//!
//! ```ron
//! (
//!     grid_size: 32,
//!     viewport: (width: 800, height: 600),
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::math::DEFAULT_GRID_SIZE;
use crate::viewport::ScreenBounds;

/// Number of candidate points [`crate::registry::CellRegistry::empty_position`] tries.
pub const EMPTY_POSITION_ATTEMPTS: usize = 10;

/// Grid and viewport settings for a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Grid cell edge length in pixels.
    pub grid_size: u32,
    /// Initial playable area.
    pub viewport: ScreenBounds,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            viewport: ScreenBounds::default(),
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a RON configuration string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let config: Self = ron::from_str(ron).map_err(|source| RegistryError::ConfigParse {
            what: "registry config",
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the registry cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(RegistryError::InvalidConfig(
                "grid_size must be positive".to_string(),
            ));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(RegistryError::InvalidConfig(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }
}
