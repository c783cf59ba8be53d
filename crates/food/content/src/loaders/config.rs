//! Engine configuration loader.

use std::path::Path;

use food_core::{AutoEatConfig, AutoEatConfigPatch};

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a full config from a TOML file.
    ///
    /// Fields missing from the file keep their default values.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing AutoEatConfig
    pub fn load(path: &Path) -> LoadResult<AutoEatConfig> {
        let content = read_file(path)?;
        let config: AutoEatConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }

    /// Load a partial config, suitable for merging over a running engine.
    pub fn load_patch(path: &Path) -> LoadResult<AutoEatConfigPatch> {
        let content = read_file(path)?;
        let patch: AutoEatConfigPatch = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config patch TOML: {}", e))?;

        Ok(patch)
    }
}
