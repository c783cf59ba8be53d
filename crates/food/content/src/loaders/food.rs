//! Food catalog loader.

use std::collections::HashSet;
use std::path::Path;

use food_core::FoodDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const VANILLA_CATALOG: &str = include_str!("../../data/foods.ron");

/// One catalog row. Derived metrics are computed on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub food_points: f32,
    pub saturation: f32,
    #[serde(default = "default_stack_size")]
    pub stack_size: u8,
}

fn default_stack_size() -> u8 {
    64
}

impl From<FoodEntry> for FoodDefinition {
    fn from(entry: FoodEntry) -> Self {
        FoodDefinition::new(
            entry.id,
            entry.name,
            entry.display_name,
            entry.food_points,
            entry.saturation,
        )
        .with_stack_size(entry.stack_size)
    }
}

/// Food catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCatalog {
    /// Game version the numeric ids belong to.
    #[serde(default)]
    pub version: String,
    pub foods: Vec<FoodEntry>,
}

/// Loader for food catalogs from RON files.
pub struct FoodLoader;

impl FoodLoader {
    /// Load a food catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a FoodCatalog
    ///
    /// # Returns
    ///
    /// Returns a Vec of FoodDefinitions.
    pub fn load(path: &Path) -> LoadResult<Vec<FoodDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid food catalog {}: {}", path.display(), e))
    }

    /// Parse a catalog from RON text.
    ///
    /// Duplicate names or ids are rejected; the registry keys on both.
    pub fn parse(content: &str) -> LoadResult<Vec<FoodDefinition>> {
        let catalog: FoodCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse food catalog RON: {}", e))?;

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for entry in &catalog.foods {
            if !names.insert(entry.name.as_str()) {
                anyhow::bail!("duplicate food name `{}`", entry.name);
            }
            if !ids.insert(entry.id) {
                anyhow::bail!("duplicate food id {} (`{}`)", entry.id, entry.name);
            }
        }

        Ok(catalog.foods.into_iter().map(FoodDefinition::from).collect())
    }
}

/// The bundled vanilla catalog.
pub fn vanilla_foods() -> LoadResult<Vec<FoodDefinition>> {
    FoodLoader::parse(VANILLA_CATALOG)
}
