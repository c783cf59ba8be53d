//! Minimal [`FoodOracle`] backed by in-memory maps.
use std::collections::HashMap;
use std::path::Path;

use food_content::{FoodLoader, LoadResult, vanilla_foods};
use food_core::{FoodDefinition, FoodOracle};

/// FoodOracle implementation with static food definitions
#[derive(Clone, Debug, Default)]
pub struct FoodRegistry {
    foods: Vec<FoodDefinition>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<u32, usize>,
}

impl FoodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = FoodDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.add_definition(definition);
        }
        registry
    }

    /// Bundled vanilla table.
    pub fn vanilla() -> LoadResult<Self> {
        Ok(Self::from_definitions(vanilla_foods()?))
    }

    /// Loads a RON food table from disk.
    pub fn load(path: &Path) -> LoadResult<Self> {
        Ok(Self::from_definitions(FoodLoader::load(path)?))
    }

    /// Add a food definition, replacing any entry with the same name or id.
    pub fn add_definition(&mut self, definition: FoodDefinition) {
        let existing = self
            .by_name
            .get(&definition.name)
            .or_else(|| self.by_id.get(&definition.id))
            .copied();

        let index = match existing {
            Some(index) => {
                let old = std::mem::replace(&mut self.foods[index], definition);
                self.by_name.remove(&old.name);
                self.by_id.remove(&old.id);
                index
            }
            None => {
                self.foods.push(definition);
                self.foods.len() - 1
            }
        };

        let definition = &self.foods[index];
        self.by_name.insert(definition.name.clone(), index);
        self.by_id.insert(definition.id, index);
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

impl FoodOracle for FoodRegistry {
    fn food_by_name(&self, name: &str) -> Option<&FoodDefinition> {
        self.by_name.get(name).map(|&index| &self.foods[index])
    }

    fn food_by_id(&self, id: u32) -> Option<&FoodDefinition> {
        self.by_id.get(&id).map(|&index| &self.foods[index])
    }

    fn all_foods(&self) -> Vec<&FoodDefinition> {
        self.foods.iter().collect()
    }
}
