//! Content factory for loading food data and configuration from a directory.

use std::path::{Path, PathBuf};

use food_core::{AutoEatConfig, FoodDefinition};

use crate::loaders::{ConfigLoader, FoodLoader, LoadResult, vanilla_foods};

/// Content factory that loads eating content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── auto_eat.toml
/// └── foods.ron
/// ```
///
/// Both files are optional: a missing `foods.ron` falls back to the bundled
/// vanilla catalog and a missing `auto_eat.toml` to the default config.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "auto_eat.toml";
    pub const FOODS_FILE: &'static str = "foods.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load engine configuration from `auto_eat.toml`.
    pub fn load_config(&self) -> LoadResult<AutoEatConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            return Ok(AutoEatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Layer `auto_eat.toml` over `base`. Only the fields present in the
    /// file replace those of `base`.
    pub fn load_config_over(&self, mut base: AutoEatConfig) -> LoadResult<AutoEatConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if path.exists() {
            base.merge(ConfigLoader::load_patch(&path)?);
        }
        Ok(base)
    }

    /// Load the food catalog from `foods.ron`.
    pub fn load_foods(&self) -> LoadResult<Vec<FoodDefinition>> {
        let path = self.data_dir.join(Self::FOODS_FILE);
        if !path.exists() {
            return vanilla_foods();
        }
        FoodLoader::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_directory_uses_bundled_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        let factory = ContentFactory::new(dir.path());

        let config = factory.load_config().expect("default config");
        let foods = factory.load_foods().expect("vanilla foods");

        assert_eq!(config, AutoEatConfig::default());
        assert!(foods.iter().any(|food| food.name == "bread"));
    }

    #[test]
    fn test_directory_files_override_bundled_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(ContentFactory::FOODS_FILE),
            r#"(foods: [(id: 1, name: "kelp", display_name: "Dried Kelp", food_points: 1.0, saturation: 0.6)])"#,
        )
        .expect("write foods");
        std::fs::write(dir.path().join(ContentFactory::CONFIG_FILE), "min_health = 6.5\n")
            .expect("write config");

        let factory = ContentFactory::new(dir.path());
        let foods = factory.load_foods().expect("foods");
        let config = factory.load_config().expect("config");

        assert_eq!(foods.len(), 1);
        assert_eq!(config.min_health, 6.5);
    }

    #[test]
    fn test_config_file_layers_over_base() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(ContentFactory::CONFIG_FILE),
            "banned_food = [\"pufferfish\"]\n",
        )
        .expect("write config");

        let mut base = AutoEatConfig::default();
        base.use_off_hand = true;
        base.banned_food.clear();

        let factory = ContentFactory::new(dir.path());
        let config = factory.load_config_over(base).expect("config");

        assert!(config.use_off_hand);
        assert_eq!(
            config.banned_food.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["pufferfish"]
        );

        let empty = tempfile::tempdir().expect("temp dir");
        let untouched = ContentFactory::new(empty.path())
            .load_config_over(AutoEatConfig::default())
            .expect("default config");
        assert_eq!(untouched, AutoEatConfig::default());
    }
}
