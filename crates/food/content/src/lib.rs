//! Data-driven food content and configuration loaders.
//!
//! This crate provides loaders for the static data the eating engine reads:
//! - Food catalogs (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! A vanilla catalog is bundled so the engine can run without a data
//! directory. Content is consumed by the runtime's food registry and never
//! mutated at runtime.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, FoodCatalog, FoodEntry, FoodLoader, LoadResult, vanilla_foods,
};
