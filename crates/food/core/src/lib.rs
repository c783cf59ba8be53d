//! Pure eating policy shared by the engine and the content loaders.
//!
//! `food-core` knows nothing about hosts, networks or timers. It defines the
//! vocabulary the eating engine works with and the decisions that can be made
//! from a snapshot alone:
//! - [`item`] inventory items, hands and agent vitals
//! - [`food`] nutritional metrics and the [`FoodOracle`] lookup seam
//! - [`selection`] ranking edible choices and resolving explicit requests
//! - [`config`] the engine configuration and partial-merge patches
pub mod config;
pub mod food;
pub mod item;
pub mod selection;

pub use config::{AutoEatConfig, AutoEatConfigPatch, CompletionMode, DEFAULT_BANNED_FOOD};
pub use food::{FoodDefinition, FoodOracle, FoodPriority};
pub use item::{Hand, Item, Vitals};
pub use selection::{FoodSelection, find_best_choices, resolve_selection};
