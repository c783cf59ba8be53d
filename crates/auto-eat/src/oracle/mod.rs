//! Food registry backing [`food_core::FoodOracle`].
//!
//! The table is immutable once the engine is built; dynamic state lives in
//! the engine and the host.
mod foods;

pub use foods::FoodRegistry;
