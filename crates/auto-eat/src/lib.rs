//! Automatic eating for an agent connected to a block-game server.
//!
//! The crate watches the agent's hunger and health, picks food from its
//! inventory under a configurable priority/ban policy, and drives the
//! equip → activate → wait → restore sequence against a latency-bearing host.
//! Consumers construct an [`AutoEat`] engine around their [`AgentHandle`]
//! implementation and a [`FoodRegistry`], then either call
//! [`AutoEat::eat`] directly or [`AutoEat::start`] the trigger worker.
//!
//! Modules are organized by responsibility:
//! - [`api`] host seam traits, requests, outcomes and errors
//! - [`engine`] the eat sequencer, cancellation and trigger evaluation
//! - [`events`] lifecycle events, the broadcast bus and observers
//! - [`oracle`] the in-memory food registry
//! - [`env`] configuration overlay from `AUTO_EAT_*` variables
//! - [`sim`] an in-memory host for tests and offline runs
//! - `workers` keeps the trigger task internal to the crate
pub mod api;
pub mod engine;
pub mod env;
pub mod events;
pub mod oracle;
pub mod sim;

mod workers;

pub use api::{
    AgentEvent, AgentHandle, Completion, ENTITY_STATUS_EATING_FINISHED, EatError, EatOutcome,
    EatRequest, EntityId, HostError, InventoryView, ResolvedRequest, Result,
};
pub use engine::{AbortHandle, AbortReason, AutoEat, AutoEatBuilder, HeldItem};
pub use events::{EatEvent, EatObserver, EventBus, ObserverId};
pub use oracle::FoodRegistry;
pub use sim::{HostCommand, SimulatedAgent};

pub use food_core::{
    AutoEatConfig, AutoEatConfigPatch, CompletionMode, FoodDefinition, FoodOracle, FoodPriority,
    FoodSelection, Hand, Item, Vitals,
};
