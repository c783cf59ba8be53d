//! In-memory agent host.
//!
//! [`SimulatedAgent`] implements [`crate::AgentHandle`] without a server. It
//! models the parts of the protocol the engine relies on: hand slots, equip
//! latency, item-use state, the eating-finished status and slot updates.
//! Tests script it directly; the playground drives it with a ticker.
mod agent;

pub use agent::{HostCommand, MAIN_HAND_FIRST_SLOT, OFF_HAND_SLOT, SimulatedAgent};
