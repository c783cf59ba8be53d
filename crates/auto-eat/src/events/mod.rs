//! Lifecycle events published by the engine.
//!
//! Every sequence that passes its precondition checks ends with exactly one
//! [`EatEvent::Finished`]; sequences that reach activation publish
//! [`EatEvent::Started`] first.
mod bus;
mod types;

pub use bus::{EatObserver, EventBus, ObserverId};
pub use types::EatEvent;
