//! Public surface of the auto-eat engine.
//!
//! Re-exports the host seam ([`AgentHandle`]), request/outcome types and the
//! error taxonomy so callers can depend on `auto_eat::api` alone.
mod agent;
mod errors;
mod request;

pub use agent::{AgentEvent, AgentHandle, ENTITY_STATUS_EATING_FINISHED, EntityId, InventoryView};
pub use errors::{EatError, HostError, Result};
pub use request::{Completion, EatOutcome, EatRequest, ResolvedRequest};
