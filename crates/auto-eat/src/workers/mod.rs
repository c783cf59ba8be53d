//! Background workers owned by the engine.
mod triggers;

pub(crate) use triggers::TriggerWorker;
