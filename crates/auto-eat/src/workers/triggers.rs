//! Worker that feeds agent events into the engine's trigger hooks.
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::AgentEvent;
use crate::engine::AutoEat;

pub(crate) struct TriggerWorker {
    engine: AutoEat,
    events: broadcast::Receiver<AgentEvent>,
    shutdown: CancellationToken,
}

impl TriggerWorker {
    pub(crate) fn new(
        engine: AutoEat,
        events: broadcast::Receiver<AgentEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            engine,
            events,
            shutdown,
        }
    }

    /// Main worker loop.
    pub(crate) async fn run(mut self) {
        debug!(target: "auto_eat::triggers", "trigger worker started");
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                received = self.events.recv() => match received {
                    Ok(event) => self.handle_event(event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(target: "auto_eat::triggers", skipped, "trigger worker lagged behind agent events");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        debug!(target: "auto_eat::triggers", "trigger worker stopped");
    }

    fn handle_event(&self, event: AgentEvent) {
        match event {
            AgentEvent::Tick => self.engine.on_tick(),
            AgentEvent::ItemCollected { collector, item_id } => {
                self.engine.on_item_collected(collector, item_id)
            }
            AgentEvent::Died => self.engine.on_death(),
            AgentEvent::Spawned => self.engine.on_spawn(),
            AgentEvent::EntityStatus { .. } | AgentEvent::SlotUpdated { .. } => {}
        }
    }
}
