//! Automatic trigger evaluation.
//!
//! These hooks are driven by the trigger worker. Each one returns quickly;
//! an eat sequence it decides to start is spawned onto the runtime and its
//! failure is logged rather than propagated.
use food_core::FoodSelection;
use tracing::{debug, trace, warn};

use super::{AbortReason, AutoEat};
use crate::api::{EatError, EatRequest, EntityId};

impl AutoEat {
    /// Health trigger, evaluated once per tick.
    pub fn on_tick(&self) {
        let config = self.config();
        if !config.check_on_health || self.is_eating() || self.is_canceled() {
            return;
        }
        if !config.needs_food(&self.shared.agent.vitals()) {
            return;
        }

        let engine = self.clone();
        tokio::spawn(async move {
            if let Err(error) = engine.eat(EatRequest::new()).await {
                log_trigger_failure("health", &error);
            }
        });
    }

    /// Pickup trigger. Items collected by other entities, unknown items and
    /// banned foods are ignored.
    pub fn on_item_collected(&self, collector: EntityId, item_id: Option<u32>) {
        if collector != self.shared.agent.entity_id() {
            return;
        }
        let config = self.config();
        if !config.check_on_item_pickup || self.is_eating() || self.is_canceled() {
            return;
        }
        let Some(food) = item_id.and_then(|id| self.foods().food_by_id(id)).cloned() else {
            trace!(target: "auto_eat::triggers", ?item_id, "collected item is not food");
            return;
        };
        if config.banned_food.contains(&food.name) {
            trace!(target: "auto_eat::triggers", food = %food.name, "collected food is banned");
            return;
        }

        debug!(target: "auto_eat::triggers", food = %food.name, "picked up food");
        let engine = self.clone();
        tokio::spawn(async move {
            // Let the pickup land in the inventory first.
            engine.shared.agent.wait_ticks(1).await;
            let request = EatRequest::new()
                .food(FoodSelection::Food(food))
                .equip_old_item(true);
            if let Err(error) = engine.eat(request).await {
                log_trigger_failure("pickup", &error);
            }
        });
    }

    /// The agent died: abort the in-flight sequence and forget the
    /// remembered item, which was dropped with the rest of the inventory.
    pub fn on_death(&self) {
        let mut state = self.state();
        state.last_held = None;
        if let Some(abort) = &state.pending {
            abort.abort(AbortReason::AgentDied);
            debug!(target: "auto_eat::triggers", "agent died, eat sequence aborted");
        }
    }

    /// The agent (re)spawned: any sequence still in flight is stale.
    ///
    /// A sticky cancel survives respawn.
    pub fn on_spawn(&self) {
        let state = self.state();
        if let Some(abort) = &state.pending {
            abort.abort(AbortReason::AgentDied);
            debug!(target: "auto_eat::triggers", "agent respawned, stale eat sequence aborted");
        }
    }
}

fn log_trigger_failure(trigger: &'static str, error: &EatError) {
    // Racing triggers and empty inventories are routine.
    if error.is_precondition() {
        trace!(target: "auto_eat::triggers", trigger, %error, "automatic eat skipped");
    } else {
        warn!(target: "auto_eat::triggers", trigger, %error, "automatic eat failed");
    }
}
