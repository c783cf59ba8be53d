//! The auto-eat engine.
//!
//! [`AutoEat`] is a cheap cloneable handle over shared state: the live
//! configuration, the single-flight eating flag, the sticky cancel flag and
//! the remembered pre-eat item. The eat sequence itself lives in `sequence`,
//! completion detection in `completion`, and the trigger hooks driven by the
//! background worker in `triggers`.
mod abort;
mod completion;
mod sequence;
mod triggers;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use food_core::{
    AutoEatConfig, AutoEatConfigPatch, FoodOracle, FoodPriority, Hand, Item, find_best_choices,
};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::AgentHandle;
use crate::events::{EatEvent, EatObserver, EventBus, ObserverId};
use crate::workers::TriggerWorker;

pub use abort::{AbortHandle, AbortReason};

/// Item the agent held before food was equipped, and the hand it was in.
#[derive(Clone, Debug, PartialEq)]
pub struct HeldItem {
    pub item: Item,
    pub hand: Hand,
}

#[derive(Debug, Default)]
pub(crate) struct EngineState {
    eating: bool,
    canceled: bool,
    last_held: Option<HeldItem>,
    /// Abort handle of the in-flight sequence.
    pending: Option<AbortHandle>,
    sequences: u64,
}

struct Shared {
    agent: Arc<dyn AgentHandle>,
    foods: Arc<dyn FoodOracle>,
    config: RwLock<AutoEatConfig>,
    state: Mutex<EngineState>,
    events: EventBus,
    shutdown: CancellationToken,
}

/// Cloneable handle to an auto-eat engine bound to one agent.
#[derive(Clone)]
pub struct AutoEat {
    shared: Arc<Shared>,
}

impl AutoEat {
    pub fn new(agent: Arc<dyn AgentHandle>, foods: Arc<dyn FoodOracle>) -> Self {
        Self::builder(agent, foods).build()
    }

    pub fn builder(agent: Arc<dyn AgentHandle>, foods: Arc<dyn FoodOracle>) -> AutoEatBuilder {
        AutoEatBuilder::new(agent, foods)
    }

    pub fn agent(&self) -> &Arc<dyn AgentHandle> {
        &self.shared.agent
    }

    pub fn foods(&self) -> &dyn FoodOracle {
        self.shared.foods.as_ref()
    }

    /// Snapshot of the live configuration.
    pub fn config(&self) -> AutoEatConfig {
        self.shared
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merges `patch` into the live configuration and returns the result.
    ///
    /// A sequence already in flight keeps the snapshot it started with.
    pub fn set_options(&self, patch: AutoEatConfigPatch) -> AutoEatConfig {
        let mut config = self
            .shared
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        config.merge(patch).clone()
    }

    pub fn replace_config(&self, config: AutoEatConfig) {
        *self
            .shared
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Turns on both automatic triggers.
    pub fn enable_auto(&self) {
        self.set_options(AutoEatConfigPatch {
            check_on_health: Some(true),
            check_on_item_pickup: Some(true),
            ..Default::default()
        });
    }

    /// Turns off both automatic triggers.
    pub fn disable_auto(&self) {
        self.set_options(AutoEatConfigPatch {
            check_on_health: Some(false),
            check_on_item_pickup: Some(false),
            ..Default::default()
        });
    }

    pub fn is_eating(&self) -> bool {
        self.state().eating
    }

    pub fn is_canceled(&self) -> bool {
        self.state().canceled
    }

    /// Aborts the in-flight sequence, if any, and rejects new ones until
    /// [`resume_eat`](Self::resume_eat).
    ///
    /// Commands already sent to the host are not undone.
    pub fn cancel_eat(&self) {
        let mut state = self.state();
        state.canceled = true;
        if let Some(abort) = &state.pending
            && abort.abort(AbortReason::Canceled)
        {
            tracing::debug!(target: "auto_eat::engine", "in-flight eat sequence canceled");
        }
    }

    pub fn resume_eat(&self) {
        self.state().canceled = false;
    }

    pub fn last_held_item(&self) -> Option<HeldItem> {
        self.state().last_held.clone()
    }

    /// Ranks the edible items of `items`, best first.
    ///
    /// Uses the configured priority when `priority` is `None`.
    pub fn find_best_choices(&self, items: &[Item], priority: Option<FoodPriority>) -> Vec<Item> {
        let config = self.config();
        find_best_choices(
            items,
            self.foods(),
            &config.banned_food,
            priority.unwrap_or(config.priority),
        )
    }

    /// Whether the agent carries anything the current policy would eat.
    pub fn has_food(&self) -> bool {
        !self
            .find_best_choices(&self.shared.agent.inventory(), None)
            .is_empty()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EatEvent> {
        self.shared.events.subscribe()
    }

    pub fn register_observer(&self, observer: impl EatObserver + 'static) -> ObserverId {
        self.shared.events.register(observer)
    }

    pub fn unregister_observer(&self, id: ObserverId) -> bool {
        self.shared.events.unregister(id)
    }

    /// Spawns the trigger worker on the current runtime.
    ///
    /// The worker subscribes immediately, so events sent after this call
    /// returns are observed. It exits on [`shutdown`](Self::shutdown) or when
    /// the agent's event stream closes.
    pub fn start(&self) -> JoinHandle<()> {
        let worker = TriggerWorker::new(
            self.clone(),
            self.shared.agent.subscribe(),
            self.shared.shutdown.clone(),
        );
        tokio::spawn(worker.run())
    }

    /// Stops the trigger worker and aborts any in-flight sequence.
    pub fn shutdown(&self) {
        self.shared.shutdown.cancel();
        if let Some(abort) = &self.state().pending {
            abort.abort(AbortReason::Canceled);
        }
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: EatEvent) {
        self.shared.events.publish(event);
    }
}

/// Builder for [`AutoEat`].
pub struct AutoEatBuilder {
    agent: Arc<dyn AgentHandle>,
    foods: Arc<dyn FoodOracle>,
    config: AutoEatConfig,
    event_capacity: usize,
}

impl AutoEatBuilder {
    pub fn new(agent: Arc<dyn AgentHandle>, foods: Arc<dyn FoodOracle>) -> Self {
        Self {
            agent,
            foods,
            config: AutoEatConfig::default(),
            event_capacity: 64,
        }
    }

    pub fn config(mut self, config: AutoEatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn options(mut self, patch: AutoEatConfigPatch) -> Self {
        self.config.merge(patch);
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn build(self) -> AutoEat {
        AutoEat {
            shared: Arc::new(Shared {
                agent: self.agent,
                foods: self.foods,
                config: RwLock::new(self.config),
                state: Mutex::new(EngineState::default()),
                events: EventBus::with_capacity(self.event_capacity.max(1)),
                shutdown: CancellationToken::new(),
            }),
        }
    }
}
