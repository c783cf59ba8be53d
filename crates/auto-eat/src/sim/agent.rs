use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use food_core::{FoodOracle, Hand, Item, Vitals};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::api::{
    AgentEvent, AgentHandle, ENTITY_STATUS_EATING_FINISHED, EntityId, HostError, InventoryView,
};

/// Window slot of the first hotbar entry.
pub const MAIN_HAND_FIRST_SLOT: u16 = 36;
pub const OFF_HAND_SLOT: u16 = 45;

const HOTBAR_SIZE: u16 = 9;

/// Command recorded by the simulated host, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCommand {
    Equip { item: String, hand: Hand },
    Activate(Hand),
    Deactivate,
}

struct SimState {
    vitals: Vitals,
    slots: BTreeMap<u16, Item>,
    quick_bar: u16,
    using: Option<Hand>,
    /// Bumped whenever item use starts or stops, so stale auto-consume
    /// timers can tell they lost the race.
    use_generation: u64,
    equip_delay: Duration,
    equip_failure: Option<String>,
    eating_time: Option<Duration>,
    commands: Vec<HostCommand>,
}

impl SimState {
    fn hand_slot(&self, hand: Hand) -> u16 {
        match hand {
            Hand::Main => MAIN_HAND_FIRST_SLOT + self.quick_bar,
            Hand::Off => OFF_HAND_SLOT,
        }
    }

    /// Slot holding `item`: its recorded slot if still accurate, otherwise
    /// the first stack of the same kind.
    fn find_source(&self, item: &Item) -> Option<u16> {
        if self
            .slots
            .get(&item.slot)
            .is_some_and(|found| found.type_id == item.type_id && found.same_stack_kind(item))
        {
            return Some(item.slot);
        }
        self.slots
            .iter()
            .find(|(_, found)| found.same_stack_kind(item))
            .map(|(&slot, _)| slot)
    }

    fn put(&mut self, slot: u16, item: Option<Item>) -> AgentEvent {
        let old = self.slots.remove(&slot);
        let new = item.map(|mut item| {
            item.slot = slot;
            item
        });
        if let Some(item) = &new {
            self.slots.insert(slot, item.clone());
        }
        AgentEvent::SlotUpdated { slot, old, new }
    }
}

struct Inner {
    entity_id: EntityId,
    foods: Option<Arc<dyn FoodOracle>>,
    events: broadcast::Sender<AgentEvent>,
    state: Mutex<SimState>,
}

/// Scriptable stand-in for a connected agent.
#[derive(Clone)]
pub struct SimulatedAgent {
    inner: Arc<Inner>,
}

impl SimulatedAgent {
    pub fn new(entity_id: EntityId) -> Self {
        Self::build(entity_id, None)
    }

    /// Agent whose meals restore hunger and saturation according to `foods`.
    pub fn with_foods(entity_id: EntityId, foods: Arc<dyn FoodOracle>) -> Self {
        Self::build(entity_id, Some(foods))
    }

    fn build(entity_id: EntityId, foods: Option<Arc<dyn FoodOracle>>) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            inner: Arc::new(Inner {
                entity_id,
                foods,
                events,
                state: Mutex::new(SimState {
                    vitals: Vitals::full(),
                    slots: BTreeMap::new(),
                    quick_bar: 0,
                    using: None,
                    use_generation: 0,
                    equip_delay: Duration::ZERO,
                    equip_failure: None,
                    eating_time: None,
                    commands: Vec::new(),
                }),
            }),
        }
    }

    pub fn with_vitals(self, vitals: Vitals) -> Self {
        self.set_vitals(vitals);
        self
    }

    /// Places `item` at its own slot.
    pub fn with_item(self, item: Item) -> Self {
        self.state().put(item.slot, Some(item));
        self
    }

    /// Delay before each equip takes effect.
    pub fn with_equip_delay(self, delay: Duration) -> Self {
        self.state().equip_delay = delay;
        self
    }

    /// Finish every meal on its own after `eating_time`.
    pub fn with_auto_consume(self, eating_time: Duration) -> Self {
        self.state().eating_time = Some(eating_time);
        self
    }

    pub fn set_vitals(&self, vitals: Vitals) {
        self.state().vitals = vitals;
    }

    /// Lowers hunger by `points`, as sprinting or regeneration would.
    pub fn starve(&self, points: u32) {
        let mut state = self.state();
        state.vitals.food = state.vitals.food.saturating_sub(points);
        state.vitals.saturation = state.vitals.saturation.min(state.vitals.food as f32);
    }

    /// Makes every subsequent equip fail with `reason`, or succeed again
    /// when `None`.
    pub fn fail_equips(&self, reason: Option<&str>) {
        self.state().equip_failure = reason.map(str::to_owned);
    }

    pub fn select_quick_bar(&self, index: u16) {
        self.state().quick_bar = index.min(HOTBAR_SIZE - 1);
    }

    /// Server-side slot change, published as a slot update.
    pub fn set_slot(&self, slot: u16, item: Option<Item>) {
        let event = self.state().put(slot, item);
        self.emit(event);
    }

    /// Replaces whatever `hand` holds, as a plugin or the server might.
    pub fn set_hand(&self, hand: Hand, item: Option<Item>) {
        let slot = self.state().hand_slot(hand);
        self.set_slot(slot, item);
    }

    /// Completes the current meal: consumes one item from the hand in use
    /// and publishes the eating-finished status.
    ///
    /// Returns `false` if no item was in use.
    pub fn finish_eating(&self) -> bool {
        let events = {
            let mut state = self.state();
            let Some(hand) = state.using.take() else {
                return false;
            };
            state.use_generation += 1;
            self.consume_from(&mut state, hand)
        };
        for event in events {
            self.emit(event);
        }
        true
    }

    pub fn tick(&self) {
        self.emit(AgentEvent::Tick);
    }

    pub fn collect(&self, collector: EntityId, item_id: Option<u32>) {
        self.emit(AgentEvent::ItemCollected { collector, item_id });
    }

    /// Drops the inventory and publishes the death.
    pub fn die(&self) {
        {
            let mut state = self.state();
            state.slots.clear();
            state.using = None;
            state.use_generation += 1;
            state.vitals.health = 0.0;
        }
        self.emit(AgentEvent::Died);
    }

    pub fn respawn(&self) {
        self.state().vitals = Vitals::full();
        self.emit(AgentEvent::Spawned);
    }

    /// Publishes an arbitrary event.
    pub fn send(&self, event: AgentEvent) {
        self.emit(event);
    }

    /// Emits a tick every `period` until the returned task is aborted.
    pub fn spawn_ticker(&self, period: Duration) -> JoinHandle<()> {
        let agent = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                agent.tick();
            }
        })
    }

    pub fn commands(&self) -> Vec<HostCommand> {
        self.state().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.state().commands.clear();
    }

    pub fn equip_count(&self) -> usize {
        self.state()
            .commands
            .iter()
            .filter(|command| matches!(command, HostCommand::Equip { .. }))
            .count()
    }

    fn consume_from(&self, state: &mut SimState, hand: Hand) -> Vec<AgentEvent> {
        let mut events = vec![AgentEvent::EntityStatus {
            entity_id: self.inner.entity_id,
            status: ENTITY_STATUS_EATING_FINISHED,
        }];

        let slot = state.hand_slot(hand);
        let Some(eaten) = state.slots.get(&slot).cloned() else {
            return events;
        };

        if let Some(food) = self
            .inner
            .foods
            .as_ref()
            .and_then(|foods| foods.food_by_name(&eaten.name))
        {
            let vitals = &mut state.vitals;
            vitals.food = (vitals.food + food.food_points.round() as u32).min(Vitals::MAX_FOOD);
            vitals.saturation = (vitals.saturation + food.saturation).min(vitals.food as f32);
        }

        debug!(
            target: "auto_eat::sim",
            food = %eaten.name,
            hunger = state.vitals.food,
            "meal consumed"
        );
        let remaining = (eaten.count > 1).then(|| Item {
            count: eaten.count - 1,
            ..eaten
        });
        events.push(state.put(slot, remaining));
        events
    }

    fn finish_after(&self, generation: u64) {
        let events = {
            let mut state = self.state();
            if state.use_generation != generation {
                return;
            }
            let Some(hand) = state.using.take() else {
                return;
            };
            state.use_generation += 1;
            self.consume_from(&mut state, hand)
        };
        for event in events {
            self.emit(event);
        }
    }

    fn emit(&self, event: AgentEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl InventoryView for SimulatedAgent {
    fn inventory(&self) -> Vec<Item> {
        self.state().slots.values().cloned().collect()
    }

    fn held_item(&self, hand: Hand) -> Option<Item> {
        let state = self.state();
        state.slots.get(&state.hand_slot(hand)).cloned()
    }

    fn hand_slot(&self, hand: Hand) -> u16 {
        self.state().hand_slot(hand)
    }
}

#[async_trait]
impl AgentHandle for SimulatedAgent {
    fn entity_id(&self) -> EntityId {
        self.inner.entity_id
    }

    fn vitals(&self) -> Vitals {
        self.state().vitals
    }

    fn is_using_item(&self) -> bool {
        self.state().using.is_some()
    }

    async fn equip(&self, item: &Item, hand: Hand) -> Result<(), HostError> {
        let delay = {
            let mut state = self.state();
            state.commands.push(HostCommand::Equip {
                item: item.name.clone(),
                hand,
            });
            state.equip_delay
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let events = {
            let mut state = self.state();
            if let Some(reason) = &state.equip_failure {
                debug!(target: "auto_eat::sim", item = %item.name, %hand, %reason, "equip rejected");
                return Err(HostError::new(reason.clone()));
            }
            let target = state.hand_slot(hand);
            let source = state
                .find_source(item)
                .ok_or_else(|| HostError::new(format!("{} is not in the inventory", item.name)))?;
            if source == target {
                return Ok(());
            }
            trace!(target: "auto_eat::sim", item = %item.name, source, target, "equip");
            let moving = state.slots.get(&source).cloned();
            let displaced = state.slots.get(&target).cloned();
            vec![state.put(source, displaced), state.put(target, moving)]
        };
        for event in events {
            self.emit(event);
        }
        Ok(())
    }

    fn activate_item(&self, hand: Hand) {
        let (generation, eating_time) = {
            let mut state = self.state();
            state.commands.push(HostCommand::Activate(hand));
            state.using = Some(hand);
            state.use_generation += 1;
            (state.use_generation, state.eating_time)
        };

        if let Some(eating_time) = eating_time {
            let agent = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(eating_time).await;
                agent.finish_after(generation);
            });
        }
    }

    fn deactivate_item(&self) {
        let mut state = self.state();
        state.commands.push(HostCommand::Deactivate);
        state.using = None;
        state.use_generation += 1;
    }

    fn subscribe(&self) -> broadcast::Receiver<AgentEvent> {
        self.inner.events.subscribe()
    }
}
