#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use auto_eat::sim::{MAIN_HAND_FIRST_SLOT, OFF_HAND_SLOT};
use auto_eat::{
    AutoEat, AutoEatConfigPatch, EatEvent, EntityId, FoodRegistry, Item, SimulatedAgent, Vitals,
};

pub const ME: EntityId = EntityId(42);
pub const MAIN: u16 = MAIN_HAND_FIRST_SLOT;
pub const OFF: u16 = OFF_HAND_SLOT;

pub fn registry() -> Arc<FoodRegistry> {
    Arc::new(FoodRegistry::vanilla().expect("bundled food table should parse"))
}

pub fn sword(slot: u16) -> Item {
    Item::new(276, "diamond_sword", slot, 1)
}

pub fn bread(slot: u16) -> Item {
    Item::new(297, "bread", slot, 8)
}

pub fn steak(slot: u16) -> Item {
    Item::new(364, "cooked_beef", slot, 4)
}

pub fn apple(slot: u16) -> Item {
    Item::new(260, "apple", slot, 3)
}

/// Low enough to want food, high enough that one bread gets the agent out
/// of danger again.
pub fn peckish() -> Vitals {
    Vitals::new(20.0, 14, 0.0)
}

/// One bread is not enough to get out of danger.
pub fn starving() -> Vitals {
    Vitals::new(20.0, 4, 0.0)
}

/// Agent holding a sword with bread in the main inventory.
pub fn armed_agent(vitals: Vitals) -> SimulatedAgent {
    SimulatedAgent::with_foods(ME, registry())
        .with_vitals(vitals)
        .with_item(sword(MAIN))
        .with_item(bread(12))
}

pub fn engine(agent: &SimulatedAgent, patch: AutoEatConfigPatch) -> AutoEat {
    AutoEat::builder(Arc::new(agent.clone()), registry())
        .options(patch)
        .build()
}

/// Lets spawned tasks run until they block. Time is paused in these tests,
/// so this also auto-advances to the next due timer at most 1ms away.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

pub fn record(engine: &AutoEat) -> Arc<Mutex<Vec<EatEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    engine.register_observer(move |event: &EatEvent| sink.lock().unwrap().push(event.clone()));
    events
}

pub fn held_name(agent: &SimulatedAgent, hand: auto_eat::Hand) -> Option<String> {
    use auto_eat::InventoryView;
    agent.held_item(hand).map(|item| item.name)
}
