//! Host seam between the engine and the game client.
//!
//! The engine never talks to the network directly. It reads inventory and
//! vitals through [`InventoryView`], issues commands through [`AgentHandle`],
//! and observes server-driven changes through the [`AgentEvent`] stream.
use std::fmt;

use async_trait::async_trait;
use food_core::{Hand, Item, Vitals};
use tokio::sync::broadcast;

use super::HostError;

/// Entity status code the server sends when an entity finishes eating.
pub const ENTITY_STATUS_EATING_FINISHED: u8 = 9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub i32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Server-driven notifications relevant to eating.
#[derive(Clone, Debug, PartialEq)]
pub enum AgentEvent {
    /// One game tick elapsed.
    Tick,
    /// `collector` picked up an item entity. `item_id` is the item's numeric
    /// type, when the host could resolve it.
    ItemCollected {
        collector: EntityId,
        item_id: Option<u32>,
    },
    /// Raw entity status packet.
    EntityStatus { entity_id: EntityId, status: u8 },
    /// Contents of an inventory window slot changed.
    SlotUpdated {
        slot: u16,
        old: Option<Item>,
        new: Option<Item>,
    },
    Spawned,
    Died,
}

/// Read-only view over the agent's inventory.
pub trait InventoryView: Send + Sync {
    /// Every occupied inventory slot, in slot order.
    fn inventory(&self) -> Vec<Item>;

    fn held_item(&self, hand: Hand) -> Option<Item>;

    /// Window slot currently backing `hand`.
    fn hand_slot(&self, hand: Hand) -> u16;
}

/// Command surface of a connected agent.
///
/// `equip` is the only command that waits on the server. Activation commands
/// are fire-and-forget; their effects arrive later on the event stream.
#[async_trait]
pub trait AgentHandle: InventoryView {
    fn entity_id(&self) -> EntityId;

    fn vitals(&self) -> Vitals;

    /// Whether the client currently believes it is using (eating) an item.
    fn is_using_item(&self) -> bool;

    async fn equip(&self, item: &Item, hand: Hand) -> Result<(), HostError>;

    fn activate_item(&self, hand: Hand);

    fn deactivate_item(&self);

    fn subscribe(&self) -> broadcast::Receiver<AgentEvent>;

    /// Waits until `ticks` tick events have been observed.
    ///
    /// Returns early if the event stream closes.
    async fn wait_ticks(&self, ticks: u32) {
        let mut events = self.subscribe();
        let mut remaining = ticks;
        while remaining > 0 {
            match events.recv().await {
                Ok(AgentEvent::Tick) => remaining -= 1,
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }
}
