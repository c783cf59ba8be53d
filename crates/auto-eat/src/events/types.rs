//! Event payloads.
use food_core::{Hand, Item};

use crate::api::{Completion, EatError};

#[derive(Debug, Clone, PartialEq)]
pub enum EatEvent {
    /// Food is in hand and item use has been activated.
    Started { food: Item, hand: Hand },

    /// The sequence failed after choosing a food.
    Failed {
        food: Item,
        hand: Hand,
        error: EatError,
    },

    /// Putting the previous item back failed. Never fatal.
    RestoreFailed {
        item: Item,
        hand: Hand,
        error: EatError,
    },

    /// Emitted on every exit past the precondition checks. `food` is `None`
    /// when nothing edible was available.
    Finished {
        food: Option<Item>,
        hand: Hand,
        completion: Completion,
        error: Option<EatError>,
    },
}

impl EatEvent {
    pub fn hand(&self) -> Hand {
        match self {
            EatEvent::Started { hand, .. }
            | EatEvent::Failed { hand, .. }
            | EatEvent::RestoreFailed { hand, .. }
            | EatEvent::Finished { hand, .. } => *hand,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, EatEvent::Finished { .. })
    }
}
