//! Engine configuration and partial updates.
use std::collections::BTreeSet;
use std::time::Duration;

use crate::food::FoodPriority;
use crate::item::{Hand, Vitals};

/// Foods excluded from automatic selection unless configured otherwise.
///
/// All of them carry harmful side effects in vanilla.
pub const DEFAULT_BANNED_FOOD: [&str; 5] = [
    "rotten_flesh",
    "pufferfish",
    "chorus_fruit",
    "poisonous_potato",
    "spider_eye",
];

/// How the engine learns that an eating action finished.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CompletionMode {
    /// Wait for the server's action-completed status or a hand slot change.
    #[default]
    Event,
    /// Periodically re-read the hand and the item-use state.
    Polling,
}

/// Tunable behavior of the eating engine.
///
/// The engine snapshots this value at the start of every eat sequence, so a
/// replacement or merge never affects a sequence already in flight.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoEatConfig {
    /// Sort key for food selection.
    pub priority: FoodPriority,
    /// Auto-trigger fires while food is below this value.
    pub min_hunger: u32,
    /// Auto-trigger fires while health is below this value.
    pub min_health: f32,
    pub banned_food: BTreeSet<String>,
    /// Re-equip the previously held non-food item after eating.
    pub return_to_last_item: bool,
    /// Declared for compatibility; no repeat-eating policy is attached to it.
    pub eat_until_full: bool,
    pub use_off_hand: bool,
    pub eating_timeout_ms: u64,
    pub check_on_health: bool,
    pub check_on_item_pickup: bool,
    /// Raise mid-sequence failures from `eat` instead of only reporting them.
    pub strict_errors: bool,
    pub completion: CompletionMode,
    /// Delay between checks in [`CompletionMode::Polling`].
    pub poll_interval_ms: u64,
    /// Polling completions faster than this are not plausible eats.
    pub min_eating_duration_ms: u64,
}

impl AutoEatConfig {
    pub const DEFAULT_MIN_HUNGER: u32 = 15;
    pub const DEFAULT_MIN_HEALTH: f32 = 14.0;
    pub const DEFAULT_EATING_TIMEOUT_MS: u64 = 3000;
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;
    /// Vanilla eating takes 32 ticks (1.6s); anything well under that was
    /// caused by something else.
    pub const DEFAULT_MIN_EATING_DURATION_MS: u64 = 1500;

    pub fn new() -> Self {
        Self {
            priority: FoodPriority::FoodPoints,
            min_hunger: Self::DEFAULT_MIN_HUNGER,
            min_health: Self::DEFAULT_MIN_HEALTH,
            banned_food: DEFAULT_BANNED_FOOD.iter().map(|s| (*s).to_owned()).collect(),
            return_to_last_item: true,
            eat_until_full: false,
            use_off_hand: false,
            eating_timeout_ms: Self::DEFAULT_EATING_TIMEOUT_MS,
            check_on_health: false,
            check_on_item_pickup: false,
            strict_errors: true,
            completion: CompletionMode::Event,
            poll_interval_ms: Self::DEFAULT_POLL_INTERVAL_MS,
            min_eating_duration_ms: Self::DEFAULT_MIN_EATING_DURATION_MS,
        }
    }

    /// Applies every field present in `patch` and returns the merged result.
    pub fn merge(&mut self, patch: AutoEatConfigPatch) -> &Self {
        let AutoEatConfigPatch {
            priority,
            min_hunger,
            min_health,
            banned_food,
            return_to_last_item,
            eat_until_full,
            use_off_hand,
            eating_timeout_ms,
            check_on_health,
            check_on_item_pickup,
            strict_errors,
            completion,
            poll_interval_ms,
            min_eating_duration_ms,
        } = patch;

        if let Some(v) = priority {
            self.priority = v;
        }
        if let Some(v) = min_hunger {
            self.min_hunger = v;
        }
        if let Some(v) = min_health {
            self.min_health = v.max(0.0);
        }
        if let Some(v) = banned_food {
            self.banned_food = v;
        }
        if let Some(v) = return_to_last_item {
            self.return_to_last_item = v;
        }
        if let Some(v) = eat_until_full {
            self.eat_until_full = v;
        }
        if let Some(v) = use_off_hand {
            self.use_off_hand = v;
        }
        if let Some(v) = eating_timeout_ms {
            self.eating_timeout_ms = v;
        }
        if let Some(v) = check_on_health {
            self.check_on_health = v;
        }
        if let Some(v) = check_on_item_pickup {
            self.check_on_item_pickup = v;
        }
        if let Some(v) = strict_errors {
            self.strict_errors = v;
        }
        if let Some(v) = completion {
            self.completion = v;
        }
        if let Some(v) = poll_interval_ms {
            self.poll_interval_ms = v.max(1);
        }
        if let Some(v) = min_eating_duration_ms {
            self.min_eating_duration_ms = v;
        }
        self
    }

    pub fn default_hand(&self) -> Hand {
        Hand::from_off_hand(self.use_off_hand)
    }

    pub fn eating_timeout(&self) -> Duration {
        Duration::from_millis(self.eating_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn min_eating_duration(&self) -> Duration {
        Duration::from_millis(self.min_eating_duration_ms)
    }

    /// Health/hunger trigger condition.
    pub fn needs_food(&self, vitals: &Vitals) -> bool {
        vitals.food < self.min_hunger || vitals.health < self.min_health
    }

    /// Whether it is safe to put a non-food item back in hand.
    pub fn out_of_danger(&self, vitals: &Vitals) -> bool {
        vitals.food > self.min_hunger && vitals.health >= self.min_health
    }
}

impl Default for AutoEatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial configuration; `None` fields leave the current value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoEatConfigPatch {
    pub priority: Option<FoodPriority>,
    pub min_hunger: Option<u32>,
    pub min_health: Option<f32>,
    pub banned_food: Option<BTreeSet<String>>,
    pub return_to_last_item: Option<bool>,
    pub eat_until_full: Option<bool>,
    pub use_off_hand: Option<bool>,
    pub eating_timeout_ms: Option<u64>,
    pub check_on_health: Option<bool>,
    pub check_on_item_pickup: Option<bool>,
    pub strict_errors: Option<bool>,
    pub completion: Option<CompletionMode>,
    pub poll_interval_ms: Option<u64>,
    pub min_eating_duration_ms: Option<u64>,
}

impl AutoEatConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
