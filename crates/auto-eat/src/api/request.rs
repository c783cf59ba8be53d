//! Eat requests and their outcomes.
use food_core::{AutoEatConfig, FoodPriority, FoodSelection, Hand, Item};

use super::EatError;

/// Caller-supplied options for a single eat sequence.
///
/// Unset fields fall back to the engine configuration at the moment the
/// sequence starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EatRequest {
    pub food: Option<FoodSelection>,
    pub hand: Option<Hand>,
    pub equip_old_item: Option<bool>,
    pub priority: Option<FoodPriority>,
}

impl EatRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn food(mut self, food: impl Into<FoodSelection>) -> Self {
        self.food = Some(food.into());
        self
    }

    pub fn hand(mut self, hand: Hand) -> Self {
        self.hand = Some(hand);
        self
    }

    pub fn off_hand(self, off_hand: bool) -> Self {
        self.hand(Hand::from_off_hand(off_hand))
    }

    pub fn equip_old_item(mut self, equip_old_item: bool) -> Self {
        self.equip_old_item = Some(equip_old_item);
        self
    }

    pub fn priority(mut self, priority: FoodPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn resolve(self, config: &AutoEatConfig) -> ResolvedRequest {
        ResolvedRequest {
            food: self.food,
            hand: self.hand.unwrap_or_else(|| config.default_hand()),
            equip_old_item: self.equip_old_item.unwrap_or(config.return_to_last_item),
            priority: self.priority.unwrap_or(config.priority),
        }
    }
}

/// Request with every option pinned for the duration of one sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRequest {
    pub food: Option<FoodSelection>,
    pub hand: Hand,
    pub equip_old_item: bool,
    pub priority: FoodPriority,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Completion {
    Success,
    Interrupted,
    TimedOut,
    Canceled,
    NoFood,
}

/// Result of a sequence that got as far as choosing a food.
///
/// With `strict_errors` disabled, mid-sequence failures are reported here
/// instead of as `Err`.
#[derive(Clone, Debug, PartialEq)]
pub struct EatOutcome {
    pub food: Item,
    pub hand: Hand,
    pub completion: Completion,
    pub error: Option<EatError>,
    /// Whether the previously held item was put back afterwards.
    pub restored: bool,
}

impl EatOutcome {
    pub fn is_success(&self) -> bool {
        self.completion == Completion::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use food_core::AutoEatConfigPatch;

    #[test]
    fn unset_options_follow_config() {
        let mut config = AutoEatConfig::default();
        config.merge(AutoEatConfigPatch {
            use_off_hand: Some(true),
            return_to_last_item: Some(false),
            priority: Some(FoodPriority::Saturation),
            ..Default::default()
        });

        let resolved = EatRequest::new().resolve(&config);
        assert_eq!(resolved.hand, Hand::Off);
        assert!(!resolved.equip_old_item);
        assert_eq!(resolved.priority, FoodPriority::Saturation);
        assert_eq!(resolved.food, None);
    }

    #[test]
    fn explicit_options_win() {
        let config = AutoEatConfig::default();
        let resolved = EatRequest::new()
            .food("bread")
            .off_hand(true)
            .equip_old_item(false)
            .priority(FoodPriority::EffectiveQuality)
            .resolve(&config);

        assert_eq!(resolved.food, Some(FoodSelection::Name("bread".into())));
        assert_eq!(resolved.hand, Hand::Off);
        assert!(!resolved.equip_old_item);
        assert_eq!(resolved.priority, FoodPriority::EffectiveQuality);
    }

    #[test]
    fn completion_labels() {
        assert_eq!(Completion::TimedOut.to_string(), "timed_out");
        assert_eq!("NO_FOOD".parse::<Completion>().ok(), Some(Completion::NoFood));
    }
}
