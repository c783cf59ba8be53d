//! Nutritional metrics and the food registry seam.

/// Sort key used when ranking edible choices.
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
pub enum FoodPriority {
    /// Hunger points restored.
    #[default]
    FoodPoints,
    /// Saturation restored.
    Saturation,
    /// Saturation per hunger point.
    SaturationRatio,
    /// Hunger points plus saturation.
    EffectiveQuality,
}

/// Static nutritional data for one edible item identity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoodDefinition {
    /// Numeric item id for the game version the table was built for.
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub stack_size: u8,
    pub food_points: f32,
    pub saturation: f32,
    pub saturation_ratio: f32,
    pub effective_quality: f32,
}

impl FoodDefinition {
    /// Builds a definition and derives the two computed metrics the way the
    /// game data does: `effective_quality = points + saturation` and
    /// `saturation_ratio = saturation / points`.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        display_name: impl Into<String>,
        food_points: f32,
        saturation: f32,
    ) -> Self {
        let saturation_ratio = if food_points > 0.0 {
            saturation / food_points
        } else {
            0.0
        };
        Self {
            id,
            name: name.into(),
            display_name: display_name.into(),
            stack_size: 64,
            food_points,
            saturation,
            saturation_ratio,
            effective_quality: food_points + saturation,
        }
    }

    pub fn with_stack_size(mut self, stack_size: u8) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// Numeric value of this food for the given sort key.
    pub fn metric(&self, priority: FoodPriority) -> f32 {
        match priority {
            FoodPriority::FoodPoints => self.food_points,
            FoodPriority::Saturation => self.saturation,
            FoodPriority::SaturationRatio => self.saturation_ratio,
            FoodPriority::EffectiveQuality => self.effective_quality,
        }
    }
}

/// Read-only lookup from item identity to nutritional metrics.
///
/// Implementations hold a static table for one game version; the engine
/// only ever reads from it.
pub trait FoodOracle: Send + Sync {
    fn food_by_name(&self, name: &str) -> Option<&FoodDefinition>;

    fn food_by_id(&self, id: u32) -> Option<&FoodDefinition>;

    /// Returns all food definitions available in this oracle.
    fn all_foods(&self) -> Vec<&FoodDefinition>;

    fn is_food(&self, name: &str) -> bool {
        self.food_by_name(name).is_some()
    }
}
