//! Inventory items, hands and the agent's vital readings.

/// One of the two equip slots that can hold an active item.
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
pub enum Hand {
    /// Primary hand (selected quick-bar slot).
    #[default]
    Main,
    /// Off-hand slot.
    Off,
}

impl Hand {
    /// Maps the `use_off_hand` style flag onto a hand.
    pub const fn from_off_hand(off_hand: bool) -> Self {
        if off_hand { Hand::Off } else { Hand::Main }
    }

    pub const fn is_off_hand(self) -> bool {
        matches!(self, Hand::Off)
    }
}

/// An item stack as reported by the host's inventory.
///
/// `name` is the item identity used by the food registry and ban list,
/// `type_id` the numeric id of the same identity for the running game
/// version. `display_name` distinguishes variants that share an identity
/// (renamed or enchanted stacks).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub type_id: u32,
    pub name: String,
    pub display_name: String,
    /// Inventory window slot currently occupied by the stack.
    pub slot: u16,
    pub count: u8,
    /// Serialized item tag, if the stack carries one.
    pub nbt: Option<String>,
}

impl Item {
    pub fn new(type_id: u32, name: impl Into<String>, slot: u16, count: u8) -> Self {
        let name = name.into();
        Self {
            type_id,
            display_name: name.clone(),
            name,
            slot,
            count,
            nbt: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_nbt(mut self, nbt: impl Into<String>) -> Self {
        self.nbt = Some(nbt.into());
        self
    }

    /// Same identity and same display variant.
    ///
    /// This is the comparison that decides whether the hand has to be
    /// re-equipped before eating.
    pub fn same_variant(&self, other: &Item) -> bool {
        self.name == other.name && self.display_name == other.display_name
    }

    /// Same identity and same item tag, regardless of slot or count.
    pub fn same_stack_kind(&self, other: &Item) -> bool {
        self.name == other.name && self.nbt == other.nbt
    }
}

/// Health and hunger readings of the agent.
///
/// Health is measured in half-hearts (0..=20), food in hunger points
/// (0..=20).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub health: f32,
    pub food: u32,
    pub saturation: f32,
}

impl Vitals {
    pub const MAX_HEALTH: f32 = 20.0;
    pub const MAX_FOOD: u32 = 20;

    pub const fn new(health: f32, food: u32, saturation: f32) -> Self {
        Self {
            health,
            food,
            saturation,
        }
    }

    /// Fully healed and fed, as after a respawn.
    pub const fn full() -> Self {
        Self::new(Self::MAX_HEALTH, Self::MAX_FOOD, 5.0)
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::full()
    }
}
