//! Food selection policy.
//!
//! Ranking is a pure query over an inventory snapshot: keep registered
//! foods, drop banned identities, order by the requested metric. An explicit
//! request bypasses ranking and is only resolved against the inventory.
use std::collections::BTreeSet;

use crate::food::{FoodDefinition, FoodOracle, FoodPriority};
use crate::item::Item;

/// Ways a caller can name the food it wants eaten.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoodSelection {
    /// Item identity, e.g. `"cooked_beef"`.
    Name(String),
    /// Numeric item id.
    Id(u32),
    /// A concrete stack previously read from the inventory.
    Item(Item),
    /// A registry entry, as resolved from a picked-up entity.
    Food(FoodDefinition),
}

impl From<&str> for FoodSelection {
    fn from(name: &str) -> Self {
        FoodSelection::Name(name.to_owned())
    }
}

impl From<u32> for FoodSelection {
    fn from(id: u32) -> Self {
        FoodSelection::Id(id)
    }
}

impl From<Item> for FoodSelection {
    fn from(item: Item) -> Self {
        FoodSelection::Item(item)
    }
}

impl From<FoodDefinition> for FoodSelection {
    fn from(food: FoodDefinition) -> Self {
        FoodSelection::Food(food)
    }
}

/// Ranks the edible items of `items`, best first.
///
/// Items unknown to `foods` or listed in `banned` are excluded. The sort is
/// stable and descending on the registry value of `priority`; items with
/// equal scores keep their inventory order.
pub fn find_best_choices(
    items: &[Item],
    foods: &dyn FoodOracle,
    banned: &BTreeSet<String>,
    priority: FoodPriority,
) -> Vec<Item> {
    let mut ranked: Vec<(f32, &Item)> = items
        .iter()
        .filter(|item| !banned.contains(&item.name))
        .filter_map(|item| {
            foods
                .food_by_name(&item.name)
                .map(|food| (food.metric(priority), item))
        })
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    ranked.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Resolves an explicit selection to a stack in `items`.
///
/// Returns `None` when nothing in the inventory matches, in which case the
/// request yields no choice at all.
pub fn resolve_selection(selection: &FoodSelection, items: &[Item]) -> Option<Item> {
    let found = match selection {
        FoodSelection::Name(name) => items.iter().find(|item| &item.name == name),
        FoodSelection::Id(id) => items.iter().find(|item| item.type_id == *id),
        FoodSelection::Food(food) => items.iter().find(|item| item.type_id == food.id),
        // The stack may have moved since it was read; prefer the exact slot.
        FoodSelection::Item(wanted) => items
            .iter()
            .find(|item| item.slot == wanted.slot && item.type_id == wanted.type_id)
            .or_else(|| items.iter().find(|item| item.same_stack_kind(wanted))),
    };
    found.cloned()
}
