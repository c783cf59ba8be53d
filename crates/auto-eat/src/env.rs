//! Configuration overlay from `AUTO_EAT_*` environment variables.
//!
//! Every variable is optional. Values that fail to parse are ignored so a
//! typo never replaces a working setting.
use std::collections::BTreeSet;
use std::env;
use std::str::FromStr;

use food_core::{AutoEatConfig, AutoEatConfigPatch};

pub const PRIORITY: &str = "AUTO_EAT_PRIORITY";
pub const MIN_HUNGER: &str = "AUTO_EAT_MIN_HUNGER";
pub const MIN_HEALTH: &str = "AUTO_EAT_MIN_HEALTH";
pub const BANNED_FOOD: &str = "AUTO_EAT_BANNED_FOOD";
pub const RETURN_TO_LAST_ITEM: &str = "AUTO_EAT_RETURN_TO_LAST_ITEM";
pub const USE_OFF_HAND: &str = "AUTO_EAT_USE_OFF_HAND";
pub const TIMEOUT_MS: &str = "AUTO_EAT_TIMEOUT_MS";
pub const STRICT_ERRORS: &str = "AUTO_EAT_STRICT_ERRORS";
pub const COMPLETION: &str = "AUTO_EAT_COMPLETION";
pub const CHECK_ON_HEALTH: &str = "AUTO_EAT_CHECK_ON_HEALTH";
pub const CHECK_ON_PICKUP: &str = "AUTO_EAT_CHECK_ON_PICKUP";

/// Reads the overlay from the process environment.
pub fn patch_from_env() -> AutoEatConfigPatch {
    patch_from_vars(|key| env::var(key).ok())
}

/// Default configuration with the environment overlay applied.
pub fn config_from_env() -> AutoEatConfig {
    let mut config = AutoEatConfig::default();
    config.merge(patch_from_env());
    config
}

/// Builds the overlay from an arbitrary variable source.
pub fn patch_from_vars<F>(lookup: F) -> AutoEatConfigPatch
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).map(|value| value.trim().to_owned());

    AutoEatConfigPatch {
        priority: read(PRIORITY).and_then(|value| parse(&value)),
        min_hunger: read(MIN_HUNGER).and_then(|value| parse(&value)),
        min_health: read(MIN_HEALTH).and_then(|value| parse(&value)),
        banned_food: read(BANNED_FOOD).map(|value| parse_list(&value)),
        return_to_last_item: read(RETURN_TO_LAST_ITEM).and_then(|value| parse_bool(&value)),
        use_off_hand: read(USE_OFF_HAND).and_then(|value| parse_bool(&value)),
        eating_timeout_ms: read(TIMEOUT_MS).and_then(|value| parse(&value)),
        strict_errors: read(STRICT_ERRORS).and_then(|value| parse_bool(&value)),
        completion: read(COMPLETION).and_then(|value| parse(&value)),
        check_on_health: read(CHECK_ON_HEALTH).and_then(|value| parse_bool(&value)),
        check_on_item_pickup: read(CHECK_ON_PICKUP).and_then(|value| parse_bool(&value)),
        ..Default::default()
    }
}

fn parse<T>(value: &str) -> Option<T>
where
    T: FromStr,
{
    value.parse().ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Comma-separated names; an empty value clears the list.
fn parse_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
