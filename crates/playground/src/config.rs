//! Playground settings read from `PLAYGROUND_*` variables.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use auto_eat::{AutoEatConfig, AutoEatConfigPatch};
use food_content::ContentFactory;

/// Engine configuration for the playground run.
///
/// Layers, lowest first: defaults, the playground's own choices (nothing
/// banned, main hand), `auto_eat.toml`, then `env`.
pub fn engine_config(factory: &ContentFactory, env: AutoEatConfigPatch) -> Result<AutoEatConfig> {
    let mut base = AutoEatConfig::default();
    base.merge(AutoEatConfigPatch {
        banned_food: Some(Default::default()),
        use_off_hand: Some(false),
        ..Default::default()
    });
    let mut config = factory.load_config_over(base)?;
    config.merge(env);
    Ok(config)
}

#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    /// Directory searched for `auto_eat.toml` and `foods.ron`.
    pub data_dir: PathBuf,
    pub run_for: Duration,
    /// One hunger point is lost per period.
    pub hunger_period: Duration,
    /// The eating hand is flipped once per period.
    pub flip_period: Duration,
    /// A bread is picked up once per period.
    pub pickup_period: Duration,
    pub eating_time: Duration,
    pub equip_delay: Duration,
}

impl PlaygroundConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("PLAYGROUND_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            run_for: read_secs("PLAYGROUND_RUN_SECS").unwrap_or(defaults.run_for),
            hunger_period: read_millis("PLAYGROUND_HUNGER_MS").unwrap_or(defaults.hunger_period),
            flip_period: read_secs("PLAYGROUND_FLIP_SECS").unwrap_or(defaults.flip_period),
            pickup_period: read_secs("PLAYGROUND_PICKUP_SECS").unwrap_or(defaults.pickup_period),
            eating_time: read_millis("PLAYGROUND_EATING_MS").unwrap_or(defaults.eating_time),
            equip_delay: read_millis("PLAYGROUND_EQUIP_DELAY_MS").unwrap_or(defaults.equip_delay),
        }
    }
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            run_for: Duration::from_secs(30),
            hunger_period: Duration::from_millis(400),
            flip_period: Duration::from_secs(10),
            pickup_period: Duration::from_secs(7),
            eating_time: Duration::from_millis(1610),
            equip_delay: Duration::from_millis(50),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_secs(key: &str) -> Option<Duration> {
    read_env(key).map(Duration::from_secs)
}

fn read_millis(key: &str) -> Option<Duration> {
    read_env(key).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playground_defaults_yield_to_file_and_env() {
        let dir = tempfile::tempdir().expect("temp dir");
        let factory = ContentFactory::new(dir.path());

        let config = engine_config(&factory, AutoEatConfigPatch::default()).expect("config");
        assert!(config.banned_food.is_empty());
        assert!(!config.use_off_hand);

        std::fs::write(
            dir.path().join(ContentFactory::CONFIG_FILE),
            "banned_food = [\"rotten_flesh\"]\n",
        )
        .expect("write config");
        let config = engine_config(
            &factory,
            AutoEatConfigPatch {
                use_off_hand: Some(true),
                ..Default::default()
            },
        )
        .expect("config");

        assert!(config.banned_food.contains("rotten_flesh"));
        assert!(config.use_off_hand);
    }
}
