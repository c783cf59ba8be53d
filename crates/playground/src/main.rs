//! Auto-eat playground binary.
//!
//! Runs the engine against a [`SimulatedAgent`] under constant hunger
//! pressure: the agent holds a sword, carries golden apples, loses hunger
//! steadily, picks up bread now and then, and flips its eating hand every
//! few seconds. Lifecycle events and vitals are logged to stderr.
//!
//! ```bash
//! RUST_LOG=auto_eat=debug cargo run -p auto-eat-playground
//! ```
mod config;

use std::sync::Arc;

use anyhow::Result;
use auto_eat::sim::{MAIN_HAND_FIRST_SLOT, SimulatedAgent};
use auto_eat::{
    AgentHandle, AutoEat, AutoEatConfigPatch, EatEvent, EntityId, FoodOracle, FoodRegistry, Item,
    env,
};
use food_content::ContentFactory;
use tokio::time::{Instant, interval};

use config::PlaygroundConfig;

const AGENT: EntityId = EntityId(1);
const TICK: std::time::Duration = std::time::Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = PlaygroundConfig::from_env();
    let factory = ContentFactory::new(&settings.data_dir);

    let config = config::engine_config(&factory, env::patch_from_env())?;
    let foods = Arc::new(FoodRegistry::from_definitions(factory.load_foods()?));
    tracing::info!(foods = foods.len(), data_dir = %factory.data_dir().display(), "content loaded");

    let golden_apple = foods
        .food_by_name("golden_apple")
        .ok_or_else(|| anyhow::anyhow!("food table has no golden_apple"))?;
    let bread = foods
        .food_by_name("bread")
        .ok_or_else(|| anyhow::anyhow!("food table has no bread"))?;
    let bread = Item::new(bread.id, &bread.name, 10, 1).with_display_name(&bread.display_name);

    let agent = SimulatedAgent::with_foods(AGENT, foods.clone())
        .with_item(Item::new(276, "diamond_sword", MAIN_HAND_FIRST_SLOT, 1))
        .with_item(
            Item::new(golden_apple.id, &golden_apple.name, 9, 64)
                .with_display_name(&golden_apple.display_name),
        )
        .with_auto_consume(settings.eating_time)
        .with_equip_delay(settings.equip_delay);

    let engine = AutoEat::builder(Arc::new(agent.clone()), foods.clone())
        .config(config)
        .build();
    engine.register_observer(log_event);
    engine.enable_auto();

    let worker = engine.start();
    let ticker = agent.spawn_ticker(TICK);

    let deadline = Instant::now() + settings.run_for;
    let mut hunger = interval(settings.hunger_period);
    let mut flip = interval(settings.flip_period);
    let mut pickup = interval(settings.pickup_period);
    let mut monitor = interval(std::time::Duration::from_secs(1));
    // Skip the immediate first tick of the periodic actions.
    flip.tick().await;
    pickup.tick().await;

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => break,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
            _ = hunger.tick() => agent.starve(1),
            _ = flip.tick() => {
                let use_off_hand = !engine.config().use_off_hand;
                engine.set_options(AutoEatConfigPatch {
                    use_off_hand: Some(use_off_hand),
                    ..Default::default()
                });
                tracing::info!(use_off_hand, "flipped eating hand");
            }
            _ = pickup.tick() => {
                agent.set_slot(bread.slot, Some(bread.clone()));
                agent.collect(AGENT, Some(bread.type_id));
            }
            _ = monitor.tick() => {
                let vitals = agent.vitals();
                tracing::info!(
                    health = vitals.health,
                    food = vitals.food,
                    saturation = vitals.saturation,
                    eating = engine.is_eating(),
                    "vitals"
                );
            }
        }
    }

    engine.shutdown();
    ticker.abort();
    worker.await?;
    tracing::info!("playground finished");
    Ok(())
}

fn log_event(event: &EatEvent) {
    match event {
        EatEvent::Started { food, hand } => {
            tracing::info!(food = %food.display_name, %hand, "auto eat started");
        }
        EatEvent::Finished {
            food,
            hand,
            completion,
            error,
        } => {
            tracing::info!(
                food = food.as_ref().map(|food| food.display_name.as_str()),
                %hand,
                %completion,
                error = error.as_ref().map(tracing::field::display),
                "auto eat finished"
            );
        }
        EatEvent::Failed { error, .. } | EatEvent::RestoreFailed { error, .. } => {
            tracing::warn!(%error, "auto eat problem");
        }
    }
}
