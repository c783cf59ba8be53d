//! Detecting the end of item use.
//!
//! The server confirms a finished meal with an entity status packet; the
//! polling fallback instead infers completion from the client's own item-use
//! state and rejects completions that are implausibly fast.
use std::time::Duration;

use food_core::{AutoEatConfig, Hand, Item};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{trace, warn};

use super::AbortHandle;
use crate::api::{AgentEvent, AgentHandle, ENTITY_STATUS_EATING_FINISHED, EatError, Result};

/// Waits for the server's eating-finished status for our entity.
///
/// A slot update that puts a different item type into the watched hand ends
/// the wait with [`EatError::ItemSwitchedEarly`]. Whichever of completion,
/// interruption, timeout and abort is observed first wins.
pub(super) async fn wait_for_signal(
    agent: &dyn AgentHandle,
    mut events: broadcast::Receiver<AgentEvent>,
    food: &Item,
    hand: Hand,
    config: &AutoEatConfig,
    abort: &AbortHandle,
) -> Result<()> {
    let me = agent.entity_id();
    let watched_slot = agent.hand_slot(hand);
    let deadline = tokio::time::sleep(config.eating_timeout());
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            biased;
            reason = abort.aborted() => return Err(reason.into()),
            () = &mut deadline => {
                return Err(EatError::TimedOut { timeout_ms: config.eating_timeout_ms });
            }
            received = events.recv() => match received {
                Ok(AgentEvent::EntityStatus { entity_id, status })
                    if entity_id == me && status == ENTITY_STATUS_EATING_FINISHED =>
                {
                    return Ok(());
                }
                Ok(AgentEvent::SlotUpdated { slot, new, .. }) if slot == watched_slot => {
                    if !new.as_ref().is_some_and(|item| item.type_id == food.type_id) {
                        return Err(EatError::ItemSwitchedEarly {
                            expected: food.name.clone(),
                            found: new.map(|item| item.name),
                        });
                    }
                    trace!(target: "auto_eat::engine", slot, "food stack changed in place");
                }
                Ok(AgentEvent::Died) => return Err(EatError::AgentDied),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(target: "auto_eat::engine", skipped, "agent events lagged while eating");
                }
                Err(RecvError::Closed) => return Err(EatError::EventStreamClosed),
            }
        }
    }
}

enum PollExit {
    Deadline,
    HandChanged(Option<Item>),
    UseEnded,
}

/// Samples the hand and item-use state every poll interval.
///
/// Success requires item use to end after more than the minimum eating
/// duration and before the timeout. An emptied hand after the minimum
/// duration counts as the last item of the stack being eaten.
pub(super) async fn poll_until_done(
    agent: &dyn AgentHandle,
    food: &Item,
    hand: Hand,
    config: &AutoEatConfig,
    abort: &AbortHandle,
) -> Result<()> {
    let timeout = config.eating_timeout();
    let started = Instant::now();
    let mut ticker = tokio::time::interval(config.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let exit = loop {
        tokio::select! {
            biased;
            reason = abort.aborted() => return Err(reason.into()),
            _ = ticker.tick() => {}
        }

        if started.elapsed() >= timeout {
            break PollExit::Deadline;
        }
        // Eating the last item empties the hand on the same sample that use
        // ends, so use state is checked first.
        if !agent.is_using_item() {
            break PollExit::UseEnded;
        }
        let held = agent.held_item(hand);
        if !held.as_ref().is_some_and(|held| held.name == food.name) {
            break PollExit::HandChanged(held);
        }
    };

    let elapsed = started.elapsed();
    classify(exit, elapsed, food, config)
}

fn classify(exit: PollExit, elapsed: Duration, food: &Item, config: &AutoEatConfig) -> Result<()> {
    if elapsed >= config.eating_timeout() {
        return Err(EatError::TimedOut {
            timeout_ms: config.eating_timeout_ms,
        });
    }
    let plausible = elapsed > config.min_eating_duration();
    match exit {
        PollExit::HandChanged(None) if plausible => Ok(()),
        PollExit::HandChanged(held) => Err(EatError::ItemSwitchedEarly {
            expected: food.name.clone(),
            found: held.map(|item| item.name),
        }),
        _ if plausible => Ok(()),
        PollExit::Deadline | PollExit::UseEnded => Err(EatError::FinishedTooQuickly {
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bread() -> Item {
        Item::new(297, "bread", 36, 3)
    }

    #[test]
    fn plausible_use_end_is_success() {
        let config = AutoEatConfig::default();
        let result = classify(PollExit::UseEnded, Duration::from_millis(1600), &bread(), &config);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn too_quick_use_end_is_rejected() {
        let config = AutoEatConfig::default();
        let result = classify(PollExit::UseEnded, Duration::from_millis(200), &bread(), &config);
        assert_eq!(result, Err(EatError::FinishedTooQuickly { elapsed_ms: 200 }));
    }

    #[test]
    fn exceeding_timeout_wins_over_exit_reason() {
        let config = AutoEatConfig::default();
        let result = classify(PollExit::UseEnded, Duration::from_millis(3000), &bread(), &config);
        assert_eq!(result, Err(EatError::TimedOut { timeout_ms: 3000 }));
    }

    #[test]
    fn emptied_hand_after_plausible_duration_is_success() {
        let config = AutoEatConfig::default();
        let result = classify(PollExit::HandChanged(None), Duration::from_millis(1600), &bread(), &config);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn emptied_hand_too_early_is_a_switch() {
        let config = AutoEatConfig::default();
        let result = classify(PollExit::HandChanged(None), Duration::from_millis(300), &bread(), &config);
        assert_eq!(
            result,
            Err(EatError::ItemSwitchedEarly {
                expected: "bread".into(),
                found: None,
            })
        );
    }

    #[test]
    fn hand_change_reports_replacement() {
        let config = AutoEatConfig::default();
        let sword = Item::new(276, "diamond_sword", 36, 1);
        let result = classify(
            PollExit::HandChanged(Some(sword)),
            Duration::from_millis(1800),
            &bread(),
            &config,
        );
        assert_eq!(
            result,
            Err(EatError::ItemSwitchedEarly {
                expected: "bread".into(),
                found: Some("diamond_sword".into()),
            })
        );
    }
}
