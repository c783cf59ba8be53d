//! The equip → activate → wait → restore sequence.
use food_core::{AutoEatConfig, CompletionMode, Hand, Item, find_best_choices, resolve_selection};
use tracing::{debug, warn};

use super::{AbortHandle, AbortReason, AutoEat, EngineState, HeldItem};
use crate::api::{Completion, EatError, EatOutcome, EatRequest, ResolvedRequest, Result};
use crate::events::EatEvent;

use super::completion;

/// Clears the single-flight flag when the sequence exits, however it exits.
///
/// If the sequence future is dropped before reaching its normal exit, the
/// guard publishes the canceled finish itself.
struct EatingGuard<'a> {
    engine: &'a AutoEat,
    abort: AbortHandle,
    sequence: u64,
    hand: Hand,
    food: Option<Item>,
    finished: bool,
}

impl EatingGuard<'_> {
    fn release(&self) {
        let mut state = self.engine.state();
        state.eating = false;
        state.pending = None;
    }
}

impl Drop for EatingGuard<'_> {
    fn drop(&mut self) {
        self.release();
        if self.finished {
            return;
        }
        self.abort.abort(AbortReason::Canceled);
        debug!(
            target: "auto_eat::engine",
            sequence = self.sequence,
            "eat sequence dropped before finishing"
        );
        self.engine.publish(EatEvent::Finished {
            food: self.food.take(),
            hand: self.hand,
            completion: Completion::Canceled,
            error: Some(EatError::Canceled),
        });
    }
}

impl AutoEat {
    /// Runs one eat sequence.
    ///
    /// Fails immediately with [`EatError::AlreadyEating`] or
    /// [`EatError::Canceled`] without emitting events. Past that point a
    /// [`EatEvent::Finished`] is always published, and the eating flag is
    /// cleared before it is. Dropping the returned future mid-sequence
    /// publishes a canceled finish.
    pub async fn eat(&self, request: EatRequest) -> Result<EatOutcome> {
        let config = self.config();
        let request = request.resolve(&config);
        let hand = request.hand;
        let mut guard = self.begin_sequence(hand)?;

        debug!(
            target: "auto_eat::engine",
            sequence = guard.sequence,
            %hand,
            equip_old_item = request.equip_old_item,
            "eat sequence started"
        );

        guard.food = self.choose_food(&config, &request);
        let result = match guard.food.clone() {
            Some(food) => self.consume(&config, &request, &food, &guard.abort).await,
            None => {
                debug!(target: "auto_eat::engine", "no food available");
                Err(EatError::NoFoodAvailable)
            }
        };
        guard.finished = true;
        let sequence = guard.sequence;
        let food = guard.food.take();
        drop(guard);

        let (completion, error) = match &result {
            Ok(outcome) => (outcome.completion, outcome.error.clone()),
            Err(error) => (error.completion(), Some(error.clone())),
        };
        debug!(
            target: "auto_eat::engine",
            sequence,
            %completion,
            food = food.as_ref().map(|food| food.name.as_str()),
            "eat sequence finished"
        );
        self.publish(EatEvent::Finished {
            food,
            hand,
            completion,
            error,
        });
        result
    }

    /// Checks preconditions and claims the eating flag in one critical
    /// section, before anything is awaited.
    fn begin_sequence(&self, hand: Hand) -> Result<EatingGuard<'_>> {
        let mut state = self.state();
        check_preconditions(&state)?;

        let abort = AbortHandle::new();
        state.eating = true;
        state.pending = Some(abort.clone());
        state.sequences += 1;

        Ok(EatingGuard {
            engine: self,
            abort,
            sequence: state.sequences,
            hand,
            food: None,
            finished: false,
        })
    }

    fn choose_food(&self, config: &AutoEatConfig, request: &ResolvedRequest) -> Option<Item> {
        let inventory = self.shared.agent.inventory();
        match &request.food {
            Some(selection) => resolve_selection(selection, &inventory),
            None => find_best_choices(
                &inventory,
                self.foods(),
                &config.banned_food,
                request.priority,
            )
            .into_iter()
            .next(),
        }
    }

    async fn consume(
        &self,
        config: &AutoEatConfig,
        request: &ResolvedRequest,
        food: &Item,
        abort: &AbortHandle,
    ) -> Result<EatOutcome> {
        let hand = request.hand;

        let mut waited = self.equip_food(food, hand, abort).await;
        if waited.is_ok() {
            waited = self.activate_and_wait(config, food, hand, abort).await;
        }

        let restored = request.equip_old_item
            && !matches!(waited, Err(EatError::AgentDied))
            && self.restore_last_held(config).await;

        let error = match waited {
            Ok(()) => {
                return Ok(EatOutcome {
                    food: food.clone(),
                    hand,
                    completion: Completion::Success,
                    error: None,
                    restored,
                });
            }
            Err(error) => error,
        };

        warn!(
            target: "auto_eat::engine",
            food = %food.name,
            %hand,
            error = %error,
            "eat sequence failed"
        );
        self.publish(EatEvent::Failed {
            food: food.clone(),
            hand,
            error: error.clone(),
        });

        if config.strict_errors {
            return Err(error);
        }
        Ok(EatOutcome {
            food: food.clone(),
            hand,
            completion: error.completion(),
            error: Some(error),
            restored,
        })
    }

    /// Moves `food` into `hand` unless an identical stack is already there.
    async fn equip_food(&self, food: &Item, hand: Hand, abort: &AbortHandle) -> Result<()> {
        let held = self.shared.agent.held_item(hand);
        if held.as_ref().is_some_and(|held| held.same_variant(food)) {
            return Ok(());
        }

        if let Some(held) = held.filter(|held| !self.foods().is_food(&held.name)) {
            debug!(target: "auto_eat::engine", item = %held.name, %hand, "remembering held item");
            self.state().last_held = Some(HeldItem { item: held, hand });
        }

        tokio::select! {
            biased;
            reason = abort.aborted() => Err(reason.into()),
            equipped = self.shared.agent.equip(food, hand) => {
                equipped.map_err(|source| EatError::EquipFailed {
                    item: food.name.clone(),
                    hand,
                    source,
                })
            }
        }
    }

    async fn activate_and_wait(
        &self,
        config: &AutoEatConfig,
        food: &Item,
        hand: Hand,
        abort: &AbortHandle,
    ) -> Result<()> {
        let agent = self.shared.agent.as_ref();
        // Subscribe before activating so a fast completion is not missed.
        let events = agent.subscribe();
        agent.deactivate_item();
        agent.activate_item(hand);
        self.publish(EatEvent::Started {
            food: food.clone(),
            hand,
        });

        match config.completion {
            CompletionMode::Event => {
                completion::wait_for_signal(agent, events, food, hand, config, abort).await
            }
            CompletionMode::Polling => {
                drop(events);
                completion::poll_until_done(agent, food, hand, config, abort).await
            }
        }
    }

    /// Puts the remembered item back if it left its hand and the agent is
    /// out of danger.
    async fn restore_last_held(&self, config: &AutoEatConfig) -> bool {
        let Some(last) = self.last_held_item() else {
            return false;
        };
        let agent = self.shared.agent.as_ref();

        if agent
            .held_item(last.hand)
            .is_some_and(|held| held.same_stack_kind(&last.item))
        {
            return false;
        }

        let vitals = agent.vitals();
        if !config.out_of_danger(&vitals) {
            debug!(
                target: "auto_eat::engine",
                food = vitals.food,
                health = vitals.health,
                "still hungry, keeping food in hand"
            );
            return false;
        }

        let Some(copy) = agent
            .inventory()
            .into_iter()
            .find(|item| item.same_stack_kind(&last.item))
        else {
            debug!(target: "auto_eat::engine", item = %last.item.name, "remembered item is gone");
            self.state().last_held = None;
            return false;
        };

        match agent.equip(&copy, last.hand).await {
            Ok(()) => {
                debug!(target: "auto_eat::engine", item = %copy.name, hand = %last.hand, "restored held item");
                self.state().last_held = None;
                true
            }
            Err(source) => {
                let error = EatError::RestoreFailed {
                    item: copy.name.clone(),
                    hand: last.hand,
                    source,
                };
                warn!(target: "auto_eat::engine", error = %error, "failed to restore held item");
                self.publish(EatEvent::RestoreFailed {
                    item: copy,
                    hand: last.hand,
                    error,
                });
                false
            }
        }
    }
}

fn check_preconditions(state: &EngineState) -> Result<()> {
    if state.eating {
        return Err(EatError::AlreadyEating);
    }
    if state.canceled {
        return Err(EatError::Canceled);
    }
    Ok(())
}
