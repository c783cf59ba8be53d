mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use auto_eat::{
    AutoEatConfigPatch, Completion, EatError, EatEvent, EatRequest, FoodPriority, Hand,
    HostCommand, HostError, Item, SimulatedAgent,
};
use common::*;

#[tokio::test(start_paused = true)]
async fn test_eats_best_food_and_reports_success() {
    let agent = armed_agent(starving()).with_item(steak(10));
    let engine = engine(&agent, AutoEatConfigPatch::default());
    let events = record(&engine);

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    settle().await;

    assert!(engine.is_eating());
    assert_eq!(held_name(&agent, Hand::Main).as_deref(), Some("cooked_beef"));
    assert!(agent.finish_eating());

    let outcome = task.await.unwrap().expect("eating should succeed");
    assert!(outcome.is_success());
    assert_eq!(outcome.food.name, "cooked_beef");
    assert_eq!(outcome.hand, Hand::Main);
    assert!(!engine.is_eating());

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], EatEvent::Started { food, hand: Hand::Main } if food.name == "cooked_beef"));
    assert!(matches!(
        &events[1],
        EatEvent::Finished { food: Some(food), completion: Completion::Success, error: None, .. }
            if food.name == "cooked_beef"
    ));
}

#[tokio::test(start_paused = true)]
async fn test_food_already_in_hand_is_not_reequipped() {
    let agent = SimulatedAgent::new(ME).with_item(bread(MAIN));
    let engine = engine(&agent, AutoEatConfigPatch::default());

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    settle().await;
    agent.finish_eating();
    task.await.unwrap().expect("eating should succeed");

    assert_eq!(
        agent.commands(),
        vec![HostCommand::Deactivate, HostCommand::Activate(Hand::Main)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_eat_is_rejected_without_side_effects() {
    let agent = armed_agent(starving());
    let engine = engine(&agent, AutoEatConfigPatch::default());
    let events = record(&engine);

    let first = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    let second = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    settle().await;

    assert_eq!(second.await.unwrap(), Err(EatError::AlreadyEating));
    assert_eq!(engine.eat(EatRequest::new()).await, Err(EatError::AlreadyEating));
    assert_eq!(agent.equip_count(), 1);

    agent.finish_eating();
    first.await.unwrap().expect("first caller should win");

    let finished = events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| event.is_finished())
        .count();
    assert_eq!(finished, 1);
}

#[tokio::test(start_paused = true)]
async fn test_no_food_emits_finish_without_start() {
    let agent = SimulatedAgent::new(ME).with_item(sword(MAIN));
    let engine = engine(&agent, AutoEatConfigPatch::default());
    let events = record(&engine);

    assert_eq!(
        engine.eat(EatRequest::new()).await,
        Err(EatError::NoFoodAvailable)
    );
    assert!(!engine.is_eating());
    assert!(agent.commands().is_empty());

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![EatEvent::Finished {
            food: None,
            hand: Hand::Main,
            completion: Completion::NoFood,
            error: Some(EatError::NoFoodAvailable),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_banned_only_inventory_has_no_food() {
    let agent = SimulatedAgent::new(ME).with_item(Item::new(367, "rotten_flesh", 12, 5));
    let engine = engine(&agent, AutoEatConfigPatch::default());

    assert!(!engine.has_food());
    assert_eq!(
        engine.eat(EatRequest::new()).await,
        Err(EatError::NoFoodAvailable)
    );

    // Naming the food explicitly bypasses the ban list.
    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new().food("rotten_flesh")).await }
    });
    settle().await;
    agent.finish_eating();
    let outcome = task.await.unwrap().expect("explicit food is eaten");
    assert_eq!(outcome.food.name, "rotten_flesh");
}

#[tokio::test(start_paused = true)]
async fn test_explicit_food_overrides_ranking() {
    let agent = armed_agent(starving()).with_item(steak(10));
    let engine = engine(&agent, AutoEatConfigPatch::default());

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new().food("bread")).await }
    });
    settle().await;
    assert_eq!(held_name(&agent, Hand::Main).as_deref(), Some("bread"));
    agent.finish_eating();

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.food.name, "bread");
}

#[tokio::test(start_paused = true)]
async fn test_request_priority_changes_choice() {
    let agent = SimulatedAgent::new(ME)
        .with_item(Item::new(396, "golden_carrot", 10, 2))
        .with_item(steak(11));
    let engine = engine(&agent, AutoEatConfigPatch::default());

    let ranked = engine.find_best_choices(&[steak(11), Item::new(396, "golden_carrot", 10, 2)], None);
    assert_eq!(ranked[0].name, "cooked_beef");

    let task = tokio::spawn({
        let engine = engine.clone();
        async move {
            engine
                .eat(EatRequest::new().priority(FoodPriority::SaturationRatio))
                .await
        }
    });
    settle().await;
    agent.finish_eating();
    assert_eq!(task.await.unwrap().unwrap().food.name, "golden_carrot");
}

#[tokio::test(start_paused = true)]
async fn test_off_hand_from_config() {
    let agent = armed_agent(starving());
    let engine = engine(
        &agent,
        AutoEatConfigPatch {
            use_off_hand: Some(true),
            ..Default::default()
        },
    );

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    settle().await;

    assert_eq!(held_name(&agent, Hand::Off).as_deref(), Some("bread"));
    assert_eq!(held_name(&agent, Hand::Main).as_deref(), Some("diamond_sword"));
    agent.finish_eating();

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.hand, Hand::Off);
    assert!(agent.commands().contains(&HostCommand::Activate(Hand::Off)));
}

#[tokio::test(start_paused = true)]
async fn test_equip_failure_is_reported() {
    let agent = armed_agent(starving());
    agent.fail_equips(Some("inventory locked"));
    let engine = engine(&agent, AutoEatConfigPatch::default());
    let events = record(&engine);

    let result = engine.eat(EatRequest::new()).await;
    assert_eq!(
        result,
        Err(EatError::EquipFailed {
            item: "bread".into(),
            hand: Hand::Main,
            source: HostError::new("inventory locked"),
        })
    );
    assert!(!engine.is_eating());

    let events = events.lock().unwrap();
    assert!(!events.iter().any(|event| matches!(event, EatEvent::Started { .. })));
    assert!(matches!(events[0], EatEvent::Failed { .. }));
    assert!(matches!(
        events[1],
        EatEvent::Finished { completion: Completion::Interrupted, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_item_switched_early() {
    let agent = armed_agent(starving());
    let engine = engine(&agent, AutoEatConfigPatch::default());

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    settle().await;
    agent.set_hand(Hand::Main, Some(Item::new(261, "bow", MAIN, 1)));

    assert_eq!(
        task.await.unwrap(),
        Err(EatError::ItemSwitchedEarly {
            expected: "bread".into(),
            found: Some("bow".into()),
        })
    );
    assert!(!engine.is_eating());
}

#[tokio::test(start_paused = true)]
async fn test_stack_shrinking_in_hand_is_not_a_switch() {
    let agent = armed_agent(starving());
    let engine = engine(&agent, AutoEatConfigPatch::default());

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    settle().await;
    agent.set_hand(Hand::Main, Some(Item::new(297, "bread", MAIN, 3)));
    settle().await;
    assert!(engine.is_eating());

    agent.finish_eating();
    assert!(task.await.unwrap().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_times_out_without_completion() {
    let agent = armed_agent(starving());
    let engine = engine(&agent, AutoEatConfigPatch::default());
    let started = tokio::time::Instant::now();

    let result = engine.eat(EatRequest::new()).await;

    assert_eq!(result, Err(EatError::TimedOut { timeout_ms: 3000 }));
    assert!(started.elapsed() >= Duration::from_millis(3000));
    assert!(!engine.is_eating());
}

#[tokio::test(start_paused = true)]
async fn test_lenient_errors_resolve_with_outcome() {
    let agent = armed_agent(starving());
    let engine = engine(
        &agent,
        AutoEatConfigPatch {
            strict_errors: Some(false),
            eating_timeout_ms: Some(500),
            ..Default::default()
        },
    );
    let events = record(&engine);

    let outcome = engine
        .eat(EatRequest::new())
        .await
        .expect("lenient mode resolves");

    assert_eq!(outcome.completion, Completion::TimedOut);
    assert_eq!(outcome.error, Some(EatError::TimedOut { timeout_ms: 500 }));
    assert!(!outcome.is_success());
    assert!(
        events
            .lock()
            .unwrap()
            .iter()
            .any(|event| matches!(event, EatEvent::Failed { .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn test_flag_cleared_before_finish_is_observed() {
    let agent = armed_agent(starving());
    let engine = engine(&agent, AutoEatConfigPatch::default());
    let eating_at_finish = Arc::new(Mutex::new(None));

    let observer = {
        let engine = engine.clone();
        let eating_at_finish = Arc::clone(&eating_at_finish);
        move |event: &EatEvent| {
            if event.is_finished() {
                *eating_at_finish.lock().unwrap() = Some(engine.is_eating());
            }
        }
    };
    let id = engine.register_observer(observer);

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    settle().await;
    agent.finish_eating();
    task.await.unwrap().unwrap();

    assert_eq!(*eating_at_finish.lock().unwrap(), Some(false));
    assert!(engine.unregister_observer(id));
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_sequence_keeps_its_config() {
    let agent = armed_agent(starving());
    let engine = engine(&agent, AutoEatConfigPatch::default());

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    settle().await;

    let merged = engine.set_options(AutoEatConfigPatch {
        eating_timeout_ms: Some(100),
        ..Default::default()
    });
    assert_eq!(merged.eating_timeout_ms, 100);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(engine.is_eating());

    agent.finish_eating();
    assert!(task.await.unwrap().is_ok());
    assert_eq!(engine.config().eating_timeout_ms, 100);
}

#[tokio::test(start_paused = true)]
async fn test_broadcast_subscribers_see_lifecycle() {
    let agent = armed_agent(starving());
    let engine = engine(&agent, AutoEatConfigPatch::default());
    let mut rx = engine.subscribe();

    let task = tokio::spawn({
        let engine = engine.clone();
        async move { engine.eat(EatRequest::new()).await }
    });
    settle().await;
    agent.finish_eating();
    task.await.unwrap().unwrap();

    assert!(matches!(rx.recv().await, Ok(EatEvent::Started { .. })));
    assert!(matches!(rx.recv().await, Ok(EatEvent::Finished { .. })));
}
