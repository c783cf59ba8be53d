//! Broadcast bus with synchronous observers.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;

use super::types::EatEvent;

/// Callback invoked inline for every published event.
///
/// Observers run on the publishing task and must not block.
pub trait EatObserver: Send + Sync {
    fn on_event(&self, event: &EatEvent);
}

impl<F> EatObserver for F
where
    F: Fn(&EatEvent) + Send + Sync,
{
    fn on_event(&self, event: &EatEvent) {
        self(event)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type ObserverList = Vec<(ObserverId, Arc<dyn EatObserver>)>;

/// Fans events out to registered observers and broadcast subscribers.
pub struct EventBus {
    tx: broadcast::Sender<EatEvent>,
    observers: Arc<RwLock<ObserverList>>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    /// Creates a new event bus with default channel capacity
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            observers: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Notifies observers in registration order, then broadcasts.
    pub fn publish(&self, event: EatEvent) {
        // Snapshot so observers may (un)register from inside a callback.
        let observers: Vec<Arc<dyn EatObserver>> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer.on_event(&event);
        }

        if self.tx.send(event).is_err() {
            tracing::trace!(target: "auto_eat::events", "no event subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EatEvent> {
        self.tx.subscribe()
    }

    pub fn register(&self, observer: impl EatObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(observer)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut observers = self
            .observers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(registered, _)| *registered != id);
        observers.len() != before
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            observers: Arc::clone(&self.observers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use food_core::{Hand, Item};
    use std::sync::Mutex;

    fn started() -> EatEvent {
        EatEvent::Started {
            food: Item::new(297, "bread", 36, 1),
            hand: Hand::Main,
        }
    }

    #[test]
    fn observers_run_in_registration_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second"] {
            let seen = Arc::clone(&seen);
            bus.register(move |_: &EatEvent| seen.lock().unwrap().push(label));
        }
        bus.publish(started());

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unregistered_observer_stops_receiving() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let id = bus.register(move |_: &EatEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(started());
        assert!(bus.unregister(id));
        assert!(!bus.unregister(id));
        bus.publish(started());

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.publish(started());
        assert_eq!(rx.recv().await.unwrap(), started());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::with_capacity(1).publish(started());
    }
}
