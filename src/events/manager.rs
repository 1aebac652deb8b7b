// ABOUTME: Minimal synchronous event manager keyed by event name
// ABOUTME: Invokes subscribers in registration order, honoring the event stop flag

use std::collections::HashMap;
use tracing::trace;

use super::{Event, EventDispatch};

pub type Subscriber = Box<dyn Fn(&mut Event) + Send + Sync>;

/// Name-keyed subscriber registry with ordered synchronous dispatch. No
/// priorities, no wildcards; unknown event names trigger nothing.
#[derive(Default)]
pub struct EventManager {
    subscribers: HashMap<String, Vec<Subscriber>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    pub fn subscribe<F>(&mut self, event_name: &str, subscriber: F)
    where
        F: Fn(&mut Event) + Send + Sync + 'static,
    {
        self.subscribers
            .entry(event_name.to_string())
            .or_default()
            .push(Box::new(subscriber));
    }

    pub fn subscriber_count(&self, event_name: &str) -> usize {
        self.subscribers
            .get(event_name)
            .map_or(0, |subscribers| subscribers.len())
    }

    pub fn event_names(&self) -> Vec<&str> {
        self.subscribers.keys().map(|k| k.as_str()).collect()
    }
}

impl EventDispatch for EventManager {
    fn has_subscribers(&self, event_name: &str) -> bool {
        self.subscriber_count(event_name) > 0
    }

    fn trigger(&self, event_name: &str, event: &mut Event) {
        let Some(subscribers) = self.subscribers.get(event_name) else {
            return;
        };

        trace!(event_name, count = subscribers.len(), "triggering event");

        for subscriber in subscribers {
            subscriber(event);

            // The flag is checked after each call, so a pre-stopped event
            // still reaches its first subscriber.
            if event.is_stopped() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_has_subscribers() {
        let mut manager = EventManager::new();
        assert!(!manager.has_subscribers("view.ready"));

        manager.subscribe("view.ready", |_| {});
        assert!(manager.has_subscribers("view.ready"));
        assert!(!manager.has_subscribers("view.other"));
        assert_eq!(manager.subscriber_count("view.ready"), 1);
    }

    #[test]
    fn test_trigger_runs_in_registration_order() {
        let mut manager = EventManager::new();
        manager.subscribe("append", |event| {
            let text = format!("{}a", event.data().as_str().unwrap_or(""));
            event.set_data(Value::String(text));
        });
        manager.subscribe("append", |event| {
            let text = format!("{}b", event.data().as_str().unwrap_or(""));
            event.set_data(Value::String(text));
        });

        let mut event = Event::new(None, json!(""));
        manager.trigger("append", &mut event);
        assert_eq!(event.into_data(), json!("ab"));
    }

    #[test]
    fn test_pre_stopped_event_reaches_only_first_subscriber() {
        let calls = Arc::new(AtomicUsize::new(0));

        let mut manager = EventManager::new();
        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            manager.subscribe("stopped", move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }

        let mut event = Event::new(None, Value::Null);
        event.set_stopped(true);
        manager.trigger("stopped", &mut event);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscriber_can_stop_dispatch() {
        let mut manager = EventManager::new();
        manager.subscribe("halt", |event| {
            event.set_data(json!("first"));
            event.set_stopped(true);
        });
        manager.subscribe("halt", |event| {
            event.set_data(json!("second"));
        });

        let mut event = Event::new(None, Value::Null);
        manager.trigger("halt", &mut event);
        assert_eq!(event.into_data(), json!("first"));
    }

    #[test]
    fn test_trigger_unknown_event_is_noop() {
        let manager = EventManager::new();
        let mut event = Event::new(None, json!("untouched"));
        manager.trigger("nobody.home", &mut event);
        assert_eq!(event.into_data(), json!("untouched"));
    }
}
