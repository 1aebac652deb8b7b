// ABOUTME: Event dispatch module backing view helper calls
// ABOUTME: Defines the Event value type, the dispatch capability trait, and a synchronous manager

pub mod event;
pub mod manager;

pub use event::Event;
pub use manager::EventManager;

/// Event name prefix for view helper calls.
pub const HELPER_EVENT_PREFIX: &str = "view.call.helper.";

/// Derive the event name a helper call is dispatched under.
pub fn helper_event_name(helper: &str) -> String {
    format!("{HELPER_EVENT_PREFIX}{helper}")
}

/// Capability a view needs from an event collaborator: subscriber lookup and
/// synchronous dispatch. The view only queries and triggers; registration
/// belongs to the collaborator's owner.
pub trait EventDispatch: Send + Sync {
    fn has_subscribers(&self, event_name: &str) -> bool;

    fn trigger(&self, event_name: &str, event: &mut Event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_event_name() {
        assert_eq!(helper_event_name("format_date"), "view.call.helper.format_date");
        assert_eq!(helper_event_name(""), "view.call.helper.");
    }
}
