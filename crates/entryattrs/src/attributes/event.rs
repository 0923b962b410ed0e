//! Lifecycle notifications and the subscriber registry.
//!
//! A store publishes an [`AttributeEvent`] for every step of a mutation.
//! Subscribers are plain `FnMut` callbacks, invoked synchronously in the order
//! they were registered, before the mutating call returns.

use serde::{Deserialize, Serialize};

/// A single notification emitted by an [`AttributeStore`](super::AttributeStore).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", content = "key", rename_all = "snake_case")]
pub enum AttributeEvent {
    /// A custom key is about to be inserted. Fired before the store changes.
    AboutToBeAdded(String),

    /// A custom key was inserted.
    Added(String),

    /// A custom key is about to be removed. Fired before the store changes.
    AboutToBeRemoved(String),

    /// A custom key was removed.
    Removed(String),

    /// The set of custom keys is about to be replaced wholesale.
    AboutToBeReset,

    /// The set of custom keys was replaced wholesale.
    Reset,

    /// Something in the store changed (value, key set or protection flag).
    Modified,

    /// `set()` targeted a default key. Fired even when nothing changed.
    DefaultKeyModified,

    /// An existing custom key changed value or protection.
    CustomKeyModified(String),
}

/// The channel an event was published on, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AboutToBeAdded,
    Added,
    AboutToBeRemoved,
    Removed,
    AboutToBeReset,
    Reset,
    Modified,
    DefaultKeyModified,
    CustomKeyModified,
}

impl AttributeEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AttributeEvent::AboutToBeAdded(_) => EventKind::AboutToBeAdded,
            AttributeEvent::Added(_) => EventKind::Added,
            AttributeEvent::AboutToBeRemoved(_) => EventKind::AboutToBeRemoved,
            AttributeEvent::Removed(_) => EventKind::Removed,
            AttributeEvent::AboutToBeReset => EventKind::AboutToBeReset,
            AttributeEvent::Reset => EventKind::Reset,
            AttributeEvent::Modified => EventKind::Modified,
            AttributeEvent::DefaultKeyModified => EventKind::DefaultKeyModified,
            AttributeEvent::CustomKeyModified(_) => EventKind::CustomKeyModified,
        }
    }

    /// The key this event refers to, for the per-key channels.
    pub fn key(&self) -> Option<&str> {
        match self {
            AttributeEvent::AboutToBeAdded(key)
            | AttributeEvent::Added(key)
            | AttributeEvent::AboutToBeRemoved(key)
            | AttributeEvent::Removed(key)
            | AttributeEvent::CustomKeyModified(key) => Some(key),
            AttributeEvent::AboutToBeReset
            | AttributeEvent::Reset
            | AttributeEvent::Modified
            | AttributeEvent::DefaultKeyModified => None,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::AboutToBeAdded => "about-to-add",
            EventKind::Added => "added",
            EventKind::AboutToBeRemoved => "about-to-remove",
            EventKind::Removed => "removed",
            EventKind::AboutToBeReset => "about-to-reset",
            EventKind::Reset => "reset",
            EventKind::Modified => "modified",
            EventKind::DefaultKeyModified => "default-key-modified",
            EventKind::CustomKeyModified => "custom-key-modified",
        };
        f.write_str(name)
    }
}

/// Handle returned by `subscribe()`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&AttributeEvent)>;

/// Ordered list of subscriber callbacks.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub(crate) fn add<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&AttributeEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn dispatch(&mut self, event: &AttributeEvent) {
        for (_, callback) in self.entries.iter_mut() {
            callback(event);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn key_is_present_only_for_keyed_events() {
        assert_eq!(AttributeEvent::Added("Foo".into()).key(), Some("Foo"));
        assert_eq!(
            AttributeEvent::CustomKeyModified("Bar".into()).key(),
            Some("Bar")
        );
        assert_eq!(AttributeEvent::Modified.key(), None);
        assert_eq!(AttributeEvent::DefaultKeyModified.key(), None);
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(
            AttributeEvent::AboutToBeAdded("x".into()).kind().to_string(),
            "about-to-add"
        );
        assert_eq!(AttributeEvent::Reset.kind().to_string(), "reset");
        assert_eq!(
            AttributeEvent::DefaultKeyModified.kind().to_string(),
            "default-key-modified"
        );
    }

    #[test]
    fn serializes_with_event_tag() {
        let json = serde_json::to_string(&AttributeEvent::Added("Foo".into())).unwrap();
        assert_eq!(json, r#"{"event":"added","key":"Foo"}"#);

        let json = serde_json::to_string(&AttributeEvent::Modified).unwrap();
        assert_eq!(json, r#"{"event":"modified"}"#);
    }

    #[test]
    fn dispatch_runs_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::default();

        let first = Rc::clone(&seen);
        subscribers.add(move |_| first.borrow_mut().push(1));
        let second = Rc::clone(&seen);
        subscribers.add(move |_| second.borrow_mut().push(2));

        subscribers.dispatch(&AttributeEvent::Modified);
        subscribers.dispatch(&AttributeEvent::Reset);

        assert_eq!(*seen.borrow(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn remove_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut subscribers = Subscribers::default();

        let counter = Rc::clone(&count);
        let id = subscribers.add(move |_| *counter.borrow_mut() += 1);

        subscribers.dispatch(&AttributeEvent::Modified);
        assert!(subscribers.remove(id));
        assert!(!subscribers.remove(id));
        subscribers.dispatch(&AttributeEvent::Modified);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(subscribers.len(), 0);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut subscribers = Subscribers::default();
        let a = subscribers.add(|_| {});
        subscribers.remove(a);
        let b = subscribers.add(|_| {});
        assert_ne!(a, b);
    }
}
