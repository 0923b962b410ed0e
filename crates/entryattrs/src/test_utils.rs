use crate::attributes::{AttributeEvent, AttributeStore, EventKind, SubscriptionId};
use std::cell::RefCell;
use std::rc::Rc;

/// Records every notification a store publishes.
///
/// Uses `Rc<RefCell<..>>` since stores are single-threaded and the
/// subscriber callback has to share the log with the test.
pub struct EventRecorder {
    id: SubscriptionId,
    events: Rc<RefCell<Vec<AttributeEvent>>>,
}

impl EventRecorder {
    pub fn attach(store: &mut AttributeStore) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = store.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        Self { id, events }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn events(&self) -> Vec<AttributeEvent> {
        self.events.borrow().clone()
    }

    /// Return the recorded events and start over.
    pub fn take(&self) -> Vec<AttributeEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }
}
