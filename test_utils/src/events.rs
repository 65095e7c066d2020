//! Recording observer for asserting on bus traffic.

use std::cell::RefCell;
use std::rc::Rc;

use lander::{EventBus, EventKind, LanderEvent, SubscriptionId};

/// Records every event published on a bus, in delivery order.
#[derive(Debug, Clone)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<LanderEvent>>>,
    subscription: SubscriptionId,
}

impl EventRecorder {
    /// Subscribes to every stream on `bus`.
    pub fn attach(bus: &EventBus) -> Self {
        Self::attach_to(bus, &EventKind::ALL)
    }

    /// Subscribes to the given streams on `bus`.
    pub fn attach_to(bus: &EventBus, kinds: &[EventKind]) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let subscription =
            bus.subscribe_many(kinds, move |event| sink.borrow_mut().push(*event));
        Self {
            events,
            subscription,
        }
    }

    /// Events seen so far.
    pub fn events(&self) -> Vec<LanderEvent> {
        self.events.borrow().clone()
    }

    /// Kinds of the events seen so far.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.borrow().iter().map(LanderEvent::kind).collect()
    }

    /// Number of events of `kind` seen so far.
    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Subscription id, for unsubscribing.
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }
}
