//! Synchronous publish/subscribe bus connecting the craft to its observers.
//!
//! Producers such as [`crate::Lander`] and [`crate::RunCoordinator`] hold an
//! `Rc<EventBus>` and publish [`LanderEvent`] values. Observers register a
//! callback for one or more [`EventKind`] streams and never reference each
//! other.
//!
//! Delivery is synchronous, on the publisher's call stack, in registration
//! order. Each publish works on a snapshot of the subscriber list taken before
//! the first callback runs: observers added during dispatch only see later
//! events, and observers removed during dispatch still receive the event in
//! flight. A callback that re-publishes into its own stream is skipped for the
//! nested delivery rather than re-entered.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use log::{debug, trace};

use crate::contact::LandingOutcome;
use crate::lander::LanderState;

/// Notification raised by the simulation core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LanderEvent {
    /// Raised at the start of every active physics step, before input.
    BeforeForce,
    /// Main engine fired this step.
    UpForce,
    /// Rotate-left thruster fired this step.
    LeftForce,
    /// Rotate-right thruster fired this step.
    RightForce,
    /// The craft collected a coin.
    CoinPickup,
    /// The craft collected a fuel cell.
    FuelPickup,
    /// The craft's first contact was classified.
    Landed(LandingOutcome),
    /// The craft's lifecycle state changed.
    StateChanged(LanderState),
    /// The simulation rate dropped to zero.
    GamePaused,
    /// The simulation rate returned to normal.
    GameUnpaused,
}

/// Payload-free name of an event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// See [`LanderEvent::BeforeForce`].
    BeforeForce,
    /// See [`LanderEvent::UpForce`].
    UpForce,
    /// See [`LanderEvent::LeftForce`].
    LeftForce,
    /// See [`LanderEvent::RightForce`].
    RightForce,
    /// See [`LanderEvent::CoinPickup`].
    CoinPickup,
    /// See [`LanderEvent::FuelPickup`].
    FuelPickup,
    /// See [`LanderEvent::Landed`].
    Landed,
    /// See [`LanderEvent::StateChanged`].
    StateChanged,
    /// See [`LanderEvent::GamePaused`].
    GamePaused,
    /// See [`LanderEvent::GameUnpaused`].
    GameUnpaused,
}

impl EventKind {
    /// Every stream, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::BeforeForce,
        Self::UpForce,
        Self::LeftForce,
        Self::RightForce,
        Self::CoinPickup,
        Self::FuelPickup,
        Self::Landed,
        Self::StateChanged,
        Self::GamePaused,
        Self::GameUnpaused,
    ];
}

impl LanderEvent {
    /// Stream this event is delivered on.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::BeforeForce => EventKind::BeforeForce,
            Self::UpForce => EventKind::UpForce,
            Self::LeftForce => EventKind::LeftForce,
            Self::RightForce => EventKind::RightForce,
            Self::CoinPickup => EventKind::CoinPickup,
            Self::FuelPickup => EventKind::FuelPickup,
            Self::Landed(_) => EventKind::Landed,
            Self::StateChanged(_) => EventKind::StateChanged,
            Self::GamePaused => EventKind::GamePaused,
            Self::GameUnpaused => EventKind::GameUnpaused,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Rc<RefCell<dyn FnMut(&LanderEvent)>>;

struct Subscriber {
    id: SubscriptionId,
    handler: Handler,
}

/// Registry of observer callbacks keyed by [`EventKind`].
#[derive(Default)]
pub struct EventBus {
    next_id: Cell<u64>,
    streams: RefCell<HashMap<EventKind, Vec<Subscriber>>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let streams = self.streams.borrow();
        let mut counts: Vec<_> = streams
            .iter()
            .map(|(kind, subs)| (*kind, subs.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id.get())
            .field("subscribers", &counts)
            .finish()
    }
}

impl EventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for a single stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use lander::{EventBus, EventKind, LanderEvent};
    ///
    /// let bus = EventBus::new();
    /// let fired = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&fired);
    /// bus.subscribe(EventKind::UpForce, move |_| counter.set(counter.get() + 1));
    /// bus.publish(&LanderEvent::UpForce);
    /// bus.publish(&LanderEvent::LeftForce);
    /// assert_eq!(fired.get(), 1);
    /// ```
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&LanderEvent) + 'static,
    {
        self.subscribe_many(&[kind], handler)
    }

    /// Registers one `handler` for several streams under a single id.
    ///
    /// Duplicate kinds in `kinds` register the handler only once per stream.
    pub fn subscribe_many<F>(&self, kinds: &[EventKind], handler: F) -> SubscriptionId
    where
        F: FnMut(&LanderEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get().wrapping_add(1));
        let shared: Handler = Rc::new(RefCell::new(handler));
        let mut streams = self.streams.borrow_mut();
        for kind in kinds {
            let subscribers = streams.entry(*kind).or_default();
            if subscribers.iter().any(|sub| sub.id == id) {
                continue;
            }
            subscribers.push(Subscriber {
                id,
                handler: Rc::clone(&shared),
            });
        }
        trace!("subscription {id:?} registered for {kinds:?}");
        id
    }

    /// Removes a subscription from every stream it was registered on.
    ///
    /// Returns `false` when the id was unknown or already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut removed = false;
        for subscribers in self.streams.borrow_mut().values_mut() {
            let before = subscribers.len();
            subscribers.retain(|sub| sub.id != id);
            removed |= subscribers.len() != before;
        }
        removed
    }

    /// Number of observers currently registered for `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.streams.borrow().get(&kind).map_or(0, Vec::len)
    }

    /// Delivers `event` to every observer of its stream.
    ///
    /// Returns how many observers were invoked. Publishing with no observers
    /// is a no-op.
    pub fn publish(&self, event: &LanderEvent) -> usize {
        let kind = event.kind();
        let snapshot: Vec<Handler> = self
            .streams
            .borrow()
            .get(&kind)
            .map(|subs| subs.iter().map(|sub| Rc::clone(&sub.handler)).collect())
            .unwrap_or_default();

        let mut delivered = 0;
        for handler in snapshot {
            if let Ok(mut callback) = handler.try_borrow_mut() {
                (*callback)(event);
                delivered += 1;
            } else {
                debug!("skipping re-entrant delivery of {kind:?}");
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn recorder(
        bus: &EventBus,
        kind: EventKind,
        tag: &'static str,
        log: &Rc<RefCell<Vec<&'static str>>>,
    ) -> SubscriptionId {
        let sink = Rc::clone(log);
        bus.subscribe(kind, move |_| sink.borrow_mut().push(tag))
    }

    #[rstest]
    fn publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(&LanderEvent::BeforeForce), 0);
    }

    #[rstest]
    fn delivers_in_registration_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        recorder(&bus, EventKind::CoinPickup, "first", &log);
        recorder(&bus, EventKind::CoinPickup, "second", &log);
        recorder(&bus, EventKind::CoinPickup, "third", &log);
        assert_eq!(bus.publish(&LanderEvent::CoinPickup), 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[rstest]
    fn streams_are_isolated() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        recorder(&bus, EventKind::LeftForce, "left", &log);
        bus.publish(&LanderEvent::RightForce);
        assert!(log.borrow().is_empty());
    }

    #[rstest]
    fn unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = recorder(&bus, EventKind::FuelPickup, "fuel", &log);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&LanderEvent::FuelPickup);
        assert!(log.borrow().is_empty());
        assert_eq!(bus.subscriber_count(EventKind::FuelPickup), 0);
    }

    #[rstest]
    fn subscribe_many_shares_one_id() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = bus.subscribe_many(
            &[EventKind::GamePaused, EventKind::GameUnpaused, EventKind::GamePaused],
            move |_| counter.set(counter.get() + 1),
        );
        assert_eq!(bus.subscriber_count(EventKind::GamePaused), 1);
        bus.publish(&LanderEvent::GamePaused);
        bus.publish(&LanderEvent::GameUnpaused);
        assert_eq!(hits.get(), 2);
        assert!(bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(EventKind::GameUnpaused), 0);
    }

    #[rstest]
    fn subscribing_during_dispatch_waits_for_next_publish() {
        let bus = Rc::new(EventBus::new());
        let late_hits = Rc::new(Cell::new(0));
        let bus_handle = Rc::clone(&bus);
        let late = Rc::clone(&late_hits);
        bus.subscribe(EventKind::UpForce, move |_| {
            let counter = Rc::clone(&late);
            bus_handle.subscribe(EventKind::UpForce, move |_| counter.set(counter.get() + 1));
        });
        assert_eq!(bus.publish(&LanderEvent::UpForce), 1);
        assert_eq!(late_hits.get(), 0);
        assert_eq!(bus.publish(&LanderEvent::UpForce), 2);
        assert_eq!(late_hits.get(), 1);
    }

    #[rstest]
    fn unsubscribing_during_dispatch_keeps_current_snapshot() {
        let bus = Rc::new(EventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let victim = Rc::new(Cell::new(None));
        let bus_handle = Rc::clone(&bus);
        let victim_id = Rc::clone(&victim);
        bus.subscribe(EventKind::CoinPickup, move |_| {
            if let Some(id) = victim_id.get() {
                bus_handle.unsubscribe(id);
            }
        });
        victim.set(Some(recorder(&bus, EventKind::CoinPickup, "victim", &log)));
        bus.publish(&LanderEvent::CoinPickup);
        bus.publish(&LanderEvent::CoinPickup);
        assert_eq!(*log.borrow(), vec!["victim"]);
    }

    #[rstest]
    fn reentrant_publish_skips_running_handler() {
        let bus = Rc::new(EventBus::new());
        let hits = Rc::new(Cell::new(0));
        let bus_handle = Rc::clone(&bus);
        let counter = Rc::clone(&hits);
        bus.subscribe(EventKind::BeforeForce, move |_| {
            counter.set(counter.get() + 1);
            assert_eq!(bus_handle.publish(&LanderEvent::BeforeForce), 0);
        });
        assert_eq!(bus.publish(&LanderEvent::BeforeForce), 1);
        assert_eq!(hits.get(), 1);
    }

    #[rstest]
    fn all_kinds_are_distinct() {
        let unique: hashbrown::HashSet<_> = EventKind::ALL.iter().collect();
        assert_eq!(unique.len(), EventKind::ALL.len());
        assert_eq!(LanderEvent::GameUnpaused.kind(), EventKind::GameUnpaused);
    }
}
