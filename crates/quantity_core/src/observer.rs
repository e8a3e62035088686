//! Observer registry for value-changed and boundary-warning notifications.

use std::collections::BTreeMap;
use std::fmt;

use crate::reducer::{QuantityEvent, WarningKind};

/// Receives notifications from a quantity controller.
///
/// Both methods default to no-ops so observers only implement what they react to.
pub trait QuantityListener {
    /// The committed value changed.
    fn on_value_changed(&mut self, _value: i32, _position: i32) {}

    /// A boundary rejected or was touched by a requested change.
    fn on_warning(&mut self, _kind: WarningKind, _bound: i32) {}
}

impl QuantityEvent {
    /// Routes this event to the matching listener method.
    pub fn dispatch_to(&self, listener: &mut dyn QuantityListener) {
        match *self {
            Self::ValueChanged { value, position } => listener.on_value_changed(value, position),
            Self::Warning { kind, bound } => listener.on_warning(kind, bound),
        }
    }
}

/// Adapter that feeds every notification to one closure as a [`QuantityEvent`].
pub struct FnListener<F>(F);

impl<F> QuantityListener for FnListener<F>
where
    F: FnMut(&QuantityEvent),
{
    fn on_value_changed(&mut self, value: i32, position: i32) {
        (self.0)(&QuantityEvent::ValueChanged { value, position });
    }

    fn on_warning(&mut self, kind: WarningKind, bound: i32) {
        (self.0)(&QuantityEvent::Warning { kind, bound });
    }
}

/// Wraps a closure as a [`QuantityListener`].
pub fn listener_fn<F>(callback: F) -> FnListener<F>
where
    F: FnMut(&QuantityEvent),
{
    FnListener(callback)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Handle returned by [`ObserverRegistry::subscribe`].
pub struct SubscriptionId(u64);

/// Ordered set of listeners; notification order follows subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, Box<dyn QuantityListener>>,
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ObserverRegistry {
    /// Registers `listener` and returns its handle.
    pub fn subscribe<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: QuantityListener + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Drops the listener behind `id`. Returns `false` when it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// True when nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers `events` in order to every listener.
    pub fn notify(&mut self, events: &[QuantityEvent]) {
        for event in events {
            for listener in self.listeners.values_mut() {
                event.dispatch_to(listener.as_mut());
            }
        }
    }
}
