//! Observable values with validation and change notification.
//!
//! An [`ObservableValue<T>`] is a miniature publish/subscribe primitive:
//! a single slot holding a value of type `T`, a chain of validator
//! predicates consulted before every assignment, and an ordered list of
//! subscriber callbacks invoked synchronously after every accepted change.
//!
//! The player exposes its whole state (UI mode, slide number, presentation
//! mode, fade-out color, lifecycle flags) as a set of these cells. Plugins
//! bind to the cells they care about and write to them to request state
//! transitions; rejected writes leave the stored value untouched and are
//! reported through the log, never as an error.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a subscriber binding.
    ///
    /// Returned by [`ObservableValue::bind`] and used to remove the
    /// subscriber again via [`ObservableValue::unbind`]. The id stays
    /// valid until the binding is explicitly removed or the observable
    /// is dropped.
    pub struct ConnectionId;
}

type Subscriber<T> = Arc<dyn Fn(&T, &T) + Send + Sync>;
type Validator<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Subscriber storage.
///
/// The slot map hands out stable ids, but its iteration order is slot
/// order, which no longer matches registration order once freed slots get
/// reused. The separate `order` list keeps notification in registration
/// order regardless of unbinds.
struct SubscriberTable<T> {
    slots: SlotMap<ConnectionId, Subscriber<T>>,
    order: Vec<ConnectionId>,
}

impl<T> SubscriberTable<T> {
    fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    fn snapshot(&self) -> Vec<Subscriber<T>> {
        self.order
            .iter()
            .filter_map(|id| self.slots.get(*id).cloned())
            .collect()
    }
}

/// A reactive single-value cell with validation and change notification.
///
/// # Contract
///
/// - [`set`](Self::set) runs all validators in registration order against
///   the candidate value; if any returns `false`, the assignment is
///   rejected, a warning is logged, and the stored value is unchanged.
/// - An accepted assignment equal to the current value is a no-change
///   assignment: the value is kept and no subscriber fires.
/// - Otherwise the value is replaced and every subscriber is invoked
///   synchronously, in registration order, with `(&new, &old)`.
/// - Subscribers may themselves assign a new value. Each write snapshots
///   the then-current subscriber list and runs a fresh notification pass;
///   no internal lock is held while subscribers run.
///
/// # Thread Safety
///
/// `ObservableValue<T>` uses interior mutability and is `Send + Sync`,
/// although the player drives it from a single UI thread.
pub struct ObservableValue<T> {
    value: RwLock<T>,
    subscribers: Mutex<SubscriberTable<T>>,
    validators: Mutex<Vec<Validator<T>>>,
}

impl<T: Clone> ObservableValue<T> {
    /// Create a new observable with an initial value.
    ///
    /// The initial value is not validated and not announced to anyone;
    /// callers that need it must read it explicitly.
    pub fn new(initial: T) -> Self {
        Self {
            value: RwLock::new(initial),
            subscribers: Mutex::new(SubscriberTable::new()),
            validators: Mutex::new(Vec::new()),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider [`with`](Self::with).
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the current value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Replace the value without validation or notification.
    ///
    /// This is for initialization and batch updates where notifications
    /// are deferred or unwanted.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }

    /// Append a validator predicate.
    ///
    /// Validators run in registration order on every candidate value
    /// passed to [`set`](Self::set). Adding a validator does not
    /// retroactively validate the current value.
    pub fn add_validator<F>(&self, predicate: F)
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.validators.lock().push(Arc::new(predicate));
    }

    /// Bind a subscriber callback, returning its [`ConnectionId`].
    ///
    /// The callback is invoked with `(&new, &old)` after every accepted
    /// change. It is not invoked retroactively with the current value.
    pub fn bind<F>(&self, callback: F) -> ConnectionId
    where
        F: Fn(&T, &T) + Send + Sync + 'static,
    {
        let mut table = self.subscribers.lock();
        let id = table.slots.insert(Arc::new(callback));
        table.order.push(id);
        id
    }

    /// Remove a subscriber binding.
    ///
    /// Returns `true` if the binding existed and was removed.
    pub fn unbind(&self, id: ConnectionId) -> bool {
        let mut table = self.subscribers.lock();
        if table.slots.remove(id).is_some() {
            table.order.retain(|other| *other != id);
            true
        } else {
            false
        }
    }

    /// Remove all subscriber bindings.
    pub fn unbind_all(&self) {
        let mut table = self.subscribers.lock();
        table.slots.clear();
        table.order.clear();
    }

    /// Get the number of bound subscribers.
    pub fn binding_count(&self) -> usize {
        self.subscribers.lock().slots.len()
    }
}

impl<T: Clone + PartialEq> ObservableValue<T> {
    /// Assign a new value, returning `true` if the value changed.
    ///
    /// The candidate is checked by every validator in registration order;
    /// the first rejection aborts the assignment with a warning log and
    /// leaves the stored value unchanged. An accepted candidate equal to
    /// the current value is kept silently. Otherwise the value is
    /// replaced and all subscribers are notified with `(&new, &old)`.
    pub fn set(&self, value: T) -> bool {
        let validators: Vec<Validator<T>> = self.validators.lock().clone();
        for (position, validator) in validators.iter().enumerate() {
            if !validator(&value) {
                tracing::warn!(
                    target: targets::OBSERVABLE,
                    validator = position,
                    "validator rejected assignment, keeping current value"
                );
                return false;
            }
        }

        let old = {
            let mut current = self.value.write();
            if *current == value {
                return false;
            }
            std::mem::replace(&mut *current, value.clone())
        };

        self.notify(&value, &old);
        true
    }

    /// Invoke all subscribers with `(&new, &old)`.
    ///
    /// The subscriber list is snapshotted before invocation so that
    /// re-entrant writes (and binds/unbinds) from inside a subscriber
    /// cannot corrupt the pass in flight.
    fn notify(&self, new: &T, old: &T) {
        let snapshot = self.subscribers.lock().snapshot();
        tracing::trace!(
            target: targets::OBSERVABLE,
            subscribers = snapshot.len(),
            "value changed, notifying"
        );
        for subscriber in snapshot {
            subscriber(new, old);
        }
    }
}

impl<T: Clone + Default> Default for ObservableValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for ObservableValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableValue")
            .field("value", &self.get())
            .field("bindings", &self.binding_count())
            .finish()
    }
}
