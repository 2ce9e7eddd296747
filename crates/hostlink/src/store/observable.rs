#![forbid(unsafe_code)]

//! A shared, version-tracked value with change notification.
//!
//! # Design
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` callbacks and cleaned up
//! lazily during notification; the strong side lives inside the
//! [`Subscription`] guard, so dropping the guard unsubscribes.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version
//!    bump, no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::Store;

/// RAII guard for a registered subscriber callback.
///
/// The guard owns the only strong reference to the callback; the
/// observable keeps a `Weak`. Dropping the guard therefore unsubscribes,
/// with the dead entry swept during the next notification.
#[must_use = "dropping the Subscription unsubscribes"]
pub struct Subscription {
    _callback: Rc<dyn Any>,
}

impl Subscription {
    pub(crate) fn holding(callback: Rc<dyn Any>) -> Self {
        Self {
            _callback: callback,
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

struct ObservableInner<T> {
    value: T,
    /// Bumped once per value-changing mutation.
    version: u64,
    subscribers: Vec<Weak<dyn Fn(&T)>>,
}

/// A shared value that notifies subscribers when it changes.
///
/// Cloning an `Observable` creates a new handle to the **same** value.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable holding `value`, at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    ///
    /// Setting a value equal to the current one does nothing. Subscriber
    /// callbacks run after the value is stored and the borrow released,
    /// so a callback may read (or even set) the observable.
    pub fn set(&self, value: T) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
            live_subscribers(&mut inner.subscribers)
        };
        // Notify outside the borrow with a snapshot of the new value.
        let current = self.get();
        for callback in callbacks {
            callback(&current);
        }
    }

    /// Register `callback` to run on every subsequent value change.
    ///
    /// The callback stays registered while the returned guard is alive.
    #[must_use = "dropping the Subscription unsubscribes"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong = Rc::new(callback);
        let erased: Rc<dyn Fn(&T)> = strong.clone();
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&erased));
        Subscription::holding(strong as Rc<dyn Any>)
    }

    /// Monotonic change counter. Starts at 0, +1 per value change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live subscribers (dead guards may linger until the next
    /// notification prunes them; this counts only upgradable entries).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

/// Prune dead weak entries and collect strong handles to the live ones,
/// preserving registration order.
fn live_subscribers<T>(subscribers: &mut Vec<Weak<dyn Fn(&T)>>) -> Vec<Rc<dyn Fn(&T)>> {
    let before = subscribers.len();
    let mut live = Vec::with_capacity(before);
    subscribers.retain(|weak| match weak.upgrade() {
        Some(callback) => {
            live.push(callback);
            true
        }
        None => false,
    });
    let pruned = before - subscribers.len();
    if pruned > 0 {
        tracing::trace!(message = "observable.pruned", pruned, live = live.len());
    }
    live
}

impl<T: Clone + PartialEq + 'static> Store<T> for Observable<T> {
    fn get(&self) -> T {
        Observable::get(self)
    }

    fn watch(&self, callback: Box<dyn Fn(&T)>) -> Subscription {
        self.subscribe(callback)
    }
}
