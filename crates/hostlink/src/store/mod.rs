#![forbid(unsafe_code)]

//! Observable stores and the store-subscription controller.
//!
//! - [`Store`]: the narrow contract the bridge consumes: read the current
//!   value, watch for subsequent ones.
//! - [`Observable`]: an in-tree `Store` implementation with version
//!   tracking and RAII [`Subscription`] guards.
//! - [`StoreSubscriber`]: a [`Controller`](crate::Controller) that keeps a
//!   component repainted with the latest store value while it is mounted.

pub mod observable;
pub mod subscriber;

pub use observable::{Observable, Subscription};
pub use subscriber::StoreSubscriber;

use std::rc::Rc;

/// A subscribable value source.
///
/// `watch` delivers each *subsequent* value to the callback; the current
/// value is read separately via `get`. Dropping the returned
/// [`Subscription`] stops delivery.
pub trait Store<T> {
    /// Clone of the current value.
    fn get(&self) -> T;

    /// Run `callback` for every value change until the guard is dropped.
    fn watch(&self, callback: Box<dyn Fn(&T)>) -> Subscription;
}

/// A provider of the store a [`StoreSubscriber`] should track.
///
/// Resolved on every connect, so a provider may hand out a different
/// store after a remount.
pub type StoreProvider<T> = Box<dyn Fn() -> Rc<dyn Store<T>>>;
