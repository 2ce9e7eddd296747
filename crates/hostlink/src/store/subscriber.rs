#![forbid(unsafe_code)]

//! Controller that mirrors an observable store into its host component.
//!
//! While the host is connected, a [`StoreSubscriber`] caches the store's
//! latest value and requests a re-render for every change, so the
//! component's view can simply read [`value()`](StoreSubscriber::value).
//! While disconnected it holds no subscription: changes neither update
//! the cache nor schedule renders, and the next connect re-reads the
//! store from scratch.

use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::Controller;
use crate::host::ControllerHost;
use crate::store::{Store, StoreProvider, Subscription};

/// Bridges one observable store to one host component.
///
/// Construction registers the subscriber with the host, so creating one
/// on an already-connected host subscribes immediately.
pub struct StoreSubscriber<T> {
    host: ControllerHost,
    provider: StoreProvider<T>,
    /// Store handle held while connected, keeping the source alive.
    store: RefCell<Option<Rc<dyn Store<T>>>>,
    /// Latest observed value; shared with the watch callback.
    value: Rc<RefCell<Option<T>>>,
    subscription: RefCell<Option<Subscription>>,
}

impl<T: Clone + 'static> StoreSubscriber<T> {
    /// Create a subscriber bound to `host`, resolving its store through
    /// `provider` on every connect.
    pub fn new(
        host: &ControllerHost,
        provider: impl Fn() -> Rc<dyn Store<T>> + 'static,
    ) -> Rc<Self> {
        let subscriber = Rc::new(Self {
            host: host.clone(),
            provider: Box::new(provider),
            store: RefCell::new(None),
            value: Rc::new(RefCell::new(None)),
            subscription: RefCell::new(None),
        });
        host.add_controller(subscriber.clone());
        subscriber
    }

    /// Clone of the latest observed value. `None` until the first
    /// connect; afterwards the cache survives disconnects.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.value.borrow().clone()
    }
}

impl<T: Clone + 'static> Controller for StoreSubscriber<T> {
    fn host_connected(&self) {
        let store = (self.provider)();
        *self.value.borrow_mut() = Some(store.get());

        let value = Rc::clone(&self.value);
        let host = self.host.clone();
        let subscription = store.watch(Box::new(move |new_value: &T| {
            *value.borrow_mut() = Some(new_value.clone());
            host.request_render();
        }));

        *self.store.borrow_mut() = Some(store);
        *self.subscription.borrow_mut() = Some(subscription);

        tracing::trace!(message = "store_subscriber.connected");
        // The value may have changed while we were away; repaint once.
        self.host.request_render();
    }

    fn host_disconnected(&self) {
        tracing::trace!(message = "store_subscriber.disconnected");
        self.subscription.borrow_mut().take();
        self.store.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flush::RenderComplete;
    use crate::instance::HostInstance;
    use crate::store::Observable;
    use std::cell::Cell;

    #[derive(Default)]
    struct StubInstance {
        renders: Cell<usize>,
    }

    impl HostInstance for StubInstance {
        fn schedule_render(&self) {
            self.renders.set(self.renders.get() + 1);
        }

        fn next_tick(&self) -> RenderComplete {
            RenderComplete::ready()
        }
    }

    fn harness() -> (ControllerHost, Rc<StubInstance>, Observable<i32>) {
        let instance = Rc::new(StubInstance::default());
        let host = ControllerHost::new(instance.clone());
        let store = Observable::new(0);
        (host, instance, store)
    }

    #[test]
    fn no_value_before_connect() {
        let (host, instance, store) = harness();
        let sub = StoreSubscriber::new(&host, move || {
            Rc::new(store.clone()) as Rc<dyn Store<i32>>
        });

        assert_eq!(sub.value(), None);
        assert_eq!(instance.renders.get(), 0);
    }

    #[test]
    fn connect_reads_current_value_and_repaints() {
        let (host, instance, store) = harness();
        store.set(42);
        let store_clone = store.clone();
        let sub = StoreSubscriber::new(&host, move || {
            Rc::new(store_clone.clone()) as Rc<dyn Store<i32>>
        });

        host.connected();
        assert_eq!(sub.value(), Some(42));
        assert_eq!(instance.renders.get(), 1);
    }

    #[test]
    fn change_while_connected_updates_and_repaints() {
        let (host, instance, store) = harness();
        let store_clone = store.clone();
        let sub = StoreSubscriber::new(&host, move || {
            Rc::new(store_clone.clone()) as Rc<dyn Store<i32>>
        });
        host.connected();
        let renders_after_connect = instance.renders.get();

        store.set(5);
        assert_eq!(sub.value(), Some(5));
        assert_eq!(instance.renders.get(), renders_after_connect + 1);
    }

    #[test]
    fn change_while_disconnected_is_ignored() {
        let (host, instance, store) = harness();
        let store_clone = store.clone();
        let sub = StoreSubscriber::new(&host, move || {
            Rc::new(store_clone.clone()) as Rc<dyn Store<i32>>
        });
        host.connected();
        host.disconnected();
        let renders_before = instance.renders.get();

        store.set(9);
        // Cache keeps the pre-disconnect value; no render scheduled.
        assert_eq!(sub.value(), Some(0));
        assert_eq!(instance.renders.get(), renders_before);
    }

    #[test]
    fn reconnect_catches_up() {
        let (host, _, store) = harness();
        let store_clone = store.clone();
        let sub = StoreSubscriber::new(&host, move || {
            Rc::new(store_clone.clone()) as Rc<dyn Store<i32>>
        });
        host.connected();
        host.disconnected();
        store.set(7);

        host.connected();
        assert_eq!(sub.value(), Some(7));
    }

    #[test]
    fn subscribing_on_connected_host_is_immediate() {
        let (host, instance, store) = harness();
        store.set(3);
        host.connected();

        let store_clone = store.clone();
        let sub = StoreSubscriber::new(&host, move || {
            Rc::new(store_clone.clone()) as Rc<dyn Store<i32>>
        });
        // add_controller fired host_connected synchronously.
        assert_eq!(sub.value(), Some(3));
        assert_eq!(instance.renders.get(), 1);
    }

    #[test]
    fn provider_resolves_fresh_store_per_connect() {
        let (host, _, _) = harness();
        let current: Rc<RefCell<Observable<i32>>> = Rc::new(RefCell::new(Observable::new(1)));
        let current_clone = Rc::clone(&current);
        let sub = StoreSubscriber::new(&host, move || {
            Rc::new(current_clone.borrow().clone()) as Rc<dyn Store<i32>>
        });

        host.connected();
        assert_eq!(sub.value(), Some(1));

        host.disconnected();
        *current.borrow_mut() = Observable::new(2);
        host.connected();
        assert_eq!(sub.value(), Some(2));
    }
}
