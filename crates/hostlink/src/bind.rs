#![forbid(unsafe_code)]

//! Wiring a [`ControllerHost`] into a host framework's lifecycle hooks.
//!
//! [`bind_controller`] is pure composition: take the component instance
//! from the scope, build a fresh host, let the factory construct (and
//! register) its controller, then hook the four lifecycle points to the
//! matching host notifications. [`bind_store`] layers the store
//! subscriber on top.

use std::rc::Rc;

use crate::controller::Controller;
use crate::host::ControllerHost;
use crate::instance::HostScope;
use crate::store::{Store, StoreSubscriber};

/// Build a controller driven by the lifecycle of `scope`'s component.
///
/// The factory receives the freshly created [`ControllerHost`] and is
/// responsible for registering the controller it builds (controller
/// constructors conventionally do this themselves, as
/// [`StoreSubscriber::new`] does).
///
/// Hook mapping: mount → `connected`, unmount → `disconnected`,
/// before-update → `update`, after-update → `updated`.
pub fn bind_controller<C, F>(scope: &mut dyn HostScope, factory: F) -> Rc<C>
where
    C: Controller + 'static,
    F: FnOnce(&ControllerHost) -> Rc<C>,
{
    let host = ControllerHost::new(scope.instance());
    let controller = factory(&host);

    let on_mount = host.clone();
    scope.on_mount(Box::new(move || on_mount.connected()));

    let on_unmount = host.clone();
    scope.on_unmount(Box::new(move || on_unmount.disconnected()));

    let on_before = host.clone();
    scope.on_before_update(Box::new(move || on_before.update()));

    let on_after = host;
    scope.on_after_update(Box::new(move || on_after.updated()));

    controller
}

/// Subscribe `scope`'s component to an observable store.
///
/// `provider` is resolved on every mount, so it may return a different
/// store after a remount. The returned subscriber exposes the latest
/// value via [`StoreSubscriber::value`].
pub fn bind_store<T, P>(scope: &mut dyn HostScope, provider: P) -> Rc<StoreSubscriber<T>>
where
    T: Clone + 'static,
    P: Fn() -> Rc<dyn Store<T>> + 'static,
{
    bind_controller(scope, move |host| StoreSubscriber::new(host, provider))
}
