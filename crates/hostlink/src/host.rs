#![forbid(unsafe_code)]

//! The controller host: a lifecycle adapter between a host component and
//! its registered controllers.
//!
//! One [`ControllerHost`] exists per mounted component. It owns an ordered
//! registry of [`Controller`]s and forwards the component's lifecycle
//! events to them: mount becomes [`connected`](ControllerHost::connected),
//! unmount becomes [`disconnected`](ControllerHost::disconnected), and the
//! two edges of a render pass become [`update`](ControllerHost::update)
//! and [`updated`](ControllerHost::updated).
//!
//! # Architecture
//!
//! `ControllerHost` is a cheaply cloneable handle (`Rc` inner) so the four
//! lifecycle hook closures and every controller can share it. All state is
//! single-threaded interior mutability; nothing here is `Send`.
//!
//! # Invariants
//!
//! 1. Controllers are notified in registration order, every pass.
//! 2. Each notification pass operates on a snapshot of the registry taken
//!    when the pass starts: a controller added by a callback mid-pass is
//!    not notified by that pass, and one removed mid-pass still receives
//!    the in-flight notification.
//! 3. `is_connected()` is false from construction until the first
//!    `connected()`, then tracks connect/disconnect alternation.
//! 4. Registering on a connected host invokes the controller's
//!    `host_connected` synchronously, before `add_controller` returns.
//! 5. A panic in a controller callback propagates out of the notifying
//!    method untouched. The registry keeps whatever shape it had when the
//!    panic was raised.
//!
//! Removing a controller that was never registered (or was already
//! removed) is a silent no-op.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::controller::Controller;
use crate::flush::RenderComplete;
use crate::instance::HostInstance;

struct HostInner {
    /// Registration order is notification order.
    controllers: RefCell<Vec<Rc<dyn Controller>>>,
    connected: Cell<bool>,
    /// Owning component; used only to schedule renders and mint flush
    /// tickets.
    instance: Rc<dyn HostInstance>,
}

/// Lifecycle adapter for one host component.
///
/// Cloning a `ControllerHost` creates a new handle to the **same**
/// registry and connection state.
pub struct ControllerHost {
    inner: Rc<HostInner>,
}

impl Clone for ControllerHost {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for ControllerHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerHost")
            .field("connected", &self.inner.connected.get())
            .field("controllers", &self.inner.controllers.borrow().len())
            .finish()
    }
}

impl ControllerHost {
    /// Create a host bound to the given component instance, with an empty
    /// registry and in the disconnected state.
    #[must_use]
    pub fn new(instance: Rc<dyn HostInstance>) -> Self {
        Self {
            inner: Rc::new(HostInner {
                controllers: RefCell::new(Vec::new()),
                connected: Cell::new(false),
                instance,
            }),
        }
    }

    /// Append `controller` to the registry.
    ///
    /// If the host is already connected, the controller's
    /// `host_connected` runs synchronously before this returns, so a
    /// controller registered after mount is not missed.
    pub fn add_controller(&self, controller: Rc<dyn Controller>) {
        self.inner
            .controllers
            .borrow_mut()
            .push(Rc::clone(&controller));
        tracing::trace!(
            message = "host.add_controller",
            connected = self.inner.connected.get(),
            controllers = self.inner.controllers.borrow().len(),
        );
        if self.inner.connected.get() {
            controller.host_connected();
        }
    }

    /// Remove the first registry entry that is the same allocation as
    /// `controller`. Removing an absent controller is a no-op.
    pub fn remove_controller(&self, controller: &Rc<dyn Controller>) {
        let mut controllers = self.inner.controllers.borrow_mut();
        match controllers
            .iter()
            .position(|c| Rc::ptr_eq(c, controller))
        {
            Some(index) => {
                controllers.remove(index);
            }
            None => {
                tracing::trace!(message = "host.remove_controller.miss");
            }
        }
    }

    /// Ask the owning component to schedule a re-render through the host
    /// framework's own update mechanism.
    pub fn request_render(&self) {
        tracing::trace!(message = "host.request_render");
        self.inner.instance.schedule_render();
    }

    /// Future resolving to `true` once the framework's pending render
    /// pass (if any) has flushed.
    #[must_use]
    pub fn render_complete(&self) -> RenderComplete {
        self.inner.instance.next_tick()
    }

    /// Mount notification: mark the host connected, then run
    /// `host_connected` on every registered controller, in order.
    pub fn connected(&self) {
        self.inner.connected.set(true);
        let snapshot = self.snapshot();
        tracing::debug!(message = "host.connected", controllers = snapshot.len());
        for controller in &snapshot {
            controller.host_connected();
        }
    }

    /// Unmount notification: mark the host disconnected, then run
    /// `host_disconnected` on every registered controller, in order.
    ///
    /// Nothing is unregistered; the registry survives for a remount.
    pub fn disconnected(&self) {
        self.inner.connected.set(false);
        let snapshot = self.snapshot();
        tracing::debug!(message = "host.disconnected", controllers = snapshot.len());
        for controller in &snapshot {
            controller.host_disconnected();
        }
    }

    /// Pre-render notification: run `host_update` on every registered
    /// controller, in order.
    pub fn update(&self) {
        for controller in &self.snapshot() {
            controller.host_update();
        }
    }

    /// Post-render notification: run `host_updated` on every registered
    /// controller, in order.
    pub fn updated(&self) {
        for controller in &self.snapshot() {
            controller.host_updated();
        }
    }

    /// Whether the host is between its mount and unmount events.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.connected.get()
    }

    /// Number of registered controllers.
    #[must_use]
    pub fn controller_count(&self) -> usize {
        self.inner.controllers.borrow().len()
    }

    /// Clone the registry so a notification pass never holds the borrow
    /// while controller code runs. Callbacks are free to add or remove
    /// controllers; they affect the next pass.
    fn snapshot(&self) -> Vec<Rc<dyn Controller>> {
        self.inner.controllers.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
