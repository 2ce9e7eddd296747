#![forbid(unsafe_code)]

//! Deterministic host framework fixture for exercising hostlink.
//!
//! [`SimHost`] is an in-memory stand-in for a reactive UI framework: it
//! accepts the four lifecycle hook registrations, hands out a component
//! instance, and lets a test drive mounts, unmounts, and render passes
//! explicitly. Nothing is implicit: a requested render does **not** run
//! until the test calls [`render()`](SimHost::render), which makes
//! scheduling observable ([`render_requests()`](SimHost::render_requests))
//! separately from flushing.
//!
//! # Render pass shape
//!
//! `render()` fires the before-update hooks, then the after-update hooks,
//! then completes every outstanding [`RenderComplete`] ticket minted via
//! `next_tick` up to that point. That matches the contract the bridge
//! assumes: pre-update before the pass, post-update after it, flush
//! futures last.
//!
//! # Example
//!
//! ```
//! use hostlink::{bind_store, Observable, Store};
//! use hostlink_harness::SimHost;
//! use std::rc::Rc;
//!
//! let store = Observable::new(1);
//! let mut sim = SimHost::new();
//!
//! let store_clone = store.clone();
//! let counter = bind_store(&mut sim, move || {
//!     Rc::new(store_clone.clone()) as Rc<dyn Store<i32>>
//! });
//!
//! sim.mount();
//! assert_eq!(counter.value(), Some(1));
//!
//! store.set(2);
//! assert_eq!(sim.render_requests(), 2); // one on mount, one on change
//! sim.render();
//! assert_eq!(counter.value(), Some(2));
//! ```
//!
//! Panics raised by hook callbacks (and therefore by controller
//! callbacks) propagate out of `mount`/`unmount`/`render`, the same way
//! a real framework's dispatch would surface them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hostlink::{FlushSignal, HostInstance, HostScope, RenderComplete};

/// The simulated component instance handed to the bridge.
///
/// Records render requests and mints flush tickets; [`SimHost::render`]
/// completes them.
#[derive(Default)]
pub struct SimInstance {
    render_requests: Cell<usize>,
    pending_flushes: RefCell<Vec<FlushSignal>>,
}

impl HostInstance for SimInstance {
    fn schedule_render(&self) {
        self.render_requests.set(self.render_requests.get() + 1);
    }

    fn next_tick(&self) -> RenderComplete {
        let (future, signal) = RenderComplete::pending();
        self.pending_flushes.borrow_mut().push(signal);
        future
    }
}

type HookList = RefCell<Vec<Box<dyn FnMut()>>>;

/// In-memory host framework driving one simulated component.
pub struct SimHost {
    instance: Rc<SimInstance>,
    mounted: Cell<bool>,
    mount_hooks: HookList,
    unmount_hooks: HookList,
    before_update_hooks: HookList,
    after_update_hooks: HookList,
}

impl SimHost {
    /// A fresh, unmounted component with no hooks registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instance: Rc::new(SimInstance::default()),
            mounted: Cell::new(false),
            mount_hooks: RefCell::new(Vec::new()),
            unmount_hooks: RefCell::new(Vec::new()),
            before_update_hooks: RefCell::new(Vec::new()),
            after_update_hooks: RefCell::new(Vec::new()),
        }
    }

    /// The component instance (the same one [`HostScope::instance`]
    /// returns, concretely typed).
    #[must_use]
    pub fn sim_instance(&self) -> Rc<SimInstance> {
        Rc::clone(&self.instance)
    }

    /// Mount the component, firing mount hooks in registration order.
    ///
    /// # Panics
    ///
    /// Panics if already mounted, or if a hook callback panics.
    pub fn mount(&self) {
        assert!(!self.mounted.get(), "SimHost::mount while mounted");
        self.mounted.set(true);
        tracing::debug!(message = "sim.mount");
        Self::fire(&self.mount_hooks);
    }

    /// Unmount the component, firing unmount hooks in registration order.
    ///
    /// # Panics
    ///
    /// Panics if not mounted, or if a hook callback panics.
    pub fn unmount(&self) {
        assert!(self.mounted.get(), "SimHost::unmount while unmounted");
        self.mounted.set(false);
        tracing::debug!(message = "sim.unmount");
        Self::fire(&self.unmount_hooks);
    }

    /// Run one render pass: before-update hooks, then after-update hooks,
    /// then complete every outstanding flush ticket.
    ///
    /// # Panics
    ///
    /// Panics if not mounted, or if a hook callback panics.
    pub fn render(&self) {
        assert!(self.mounted.get(), "SimHost::render while unmounted");
        Self::fire(&self.before_update_hooks);
        Self::fire(&self.after_update_hooks);
        let flushes = self.pending_flush_signals();
        tracing::debug!(message = "sim.render", flushed = flushes.len());
        for signal in flushes {
            signal.complete();
        }
    }

    /// Total `schedule_render` calls observed so far.
    #[must_use]
    pub fn render_requests(&self) -> usize {
        self.instance.render_requests.get()
    }

    /// Whether the component is currently mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Flush tickets minted since the last render.
    #[must_use]
    pub fn pending_flushes(&self) -> usize {
        self.instance.pending_flushes.borrow().len()
    }

    fn pending_flush_signals(&self) -> Vec<FlushSignal> {
        std::mem::take(&mut *self.instance.pending_flushes.borrow_mut())
    }

    /// Run every hook in `list`, in registration order.
    ///
    /// Holds the list borrow across the callbacks: registering a new hook
    /// from inside one panics, which mirrors frameworks that confine hook
    /// registration to the setup phase.
    fn fire(list: &HookList) {
        for hook in list.borrow_mut().iter_mut() {
            hook();
        }
    }
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostScope for SimHost {
    fn instance(&self) -> Rc<dyn HostInstance> {
        Rc::clone(&self.instance) as Rc<dyn HostInstance>
    }

    fn on_mount(&mut self, callback: Box<dyn FnMut()>) {
        self.mount_hooks.borrow_mut().push(callback);
    }

    fn on_unmount(&mut self, callback: Box<dyn FnMut()>) {
        self.unmount_hooks.borrow_mut().push(callback);
    }

    fn on_before_update(&mut self, callback: Box<dyn FnMut()>) {
        self.before_update_hooks.borrow_mut().push(callback);
    }

    fn on_after_update(&mut self, callback: Box<dyn FnMut()>) {
        self.after_update_hooks.borrow_mut().push(callback);
    }
}
