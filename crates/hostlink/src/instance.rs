#![forbid(unsafe_code)]

//! Seams over the host UI framework.
//!
//! The bridge consumes the host framework through two narrow traits:
//!
//! - [`HostInstance`]: a handle to one mounted component, used to schedule
//!   a re-render and to obtain a [`RenderComplete`] future for the next
//!   flush.
//! - [`HostScope`]: the setup-phase surface where lifecycle hooks are
//!   registered. There is no ambient "current component" lookup; callers
//!   pass the scope explicitly to [`bind_controller`](crate::bind_controller),
//!   which keeps the wiring visible at the call site.
//!
//! Framework adapters implement both. `hostlink-harness` ships a
//! deterministic in-memory implementation for tests.

use std::rc::Rc;

use crate::flush::RenderComplete;

/// Handle to the owning host component instance.
///
/// Implementations are expected to be cheap handles (the bridge clones and
/// stores one per [`ControllerHost`](crate::ControllerHost)).
pub trait HostInstance {
    /// Ask the framework to schedule a re-render of this component.
    ///
    /// Scheduling is fire-and-forget: the render runs whenever the
    /// framework's own update machinery decides to flush.
    fn schedule_render(&self);

    /// A future that resolves after the framework's next render flush.
    fn next_tick(&self) -> RenderComplete;
}

/// Hook registration surface active during a component's setup phase.
///
/// Each `on_*` method accepts a zero-argument callback invoked at the
/// corresponding point of the component's lifecycle. A scope may receive
/// several registrations per hook; frameworks run them in registration
/// order.
pub trait HostScope {
    /// The component instance this scope belongs to.
    fn instance(&self) -> Rc<dyn HostInstance>;

    /// Run `callback` when the component mounts.
    fn on_mount(&mut self, callback: Box<dyn FnMut()>);

    /// Run `callback` when the component unmounts.
    fn on_unmount(&mut self, callback: Box<dyn FnMut()>);

    /// Run `callback` just before each render pass.
    fn on_before_update(&mut self, callback: Box<dyn FnMut()>);

    /// Run `callback` just after each render pass.
    fn on_after_update(&mut self, callback: Box<dyn FnMut()>);
}
