#![forbid(unsafe_code)]

//! hostlink: drive reactive controllers from a host framework's
//! lifecycle hooks.
//!
//! A [`Controller`] is an object with optional lifecycle callbacks
//! (connected, disconnected, pre-update, post-update). A
//! [`ControllerHost`] keeps an ordered registry of controllers for one
//! host component and forwards the component's mount / render / unmount
//! events to them. [`bind_controller`] wires a host into the four
//! lifecycle hooks a framework exposes during component setup, and
//! [`bind_store`] is the one-liner for the common case: keep a component
//! repainted with the latest value of an observable [`Store`].
//!
//! # Key Components
//!
//! - [`Controller`] - lifecycle callback set, all methods default no-ops
//! - [`ControllerHost`] - per-component adapter owning the registry
//! - [`HostScope`] / [`HostInstance`] - the narrow seams a framework
//!   adapter implements
//! - [`RenderComplete`] / [`FlushSignal`] - render-flush future and its
//!   completer
//! - [`Observable`] / [`Store`] / [`StoreSubscriber`] - observable value
//!   sources and the controller that mirrors one into a component
//!
//! # Threading
//!
//! Everything here is single-threaded and synchronous except
//! [`RenderComplete`], which defers to the framework's next flush. Types
//! are `Rc`-based and not `Send`; use one hostlink universe per UI
//! thread.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use hostlink::{Controller, ControllerHost, HostInstance, RenderComplete};
//!
//! // A minimal framework adapter: one component instance.
//! struct Instance;
//! impl HostInstance for Instance {
//!     fn schedule_render(&self) {}
//!     fn next_tick(&self) -> RenderComplete {
//!         RenderComplete::ready()
//!     }
//! }
//!
//! struct Logger;
//! impl Controller for Logger {
//!     fn host_connected(&self) {
//!         println!("mounted");
//!     }
//! }
//!
//! let host = ControllerHost::new(Rc::new(Instance));
//! host.add_controller(Rc::new(Logger));
//! host.connected(); // framework's mount hook would call this
//! assert!(host.is_connected());
//! ```
//!
//! `hostlink-harness` ships a full in-memory framework (`SimHost`) for
//! driving the hook-wiring layer end to end.

pub mod bind;
pub mod controller;
pub mod flush;
pub mod host;
pub mod instance;
pub mod store;

pub use bind::{bind_controller, bind_store};
pub use controller::Controller;
pub use flush::{FlushSignal, RenderComplete};
pub use host::ControllerHost;
pub use instance::{HostInstance, HostScope};
pub use store::{Observable, Store, StoreProvider, StoreSubscriber, Subscription};
