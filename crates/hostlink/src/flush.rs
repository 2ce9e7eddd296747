#![forbid(unsafe_code)]

//! Render-flush completion future.
//!
//! [`RenderComplete`] resolves to `true` once the host framework's pending
//! render pass (if any) has flushed. Completion is single-threaded: the
//! framework holds the companion [`FlushSignal`] and calls
//! [`complete()`](FlushSignal::complete) from its own flush point, which
//! wakes whichever task polled the future last. The pair split mirrors the
//! handle/controller companions used elsewhere in the crate.
//!
//! # Invariants
//!
//! 1. `complete()` is idempotent; the first call wakes, later calls are
//!    no-ops.
//! 2. A future polled after completion returns `Ready(true)` forever.
//! 3. Dropping the [`FlushSignal`] without completing leaves the future
//!    pending indefinitely; frameworks must complete every ticket they
//!    hand out.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Default)]
struct FlushState {
    completed: bool,
    waker: Option<Waker>,
}

/// Future resolving to `true` after the host's next render flush.
///
/// The success value is constant: the future reports that the view is
/// consistent, not whether anything visually changed.
#[must_use = "futures do nothing unless polled"]
pub struct RenderComplete {
    state: Rc<RefCell<FlushState>>,
}

/// Completer half of a [`RenderComplete`] ticket.
///
/// Held by the host framework; calling [`complete`](Self::complete) at the
/// end of a flush resolves the paired future.
pub struct FlushSignal {
    state: Rc<RefCell<FlushState>>,
}

impl RenderComplete {
    /// Create a pending ticket. The framework keeps the [`FlushSignal`]
    /// and completes it when the current pass flushes.
    #[must_use]
    pub fn pending() -> (Self, FlushSignal) {
        let state = Rc::new(RefCell::new(FlushState::default()));
        (
            Self {
                state: Rc::clone(&state),
            },
            FlushSignal { state },
        )
    }

    /// An already-resolved future, for frameworks with no pass in flight.
    #[must_use]
    pub fn ready() -> Self {
        Self {
            state: Rc::new(RefCell::new(FlushState {
                completed: true,
                waker: None,
            })),
        }
    }
}

impl Future for RenderComplete {
    type Output = bool;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        let mut state = self.state.borrow_mut();
        if state.completed {
            Poll::Ready(true)
        } else {
            // Keep only the most recent waker; a re-poll replaces it.
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

impl FlushSignal {
    /// Mark the pass as flushed, waking the paired future. Idempotent.
    pub fn complete(&self) {
        let waker = {
            let mut state = self.state.borrow_mut();
            if state.completed {
                return;
            }
            state.completed = true;
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// Whether `complete()` has run.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state.borrow().completed
    }
}

impl std::fmt::Debug for RenderComplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderComplete")
            .field("completed", &self.state.borrow().completed)
            .finish()
    }
}

impl std::fmt::Debug for FlushSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlushSignal")
            .field("completed", &self.state.borrow().completed)
            .finish()
    }
}
