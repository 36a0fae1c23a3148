//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides the concrete implementation of the
//! [`focus_core::TurnScheduler`] platform trait. Applications construct a
//! [`StdRuntime`] and poll [`StdRuntime::take_turn_request`] from their
//! event loop, optionally registering a waker to be nudged out of a wait.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use focus_core::{Runtime, RuntimeHandle, TurnScheduler};

/// Scheduler that records turn requests with `std` synchronization primitives.
pub struct StdScheduler {
    turn_requested: AtomicBool,
    turn_waker: RwLock<Option<Arc<dyn Fn() + Send + Sync + 'static>>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            turn_requested: AtomicBool::new(false),
            turn_waker: RwLock::new(None),
        }
    }

    /// Returns whether a turn has been requested since the last call.
    pub fn take_turn_request(&self) -> bool {
        self.turn_requested.swap(false, Ordering::SeqCst)
    }

    /// Registers a waker that will be invoked whenever a new turn is scheduled.
    pub fn set_turn_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.turn_waker.write().unwrap() = Some(Arc::new(waker));
    }

    /// Clears any registered turn waker.
    pub fn clear_turn_waker(&self) {
        *self.turn_waker.write().unwrap() = None;
    }

    fn wake(&self) {
        let waker = self.turn_waker.read().unwrap().clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field(
                "turn_requested",
                &self.turn_requested.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl TurnScheduler for StdScheduler {
    fn schedule_turn(&self) {
        self.turn_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

/// Convenience container bundling the standard scheduler with a runtime.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    runtime: Runtime,
}

impl StdRuntime {
    /// Creates a new standard runtime instance.
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        Self { scheduler, runtime }
    }

    /// Returns the [`focus_core::Runtime`] configured with the standard scheduler.
    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    /// Returns a handle to the runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Returns the scheduler implementation.
    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Returns whether a turn was requested since the last poll.
    pub fn take_turn_request(&self) -> bool {
        self.scheduler.take_turn_request()
    }

    /// Registers a waker to be called when the runtime schedules a new turn.
    pub fn set_turn_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_turn_waker(waker);
    }

    /// Clears any previously registered turn waker.
    pub fn clear_turn_waker(&self) {
        self.scheduler.clear_turn_waker();
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}
