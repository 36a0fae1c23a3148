use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::platform::TurnScheduler;
use crate::TurnError;

struct RuntimeInner {
    scheduler: Arc<dyn TurnScheduler>,
    deferred: RefCell<VecDeque<Box<dyn FnOnce() + 'static>>>,
    flushing: Cell<bool>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn TurnScheduler>) -> Self {
        Self {
            scheduler,
            deferred: RefCell::new(VecDeque::new()),
            flushing: Cell::new(false),
        }
    }

    fn schedule(&self) {
        self.scheduler.schedule_turn();
    }

    fn defer(&self, task: Box<dyn FnOnce() + 'static>) {
        self.deferred.borrow_mut().push_back(task);
        self.schedule();
    }

    fn flush_deferred(&self) -> Result<usize, TurnError> {
        if self.flushing.get() {
            return Err(TurnError::ReentrantFlush);
        }
        self.flushing.set(true);
        // Tasks enqueued while flushing stay in the queue for the next turn.
        let mut tasks: Vec<Box<dyn FnOnce() + 'static>> = {
            let mut deferred = self.deferred.borrow_mut();
            deferred.drain(..).collect()
        };
        let flushed = tasks.len();
        for task in tasks.drain(..) {
            task();
        }
        self.flushing.set(false);
        Ok(flushed)
    }

    fn has_deferred(&self) -> bool {
        !self.deferred.borrow().is_empty()
    }
}

/// Owner of the deferred-effect queue for one focus composition.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn TurnScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    pub fn has_deferred_work(&self) -> bool {
        self.inner.has_deferred()
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl TurnScheduler for DefaultScheduler {
    fn schedule_turn(&self) {}
}

/// Weak handle to the runtime, safe to stash in adapters and state objects.
#[derive(Clone)]
pub struct RuntimeHandle(Weak<RuntimeInner>);

impl RuntimeHandle {
    /// Request a new scheduling turn from the host.
    pub fn schedule(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.schedule();
        }
    }

    /// Enqueue `task` for the next effect flush. Ordering is enqueue order.
    /// With the runtime gone the task runs immediately; no turn loop exists
    /// anymore that it could conflict with.
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        if let Some(inner) = self.0.upgrade() {
            inner.defer(Box::new(task));
        } else {
            task();
        }
    }

    /// Runs every task deferred before this call, in enqueue order. Tasks
    /// deferred by a running task land in the next flush.
    pub fn flush_deferred(&self) -> Result<usize, TurnError> {
        match self.0.upgrade() {
            Some(inner) => inner.flush_deferred(),
            None => Ok(0),
        }
    }

    pub fn has_deferred_work(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_deferred())
            .unwrap_or(false)
    }
}
