use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::runtime::RuntimeHandle;

/// Observer notified on every write to the shared selection value.
pub trait SelectionWatcher {
    fn selection_changed(&self, selection: i32);
}

struct SelectionInner {
    value: Cell<i32>,
    watchers: RefCell<Vec<Weak<dyn SelectionWatcher>>>,
    runtime: Option<RuntimeHandle>,
}

/// The shared "selected focus index" value.
///
/// A single `i32` by convention: `0` means nothing is selected, any positive
/// value names one focusable region. No validation is performed on writes.
/// Handles are cheap clones of one shared slot; equality is handle identity.
pub struct SelectionState {
    inner: Rc<SelectionInner>,
}

impl Clone for SelectionState {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl PartialEq for SelectionState {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for SelectionState {}

impl SelectionState {
    pub fn with_runtime(initial: i32, runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(SelectionInner {
                value: Cell::new(initial),
                watchers: RefCell::new(Vec::new()),
                runtime: Some(runtime),
            }),
        }
    }

    /// The no-channel fallback: reads always yield `0`, writes are silently
    /// discarded, watchers are never notified.
    pub fn detached() -> Self {
        Self {
            inner: Rc::new(SelectionInner {
                value: Cell::new(0),
                watchers: RefCell::new(Vec::new()),
                runtime: None,
            }),
        }
    }

    pub fn get(&self) -> i32 {
        self.inner.value.get()
    }

    /// Writes `value` and notifies every live watcher. Writing the current
    /// value notifies as well; watchers decide what a no-op is.
    pub fn set(&self, value: i32) {
        let Some(runtime) = &self.inner.runtime else {
            return;
        };
        self.inner.value.set(value);
        self.notify_watchers(value);
        runtime.schedule();
    }

    pub fn subscribe(&self, watcher: Weak<dyn SelectionWatcher>) {
        let mut watchers = self.inner.watchers.borrow_mut();
        watchers.retain(|w| w.strong_count() > 0);
        let already_registered = watchers.iter().any(|w| Weak::ptr_eq(w, &watcher));
        if !already_registered {
            watchers.push(watcher);
        }
    }

    fn notify_watchers(&self, value: i32) {
        let watchers: Vec<Rc<dyn SelectionWatcher>> = {
            let mut watchers = self.inner.watchers.borrow_mut();
            watchers.retain(|w| w.strong_count() > 0);
            watchers.iter().filter_map(|w| w.upgrade()).collect()
        };
        for watcher in watchers {
            watcher.selection_changed(value);
        }
    }
}

impl fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionState")
            .field("value", &self.get())
            .finish()
    }
}
