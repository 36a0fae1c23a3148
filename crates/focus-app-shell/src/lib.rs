//! Application orchestration shell for Focus-RS.
//!
//! [`FocusShell`] wires one focus composition together: the shared
//! [`SelectionState`], the turn runtime, and one [`FocusAdapter`] per
//! focusable region. A host event loop polls [`FocusShell::should_update`]
//! and calls [`FocusShell::update`] for each scheduling turn;
//! [`FocusShell::settle`] drives turns until the loop goes quiet between
//! user interactions.

use std::cell::Cell;
use std::rc::Rc;

use focus_core::platform::{FocusHost, RegionId};
use focus_core::selection::{SelectionState, SelectionWatcher};
use focus_core::TurnError;
use focus_foundation::{FocusAdapter, FocusIndex, RegionBridge};
use focus_runtime_std::StdRuntime;

const MAX_SETTLE_TURNS: u32 = 32;

struct DirtyFlag {
    dirty: Cell<bool>,
}

impl SelectionWatcher for DirtyFlag {
    fn selection_changed(&self, selection: i32) {
        log::trace!("selection changed to {selection}");
        self.dirty.set(true);
    }
}

/// Owns the runtime, the selection, and the adapters of one composition.
///
/// The shell is host-agnostic: it talks to the platform only through the
/// [`FocusHost`] it was constructed with, so the same shell drives the
/// bundled headless window and any other host satisfying the contract.
pub struct FocusShell {
    runtime: StdRuntime,
    selection: SelectionState,
    host: Rc<dyn FocusHost>,
    adapters: Vec<FocusAdapter>,
    dirty: Rc<DirtyFlag>,
}

impl FocusShell {
    pub fn new(host: Rc<dyn FocusHost>) -> Self {
        let runtime = StdRuntime::new();
        let selection = SelectionState::with_runtime(0, runtime.handle());
        // Dirty from the start so the first update reconciles the initial
        // selection value even if nothing has been written yet.
        let dirty = Rc::new(DirtyFlag {
            dirty: Cell::new(true),
        });
        selection.subscribe(Rc::downgrade(&(dirty.clone() as Rc<dyn SelectionWatcher>)));
        Self {
            runtime,
            selection,
            host,
            adapters: Vec::new(),
            dirty,
        }
    }

    /// Handle to the shared selection. Cheap clone of the shell's own slot;
    /// external controls write into it directly.
    pub fn selection(&self) -> SelectionState {
        self.selection.clone()
    }

    /// Registers an adapter that reconciles `region` under `index`.
    ///
    /// Registration order is observable: deferred effects flush in it, and
    /// with duplicate indices it decides which claim lands last. Index
    /// uniqueness is the caller's responsibility.
    pub fn attach_region(&mut self, index: FocusIndex, region: RegionId) -> FocusAdapter {
        let bridge = RegionBridge::new(Rc::clone(&self.host), region);
        let adapter = FocusAdapter::new(
            index,
            self.selection.clone(),
            bridge,
            self.runtime.handle(),
        );
        self.adapters.push(adapter.clone());
        adapter
    }

    pub fn adapters(&self) -> &[FocusAdapter] {
        &self.adapters
    }

    /// Registers a waker invoked whenever a new turn is scheduled, so a
    /// blocking event loop can be nudged out of its wait.
    pub fn set_turn_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.runtime.set_turn_waker(waker);
    }

    pub fn clear_turn_waker(&self) {
        self.runtime.clear_turn_waker();
    }

    /// Whether another turn is needed. Consumes a pending turn request.
    pub fn should_update(&self) -> bool {
        self.runtime.take_turn_request()
            || self.dirty.dirty.get()
            || self.runtime.handle().has_deferred_work()
    }

    /// One scheduling turn: a reconcile pass against a stable snapshot of
    /// the selection when it changed, then the deferred-effect flush.
    pub fn update(&mut self) -> Result<(), TurnError> {
        if self.dirty.dirty.replace(false) {
            let snapshot = self.selection.get();
            log::debug!("reconcile pass: selection = {snapshot}");
            for adapter in &self.adapters {
                adapter.reconcile(snapshot);
            }
        }
        let flushed = self.runtime.handle().flush_deferred()?;
        if flushed > 0 {
            log::trace!("flushed {flushed} deferred effect(s)");
        }
        Ok(())
    }

    /// Runs turns until the loop is quiet and returns how many it took.
    ///
    /// The bound catches compositions that never converge, such as two
    /// adapters stealing focus from each other.
    pub fn settle(&mut self) -> Result<u32, TurnError> {
        let mut turns = 0;
        while self.should_update() {
            if turns >= MAX_SETTLE_TURNS {
                log::error!("focus loop still dirty after {turns} turns");
                return Err(TurnError::Unsettled { turns });
            }
            self.update()?;
            turns += 1;
        }
        Ok(turns)
    }
}
