use std::cell::Cell;
use std::fmt;
use std::num::NonZeroU32;
use std::rc::Rc;

use focus_core::runtime::RuntimeHandle;
use focus_core::selection::SelectionState;

use crate::bridge::{PointerHandler, RegionBridge};

/// Index assigned to one focusable region.
///
/// Positive by construction. Uniqueness among sibling adapters is the
/// caller's responsibility; two adapters sharing an index leave the winner
/// undefined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FocusIndex(NonZeroU32);

impl FocusIndex {
    pub fn new(index: u32) -> Option<Self> {
        NonZeroU32::new(index).map(Self)
    }

    /// The index as a selection value.
    pub fn value(self) -> i32 {
        self.0.get() as i32
    }
}

impl fmt::Display for FocusIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct AdapterInner {
    index: FocusIndex,
    watermark: Cell<i32>,
    selection: SelectionState,
    bridge: RegionBridge,
    runtime: RuntimeHandle,
}

/// Reconciles one focusable region's native focus with the shared selection.
///
/// The adapter remembers the last selection value it reacted to (the
/// watermark) so an unrelated pass never repeats a native request, and it
/// feeds user-driven focus changes back into the selection it reads from.
/// Handles are cheap clones of one shared adapter.
pub struct FocusAdapter {
    inner: Rc<AdapterInner>,
}

impl Clone for FocusAdapter {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl FocusAdapter {
    /// The only construction path: an adapter always carries its index, its
    /// selection channel, the bridge for its region, and the runtime that
    /// serializes its native requests.
    pub fn new(
        index: FocusIndex,
        selection: SelectionState,
        bridge: RegionBridge,
        runtime: RuntimeHandle,
    ) -> Self {
        let inner = Rc::new(AdapterInner {
            index,
            watermark: Cell::new(0),
            selection,
            bridge,
            runtime,
        });
        let listener = {
            let inner = Rc::downgrade(&inner);
            Rc::new(move |focused: bool| {
                if let Some(inner) = inner.upgrade() {
                    AdapterInner::focus_changed(&inner, focused);
                }
            })
        };
        inner.bridge.install_focus_listener(listener);
        Self { inner }
    }

    pub fn focus_index(&self) -> FocusIndex {
        self.inner.index
    }

    /// The last selection value this adapter has reacted to. Non-zero means
    /// the adapter believes its region holds native focus.
    pub fn watermark(&self) -> i32 {
        self.inner.watermark.get()
    }

    pub fn bridge(&self) -> &RegionBridge {
        &self.inner.bridge
    }

    /// Pointer entry point for the wrapped region; see
    /// [`RegionBridge::pointer_handler`].
    pub fn pointer_handler(&self) -> PointerHandler {
        self.inner.bridge.pointer_handler()
    }

    /// One reconciliation step against a stable snapshot of the selection.
    ///
    /// Native requests are deferred to the effect flush. The watermark moves
    /// together with the deferred request, not with the observation that
    /// produced it.
    pub fn reconcile(&self, selection: i32) {
        let inner = &self.inner;
        let watermark = inner.watermark.get();
        if selection == inner.index.value() && selection != watermark {
            let weak = Rc::downgrade(inner);
            inner.runtime.defer(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.watermark.set(selection);
                    inner.bridge.claim_focus();
                }
            });
        } else if watermark != 0 && selection == 0 {
            let weak = Rc::downgrade(inner);
            inner.runtime.defer(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.watermark.set(0);
                    inner.bridge.clear_focus();
                }
            });
        } else if selection == inner.index.value() {
            inner.watermark.set(selection);
        } else {
            // Another region's turn; forget any stale claim so a later reset
            // does not replay a clear.
            inner.watermark.set(0);
        }
    }
}

impl AdapterInner {
    // Inside-out path: a native focus change writes back into the selection
    // on the next flush. The watermark follows in the same task, so the
    // pass reacting to the write issues no redundant claim.
    fn focus_changed(inner: &Rc<Self>, focused: bool) {
        let weak = Rc::downgrade(inner);
        inner.runtime.defer(move || {
            if let Some(inner) = weak.upgrade() {
                let value = if focused { inner.index.value() } else { 0 };
                inner.watermark.set(value);
                inner.selection.set(value);
            }
        });
    }
}
