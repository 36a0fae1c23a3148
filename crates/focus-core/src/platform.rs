//! Platform abstraction traits for Focus-RS runtime services.
//!
//! These traits let the focus runtime delegate turn scheduling and
//! first-responder mutation to the host environment, so the reconciliation
//! core can run against a desktop window, a test double, or the bundled
//! headless host without changes.

use std::rc::Rc;

/// Schedules work for the focus runtime.
///
/// Implementations are responsible for arranging a new scheduling turn on
/// behalf of the runtime. They must be safe to poke from multiple threads.
pub trait TurnScheduler: Send + Sync {
    /// Request that the host drive a new scheduling turn.
    fn schedule_turn(&self);
}

/// Identifies one mounted focusable region in the host's element tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionId(u64);

impl RegionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Identifies the focus-receiving element the host generated for a region.
///
/// Targets are minted by the host when a focusable region mounts; the
/// reconciliation core never constructs them on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FocusTarget(u64);

impl FocusTarget {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Callback invoked with an element's new focus state.
pub type FocusChangeListener = Rc<dyn Fn(bool)>;

/// The first-responder contract a host platform must satisfy.
///
/// The three calls mirror what the reconciliation core consumes: locating a
/// region's designated focus-receiving element, moving or clearing the
/// single first-responder slot, and wiring the focus-change callback for an
/// element. Hosts report *resignation* through the listener (invoked with
/// `false` when an element is displaced or cleared); gaining focus is
/// announced by whichever bridge performs the claim.
pub trait FocusHost {
    /// Returns the focus-receiving element generated for `region`, or `None`
    /// when the region is not mounted or has no focusable element.
    fn locate_focus_target(&self, region: RegionId) -> Option<FocusTarget>;

    /// Makes `target` the first responder, or clears the slot for `None`.
    /// Returns whether the first responder actually changed.
    fn make_first_responder(&self, target: Option<FocusTarget>) -> bool;

    /// Installs the focus-change callback for `target`, replacing any
    /// previously installed one.
    fn set_focus_change_listener(&self, target: FocusTarget, listener: FocusChangeListener);
}
