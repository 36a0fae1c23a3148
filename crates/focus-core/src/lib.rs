//! Core runtime for Focus-RS, a first-responder reconciliation demo.
//!
//! This crate holds the pieces every other crate builds on: the shared
//! [`SelectionState`], the turn-driven [`Runtime`] with its deferred-effect
//! queue, and the platform capability traits in [`platform`].

pub mod collections;
pub mod platform;
pub mod runtime;
pub mod selection;

pub use platform::{FocusChangeListener, FocusHost, FocusTarget, RegionId, TurnScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use selection::{SelectionState, SelectionWatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    ReentrantFlush,
    Unsettled { turns: u32 },
}

impl std::fmt::Display for TurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnError::ReentrantFlush => {
                write!(f, "deferred effects flushed while a flush is in progress")
            }
            TurnError::Unsettled { turns } => {
                write!(f, "focus loop still dirty after {turns} turns")
            }
        }
    }
}

impl std::error::Error for TurnError {}
