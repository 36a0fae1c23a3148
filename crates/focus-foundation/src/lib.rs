//! Focus adapters and native-focus bridging for Focus-RS.

pub mod adapter;
pub mod bridge;
pub mod geometry;
pub mod input;

pub use adapter::{FocusAdapter, FocusIndex};
pub use bridge::{PointerHandler, RegionBridge};
pub use geometry::{Point, Rect, Size};
pub use input::{PointerEvent, PointerEventKind};
