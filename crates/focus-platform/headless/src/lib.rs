//! Headless first-responder host for Focus-RS.
//!
//! [`HeadlessWindow`] is an in-memory stand-in for a desktop window: it
//! mounts focusable regions, generates the focus proxy element for each one,
//! keeps the single first-responder slot, and dispatches pointer events by
//! hit-testing region frames. It satisfies the [`FocusHost`] contract the
//! reconciliation core consumes, which makes it both the demo host and the
//! integration-test host.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use focus_core::collections::map::HashMap;
use focus_core::platform::{FocusChangeListener, FocusHost, FocusTarget, RegionId};
use focus_foundation::bridge::PointerHandler;
use focus_foundation::{Point, PointerEvent, PointerEventKind, Rect};
use indexmap::IndexMap;

struct MountedRegion {
    label: String,
    frame: Rect,
    focus_proxy: Option<FocusTarget>,
    pointer_handler: Option<PointerHandler>,
}

struct WindowInner {
    regions: RefCell<IndexMap<RegionId, MountedRegion>>,
    listeners: RefCell<HashMap<FocusTarget, FocusChangeListener>>,
    first_responder: Cell<Option<FocusTarget>>,
    responder_changes: Cell<usize>,
    next_region: Cell<u64>,
    next_target: Cell<u64>,
}

/// In-memory window with a single first-responder slot.
///
/// Handles are cheap clones of one shared window. Mount order matters: the
/// most recently mounted region is topmost for hit-testing.
#[derive(Clone)]
pub struct HeadlessWindow {
    inner: Rc<WindowInner>,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(WindowInner {
                regions: RefCell::new(IndexMap::new()),
                listeners: RefCell::new(HashMap::new()),
                first_responder: Cell::new(None),
                responder_changes: Cell::new(0),
                next_region: Cell::new(1),
                next_target: Cell::new(1),
            }),
        }
    }

    /// Mounts a region at `frame`. Focusable regions receive a generated
    /// focus proxy, the element that actually takes first-responder status.
    pub fn mount_region(&self, label: impl Into<String>, frame: Rect, focusable: bool) -> RegionId {
        let region = RegionId::new(self.inner.next_region.replace(self.inner.next_region.get() + 1));
        let focus_proxy = focusable.then(|| {
            FocusTarget::new(self.inner.next_target.replace(self.inner.next_target.get() + 1))
        });
        self.inner.regions.borrow_mut().insert(
            region,
            MountedRegion {
                label: label.into(),
                frame,
                focus_proxy,
                pointer_handler: None,
            },
        );
        region
    }

    /// Unmounts a region. A region holding first-responder status gives it
    /// up; the element is gone, so no resignation callback fires.
    pub fn unmount_region(&self, region: RegionId) {
        let removed = self.inner.regions.borrow_mut().shift_remove(&region);
        if let Some(removed) = removed {
            if let Some(proxy) = removed.focus_proxy {
                self.inner.listeners.borrow_mut().remove(&proxy);
                if self.inner.first_responder.get() == Some(proxy) {
                    self.inner.first_responder.set(None);
                    self.inner
                        .responder_changes
                        .set(self.inner.responder_changes.get() + 1);
                }
            }
        }
    }

    pub fn set_pointer_handler(&self, region: RegionId, handler: PointerHandler) {
        if let Some(mounted) = self.inner.regions.borrow_mut().get_mut(&region) {
            mounted.pointer_handler = Some(handler);
        }
    }

    pub fn pointer_down(&self, x: f32, y: f32) {
        self.dispatch(PointerEventKind::Down, x, y);
    }

    pub fn pointer_up(&self, x: f32, y: f32) {
        self.dispatch(PointerEventKind::Up, x, y);
    }

    pub fn pointer_moved(&self, x: f32, y: f32) {
        self.dispatch(PointerEventKind::Move, x, y);
    }

    fn dispatch(&self, kind: PointerEventKind, x: f32, y: f32) {
        let position = Point::new(x, y);
        let handler = {
            let regions = self.inner.regions.borrow();
            regions
                .values()
                .rev()
                .find(|mounted| mounted.frame.contains(position))
                .and_then(|mounted| mounted.pointer_handler.clone())
        };
        if let Some(handler) = handler {
            handler(&PointerEvent::new(kind, position));
        }
    }

    pub fn first_responder(&self) -> Option<FocusTarget> {
        self.inner.first_responder.get()
    }

    /// Region owning the current first responder, if any.
    pub fn focused_region(&self) -> Option<RegionId> {
        let responder = self.inner.first_responder.get()?;
        self.inner
            .regions
            .borrow()
            .iter()
            .find(|(_, mounted)| mounted.focus_proxy == Some(responder))
            .map(|(region, _)| *region)
    }

    pub fn focused_label(&self) -> Option<String> {
        let region = self.focused_region()?;
        self.inner
            .regions
            .borrow()
            .get(&region)
            .map(|mounted| mounted.label.clone())
    }

    /// Number of times the first-responder slot actually changed.
    pub fn responder_changes(&self) -> usize {
        self.inner.responder_changes.get()
    }

    /// One line per mounted region, in mount order.
    pub fn describe(&self) -> Vec<String> {
        let responder = self.inner.first_responder.get();
        self.inner
            .regions
            .borrow()
            .iter()
            .map(|(region, mounted)| {
                let focus = match mounted.focus_proxy {
                    Some(proxy) if responder == Some(proxy) => "focused",
                    Some(_) => "focusable",
                    None => "inert",
                };
                format!(
                    "region #{} '{}' {} [{}]",
                    region.raw(),
                    mounted.label,
                    mounted.frame,
                    focus
                )
            })
            .collect()
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusHost for HeadlessWindow {
    fn locate_focus_target(&self, region: RegionId) -> Option<FocusTarget> {
        self.inner
            .regions
            .borrow()
            .get(&region)
            .and_then(|mounted| mounted.focus_proxy)
    }

    fn make_first_responder(&self, target: Option<FocusTarget>) -> bool {
        let current = self.inner.first_responder.get();
        if current == target {
            return false;
        }
        self.inner.first_responder.set(target);
        self.inner
            .responder_changes
            .set(self.inner.responder_changes.get() + 1);
        if let Some(old) = current {
            let listener = self.inner.listeners.borrow().get(&old).cloned();
            if let Some(listener) = listener {
                listener(false);
            }
        }
        true
    }

    fn set_focus_change_listener(&self, target: FocusTarget, listener: FocusChangeListener) {
        self.inner.listeners.borrow_mut().insert(target, listener);
    }
}
