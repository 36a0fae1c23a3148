use std::cell::RefCell;
use std::rc::Rc;

use focus_core::platform::{FocusChangeListener, FocusHost, RegionId};

use crate::input::{PointerEvent, PointerEventKind};

/// Handler invoked with pointer events dispatched into a region.
pub type PointerHandler = Rc<dyn Fn(&PointerEvent)>;

struct BridgeInner {
    host: Rc<dyn FocusHost>,
    region: RegionId,
    focus_listener: RefCell<Option<FocusChangeListener>>,
    content_handler: RefCell<Option<PointerHandler>>,
}

/// Translates abstract claim/clear requests into the host's first-responder
/// protocol for one region, and intercepts pointer-down as a focus claim.
///
/// The bridge holds no reconciliation state of its own; it is a pure adapter
/// over [`FocusHost`] for the region it wraps.
pub struct RegionBridge {
    inner: Rc<BridgeInner>,
}

impl Clone for RegionBridge {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl RegionBridge {
    pub fn new(host: Rc<dyn FocusHost>, region: RegionId) -> Self {
        Self {
            inner: Rc::new(BridgeInner {
                host,
                region,
                focus_listener: RefCell::new(None),
                content_handler: RefCell::new(None),
            }),
        }
    }

    pub fn region(&self) -> RegionId {
        self.inner.region
    }

    /// Handler the region's own content runs after bridge interception.
    pub fn set_content_handler(&self, handler: PointerHandler) {
        *self.inner.content_handler.borrow_mut() = Some(handler);
    }

    pub(crate) fn install_focus_listener(&self, listener: FocusChangeListener) {
        *self.inner.focus_listener.borrow_mut() = Some(listener);
    }

    /// Claims first-responder status for the region's focus proxy and emits
    /// the synthetic "focus gained" notification. A region with no proxy
    /// (not mounted yet, or not focusable) is a silent no-op.
    pub fn claim_focus(&self) {
        BridgeInner::claim_focus(&self.inner);
    }

    /// Clears first-responder status unconditionally. The bridge emits no
    /// notification here; the host reports resignation to whichever element
    /// held the slot.
    pub fn clear_focus(&self) {
        self.inner.host.make_first_responder(None);
    }

    /// Pointer entry point for the region: claims focus on `Down` before the
    /// event reaches the content handler.
    pub fn pointer_handler(&self) -> PointerHandler {
        let inner = Rc::clone(&self.inner);
        Rc::new(move |event: &PointerEvent| {
            if event.kind == PointerEventKind::Down {
                BridgeInner::claim_focus(&inner);
            }
            let handler = inner.content_handler.borrow().clone();
            if let Some(handler) = handler {
                handler(event);
            }
        })
    }
}

impl BridgeInner {
    fn claim_focus(inner: &Rc<Self>) {
        let Some(target) = inner.host.locate_focus_target(inner.region) else {
            return;
        };
        if let Some(listener) = inner.focus_listener.borrow().clone() {
            inner.host.set_focus_change_listener(target, listener);
        }
        inner.host.make_first_responder(Some(target));
        let listener = inner.focus_listener.borrow().clone();
        if let Some(listener) = listener {
            listener(true);
        }
    }
}
