//! In-memory host used by the demo binary and the test suite.
//!
//! Models just enough of a browser window for the engine: a flat
//! scrollable page with offset-positioned elements, window-level event
//! dispatch, and default actions for user input. Every programmatic
//! scroll write fires a `Scroll` event, exactly like a real viewport,
//! and is recorded for assertions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::{
    ElementId, ElementOffsets, EventKind, Host, InputEvent, Key, ListenerFn, ListenerId,
    ListenerOptions,
};

struct ListenerSlot {
    kind: EventKind,
    id: ListenerId,
    options: ListenerOptions,
    callback: ListenerFn,
}

struct Inner {
    scroll_y: i64,
    elements: HashMap<ElementId, ElementOffsets>,
    listeners: Vec<ListenerSlot>,
    next_element: u64,
    next_listener: u64,
    applied: Vec<i64>,
    supports_passive: bool,
    supports_wheel: bool,
}

/// A simulated viewport. Cheap to clone; clones share the same page.
#[derive(Clone)]
pub struct SimViewport {
    inner: Rc<RefCell<Inner>>,
}

impl SimViewport {
    /// A modern host: passive listeners and the standard wheel event.
    pub fn new() -> Self {
        Self::with_capabilities(true, true)
    }

    /// An old host: no passive listeners, legacy mouse-wheel only.
    pub fn legacy() -> Self {
        Self::with_capabilities(false, false)
    }

    fn with_capabilities(supports_passive: bool, supports_wheel: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                scroll_y: 0,
                elements: HashMap::new(),
                listeners: Vec::new(),
                next_element: 1,
                next_listener: 1,
                applied: Vec::new(),
                supports_passive,
                supports_wheel,
            })),
        }
    }

    /// Add an element at `offset_top` pixels below its offset parent
    /// (or below the document top when `offset_parent` is `None`).
    pub fn insert_element(&self, offset_top: i64, offset_parent: Option<ElementId>) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        let id = ElementId(inner.next_element);
        inner.next_element += 1;
        inner.elements.insert(
            id,
            ElementOffsets {
                offset_top,
                offset_parent,
            },
        );
        id
    }

    /// Scroll-offset change from outside the engine: the "user" (or any
    /// other agent) moved the page. Fires a `Scroll` event but is not
    /// recorded as an engine write.
    pub fn user_scroll(&self, y: i64) {
        self.inner.borrow_mut().scroll_y = y;
        self.dispatch(&InputEvent::new(EventKind::Scroll));
    }

    /// Deliver a wheel gesture. When no non-passive listener prevents
    /// it, the page scrolls by `delta`, as a browser's default action
    /// would. Returns whether the default action was suppressed.
    pub fn wheel(&self, delta: i64) -> bool {
        let kind = if self.inner.borrow().supports_wheel {
            EventKind::Wheel
        } else {
            EventKind::MouseWheel
        };
        self.deliver_with_default(InputEvent::new(kind), delta)
    }

    /// Deliver a touch-move gesture scrolling by `delta`.
    pub fn touch_move(&self, delta: i64) -> bool {
        self.deliver_with_default(InputEvent::new(EventKind::TouchMove), delta)
    }

    /// Deliver a key press whose default action scrolls by `delta`
    /// (zero for keys that do not scroll).
    pub fn key_down(&self, key: Key, delta: i64) -> bool {
        self.deliver_with_default(InputEvent::key_down(key), delta)
    }

    fn deliver_with_default(&self, event: InputEvent, delta: i64) -> bool {
        self.dispatch(&event);
        let prevented = event.default_prevented();
        if !prevented && delta != 0 {
            let y = self.inner.borrow().scroll_y + delta;
            self.user_scroll(y);
        }
        prevented
    }

    /// Every position the engine applied, in order.
    pub fn applied(&self) -> Vec<i64> {
        self.inner.borrow().applied.clone()
    }

    /// Number of currently installed listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn dispatch(&self, event: &InputEvent) {
        // Snapshot matching callbacks first: listeners may mutate the
        // listener table or the scroll position while running.
        let targets: Vec<(ListenerFn, ListenerOptions)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|slot| slot.kind == event.kind)
            .map(|slot| (slot.callback.clone(), slot.options))
            .collect();

        for (callback, options) in targets {
            if let ListenerOptions::Passive { passive: true } = options {
                // A passive listener cannot cancel the default action;
                // give it a detached view of the event.
                callback(&event.clone());
            } else {
                callback(event);
            }
        }
    }
}

impl Default for SimViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for SimViewport {
    fn scroll_y(&self) -> i64 {
        self.inner.borrow().scroll_y
    }

    fn set_scroll_y(&self, y: i64) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.scroll_y = y;
            inner.applied.push(y);
        }
        self.dispatch(&InputEvent::new(EventKind::Scroll));
    }

    fn offsets(&self, element: ElementId) -> Option<ElementOffsets> {
        self.inner.borrow().elements.get(&element).copied()
    }

    fn add_listener(
        &self,
        kind: EventKind,
        listener: ListenerFn,
        options: ListenerOptions,
    ) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.push(ListenerSlot {
            kind,
            id,
            options,
            callback: listener,
        });
        id
    }

    fn remove_listener(&self, kind: EventKind, id: ListenerId, options: ListenerOptions) {
        // Options must match the subscription, like removeEventListener.
        self.inner
            .borrow_mut()
            .listeners
            .retain(|slot| !(slot.kind == kind && slot.id == id && slot.options == options));
    }

    fn supports_passive_listeners(&self) -> bool {
        self.inner.borrow().supports_passive
    }

    fn supports_wheel_event(&self) -> bool {
        self.inner.borrow().supports_wheel
    }
}
