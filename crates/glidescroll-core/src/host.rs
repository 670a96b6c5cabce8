//! Host-side contracts the animation engine is written against.
//!
//! The engine never talks to a windowing system directly. It sees the
//! outside world through [`Host`]: a vertical scroll offset it can read
//! and write, per-element offset geometry, and window-level event
//! subscription with browser-style listener options.

use std::cell::Cell;
use std::rc::Rc;

/// Opaque, stable identity of a scrollable target element.
///
/// Equality is by identity, never by derived geometry: two distinct
/// elements at the same on-screen position are independent targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Offset geometry of one element, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementOffsets {
    /// Vertical offset from the element's offset parent, in pixels.
    pub offset_top: i64,
    /// Next ancestor in the offset chain, `None` at the document root.
    pub offset_parent: Option<ElementId>,
}

/// Window-level event kinds the engine subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The scroll offset changed. Hosts fire this for programmatic
    /// writes as well as user scrolling, exactly like a browser.
    Scroll,
    /// Standard wheel event.
    Wheel,
    /// Legacy wheel event on hosts without `Wheel` support.
    MouseWheel,
    /// Older legacy scroll event, always subscribed alongside the
    /// detected wheel kind.
    LegacyMouseScroll,
    TouchMove,
    KeyDown,
}

/// Keys carried by `KeyDown` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    /// Any key that does not scroll the viewport.
    Other(u16),
}

impl Key {
    /// Whether pressing this key scrolls the viewport.
    pub fn is_navigation(self) -> bool {
        !matches!(self, Key::Other(_))
    }
}

/// Subscription options, mirroring the two forms hosts accept.
///
/// Hosts with passive-listener support take `Passive`; older hosts only
/// understand a plain capture flag. Unsubscribing must pass the same
/// options that were used to subscribe, or the host treats it as a
/// different listener and silently keeps the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerOptions {
    Passive { passive: bool },
    Capture(bool),
}

/// An input event delivered to a listener.
#[derive(Debug, Clone)]
pub struct InputEvent {
    pub kind: EventKind,
    /// Set for `KeyDown` events.
    pub key: Option<Key>,
    default_prevented: Cell<bool>,
}

impl InputEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            key: None,
            default_prevented: Cell::new(false),
        }
    }

    pub fn key_down(key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown,
            key: Some(key),
            default_prevented: Cell::new(false),
        }
    }

    /// Ask the host to suppress the event's default action.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Callback invoked by the host when a subscribed event fires.
pub type ListenerFn = Rc<dyn Fn(&InputEvent)>;

/// Host-assigned identity of an installed listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The viewport the engine animates.
pub trait Host {
    /// Current vertical scroll offset in pixels.
    fn scroll_y(&self) -> i64;

    /// Apply a new scroll offset immediately, with no native smoothing.
    /// The engine produces smoothness itself, through many small jumps.
    fn set_scroll_y(&self, y: i64);

    /// Offset geometry for `element`, `None` when the host does not
    /// know it.
    fn offsets(&self, element: ElementId) -> Option<ElementOffsets>;

    fn add_listener(
        &self,
        kind: EventKind,
        listener: ListenerFn,
        options: ListenerOptions,
    ) -> ListenerId;

    fn remove_listener(&self, kind: EventKind, id: ListenerId, options: ListenerOptions);

    /// Whether the host understands [`ListenerOptions::Passive`].
    fn supports_passive_listeners(&self) -> bool;

    /// Whether the host delivers the standard `Wheel` event.
    fn supports_wheel_event(&self) -> bool;
}
