//! Window-level suppression of user scroll input.
//!
//! While engaged, wheel, touch-move and navigation-key input anywhere
//! in the viewport is default-prevented, so only programmatic writes
//! move the scroll position. The suppression is deliberately global to
//! the whole viewport, not scoped to the animated target; callers of
//! non-interruptable animations rely on that.

use std::rc::Rc;

use tracing::debug;

use crate::host::{EventKind, Host, InputEvent, Key, ListenerId, ListenerOptions};

/// Listener capabilities, probed from the host once when the engine is
/// built and cached for its lifetime.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListenerCaps {
    wheel_event: EventKind,
    wheel_options: ListenerOptions,
}

impl ListenerCaps {
    pub(crate) fn detect(host: &dyn Host) -> Self {
        // Hosts with passive-listener support need an explicit
        // `passive: false` for prevent-default to work on wheel and
        // touch events; older hosts only take a capture flag.
        let wheel_options = if host.supports_passive_listeners() {
            ListenerOptions::Passive { passive: false }
        } else {
            ListenerOptions::Capture(false)
        };
        let wheel_event = if host.supports_wheel_event() {
            EventKind::Wheel
        } else {
            EventKind::MouseWheel
        };
        Self {
            wheel_event,
            wheel_options,
        }
    }
}

struct Guard {
    kind: EventKind,
    id: ListenerId,
    options: ListenerOptions,
}

pub(crate) struct ScrollLock {
    host: Rc<dyn Host>,
    caps: ListenerCaps,
    guards: Option<Vec<Guard>>,
}

impl ScrollLock {
    pub(crate) fn new(host: Rc<dyn Host>) -> Self {
        let caps = ListenerCaps::detect(host.as_ref());
        Self {
            host,
            caps,
            guards: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_engaged(&self) -> bool {
        self.guards.is_some()
    }

    /// Install the suppression listeners. No-op when already engaged.
    pub(crate) fn engage(&mut self) {
        if self.guards.is_some() {
            return;
        }

        let plain = ListenerOptions::Capture(false);
        let mut guards = Vec::with_capacity(4);
        for (kind, options) in [
            (EventKind::LegacyMouseScroll, plain),
            (self.caps.wheel_event, self.caps.wheel_options),
            (EventKind::TouchMove, self.caps.wheel_options),
        ] {
            let id = self.host.add_listener(kind, Rc::new(prevent_default), options);
            guards.push(Guard { kind, id, options });
        }
        let id = self
            .host
            .add_listener(EventKind::KeyDown, Rc::new(prevent_default_for_scroll_keys), plain);
        guards.push(Guard {
            kind: EventKind::KeyDown,
            id,
            options: plain,
        });

        debug!("Scroll lock engaged");
        self.guards = Some(guards);
    }

    /// Remove the suppression listeners. No-op when not engaged.
    ///
    /// Removal passes the exact options used to subscribe; a mismatch
    /// would leave the listener installed.
    pub(crate) fn disengage(&mut self) {
        let Some(guards) = self.guards.take() else {
            return;
        };
        for guard in guards {
            self.host.remove_listener(guard.kind, guard.id, guard.options);
        }
        debug!("Scroll lock disengaged");
    }
}

fn prevent_default(event: &InputEvent) {
    event.prevent_default();
}

fn prevent_default_for_scroll_keys(event: &InputEvent) {
    if event.key.is_some_and(Key::is_navigation) {
        event.prevent_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimViewport;

    #[test]
    fn test_engage_suppresses_scroll_input() {
        let viewport = SimViewport::new();
        let mut lock = ScrollLock::new(Rc::new(viewport.clone()));

        lock.engage();
        assert!(lock.is_engaged());
        assert_eq!(viewport.listener_count(), 4);

        assert!(viewport.wheel(120));
        assert!(viewport.touch_move(40));
        assert!(viewport.key_down(Key::PageDown, 300));
        assert!(viewport.key_down(Key::Space, 300));
        assert_eq!(viewport.scroll_y(), 0);
    }

    #[test]
    fn test_non_navigation_keys_pass_through() {
        let viewport = SimViewport::new();
        let mut lock = ScrollLock::new(Rc::new(viewport.clone()));
        lock.engage();

        assert!(!viewport.key_down(Key::Other(65), 0));
    }

    #[test]
    fn test_disengage_restores_scrolling() {
        let viewport = SimViewport::new();
        let mut lock = ScrollLock::new(Rc::new(viewport.clone()));

        lock.engage();
        lock.disengage();
        assert_eq!(viewport.listener_count(), 0);

        assert!(!viewport.wheel(120));
        assert_eq!(viewport.scroll_y(), 120);
    }

    #[test]
    fn test_engage_and_disengage_are_idempotent() {
        let viewport = SimViewport::new();
        let mut lock = ScrollLock::new(Rc::new(viewport.clone()));

        lock.engage();
        lock.engage();
        assert_eq!(viewport.listener_count(), 4);

        lock.disengage();
        lock.disengage();
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_legacy_host_falls_back_to_capture_flag() {
        let viewport = SimViewport::legacy();
        let mut lock = ScrollLock::new(Rc::new(viewport.clone()));

        lock.engage();
        // Legacy wheel kind is the one suppressed
        assert!(viewport.wheel(120));
        assert_eq!(viewport.scroll_y(), 0);

        lock.disengage();
        assert_eq!(viewport.listener_count(), 0);
    }
}
