//! The scroll animation engine.
//!
//! [`Scroller`] turns a request into a plan (distance, tick count),
//! guards the animation against user scrolling (or locks user scrolling
//! out), and drives per-tick position updates on a timer until the plan
//! completes or an out-of-band scroll is detected.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tokio::time::{self, Instant};
use tracing::{debug, trace};

use crate::config::ScrollOptions;
use crate::easing::CubicBezier;
use crate::error::ScrollError;
use crate::geometry;
use crate::handle::{completion, Outcome, ScrollHandle, Settler};
use crate::host::{ElementId, EventKind, Host, ListenerId, ListenerOptions};
use crate::lock::ScrollLock;
use crate::registry::Registry;
use crate::timing::{tick_duration, total_ticks};

/// Derived once per accepted request.
#[derive(Debug, Clone, Copy)]
struct AnimationPlan {
    /// Scroll offset when the animation started.
    from: i64,
    /// Total signed movement; positive scrolls up, negative down.
    distance: i64,
    total_ticks: u32,
}

/// How a running animation relates to user scrolling.
enum GuardKind {
    /// User scrolling cancels the animation: a window scroll listener
    /// watches for positions the animation did not write itself.
    Watcher {
        id: ListenerId,
        options: ListenerOptions,
    },
    /// User scrolling is suppressed for the animation's duration.
    Lock,
}

/// Mutable state owned by one in-flight animation.
struct ActiveAnimation {
    target: ElementId,
    host: Rc<dyn Host>,
    registry: Rc<RefCell<Registry>>,
    lock: Rc<RefCell<ScrollLock>>,
    plan: AnimationPlan,
    easing: CubicBezier,
    tick: Cell<u32>,
    /// Last offset this animation applied; the watcher treats any other
    /// observed position as an out-of-band scroll.
    last_y: Cell<i64>,
    done: Cell<bool>,
    guard: RefCell<Option<GuardKind>>,
    settler: RefCell<Option<Settler>>,
}

impl ActiveAnimation {
    /// Advance one tick. Returns `false` once the animation settled,
    /// which tells the timer task to stop.
    fn on_tick(&self) -> bool {
        if self.done.get() {
            // Interrupted between firings; the flag is checked here
            // cooperatively rather than aborting the task.
            return false;
        }

        let tick = self.tick.get() + 1;
        self.tick.set(tick);
        if tick >= self.plan.total_ticks {
            self.finish(Ok(()));
            return false;
        }

        let t = f64::from(tick) / f64::from(self.plan.total_ticks);
        let eased = self.easing.sample(t);
        let y = (self.plan.from as f64 - eased * self.plan.distance as f64).round() as i64;

        // Record before applying: the write itself fires a scroll event
        // and the watcher must recognize it as our own.
        self.last_y.set(y);
        self.host.set_scroll_y(y);
        trace!("tick {}/{}: y={}", tick, self.plan.total_ticks, y);
        true
    }

    /// Scroll watcher body: any position this animation did not write
    /// means the user (or another agent) moved the viewport.
    fn on_scroll(&self) {
        if self.done.get() {
            return;
        }
        let observed = self.host.scroll_y();
        if observed != self.last_y.get() {
            debug!(
                "Animation for {:?} interrupted at y={} (expected {})",
                self.target,
                observed,
                self.last_y.get()
            );
            self.finish(Err(ScrollError::Interrupted));
        }
    }

    /// Tear down and settle. Only the first call has any effect. The
    /// registry entry is released before the handle settles, so a
    /// follow-up request for the same target starts fresh.
    fn finish(&self, outcome: Outcome) {
        if self.done.replace(true) {
            return;
        }

        self.registry.borrow_mut().end(self.target);

        match self.guard.borrow_mut().take() {
            Some(GuardKind::Watcher { id, options }) => {
                self.host.remove_listener(EventKind::Scroll, id, options);
            }
            Some(GuardKind::Lock) => self.lock.borrow_mut().disengage(),
            None => {}
        }

        if let Some(settler) = self.settler.borrow_mut().take() {
            settler.settle(outcome);
        }
    }
}

/// The scroll animation engine.
///
/// Cheap to clone; clones share the registry and the scroll lock, so at
/// most one animation runs per target across all clones.
#[derive(Clone)]
pub struct Scroller {
    host: Rc<dyn Host>,
    registry: Rc<RefCell<Registry>>,
    lock: Rc<RefCell<ScrollLock>>,
    easing: CubicBezier,
}

impl Scroller {
    /// Build an engine for `host`.
    ///
    /// Listener capabilities (passive support, wheel event flavor) are
    /// probed here, once, and cached for the engine's lifetime.
    pub fn new(host: Rc<dyn Host>) -> Self {
        let lock = ScrollLock::new(host.clone());
        Self {
            host,
            registry: Rc::new(RefCell::new(Registry::default())),
            lock: Rc::new(RefCell::new(lock)),
            easing: CubicBezier::ease(),
        }
    }

    /// Replace the default ease curve.
    pub fn with_easing(mut self, easing: CubicBezier) -> Self {
        self.easing = easing;
        self
    }

    /// Animate the viewport until `target` sits at the top of it, plus
    /// `offset_y`.
    ///
    /// Never fails synchronously: the returned handle settles exactly
    /// once, to `Ok(())` on completion (or when no movement is needed),
    /// or to `Err` when the target cannot be resolved or the animation
    /// is interrupted by a user scroll. A request against a target that
    /// is already animating joins the running animation and shares its
    /// outcome; the new options are discarded.
    ///
    /// Must be called from within a [`tokio::task::LocalSet`]: the
    /// animation runs on a local task and its state is not `Send`.
    pub fn scroll_to(&self, target: ElementId, options: ScrollOptions) -> ScrollHandle {
        let (settler, handle) = completion();

        if let Some(existing) = self.registry.borrow_mut().try_begin(target, handle.clone()) {
            debug!("Joining in-flight animation for {:?}", target);
            return existing;
        }

        let Some(target_top) = geometry::absolute_top(self.host.as_ref(), target) else {
            self.registry.borrow_mut().end(target);
            settler.settle(Err(ScrollError::TargetNotFound));
            return handle;
        };

        let time = options.effective_time();
        let fps = options.effective_fps();
        let from = self.host.scroll_y();
        let distance = from - target_top + target_top.min(options.offset_y);
        let plan = AnimationPlan {
            from,
            distance,
            total_ticks: total_ticks(time, fps),
        };

        if distance == 0 {
            // Already in place: settle now, no timer, no listeners.
            self.registry.borrow_mut().end(target);
            settler.settle(Ok(()));
            return handle;
        }

        debug!(
            "Animation started: target={:?} from={} distance={} ticks={} interruptable={}",
            target, from, distance, plan.total_ticks, options.interruptable
        );

        let animation = Rc::new(ActiveAnimation {
            target,
            host: self.host.clone(),
            registry: self.registry.clone(),
            lock: self.lock.clone(),
            plan,
            easing: self.easing,
            tick: Cell::new(0),
            last_y: Cell::new(from),
            done: Cell::new(false),
            guard: RefCell::new(None),
            settler: RefCell::new(Some(settler)),
        });

        let guard = if options.interruptable {
            let watcher = animation.clone();
            let watcher_options = ListenerOptions::Capture(false);
            let id = self.host.add_listener(
                EventKind::Scroll,
                Rc::new(move |_| watcher.on_scroll()),
                watcher_options,
            );
            GuardKind::Watcher {
                id,
                options: watcher_options,
            }
        } else {
            self.lock.borrow_mut().engage();
            GuardKind::Lock
        };
        *animation.guard.borrow_mut() = Some(guard);

        let period = tick_duration(fps);
        tokio::task::spawn_local(async move {
            // The first tick belongs one full period in the future;
            // interval() would fire immediately.
            let mut timer = time::interval_at(Instant::now() + period, period);
            loop {
                timer.tick().await;
                if !animation.on_tick() {
                    break;
                }
            }
        });

        handle
    }
}
