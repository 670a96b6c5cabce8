//! Smooth, interruptible scrolling of a host viewport to a target
//! position, driven by a timed cubic-bezier easing curve.
//!
//! The engine animates one vertical scroll offset: it plans the
//! distance and tick count for a request, drives a timed loop that
//! applies eased positions, deduplicates concurrent requests per
//! target, and either cancels on user scrolling (`interruptable`) or
//! locks user scrolling out until it finishes.
//!
//! ```ignore
//! use std::rc::Rc;
//! use glidescroll_core::{Scroller, ScrollOptions, SimViewport};
//!
//! let viewport = SimViewport::new();
//! let page = viewport.insert_element(0, None);
//! let heading = viewport.insert_element(650, Some(page));
//!
//! let scroller = Scroller::new(Rc::new(viewport));
//! // Inside a tokio LocalSet:
//! let handle = scroller.scroll_to(heading, ScrollOptions::default());
//! handle.wait().await?;
//! ```

pub mod config;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod host;
pub mod sim;
pub mod timing;

mod animator;
mod lock;
mod registry;

pub use animator::Scroller;
pub use config::{AppConfig, EasingConfig, ScrollOptions};
pub use easing::CubicBezier;
pub use error::{Error, Result, ScrollError};
pub use handle::ScrollHandle;
pub use host::{
    ElementId, ElementOffsets, EventKind, Host, InputEvent, Key, ListenerFn, ListenerId,
    ListenerOptions,
};
pub use sim::SimViewport;
