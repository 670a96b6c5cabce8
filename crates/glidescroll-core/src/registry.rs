//! Per-target deduplication of in-flight animations.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::handle::ScrollHandle;
use crate::host::ElementId;

/// At most one active animation per target.
///
/// Entries map a target's identity to the completion handle of the
/// animation that owns it; a second request against the same target
/// joins that handle instead of starting its own animation.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    active: HashMap<ElementId, ScrollHandle>,
}

impl Registry {
    /// Claim `target` for a fresh animation.
    ///
    /// Returns the already-active handle when the target is taken, in
    /// which case `handle` is discarded and the caller must not start
    /// anything. The check and the insert are one operation on one
    /// `&mut` borrow, so two callers can never both observe a free
    /// target.
    pub(crate) fn try_begin(
        &mut self,
        target: ElementId,
        handle: ScrollHandle,
    ) -> Option<ScrollHandle> {
        match self.active.entry(target) {
            Entry::Occupied(entry) => Some(entry.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(handle);
                None
            }
        }
    }

    /// Release `target` unconditionally.
    ///
    /// Called exactly once per animation, on every exit path, before
    /// the completion handle settles, so a follow-up request is never
    /// deduplicated against a finished animation.
    pub(crate) fn end(&mut self, target: ElementId) {
        self.active.remove(&target);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::completion;

    #[test]
    fn test_second_begin_joins_first() {
        let mut registry = Registry::default();
        let (_settler_a, handle_a) = completion();
        let (_settler_b, handle_b) = completion();

        assert!(registry.try_begin(ElementId(1), handle_a).is_none());
        assert!(registry.try_begin(ElementId(1), handle_b).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_targets_are_independent() {
        let mut registry = Registry::default();
        let (_sa, handle_a) = completion();
        let (_sb, handle_b) = completion();

        assert!(registry.try_begin(ElementId(1), handle_a).is_none());
        assert!(registry.try_begin(ElementId(2), handle_b).is_none());
        assert_eq!(registry.len(), 2);

        registry.end(ElementId(1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_end_frees_target_for_reuse() {
        let mut registry = Registry::default();
        let (_sa, handle_a) = completion();
        let (_sb, handle_b) = completion();

        assert!(registry.try_begin(ElementId(7), handle_a).is_none());
        registry.end(ElementId(7));
        assert!(registry.try_begin(ElementId(7), handle_b).is_none());
    }

    #[test]
    fn test_end_is_unconditional() {
        let mut registry = Registry::default();
        // Ending a target that was never begun must not panic.
        registry.end(ElementId(3));
    }
}
