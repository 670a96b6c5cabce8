//! Absolute-position resolution by walking the offset-parent chain.

use crate::host::{ElementId, Host};

/// Absolute vertical offset of `element` from the top of the document,
/// summing `offset_top` along the offset-parent chain.
///
/// Returns `None` when `element`, or any ancestor in its chain, is
/// unknown to the host.
pub fn absolute_top(host: &dyn Host, element: ElementId) -> Option<i64> {
    let mut top = 0;
    let mut cursor = Some(element);
    while let Some(el) = cursor {
        let offsets = host.offsets(el)?;
        top += offsets.offset_top;
        cursor = offsets.offset_parent;
    }
    Some(top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimViewport;

    #[test]
    fn test_sums_offset_chain() {
        let viewport = SimViewport::new();
        let body = viewport.insert_element(0, None);
        let section = viewport.insert_element(400, Some(body));
        let heading = viewport.insert_element(250, Some(section));

        assert_eq!(absolute_top(&viewport, body), Some(0));
        assert_eq!(absolute_top(&viewport, section), Some(400));
        assert_eq!(absolute_top(&viewport, heading), Some(650));
    }

    #[test]
    fn test_unknown_element() {
        let viewport = SimViewport::new();
        assert_eq!(absolute_top(&viewport, ElementId(42)), None);
    }

    #[test]
    fn test_broken_chain() {
        let viewport = SimViewport::new();
        let orphan = viewport.insert_element(120, Some(ElementId(9999)));
        assert_eq!(absolute_top(&viewport, orphan), None);
    }
}
