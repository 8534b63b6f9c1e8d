//! Ref resolution helpers for ARIA snapshots.
//!
//! This module contains helpers for resolving element references
//! and applying them to snapshot trees.

use std::collections::HashMap;

use viewpoint_cdp::protocol::dom::BackendNodeId;

use crate::page::locator::AriaSnapshot;
use crate::page::ref_resolution::format_ref;

/// Recursively apply refs to the snapshot tree based on element indices.
///
/// This function is used by both Page and Frame implementations to resolve
/// element references after capturing an aria snapshot with element indices.
///
/// `snapshot_id` identifies the capture this ref belongs to (see
/// `Page::capture_snapshot_with_refs`). Callers that cannot allocate a
/// snapshot id of their own (such as a bare `Frame` snapshot, which has no
/// handle to the owning `Page`'s ref map) pass `0`; refs built this way are
/// only valid for the lifetime of the `AriaSnapshot` value itself and are
/// not registered for later lookup by `element_from_ref`/`locator_from_ref`.
pub(crate) fn apply_refs_to_snapshot(
    snapshot: &mut AriaSnapshot,
    snapshot_id: usize,
    ref_map: &HashMap<usize, BackendNodeId>,
) {
    // Apply ref if this node has an element_index
    if let Some(index) = snapshot.element_index {
        if ref_map.contains_key(&index) {
            snapshot.node_ref = Some(format_ref(snapshot_id, index));
        }
        // Clear the element_index now that we've processed it
        snapshot.element_index = None;
    }

    // Recursively process children
    for child in &mut snapshot.children {
        apply_refs_to_snapshot(child, snapshot_id, ref_map);
    }
}
