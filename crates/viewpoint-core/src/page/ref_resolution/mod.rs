//! Node reference resolution for ARIA snapshots.
//!
//! This module provides functionality to resolve element references from
//! ARIA snapshots back to DOM elements for interaction.
//!
//! # Reference Format
//!
//! Element references follow the wire-stable format `s{snapshotId}e{elementCounter}` where:
//!
//! - `s{snapshotId}` - Monotonic id of the snapshot that produced this ref (per page)
//! - `e{elementCounter}` - Incrementing counter assigned to each semantic element within that snapshot
//!
//! For example: `s1e1`, `s1e2`, `s2e1`
//!
//! This format:
//! - Is short, readable, and strictly matches `^s\d+e\d+$`
//! - Lets later steps detect whether a ref belongs to a still-current snapshot
//! - Is validated by parsing, not by context/page bookkeeping - staleness is handled
//!   by the ref map lookup (a cleared or never-populated entry means "capture a new snapshot")
//!
//! # MCP Server Usage
//!
//! This feature is designed for MCP (Model Context Protocol) servers that need to:
//!
//! 1. Present an accessibility tree to AI/users
//! 2. Allow interaction with any element in that tree
//!
//! Without refs, users would need to re-query elements by role/name, which is fragile
//! when multiple elements share the same accessible properties.
//!
//! # Example: Click a Button by Ref
//!
//! ```no_run
//! use viewpoint_core::Page;
//!
//! # async fn example(page: &Page) -> Result<(), viewpoint_core::CoreError> {
//! // Capture snapshot with refs
//! let snapshot = page.aria_snapshot().await?;
//!
//! // Find a button's ref in the snapshot
//! if let Some(ref node_ref) = snapshot.node_ref.as_ref() {
//!     // Resolve ref to element handle (for low-level operations)
//!     let handle = page.element_from_ref(node_ref).await?;
//!
//!     // Or get a locator for auto-waiting behavior (preferred)
//!     let locator = page.locator_from_ref(node_ref);
//!     locator.click().await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Find and Interact with Snapshot Elements
//!
//! ```no_run
//! use viewpoint_core::{Page, AriaSnapshot};
//!
//! # async fn example(page: &Page) -> Result<(), viewpoint_core::CoreError> {
//! // Capture snapshot
//! let snapshot = page.aria_snapshot().await?;
//!
//! // Helper to find a button by name
//! fn find_button_ref(snapshot: &AriaSnapshot, name: &str) -> Option<String> {
//!     if snapshot.role.as_deref() == Some("button")
//!         && snapshot.name.as_deref() == Some(name)
//!     {
//!         return snapshot.node_ref.clone();
//!     }
//!     for child in &snapshot.children {
//!         if let Some(r) = find_button_ref(child, name) {
//!             return Some(r);
//!         }
//!     }
//!     None
//! }
//!
//! // Find "Submit" button and click it
//! if let Some(submit_ref) = find_button_ref(&snapshot, "Submit") {
//!     page.locator_from_ref(&submit_ref).click().await?;
//! }
//! # Ok(())
//! # }
//! ```

use tracing::{debug, instrument};
use viewpoint_cdp::protocol::dom::{
    BackendNodeId, DescribeNodeParams, DescribeNodeResult, ResolveNodeParams, ResolveNodeResult,
};

use super::Page;
use super::locator::ElementHandle;
use crate::error::{LocatorError, PageError};

/// Parsed element reference with snapshot id and element counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRef {
    /// Id of the snapshot that produced this ref.
    pub snapshot_id: usize,
    /// Element counter within that snapshot.
    pub element_counter: usize,
}

impl ParsedRef {
    /// Create a new parsed ref.
    pub fn new(snapshot_id: usize, element_counter: usize) -> Self {
        Self {
            snapshot_id,
            element_counter,
        }
    }
}

/// Parse a ref string to extract the snapshot id and element counter.
///
/// Refs are formatted as `s{snapshotId}e{counter}`, e.g., `s1e1`, matching `^s\d+e\d+$`.
///
/// # Errors
///
/// Returns `LocatorError::EvaluationError` if the ref format is invalid.
pub fn parse_ref(ref_str: &str) -> Result<ParsedRef, LocatorError> {
    let without_s = ref_str.strip_prefix('s').ok_or_else(|| {
        LocatorError::EvaluationError(format!(
            "Invalid ref format: expected 's{{snapshotId}}e{{counter}}', got '{ref_str}'"
        ))
    })?;

    let (snapshot_part, element_part) = without_s.split_once('e').ok_or_else(|| {
        LocatorError::EvaluationError(format!(
            "Invalid ref format: expected 'e' separator in '{ref_str}'"
        ))
    })?;

    if snapshot_part.is_empty() || element_part.is_empty() {
        return Err(LocatorError::EvaluationError(format!(
            "Invalid ref format: empty snapshot id or element counter in '{ref_str}'"
        )));
    }

    let snapshot_id = snapshot_part.parse::<usize>().map_err(|e| {
        LocatorError::EvaluationError(format!("Invalid snapshot id in ref '{ref_str}': {e}"))
    })?;

    let element_counter = element_part.parse::<usize>().map_err(|e| {
        LocatorError::EvaluationError(format!("Invalid element counter in ref '{ref_str}': {e}"))
    })?;

    Ok(ParsedRef::new(snapshot_id, element_counter))
}

/// Format a ref string from a snapshot id and element counter.
///
/// Produces the wire-stable format `s{snapshotId}e{counter}`.
pub fn format_ref(snapshot_id: usize, element_counter: usize) -> String {
    format!("s{snapshot_id}e{element_counter}")
}

impl Page {
    /// Get an element handle from a snapshot ref.
    ///
    /// This resolves the ref (format: `s{snapshotId}e{counter}`)
    /// to an `ElementHandle` that can be used for low-level DOM operations.
    ///
    /// # Arguments
    ///
    /// * `ref_str` - The element ref from an ARIA snapshot (e.g., `s1e1`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use viewpoint_core::Page;
    ///
    /// # async fn example(page: &Page) -> Result<(), viewpoint_core::CoreError> {
    /// let snapshot = page.aria_snapshot().await?;
    /// // Assume we found a button with ref "s1e1"
    /// let handle = page.element_from_ref("s1e1").await?;
    /// let text: String = handle.evaluate("this.textContent").await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The page is closed
    /// - The ref format is invalid
    /// - The ref is from a different context or page
    /// - The element no longer exists (stale ref)
    #[instrument(level = "debug", skip(self), fields(target_id = %self.target_id, ref_str = %ref_str))]
    pub async fn element_from_ref(&self, ref_str: &str) -> Result<ElementHandle<'_>, LocatorError> {
        if self.is_closed() {
            return Err(LocatorError::PageClosed);
        }

        let parsed = parse_ref(ref_str)?;

        debug!(
            snapshot_id = parsed.snapshot_id,
            element_counter = parsed.element_counter,
            "Resolving ref to element"
        );

        // Look up the backendNodeId from the ref map
        let backend_node_id = self.get_backend_node_id_for_ref(ref_str)?;

        // Use DOM.resolveNode to get a RemoteObject from the backend node ID
        let result: ResolveNodeResult = self
            .connection()
            .send_command(
                "DOM.resolveNode",
                Some(ResolveNodeParams {
                    node_id: None,
                    backend_node_id: Some(backend_node_id),
                    object_group: Some("viewpoint-ref".to_string()),
                    execution_context_id: None,
                }),
                Some(self.session_id()),
            )
            .await
            .map_err(|e| {
                LocatorError::NotFound(format!(
                    "Ref not found. Capture a new snapshot. Error: {e}"
                ))
            })?;

        let object_id = result.object.object_id.ok_or_else(|| {
            LocatorError::NotFound("Ref not found. Capture a new snapshot.".to_string())
        })?;

        debug!(object_id = %object_id, "Resolved ref to element handle");

        Ok(ElementHandle {
            object_id,
            page: self,
        })
    }

    /// Create a locator from a snapshot ref.
    ///
    /// This creates a `Locator` that targets the element identified by the ref.
    /// Unlike `element_from_ref`, the locator provides auto-waiting behavior
    /// and is the preferred way to interact with elements.
    ///
    /// # Arguments
    ///
    /// * `ref_str` - The element ref from an ARIA snapshot (e.g., `s1e1`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use viewpoint_core::Page;
    ///
    /// # async fn example(page: &Page) -> Result<(), viewpoint_core::CoreError> {
    /// let snapshot = page.aria_snapshot().await?;
    /// // Assume we found a button with ref "s1e1"
    /// let locator = page.locator_from_ref("s1e1");
    /// locator.click().await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the ref format is invalid. Use `element_from_ref` if you need
    /// to handle invalid refs gracefully.
    pub fn locator_from_ref(&self, ref_str: &str) -> super::Locator<'_> {
        use super::locator::{Locator, Selector};

        // Parse only to validate format; resolution happens lazily against the ref map.
        parse_ref(ref_str).expect("Invalid ref format. Refs must be in format 's{snapshotId}e{counter}'");

        // Create a locator with a ref selector that will lookup from the ref map
        Locator::new(self, Selector::Ref(ref_str.to_string()))
    }

    /// Get the backend node ID for an element from its object ID.
    ///
    /// This is a lower-level method used internally during snapshot capture
    /// to resolve element references.
    pub(crate) async fn get_backend_node_id(
        &self,
        object_id: &str,
    ) -> Result<BackendNodeId, PageError> {
        let result: DescribeNodeResult = self
            .connection()
            .send_command(
                "DOM.describeNode",
                Some(DescribeNodeParams {
                    node_id: None,
                    backend_node_id: None,
                    object_id: Some(object_id.to_string()),
                    depth: Some(0),
                    pierce: None,
                }),
                Some(self.session_id()),
            )
            .await?;

        Ok(result.node.backend_node_id)
    }

    /// Get the backend node ID for a ref from the ref map.
    ///
    /// This is used by `element_from_ref` and `locator_from_ref` to lookup
    /// the backendNodeId for a ref captured during `aria_snapshot()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ref is not found in the ref map.
    pub(crate) fn get_backend_node_id_for_ref(
        &self,
        ref_str: &str,
    ) -> Result<BackendNodeId, LocatorError> {
        self.ref_map
            .read()
            .get(ref_str)
            .copied()
            .ok_or_else(|| {
                LocatorError::NotFound(
                    "Ref not found. Capture a new snapshot.".to_string()
                )
            })
    }

    /// Store a ref mapping in the page's ref map.
    ///
    /// This is called during `aria_snapshot()` to populate the ref map
    /// with the element refs and their corresponding backendNodeIds.
    pub(crate) fn store_ref_mapping(&self, ref_str: String, backend_node_id: BackendNodeId) {
        self.ref_map.write().insert(ref_str, backend_node_id);
    }

    /// Clear all ref mappings.
    ///
    /// This is called at the beginning of `aria_snapshot()` to clear
    /// stale refs from a previous snapshot.
    pub(crate) fn clear_ref_map(&self) {
        self.ref_map.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ref_basic() {
        let parsed = parse_ref("s1e1").unwrap();
        assert_eq!(parsed.snapshot_id, 1);
        assert_eq!(parsed.element_counter, 1);
    }

    #[test]
    fn test_parse_ref_larger_indices() {
        let parsed = parse_ref("s34e789").unwrap();
        assert_eq!(parsed.snapshot_id, 34);
        assert_eq!(parsed.element_counter, 789);
    }

    #[test]
    fn test_parse_ref_matches_wire_regex() {
        let re_ok = |s: &str| {
            let bytes = s.as_bytes();
            bytes.first() == Some(&b's')
                && s.contains('e')
                && s[1..].split_once('e').is_some_and(|(a, b)| {
                    !a.is_empty() && !b.is_empty() && a.bytes().all(|c| c.is_ascii_digit()) && b.bytes().all(|c| c.is_ascii_digit())
                })
        };
        for s in ["s1e1", "s0e0", "s12e345"] {
            assert!(re_ok(s));
            assert!(parse_ref(s).is_ok());
        }
    }

    #[test]
    fn test_parse_ref_invalid_format() {
        assert!(parse_ref("invalid").is_err());
        assert!(parse_ref("x0e1").is_err());
        assert!(parse_ref("s0").is_err()); // missing element counter
        assert!(parse_ref("e1").is_err()); // missing snapshot id prefix
        assert!(parse_ref("").is_err());
    }

    #[test]
    fn test_parse_ref_invalid_numbers() {
        assert!(parse_ref("sXe1").is_err());
        assert!(parse_ref("s0eX").is_err());
    }

    #[test]
    fn test_format_ref() {
        assert_eq!(format_ref(0, 1), "s0e1");
        assert_eq!(format_ref(1, 4), "s1e4");
        assert_eq!(format_ref(12, 789), "s12e789");
    }

    #[test]
    fn test_format_and_parse_roundtrip() {
        let original = format_ref(5, 100);
        let parsed = parse_ref(&original).unwrap();
        assert_eq!(parsed.snapshot_id, 5);
        assert_eq!(parsed.element_counter, 100);
    }

    #[test]
    fn test_parsed_ref_new() {
        let parsed = ParsedRef::new(1, 4);
        assert_eq!(parsed.snapshot_id, 1);
        assert_eq!(parsed.element_counter, 4);
    }

    #[test]
    fn test_parsed_ref_equality() {
        let a = ParsedRef::new(1, 4);
        let b = ParsedRef::new(1, 4);
        let c = ParsedRef::new(1, 5);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
