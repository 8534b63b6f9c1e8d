//! Internal JavaScript-driven actionability data collection.
//!
//! Gathers the raw signals the actionability predicate engine needs
//! (attached, visible, enabled, editable, rect, hit-test) for the first
//! matching element in a single round trip per attempt, rather than one
//! CDP call per predicate.

use serde::Deserialize;
use viewpoint_cdp::protocol::dom::BackendNodeId;
use viewpoint_js::js;

use super::{Locator, Selector};
use crate::error::LocatorError;

/// Bounding rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct ActionabilityRect {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

/// Raw per-attempt signals collected from the live DOM for one element.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActionabilityInfo {
    pub(crate) found: bool,
    #[serde(default)]
    pub(crate) attached: bool,
    #[serde(default)]
    pub(crate) visible: bool,
    #[serde(default)]
    pub(crate) enabled: bool,
    #[serde(default)]
    pub(crate) editable: bool,
    #[serde(default)]
    pub(crate) editable_reason: Option<String>,
    #[serde(default)]
    pub(crate) rect: Option<ActionabilityRect>,
    #[serde(default)]
    pub(crate) hittable: bool,
    #[serde(default)]
    pub(crate) blocked_by: Option<String>,
    #[serde(default)]
    pub(crate) tag_name: Option<String>,
}

impl Locator<'_> {
    /// Collect every actionability signal for the first matching element in
    /// one round trip. Returns `found: false` if nothing matches.
    pub(crate) async fn actionability_snapshot(&self) -> Result<ActionabilityInfo, LocatorError> {
        if let Selector::Ref(ref_str) = &self.selector {
            let backend_node_id = self.page.get_backend_node_id_for_ref(ref_str)?;
            return self
                .actionability_snapshot_by_backend_id(backend_node_id)
                .await;
        }
        if let Selector::BackendNodeId(backend_node_id) = &self.selector {
            return self
                .actionability_snapshot_by_backend_id(*backend_node_id)
                .await;
        }

        let selector_expr = self.selector.to_js_expression();
        let js_code = js! {
            (function() {
                const elements = Array.from(@{selector_expr});
                if (elements.length === 0) {
                    return { found: false };
                }
                const element = elements[0];
                const rect = element.getBoundingClientRect();
                const style = window.getComputedStyle(element);
                const visible = rect.width > 0 && rect.height > 0 &&
                    style.visibility !== "hidden" &&
                    style.display !== "none" &&
                    parseFloat(style.opacity) > 0;
                const attached = document.contains(element);

                const fieldset = element.closest ? element.closest("fieldset[disabled]") : null;
                let disabledByFieldset = false;
                if (fieldset) {
                    const legend = fieldset.querySelector(":scope > legend");
                    disabledByFieldset = !(legend && legend.contains(element));
                }
                const ariaDisabled = element.getAttribute && element.getAttribute("aria-disabled") === "true";
                const enabled = !element.disabled && !ariaDisabled && !disabledByFieldset;

                const textInputTypes = ["text", "search", "url", "tel", "email", "password", "number", "date", "datetime-local", "month", "week", "time", "color"];
                const tag = element.tagName ? element.tagName.toLowerCase() : "";
                const isTextClassInput = tag === "input" && textInputTypes.indexOf((element.type || "text").toLowerCase()) !== -1;
                const isTextarea = tag === "textarea";
                const isContentEditable = element.isContentEditable === true;
                const ariaReadonly = element.getAttribute && element.getAttribute("aria-readonly") === "true";
                const readOnly = element.readOnly === true || ariaReadonly;

                let editable = false;
                let editableReason = null;
                if (!enabled) {
                    editableReason = "disabled";
                } else if (readOnly) {
                    editableReason = "readOnly";
                } else if (!(isTextClassInput || isTextarea || isContentEditable)) {
                    editableReason = "not a text input";
                } else {
                    editable = true;
                }

                const centerX = rect.x + rect.width / 2;
                const centerY = rect.y + rect.height / 2;
                let hittable = false;
                let blockedBy = null;
                if (rect.width > 0 && rect.height > 0) {
                    const hitEl = document.elementFromPoint(centerX, centerY);
                    if (hitEl) {
                        hittable = hitEl === element || element.contains(hitEl);
                        if (!hittable) {
                            blockedBy = hitEl.tagName ? hitEl.tagName.toLowerCase() + (hitEl.id ? ("#" + hitEl.id) : "") : "unknown element";
                        }
                    } else {
                        blockedBy = "no element at point";
                    }
                } else {
                    blockedBy = "zero-size element";
                }

                return {
                    found: true,
                    attached: attached,
                    visible: visible,
                    enabled: enabled,
                    editable: editable,
                    editableReason: editableReason,
                    rect: { x: rect.x, y: rect.y, width: rect.width, height: rect.height },
                    hittable: hittable,
                    blockedBy: blockedBy,
                    tagName: tag
                };
            })()
        };

        let result = self.evaluate_js(&js_code).await?;
        serde_json::from_value(result).map_err(|e| LocatorError::EvaluationError(e.to_string()))
    }

    /// Same as [`Self::actionability_snapshot`] but for an element already
    /// resolved to a backend node ID (ref / backend-node-id selectors).
    async fn actionability_snapshot_by_backend_id(
        &self,
        backend_node_id: BackendNodeId,
    ) -> Result<ActionabilityInfo, LocatorError> {
        let js_fn = js! {
            (function() {
                const element = this;
                const rect = element.getBoundingClientRect();
                const style = window.getComputedStyle(element);
                const visible = rect.width > 0 && rect.height > 0 &&
                    style.visibility !== "hidden" &&
                    style.display !== "none" &&
                    parseFloat(style.opacity) > 0;
                const attached = document.contains(element);

                const fieldset = element.closest ? element.closest("fieldset[disabled]") : null;
                let disabledByFieldset = false;
                if (fieldset) {
                    const legend = fieldset.querySelector(":scope > legend");
                    disabledByFieldset = !(legend && legend.contains(element));
                }
                const ariaDisabled = element.getAttribute && element.getAttribute("aria-disabled") === "true";
                const enabled = !element.disabled && !ariaDisabled && !disabledByFieldset;

                const textInputTypes = ["text", "search", "url", "tel", "email", "password", "number", "date", "datetime-local", "month", "week", "time", "color"];
                const tag = element.tagName ? element.tagName.toLowerCase() : "";
                const isTextClassInput = tag === "input" && textInputTypes.indexOf((element.type || "text").toLowerCase()) !== -1;
                const isTextarea = tag === "textarea";
                const isContentEditable = element.isContentEditable === true;
                const ariaReadonly = element.getAttribute && element.getAttribute("aria-readonly") === "true";
                const readOnly = element.readOnly === true || ariaReadonly;

                let editable = false;
                let editableReason = null;
                if (!enabled) {
                    editableReason = "disabled";
                } else if (readOnly) {
                    editableReason = "readOnly";
                } else if (!(isTextClassInput || isTextarea || isContentEditable)) {
                    editableReason = "not a text input";
                } else {
                    editable = true;
                }

                const centerX = rect.x + rect.width / 2;
                const centerY = rect.y + rect.height / 2;
                let hittable = false;
                let blockedBy = null;
                if (rect.width > 0 && rect.height > 0) {
                    const hitEl = document.elementFromPoint(centerX, centerY);
                    if (hitEl) {
                        hittable = hitEl === element || element.contains(hitEl);
                        if (!hittable) {
                            blockedBy = hitEl.tagName ? hitEl.tagName.toLowerCase() + (hitEl.id ? ("#" + hitEl.id) : "") : "unknown element";
                        }
                    } else {
                        blockedBy = "no element at point";
                    }
                } else {
                    blockedBy = "zero-size element";
                }

                return {
                    found: true,
                    attached: attached,
                    visible: visible,
                    enabled: enabled,
                    editable: editable,
                    editableReason: editableReason,
                    rect: { x: rect.x, y: rect.y, width: rect.width, height: rect.height },
                    hittable: hittable,
                    blockedBy: blockedBy,
                    tagName: tag
                };
            })
        };
        // Strip outer parentheses for CDP functionDeclaration.
        let js_fn = js_fn.trim_start_matches('(').trim_end_matches(')');

        let result = self
            .call_function_on_backend_id(backend_node_id, js_fn)
            .await?;
        serde_json::from_value(result).map_err(|e| LocatorError::EvaluationError(e.to_string()))
    }
}
