//! Auto-wait actionability checks that block interactions until an element
//! is a legitimate target for the action being performed.
//!
//! This is the auto-wait layer step executors build on: instead of a
//! single "is it visible yet" poll, each action kind declares the
//! [`Predicate`] set it requires and [`wait_for_actionable`] retries until
//! every required predicate matches or the timeout elapses.

use std::time::Duration;

use tracing::trace;

use super::locator::Locator;
use crate::error::LocatorError;

mod point;

pub use point::{ClickablePoint, ScrollDirection, ScrollUntilVisibleOptions};

/// A single actionability check an action kind may require before proceeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// The node's root is the document (not detached).
    Attached,
    /// Non-zero layout box, not hidden via `display`/`visibility`/`opacity`.
    Visible,
    /// Not `disabled`, not `aria-disabled`, not inside a disabled fieldset.
    Enabled,
    /// Enabled, not read-only, and a text-class input or contenteditable.
    Editable,
    /// Bounding rect unchanged across two consecutive checks.
    Stable,
    /// `elementFromPoint` at the element's center resolves to it or a descendant.
    Hittable,
}

/// Outcome of evaluating one [`Predicate`] against an element.
#[derive(Debug, Clone)]
pub struct PredicateResult {
    /// Whether the predicate was satisfied.
    pub matches: bool,
    /// Human-readable observed state, used in error messages (the blocking
    /// element's tag for `Hittable`, the sub-reason for `Editable`, etc).
    pub received: String,
}

/// The action an actionability wait is gating, used to pick the required
/// predicate subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Click,
    Hover,
    Fill,
    Type,
    Select,
}

impl ActionKind {
    /// Predicates required before this action kind may proceed.
    ///
    /// `force` collapses every action down to `attached` only, bypassing
    /// the rest of the auto-wait protocol.
    fn required_predicates(self, force: bool) -> &'static [Predicate] {
        if force {
            return &[Predicate::Attached];
        }
        match self {
            ActionKind::Click | ActionKind::Hover => &[Predicate::Attached],
            ActionKind::Fill | ActionKind::Type => &[Predicate::Attached, Predicate::Editable],
            ActionKind::Select => &[Predicate::Attached],
        }
    }
}

/// Options controlling an actionability wait.
#[derive(Debug, Clone)]
pub struct ActionabilityOptions {
    /// Overall deadline for the retry loop.
    pub timeout: Duration,
    /// Bypass every predicate except `attached`.
    pub force: bool,
}

impl Default for ActionabilityOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            force: false,
        }
    }
}

/// Fixed retry delay schedule, in milliseconds, repeating at the last entry
/// once exhausted.
const RETRY_SCHEDULE_MS: [u64; 4] = [0, 50, 100, 200];

/// Block until `locator` satisfies every predicate `action` requires, or
/// return the first predicate that failed once `options.timeout` elapses.
///
/// `Stable` is evaluated by comparing the bounding rect across consecutive
/// attempts, reusing the retry loop's own delay as the settle window rather
/// than issuing a dedicated two-frame round trip.
pub async fn wait_for_actionable(
    locator: &Locator<'_>,
    action: ActionKind,
    options: ActionabilityOptions,
) -> Result<(), LocatorError> {
    let required = action.required_predicates(options.force);
    let start = std::time::Instant::now();
    let mut attempt = 0usize;
    let mut previous_rect: Option<super::locator::ActionabilityRect> = None;

    loop {
        let info = locator.actionability_snapshot().await?;
        let failure = first_failing_predicate(&info, required, previous_rect);
        previous_rect = info.rect;

        match failure {
            None => return Ok(()),
            Some((predicate, result)) => {
                if start.elapsed() >= options.timeout {
                    return Err(failure_to_error(predicate, result));
                }
                let delay = RETRY_SCHEDULE_MS[attempt.min(RETRY_SCHEDULE_MS.len() - 1)];
                trace!(
                    ?predicate,
                    received = %result.received,
                    delay_ms = delay,
                    "actionability predicate not yet satisfied"
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
                attempt += 1;
            }
        }
    }
}

fn first_failing_predicate(
    info: &super::locator::ActionabilityInfo,
    required: &[Predicate],
    previous_rect: Option<super::locator::ActionabilityRect>,
) -> Option<(Predicate, PredicateResult)> {
    for &predicate in required {
        let result = evaluate_predicate(info, predicate, previous_rect);
        if !result.matches {
            return Some((predicate, result));
        }
    }
    None
}

fn evaluate_predicate(
    info: &super::locator::ActionabilityInfo,
    predicate: Predicate,
    previous_rect: Option<super::locator::ActionabilityRect>,
) -> PredicateResult {
    if !info.found {
        return PredicateResult {
            matches: false,
            received: "no matching element".to_string(),
        };
    }

    match predicate {
        Predicate::Attached => PredicateResult {
            matches: info.attached,
            received: if info.attached {
                "attached".to_string()
            } else {
                "detached".to_string()
            },
        },
        Predicate::Visible => PredicateResult {
            matches: info.visible,
            received: if info.visible {
                "visible".to_string()
            } else {
                "hidden".to_string()
            },
        },
        Predicate::Enabled => PredicateResult {
            matches: info.enabled,
            received: if info.enabled {
                "enabled".to_string()
            } else {
                "disabled".to_string()
            },
        },
        Predicate::Editable => PredicateResult {
            matches: info.editable,
            received: info
                .editable_reason
                .clone()
                .unwrap_or_else(|| "editable".to_string()),
        },
        Predicate::Hittable => PredicateResult {
            matches: info.hittable,
            received: info
                .blocked_by
                .clone()
                .unwrap_or_else(|| "hittable".to_string()),
        },
        Predicate::Stable => {
            let stable = match (previous_rect, info.rect) {
                (Some(prev), Some(current)) => {
                    prev.x == current.x
                        && prev.y == current.y
                        && prev.width == current.width
                        && prev.height == current.height
                }
                // No prior sample yet; treat the first observation as unstable
                // so the loop retries at least once before accepting it.
                _ => false,
            };
            PredicateResult {
                matches: stable,
                received: if stable {
                    "stable".to_string()
                } else {
                    "moving".to_string()
                },
            }
        }
    }
}

fn failure_to_error(predicate: Predicate, result: PredicateResult) -> LocatorError {
    match predicate {
        Predicate::Attached => LocatorError::NotFound(result.received),
        Predicate::Visible => LocatorError::NotVisible,
        Predicate::Enabled => LocatorError::NotEnabled,
        Predicate::Editable => LocatorError::NotEditable(result.received),
        Predicate::Stable => LocatorError::NotStable,
        Predicate::Hittable => LocatorError::Covered(result.received),
    }
}

/// Get the point a click should land on, along with the element's rect.
///
/// # Errors
///
/// Returns an error if the element cannot be found or has no layout box.
pub async fn get_clickable_point(locator: &Locator<'_>) -> Result<ClickablePoint, LocatorError> {
    let bbox = locator
        .bounding_box()
        .await?
        .ok_or_else(|| LocatorError::NotVisible)?;
    Ok(ClickablePoint {
        x: bbox.x + bbox.width / 2.0,
        y: bbox.y + bbox.height / 2.0,
        rect: bbox,
    })
}

/// Check whether `point` on `locator`'s element is covered by another node.
///
/// Uses the same `elementFromPoint` hit-test the `Hittable` predicate relies
/// on; kept as a standalone helper for callers that already have a point
/// (e.g. a prior `get_clickable_point` call) and want to re-check coverage
/// without redoing the rest of the actionability snapshot.
///
/// # Errors
///
/// Returns an error if the element cannot be found.
pub async fn check_covered(locator: &Locator<'_>) -> Result<PredicateResult, LocatorError> {
    let info = locator.actionability_snapshot().await?;
    Ok(evaluate_predicate(&info, Predicate::Hittable, None))
}

/// Scroll the page in `options.direction` up to `options.max_scrolls` times,
/// checking visibility after each scroll, to surface lazily-rendered content.
///
/// Returns `true` once the element becomes visible, `false` if the scroll
/// budget is exhausted first.
///
/// # Errors
///
/// Returns an error if the element query itself fails (distinct from simply
/// not being visible yet).
pub async fn scroll_until_visible(
    locator: &Locator<'_>,
    options: ScrollUntilVisibleOptions,
) -> Result<bool, LocatorError> {
    for _ in 0..options.max_scrolls {
        let info = locator.actionability_snapshot().await?;
        if info.found && info.visible {
            return Ok(true);
        }

        let (dx, dy) = options.direction.delta(options.scroll_amount);
        locator
            .page()
            .evaluate_with_arg::<serde_json::Value, _>(
                "([dx, dy]) => window.scrollBy(dx, dy)",
                (dx, dy),
            )
            .await
            .map_err(|e| LocatorError::EvaluationError(e.to_string()))?;

        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let info = locator.actionability_snapshot().await?;
    Ok(info.found && info.visible)
}
