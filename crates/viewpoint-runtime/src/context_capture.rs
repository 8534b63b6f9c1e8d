//! Post-step context capture: url, scroll position, active element, modal
//! presence, and a handful of visible interactive elements, used to build
//! the response's `context` field and the human-readable action summary.

use tracing::instrument;
use viewpoint_core::error::PageError;
use viewpoint_core::Page;

use crate::protocol::ResponseContext;

const MAX_BUTTONS: usize = 5;
const MAX_LINKS: usize = 5;
const MAX_ERRORS: usize = 3;

/// In-page script returning the raw context fields as a single JSON object,
/// evaluated once per capture to avoid N round trips.
const CAPTURE_SCRIPT: &str = r"(() => {
    function visible(el) {
        const rect = el.getBoundingClientRect();
        if (rect.width <= 0 || rect.height <= 0) return false;
        const style = getComputedStyle(el);
        return style.display !== 'none' && style.visibility !== 'hidden' && style.opacity !== '0';
    }
    function label(el) {
        return (el.innerText || el.textContent || el.value || '').trim().slice(0, 80);
    }
    const active = document.activeElement;
    const activeSummary = active && active !== document.body
        ? `${active.tagName.toLowerCase()}${active.id ? '#' + active.id : ''}`
        : null;
    const modalPresent = !!document.querySelector(
        '[role=dialog], [role=alertdialog], dialog[open]'
    );
    const buttons = Array.from(document.querySelectorAll('button, [role=button]'))
        .filter(visible).slice(0, 5).map(label);
    const links = Array.from(document.querySelectorAll('a[href]'))
        .filter(visible).slice(0, 5).map(label);
    const errors = Array.from(document.querySelectorAll('[role=alert], .error, [aria-invalid=true]'))
        .filter(visible).slice(0, 3).map(label);
    return {
        url: location.href,
        scrollY: window.scrollY,
        activeElement: activeSummary,
        modalPresent,
        visibleButtons: buttons,
        visibleLinks: links,
        visibleErrors: errors,
    };
})()";

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContext {
    url: String,
    scroll_y: f64,
    active_element: Option<String>,
    modal_present: bool,
    visible_buttons: Vec<String>,
    visible_links: Vec<String>,
    visible_errors: Vec<String>,
}

/// Capture the current page context.
#[instrument(level = "debug", skip(page))]
pub async fn capture(page: &Page) -> Result<ResponseContext, PageError> {
    let raw: RawContext = page.evaluate(CAPTURE_SCRIPT).await?;
    Ok(ResponseContext {
        url: raw.url,
        scroll_y: raw.scroll_y,
        active_element: raw.active_element,
        modal_present: raw.modal_present,
        visible_buttons: raw.visible_buttons.into_iter().take(MAX_BUTTONS).collect(),
        visible_links: raw.visible_links.into_iter().take(MAX_LINKS).collect(),
        visible_errors: raw.visible_errors.into_iter().take(MAX_ERRORS).collect(),
    })
}

/// Build the human-readable action-context line the runner attaches to the
/// response when the command-level diff has significant changes, e.g.
/// `"Clicked Submit — 3 elements added, 1 removed"`.
pub fn describe_action(action_label: &str, diff: &crate::diff::Diff) -> Option<String> {
    if diff.added.is_empty() && diff.removed.is_empty() && diff.changed.is_empty() {
        return None;
    }
    Some(format!(
        "{action_label} - {} added, {} removed, {} changed",
        diff.added.len(),
        diff.removed.len(),
        diff.changed.len()
    ))
}
