//! One executor per action: translate a validated step into
//! locator/actionability/input/evaluate calls against a live page.
//!
//! Grounded in a per-action-file organization (one file, one concern),
//! generalized from "one tool call per invocation" to "one executor call
//! per step in an ordered array" — each executor is a plain async function
//! over an [`ExecContext`] rather than a dispatch object, so the runner's
//! step loop is a straightforward match over [`crate::protocol::Step`].

mod eval;
mod interaction;
mod misc;
mod navigation;
mod query;
mod snapshot;

use std::time::Duration;

use serde_json::Value;
use viewpoint_core::{BrowserContext, Locator, Page};

use crate::config::StepTimeouts;
use crate::error::StepError;
use crate::protocol::{ElementTarget, Step};

pub use misc::{ConsoleEntry, ConsoleLog};

/// Shared environment every executor runs against.
pub struct ExecContext<'a> {
    pub page: &'a Page,
    pub context: &'a BrowserContext,
    pub timeouts: &'a StepTimeouts,
    /// Accumulated `console.*` messages since the last `clear`, fed by the
    /// runner's console event handler registered once per attached page.
    pub console_log: &'a ConsoleLog,
}

/// What an executor hands back to the runner: the `output` payload plus an
/// optional non-fatal `warning` (e.g. "ref was stale, re-resolved by role").
#[derive(Debug, Default)]
pub struct ExecOutcome {
    pub output: Option<Value>,
    pub warning: Option<String>,
}

impl From<Value> for ExecOutcome {
    fn from(value: Value) -> Self {
        ExecOutcome {
            output: Some(value),
            warning: None,
        }
    }
}

impl ExecOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}

/// Resolve an [`ElementTarget`] to a [`Locator`] against `page`.
///
/// This is the single place a step's addressing strategy (selector, ref,
/// text, selector fallback chain, label, coordinates) turns into the
/// teacher's `Locator` type; `x`/`y`-only targets have no `Locator`
/// equivalent and are rejected here, since every caller of this helper acts
/// through the locator API rather than raw coordinates.
pub fn resolve_locator<'a>(page: &'a Page, target: &ElementTarget) -> Result<Locator<'a>, StepError> {
    if let Some(ref r) = target.element_ref {
        return Ok(page.locator_from_ref(r));
    }
    if let Some(ref selector) = target.selector {
        return Ok(page.locator(selector.clone()));
    }
    if let Some(ref label) = target.label {
        return Ok(page.get_by_label(label.clone()));
    }
    if let Some(ref text) = target.text {
        return Ok(page.get_by_text(text.clone()));
    }
    if let Some(ref selectors) = target.selectors {
        // Fallback chain: the validator guarantees non-empty; the first
        // entry is tried first, same as a plain selector target, and later
        // entries only matter to callers that inspect `query`/`queryAll`
        // results across multiple candidates.
        let first = selectors
            .first()
            .ok_or_else(|| StepError::Validation("selectors array is empty".to_string()))?;
        return Ok(page.locator(first.clone()));
    }
    Err(StepError::Validation(
        "target requires selector, ref, text, selectors, or label".to_string(),
    ))
}

/// Resolve a step's own timeout, falling back to the actionability default.
pub fn step_timeout(explicit: Option<u64>, default: Duration) -> Duration {
    explicit.map(Duration::from_millis).unwrap_or(default)
}

/// Dispatch one step to its executor.
pub async fn execute(ctx: &ExecContext<'_>, step: &Step) -> Result<ExecOutcome, StepError> {
    match step {
        Step::Goto(p) => navigation::goto(ctx, p).await,
        Step::Reload { wait_until } => navigation::reload(ctx, *wait_until).await,
        Step::Back => navigation::back(ctx).await,
        Step::Forward => navigation::forward(ctx).await,
        Step::WaitForNavigation { wait_until, timeout } => {
            navigation::wait_for_navigation(ctx, *wait_until, *timeout).await
        }
        Step::Viewport { width, height } => navigation::set_viewport(ctx, *width, *height).await,
        Step::GetUrl => navigation::get_url(ctx).await,
        Step::GetTitle => navigation::get_title(ctx).await,

        Step::Click(p) => interaction::click(ctx, p).await,
        Step::Fill(p) => interaction::fill(ctx, p).await,
        Step::Hover { target } => interaction::hover(ctx, target).await,
        Step::Press(p) => interaction::press(ctx, p).await,
        Step::Type(p) => interaction::type_text(ctx, p).await,
        Step::SelectText { target } => interaction::select_text(ctx, target).await,
        Step::SelectOption { target, value } => interaction::select_option(ctx, target, value).await,
        Step::Submit { target } => interaction::submit(ctx, target).await,
        Step::Scroll(p) => interaction::scroll(ctx, p).await,
        Step::Drag(p) => interaction::drag(ctx, p).await,
        Step::FillActive { value } => interaction::fill_active(ctx, value).await,

        Step::Query { target } => query::query(ctx, target).await,
        Step::QueryAll { target } => query::query_all(ctx, target).await,
        Step::Inspect { target } => query::inspect(ctx, target).await,
        Step::Get { target } => query::get(ctx, target).await,
        Step::GetDom { target } => query::get_dom(ctx, target).await,
        Step::GetBox { target } => query::get_box(ctx, target).await,
        Step::FormState { target } => query::form_state(ctx, target).await,
        Step::Extract { target, attribute } => query::extract(ctx, target, attribute.as_deref()).await,
        Step::ElementsAt(p) => query::elements_at(ctx, p).await,
        Step::Wait { selector, timeout } => query::wait(ctx, selector, *timeout).await,

        Step::Snapshot(p) => snapshot::snapshot(ctx, p).await,
        Step::SnapshotSearch { query: q } => snapshot::snapshot_search(ctx, q).await,

        Step::Eval(p) => eval::eval(ctx, p).await,
        Step::Assert { expression } => eval::assert_expr(ctx, expression).await,
        Step::PageFunction { expression, args } => eval::page_function(ctx, expression, args).await,
        Step::Poll(p) => eval::poll(ctx, p).await,

        Step::Sleep { ms } => misc::sleep(*ms).await,
        Step::Console { clear } => misc::console(ctx, *clear).await,
        Step::Pdf { path } => misc::pdf(ctx, path.as_deref()).await,
        Step::Cookies(p) => misc::cookies(ctx, p).await,
        Step::Frame { selector, name } => misc::frame(ctx, selector.as_deref(), name.as_deref()).await,
        Step::WriteSiteProfile { key, value } => misc::write_site_profile(key, value).await,
        Step::ReadSiteProfile { key } => misc::read_site_profile(key).await,

        // Multi-tab bookkeeping is handled by the runner directly against
        // the `TabRegistry`/`CdpSession` collaborators, not here: these
        // steps never reach an executor (see `Runner::run`).
        Step::ListTabs | Step::CloseTab { .. } | Step::NewTab { .. } | Step::SwitchTab { .. } => {
            Err(StepError::Execution(
                "tab-management steps are handled by the runner, not an executor".to_string(),
            ))
        }
    }
}
