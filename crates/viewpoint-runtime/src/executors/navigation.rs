//! Navigation executors: goto, reload, back/forward, explicit navigation
//! waits, viewport sizing, and the two plain page-info getters.

use viewpoint_core::wait::DocumentLoadState;

use super::{ExecContext, ExecOutcome};
use crate::error::StepError;
use crate::protocol::{GotoParams, WaitUntil};

fn to_load_state(wait_until: WaitUntil) -> DocumentLoadState {
    match wait_until {
        WaitUntil::Commit => DocumentLoadState::Commit,
        WaitUntil::DomContentLoaded => DocumentLoadState::DomContentLoaded,
        WaitUntil::Load => DocumentLoadState::Load,
        WaitUntil::NetworkIdle => DocumentLoadState::NetworkIdle,
    }
}

pub async fn goto(ctx: &ExecContext<'_>, params: &GotoParams) -> Result<ExecOutcome, StepError> {
    let mut builder = ctx.page.goto(params.url.clone()).wait_until(to_load_state(params.wait_until));
    let timeout = super::step_timeout(params.timeout, ctx.timeouts.navigation);
    builder = builder.timeout(timeout);
    let response = builder.goto().await?;
    Ok(serde_json::json!({ "url": response.url(), "frameId": response.frame_id() }).into())
}

pub async fn reload(ctx: &ExecContext<'_>, wait_until: WaitUntil) -> Result<ExecOutcome, StepError> {
    let response = ctx.page.reload().await?;
    let frame = ctx.page.main_frame().await?;
    frame
        .wait_for_load_state_with_timeout(to_load_state(wait_until), ctx.timeouts.navigation)
        .await?;
    Ok(serde_json::json!({ "url": response.url() }).into())
}

pub async fn back(ctx: &ExecContext<'_>) -> Result<ExecOutcome, StepError> {
    let response = ctx.page.go_back().await?;
    Ok(match response {
        Some(r) => serde_json::json!({ "navigated": true, "url": r.url() }).into(),
        None => serde_json::json!({ "navigated": false }).into(),
    })
}

pub async fn forward(ctx: &ExecContext<'_>) -> Result<ExecOutcome, StepError> {
    let response = ctx.page.go_forward().await?;
    Ok(match response {
        Some(r) => serde_json::json!({ "navigated": true, "url": r.url() }).into(),
        None => serde_json::json!({ "navigated": false }).into(),
    })
}

pub async fn wait_for_navigation(
    ctx: &ExecContext<'_>,
    wait_until: WaitUntil,
    timeout: Option<u64>,
) -> Result<ExecOutcome, StepError> {
    let state = to_load_state(wait_until);
    let deadline = super::step_timeout(timeout, ctx.timeouts.navigation);
    let frame = ctx.page.main_frame().await?;
    frame.wait_for_load_state_with_timeout(state, deadline).await?;
    Ok(ExecOutcome::empty())
}

pub async fn set_viewport(ctx: &ExecContext<'_>, width: u32, height: u32) -> Result<ExecOutcome, StepError> {
    ctx.page.set_viewport_size(width as i32, height as i32).await?;
    Ok(serde_json::json!({ "width": width, "height": height }).into())
}

pub async fn get_url(ctx: &ExecContext<'_>) -> Result<ExecOutcome, StepError> {
    let url = ctx.page.url().await?;
    Ok(serde_json::json!({ "url": url }).into())
}

pub async fn get_title(ctx: &ExecContext<'_>) -> Result<ExecOutcome, StepError> {
    let title = ctx.page.title().await?;
    Ok(serde_json::json!({ "title": title }).into())
}
