//! Read-only executors: existence/state queries, DOM/box introspection,
//! form-state snapshots, attribute extraction, and the raw coordinate hit
//! test.

use std::time::Duration;

use serde_json::json;

use super::{resolve_locator, ExecContext, ExecOutcome};
use crate::error::StepError;
use crate::protocol::{ElementTarget, ElementsAtParams};

async fn describe(locator: &viewpoint_core::Locator<'_>) -> Result<serde_json::Value, StepError> {
    let text = locator.text_content().await?;
    let visible = locator.is_visible().await?;
    let tag: String = locator
        .evaluate("element.tagName ? element.tagName.toLowerCase() : ''")
        .await
        .unwrap_or_default();
    Ok(json!({ "tag": tag, "text": text, "visible": visible }))
}

pub async fn query(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    let count = locator.count().await?;
    if count == 0 {
        return Ok(json!({ "found": false }).into());
    }
    let first = locator.first();
    let mut descriptor = describe(&first).await?;
    descriptor["found"] = json!(true);
    Ok(descriptor.into())
}

pub async fn query_all(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    let matches = locator.all().await?;
    let mut results = Vec::with_capacity(matches.len());
    for m in &matches {
        results.push(describe(m).await?);
    }
    Ok(json!({ "count": results.len(), "elements": results }).into())
}

pub async fn inspect(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    let descriptor = describe(&locator).await?;
    let attributes: serde_json::Value = locator
        .evaluate(
            "(() => { const out = {}; for (const a of element.attributes) out[a.name] = a.value; return out; })()",
        )
        .await?;
    let box_model = locator.bounding_box().await?;
    Ok(json!({
        "descriptor": descriptor,
        "attributes": attributes,
        "box": box_model,
    })
    .into())
}

pub async fn get(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    let value = locator.input_value().await.ok();
    let text = locator.text_content().await?;
    Ok(json!({ "value": value, "text": text }).into())
}

pub async fn get_dom(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    let html: String = locator.evaluate("element.outerHTML").await?;
    Ok(json!({ "html": html }).into())
}

pub async fn get_box(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    let box_model = locator.bounding_box().await?;
    Ok(json!({ "box": box_model }).into())
}

pub async fn form_state(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    let state: serde_json::Value = locator
        .evaluate(
            "(() => { const form = element.tagName === 'FORM' ? element : element.closest('form'); \
             if (!form) return null; \
             const out = {}; \
             for (const el of form.elements) { \
               if (!el.name) continue; \
               out[el.name] = el.type === 'checkbox' || el.type === 'radio' ? el.checked : el.value; \
             } \
             return out; })()",
        )
        .await?;
    Ok(json!({ "form": state }).into())
}

pub async fn extract(ctx: &ExecContext<'_>, target: &ElementTarget, attribute: Option<&str>) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    let value = match attribute {
        Some(name) => locator.get_attribute(name).await?,
        None => locator.text_content().await?,
    };
    Ok(json!({ "value": value }).into())
}

pub async fn elements_at(ctx: &ExecContext<'_>, params: &ElementsAtParams) -> Result<ExecOutcome, StepError> {
    let points: Vec<(f64, f64)> = match params {
        ElementsAtParams::One { x, y } => vec![(*x, *y)],
        ElementsAtParams::Many(points) => points.iter().map(|p| (p.x, p.y)).collect(),
        ElementsAtParams::Radius { x, y, radius } => {
            // Sample the bounding box corners plus center; a full hit-test
            // grid is unnecessary for the "what's near this point" use case.
            vec![
                (*x, *y),
                (x - radius, *y),
                (x + radius, *y),
                (*x, y - radius),
                (*x, y + radius),
            ]
        }
    };

    let mut results = Vec::with_capacity(points.len());
    for (x, y) in points {
        let hit: serde_json::Value = ctx
            .page
            .evaluate_with_arg(
                "({x, y}) => { const el = document.elementFromPoint(x, y); \
                 if (!el) return null; \
                 return { tag: el.tagName.toLowerCase(), id: el.id || null, className: el.className || null }; }",
                json!({ "x": x, "y": y }),
            )
            .await?;
        results.push(json!({ "x": x, "y": y, "element": hit }));
    }
    Ok(json!({ "elements": results }).into())
}

pub async fn wait(ctx: &ExecContext<'_>, selector: &str, timeout: Option<u64>) -> Result<ExecOutcome, StepError> {
    let locator = ctx.page.locator(selector.to_string());
    let deadline = super::step_timeout(timeout, ctx.timeouts.default);
    let start = tokio::time::Instant::now();
    loop {
        if locator.count().await? > 0 {
            return Ok(ExecOutcome::empty());
        }
        if start.elapsed() >= deadline {
            return Err(StepError::Timeout(deadline));
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
