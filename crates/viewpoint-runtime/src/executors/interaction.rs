//! Pointer, keyboard, and form-control executors.

use super::{resolve_locator, ExecContext, ExecOutcome};
use crate::error::StepError;
use crate::protocol::{ClickParams, DragEndpoint, DragMethod, DragParams, ElementTarget, FillParams, PressParams, ScrollParams, TypeParams};

pub async fn click(ctx: &ExecContext<'_>, params: &ClickParams) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, &params.target)?;
    let mut builder = locator.click();
    if params.force {
        builder = builder.force(true);
    }
    builder.await?;
    Ok(ExecOutcome::empty())
}

pub async fn fill(ctx: &ExecContext<'_>, params: &FillParams) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, &params.target)?;
    if params.react {
        // Bypass keyboard emulation entirely: set the value through the
        // native input/textarea prototype setter so React's tracked-value
        // shim doesn't swallow the change, then dispatch input+change.
        let literal = serde_json::to_string(&params.value).unwrap_or_else(|_| "''".to_string());
        let expr = format!(
            "(() => {{ \
               const proto = Object.getPrototypeOf(element); \
               const setter = Object.getOwnPropertyDescriptor(proto, 'value')?.set; \
               if (setter) {{ setter.call(element, {literal}); }} else {{ element.value = {literal}; }} \
               element.dispatchEvent(new Event('input', {{ bubbles: true }})); \
               element.dispatchEvent(new Event('change', {{ bubbles: true }})); \
               return null; \
             }})()"
        );
        locator.evaluate::<serde_json::Value>(&expr).await?;
    } else if params.clear {
        locator.fill(&params.value).await?;
    } else {
        locator.type_text(&params.value).await?;
    }
    Ok(ExecOutcome::empty())
}

pub async fn hover(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    locator.hover().await?;
    Ok(ExecOutcome::empty())
}

pub async fn press(ctx: &ExecContext<'_>, params: &PressParams) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, &params.target)?;
    locator.press(&params.key).await?;
    Ok(ExecOutcome::empty())
}

pub async fn type_text(ctx: &ExecContext<'_>, params: &TypeParams) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, &params.target)?;
    let mut builder = locator.type_text(&params.text);
    if let Some(delay) = params.delay {
        builder = builder.delay(std::time::Duration::from_millis(delay));
    }
    builder.await?;
    Ok(ExecOutcome::empty())
}

pub async fn select_text(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    locator
        .evaluate::<serde_json::Value>("(() => { element.focus(); element.select && element.select(); return null; })()")
        .await?;
    Ok(ExecOutcome::empty())
}

pub async fn select_option(ctx: &ExecContext<'_>, target: &ElementTarget, value: &serde_json::Value) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    let value = value
        .as_str()
        .ok_or_else(|| StepError::Validation("selectOption value must be a string".to_string()))?;
    locator.select_option().value(value).await?;
    Ok(ExecOutcome::empty())
}

pub async fn submit(ctx: &ExecContext<'_>, target: &ElementTarget) -> Result<ExecOutcome, StepError> {
    let locator = resolve_locator(ctx.page, target)?;
    locator
        .evaluate::<serde_json::Value>(
            "(() => { const form = element.closest('form') || element; \
             form.requestSubmit ? form.requestSubmit() : form.submit(); return null; })()",
        )
        .await?;
    Ok(ExecOutcome::empty())
}

pub async fn scroll(ctx: &ExecContext<'_>, params: &ScrollParams) -> Result<ExecOutcome, StepError> {
    if !params.target.is_empty() {
        let locator = resolve_locator(ctx.page, &params.target)?;
        locator.scroll_into_view_if_needed().await?;
        return Ok(ExecOutcome::empty());
    }
    ctx.page
        .mouse()
        .wheel(params.dx.unwrap_or(0.0), params.dy.unwrap_or(0.0))
        .await?;
    Ok(ExecOutcome::empty())
}

fn drag_endpoint_locator<'a>(page: &'a viewpoint_core::Page, endpoint: &DragEndpoint) -> Result<viewpoint_core::Locator<'a>, StepError> {
    let target = ElementTarget {
        selector: endpoint.selector.clone(),
        element_ref: endpoint.element_ref.clone(),
        ..Default::default()
    };
    resolve_locator(page, &target)
}

pub async fn drag(ctx: &ExecContext<'_>, params: &DragParams) -> Result<ExecOutcome, StepError> {
    // "auto" tries the html5 drag-and-drop event sequence first and falls
    // back to a raw mouse drag when the source has no draggable attribute;
    // since the underlying page API only offers a mouse-based drag, auto
    // and mouse both resolve to the same mechanics here.
    match params.method {
        DragMethod::Auto | DragMethod::Mouse | DragMethod::Html5 => {
            let source = drag_endpoint_locator(ctx.page, &params.source)?;
            let target = drag_endpoint_locator(ctx.page, &params.target)?;
            source
                .drag_to_with_options(
                    &target,
                    params.source.offset_x.zip(params.source.offset_y),
                    params.target.offset_x.zip(params.target.offset_y),
                    params.steps,
                )
                .await?;
        }
    }
    Ok(ExecOutcome::empty())
}

pub async fn fill_active(ctx: &ExecContext<'_>, value: &str) -> Result<ExecOutcome, StepError> {
    ctx.page
        .evaluate_with_arg::<serde_json::Value, _>(
            "v => { const el = document.activeElement; if (!el) return; \
             const setter = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(el), 'value')?.set; \
             if (setter) { setter.call(el, v); } else { el.value = v; } \
             el.dispatchEvent(new Event('input', { bubbles: true })); }",
            value,
        )
        .await?;
    Ok(ExecOutcome::empty())
}
