//! In-page JavaScript execution: one-off evaluation, boolean assertions,
//! arbitrary page functions, and poll-until-truthy.

use std::time::Duration;

use serde_json::Value;

use super::{ExecContext, ExecOutcome};
use crate::error::StepError;
use crate::protocol::{EvalParams, PollParams};

pub async fn eval(ctx: &ExecContext<'_>, params: &EvalParams) -> Result<ExecOutcome, StepError> {
    if !params.serialize {
        let handle = ctx.page.evaluate_handle(&params.expression).await?;
        return Ok(serde_json::json!({ "objectId": handle.object_id() }).into());
    }
    let value: Value = ctx.page.evaluate(&params.expression).await?;
    Ok(value.into())
}

pub async fn assert_expr(ctx: &ExecContext<'_>, expression: &str) -> Result<ExecOutcome, StepError> {
    let result: bool = ctx.page.evaluate(expression).await?;
    if result {
        Ok(ExecOutcome::empty())
    } else {
        Err(StepError::EvalError(format!("assertion failed: {expression}")))
    }
}

pub async fn page_function(ctx: &ExecContext<'_>, expression: &str, args: &[Value]) -> Result<ExecOutcome, StepError> {
    let value: Value = match args {
        [] => ctx.page.evaluate(expression).await?,
        [single] => ctx.page.evaluate_with_arg(expression, single.clone()).await?,
        many => ctx.page.evaluate_with_arg(expression, Value::Array(many.to_vec())).await?,
    };
    Ok(value.into())
}

pub async fn poll(ctx: &ExecContext<'_>, params: &PollParams) -> Result<ExecOutcome, StepError> {
    let deadline = Duration::from_millis(params.timeout);
    let interval = Duration::from_millis(params.interval);
    let start = tokio::time::Instant::now();
    loop {
        let result: Value = ctx.page.evaluate(&params.r#fn).await?;
        let truthy = !matches!(result, Value::Null | Value::Bool(false));
        if truthy {
            return Ok(result.into());
        }
        if start.elapsed() >= deadline {
            return Err(StepError::Timeout(deadline));
        }
        tokio::time::sleep(interval).await;
    }
}
