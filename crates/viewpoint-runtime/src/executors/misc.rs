//! Odds and ends: sleeping, console capture, PDF export, cookies, frame
//! lookup, and the site-profile key/value scratchpad.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use super::{ExecContext, ExecOutcome};
use crate::error::StepError;
use crate::protocol::{ConsoleSummary, CookiesParams};

/// One captured `console.*` call, in the shape the response's console
/// summary needs.
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleEntry {
    pub level: String,
    pub text: String,
}

/// Accumulates console messages for the lifetime of one attached page.
///
/// The runner registers a console handler once per page (via the teacher's
/// `Page::set_console_handler`) that pushes into this log; the `console`
/// step reads and optionally clears it. Kept as a plain mutex-guarded `Vec`
/// rather than a bounded ring buffer since one invocation's step sequence
/// is short-lived.
#[derive(Debug, Default)]
pub struct ConsoleLog(Mutex<Vec<ConsoleEntry>>);

impl ConsoleLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, entry: ConsoleEntry) {
        self.0.lock().push(entry);
    }

    fn snapshot(&self, clear: bool) -> Vec<ConsoleEntry> {
        let mut guard = self.0.lock();
        if clear {
            std::mem::take(&mut *guard)
        } else {
            guard.clone()
        }
    }

    /// Read-only summary for the response envelope; never clears the log.
    pub fn summary(&self) -> ConsoleSummary {
        let entries = self.snapshot(false);
        ConsoleSummary {
            errors: entries.iter().filter(|e| e.level == "error").count() as u32,
            warnings: entries.iter().filter(|e| e.level == "warning").count() as u32,
            messages: entries.into_iter().map(|e| e.text).collect(),
        }
    }
}

pub async fn sleep(ms: u64) -> Result<ExecOutcome, StepError> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Ok(ExecOutcome::empty())
}

pub async fn console(ctx: &ExecContext<'_>, clear: bool) -> Result<ExecOutcome, StepError> {
    let entries = ctx.console_log.snapshot(clear);
    let errors = entries.iter().filter(|e| e.level == "error").count();
    let warnings = entries.iter().filter(|e| e.level == "warning").count();
    Ok(serde_json::json!({
        "errors": errors,
        "warnings": warnings,
        "messages": entries,
    })
    .into())
}

pub async fn pdf(ctx: &ExecContext<'_>, path: Option<&str>) -> Result<ExecOutcome, StepError> {
    let mut builder = ctx.page.pdf();
    if let Some(path) = path {
        builder = builder.path(path);
    }
    let bytes = builder.generate().await?;
    Ok(serde_json::json!({ "bytes": bytes.len(), "path": path }).into())
}

fn parse_relative_expiry(spec: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let (digits, unit) = spec.split_at(spec.len().checked_sub(1)?);
    let amount: i64 = digits.parse().ok()?;
    let duration = match unit {
        "m" => chrono::Duration::minutes(amount),
        "h" => chrono::Duration::hours(amount),
        "d" => chrono::Duration::days(amount),
        "w" => chrono::Duration::weeks(amount),
        "y" => chrono::Duration::weeks(amount * 52),
        _ => return None,
    };
    Some(chrono::Utc::now() + duration)
}

pub async fn cookies(ctx: &ExecContext<'_>, params: &CookiesParams) -> Result<ExecOutcome, StepError> {
    match params {
        CookiesParams::Get { url } => {
            let cookies = match url {
                Some(url) => ctx.context.cookies_for_url(url).await?,
                None => ctx.context.cookies().await?,
            };
            Ok(serde_json::json!({ "cookies": cookies }).into())
        }
        CookiesParams::Set {
            name,
            value,
            domain,
            path,
            expires,
        } => {
            let mut cookie = viewpoint_core::Cookie::new(name.clone(), value.clone());
            if let Some(domain) = domain {
                cookie = cookie.domain(domain.clone());
            }
            if let Some(path) = path {
                cookie = cookie.path(path.clone());
            }
            if let Some(expires) = expires {
                if let Some(at) = parse_relative_expiry(expires) {
                    cookie = cookie.expires(at.timestamp() as f64);
                }
            }
            ctx.context.add_cookies(vec![cookie]).await?;
            Ok(ExecOutcome::empty())
        }
        CookiesParams::Clear { url: _ } => {
            ctx.context.clear_cookies().await?;
            Ok(ExecOutcome::empty())
        }
        CookiesParams::Delete { name, domain, path } => {
            let mut builder = ctx.context.clear_cookies_builder().name(name.clone());
            if let Some(domain) = domain {
                builder = builder.domain(domain.clone());
            }
            if let Some(path) = path {
                builder = builder.path(path.clone());
            }
            builder.execute().await?;
            Ok(ExecOutcome::empty())
        }
    }
}

pub async fn frame(ctx: &ExecContext<'_>, selector: Option<&str>, name: Option<&str>) -> Result<ExecOutcome, StepError> {
    let frames = ctx.page.frames().await?;
    let found = frames.iter().find(|f| match (selector, name) {
        (Some(sel), _) => f.url().contains(sel),
        (None, Some(n)) => f.name() == n,
        (None, None) => false,
    });
    match found {
        Some(f) => Ok(serde_json::json!({ "frameId": f.id(), "url": f.url() }).into()),
        None => Err(StepError::ElementNotFound(format!(
            "no frame matching selector={selector:?} name={name:?}"
        ))),
    }
}

pub async fn write_site_profile(key: &str, value: &serde_json::Value) -> Result<ExecOutcome, StepError> {
    let dir = std::env::temp_dir().join("viewpoint-site-profiles");
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| StepError::Execution(format!("site profile dir: {e}")))?;
    let path = dir.join(format!("{}.json", sanitize_key(key)));
    let body = serde_json::to_vec_pretty(value).map_err(|e| StepError::Execution(e.to_string()))?;
    tokio::fs::write(&path, body)
        .await
        .map_err(|e| StepError::Execution(format!("site profile write: {e}")))?;
    Ok(ExecOutcome::empty())
}

pub async fn read_site_profile(key: &str) -> Result<ExecOutcome, StepError> {
    let dir = std::env::temp_dir().join("viewpoint-site-profiles");
    let path = dir.join(format!("{}.json", sanitize_key(key)));
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| StepError::Execution(e.to_string()))?;
            Ok(value.into())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(serde_json::Value::Null.into()),
        Err(e) => Err(StepError::Execution(format!("site profile read: {e}"))),
    }
}

fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
