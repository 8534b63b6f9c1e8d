//! The step loop: validates a request, resolves the target tab, runs each
//! step in order against a live page, and assembles the response envelope.
//!
//! Browser process launching and CDP transport are out of scope (§0): the
//! runner is handed already-attached [`Page`] handles through `tabs` and
//! only adds/removes entries as `newTab`/`closeTab` steps run. This mirrors
//! the teacher's own layering — `Page` never owns its `BrowserContext`.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, instrument, warn};
use viewpoint_core::{BrowserContext, Page};

use crate::config::RunnerConfig;
use crate::context_capture;
use crate::diff::{self, Diff};
use crate::error::StepError;
use crate::executors::{self, ConsoleEntry, ConsoleLog, ExecContext};
use crate::protocol::{ErrorInfo, Request, Response, Step, StepEnvelope, StepResult, StepStatus};
use crate::store::{TabEntry, TabRegistry};
use crate::validator;

/// Live tabs known to this runner, keyed by alias. The runner does not own
/// the browser process or discover targets; callers register tabs as they
/// attach (including the initial page) in the `tabs` map passed to each call.
pub struct Runner<R: TabRegistry> {
    config: RunnerConfig,
    registry: R,
    console_log: std::sync::Arc<ConsoleLog>,
    console_registered: Mutex<HashSet<String>>,
    current: String,
}

impl<R: TabRegistry> Runner<R> {
    pub fn new(config: RunnerConfig, registry: R, initial_alias: impl Into<String>) -> Self {
        Self {
            config,
            registry,
            console_log: ConsoleLog::new(),
            console_registered: Mutex::new(HashSet::new()),
            current: initial_alias.into(),
        }
    }

    pub fn console_log(&self) -> &ConsoleLog {
        &self.console_log
    }

    /// Register the console capture handler on `page` once per alias, the
    /// first time the runner touches it.
    async fn ensure_console_capture(&self, alias: &str, page: &Page) {
        {
            let mut seen = self.console_registered.lock();
            if !seen.insert(alias.to_string()) {
                return;
            }
        }
        let log = self.console_log.clone();
        page.on_console(move |message| {
            let log = log.clone();
            async move {
                log.push(ConsoleEntry {
                    level: message.type_().to_string(),
                    text: message.text(),
                });
            }
        })
        .await;
    }

    /// Parse, validate, and run one request's steps against `context`'s
    /// live tabs.
    #[instrument(level = "info", skip(self, context, tabs, body), fields(tab = ?self.current))]
    pub async fn run_json(&mut self, context: &BrowserContext, tabs: &mut HashMap<String, Page>, body: &str) -> Response {
        let raw: serde_json::Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => return Response::pre_run_error(self.current.clone(), "parse", e.to_string()),
        };

        let steps = raw.get("steps").and_then(|v| v.as_array()).cloned().unwrap_or_default();
        let validation = validator::validate(&steps);
        if !validation.valid {
            let message = validation
                .errors
                .iter()
                .map(|e| format!("step {}: {}", e.index, e.errors.join("; ")))
                .collect::<Vec<_>>()
                .join(" | ");
            return Response::pre_run_error(self.current.clone(), "validation", message);
        }

        let request: Request = match serde_json::from_value(raw) {
            Ok(r) => r,
            Err(e) => return Response::pre_run_error(self.current.clone(), "parse", e.to_string()),
        };

        self.run(context, tabs, request).await
    }

    #[instrument(level = "debug", skip(self, context, tabs, request))]
    pub async fn run(&mut self, context: &BrowserContext, tabs: &mut HashMap<String, Page>, request: Request) -> Response {
        if let Some(alias) = &request.tab {
            if !tabs.contains_key(alias) {
                return Response::pre_run_error(alias.clone(), "connection", format!("unknown tab '{alias}'"));
            }
            self.current = alias.clone();
        }

        if let Some(page) = tabs.get(&self.current) {
            self.ensure_console_capture(&self.current.clone(), page).await;
        }

        let overall_deadline = request.timeout.map(Duration::from_millis);
        let start = tokio::time::Instant::now();

        let mut last_snapshot = self.snapshot_yaml(tabs.get(&self.current)).await;
        let mut results = Vec::with_capacity(request.steps.len());
        let mut last_diff = Diff::default();
        let mut last_action: Option<String> = None;
        let mut halted = false;

        for envelope in &request.steps {
            if halted {
                results.push(StepResult {
                    action: envelope.action.name().to_string(),
                    status: StepStatus::Skipped,
                    output: None,
                    warning: None,
                    error: None,
                });
                continue;
            }

            if let Some(deadline) = overall_deadline {
                if start.elapsed() >= deadline {
                    results.push(StepResult {
                        action: envelope.action.name().to_string(),
                        status: StepStatus::Error,
                        output: None,
                        warning: None,
                        error: Some(ErrorInfo {
                            kind: "timeout".to_string(),
                            message: "overall request deadline exceeded".to_string(),
                        }),
                    });
                    halted = true;
                    continue;
                }
            }

            let (result, diff) = self.run_one(context, tabs, envelope, &mut last_snapshot).await;
            if let Some(diff) = diff {
                if matches!(result.status, StepStatus::Ok) {
                    last_action = Some(result.action.clone());
                }
                last_diff = diff;
            }
            if matches!(result.status, StepStatus::Error) && !envelope.optional && request.stop_on_error {
                halted = true;
            }
            results.push(result);
        }

        let page = tabs.get(&self.current);
        let context_snapshot = match page {
            Some(page) => context_capture::capture(page).await.ok(),
            None => None,
        };

        let overall_status = if results.iter().any(|r| matches!(r.status, StepStatus::Error)) {
            StepStatus::Error
        } else {
            StepStatus::Ok
        };

        Response {
            status: overall_status,
            tab: self.current.clone(),
            navigated: Some(last_diff.navigated),
            full_snapshot: last_snapshot,
            context: context_snapshot,
            changes: last_action.as_deref().and_then(|label| context_capture::describe_action(label, &last_diff)),
            console: Some(self.console_log.summary()),
            steps: results,
            errors: Vec::new(),
            viewport_snapshot: None,
            error: None,
        }
    }

    async fn snapshot_yaml(&self, page: Option<&Page>) -> Option<String> {
        let page = page?;
        page.aria_snapshot().await.ok().map(|tree| tree.to_yaml())
    }

    /// Evaluate a page-side boolean predicate repeatedly until it returns
    /// truthy or `deadline` elapses.
    async fn poll_predicate(&self, page: &Page, expr: &str, deadline: Duration) -> Result<(), StepError> {
        let start = tokio::time::Instant::now();
        loop {
            let value: serde_json::Value = page.evaluate(expr).await?;
            if !matches!(value, serde_json::Value::Null | serde_json::Value::Bool(false)) {
                return Ok(());
            }
            if start.elapsed() >= deadline {
                return Err(StepError::NotActionable(format!("predicate never became true: {expr}")));
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    async fn run_one(
        &mut self,
        context: &BrowserContext,
        tabs: &mut HashMap<String, Page>,
        envelope: &StepEnvelope,
        last_snapshot: &mut Option<String>,
    ) -> (StepResult, Option<Diff>) {
        let name = envelope.action.name().to_string();

        if let Step::ListTabs | Step::CloseTab { .. } | Step::NewTab { .. } | Step::SwitchTab { .. } = &envelope.action {
            return match self.run_tab_management(context, tabs, &envelope.action).await {
                Ok(output) => (
                    StepResult {
                        action: name,
                        status: StepStatus::Ok,
                        output: Some(output),
                        warning: None,
                        error: None,
                    },
                    None,
                ),
                Err(err) => (self.to_step_result(name, err, envelope.optional), None),
            };
        }

        let Some(page) = tabs.get(&self.current) else {
            return (
                self.to_step_result(name, StepError::Connection(format!("tab '{}' not attached", self.current)), envelope.optional),
                None,
            );
        };

        let timeout = envelope.timeout.unwrap_or(self.config.timeouts.default);

        if let Some(ready_when) = &envelope.ready_when {
            if let Err(err) = self.poll_predicate(page, ready_when, self.config.timeouts.actionability).await {
                return (self.to_step_result(name, err, envelope.optional), None);
            }
        }

        let url_before = page.url().await.ok();

        let ctx = ExecContext {
            page,
            context,
            timeouts: &self.config.timeouts,
            console_log: &self.console_log,
        };

        let outcome = tokio::time::timeout(timeout, executors::execute(&ctx, &envelope.action)).await;
        let mut outcome = match outcome {
            Ok(result) => result,
            Err(_) => Err(StepError::Timeout(timeout)),
        };

        if outcome.is_ok() {
            if let Some(settled_when) = &envelope.settled_when {
                if let Err(err) = self.poll_predicate(page, settled_when, self.config.timeouts.actionability).await {
                    outcome = Err(err);
                }
            }
        }

        if let (Ok(result), Some(observe)) = (&mut outcome, &envelope.observe) {
            if let Ok(value) = page.evaluate::<serde_json::Value>(observe).await {
                result.output = Some(match result.output.take() {
                    Some(serde_json::Value::Object(mut map)) => {
                        map.insert("observe".to_string(), value);
                        serde_json::Value::Object(map)
                    }
                    Some(other) => serde_json::json!({ "result": other, "observe": value }),
                    None => serde_json::json!({ "observe": value }),
                });
            }
        }

        let diff = if outcome.is_ok() {
            let url_after = page.url().await.ok();
            let navigated = matches!((&url_before, &url_after), (Some(b), Some(a)) if b != a);
            if navigated {
                *last_snapshot = self.snapshot_yaml(Some(page)).await;
                Some(Diff { navigated: true, ..Default::default() })
            } else {
                let new_snapshot = self.snapshot_yaml(Some(page)).await;
                let diff = match (last_snapshot.as_deref(), new_snapshot.as_deref()) {
                    (Some(before), Some(after)) => Some(diff::diff_snapshots(before, after)),
                    _ => None,
                };
                *last_snapshot = new_snapshot;
                diff
            }
        } else {
            None
        };

        match outcome {
            Ok(result) => (
                StepResult {
                    action: name,
                    status: StepStatus::Ok,
                    output: result.output,
                    warning: result.warning,
                    error: None,
                },
                diff,
            ),
            Err(err) => (self.to_step_result(name, err, envelope.optional), diff),
        }
    }

    async fn run_tab_management(&mut self, context: &BrowserContext, tabs: &mut HashMap<String, Page>, step: &Step) -> Result<serde_json::Value, StepError> {
        match step {
            Step::ListTabs => {
                let entries = self.registry.list();
                Ok(serde_json::json!({
                    "tabs": entries.into_iter().map(|(alias, entry)| serde_json::json!({
                        "alias": alias,
                        "targetId": entry.target_id,
                    })).collect::<Vec<_>>(),
                    "current": self.current,
                }))
            }
            Step::NewTab { url } => {
                let page = context.new_page().await.map_err(StepError::from)?;
                let entry = TabEntry {
                    target_id: page.target_id().to_string(),
                    host: "localhost".to_string(),
                    port: 0,
                };
                let alias = self.registry.add(None, entry).map_err(|e| StepError::Execution(e.to_string()))?;
                if let Some(url) = url {
                    page.goto(url.clone()).goto().await.map_err(StepError::from)?;
                }
                self.ensure_console_capture(&alias, &page).await;
                tabs.insert(alias.clone(), page);
                self.current = alias.clone();
                Ok(serde_json::json!({ "alias": alias }))
            }
            Step::SwitchTab { alias } => {
                if !tabs.contains_key(alias) {
                    return Err(StepError::ElementNotFound(format!("tab '{alias}' not attached")));
                }
                self.current = alias.clone();
                Ok(serde_json::json!({ "alias": alias }))
            }
            Step::CloseTab { alias } => {
                let target = alias.clone().unwrap_or_else(|| self.current.clone());
                if let Some(mut page) = tabs.remove(&target) {
                    page.close().await.map_err(StepError::from)?;
                }
                self.registry.remove(&target).map_err(|e| StepError::Execution(e.to_string()))?;
                self.console_registered.lock().remove(&target);
                if self.current == target {
                    if let Some(next) = tabs.keys().next().cloned() {
                        self.current = next;
                    }
                }
                Ok(serde_json::json!({ "closed": target }))
            }
            _ => unreachable!("non-tab-management step routed to run_tab_management"),
        }
    }

    fn to_step_result(&self, action: String, err: StepError, optional: bool) -> StepResult {
        if optional {
            warn!(action = %action, error = %err, "optional step failed, continuing");
            StepResult {
                action,
                status: StepStatus::Skipped,
                output: None,
                warning: Some(err.to_string()),
                error: Some((&err).into()),
            }
        } else {
            debug!(action = %action, error = %err, "step failed");
            StepResult {
                action,
                status: StepStatus::Error,
                output: None,
                warning: None,
                error: Some((&err).into()),
            }
        }
    }
}
