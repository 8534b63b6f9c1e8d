//! Wire types for the step-driven request/response contract.
//!
//! One invocation is one [`Request`] in, one [`Response`] out. Mirrors the
//! JSON shape in full; no binary reads these from stdin here (that's the
//! out-of-scope CLI wrapper), but `Runner::run` is the function such a
//! wrapper would call.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RuntimeError;

/// Page load state to wait for after a navigation, mirrors
/// `viewpoint_core::DocumentLoadState` but adds `commit` and is the wire
/// vocabulary the step schema uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum WaitUntil {
    /// Resolve as soon as the navigation is committed (new document started).
    Commit,
    /// Resolve once `DOMContentLoaded` fires.
    DomContentLoaded,
    /// Resolve once the `load` event fires.
    #[default]
    Load,
    /// Resolve once no network requests have been in flight for 500ms.
    NetworkIdle,
}

/// Common ways a step may address an element: by selector, by a ref from a
/// prior snapshot, by visible text, by a selector fallback chain, or by raw
/// coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub element_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ElementTarget {
    /// Build a bare-selector target, the common case from a plain string shorthand.
    pub fn from_selector(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Default::default()
        }
    }

    /// True when no addressing strategy is set at all.
    pub fn is_empty(&self) -> bool {
        self.selector.is_none()
            && self.element_ref.is_none()
            && self.text.is_none()
            && self.selectors.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.label.is_none()
    }
}

fn default_timeout() -> Option<u64> {
    None
}

/// Parameters for the `goto` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GotoParams {
    pub url: String,
    #[serde(default)]
    pub wait_until: WaitUntil,
    #[serde(default = "default_timeout")]
    pub timeout: Option<u64>,
}

/// Parameters for `click`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClickParams {
    #[serde(flatten)]
    pub target: ElementTarget,
    #[serde(default)]
    pub verify: bool,
    #[serde(default)]
    pub force: bool,
    #[serde(default = "default_timeout")]
    pub timeout: Option<u64>,
}

/// Parameters for `fill`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FillParams {
    #[serde(flatten)]
    pub target: ElementTarget,
    pub value: String,
    #[serde(default)]
    pub clear: bool,
    #[serde(default)]
    pub react: bool,
}

/// Parameters for `snapshot`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotParams {
    #[serde(default)]
    pub mode: SnapshotMode,
    #[serde(default)]
    pub detail: SnapshotDetail,
    #[serde(default)]
    pub viewport_only: bool,
    #[serde(default)]
    pub pierce_shadow: bool,
    #[serde(default)]
    pub preserve_refs: bool,
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(default)]
    pub max_elements: Option<u32>,
    #[serde(default = "default_true")]
    pub include_text: bool,
    #[serde(default)]
    pub include_frames: bool,
    #[serde(default)]
    pub since: Option<String>,
}

fn default_true() -> bool {
    true
}

/// `mode` field for `snapshot`: `ai` mirrors the accessibility-only view,
/// `full` includes presentational nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotMode {
    #[default]
    Ai,
    Full,
}

/// `detail` field for `snapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotDetail {
    #[default]
    Standard,
    Summary,
    Interactive,
}

/// Endpoint for `drag`: selector, ref, ref with pixel offsets, or absolute coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DragEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub element_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// `method` field for `drag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DragMethod {
    #[default]
    Auto,
    Mouse,
    Html5,
}

fn default_drag_steps() -> u32 {
    10
}

/// Parameters for `drag`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragParams {
    pub source: DragEndpoint,
    pub target: DragEndpoint,
    #[serde(default = "default_drag_steps")]
    pub steps: u32,
    #[serde(default)]
    pub delay: u64,
    #[serde(default)]
    pub method: DragMethod,
}

/// Parameters for `eval`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalParams {
    pub expression: String,
    #[serde(default = "default_true")]
    pub r#await: bool,
    #[serde(default = "default_true")]
    pub serialize: bool,
    #[serde(default = "default_timeout")]
    pub timeout: Option<u64>,
}

/// Parameters for `poll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollParams {
    pub r#fn: String,
    #[serde(default = "default_poll_interval")]
    pub interval: u64,
    pub timeout: u64,
}

fn default_poll_interval() -> u64 {
    100
}

/// A point (or set of points) for `elementsAt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementsAtParams {
    One { x: f64, y: f64 },
    Many(Vec<PointParam>),
    Radius { x: f64, y: f64, radius: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointParam {
    pub x: f64,
    pub y: f64,
}

/// Cookie operation kind for `cookies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "op")]
pub enum CookiesParams {
    Get {
        #[serde(default)]
        url: Option<String>,
    },
    Set {
        name: String,
        value: String,
        #[serde(default)]
        domain: Option<String>,
        #[serde(default)]
        path: Option<String>,
        /// Human-readable expiration: `Nm|Nh|Nd|Nw|Ny`.
        #[serde(default)]
        expires: Option<String>,
    },
    Clear {
        #[serde(default)]
        url: Option<String>,
    },
    Delete {
        name: String,
        #[serde(default)]
        domain: Option<String>,
        #[serde(default)]
        path: Option<String>,
    },
}

/// Parameters for `scroll`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrollParams {
    #[serde(flatten)]
    pub target: ElementTarget,
    #[serde(default)]
    pub dx: Option<f64>,
    #[serde(default)]
    pub dy: Option<f64>,
}

/// Parameters for `type` and `press`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeParams {
    #[serde(flatten)]
    pub target: ElementTarget,
    pub text: String,
    #[serde(default)]
    pub delay: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PressParams {
    #[serde(flatten)]
    pub target: ElementTarget,
    pub key: String,
}

/// A step object's recognized action and its parameters.
///
/// Mirrors the "tagged variant; exactly one action key is set" shape: on
/// the wire a step is `{"goto": "..."}` or `{"click": {...}}`, never a
/// `type`-discriminated object, so [`Step`] implements its own
/// `Deserialize`/`Serialize` rather than deriving one.
#[derive(Debug, Clone)]
pub enum Step {
    Goto(GotoParams),
    Reload { wait_until: WaitUntil },
    Wait { selector: String, timeout: Option<u64> },
    Sleep { ms: u64 },
    Click(ClickParams),
    Fill(FillParams),
    Press(PressParams),
    Query { target: ElementTarget },
    QueryAll { target: ElementTarget },
    Inspect { target: ElementTarget },
    Scroll(ScrollParams),
    Console { clear: bool },
    Pdf { path: Option<String> },
    Eval(EvalParams),
    Snapshot(SnapshotParams),
    SnapshotSearch { query: String },
    Hover { target: ElementTarget },
    Viewport { width: u32, height: u32 },
    Cookies(CookiesParams),
    Back,
    Forward,
    WaitForNavigation { wait_until: WaitUntil, timeout: Option<u64> },
    ListTabs,
    CloseTab { alias: Option<String> },
    NewTab { url: Option<String> },
    SwitchTab { alias: String },
    Type(TypeParams),
    SelectText { target: ElementTarget },
    SelectOption { target: ElementTarget, value: Value },
    Submit { target: ElementTarget },
    Assert { expression: String },
    Frame { selector: Option<String>, name: Option<String> },
    Drag(DragParams),
    FormState { target: ElementTarget },
    Extract { target: ElementTarget, attribute: Option<String> },
    Get { target: ElementTarget },
    GetDom { target: ElementTarget },
    GetBox { target: ElementTarget },
    GetUrl,
    GetTitle,
    FillActive { value: String },
    ElementsAt(ElementsAtParams),
    PageFunction { expression: String, args: Vec<Value> },
    Poll(PollParams),
    WriteSiteProfile { key: String, value: Value },
    ReadSiteProfile { key: String },
}

impl Step {
    /// The action name, as it appears on the wire (used in `steps[i].action`
    /// and in validator error messages).
    pub fn name(&self) -> &'static str {
        match self {
            Step::Goto(_) => "goto",
            Step::Reload { .. } => "reload",
            Step::Wait { .. } => "wait",
            Step::Sleep { .. } => "sleep",
            Step::Click(_) => "click",
            Step::Fill(_) => "fill",
            Step::Press(_) => "press",
            Step::Query { .. } => "query",
            Step::QueryAll { .. } => "queryAll",
            Step::Inspect { .. } => "inspect",
            Step::Scroll(_) => "scroll",
            Step::Console { .. } => "console",
            Step::Pdf { .. } => "pdf",
            Step::Eval(_) => "eval",
            Step::Snapshot(_) => "snapshot",
            Step::SnapshotSearch { .. } => "snapshotSearch",
            Step::Hover { .. } => "hover",
            Step::Viewport { .. } => "viewport",
            Step::Cookies(_) => "cookies",
            Step::Back => "back",
            Step::Forward => "forward",
            Step::WaitForNavigation { .. } => "waitForNavigation",
            Step::ListTabs => "listTabs",
            Step::CloseTab { .. } => "closeTab",
            Step::NewTab { .. } => "newTab",
            Step::SwitchTab { .. } => "switchTab",
            Step::Type(_) => "type",
            Step::SelectText { .. } => "selectText",
            Step::SelectOption { .. } => "selectOption",
            Step::Submit { .. } => "submit",
            Step::Assert { .. } => "assert",
            Step::Frame { .. } => "frame",
            Step::Drag(_) => "drag",
            Step::FormState { .. } => "formState",
            Step::Extract { .. } => "extract",
            Step::Get { .. } => "get",
            Step::GetDom { .. } => "getDom",
            Step::GetBox { .. } => "getBox",
            Step::GetUrl => "getUrl",
            Step::GetTitle => "getTitle",
            Step::FillActive { .. } => "fillActive",
            Step::ElementsAt(_) => "elementsAt",
            Step::PageFunction { .. } => "pageFunction",
            Step::Poll(_) => "poll",
            Step::WriteSiteProfile { .. } => "writeSiteProfile",
            Step::ReadSiteProfile { .. } => "readSiteProfile",
        }
    }
}

/// A step plus the common envelope fields every action shares.
#[derive(Debug, Clone)]
pub struct StepEnvelope {
    pub action: Step,
    /// Skip (surface as `status: "skipped"`) rather than stop the run on failure.
    pub optional: bool,
    /// Page-side predicate evaluated before the step is considered ready to run.
    pub ready_when: Option<String>,
    /// Page-side predicate evaluated after the step's primary effect, before
    /// the step is considered settled.
    pub settled_when: Option<String>,
    /// Page-side expression evaluated purely for observational output.
    pub observe: Option<String>,
    /// Per-step timeout override; falls back to the request/default timeout.
    pub timeout: Option<Duration>,
}

impl<'de> Deserialize<'de> for StepEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let mut obj = serde_json::Map::deserialize(deserializer)?;
        let optional = obj
            .remove("optional")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let ready_when = obj.remove("readyWhen").and_then(|v| v.as_str().map(String::from));
        let settled_when = obj
            .remove("settledWhen")
            .and_then(|v| v.as_str().map(String::from));
        let observe = obj.remove("observe").and_then(|v| v.as_str().map(String::from));
        let timeout = obj
            .remove("timeout")
            .and_then(|v| v.as_u64())
            .map(Duration::from_millis);

        let action = step_from_map(obj).map_err(D::Error::custom)?;

        Ok(StepEnvelope {
            action,
            optional,
            ready_when,
            settled_when,
            observe,
            timeout,
        })
    }
}

impl Serialize for StepEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error as _;
        let mut map = serde_json::Map::new();
        let value = action_to_value(&self.action).map_err(S::Error::custom)?;
        map.insert(self.action.name().to_string(), value);
        if self.optional {
            map.insert("optional".to_string(), Value::Bool(true));
        }
        if let Some(ref s) = self.ready_when {
            map.insert("readyWhen".to_string(), Value::String(s.clone()));
        }
        if let Some(ref s) = self.settled_when {
            map.insert("settledWhen".to_string(), Value::String(s.clone()));
        }
        if let Some(ref s) = self.observe {
            map.insert("observe".to_string(), Value::String(s.clone()));
        }
        if let Some(d) = self.timeout {
            map.insert(
                "timeout".to_string(),
                Value::Number((d.as_millis() as u64).into()),
            );
        }
        Value::Object(map).serialize(serializer)
    }
}

/// The exhaustive set of recognized action keys, per the step schema.
const ACTION_KEYS: &[&str] = &[
    "goto", "reload", "wait", "sleep", "click", "fill", "press", "query", "queryAll", "inspect",
    "scroll", "console", "pdf", "eval", "snapshot", "snapshotSearch", "hover", "viewport",
    "cookies", "back", "forward", "waitForNavigation", "listTabs", "closeTab", "newTab",
    "switchTab", "type", "selectText", "selectOption", "submit", "assert", "frame", "drag",
    "formState", "extract", "get", "getDom", "getBox", "getUrl", "getTitle", "fillActive",
    "elementsAt", "pageFunction", "poll", "writeSiteProfile", "readSiteProfile",
];

fn step_from_map(mut obj: serde_json::Map<String, Value>) -> Result<Step, String> {
    let present: Vec<&str> = ACTION_KEYS
        .iter()
        .copied()
        .filter(|k| obj.contains_key(*k))
        .collect();

    let key = match present.as_slice() {
        [] => return Err("step object has no recognized action key".to_string()),
        [k] => *k,
        many => {
            return Err(format!(
                "step object has {} action keys, expected exactly one: {many:?}",
                many.len()
            ))
        }
    };

    let value = obj.remove(key).expect("key presence checked above");
    parse_action(key, value)
}

fn target_from_value(value: &Value) -> ElementTarget {
    if let Some(s) = value.as_str() {
        return ElementTarget::from_selector(s);
    }
    serde_json::from_value(value.clone()).unwrap_or_default()
}

fn parse_action(key: &str, value: Value) -> Result<Step, String> {
    let de = |v: Value| -> Result<_, String> { serde_json::from_value(v).map_err(|e| e.to_string()) };
    match key {
        "goto" => {
            let params = if let Some(s) = value.as_str() {
                GotoParams {
                    url: s.to_string(),
                    wait_until: WaitUntil::default(),
                    timeout: None,
                }
            } else {
                de(value)?
            };
            Ok(Step::Goto(params))
        }
        "reload" => Ok(Step::Reload {
            wait_until: value
                .get("waitUntil")
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default(),
        }),
        "wait" => {
            if let Some(s) = value.as_str() {
                Ok(Step::Wait {
                    selector: s.to_string(),
                    timeout: None,
                })
            } else {
                let selector = value
                    .get("selector")
                    .and_then(|v| v.as_str())
                    .ok_or("wait requires a selector")?
                    .to_string();
                let timeout = value.get("timeout").and_then(|v| v.as_u64());
                Ok(Step::Wait { selector, timeout })
            }
        }
        "sleep" => {
            let ms = value.as_u64().or_else(|| value.get("ms").and_then(|v| v.as_u64()));
            Ok(Step::Sleep {
                ms: ms.ok_or("sleep requires a millisecond count")?,
            })
        }
        "click" => Ok(Step::Click(if value.is_object() {
            de(value)?
        } else {
            ClickParams {
                target: target_from_value(&value),
                ..Default::default()
            }
        })),
        "fill" => Ok(Step::Fill(de(value)?)),
        "press" => Ok(Step::Press(de(value)?)),
        "query" => Ok(Step::Query {
            target: target_from_value(&value),
        }),
        "queryAll" => Ok(Step::QueryAll {
            target: target_from_value(&value),
        }),
        "inspect" => Ok(Step::Inspect {
            target: target_from_value(&value),
        }),
        "scroll" => Ok(Step::Scroll(de(value)?)),
        "console" => Ok(Step::Console {
            clear: value.get("clear").and_then(|v| v.as_bool()).unwrap_or(false),
        }),
        "pdf" => Ok(Step::Pdf {
            path: value.as_str().map(String::from).or_else(|| {
                value
                    .get("path")
                    .and_then(|v| v.as_str())
                    .map(String::from)
            }),
        }),
        "eval" => {
            let params = if let Some(s) = value.as_str() {
                EvalParams {
                    expression: s.to_string(),
                    r#await: true,
                    serialize: true,
                    timeout: None,
                }
            } else {
                de(value)?
            };
            Ok(Step::Eval(params))
        }
        "snapshot" => Ok(Step::Snapshot(if value.is_object() {
            de(value)?
        } else {
            SnapshotParams::default()
        })),
        "snapshotSearch" => Ok(Step::SnapshotSearch {
            query: value
                .as_str()
                .map(String::from)
                .or_else(|| value.get("query").and_then(|v| v.as_str()).map(String::from))
                .ok_or("snapshotSearch requires a query")?,
        }),
        "hover" => Ok(Step::Hover {
            target: target_from_value(&value),
        }),
        "viewport" => {
            let width = value.get("width").and_then(|v| v.as_u64()).unwrap_or(1280) as u32;
            let height = value.get("height").and_then(|v| v.as_u64()).unwrap_or(720) as u32;
            Ok(Step::Viewport { width, height })
        }
        "cookies" => Ok(Step::Cookies(de(value)?)),
        "back" => Ok(Step::Back),
        "forward" => Ok(Step::Forward),
        "waitForNavigation" => {
            let wait_until = value
                .get("waitUntil")
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default();
            let timeout = value.get("timeout").and_then(|v| v.as_u64());
            Ok(Step::WaitForNavigation { wait_until, timeout })
        }
        "listTabs" => Ok(Step::ListTabs),
        "closeTab" => Ok(Step::CloseTab {
            alias: value.as_str().map(String::from),
        }),
        "newTab" => Ok(Step::NewTab {
            url: value.as_str().map(String::from),
        }),
        "switchTab" => Ok(Step::SwitchTab {
            alias: value.as_str().ok_or("switchTab requires an alias")?.to_string(),
        }),
        "type" => Ok(Step::Type(de(value)?)),
        "selectText" => Ok(Step::SelectText {
            target: target_from_value(&value),
        }),
        "selectOption" => {
            let target = serde_json::from_value(value.clone()).unwrap_or_default();
            let opt_value = value.get("value").cloned().unwrap_or(Value::Null);
            Ok(Step::SelectOption {
                target,
                value: opt_value,
            })
        }
        "submit" => Ok(Step::Submit {
            target: target_from_value(&value),
        }),
        "assert" => Ok(Step::Assert {
            expression: value
                .as_str()
                .map(String::from)
                .ok_or("assert requires an expression string")?,
        }),
        "frame" => Ok(Step::Frame {
            selector: value.get("selector").and_then(|v| v.as_str()).map(String::from),
            name: value.get("name").and_then(|v| v.as_str()).map(String::from),
        }),
        "drag" => Ok(Step::Drag(de(value)?)),
        "formState" => Ok(Step::FormState {
            target: target_from_value(&value),
        }),
        "extract" => {
            let target = serde_json::from_value(value.clone()).unwrap_or_default();
            let attribute = value.get("attribute").and_then(|v| v.as_str()).map(String::from);
            Ok(Step::Extract { target, attribute })
        }
        "get" => Ok(Step::Get {
            target: target_from_value(&value),
        }),
        "getDom" => Ok(Step::GetDom {
            target: target_from_value(&value),
        }),
        "getBox" => Ok(Step::GetBox {
            target: target_from_value(&value),
        }),
        "getUrl" => Ok(Step::GetUrl),
        "getTitle" => Ok(Step::GetTitle),
        "fillActive" => Ok(Step::FillActive {
            value: value
                .as_str()
                .map(String::from)
                .ok_or("fillActive requires a string value")?,
        }),
        "elementsAt" => Ok(Step::ElementsAt(de(value)?)),
        "pageFunction" => {
            let expression = value
                .get("expression")
                .and_then(|v| v.as_str())
                .ok_or("pageFunction requires an expression")?
                .to_string();
            let args = value
                .get("args")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default();
            Ok(Step::PageFunction { expression, args })
        }
        "poll" => Ok(Step::Poll(de(value)?)),
        "writeSiteProfile" => {
            let key = value
                .get("key")
                .and_then(|v| v.as_str())
                .ok_or("writeSiteProfile requires a key")?
                .to_string();
            let v = value.get("value").cloned().unwrap_or(Value::Null);
            Ok(Step::WriteSiteProfile { key, value: v })
        }
        "readSiteProfile" => Ok(Step::ReadSiteProfile {
            key: value
                .as_str()
                .map(String::from)
                .ok_or("readSiteProfile requires a key")?,
        }),
        other => Err(format!("unrecognized action key: {other}")),
    }
}

fn action_to_value(step: &Step) -> Result<Value, String> {
    serde_json::to_value(StepValueProxy(step)).map_err(|e| e.to_string())
}

/// Helper so `Serialize` for [`StepEnvelope`] can reuse `serde_json::to_value`
/// on whichever params struct a variant carries.
struct StepValueProxy<'a>(&'a Step);

impl Serialize for StepValueProxy<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.0 {
            Step::Goto(p) => p.serialize(serializer),
            Step::Reload { wait_until } => wait_until.serialize(serializer),
            Step::Wait { selector, .. } => selector.serialize(serializer),
            Step::Sleep { ms } => ms.serialize(serializer),
            Step::Click(p) => p.serialize(serializer),
            Step::Fill(p) => p.serialize(serializer),
            Step::Press(p) => p.serialize(serializer),
            Step::Query { target }
            | Step::QueryAll { target }
            | Step::Inspect { target }
            | Step::Hover { target }
            | Step::SelectText { target }
            | Step::Submit { target }
            | Step::FormState { target }
            | Step::Get { target }
            | Step::GetDom { target }
            | Step::GetBox { target } => target.serialize(serializer),
            Step::Scroll(p) => p.serialize(serializer),
            Step::Console { clear } => clear.serialize(serializer),
            Step::Pdf { path } => path.serialize(serializer),
            Step::Eval(p) => p.serialize(serializer),
            Step::Snapshot(p) => p.serialize(serializer),
            Step::SnapshotSearch { query } => query.serialize(serializer),
            Step::Viewport { width, height } => (width, height).serialize(serializer),
            Step::Cookies(p) => p.serialize(serializer),
            Step::Back | Step::Forward | Step::ListTabs | Step::GetUrl | Step::GetTitle => {
                Value::Null.serialize(serializer)
            }
            Step::WaitForNavigation { wait_until, .. } => wait_until.serialize(serializer),
            Step::CloseTab { alias } => alias.serialize(serializer),
            Step::NewTab { url } => url.serialize(serializer),
            Step::SwitchTab { alias } => alias.serialize(serializer),
            Step::Type(p) => p.serialize(serializer),
            Step::SelectOption { value, .. } => value.serialize(serializer),
            Step::Assert { expression } => expression.serialize(serializer),
            Step::Frame { selector, name } => {
                let mut map = serde_json::Map::new();
                if let Some(s) = selector {
                    map.insert("selector".to_string(), Value::String(s.clone()));
                }
                if let Some(n) = name {
                    map.insert("name".to_string(), Value::String(n.clone()));
                }
                Value::Object(map).serialize(serializer)
            }
            Step::Drag(p) => p.serialize(serializer),
            Step::Extract { attribute, .. } => attribute.serialize(serializer),
            Step::FillActive { value } => value.serialize(serializer),
            Step::ElementsAt(p) => p.serialize(serializer),
            Step::PageFunction { expression, args } => {
                let mut map = serde_json::Map::new();
                map.insert("expression".to_string(), Value::String(expression.clone()));
                map.insert("args".to_string(), Value::Array(args.clone()));
                Value::Object(map).serialize(serializer)
            }
            Step::Poll(p) => p.serialize(serializer),
            Step::WriteSiteProfile { key, value } => {
                let mut map = serde_json::Map::new();
                map.insert("key".to_string(), Value::String(key.clone()));
                map.insert("value".to_string(), value.clone());
                Value::Object(map).serialize(serializer)
            }
            Step::ReadSiteProfile { key } => key.serialize(serializer),
        }
    }
}

/// One invocation's request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Request {
    /// Tab alias or raw CDP target id to run against; defaults to the
    /// collaborator-resolved "current" tab when omitted.
    #[serde(default)]
    pub tab: Option<String>,
    /// Overall deadline for the whole invocation, in milliseconds.
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Halt on the first step error rather than continuing; default true.
    #[serde(default = "default_true")]
    pub stop_on_error: bool,
    pub steps: Vec<StepEnvelope>,
}

impl Request {
    /// Parse a request from its JSON text, classifying failures as [`RuntimeError::Parse`].
    pub fn from_json(text: &str) -> Result<Self, RuntimeError> {
        serde_json::from_str(text).map_err(|e| RuntimeError::Parse(e.to_string()))
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub action: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Ok,
    Error,
    Skipped,
}

/// `{type, message}` error detail, used both at step level and top level.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl From<&crate::error::StepError> for ErrorInfo {
    fn from(err: &crate::error::StepError) -> Self {
        ErrorInfo {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Context captured after the run: url, scroll, active element, modal
/// presence, and a handful of visible interactive elements.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ResponseContext {
    pub url: String,
    pub scroll_y: f64,
    pub active_element: Option<String>,
    pub modal_present: bool,
    pub visible_buttons: Vec<String>,
    pub visible_links: Vec<String>,
    pub visible_errors: Vec<String>,
}

/// Console messages observed during the invocation.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ConsoleSummary {
    pub errors: u32,
    pub warnings: u32,
    pub messages: Vec<String>,
}

/// Top-level invocation response.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub status: StepStatus,
    pub tab: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_snapshot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ResponseContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleSummary>,
    pub steps: Vec<StepResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_snapshot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl Response {
    /// Build the pre-run error response (parse/validation/connection failure
    /// before any step ran).
    pub fn pre_run_error(tab: impl Into<String>, kind: &str, message: impl Into<String>) -> Self {
        Response {
            status: StepStatus::Error,
            tab: tab.into(),
            navigated: None,
            full_snapshot: None,
            context: None,
            changes: None,
            console: None,
            steps: Vec::new(),
            errors: Vec::new(),
            viewport_snapshot: None,
            error: Some(ErrorInfo {
                kind: kind.to_string(),
                message: message.into(),
            }),
        }
    }
}
