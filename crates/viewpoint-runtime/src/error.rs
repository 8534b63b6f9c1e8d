//! Error vocabulary for the step runner.
//!
//! [`StepError`] is the classified vocabulary a single step can fail with
//! (named by condition, matching the response's `error.type`). [`RuntimeError`]
//! aggregates the handful of failures that can occur before a step ever
//! runs (malformed request, collaborator failure).

use thiserror::Error;
use viewpoint_core::error::{ContextError, LocatorError, NavigationError, PageError};

/// Failure of a single step, classified into the runtime's error vocabulary.
#[derive(Error, Debug)]
pub enum StepError {
    /// Malformed request (could not even be parsed into steps).
    #[error("parse error: {0}")]
    Parse(String),

    /// Schema violation caught by the validator.
    #[error("validation error: {0}")]
    Validation(String),

    /// CDP transport unusable: cannot connect, cannot attach, target gone.
    #[error("connection error: {0}")]
    Connection(String),

    /// Locator or resolver returned nothing within the step's timeout.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// The `editable` predicate failed with a concrete sub-reason.
    #[error("element not editable: {0}")]
    ElementNotEditable(String),

    /// Some other actionability predicate failed (covered, off-screen,
    /// unstable, `pointer-events: none`).
    #[error("not actionable: {0}")]
    NotActionable(String),

    /// A ref's node was detached and re-resolution failed.
    #[error("stale reference: {0}")]
    Stale(String),

    /// The step's deadline expired.
    #[error("timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// A page-side exception during evaluation.
    #[error("evaluation error: {0}")]
    EvalError(String),

    /// `waitForNavigation` (or an implicit navigation wait) did not reach
    /// the requested load state.
    #[error("navigation error: {0}")]
    NavigationError(String),

    /// Any unclassified failure.
    #[error("execution error: {0}")]
    Execution(String),
}

impl StepError {
    /// The `error.type` tag used in the response envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            StepError::Parse(_) => "parse",
            StepError::Validation(_) => "validation",
            StepError::Connection(_) => "connection",
            StepError::ElementNotFound(_) => "element_not_found",
            StepError::ElementNotEditable(_) => "element_not_editable",
            StepError::NotActionable(_) => "not_actionable",
            StepError::Stale(_) => "stale",
            StepError::Timeout(_) => "timeout",
            StepError::EvalError(_) => "eval_error",
            StepError::NavigationError(_) => "navigation_error",
            StepError::Execution(_) => "execution",
        }
    }
}

impl From<LocatorError> for StepError {
    fn from(err: LocatorError) -> Self {
        match err {
            LocatorError::NotFound(msg) => StepError::ElementNotFound(msg),
            LocatorError::NotEditable(reason) => StepError::ElementNotEditable(reason),
            LocatorError::NotVisible => StepError::NotActionable("not visible".to_string()),
            LocatorError::NotEnabled => StepError::NotActionable("not enabled".to_string()),
            LocatorError::NotStable => StepError::NotActionable("not stable".to_string()),
            LocatorError::Covered(blocker) => {
                StepError::NotActionable(format!("covered by {blocker}"))
            }
            LocatorError::Stale(msg) => StepError::Stale(msg),
            LocatorError::Timeout(d) => StepError::Timeout(d),
            LocatorError::PageClosed => StepError::Connection("page closed".to_string()),
            LocatorError::EvaluationError(msg) => StepError::EvalError(msg),
            other => StepError::Execution(other.to_string()),
        }
    }
}

impl From<NavigationError> for StepError {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::Timeout(d) => StepError::Timeout(d),
            other => StepError::NavigationError(other.to_string()),
        }
    }
}

impl From<PageError> for StepError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::UncaughtException(msg) => StepError::EvalError(msg),
            PageError::Closed => StepError::Connection("page closed".to_string()),
            other => StepError::Execution(other.to_string()),
        }
    }
}

impl From<viewpoint_cdp::CdpError> for StepError {
    fn from(err: viewpoint_cdp::CdpError) -> Self {
        StepError::Connection(err.to_string())
    }
}

impl From<ContextError> for StepError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Closed => StepError::Connection("context closed".to_string()),
            other => StepError::Execution(other.to_string()),
        }
    }
}

/// Failures that prevent a request from ever reaching the step loop.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The request body could not be parsed as JSON or didn't match the
    /// request schema.
    #[error("parse error: {0}")]
    Parse(String),

    /// The step array failed validation before any step ran.
    #[error("validation error: {0}")]
    Validation(String),

    /// A collaborator (tab registry, frame-state store, CDP session) could
    /// not be reached.
    #[error("connection error: {0}")]
    Connection(String),
}
