//! Core error types.
//!
//! Each subsystem exposes its own leaf error enum; [`CoreError`] aggregates
//! them so callers that don't care which layer failed can propagate a
//! single type with `?`.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur anywhere in the core domain.
#[derive(Error, Debug)]
pub enum CoreError {
    /// CDP communication error.
    #[error("CDP error: {0}")]
    Cdp(#[from] viewpoint_cdp::CdpError),

    /// Browser error.
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Context error.
    #[error("context error: {0}")]
    Context(#[from] ContextError),

    /// Page error.
    #[error("page error: {0}")]
    Page(#[from] PageError),

    /// Wait error.
    #[error("wait error: {0}")]
    Wait(#[from] WaitError),

    /// Navigation error.
    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Locator error.
    #[error("locator error: {0}")]
    Locator(#[from] LocatorError),

    /// Network observation error.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

/// Errors related to browser process/connection operations.
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Chromium executable not found.
    #[error("Chromium not found. Set CHROMIUM_PATH environment variable or install Chromium.")]
    ChromiumNotFound,

    /// Failed to launch browser process.
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser launch timed out.
    #[error("browser launch timeout after {0:?}")]
    LaunchTimeout(Duration),

    /// Failed to connect to an already-running browser.
    #[error("failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Browser is already closed.
    #[error("browser is closed")]
    Closed,

    /// CDP error during a browser-level operation.
    #[error("CDP error: {0}")]
    Cdp(#[from] viewpoint_cdp::CdpError),
}

/// Errors related to browser context operations.
#[derive(Error, Debug)]
pub enum ContextError {
    /// Context is already closed.
    #[error("context is closed")]
    Closed,

    /// Failed to create a context.
    #[error("failed to create context: {0}")]
    CreateFailed(String),

    /// CDP error during a context-level operation.
    #[error("CDP error: {0}")]
    Cdp(#[from] viewpoint_cdp::CdpError),
}

/// Errors related to page operations.
#[derive(Error, Debug)]
pub enum PageError {
    /// Page is already closed.
    #[error("page is closed")]
    Closed,

    /// Failed to create a page.
    #[error("failed to create page: {0}")]
    CreateFailed(String),

    /// JavaScript evaluation failed.
    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),

    /// The page-side exception text, surfaced verbatim for the caller to
    /// classify (the runtime layer turns this into `EvalError`).
    #[error("uncaught exception: {0}")]
    UncaughtException(String),

    /// CDP error during a page-level operation.
    #[error("CDP error: {0}")]
    Cdp(#[from] viewpoint_cdp::CdpError),
}

/// Errors related to wait operations.
#[derive(Error, Debug)]
pub enum WaitError {
    /// Wait operation timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// Wait operation was cancelled.
    #[error("wait cancelled")]
    Cancelled,

    /// Page was closed during the wait.
    #[error("page closed during wait")]
    PageClosed,
}

/// Errors related to navigation operations.
#[derive(Error, Debug)]
pub enum NavigationError {
    /// Navigation timed out before reaching the requested load state.
    #[error("navigation timeout after {0:?}")]
    Timeout(Duration),

    /// Network error during navigation.
    #[error("network error: {0}")]
    NetworkError(String),

    /// SSL certificate error.
    #[error("SSL error: {0}")]
    SslError(String),

    /// Navigation was cancelled (superseded by a later navigation).
    #[error("navigation cancelled")]
    Cancelled,

    /// CDP error during navigation.
    #[error("CDP error: {0}")]
    Cdp(#[from] viewpoint_cdp::CdpError),

    /// Wait error while waiting for the post-navigation load state.
    #[error("wait error: {0}")]
    Wait(#[from] WaitError),
}

/// Errors related to network observation (request/response tracking).
#[derive(Error, Debug)]
pub enum NetworkError {
    /// A `wait_for_request`/`wait_for_response` future was aborted because
    /// the page or context closed first.
    #[error("network wait aborted")]
    Aborted,

    /// A `wait_for_request`/`wait_for_response` future exceeded its timeout.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// CDP error while subscribing to or reading network events.
    #[error("CDP error: {0}")]
    Cdp(#[from] viewpoint_cdp::CdpError),
}

/// Errors related to locator and element-handle operations.
///
/// This is the enum the Actionability Checker and Lazy Ref Resolver report
/// through; the runtime layer classifies each variant into one of the
/// top-level step error kinds (`ElementNotFound`, `ElementNotEditable`,
/// `NotActionable`, `Stale`, ...).
#[derive(Error, Debug)]
pub enum LocatorError {
    /// No element matched the selector/role/text query.
    #[error("element not found: {0}")]
    NotFound(String),

    /// A selector matched more than one element where exactly one was required.
    #[error("strict mode violation: {0} elements found, expected 1")]
    StrictModeViolation(usize),

    /// The element exists but failed the `visible` predicate.
    #[error("element is not visible")]
    NotVisible,

    /// The element exists but failed the `enabled` predicate.
    #[error("element is not enabled")]
    NotEnabled,

    /// The element exists but failed the `editable` predicate, with the
    /// concrete sub-reason (e.g. `"readOnly"`, `"not a text input"`).
    #[error("element is not editable: {0}")]
    NotEditable(String),

    /// The element exists but is covered by another element at its click point.
    #[error("element is covered by: {0}")]
    Covered(String),

    /// The element exists but its bounding rect has not stabilized.
    #[error("element is not stable")]
    NotStable,

    /// The selector string itself is malformed. Not retryable.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// The node the caller holds a handle/ref for is no longer attached to
    /// the document and could not be re-resolved.
    #[error("element is stale: {0}")]
    Stale(String),

    /// An actionability wait or locator operation exceeded its timeout.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// JavaScript evaluation error while querying or acting on the element.
    #[error("evaluation error: {0}")]
    EvaluationError(String),

    /// CDP error during a locator operation.
    #[error("CDP error: {0}")]
    Cdp(#[from] viewpoint_cdp::CdpError),

    /// Page is closed.
    #[error("page is closed")]
    PageClosed,
}
