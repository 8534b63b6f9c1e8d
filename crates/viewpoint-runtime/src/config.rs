//! Runner configuration, in the teacher's plain-struct-plus-builder style
//! (no config-file layer: the request object itself is an invocation's
//! configuration, matching `ContextOptions`/`BrowserConfig`).

use std::time::Duration;

/// Per-kind default timeouts, overridable per step via the step envelope's
/// own `timeout` field.
#[derive(Debug, Clone)]
pub struct StepTimeouts {
    /// Default deadline for any step that doesn't specify its own timeout.
    pub default: Duration,
    /// Deadline for the actionability wait inside click/fill/hover/etc.
    pub actionability: Duration,
    /// Deadline for an implicit or explicit navigation wait.
    pub navigation: Duration,
}

impl Default for StepTimeouts {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(30),
            actionability: Duration::from_secs(5),
            navigation: Duration::from_secs(30),
        }
    }
}

/// Configuration for one `Runner`.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub timeouts: StepTimeouts,
    /// Halt the step loop on the first error; steps marked `optional` never
    /// count toward this regardless of the setting.
    pub stop_on_error: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeouts: StepTimeouts::default(),
            stop_on_error: true,
        }
    }
}

impl RunnerConfig {
    #[must_use]
    pub fn stop_on_error(mut self, value: bool) -> Self {
        self.stop_on_error = value;
        self
    }

    #[must_use]
    pub fn timeouts(mut self, timeouts: StepTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}
