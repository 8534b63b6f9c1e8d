//! Narrow traits for the four external collaborators the core depends on
//! but does not implement: the CDP session itself, the tab registry, the
//! frame-state store, and the temp-path resolver.
//!
//! Each trait is intentionally thin — just the operations the runner and
//! executors actually call — so tests substitute fakes directly instead of
//! standing up a real browser or filesystem.

mod frame_state;
mod tab_registry;
mod temp_path;

pub use frame_state::{FrameContext, FrameStateStore, InMemoryFrameStateStore, JsonFrameStateStore};
pub use tab_registry::{InMemoryTabRegistry, JsonTabRegistry, TabEntry, TabRegistry};
pub use temp_path::{RealTempPathResolver, TempPathResolver};

use serde_json::Value;

/// The subset of the CDP command/event surface the runtime depends on.
///
/// Satisfied in this workspace by `viewpoint_cdp::Connection` through the
/// `viewpoint_core::Page` wrapper for everything step executors touch; this
/// trait exists so tests can substitute a fake target without a real
/// browser, and so the runner's non-step-specific bookkeeping (listing
/// targets, closing a tab) doesn't need to reach into `viewpoint_core`
/// internals.
///
/// Generic (not `dyn`) callers are expected throughout: the runner is
/// parameterized over `S: CdpSession` rather than boxing a trait object, so
/// this stays a plain `async fn`-in-trait (no `async-trait` dependency).
pub trait CdpSession: Send + Sync {
    /// Evaluate an expression in the session's current execution context.
    fn evaluate(
        &self,
        expression: &str,
    ) -> impl std::future::Future<Output = Result<Value, crate::error::StepError>> + Send;

    /// The target id this session is attached to.
    fn target_id(&self) -> &str;
}
