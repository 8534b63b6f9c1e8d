//! Persistent per-target frame context, so the "current frame" a series of
//! steps addresses survives across invocations within a freshness window.
//!
//! Grounded in the teacher's context-scoped persistence pattern
//! (`viewpoint_core::context::storage`), generalized to this crate's
//! `{frameId, executionContextId, timestamp}` shape and 1-hour TTL.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// The freshness window after which a stored frame context is considered
/// stale and ignored by `get`.
pub const FRESHNESS_WINDOW_SECS: i64 = 3600;

/// A persisted frame context for one target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameContext {
    pub frame_id: String,
    pub execution_context_id: String,
    pub timestamp: DateTime<Utc>,
}

impl FrameContext {
    pub fn new(frame_id: impl Into<String>, execution_context_id: impl Into<String>) -> Self {
        Self {
            frame_id: frame_id.into(),
            execution_context_id: execution_context_id.into(),
            timestamp: Utc::now(),
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        (now - self.timestamp).num_seconds() < FRESHNESS_WINDOW_SECS
    }
}

/// Load/save/clear over per-target frame context, with timestamp-based
/// expiry applied on read.
pub trait FrameStateStore: Send + Sync {
    fn save(&self, target_id: &str, context: FrameContext) -> Result<(), RuntimeError>;

    /// Returns `None` if nothing is stored, or if the stored entry has
    /// aged past [`FRESHNESS_WINDOW_SECS`].
    fn get(&self, target_id: &str) -> Option<FrameContext>;

    fn clear(&self, target_id: &str) -> Result<(), RuntimeError>;
}

#[derive(Default)]
pub struct InMemoryFrameStateStore {
    state: RwLock<HashMap<String, FrameContext>>,
}

impl InMemoryFrameStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameStateStore for InMemoryFrameStateStore {
    fn save(&self, target_id: &str, context: FrameContext) -> Result<(), RuntimeError> {
        self.state.write().insert(target_id.to_string(), context);
        Ok(())
    }

    fn get(&self, target_id: &str) -> Option<FrameContext> {
        let state = self.state.read();
        let entry = state.get(target_id)?;
        entry.is_fresh(Utc::now()).then(|| entry.clone())
    }

    fn clear(&self, target_id: &str) -> Result<(), RuntimeError> {
        self.state.write().remove(target_id);
        Ok(())
    }
}

pub struct JsonFrameStateStore {
    path: PathBuf,
    state: RwLock<HashMap<String, FrameContext>>,
}

impl JsonFrameStateStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| RuntimeError::Connection(format!("reading frame state: {e}")))?;
            serde_json::from_str(&text)
                .map_err(|e| RuntimeError::Connection(format!("parsing frame state: {e}")))?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    fn persist(&self, state: &HashMap<String, FrameContext>) -> Result<(), RuntimeError> {
        let text = serde_json::to_string_pretty(state)
            .map_err(|e| RuntimeError::Connection(format!("serializing frame state: {e}")))?;
        std::fs::write(&self.path, text)
            .map_err(|e| RuntimeError::Connection(format!("writing frame state: {e}")))
    }
}

impl FrameStateStore for JsonFrameStateStore {
    fn save(&self, target_id: &str, context: FrameContext) -> Result<(), RuntimeError> {
        let mut state = self.state.write();
        state.insert(target_id.to_string(), context);
        self.persist(&state)
    }

    fn get(&self, target_id: &str) -> Option<FrameContext> {
        let state = self.state.read();
        let entry = state.get(target_id)?;
        entry.is_fresh(Utc::now()).then(|| entry.clone())
    }

    fn clear(&self, target_id: &str) -> Result<(), RuntimeError> {
        let mut state = self.state.write();
        state.remove(target_id);
        self.persist(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn fresh_entries_round_trip() {
        let store = InMemoryFrameStateStore::new();
        store
            .save("t1", FrameContext::new("frame-1", "ctx-1"))
            .unwrap();
        let got = store.get("t1").unwrap();
        assert_eq!(got.frame_id, "frame-1");
    }

    #[test]
    fn stale_entries_are_hidden() {
        let store = InMemoryFrameStateStore::new();
        let mut stale = FrameContext::new("frame-1", "ctx-1");
        stale.timestamp = Utc::now() - ChronoDuration::seconds(FRESHNESS_WINDOW_SECS + 60);
        store.save("t1", stale).unwrap();
        assert!(store.get("t1").is_none());
    }

    #[test]
    fn clear_removes_the_entry() {
        let store = InMemoryFrameStateStore::new();
        store
            .save("t1", FrameContext::new("frame-1", "ctx-1"))
            .unwrap();
        store.clear("t1").unwrap();
        assert!(store.get("t1").is_none());
    }
}
