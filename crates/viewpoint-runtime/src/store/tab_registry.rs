//! Persistent `alias -> {targetId, host, port}` mapping with atomic
//! add/remove and a next-alias counter.
//!
//! Grounded in the multi-tab bookkeeping pattern of a browser-state store
//! keyed by alias, generalized here to the spec's JSON-file persistence
//! contract (`{tabs: {alias: {...}}, nextId: N}`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// One registered tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabEntry {
    pub target_id: String,
    pub host: String,
    pub port: u16,
}

/// Add/remove/lookup operations over the alias registry. Implementations
/// must make `add`/`remove` atomic with respect to concurrent calls on the
/// same store (the in-process lock is enough; the JSON-file implementation
/// additionally writes the whole file each time rather than patching it).
pub trait TabRegistry: Send + Sync {
    /// Register a tab, returning the alias assigned (an auto-incrementing
    /// `tab-N` when `alias` is `None`).
    fn add(&self, alias: Option<String>, entry: TabEntry) -> Result<String, RuntimeError>;

    /// Remove a tab by alias. No error if the alias wasn't present.
    fn remove(&self, alias: &str) -> Result<(), RuntimeError>;

    /// Look up a tab by alias.
    fn get(&self, alias: &str) -> Option<TabEntry>;

    /// Reverse lookup: the alias registered for a target id, if any.
    fn alias_for_target(&self, target_id: &str) -> Option<String>;

    /// All registered `(alias, entry)` pairs.
    fn list(&self) -> Vec<(String, TabEntry)>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    tabs: HashMap<String, TabEntry>,
    next_id: u64,
}

/// In-memory fake for tests; never touches the filesystem.
#[derive(Default)]
pub struct InMemoryTabRegistry {
    state: RwLock<RegistryFile>,
}

impl InMemoryTabRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TabRegistry for InMemoryTabRegistry {
    fn add(&self, alias: Option<String>, entry: TabEntry) -> Result<String, RuntimeError> {
        let mut state = self.state.write();
        let alias = alias.unwrap_or_else(|| {
            let id = state.next_id;
            state.next_id += 1;
            format!("tab-{id}")
        });
        state.tabs.insert(alias.clone(), entry);
        Ok(alias)
    }

    fn remove(&self, alias: &str) -> Result<(), RuntimeError> {
        self.state.write().tabs.remove(alias);
        Ok(())
    }

    fn get(&self, alias: &str) -> Option<TabEntry> {
        self.state.read().tabs.get(alias).cloned()
    }

    fn alias_for_target(&self, target_id: &str) -> Option<String> {
        self.state
            .read()
            .tabs
            .iter()
            .find(|(_, entry)| entry.target_id == target_id)
            .map(|(alias, _)| alias.clone())
    }

    fn list(&self) -> Vec<(String, TabEntry)> {
        self.state
            .read()
            .tabs
            .iter()
            .map(|(a, e)| (a.clone(), e.clone()))
            .collect()
    }
}

/// JSON-file-backed registry, read-modify-write under a process-local lock
/// (the spec treats the tab as single-writer already — this runtime doesn't
/// attempt cross-process file locking).
pub struct JsonTabRegistry {
    path: PathBuf,
    state: RwLock<RegistryFile>,
}

impl JsonTabRegistry {
    /// Load (or initialize) the registry at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| RuntimeError::Connection(format!("reading tab registry: {e}")))?;
            serde_json::from_str(&text)
                .map_err(|e| RuntimeError::Connection(format!("parsing tab registry: {e}")))?
        } else {
            RegistryFile::default()
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    fn persist(&self, state: &RegistryFile) -> Result<(), RuntimeError> {
        let text = serde_json::to_string_pretty(state)
            .map_err(|e| RuntimeError::Connection(format!("serializing tab registry: {e}")))?;
        std::fs::write(&self.path, text)
            .map_err(|e| RuntimeError::Connection(format!("writing tab registry: {e}")))
    }
}

impl TabRegistry for JsonTabRegistry {
    fn add(&self, alias: Option<String>, entry: TabEntry) -> Result<String, RuntimeError> {
        let mut state = self.state.write();
        let alias = alias.unwrap_or_else(|| {
            let id = state.next_id;
            state.next_id += 1;
            format!("tab-{id}")
        });
        state.tabs.insert(alias.clone(), entry);
        self.persist(&state)?;
        Ok(alias)
    }

    fn remove(&self, alias: &str) -> Result<(), RuntimeError> {
        let mut state = self.state.write();
        state.tabs.remove(alias);
        self.persist(&state)
    }

    fn get(&self, alias: &str) -> Option<TabEntry> {
        self.state.read().tabs.get(alias).cloned()
    }

    fn alias_for_target(&self, target_id: &str) -> Option<String> {
        self.state
            .read()
            .tabs
            .iter()
            .find(|(_, entry)| entry.target_id == target_id)
            .map(|(alias, _)| alias.clone())
    }

    fn list(&self) -> Vec<(String, TabEntry)> {
        self.state
            .read()
            .tabs
            .iter()
            .map(|(a, e)| (a.clone(), e.clone()))
            .collect()
    }
}
