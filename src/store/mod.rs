//! Persistent state store
//!
//! A raw key-value backend ([`KvStore`]) wrapped by [`StateStore`], which
//! serializes whole tracker snapshots as versioned JSON and tells subscribers
//! whenever a key is written.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::{AcademyError, Result};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Key of the learning-progress snapshot
pub const CYBER_STATE_KEY: &str = "cyberState";
/// Key of the CTF snapshot
pub const CTF_STATE_KEY: &str = "ctfState";
/// Key of the King of the Hill snapshot
pub const KOTH_STATE_KEY: &str = "kothState";

/// Version written into every snapshot envelope.
/// Snapshots with any other version are discarded and reseeded.
pub const STATE_VERSION: u32 = 1;

/// Raw byte storage addressed by string keys
pub trait KvStore: std::fmt::Debug + Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put_raw(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u32,
    state: &'a T,
}

#[derive(Deserialize)]
struct RawEnvelope {
    version: u32,
    state: serde_json::Value,
}

/// Handle returned by [`StateStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&str) + Send + Sync>;

/// Typed snapshot storage shared by all trackers
#[derive(Clone)]
pub struct StateStore {
    backend: Arc<dyn KvStore>,
    listeners: Arc<Mutex<Vec<(SubscriptionId, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl StateStore {
    pub fn new(backend: Arc<dyn KvStore>) -> Self {
        Self {
            backend,
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Load a snapshot, failing on unreadable or mismatched data
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw = match self.backend.get_raw(key)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let envelope: RawEnvelope = serde_json::from_slice(&raw)
            .map_err(|e| AcademyError::CorruptedState(format!("{}: {}", key, e)))?;
        if envelope.version != STATE_VERSION {
            return Err(AcademyError::VersionMismatch {
                key: key.to_string(),
                found: envelope.version,
                expected: STATE_VERSION,
            }
            .into());
        }
        let state = serde_json::from_value(envelope.state)
            .map_err(|e| AcademyError::CorruptedState(format!("{}: {}", key, e)))?;
        Ok(Some(state))
    }

    /// Load a snapshot, treating anything unusable as absent
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load(key) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("discarding saved state: {:#}", err);
                None
            }
        }
    }

    /// Overwrite the snapshot stored under `key` and notify subscribers
    pub fn save<T: Serialize>(&self, key: &str, state: &T) -> Result<()> {
        let envelope = Envelope { version: STATE_VERSION, state };
        let bytes = serde_json::to_vec(&envelope).with_context(|| format!("failed to serialize {}", key))?;
        self.backend.put_raw(key, &bytes)?;
        self.notify(key);
        Ok(())
    }

    pub fn clear(&self, key: &str) -> Result<()> {
        self.backend.remove(key)
    }

    /// Call `listener` with the key after every successful save
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let listener: Listener = Arc::new(listener);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    fn notify(&self, key: &str) {
        // Listeners run outside the lock so they may subscribe or unsubscribe
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(key);
        }
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subscribers = self.listeners.lock().map(|l| l.len()).unwrap_or(0);
        f.debug_struct("StateStore")
            .field("backend", &self.backend)
            .field("subscribers", &subscribers)
            .finish()
    }
}
