//! In-process key-value backend

use super::KvStore;
use crate::{AcademyError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Map-backed store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.data
            .lock()
            .map_err(|_| AcademyError::Storage("memory store lock poisoned".to_string()).into())
    }
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).map(ToOwned::to_owned))
    }

    fn put_raw(&self, key: &str, value: &[u8]) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.put_raw("b", b"2").unwrap();
        store.put_raw("a", b"1").unwrap();
        assert_eq!(other.get_raw("a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(other.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
        other.remove("a").unwrap();
        assert_eq!(store.get_raw("a").unwrap(), None);
    }
}
