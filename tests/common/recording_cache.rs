//! Cache wrapper that records mutating calls, for write-order assertions.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use landcover::services::{CacheError, ImageCache, InMemoryCache};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp {
    Set(String),
    Delete(String),
    Expire(String),
}

/// Forwards to an [`InMemoryCache`] and logs every write.
///
/// `fail_on_set` makes the n-th `set` (0-based) fail, to simulate a backend
/// dropping out part-way through a multi-key write.
pub struct RecordingCache {
    pub inner: Arc<InMemoryCache>,
    ops: Mutex<Vec<CacheOp>>,
    fail_on_set: Option<usize>,
    sets: Mutex<usize>,
}

impl RecordingCache {
    pub fn new(inner: Arc<InMemoryCache>) -> Self {
        Self {
            inner,
            ops: Mutex::new(Vec::new()),
            fail_on_set: None,
            sets: Mutex::new(0),
        }
    }

    pub fn failing_on_set(inner: Arc<InMemoryCache>, nth: usize) -> Self {
        Self {
            fail_on_set: Some(nth),
            ..Self::new(inner)
        }
    }

    pub fn ops(&self) -> Vec<CacheOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Keys written with `set`, in call order
    pub fn set_keys(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                CacheOp::Set(key) => Some(key),
                _ => None,
            })
            .collect()
    }
}

impl ImageCache for RecordingCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut sets = self.sets.lock().unwrap();
        let n = *sets;
        *sets += 1;
        if self.fail_on_set == Some(n) {
            return Err(CacheError::Unavailable("injected failure".to_string()));
        }
        self.ops.lock().unwrap().push(CacheOp::Set(key.to_string()));
        self.inner.set(key, value, ttl)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.inner.exists(key)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.ops
            .lock()
            .unwrap()
            .push(CacheOp::Delete(key.to_string()));
        self.inner.delete(key)
    }

    fn expire(&self, key: &str, ttl: Duration) -> Result<bool, CacheError> {
        self.ops
            .lock()
            .unwrap()
            .push(CacheOp::Expire(key.to_string()));
        self.inner.expire(key, ttl)
    }
}
