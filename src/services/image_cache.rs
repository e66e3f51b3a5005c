//! Key-value cache holding raw rasters and their derived artifacts.
//!
//! The cache is the only persistence layer. Values are opaque bytes with an
//! optional time-to-live; expired entries behave exactly like missing ones.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("Cache lock poisoned")]
    Poisoned,
}

/// Storage contract for image data.
///
/// Every call is independent; there is no multi-key transaction.
pub trait ImageCache: Send + Sync {
    /// Fetch a value, `None` if absent or expired.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store a value, replacing any previous one. `None` keeps it forever.
    fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError>;

    fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// Remove a key. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Re-arm the TTL of an existing key. Returns `false` if the key is absent.
    fn expire(&self, key: &str, ttl: Duration) -> Result<bool, CacheError>;
}

struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Process-local cache backed by a `HashMap`.
///
/// Expired entries are purged lazily on access.
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Live keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| CacheError::Poisoned)?;
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    pub fn len(&self) -> Result<usize, CacheError> {
        Ok(self.keys()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }

    fn purge(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
            tracing::debug!(key, "Cache: purged expired entry");
        }
        Ok(())
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCache for InMemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let expired = {
            let entries = self.entries.read().map_err(|_| CacheError::Poisoned)?;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => true,
                None => false,
            }
        };
        if expired {
            self.purge(key)?;
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        tracing::debug!(key, bytes = value.len(), ttl_secs = ?ttl.map(|t| t.as_secs()), "Cache: set");
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let entries = self.entries.read().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).is_some_and(|entry| !entry.is_expired()))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn expire(&self, key: &str, ttl: Duration) -> Result<bool, CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.expires_at = Some(Instant::now() + ttl);
                Ok(true)
            }
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_set_and_get() {
        let cache = InMemoryCache::new();
        cache.set("a", vec![1, 2, 3], None).unwrap();

        assert_eq!(cache.get("a").unwrap(), Some(vec![1, 2, 3]));
        assert!(cache.exists("a").unwrap());
        assert_eq!(cache.get("b").unwrap(), None);
        assert!(!cache.exists("b").unwrap());
    }

    #[test]
    fn test_set_overwrites() {
        let cache = InMemoryCache::new();
        cache.set("a", vec![1], None).unwrap();
        cache.set("a", vec![2], None).unwrap();
        assert_eq!(cache.get("a").unwrap(), Some(vec![2]));
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_delete() {
        let cache = InMemoryCache::new();
        cache.set("a", vec![1], None).unwrap();
        cache.delete("a").unwrap();
        cache.delete("missing").unwrap();
        assert!(!cache.exists("a").unwrap());
        assert!(cache.is_empty().unwrap());
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = InMemoryCache::new();
        cache
            .set("short", vec![1], Some(Duration::from_millis(20)))
            .unwrap();
        cache.set("long", vec![2], Some(Duration::from_secs(60))).unwrap();

        sleep(Duration::from_millis(40));

        assert_eq!(cache.get("short").unwrap(), None);
        assert!(!cache.exists("short").unwrap());
        assert_eq!(cache.get("long").unwrap(), Some(vec![2]));
        assert_eq!(cache.keys().unwrap(), vec!["long".to_string()]);
    }

    #[test]
    fn test_expire_rearms_existing_key() {
        let cache = InMemoryCache::new();
        cache.set("a", vec![1], None).unwrap();

        assert!(cache.expire("a", Duration::from_millis(20)).unwrap());
        assert!(!cache.expire("missing", Duration::from_secs(1)).unwrap());

        sleep(Duration::from_millis(40));
        assert!(!cache.exists("a").unwrap());
        assert!(!cache.expire("a", Duration::from_secs(1)).unwrap());
    }
}
