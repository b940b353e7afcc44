//! Recommendation cache injected into the pipeline.
//!
//! The engine never caches; only the calling layer decides when an external
//! recommendation can be reused.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use models::{ClientFinancialProfile, Goal};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

pub trait RecommendationCache: Send + Sync {
    /// Returns the cached value unless it is missing or expired.
    fn get(&self, key: &str) -> Option<Value>;
    fn put(&self, key: &str, value: Value);
    fn invalidate(&self, key: &str);
    /// Drops expired entries and returns how many were removed.
    fn purge_expired(&self) -> usize;
}

/// SHA-256 hex digest over the serialized (profile, goal) pair.
pub fn recommendation_cache_key(profile: &ClientFinancialProfile, goal: &Goal) -> String {
    let canonical = json!({ "profile": profile, "goal": goal }).to_string();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// Process-local TTL cache.
pub struct InMemoryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_ttl_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        entry.stored_at.elapsed() < self.ttl
    }
}

impl RecommendationCache for InMemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().ok()?;
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.value.clone())
    }

    fn put(&self, key: &str, value: Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    fn invalidate(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    fn purge_expired(&self) -> usize {
        let Ok(mut entries) = self.entries.write() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        before - entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn goal(id: &str) -> Goal {
        Goal {
            id: id.to_string(),
            target_amount: 1_000_000.0,
            target_year: 2035,
            ..Default::default()
        }
    }

    #[test]
    fn test_key_is_stable_and_input_sensitive() {
        let profile = ClientFinancialProfile {
            monthly_income: 100_000.0,
            ..Default::default()
        };
        let a = recommendation_cache_key(&profile, &goal("house"));
        let b = recommendation_cache_key(&profile, &goal("house"));
        let c = recommendation_cache_key(&profile, &goal("car"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);

        let richer = ClientFinancialProfile {
            monthly_income: 120_000.0,
            ..Default::default()
        };
        assert_ne!(a, recommendation_cache_key(&richer, &goal("house")));
    }

    #[test]
    fn test_put_get_invalidate() {
        let cache = InMemoryCache::with_ttl_secs(60);
        assert!(cache.get("k").is_none());
        cache.put("k", json!({"advice": "start early"}));
        assert_eq!(cache.get("k"), Some(json!({"advice": "start early"})));
        cache.invalidate("k");
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entries_are_hidden_and_purged() {
        let cache = InMemoryCache::new(Duration::ZERO);
        cache.put("k", json!(1));
        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache: Arc<dyn RecommendationCache> = Arc::new(InMemoryCache::with_ttl_secs(60));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.put(&format!("k{i}"), json!(i)))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        for i in 0..4 {
            assert_eq!(cache.get(&format!("k{i}")), Some(json!(i)));
        }
    }
}
