//! In-process expiring-key store implementing `RateLimitStore`.
//!
//! Backed by a `DashMap`; the entry API locks the key's shard for the whole
//! check-and-set, so `acquire` is atomic per key. Lapsed leases are replaced
//! in place on the next `acquire` and dropped on `exists`, so the map only
//! holds keys touched within roughly one window.
//!
//! Correct for a single service instance. Multi-instance deployments need a
//! shared backend (e.g. Redis SET NX EX) behind the same trait.

use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use danmaku_core::ratelimit::RateLimitStore;
use danmaku_types::error::RepositoryError;

/// DashMap-backed implementation of `RateLimitStore`.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    entries: DashMap<String, Lease>,
}

#[derive(Debug, Clone)]
struct Lease {
    #[allow(dead_code)]
    value: String,
    expires_at: Instant,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn acquire(&self, key: &str, value: &str, ttl: Duration) -> Result<bool, RepositoryError> {
        let now = Instant::now();
        let lease = Lease {
            value: value.to_string(),
            expires_at: now + ttl,
        };

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().expires_at > now {
                    return Ok(false);
                }
                occupied.insert(lease);
                Ok(true)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(lease);
                Ok(true)
            }
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, RepositoryError> {
        let now = Instant::now();
        self.entries.remove_if(key, |_, lease| lease.expires_at <= now);
        Ok(self.entries.contains_key(key))
    }
}
