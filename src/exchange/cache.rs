//! Injectable TTL cache for trading-pair metadata

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::messages::{TradingPairIndex, TradingPairMultipliers};

/// Cached value plus the time it was fetched
#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

/// Metadata cache keyed by exchange symbol
///
/// Entries expire after `ttl`; a `None` ttl keeps them until invalidated.
#[derive(Debug)]
pub struct MetadataCache {
    ttl: Option<Duration>,
    indices: RwLock<HashMap<String, Entry<TradingPairIndex>>>,
    multipliers: RwLock<HashMap<String, Entry<TradingPairMultipliers>>>,
}

impl MetadataCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            indices: RwLock::new(HashMap::new()),
            multipliers: RwLock::new(HashMap::new()),
        }
    }

    /// Build from a TTL in seconds, `0` meaning no expiry
    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        let ttl = (ttl_secs > 0).then(|| Duration::seconds(ttl_secs as i64));
        Self::new(ttl)
    }

    pub async fn index(&self, symbol: &str) -> Option<TradingPairIndex> {
        self.lookup(&self.indices, symbol).await
    }

    pub async fn put_index(&self, symbol: &str, value: TradingPairIndex) {
        self.indices.write().await.insert(symbol.to_string(), Self::entry(value));
    }

    pub async fn multipliers(&self, symbol: &str) -> Option<TradingPairMultipliers> {
        self.lookup(&self.multipliers, symbol).await
    }

    pub async fn put_multipliers(&self, symbol: &str, value: TradingPairMultipliers) {
        self.multipliers
            .write()
            .await
            .insert(symbol.to_string(), Self::entry(value));
    }

    /// Drop everything cached for `symbol`
    pub async fn invalidate(&self, symbol: &str) {
        self.indices.write().await.remove(symbol);
        self.multipliers.write().await.remove(symbol);
    }

    pub async fn clear(&self) {
        self.indices.write().await.clear();
        self.multipliers.write().await.clear();
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let mut removed = 0;
        {
            let mut indices = self.indices.write().await;
            let before = indices.len();
            indices.retain(|_, e| !self.is_expired(e));
            removed += before - indices.len();
        }
        let mut multipliers = self.multipliers.write().await;
        let before = multipliers.len();
        multipliers.retain(|_, e| !self.is_expired(e));
        removed + before - multipliers.len()
    }

    /// Number of cached entries across both maps
    pub async fn len(&self) -> usize {
        self.indices.read().await.len() + self.multipliers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn entry<T>(value: T) -> Entry<T> {
        Entry {
            value,
            fetched_at: Utc::now(),
        }
    }

    /// Fresh value for `symbol`; a stale entry is evicted on the way out
    async fn lookup<T: Copy>(
        &self,
        map: &RwLock<HashMap<String, Entry<T>>>,
        symbol: &str,
    ) -> Option<T> {
        {
            let entries = map.read().await;
            match entries.get(symbol) {
                None => return None,
                Some(entry) if !self.is_expired(entry) => return Some(entry.value),
                Some(_) => {}
            }
        }

        let mut entries = map.write().await;
        match entries.get(symbol) {
            // refreshed by another task between the two locks
            Some(entry) if !self.is_expired(entry) => Some(entry.value),
            Some(_) => {
                entries.remove(symbol);
                None
            }
            None => None,
        }
    }

    fn is_expired<T>(&self, entry: &Entry<T>) -> bool {
        self.ttl
            .map_or(false, |ttl| Utc::now() - entry.fetched_at >= ttl)
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new(None)
    }
}
