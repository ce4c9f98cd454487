use crate::overlay::OverlayCell;
use crate::scheme::Scheme;
use lru::LruCache;
use std::num::NonZeroUsize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LayerCacheKey {
    scheme: Scheme,
    prefix: String,
}

/// Cells already enumerated for a layer prefix, most recently used kept.
///
/// Only enumerations that do not depend on the viewport belong here.
pub struct LayerCache {
    map: LruCache<LayerCacheKey, Vec<OverlayCell>>,
    hits: u64,
    misses: u64,
}

impl LayerCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            map: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_insert_with<F>(
        &mut self,
        scheme: Scheme,
        prefix: &str,
        build: F,
    ) -> Vec<OverlayCell>
    where
        F: FnOnce() -> Vec<OverlayCell>,
    {
        let key = LayerCacheKey {
            scheme,
            prefix: prefix.to_string(),
        };

        if let Some(cells) = self.map.get(&key) {
            self.hits += 1;
            debug!("Layer cache hit: {} '{}'", scheme, prefix);
            return cells.clone();
        }

        self.misses += 1;
        let cells = build();
        debug!(
            "Layer cache miss: {} '{}' ({} cells)",
            scheme,
            prefix,
            cells.len()
        );
        self.map.put(key, cells.clone());
        cells
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
