use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::conversion::common::highlevel_types::SharedMesh;
use crate::conversion::common::types::MeshData;
use crate::error::ConversionError;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub failures: usize,
    pub hits: usize,
    pub misses: usize,
}

/// Decode-once storage for meshes, keyed by the normalized asset name.
///
/// Failures are cached as well, so every object referencing a broken asset fails the same way
/// without decoding it again. The entry stays locked while decoding, which serializes concurrent
/// requests for the same key.
#[derive(Default)]
pub struct MeshCache {
    entries: DashMap<String, Result<SharedMesh, ConversionError>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<F>(&self, key: &str, decode: F) -> Result<SharedMesh, ConversionError>
    where
        F: FnOnce() -> Result<MeshData, ConversionError>,
    {
        // Easy path: no write lock on the shard
        if let Some(entry) = self.entries.get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return entry.value().clone();
        }

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                // raced by another resolve
                self.hits.fetch_add(1, Ordering::Relaxed);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                let result = decode().map(Arc::new);
                entry.insert(result.clone());
                result
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<Result<SharedMesh, ConversionError>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            failures: self.entries.iter().filter(|entry| entry.value().is_err()).count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
