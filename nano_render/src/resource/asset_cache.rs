/// Weak-reference asset cache.
///
/// The cache never keeps an asset alive: it stores `Weak<T>` keyed by a
/// string (path or generator key) and hands out the `Arc<T>` the caller
/// owns. Once every owner drops its `Arc`, the entry is dead and the next
/// lookup recreates the asset.

use std::sync::{Arc, Weak};
use rustc_hash::FxHashMap;

use crate::backend::{Backend, Mesh, MeshData};
use crate::error::Result;
use crate::{engine_debug, engine_err};

/// String-keyed cache of weakly held assets
pub struct AssetCache<T: ?Sized> {
    entries: FxHashMap<String, Weak<T>>,
}

impl<T: ?Sized> AssetCache<T> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Get a live asset
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.entries.get(key).and_then(Weak::upgrade)
    }

    /// Get a live asset or create it
    ///
    /// `create` runs only when the key is missing or its asset has been
    /// released. Nothing is inserted if `create` fails.
    pub fn get_or_try_insert_with<F>(&mut self, key: &str, create: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<Arc<T>>,
    {
        if let Some(existing) = self.get(key) {
            return Ok(existing);
        }
        let asset = create()?;
        self.entries.insert(key.to_string(), Arc::downgrade(&asset));
        Ok(asset)
    }

    /// Track an asset under `key`, replacing any previous entry
    pub fn insert(&mut self, key: &str, asset: &Arc<T>) {
        self.entries.insert(key.to_string(), Arc::downgrade(asset));
    }

    /// Forget a key. Returns the asset if it was still alive.
    pub fn remove(&mut self, key: &str) -> Option<Arc<T>> {
        self.entries.remove(key).and_then(|weak| weak.upgrade())
    }

    /// Drop entries whose asset has been released; returns how many
    pub fn purge(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, weak| weak.strong_count() > 0);
        before - self.entries.len()
    }

    /// Number of entries, dead ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose asset is still owned somewhere
    pub fn live_count(&self) -> usize {
        self.entries.values().filter(|weak| weak.strong_count() > 0).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: ?Sized> Default for AssetCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MeshCache
// ============================================================================

/// Cache of backend meshes built from generator functions
pub struct MeshCache {
    cache: AssetCache<dyn Mesh>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self {
            cache: AssetCache::new(),
        }
    }

    /// Return the cached mesh for `key`, or generate and upload it
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if the generator produces no vertices or
    /// no indices; any error from `Backend::create_mesh`.
    pub fn load_from_generator<G>(
        &mut self,
        key: &str,
        backend: &mut dyn Backend,
        generator: G,
    ) -> Result<Arc<dyn Mesh>>
    where
        G: FnOnce() -> MeshData,
    {
        self.cache.get_or_try_insert_with(key, || {
            let data = generator();
            if data.is_empty() {
                return Err(engine_err!("nre::MeshCache", InvalidResource,
                    "mesh '{}' generated empty data", key));
            }
            let mesh = backend.create_mesh(&data)?;
            engine_debug!("nre::MeshCache", "Uploaded mesh '{}' ({} vertices, {} indices)",
                key, data.vertices.len(), data.indices.len());
            Ok(mesh)
        })
    }

    /// Cached mesh if still alive
    pub fn get(&self, key: &str) -> Option<Arc<dyn Mesh>> {
        self.cache.get(key)
    }

    /// Drop entries whose mesh has been released
    pub fn purge(&mut self) -> usize {
        self.cache.purge()
    }

    pub fn live_count(&self) -> usize {
        self.cache.live_count()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for MeshCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "asset_cache_tests.rs"]
mod tests;
