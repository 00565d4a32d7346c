/// Handle-keyed registry of shared objects.
///
/// Stores `Arc<T>` entries under freshly allocated handles. Lookups never
/// fail loudly: the null handle and unknown handles simply yield `None`.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::utils::{Handle, HandleAllocator, AssetHandle};

/// Registry mapping handles to shared objects
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use nano_render::nre::resource::Registry;
///
/// let mut textures: Registry<String> = Registry::new();
/// let h = textures.add(Arc::new("albedo".to_string()));
/// assert_eq!(textures.get(h).as_deref().map(String::as_str), Some("albedo"));
/// ```
pub struct Registry<T: ?Sized, H: Handle = AssetHandle> {
    entries: FxHashMap<H, Arc<T>>,
    ids: HandleAllocator<H>,
}

impl<T: ?Sized, H: Handle> Registry<T, H> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            ids: HandleAllocator::new(),
        }
    }

    /// Store an object and return its new handle
    pub fn add(&mut self, object: Arc<T>) -> H {
        let handle = self.ids.allocate();
        self.entries.insert(handle, object);
        handle
    }

    /// Look up an object (None for null or unknown handles)
    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        if handle.is_null() {
            return None;
        }
        self.entries.get(&handle).cloned()
    }

    /// Whether the handle refers to a stored object
    pub fn contains(&self, handle: H) -> bool {
        handle.is_valid() && self.entries.contains_key(&handle)
    }

    /// Remove an object, returning it if it was present
    pub fn remove(&mut self, handle: H) -> Option<Arc<T>> {
        if handle.is_null() {
            return None;
        }
        self.entries.remove(&handle)
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All live handles, ascending
    pub fn handles(&self) -> Vec<H> {
        let mut handles: Vec<H> = self.entries.keys().copied().collect();
        handles.sort_unstable();
        handles
    }

    /// Drop every entry and restart handle numbering
    pub fn clear(&mut self) {
        self.entries.clear();
        self.ids.reset();
    }
}

impl<T: ?Sized, H: Handle> Default for Registry<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
