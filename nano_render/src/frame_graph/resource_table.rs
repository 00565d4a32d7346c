/// Logical resources of a frame graph.
///
/// A logical resource is a named, typed placeholder used only to infer
/// ordering between passes. The graph never allocates the GPU object behind
/// it; it only remembers which pass wrote it last.

use rustc_hash::FxHashMap;
use crate::utils::{Handle, HandleAllocator, PassHandle, ResourceHandle};

/// What a logical resource stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ColorTarget,
    DepthTarget,
    UniformBuffer,
    Texture,
    External,
}

/// Declaration of a logical resource
///
/// Names are advisory (diagnostics/UI); two resources may share a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDesc {
    pub name: String,
    pub kind: ResourceKind,
    /// Owned outside the graph (e.g. the swapchain image)
    pub externally_owned: bool,
}

impl ResourceDesc {
    /// Externally owned resource
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            externally_owned: true,
        }
    }

    /// Resource whose lifetime is tied to the graph
    pub fn transient(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            externally_owned: false,
        }
    }
}

/// A declared resource and its current last writer
#[derive(Debug, Clone)]
pub struct ResourceRecord {
    pub handle: ResourceHandle,
    pub desc: ResourceDesc,
    /// Null until a pass declaring a write is registered
    pub last_writer: PassHandle,
}

/// Table of declared resources, in declaration order
#[derive(Default)]
pub(crate) struct ResourceTable {
    records: Vec<ResourceRecord>,
    index: FxHashMap<ResourceHandle, usize>,
    ids: HandleAllocator<ResourceHandle>,
}

impl ResourceTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn declare(&mut self, desc: ResourceDesc) -> ResourceHandle {
        let handle = self.ids.allocate();
        self.index.insert(handle, self.records.len());
        self.records.push(ResourceRecord {
            handle,
            desc,
            last_writer: PassHandle::NULL,
        });
        handle
    }

    pub(crate) fn get(&self, handle: ResourceHandle) -> Option<&ResourceRecord> {
        self.index.get(&handle).map(|&i| &self.records[i])
    }

    pub(crate) fn contains(&self, handle: ResourceHandle) -> bool {
        handle.is_valid() && self.index.contains_key(&handle)
    }

    /// Last writer of a resource, if it has one
    pub(crate) fn last_writer(&self, handle: ResourceHandle) -> Option<PassHandle> {
        self.get(handle)
            .map(|record| record.last_writer)
            .filter(|writer| writer.is_valid())
    }

    pub(crate) fn set_last_writer(&mut self, handle: ResourceHandle, pass: PassHandle) {
        if let Some(&i) = self.index.get(&handle) {
            self.records[i].last_writer = pass;
        }
    }

    pub(crate) fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
        self.ids.reset();
    }
}
