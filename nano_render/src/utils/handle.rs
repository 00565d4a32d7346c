/// Typed opaque handles and their allocator.
///
/// Each handle space is its own newtype over `u64`, so a pass handle can
/// never be passed where a resource handle is expected. Raw value 0 is the
/// null handle in every space.
///
/// Raw layout: the low 32 bits hold a 1-based index, the high 32 bits the
/// allocator generation. Resetting an allocator restarts the index at 1 but
/// bumps the generation, so handles issued before a reset never compare
/// equal to handles issued after it. The generation never wraps: once it
/// reaches `u32::MAX`, a reset keeps numbering where it left off instead.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

const INDEX_BITS: u32 = 32;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

/// Common behaviour of every handle newtype
pub trait Handle: Copy + Eq + Ord + Hash + fmt::Debug {
    /// The reserved null/invalid handle
    const NULL: Self;

    /// Build a handle from its raw id
    fn from_raw(id: u64) -> Self;

    /// Raw id (0 for the null handle)
    fn raw(self) -> u64;

    /// Whether this is the null handle
    fn is_null(self) -> bool {
        self.raw() == 0
    }

    /// Whether this handle can refer to something (the "true" value)
    fn is_valid(self) -> bool {
        !self.is_null()
    }

    /// 1-based position in allocation order within its generation
    fn index(self) -> u64 {
        self.raw() & INDEX_MASK
    }

    /// Allocator generation the handle was issued in
    fn generation(self) -> u32 {
        (self.raw() >> INDEX_BITS) as u32
    }
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(u64);

        impl $name {
            /// The null handle
            pub const NULL: Self = <Self as Handle>::NULL;
        }

        impl Handle for $name {
            const NULL: Self = Self(0);

            fn from_raw(id: u64) -> Self {
                Self(id)
            }

            fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match (self.is_null(), self.generation()) {
                    (true, _) => write!(f, concat!($prefix, "(null)")),
                    (false, 0) => write!(f, concat!($prefix, "({})"), self.index()),
                    (false, g) => write!(f, concat!($prefix, "({}, gen {})"), self.index(), g),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.generation() {
                    0 => write!(f, concat!($prefix, "#{}"), self.index()),
                    g => write!(f, concat!($prefix, "#{}/g{}"), self.index(), g),
                }
            }
        }
    };
}

define_handle!(
    /// Identifies a pass declared in a `RenderGraph`
    PassHandle, "pass"
);

define_handle!(
    /// Identifies a logical resource declared in a `RenderGraph`
    ResourceHandle, "resource"
);

define_handle!(
    /// Identifies an object stored in a `Registry`
    AssetHandle, "asset"
);

/// Hands out monotonically increasing handles.
///
/// Unlike a slot allocator, indices are never recycled: the first handle
/// has index 1, then 2, 3, ... until `reset()` brings the counter back to
/// zero and moves to the next generation. No handle is ever issued twice by
/// the same allocator.
#[derive(Debug)]
pub struct HandleAllocator<H: Handle> {
    last_index: u64,
    generation: u32,
    _marker: PhantomData<H>,
}

impl<H: Handle> HandleAllocator<H> {
    /// Create an allocator whose first handle will have index 1
    pub fn new() -> Self {
        Self {
            last_index: 0,
            generation: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate the next handle
    pub fn allocate(&mut self) -> H {
        debug_assert!(self.last_index < INDEX_MASK, "handle index space exhausted");
        self.last_index += 1;
        self.make(self.last_index)
    }

    /// The handle the next `allocate()` will return
    pub fn peek_next(&self) -> H {
        self.make(self.last_index + 1)
    }

    /// Number of handles allocated since creation or the last reset
    pub fn allocated(&self) -> u64 {
        self.last_index
    }

    /// Current generation
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Restart numbering from 1 in a new generation
    ///
    /// With the generation space exhausted the index keeps counting in the
    /// last generation, so earlier handles still never come back.
    pub fn reset(&mut self) {
        if let Some(next) = self.generation.checked_add(1) {
            self.generation = next;
            self.last_index = 0;
        }
    }

    #[cfg(test)]
    pub(crate) fn at_generation(generation: u32) -> Self {
        Self {
            generation,
            ..Self::new()
        }
    }

    fn make(&self, index: u64) -> H {
        H::from_raw(((self.generation as u64) << INDEX_BITS) | index)
    }
}

impl<H: Handle> Default for HandleAllocator<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
