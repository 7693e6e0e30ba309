//! Handles into an engine's object arena.
//!
//! `ObjectId` and `FunctionId` are non-owning, `Copy` references. They are
//! only meaningful for the `Engine` that produced them; the arena owns the
//! objects and frees them all at once when the engine is dropped.

use std::fmt;

/// A 32-bit index into an engine's object arena.
///
/// Identity comparison is index comparison: two handles are the same
/// object iff they are equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Create a handle from a raw arena slot.
    #[inline]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena slot as a `usize` index.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Handle to an arena object that is known to carry a function payload.
///
/// Only the engine hands these out, so holding one proves the slot is a
/// function. Every function is also an object; see [`FunctionId::object_id`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FunctionId(ObjectId);

impl FunctionId {
    #[inline]
    pub(crate) const fn new(object: ObjectId) -> Self {
        Self(object)
    }

    /// The underlying object handle.
    #[inline]
    pub const fn object_id(self) -> ObjectId {
        self.0
    }
}

impl From<FunctionId> for ObjectId {
    fn from(function: FunctionId) -> Self {
        function.0
    }
}

impl fmt::Debug for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionId({})", self.0.raw())
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function#{}", self.0.raw())
    }
}

const _: () = assert!(std::mem::size_of::<ObjectId>() == 4);
const _: () = assert!(std::mem::size_of::<FunctionId>() == 4);
