//! Arena holding every heap object of one engine.
//!
//! Objects are appended and never individually freed. Handles stay valid
//! for the arena's lifetime; dropping the arena releases everything at once.

use crate::id::ObjectId;
use crate::object::ObjectValue;

#[derive(Debug, Default)]
pub(crate) struct ObjectArena {
    objects: Vec<ObjectValue>,
}

impl ObjectArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Move `object` into the arena and return its handle.
    pub(crate) fn alloc(&mut self, object: ObjectValue) -> ObjectId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "an analysis engine never approaches u32::MAX objects"
        )]
        let id = ObjectId::from_raw(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    /// # Panics
    /// Panics if `id` was not produced by this arena.
    #[inline]
    pub(crate) fn get(&self, id: ObjectId) -> &ObjectValue {
        &self.objects[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not produced by this arena.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: ObjectId) -> &mut ObjectValue {
        &mut self.objects[id.index()]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.objects.len()
    }
}
