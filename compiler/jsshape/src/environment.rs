//! Name resolution with parent delegation.
//!
//! [`Environment`] is the capability shared by objects (whose parent is
//! their scope link) and by plain binding frames such as [`LexicalScope`].
//! Lookup is a linked search: local resolution first, then the parent.

use rustc_hash::FxHashMap;

use crate::object::ObjectRef;
use crate::value::Value;

/// Something that resolves names, delegating to a parent on a miss.
pub trait Environment {
    /// The parent's type. Object environments are parented by objects.
    type Parent: Environment;

    /// Enclosing environment, if any.
    fn parent(&self) -> Option<Self::Parent>;

    /// Local resolution only. Defaults to nothing.
    fn lookup_member(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Local resolution, then the parent chain.
    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(found) = self.lookup_member(name) {
            return Some(found);
        }
        self.parent()?.lookup(name)
    }
}

/// A frame of name bindings that is not itself an object.
///
/// Models a function body or block that an analysis caller opens on top
/// of an object environment (usually the global object): bindings defined
/// here shadow the parent's properties.
#[derive(Clone, Debug)]
pub struct LexicalScope<'e> {
    bindings: FxHashMap<String, Value>,
    parent: Option<ObjectRef<'e>>,
}

impl<'e> LexicalScope<'e> {
    /// Create an empty scope with no parent.
    pub fn new() -> Self {
        LexicalScope {
            bindings: FxHashMap::default(),
            parent: None,
        }
    }

    /// Create an empty scope whose misses continue in `parent`.
    pub fn with_parent(parent: ObjectRef<'e>) -> Self {
        LexicalScope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name`, replacing any earlier binding in this frame.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for LexicalScope<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'e> Environment for LexicalScope<'e> {
    type Parent = ObjectRef<'e>;

    fn parent(&self) -> Option<ObjectRef<'e>> {
        self.parent
    }

    fn lookup_member(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).copied()
    }
}
