//! Objects: property bags with a prototype link and a scope link.
//!
//! The arena stores [`ObjectValue`] records. Callers never touch a record
//! directly; they go through an [`ObjectRef`] (read) or [`ObjectMut`]
//! (write) view obtained from the engine, because following a prototype or
//! scope handle needs the arena.
//!
//! Two independent links hang off every object:
//!
//! - `prototype` feeds member resolution: a local miss continues with the
//!   prototype's full lookup.
//! - `scope` is the [`Environment`] parent: a miss after member resolution
//!   continues in the enclosing scope.
//!
//! Only the prototype axis is kept acyclic. See [`ObjectMut::set_prototype`].
//! Scope links may form cycles; lookups walk the graph iteratively and
//! enter each object once.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use crate::arena::ObjectArena;
use crate::engine::Engine;
use crate::environment::Environment;
use crate::error::PrototypeError;
use crate::function::FunctionData;
use crate::id::{FunctionId, ObjectId};
use crate::value::Value;

/// Property name that reads the prototype link instead of a member.
pub const PROTO_PROPERTY: &str = "__proto__";

/// Own properties of an object, in insertion order.
///
/// Overwriting a key keeps its slot; removing a key closes the gap.
#[derive(Clone, Debug, Default)]
pub(crate) struct Members {
    slots: FxHashMap<Box<str>, usize>,
    entries: Vec<(Box<str>, Value)>,
}

impl Members {
    #[inline]
    pub(crate) fn get(&self, name: &str) -> Option<Value> {
        self.slots.get(name).map(|&slot| self.entries[slot].1)
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        if let Some(&slot) = self.slots.get(name) {
            self.entries[slot].1 = value;
            return;
        }
        self.slots.insert(name.into(), self.entries.len());
        self.entries.push((name.into(), value));
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Value> {
        let slot = self.slots.remove(name)?;
        let (_, value) = self.entries.remove(slot);
        for (shifted, (key, _)) in self.entries.iter().enumerate().skip(slot) {
            if let Some(index) = self.slots.get_mut(key) {
                *index = shifted;
            }
        }
        Some(value)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.entries.iter().map(|(name, value)| (&**name, *value))
    }
}

/// Arena record of one object (or function).
#[derive(Clone, Debug, Default)]
pub(crate) struct ObjectValue {
    /// Free-form tag such as `"Array"` or `"Global"`; empty means anonymous.
    pub(crate) class_name: String,
    pub(crate) prototype: Option<ObjectId>,
    pub(crate) scope: Option<ObjectId>,
    pub(crate) members: Members,
    /// Present iff this object is a function.
    pub(crate) function: Option<FunctionData>,
}

impl ObjectValue {
    pub(crate) fn with_prototype(prototype: Option<ObjectId>) -> Self {
        Self {
            prototype,
            ..Self::default()
        }
    }
}

/// Check that `object` may inherit from `candidate`.
///
/// Depth-first walk over `candidate`'s prototype chain with an explicit
/// stack and an identity-keyed visited set. Fails if the walk reaches
/// `object`.
pub(crate) fn check_prototype(
    arena: &ObjectArena,
    object: ObjectId,
    candidate: ObjectId,
) -> Result<(), PrototypeError> {
    if candidate == object {
        return Err(PrototypeError::SelfReference { object });
    }

    let mut visited = FxHashSet::default();
    let mut stack = vec![candidate];
    while let Some(current) = stack.pop() {
        if current == object {
            return Err(PrototypeError::Cycle { object, candidate });
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(next) = arena.get(current).prototype {
            stack.push(next);
        }
    }
    Ok(())
}

/// Returns `true` if a lookup starting at `from` can reach `target`
/// through any mix of prototype and scope links.
pub(crate) fn lookup_reaches(arena: &ObjectArena, from: ObjectId, target: ObjectId) -> bool {
    let mut visited = FxHashSet::default();
    let mut stack = vec![from];
    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        let record = arena.get(current);
        stack.extend(record.prototype);
        stack.extend(record.scope);
    }
    false
}

/// Read-only view of an arena object.
#[derive(Copy, Clone)]
pub struct ObjectRef<'e> {
    engine: &'e Engine,
    id: ObjectId,
}

impl<'e> ObjectRef<'e> {
    pub(crate) fn new(engine: &'e Engine, id: ObjectId) -> Self {
        Self { engine, id }
    }

    #[inline]
    fn record(&self) -> &'e ObjectValue {
        self.engine.arena().get(self.id)
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    pub fn class_name(&self) -> &'e str {
        &self.record().class_name
    }

    pub fn prototype(&self) -> Option<ObjectId> {
        self.record().prototype
    }

    pub fn scope(&self) -> Option<ObjectId> {
        self.record().scope
    }

    pub fn is_function(&self) -> bool {
        self.record().function.is_some()
    }

    /// Function handle, if this object is a function.
    pub fn as_function(&self) -> Option<FunctionId> {
        self.is_function().then(|| FunctionId::new(self.id))
    }

    /// This object as a `Value`, tagged `Function` when it is one.
    pub fn as_value(&self) -> Value {
        self.engine.value_of(self.id)
    }

    /// Own member only; no prototype walk.
    pub fn member(&self, name: &str) -> Option<Value> {
        self.record().members.get(name)
    }

    /// Own members in insertion order.
    pub fn members(&self) -> impl Iterator<Item = (&'e str, Value)> + 'e {
        self.record().members.iter()
    }

    pub fn member_count(&self) -> usize {
        self.record().members.len()
    }

    /// Property read as seen by script code.
    ///
    /// `"__proto__"` answers the prototype link even when a member of that
    /// name exists. Functions answer `"length"` with a number before
    /// anything else. Everything else goes through
    /// [`lookup_member`](Environment::lookup_member).
    pub fn property(&self, name: &str) -> Option<Value> {
        if name == "length" && self.is_function() {
            return Some(Value::Number);
        }
        if name == PROTO_PROPERTY {
            return self.prototype().map(|proto| self.engine.value_of(proto));
        }
        self.lookup_member(name)
    }

    /// Returns `true` if `other` is on this object's prototype chain.
    pub fn inherits_from(&self, other: ObjectId) -> bool {
        self.prototype_chain().any(|proto| proto == other)
    }

    /// Prototype chain, nearest first. Does not include this object.
    pub fn prototype_chain(&self) -> impl Iterator<Item = ObjectId> + 'e {
        let arena = self.engine.arena();
        std::iter::successors(self.prototype(), move |&current| arena.get(current).prototype)
    }

    /// Depth-first resolution over both links, without recursion.
    ///
    /// Order per object: own member, then the prototype's full lookup, then
    /// the scope (when `with_scope`). An object is entered at most once per
    /// mode, so cyclic scope links terminate and acyclic chains of any
    /// depth resolve.
    fn resolve(&self, name: &str, with_scope: bool) -> Option<Value> {
        let arena = self.engine.arena();
        let mut visited = FxHashSet::default();
        let mut pending = vec![(self.id, with_scope)];
        while let Some((current, follow_scope)) = pending.pop() {
            if !visited.insert((current, follow_scope)) {
                continue;
            }
            let record = arena.get(current);
            if let Some(found) = record.members.get(name) {
                return Some(found);
            }
            // Pushed first so it is popped after the prototype's lookup.
            if let (true, Some(scope)) = (follow_scope, record.scope) {
                pending.push((scope, true));
            }
            if let Some(proto) = record.prototype {
                pending.push((proto, true));
            }
        }
        None
    }
}

impl<'e> Environment for ObjectRef<'e> {
    type Parent = ObjectRef<'e>;

    fn parent(&self) -> Option<ObjectRef<'e>> {
        self.scope().map(|scope| ObjectRef::new(self.engine, scope))
    }

    /// Own member first, then the prototype's full lookup.
    fn lookup_member(&self, name: &str) -> Option<Value> {
        self.resolve(name, false)
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.resolve(name, true)
    }
}

impl std::fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRef")
            .field("id", &self.id)
            .field("class_name", &self.class_name())
            .field("prototype", &self.prototype())
            .finish_non_exhaustive()
    }
}

/// Mutable view of an arena object.
///
/// Setters return `&mut Self` so several can be chained.
pub struct ObjectMut<'e> {
    engine: &'e mut Engine,
    id: ObjectId,
}

impl<'e> ObjectMut<'e> {
    pub(crate) fn new(engine: &'e mut Engine, id: ObjectId) -> Self {
        Self { engine, id }
    }

    #[inline]
    fn record(&mut self) -> &mut ObjectValue {
        self.engine.arena_mut().get_mut(self.id)
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn set_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.record().class_name = class_name.into();
        self
    }

    /// Insert or overwrite an own member.
    pub fn set_property(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        self.record().members.insert(name, value);
        self
    }

    /// Remove an own member. No-op if absent.
    pub fn remove_property(&mut self, name: &str) -> &mut Self {
        self.record().members.remove(name);
        self
    }

    /// Set the environment parent.
    ///
    /// Not refused even when it closes a lookup cycle; lookups skip objects
    /// they already visited. A closing link is reported with a warning.
    pub fn set_scope(&mut self, scope: Option<ObjectId>) -> &mut Self {
        if let Some(scope) = scope {
            if lookup_reaches(self.engine.arena(), scope, self.id) {
                warn!(object = %self.id, %scope, "scope link closes a lookup cycle");
            }
        }
        self.record().scope = scope;
        self
    }

    /// Set the prototype, refusing self-reference and cycles.
    ///
    /// `None` is always accepted.
    pub fn try_set_prototype(&mut self, prototype: Option<ObjectId>) -> Result<(), PrototypeError> {
        if let Some(candidate) = prototype {
            check_prototype(self.engine.arena(), self.id, candidate)?;
        }
        self.record().prototype = prototype;
        Ok(())
    }

    /// Like [`try_set_prototype`](Self::try_set_prototype), but a refusal
    /// only emits a warning and leaves the old prototype in place.
    pub fn set_prototype(&mut self, prototype: Option<ObjectId>) -> &mut Self {
        if let Err(error) = self.try_set_prototype(prototype) {
            warn!(%error, "invalid prototype");
        }
        self
    }

    /// Reborrow as a read view.
    pub fn view(&self) -> ObjectRef<'_> {
        ObjectRef::new(self.engine, self.id)
    }
}
