//! The type arena.
//!
//! Types are stored in a TypeTable and referenced by TypeId. A placeholder
//! that gets resolved is not replaced in place; it records a redirect to its
//! target, and lookups follow redirects with [`TypeTable::deref`].

use crate::error::TypeError;
use crate::member_tracker::MemberTracker;
use crate::types::*;
use hype_core::{Arena, FunctionId, TypeId};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::trace;

/// The type table stores all types and functions.
#[derive(Debug)]
pub struct TypeTable {
    types: Arena<TypeId, TypeSpec>,
    functions: Arena<FunctionId, Function>,
    // Well-known types
    pub string_type: TypeId,
    pub number_type: TypeId,
    pub void_type: TypeId,
    pub null_type: TypeId,
    pub undefined_type: TypeId,
    /// The shared `Reference("any")`.
    pub any_type: TypeId,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self {
            types: Arena::with_capacity(256),
            functions: Arena::new(),
            string_type: TypeId(0),
            number_type: TypeId(1),
            void_type: TypeId(2),
            null_type: TypeId(3),
            undefined_type: TypeId(4),
            any_type: TypeId(5),
        };

        for primitive in Primitive::ALL {
            table.add(TypeKind::Primitive(primitive));
        }
        table.add(TypeKind::Reference(ANY.to_string()));

        table
    }

    /// Add a new type to the table and return its ID.
    pub fn add(&mut self, kind: TypeKind) -> TypeId {
        self.types.alloc(TypeSpec::new(kind))
    }

    /// Add an unresolved placeholder.
    pub fn add_placeholder(&mut self, name: impl Into<String>) -> TypeId {
        let id = self.add(TypeKind::Placeholder { name: name.into() });
        trace!(%id, "placeholder created");
        id
    }

    /// A reference to a named type. `any` always maps to [`any_type`](Self::any_type).
    pub fn add_reference(&mut self, name: &str) -> TypeId {
        if name == ANY {
            return self.any_type;
        }
        self.add(TypeKind::Reference(name.to_string()))
    }

    /// Add an empty object type together with its member tracker.
    pub fn add_object(&mut self) -> (TypeId, Arc<MemberTracker>) {
        let members = Arc::new(MemberTracker::new());
        let id = self.add(TypeKind::Object(Arc::clone(&members)));
        (id, members)
    }

    /// Add an empty interface together with its member tracker.
    pub fn add_interface(&mut self, name: &str) -> (TypeId, Arc<MemberTracker>) {
        let members = Arc::new(MemberTracker::new());
        let id = self.add(TypeKind::Interface {
            name: name.to_string(),
            members: Arc::clone(&members),
        });
        (id, members)
    }

    /// Add a function record and the function type pointing at it.
    pub fn add_function(&mut self, function: Function) -> (FunctionId, TypeId) {
        let function_id = self.functions.alloc(function);
        let type_id = self.add(TypeKind::Function(function_id));
        (function_id, type_id)
    }

    pub fn primitive(&self, primitive: Primitive) -> TypeId {
        match primitive {
            Primitive::String => self.string_type,
            Primitive::Number => self.number_type,
            Primitive::Void => self.void_type,
            Primitive::Null => self.null_type,
            Primitive::Undefined => self.undefined_type,
        }
    }

    /// Get a type by its ID, without following redirects.
    pub fn get(&self, id: TypeId) -> &TypeSpec {
        self.types.get(id)
    }

    /// The kind of the type `id` ultimately stands for.
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.types.get(self.deref(id)).kind
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        self.functions.get(id)
    }

    pub fn function_mut(&mut self, id: FunctionId) -> &mut Function {
        self.functions.get_mut(id)
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions.iter()
    }

    /// The function behind `id`, if it is a function type.
    pub fn as_function(&self, id: TypeId) -> Option<FunctionId> {
        match self.kind(id) {
            TypeKind::Function(function) => Some(*function),
            _ => None,
        }
    }

    /// The member tracker behind `id`, if it is an object or interface.
    pub fn members_of(&self, id: TypeId) -> Option<&Arc<MemberTracker>> {
        match self.kind(id) {
            TypeKind::Object(members) | TypeKind::Interface { members, .. } => Some(members),
            _ => None,
        }
    }

    /// The arms of a union, or the type itself.
    pub fn arms(&self, id: TypeId) -> Vec<TypeId> {
        let id = self.deref(id);
        match &self.types.get(id).kind {
            TypeKind::Union(arms) => arms.clone(),
            _ => vec![id],
        }
    }

    /// Follow redirects to the type `id` ultimately stands for.
    pub fn deref(&self, id: TypeId) -> TypeId {
        let mut current = id;
        while let Some(next) = self.types.get(current).redirect {
            current = next;
        }
        current
    }

    /// Whether `id` stands for a placeholder that has not been resolved.
    pub fn is_pending(&self, id: TypeId) -> bool {
        !self.types.get(self.deref(id)).resolved
    }

    pub fn is_any(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Reference(name) if name == ANY)
    }

    /// Resolve `placeholder` by redirecting it to `target`.
    pub fn resolve_placeholder(
        &mut self,
        placeholder: TypeId,
        target: TypeId,
    ) -> Result<(), TypeError> {
        if self.types.get(placeholder).resolved {
            return Err(TypeError::AlreadyResolved { id: placeholder });
        }
        // The placeholder has no redirect yet, so a chain from `target` that
        // reaches it must end at it, or at a union holding it as an arm.
        if self.deref(target) == placeholder || self.union_holds(target, placeholder) {
            return Err(TypeError::CyclicRedirect {
                from: placeholder,
                to: target,
            });
        }

        let spec = self.types.get_mut(placeholder);
        spec.redirect = Some(target);
        spec.resolved = true;
        trace!(%placeholder, %target, "placeholder resolved");
        Ok(())
    }

    /// Whether `needle` is an arm of `id`, looking through nested unions.
    fn union_holds(&self, id: TypeId, needle: TypeId) -> bool {
        let mut stack = vec![id];
        let mut seen = FxHashSet::default();
        while let Some(current) = stack.pop() {
            let current = self.deref(current);
            if !seen.insert(current) {
                continue;
            }
            if let TypeKind::Union(arms) = &self.types.get(current).kind {
                for &arm in arms {
                    if self.deref(arm) == needle {
                        return true;
                    }
                    stack.push(arm);
                }
            }
        }
        false
    }

    /// Placeholders that have not been resolved, in creation order.
    pub fn pending_placeholders(&self) -> Vec<TypeId> {
        self.types
            .iter()
            .filter(|(_, spec)| !spec.resolved)
            .map(|(id, _)| id)
            .collect()
    }

    /// Combine a function's return type so far with another `return`'s type.
    ///
    /// Arms are kept distinct under structural equality. Pending placeholders
    /// only compare equal to themselves, so they are never merged with another
    /// arm.
    pub fn widen(&mut self, existing: TypeId, new: TypeId) -> TypeId {
        if self.equals(existing, new) {
            return existing;
        }

        let mut arms = self.arms(existing);
        for candidate in self.arms(new) {
            if !arms.iter().any(|&arm| self.equals(arm, candidate)) {
                arms.push(candidate);
            }
        }

        match arms.as_slice() {
            [single] => *single,
            _ => self.add(TypeKind::Union(arms)),
        }
    }

    /// Drop `arm` from the union `id`, in place, so every reference to the
    /// union sees the narrowed type. A union left with one arm redirects to
    /// it. `None` when nothing but `arm` remains.
    pub fn remove_arm(&mut self, id: TypeId, arm: TypeId) -> Option<TypeId> {
        let id = self.deref(id);
        let TypeKind::Union(arms) = &self.types.get(id).kind else {
            return (id != arm).then_some(id);
        };
        let rest: Vec<TypeId> = arms.iter().copied().filter(|&a| self.deref(a) != arm).collect();
        if rest.len() == arms.len() {
            return Some(id);
        }

        let spec = self.types.get_mut(id);
        match rest.as_slice() {
            [] => None,
            [single] => {
                spec.redirect = Some(*single);
                Some(*single)
            }
            _ => {
                spec.kind = TypeKind::Union(rest);
                Some(id)
            }
        }
    }

    /// Whether every type in `left` equals some type in `right`.
    pub fn contains_all_type_specs(&self, left: &[TypeId], right: &[TypeId]) -> bool {
        left.iter().all(|&l| right.iter().any(|&r| self.equals(l, r)))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
