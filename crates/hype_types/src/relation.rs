//! Structural type relations.
//!
//! `equals` asks whether two types are the same shape. `satisfies` asks whether
//! a value of one type can be used where the other is expected: extra members
//! are allowed, optional members may be missing, and anything satisfies `any`.
//!
//! Recursive types are compared coinductively. A pair that is already being
//! compared further up the stack is assumed to hold.

use crate::table::TypeTable;
use crate::types::*;
use hype_core::{FunctionId, TypeId};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Mode {
    Exact,
    Loose,
}

type Assumed = FxHashSet<(TypeId, TypeId, Mode)>;

impl TypeTable {
    /// Whether `a` is a reference naming `b`: a reference with the same name,
    /// or an interface with that name.
    pub fn refers_to(&self, a: TypeId, b: TypeId) -> bool {
        let TypeKind::Reference(name) = self.kind(a) else {
            return false;
        };
        match self.kind(b) {
            TypeKind::Reference(other) => name == other,
            TypeKind::Interface { name: other, .. } => name == other,
            _ => false,
        }
    }

    /// Whether `a` and `b` are structurally identical.
    pub fn equals(&self, a: TypeId, b: TypeId) -> bool {
        self.relate(a, b, Mode::Exact, &mut Assumed::default())
    }

    /// Whether a value of type `a` can be used where `b` is expected.
    pub fn satisfies(&self, a: TypeId, b: TypeId) -> bool {
        self.relate(a, b, Mode::Loose, &mut Assumed::default())
    }

    fn relate(&self, a: TypeId, b: TypeId, mode: Mode, assumed: &mut Assumed) -> bool {
        if a == b {
            return true;
        }
        let a = self.deref(a);
        let b = self.deref(b);
        if a == b {
            return true;
        }

        if mode == Mode::Loose && self.is_any(b) {
            return true;
        }
        if self.refers_to(a, b) || self.refers_to(b, a) {
            return true;
        }

        if !assumed.insert((a, b, mode)) {
            return true;
        }
        let result = self.relate_structure(a, b, mode, assumed);
        assumed.remove(&(a, b, mode));
        result
    }

    fn relate_structure(&self, a: TypeId, b: TypeId, mode: Mode, assumed: &mut Assumed) -> bool {
        match (self.kind(a), self.kind(b)) {
            (TypeKind::Union(left), TypeKind::Union(right)) if mode == Mode::Exact => {
                left.len() == right.len()
                    && left
                        .iter()
                        .all(|&l| right.iter().any(|&r| self.relate(l, r, mode, assumed)))
            }
            (TypeKind::Union(_), _) if mode == Mode::Exact => false,
            (_, TypeKind::Union(_)) if mode == Mode::Exact => false,
            (TypeKind::Union(left), _) => left.iter().all(|&l| self.relate(l, b, mode, assumed)),
            (_, TypeKind::Union(right)) => right.iter().any(|&r| self.relate(a, r, mode, assumed)),

            (TypeKind::Primitive(l), TypeKind::Primitive(r)) => l == r,

            (
                TypeKind::Object(left) | TypeKind::Interface { members: left, .. },
                TypeKind::Object(right) | TypeKind::Interface { members: right, .. },
            ) => self.relate_members(&left.members(), &right.members(), mode, assumed),

            (TypeKind::Function(l), TypeKind::Function(r)) => {
                self.relate_functions(*l, *r, mode, assumed)
            }

            _ => false,
        }
    }

    /// Compare a candidate's members against a target's.
    fn relate_members(
        &self,
        members: &[Member],
        targets: &[Member],
        mode: Mode,
        assumed: &mut Assumed,
    ) -> bool {
        if mode == Mode::Exact && members.len() != targets.len() {
            return false;
        }

        targets.iter().all(|target| {
            let Some(member) = members.iter().find(|m| m.name() == target.name()) else {
                return mode == Mode::Loose && target.is_optional();
            };

            match (member, target) {
                (
                    Member::Field { ty, optional, .. },
                    Member::Field {
                        ty: target_ty,
                        optional: target_optional,
                        ..
                    },
                ) => {
                    (mode == Mode::Loose || optional == target_optional)
                        && self.relate(*ty, *target_ty, mode, assumed)
                }
                (Member::Method { ty, .. }, Member::Method { ty: target_ty, .. }) => {
                    self.relate_returns(*ty, *target_ty, mode, assumed)
                }
                // A field holding a function can stand in for a method.
                (Member::Field { ty, .. }, Member::Method { ty: target_ty, .. })
                    if mode == Mode::Loose =>
                {
                    self.as_function(*ty).is_some()
                        && self.relate_returns(*ty, *target_ty, mode, assumed)
                }
                _ => false,
            }
        })
    }

    /// Compare the return types of two function types.
    fn relate_returns(&self, a: TypeId, b: TypeId, mode: Mode, assumed: &mut Assumed) -> bool {
        let (Some(left), Some(right)) = (self.as_function(a), self.as_function(b)) else {
            return false;
        };
        match (self.function(left).return_type(), self.function(right).return_type()) {
            (Some(l), Some(r)) => self.relate(l, r, mode, assumed),
            _ => false,
        }
    }

    fn relate_functions(
        &self,
        a: FunctionId,
        b: FunctionId,
        mode: Mode,
        assumed: &mut Assumed,
    ) -> bool {
        if a == b {
            return true;
        }
        let candidate = self.function(a);
        let target = self.function(b);

        let parameters_match = match mode {
            Mode::Exact => {
                candidate.parameters.len() == target.parameters.len()
                    && candidate
                        .parameters
                        .iter()
                        .zip(&target.parameters)
                        .all(|(c, t)| {
                            c.optional == t.optional && self.relate(c.ty, t.ty, mode, assumed)
                        })
            }
            // Parameters are contravariant: the candidate must accept whatever
            // the target would be called with.
            Mode::Loose => {
                candidate.parameters.len() <= target.parameters.len()
                    && candidate
                        .parameters
                        .iter()
                        .zip(&target.parameters)
                        .all(|(c, t)| self.relate(t.ty, c.ty, mode, assumed))
            }
        };
        if !parameters_match {
            return false;
        }

        match (candidate.return_type(), target.return_type()) {
            (Some(l), Some(r)) => self.relate(l, r, mode, assumed),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_relate_only_to_themselves() {
        let table = TypeTable::new();
        assert!(table.equals(table.string_type, table.string_type));
        assert!(!table.satisfies(table.string_type, table.number_type));
        assert!(!table.satisfies(table.null_type, table.undefined_type));
    }

    #[test]
    fn test_any_target_accepts_everything() {
        let table = TypeTable::new();
        assert!(table.satisfies(table.number_type, table.any_type));
        assert!(!table.equals(table.number_type, table.any_type));
    }

    #[test]
    fn test_reference_refers_to_interface() {
        let mut table = TypeTable::new();
        let (interface, _) = table.add_interface("Console");
        let reference = table.add_reference("Console");
        assert!(table.refers_to(reference, interface));
        assert!(!table.refers_to(interface, reference));
        assert!(table.equals(interface, reference));
    }
}
