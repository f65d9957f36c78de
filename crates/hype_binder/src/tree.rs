//! The scope arena.

use crate::error::ScopeError;
use crate::scope::Scope;
use hype_core::{Arena, ScopeId, TypeId};
use hype_types::{TypeKind, TypeTable, ANY};

/// A placeholder still waiting for its type name to be declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedType {
    pub scope: ScopeId,
    pub name: String,
    pub placeholder: TypeId,
}

/// All scopes of a program, rooted at the global scope.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Arena<ScopeId, Scope>,
    root: ScopeId,
}

impl ScopeTree {
    /// Maximum parent chain length, guarding lookups against a corrupt tree.
    const MAX_SCOPE_DEPTH: usize = 500;

    pub fn new() -> Self {
        let mut scopes = Arena::new();
        let root = scopes.alloc(Scope::new(None));
        Self { scopes, root }
    }

    /// The global scope.
    pub fn root(&self) -> ScopeId {
        self.root
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        self.scopes.get(id)
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        self.scopes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Create a scope under `parent` and list it among the parent's children.
    pub fn add_child(&mut self, parent: ScopeId) -> ScopeId {
        let child = self.add_detached(parent);
        self.attach(child);
        child
    }

    /// Create a scope whose lookups fall back to `parent`, without listing it
    /// among the parent's children.
    pub fn add_detached(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.alloc(Scope::new(Some(parent)))
    }

    /// List a detached scope among its parent's children.
    pub fn attach(&mut self, child: ScopeId) {
        let Some(parent) = self.get(child).parent else {
            return;
        };
        let children = &mut self.get_mut(parent).children;
        if !children.contains(&child) {
            children.push(child);
        }
    }

    /// Whether `scope` can be reached from the root through `children`.
    pub fn is_attached(&self, scope: ScopeId) -> bool {
        let mut current = scope;
        for _ in 0..Self::MAX_SCOPE_DEPTH {
            if current == self.root {
                return true;
            }
            let Some(parent) = self.get(current).parent else {
                return false;
            };
            if !self.get(parent).children.contains(&current) {
                return false;
            }
            current = parent;
        }
        false
    }

    /// `scope` followed by its ancestors up to the root.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), |&id| self.get(id).parent).take(Self::MAX_SCOPE_DEPTH)
    }

    pub fn lookup_ident(&self, scope: ScopeId, name: &str) -> Option<TypeId> {
        self.ancestors(scope)
            .find_map(|id| self.get(id).ident_types.get(name).copied())
    }

    /// The type bound to `name`, searching `scope` and then its ancestors.
    pub fn ident_type(&self, scope: ScopeId, name: &str) -> Result<TypeId, ScopeError> {
        self.lookup_ident(scope, name).ok_or_else(|| ScopeError::UnknownIdentifier {
            name: name.to_string(),
        })
    }

    pub fn lookup_type(&self, scope: ScopeId, name: &str) -> Option<TypeId> {
        self.ancestors(scope).find_map(|id| self.get(id).types.get(name).copied())
    }

    /// The named type `name`, searching `scope` and then its ancestors.
    pub fn named_type(&self, scope: ScopeId, name: &str) -> Result<TypeId, ScopeError> {
        self.lookup_type(scope, name).ok_or_else(|| ScopeError::UnknownType {
            name: name.to_string(),
        })
    }

    /// Follow a reference one hop to the type it names, looking the name up
    /// from `scope`. Other types are returned with their redirects followed.
    pub fn resolve_type(
        &self,
        table: &TypeTable,
        scope: ScopeId,
        ty: TypeId,
    ) -> Result<TypeId, ScopeError> {
        let ty = table.deref(ty);
        match table.kind(ty) {
            TypeKind::Reference(name) if name != ANY => {
                Ok(table.deref(self.named_type(scope, name)?))
            }
            _ => Ok(ty),
        }
    }

    /// Visit every attached scope depth-first, parents before children.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(ScopeId, &'a Scope)) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let scope = self.get(id);
            visit(id, scope);
            stack.extend(scope.children.iter().rev());
        }
    }

    /// Pending type-name placeholders across all attached scopes.
    pub fn unresolved_types(&self) -> Vec<UnresolvedType> {
        let mut pending = Vec::new();
        self.walk(|id, scope| {
            pending.extend(scope.unresolved_types.iter().map(|(name, &placeholder)| UnresolvedType {
                scope: id,
                name: name.clone(),
                placeholder,
            }));
        });
        pending
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_falls_back_to_parent() {
        let mut tree = ScopeTree::new();
        let child = tree.add_child(tree.root());
        tree.get_mut(tree.root()).ident_types.insert("x".into(), TypeId(3));

        assert_eq!(tree.ident_type(child, "x"), Ok(TypeId(3)));
        assert_eq!(
            tree.ident_type(child, "y"),
            Err(ScopeError::UnknownIdentifier { name: "y".into() })
        );
    }

    #[test]
    fn test_detached_scope_is_not_walked() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let attached = tree.add_child(root);
        let detached = tree.add_detached(root);

        let mut seen = Vec::new();
        tree.walk(|id, _| seen.push(id));
        assert_eq!(seen, vec![root, attached]);
        assert!(!tree.is_attached(detached));

        tree.attach(detached);
        tree.attach(detached);
        assert!(tree.is_attached(detached));
        assert_eq!(tree.get(root).children, vec![attached, detached]);
    }
}
