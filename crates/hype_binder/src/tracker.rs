//! Tracking the current scope during registration.

use crate::error::ScopeError;
use crate::ir::{Statement, StatementOrExpression};
use crate::prelude;
use crate::tree::ScopeTree;
use hype_core::{ScopeId, TypeId};
use hype_types::{TypeTable, ANY};
use tracing::trace;

/// The scope tree plus the scope registration is currently in.
#[derive(Debug)]
pub struct ScopeTracker {
    tree: ScopeTree,
    current: ScopeId,
}

impl ScopeTracker {
    /// A tracker positioned at the root of `tree`.
    pub fn new(tree: ScopeTree) -> Self {
        let current = tree.root();
        Self { tree, current }
    }

    /// A tracker over a fresh tree whose global scope holds the built-in types
    /// and the `console` object.
    pub fn with_prelude(table: &mut TypeTable) -> Self {
        let mut tree = ScopeTree::new();
        prelude::install(&mut tree, table);
        Self::new(tree)
    }

    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ScopeTree {
        &mut self.tree
    }

    pub fn into_tree(self) -> ScopeTree {
        self.tree
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn root(&self) -> ScopeId {
        self.tree.root()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Create a child of the current scope and make it current.
    pub fn enter_scope(&mut self) -> ScopeId {
        let child = self.tree.add_child(self.current);
        trace!(parent = %self.current, %child, "entered scope");
        self.current = child;
        child
    }

    /// Create a detached child of the current scope and make it current.
    pub fn enter_detached_scope(&mut self) -> ScopeId {
        let child = self.tree.add_detached(self.current);
        trace!(parent = %self.current, %child, "entered temporary scope");
        self.current = child;
        child
    }

    /// Make the parent of the current scope current. Stays put at the root.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.tree.get(self.current).parent {
            self.current = parent;
        }
    }

    /// Make `scope` current, returning the previously current scope.
    pub fn switch_to(&mut self, scope: ScopeId) -> ScopeId {
        std::mem::replace(&mut self.current, scope)
    }

    /// List a temporary scope among its parent's children.
    pub fn commit(&mut self, scope: ScopeId) {
        self.tree.attach(scope);
    }

    // ========================================================================
    // Bindings
    // ========================================================================

    /// Bind `name` in the current scope, replacing any earlier binding there.
    pub fn add_identifier(&mut self, name: &str, ty: TypeId) {
        self.tree
            .get_mut(self.current)
            .ident_types
            .insert(name.to_string(), ty);
    }

    pub fn ident_type(&self, name: &str) -> Result<TypeId, ScopeError> {
        self.tree.ident_type(self.current, name)
    }

    /// Declare a named type in the current scope.
    pub fn add_type(&mut self, name: &str, ty: TypeId) {
        self.tree.get_mut(self.current).types.insert(name.to_string(), ty);
    }

    /// Look up a declared type name without creating anything.
    pub fn named_type(&self, table: &TypeTable, name: &str) -> Result<TypeId, ScopeError> {
        if name == ANY {
            return Ok(table.any_type);
        }
        self.tree.named_type(self.current, name)
    }

    /// The type named `name`. A name that is not declared yet gets a
    /// placeholder in the current scope, shared by every use of the name there,
    /// to be resolved once registration has seen the whole program.
    pub fn type_from_name(&mut self, table: &mut TypeTable, name: &str) -> TypeId {
        if let Ok(ty) = self.named_type(table, name) {
            return ty;
        }

        let scope = self.tree.get_mut(self.current);
        if let Some(&placeholder) = scope.unresolved_types.get(name) {
            return placeholder;
        }
        let placeholder = table.add_placeholder(name);
        scope.unresolved_types.insert(name.to_string(), placeholder);
        trace!(name, %placeholder, scope = %self.current, "deferred type name");
        placeholder
    }

    /// Follow a reference one hop to the type it names. Other types are
    /// returned with their redirects followed.
    pub fn resolve_type(&self, table: &TypeTable, ty: TypeId) -> Result<TypeId, ScopeError> {
        self.tree.resolve_type(table, self.current, ty)
    }

    /// A fresh synthetic identifier from the current scope.
    pub fn new_ident(&mut self) -> String {
        self.tree.get_mut(self.current).new_ident()
    }

    /// Record a registered statement in the current scope.
    pub fn add_statement(&mut self, kind: Statement) -> &StatementOrExpression {
        let scope = self.current;
        let statements = &mut self.tree.get_mut(scope).statements;
        statements.push(StatementOrExpression { kind, scope });
        &statements[statements.len() - 1]
    }
}

/// Access to a [`ScopeTracker`] for code that carries more state alongside it.
///
/// The `within_*` helpers move the current scope for the duration of `op` and
/// restore it afterwards, whether `op` succeeds or not.
pub trait ScopeContext: Sized {
    fn scopes(&mut self) -> &mut ScopeTracker;

    /// Run `op` with `scope` as the current scope.
    fn within_scope<T, E>(
        &mut self,
        scope: ScopeId,
        op: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        let previous = self.scopes().switch_to(scope);
        let result = op(self);
        self.scopes().switch_to(previous);
        result
    }

    /// Run `op` in a new child of the current scope.
    fn within_new_scope<T, E>(
        &mut self,
        op: impl FnOnce(&mut Self, ScopeId) -> Result<T, E>,
    ) -> Result<T, E> {
        let previous = self.scopes().current();
        let scope = self.scopes().enter_scope();
        let result = op(self, scope);
        self.scopes().switch_to(previous);
        result
    }

    /// Run `op` in a detached child of the current scope. The scope is
    /// committed to the tree only if `op` succeeds.
    fn within_temp_scope<T, E>(
        &mut self,
        op: impl FnOnce(&mut Self, ScopeId) -> Result<T, E>,
    ) -> Result<T, E> {
        let previous = self.scopes().current();
        let scope = self.scopes().enter_detached_scope();
        let result = op(self, scope);
        self.scopes().switch_to(previous);
        if result.is_ok() {
            self.scopes().commit(scope);
        }
        result
    }
}

impl ScopeContext for ScopeTracker {
    fn scopes(&mut self) -> &mut ScopeTracker {
        self
    }
}
