//! A single lexical scope.

use crate::ir::StatementOrExpression;
use hype_core::{ScopeId, TypeId};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// A scope in the scope tree. Lookups that miss here continue in `parent`.
#[derive(Debug, Default)]
pub struct Scope {
    /// The enclosing scope (None for the global scope).
    pub parent: Option<ScopeId>,
    /// Child scopes in creation order. Detached temporary scopes are absent
    /// until committed.
    pub children: Vec<ScopeId>,
    /// Identifier bindings. A later binding of the same name replaces the
    /// earlier one.
    pub ident_types: FxHashMap<String, TypeId>,
    /// Named types declared in this scope.
    pub types: IndexMap<String, TypeId>,
    /// Placeholders for type names used here before they were declared.
    pub unresolved_types: IndexMap<String, TypeId>,
    /// Registered statements in source order.
    pub statements: Vec<StatementOrExpression>,
    next_ident: u32,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            ..Self::default()
        }
    }

    /// A fresh synthetic identifier. Never repeats within this scope.
    pub fn new_ident(&mut self) -> String {
        let ident = format!("ident{}", self.next_ident);
        self.next_ident += 1;
        ident
    }
}
