//! hype_binder: Scopes and the typed statement tree.
//!
//! Scopes form a tree stored in a [`ScopeTree`] arena. Each scope owns its
//! identifier bindings, its named types, placeholders for type names that
//! were used before being declared, and the statements registered in it.
//! The [`ScopeTracker`] keeps the current position in the tree while the
//! registration pass walks the source.

pub mod error;
pub mod ir;
pub mod prelude;
pub mod scope;
pub mod tracker;
pub mod tree;

pub use error::ScopeError;
pub use ir::*;
pub use scope::Scope;
pub use tracker::{ScopeContext, ScopeTracker};
pub use tree::{ScopeTree, UnresolvedType};
