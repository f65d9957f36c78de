//! hype_core: Core utilities for the hypescript compiler.
//!
//! Provides the typed index arenas and the id handles that the type model,
//! the scope tree and the registration pass use to refer to each other.

pub mod arena;
pub mod ids;

// Re-export commonly used types
pub use arena::{Arena, ArenaId};
pub use ids::{FunctionId, ScopeId, TypeId};
