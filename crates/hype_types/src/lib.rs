//! hype_types: The structural type model.
//!
//! Types live in a [`TypeTable`] arena and are referenced by [`TypeId`]. The
//! table also owns every [`Function`] record. Objects and interfaces hold
//! their members in a shared [`MemberTracker`], which lets code that runs
//! ahead of an object literal's declaration order wait for a member to
//! appear.

pub mod display;
pub mod error;
pub mod member_tracker;
pub mod relation;
pub mod table;
pub mod types;

pub use error::{TypeError, WaitError};
pub use hype_core::{FunctionId, ScopeId, TypeId};
pub use member_tracker::{MemberTracker, MemberWait};
pub use table::TypeTable;
pub use types::*;
