//! Handle types shared across the compiler crates.

use crate::arena::ArenaId;
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(pub u32);

        impl ArenaId for $name {
            #[inline]
            fn from_index(index: usize) -> Self {
                $name(index as u32)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

define_id!(
    /// The type ID is a lightweight handle to a `TypeSpec` in the type table.
    TypeId
);

define_id!(
    /// Handle to a function signature/body record in the type table.
    FunctionId
);

define_id!(
    /// Handle to a lexical scope in the scope tree.
    ScopeId
);
