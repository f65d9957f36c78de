use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("unknown identifier '{name}'")]
    UnknownIdentifier { name: String },

    #[error("unknown type '{name}'")]
    UnknownType { name: String },
}
