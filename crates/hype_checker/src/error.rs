//! Registration and validation errors.

use hype_binder::ScopeError;
use hype_diagnostics::{messages, Diagnostic};
use hype_types::WaitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("unknown identifier '{name}'")]
    UnknownIdentifier { name: String },

    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    /// Type names that were used but never declared.
    #[error("failed to resolve types: {}", .names.join(", "))]
    UnresolvedTypes { names: Vec<String> },

    /// A `let` initializer does not satisfy the binding's annotation.
    #[error("{name} had a type annotation of {expected}, but the type was found to be {actual}")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// A function body returns something its annotation does not allow.
    #[error("function {name} declares return type {explicit}, but returns {implicit}")]
    FnRtnTypeMismatch {
        name: String,
        implicit: String,
        explicit: String,
    },

    #[error("too many args for fn {function}: expected at most {expected}, got {actual}")]
    TooManyArguments {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("missing arg for {parameter} in call to fn {function}")]
    MissingArgument { function: String, parameter: String },

    #[error("cannot use {actual} for arg {parameter} in call to {function}; expected {expected}")]
    ArgumentTypeMismatch {
        function: String,
        parameter: String,
        expected: String,
        actual: String,
    },

    #[error("{name} of type {ty} is not callable")]
    NotCallable { name: String, ty: String },

    #[error("member {member} does not exist on type {ty}")]
    UnknownMember { member: String, ty: String },

    #[error("duplicate member {member} in object literal")]
    DuplicateMember { member: String },

    /// `this.member` was used but the object literal never declares `member`.
    #[error("member {member} is referenced through 'this' but never declared")]
    UndeclaredSelfReference { member: String },

    #[error("timed out after {timeout_ms}ms waiting for member {member}")]
    MemberWaitTimedOut { member: String, timeout_ms: u64 },

    /// A member wait failed for a reason other than sealing or timing out.
    #[error("waiting for member {}: {source}", .source.member_name())]
    MemberWaitFailed {
        #[source]
        source: WaitError,
    },

    #[error("type {name} circularly references itself")]
    CyclicType { name: String },

    #[error("cannot assign type {actual} to {target} of type {expected}")]
    AssignmentMismatch {
        target: String,
        expected: String,
        actual: String,
    },

    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("'this' used outside an object literal")]
    ThisOutsideObject,

    #[error("return statement outside a function body")]
    ReturnOutsideFunction,
}

impl From<ScopeError> for RegistrationError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::UnknownIdentifier { name } => RegistrationError::UnknownIdentifier { name },
            ScopeError::UnknownType { name } => RegistrationError::UnknownType { name },
        }
    }
}

impl RegistrationError {
    /// Render this error with its diagnostic code.
    pub fn diagnostic(&self) -> Diagnostic {
        use RegistrationError::*;

        match self {
            UnknownIdentifier { name } => {
                Diagnostic::new(&messages::CANNOT_FIND_NAME_0, &[name.as_str()])
            }
            UnknownType { name } => {
                Diagnostic::new(&messages::CANNOT_FIND_TYPE_0, &[name.as_str()])
            }
            UnresolvedTypes { names } => {
                let joined = names.join(", ");
                let primary =
                    Diagnostic::new(&messages::FAILED_TO_RESOLVE_TYPES_0, &[joined.as_str()]);
                names.iter().fold(primary, |diag, name| {
                    let missing = Diagnostic::new(&messages::CANNOT_FIND_TYPE_0, &[name.as_str()]);
                    diag.with_related(missing)
                })
            }
            TypeMismatch { name, expected, actual } => Diagnostic::new(
                &messages::_0_WAS_ANNOTATED_1_BUT_FOUND_2,
                &[name.as_str(), expected.as_str(), actual.as_str()],
            ),
            FnRtnTypeMismatch { name, implicit, explicit } => Diagnostic::new(
                &messages::FUNCTION_0_DECLARES_RETURN_TYPE_1_BUT_RETURNS_2,
                &[name.as_str(), explicit.as_str(), implicit.as_str()],
            ),
            TooManyArguments { function, expected, actual } => Diagnostic::new(
                &messages::TOO_MANY_ARGUMENTS_FOR_0_EXPECTED_1_GOT_2,
                &[function.as_str(), expected.to_string().as_str(), actual.to_string().as_str()],
            ),
            MissingArgument { function, parameter } => Diagnostic::new(
                &messages::MISSING_ARGUMENT_FOR_0_IN_CALL_TO_1,
                &[parameter.as_str(), function.as_str()],
            ),
            ArgumentTypeMismatch {
                function,
                parameter,
                expected,
                actual,
            } => Diagnostic::new(
                &messages::CANNOT_USE_TYPE_0_FOR_ARGUMENT_1_IN_CALL_TO_2,
                &[actual.as_str(), parameter.as_str(), function.as_str(), expected.as_str()],
            ),
            NotCallable { name, ty } => Diagnostic::new(
                &messages::_0_OF_TYPE_1_IS_NOT_CALLABLE,
                &[name.as_str(), ty.as_str()],
            ),
            UnknownMember { member, ty } => Diagnostic::new(
                &messages::PROPERTY_0_DOES_NOT_EXIST_ON_TYPE_1,
                &[member.as_str(), ty.as_str()],
            ),
            DuplicateMember { member } => {
                Diagnostic::new(&messages::DUPLICATE_MEMBER_0, &[member.as_str()])
            }
            UndeclaredSelfReference { member } => Diagnostic::new(
                &messages::MEMBER_0_REFERENCED_THROUGH_THIS_WAS_NEVER_DECLARED,
                &[member.as_str()],
            ),
            MemberWaitTimedOut { member, .. } => {
                Diagnostic::new(&messages::TIMED_OUT_WAITING_FOR_MEMBER_0, &[member.as_str()])
            }
            MemberWaitFailed { source } => Diagnostic::new(
                &messages::WAITING_FOR_MEMBER_0_FAILED_1,
                &[source.member_name(), source.to_string().as_str()],
            ),
            CyclicType { name } => {
                Diagnostic::new(&messages::TYPE_0_CIRCULARLY_REFERENCES_ITSELF, &[name.as_str()])
            }
            AssignmentMismatch { target, expected, actual } => Diagnostic::new(
                &messages::CANNOT_ASSIGN_TYPE_0_TO_1_OF_TYPE_2,
                &[actual.as_str(), target.as_str(), expected.as_str()],
            ),
            InvalidAssignmentTarget => Diagnostic::new(&messages::INVALID_ASSIGNMENT_TARGET, &[]),
            ThisOutsideObject => Diagnostic::new(&messages::THIS_OUTSIDE_OBJECT_LITERAL, &[]),
            ReturnOutsideFunction => Diagnostic::new(&messages::RETURN_OUTSIDE_FUNCTION_BODY, &[]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_diagnostic() {
        let err = RegistrationError::TypeMismatch {
            name: "foo".into(),
            expected: "string".into(),
            actual: "number".into(),
        };
        let diag = err.diagnostic();
        assert_eq!(diag.code, 2322);
        assert_eq!(
            diag.message_text,
            "'foo' had a type annotation of 'string', but the type was found to be 'number'."
        );
    }

    #[test]
    fn test_unresolved_types_lists_each_name() {
        let err = RegistrationError::UnresolvedTypes {
            names: vec!["Foo".into(), "Bar".into()],
        };
        assert_eq!(err.to_string(), "failed to resolve types: Foo, Bar");
        assert_eq!(err.diagnostic().related_information.len(), 2);
    }

    #[test]
    fn test_scope_errors_convert() {
        let err: RegistrationError = ScopeError::UnknownType { name: "Foo".into() }.into();
        assert!(matches!(err, RegistrationError::UnknownType { name } if name == "Foo"));
    }
}
